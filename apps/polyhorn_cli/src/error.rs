use std::fmt;

use polyhorn_model::ModelError;
use polyhorn_solver::SolverError;
use polyhorn_witness::WitnessError;

/// Errors the CLI surfaces to its `main`, mirroring the layered-error
/// convention of the library crates it wraps: each lower error is chained
/// in via `From` rather than re-derived.
#[derive(Debug)]
pub enum CliError {
    /// The TOML model file didn't match the expected schema.
    Toml(toml::de::Error),
    /// The model file was well-formed TOML but described an invalid model
    /// (a polynomial expression referencing an undeclared variable, a
    /// malformed `Config`, and the like).
    Model(String),
    Witness(WitnessError),
    Reasoner(ModelError),
    Solver(SolverError),
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Toml(e) => write!(f, "invalid model file: {e}"),
            CliError::Model(msg) => write!(f, "{msg}"),
            CliError::Witness(e) => write!(f, "{e}"),
            CliError::Reasoner(e) => write!(f, "{e}"),
            CliError::Solver(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Toml(e)
    }
}

impl From<WitnessError> for CliError {
    fn from(e: WitnessError) -> Self {
        CliError::Witness(e)
    }
}

impl From<ModelError> for CliError {
    fn from(e: ModelError) -> Self {
        CliError::Reasoner(e)
    }
}

impl From<SolverError> for CliError {
    fn from(e: SolverError) -> Self {
        CliError::Solver(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

pub type CliResult<T> = Result<T, CliError>;
