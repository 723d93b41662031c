use std::fmt;

use polyhorn_smt::SmtError;

/// Failure modes of a solver invocation (§7(a), (b), (e)). `NotFound`,
/// `TimedOut` and `Crashed` are never surfaced to a caller of
/// [`crate::run_on_solver`] as an `Err` — they are caught internally,
/// reported to stderr, and downgraded to an `unknown` result. Only `Io` and
/// `Smt` propagate.
#[derive(Debug)]
pub enum SolverError {
    NotFound(String),
    TimedOut,
    Crashed(String),
    Io(std::io::Error),
    Smt(SmtError),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::NotFound(name) => write!(f, "solver binary {name:?} not found"),
            SolverError::TimedOut => write!(f, "solver timed out"),
            SolverError::Crashed(stderr) => write!(f, "solver crashed: {stderr}"),
            SolverError::Io(e) => write!(f, "I/O error: {e}"),
            SolverError::Smt(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<std::io::Error> for SolverError {
    fn from(e: std::io::Error) -> Self {
        SolverError::Io(e)
    }
}

impl From<SmtError> for SolverError {
    fn from(e: SmtError) -> Self {
        SolverError::Smt(e)
    }
}

pub type SolverResult<T> = Result<T, SolverError>;
