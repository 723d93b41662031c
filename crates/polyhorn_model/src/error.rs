use std::fmt;

use polyhorn_witness::WitnessError;

/// Errors raised while building or compiling a [`crate::PositiveModel`].
///
/// Wraps [`WitnessError`] via `From` rather than re-declaring its variants,
/// mirroring the layered-error convention used throughout this codebase:
/// each crate owns its own failure modes and chains the ones beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A Horn pair's `RHS` had no clauses at all — there is no positive
    /// obligation to retain.
    EmptyGoal,
    /// A witness generator rejected one of the pair's expanded implications.
    Witness(WitnessError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyGoal => write!(f, "Horn pair RHS has no clauses; nothing to prove"),
            ModelError::Witness(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<WitnessError> for ModelError {
    fn from(e: WitnessError) -> Self {
        ModelError::Witness(e)
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
