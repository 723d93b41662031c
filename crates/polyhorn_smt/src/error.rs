use std::fmt;

/// Errors from parsing a solver's stdout (§4.6, §7(d)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtError {
    /// Every line was empty or `unsupported`; no status line was found.
    MissingStatus,
    /// The status line was present but not one of `sat | unsat | unknown`.
    UnrecognizedStatus(String),
}

impl fmt::Display for SmtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmtError::MissingStatus => write!(f, "solver produced no status line"),
            SmtError::UnrecognizedStatus(s) => write!(f, "unrecognized solver status {s:?}"),
        }
    }
}

impl std::error::Error for SmtError {}

pub type SmtResult<T> = Result<T, SmtError>;
