use std::fmt;

/// Errors raised before any constraint generation begins: a malformed
/// [`crate::Config`] or a request the witness generators cannot satisfy.
///
/// Mirrors the error-enum-plus-`Display` convention used throughout this
/// codebase rather than a string-typed error: callers match on `kind` to
/// decide how to react (e.g. the CLI reports `ConfigError` to the user and
/// exits, while `(unknown, {})` solver failures are handled separately by
/// `polyhorn-solver`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WitnessError {
    /// `theorem_name` did not match `farkas | handelman | putinar | auto`.
    UnknownTheorem(String),
    /// `solver_name` did not match `z3 | mathsat | default`.
    UnknownSolver(String),
    /// One of the four degree knobs was supplied as a negative number before
    /// being parsed into the unsigned degree fields `Config` stores.
    NegativeDegree { field: &'static str, value: i64 },
    /// A witness generator received a Horn implication its theorem cannot
    /// discharge (e.g. Farkas asked to handle a nonlinear goal).
    UnsupportedShape { theorem: &'static str, reason: String },
}

impl fmt::Display for WitnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WitnessError::UnknownTheorem(name) => {
                write!(f, "unknown theorem_name: {name:?} (expected farkas, handelman, putinar, or auto)")
            }
            WitnessError::UnknownSolver(name) => {
                write!(f, "unknown solver_name: {name:?} (expected z3, mathsat, or default)")
            }
            WitnessError::NegativeDegree { field, value } => {
                write!(f, "{field} must be nonnegative, got {value}")
            }
            WitnessError::UnsupportedShape { theorem, reason } => {
                write!(f, "{theorem} cannot discharge this implication: {reason}")
            }
        }
    }
}

impl std::error::Error for WitnessError {}

pub type WitnessResult<T> = Result<T, WitnessError>;
