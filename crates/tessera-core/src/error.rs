//! Error types for tree operations.

use thiserror::Error;

/// Failure of an evaluation or derivation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The expression has no value of the requested kind.
    #[error("cannot evaluate `{expr}`: {reason}")]
    CannotEvaluate {
        /// The offending subexpression, rendered.
        expr: String,
        /// Why evaluation stopped.
        reason: &'static str,
    },

    /// No derivative rule applies.
    #[error("cannot differentiate `{0}`")]
    NotDifferentiable(String),
}

/// Shorthand for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;
