//! Error types for solving.

use thiserror::Error;

/// Why a solve request was declined.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The expression has a shape no solver handles, such as a cubic.
    ///
    /// This is never used to mean "no solutions"; that is `Set::Empty`.
    #[error("solving is not implemented for `{0}`")]
    NotImplemented(String),

    /// The entity is not a boolean statement.
    #[error("`{0}` is not a statement")]
    NotAStatement(String),
}

/// Shorthand for `Result<T, SolveError>`.
pub type SolveResult<T> = Result<T, SolveError>;
