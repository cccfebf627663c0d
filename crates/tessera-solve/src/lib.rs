//! # tessera-solve
//!
//! Closed-form equation and inequality solving for the Tessera CAS.
//!
//! This crate provides:
//!
//! - **Shape recognition**: view an expression as a polynomial in one
//!   variable ([`polynomial`])
//! - **Root finding**: linear and quadratic roots with real/complex
//!   classification ([`roots`])
//! - **Solving**: `expr = 0`, `expr > 0` and whole boolean statements, with
//!   solutions as [`Set`](tessera_core::Set)s
//!
//! Shapes without a closed form (degree three and up, transcendental
//! equations) are declined with [`SolveError::NotImplemented`] rather than
//! approximated.
//!
//! # Example
//!
//! ```
//! use tessera_core::{Entity, Interval, Set};
//! use tessera_solve::solve;
//!
//! let x = Entity::var("x");
//! let statement = (&x - &Entity::integer(3)).greater(0);
//! let expected: Set = Interval::open(Entity::integer(3), Entity::infinity()).into();
//! assert_eq!(solve(&statement, "x"), Ok(expected));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod equation;
pub mod error;
pub mod inequality;
pub mod polynomial;
pub mod roots;
pub mod statement;

#[cfg(test)]
mod tests;

use once_cell::sync::Lazy;
use tessera_core::Entity;
use tessera_simplify::{Simplifier, SimplifierConfig};

pub use equation::solve_equation;
pub use error::{SolveError, SolveResult};
pub use inequality::solve_inequality;
pub use polynomial::{coefficients, try_linear, try_quadratic, MAX_DEGREE};
pub use roots::{classify_root, solve_linear, solve_quadratic, RootKind};
pub use statement::solve;

static COEFFICIENT_SIMPLIFIER: Lazy<Simplifier> =
    Lazy::new(|| Simplifier::with_config(SimplifierConfig::patterns_only()));

/// Normalizes a coefficient or root with the pattern library.
pub(crate) fn simplify_coefficient(e: &Entity) -> Entity {
    COEFFICIENT_SIMPLIFIER.simplify(e)
}
