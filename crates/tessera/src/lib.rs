//! # Tessera
//!
//! A symbolic computer-algebra kernel written in Rust.
//!
//! Tessera represents expressions as immutable, structurally shared trees,
//! simplifies them with guarded rewrite patterns and equality saturation,
//! computes exactly over an arbitrary precision numeric tower, and solves
//! linear and quadratic equations and inequalities into sets.
//!
//! ## Features
//!
//! - **Numeric Tower**: `Integer ⊂ Rational ⊂ Real ⊂ Complex` with exact
//!   promotion and demotion, plus number theory
//!   (operators are total, so division by zero is NaN; integer `%` is the
//!   exception and panics, with `Integer::checked_rem` as the fallible form)
//! - **Expression Trees**: `Arc`-shared entities with substitution,
//!   evaluation, differentiation and expansion
//! - **Set Algebra**: finite sets, intervals, unions and intersections
//! - **Smart Simplification**: patterns plus equality saturation via e-graphs
//! - **Solving**: closed-form roots with real/complex classification
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! let x = Entity::var("x");
//!
//! let doubled = (&x + &x).simplify();
//! assert_eq!(doubled, Entity::integer(2) * x.clone());
//!
//! let solutions = (&x - &Entity::integer(3)).greater(0).solve("x").unwrap();
//! let expected: Set = Interval::open(Entity::integer(3), Entity::infinity()).into();
//! assert_eq!(solutions, expected);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ext;

pub use tessera_core as core;
pub use tessera_numbers as numbers;
pub use tessera_simplify as simplify;
pub use tessera_solve as solve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::ext::EntityExt;
    pub use tessera_core::{intersect, unite, Entity, FiniteSet, Func, Interval, Relation, Set};
    pub use tessera_numbers::{AbsoluteValue, Complex, Integer, Number, Rational, Real};
    pub use tessera_simplify::{Simplifier, SimplifierConfig};
    pub use tessera_solve::{SolveError, SolveResult};
}
