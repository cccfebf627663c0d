//! # tessera-core
//!
//! Core expression engine for the Tessera Computer Algebra System.
//!
//! This crate provides:
//! - Immutable, structurally shared expression trees (`Entity`)
//! - Set algebra over expressions (`Set`, `Interval`, `FiniteSet`)
//! - Substitution, numeric and boolean evaluation
//! - Differentiation and expansion
//!
//! ## Design Principles
//!
//! - **Immutability**: nodes are never mutated after construction; every
//!   transformation returns a new tree sharing untouched subtrees
//! - **Structure only**: constructors and operators assemble nodes and never
//!   evaluate; simplification lives in `tessera-simplify`
//! - **Thread safety**: entities are `Send + Sync` and can be read from any
//!   number of threads

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod derive;
pub mod entity;
pub mod error;
pub mod eval;
pub mod expand;
pub mod expr;
pub mod set;

pub use entity::{Entity, CONSTANTS};
pub use error::{CoreError, CoreResult};
pub use expand::MAX_EXPANSION_POWER;
pub use expr::{Arguments, Func, Node, Operands, Priority, Relation};
pub use set::{intersect, unite, FiniteSet, Interval, Set};
pub use tessera_numbers::Number;
