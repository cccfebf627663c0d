//! # tessera-simplify
//!
//! Rule-based simplification for the Tessera CAS.
//!
//! This crate provides:
//! - A library of guarded [`patterns`] over [`Entity`](tessera_core::Entity),
//!   applied bottom-up to a fixpoint
//! - Equality saturation with `egg` over the arithmetic, trigonometric and
//!   exponential fragment
//! - Cost functions for extraction
//! - Content extraction from sums ([`factorize`])
//!
//! ## Patterns vs. Equality Saturation
//!
//! Patterns are cheap and deterministic: each one looks at a single node
//! and either rewrites it or hands it back unchanged. Equality saturation
//! explores all rewrite paths at once and avoids the phase ordering
//! problem, at the price of an e-graph. The [`Simplifier`] runs patterns
//! first, saturates what is left, and normalizes the result with patterns
//! again.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analysis;
pub mod cost;
pub mod engine;
pub mod factorize;
pub mod language;
pub mod patterns;
pub mod rules;
pub mod translate;

pub use cost::CostModel;
pub use engine::{SimplificationStats, Simplifier, SimplifierConfig};
pub use factorize::factorize;
pub use language::SymLang;
pub use patterns::NamedRule;
