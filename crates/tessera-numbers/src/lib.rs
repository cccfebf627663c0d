//! # tessera-numbers
//!
//! The numeric tower of the Tessera CAS.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`) with shared small singletons
//! - Exact rationals (`Rational`)
//! - Decimal reals with infinities and `NaN` (`Real`)
//! - Complex numbers over decimal parts (`Complex`)
//! - The promoting union of all four (`Number`)
//!
//! ## Number theory
//!
//! `Integer` also carries lazy prime factorization, divisor counting,
//! primality and Euler's totient. Non-positive arguments are not errors:
//! divisor counts and totients of them are zero.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod complex;
pub mod integer;
pub mod number;
pub mod rational;
pub mod real;
pub mod theory;

#[cfg(test)]
mod proptests;

use thiserror::Error;

pub use complex::Complex;
pub use integer::Integer;
pub use number::{Level, Number};
pub use rational::Rational;
pub use real::Real;
pub use theory::Factorization;

/// Significant decimal digits kept by [`Real`].
pub const DEFAULT_PRECISION: usize = 50;

/// Absolute value across the tower.
///
/// The result always lands on the real line, so every level returns a
/// [`Number`] rather than `Self`.
pub trait AbsoluteValue {
    /// `|self|`, downcast to the narrowest level.
    fn abs_value(&self) -> Number;
}

/// Failure to read a numeric literal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseNumberError {
    /// Not an integer in the requested radix.
    #[error("invalid integer literal: {0}")]
    InvalidInteger(String),
}
