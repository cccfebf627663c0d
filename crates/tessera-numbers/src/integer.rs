//! Arbitrary precision integers.
//!
//! This module provides a shared handle around `dashu::IBig`. Values are
//! immutable; cloning an [`Integer`] only bumps a reference count, so the
//! same value can be held by many expression trees at once.
//!
//! Zero, one and minus one are process-wide singletons: [`Integer::create`]
//! never allocates for them and [`Integer::ptr_eq`] can be used to observe
//! the sharing.

use dashu::base::{Gcd, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;
use std::sync::Arc;

use crate::theory::Factorization;
use crate::{AbsoluteValue, Number, ParseNumberError, Rational, Real};

static ZERO: Lazy<Integer> = Lazy::new(|| Integer(Arc::new(IBig::ZERO)));
static ONE: Lazy<Integer> = Lazy::new(|| Integer(Arc::new(IBig::ONE)));
static MINUS_ONE: Lazy<Integer> = Lazy::new(|| Integer(Arc::new(IBig::from(-1))));

/// An arbitrary precision integer.
///
/// Equality and ordering are by value. Use [`Integer::ptr_eq`] when identity
/// matters (e.g. to check that a value is the canonical zero).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Integer(Arc<IBig>);

impl Integer {
    /// Wraps an `IBig`, routing 0, 1 and -1 through the shared singletons.
    #[must_use]
    pub fn create(value: IBig) -> Self {
        if value == *ZERO.0 {
            return ZERO.clone();
        }
        if value == *ONE.0 {
            return ONE.clone();
        }
        if value == *MINUS_ONE.0 {
            return MINUS_ONE.clone();
        }
        Self(Arc::new(value))
    }

    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self::create(IBig::from(value))
    }

    /// The canonical minus one.
    #[must_use]
    pub fn minus_one() -> Self {
        MINUS_ONE.clone()
    }

    /// Returns true if both handles share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Creates an integer from a string in the given base.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, ParseNumberError> {
        IBig::from_str_radix(s, radix)
            .map(Self::create)
            .map_err(|_| ParseNumberError::InvalidInteger(s.to_string()))
    }

    /// Parses a base-10 literal, returning `None` on malformed input.
    ///
    /// Literal recognition probes many candidate strings, so failure here is
    /// an ordinary outcome rather than an error.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&*self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&*self.0)
    }

    /// Returns true if this integer is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    /// Computes the greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let g: UBig = IBig::clone(&self.0).gcd(IBig::clone(&other.0));
        Self::create(IBig::from(g))
    }

    /// Computes the least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self::create(&*self.0 / &*g.0 * &*other.0).abs()
    }

    /// Returns a reference to the inner `dashu::IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }

    /// Returns a copy of the inner `dashu::IBig`.
    #[must_use]
    pub fn to_inner(&self) -> IBig {
        IBig::clone(&self.0)
    }

    /// Returns the magnitude as an unsigned big integer.
    #[must_use]
    pub fn unsigned_abs(&self) -> UBig {
        IBig::clone(&self.0).unsigned_abs()
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        IBig::clone(&self.0).try_into().ok()
    }

    /// Attempts to convert to a u32.
    #[must_use]
    pub fn to_u32(&self) -> Option<u32> {
        IBig::clone(&self.0).try_into().ok()
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self::create(self.0.pow(exp as usize))
    }

    /// Widens to the rational level.
    #[must_use]
    pub fn to_rational(&self) -> Rational {
        Rational::from_integer(self.clone())
    }

    /// Widens to the real level.
    #[must_use]
    pub fn to_real(&self) -> Real {
        Real::from_integer(self)
    }

    /// `self % rhs`, or `None` for a zero divisor.
    #[must_use]
    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        (!rhs.is_zero()).then(|| self % rhs)
    }

    /// Lazy prime factorization of the absolute value.
    ///
    /// Every call starts a fresh sequence; 0, 1 and -1 have no factors.
    #[must_use]
    pub fn factorize(&self) -> Factorization {
        Factorization::new(self.unsigned_abs())
    }

    /// Number of positive divisors, or 0 for non-positive values.
    #[must_use]
    pub fn count_divisors(&self) -> Integer {
        if !self.is_positive() {
            return Self::zero();
        }
        self.factorize()
            .fold(Self::one(), |acc, (_, power)| acc * Self::from(u64::from(power) + 1))
    }

    /// Returns true if this integer has exactly two positive divisors.
    #[must_use]
    pub fn is_prime(&self) -> bool {
        self.count_divisors() == Self::new(2)
    }

    /// Euler's totient.
    ///
    /// Non-positive values have no totient and yield 0.
    #[must_use]
    pub fn phi(&self) -> Integer {
        if !self.is_positive() {
            return Self::zero();
        }
        self.factorize().fold(Self::one(), |acc, (prime, power)| {
            acc * prime.pow(power - 1) * (&prime - &Self::one())
        })
    }
}

impl Default for Integer {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        ZERO.clone()
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        ONE.clone()
    }

    fn is_one(&self) -> bool {
        *self.0 == IBig::ONE
    }
}

impl AbsoluteValue for Integer {
    fn abs_value(&self) -> Number {
        Number::Integer(self.abs())
    }
}

impl FromStr for Integer {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(s, 10)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! forward_integer_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for &Integer {
            type Output = Integer;

            fn $method(self, rhs: Self) -> Self::Output {
                Integer::create(&*self.0 $op &*rhs.0)
            }
        }

        impl $trait for Integer {
            type Output = Integer;

            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&Integer> for Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Self::Output {
                (&self).$method(rhs)
            }
        }
    };
}

forward_integer_binop!(Add, add, +);
forward_integer_binop!(Sub, sub, -);
forward_integer_binop!(Mul, mul, *);

/// Modulus whose result carries the sign of neither operand when the
/// divisor is positive: `-7 % 3 == 2`.
///
/// # Panics
///
/// Panics if the divisor is zero, unlike `/` which yields NaN. Use
/// [`Integer::checked_rem`] when the divisor may be zero.
impl Rem for &Integer {
    type Output = Integer;

    fn rem(self, rhs: Self) -> Self::Output {
        let r = &*self.0 % &*rhs.0;
        if DashuSigned::is_negative(&r) {
            Integer::create(r + rhs.abs().as_inner())
        } else {
            Integer::create(r)
        }
    }
}

impl Rem for Integer {
    type Output = Integer;

    fn rem(self, rhs: Self) -> Self::Output {
        &self % &rhs
    }
}

/// Exact division; the quotient lands on the narrowest level that holds it.
impl Div for &Integer {
    type Output = Number;

    fn div(self, rhs: Self) -> Self::Output {
        if rhs.is_zero() {
            return Number::Real(Real::nan());
        }
        Number::from(Rational::new(self.clone(), rhs.clone()))
    }
}

impl Div for Integer {
    type Output = Number;

    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer::create(-&*self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self::create(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self::create(value)
    }
}

impl From<UBig> for Integer {
    fn from(value: UBig) -> Self {
        Self::create(IBig::from(value))
    }
}
