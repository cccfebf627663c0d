//! Exact fractions, the second level of the tower.
//!
//! A [`Rational`] is always normalized: lowest terms, positive denominator.
//! Values with denominator one are still valid rationals here; narrowing
//! them back to [`Integer`] is the job of [`Number::downcast`].

use dashu::base::{Abs, Inverse, Signed as DashuSigned};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{AbsoluteValue, Integer, Number, Real};

/// An exact fraction `p/q` with `q > 0` and `gcd(p, q) = 1`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// `numerator / denominator`, or `None` when the denominator is zero.
    #[must_use]
    pub fn checked_new(numerator: Integer, denominator: Integer) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        let magnitude = RBig::from_parts(numerator.to_inner(), denominator.unsigned_abs());
        Some(Self(if denominator.is_negative() { -magnitude } else { magnitude }))
    }

    /// `numerator / denominator`.
    ///
    /// # Panics
    ///
    /// On a zero denominator. Use [`Rational::checked_new`] when the
    /// denominator comes from user input.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        match Self::checked_new(numerator, denominator) {
            Some(r) => r,
            None => panic!("rational with zero denominator"),
        }
    }

    /// Machine-integer shorthand for [`Rational::new`].
    ///
    /// # Panics
    ///
    /// On a zero denominator.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Machine-integer shorthand for [`Rational::checked_new`].
    #[must_use]
    pub fn checked_from_i64(numerator: i64, denominator: i64) -> Option<Self> {
        Self::checked_new(Integer::new(numerator), Integer::new(denominator))
    }

    /// `n / 1`.
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.to_inner()))
    }

    /// The signed numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::create(self.0.numerator().clone())
    }

    /// The positive denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::create(IBig::from(self.0.denominator().clone()))
    }

    /// True when the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// The numerator, when the denominator is one.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer().then(|| self.numerator())
    }

    /// `|self|`.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// `1 / self`.
    ///
    /// # Panics
    ///
    /// When `self` is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        match (self.0.is_zero(), DashuSigned::is_negative(&self.0)) {
            (true, _) => 0,
            (false, true) => -1,
            (false, false) => 1,
        }
    }

    /// True below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Borrows the backing `RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }

    /// `self^exp` for a machine exponent.
    ///
    /// `None` for a negative power of zero.
    #[must_use]
    pub fn powi(&self, exp: i32) -> Option<Self> {
        let magnitude = Self(self.0.pow(exp.unsigned_abs() as usize));
        match (exp < 0, magnitude.is_zero()) {
            (false, _) => Some(magnitude),
            (true, true) => None,
            (true, false) => Some(magnitude.recip()),
        }
    }

    /// Widens to the real level.
    #[must_use]
    pub fn to_real(&self) -> Real {
        Real::from_rational(self)
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.numerator().to_f64() / self.denominator().to_f64()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl AbsoluteValue for Rational {
    fn abs_value(&self) -> Number {
        Number::from(self.abs())
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_integer() {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "{}/{}", self.numerator(), self.denominator()),
        }
    }
}

macro_rules! rational_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for &Rational {
            type Output = Rational;

            fn $method(self, rhs: Self) -> Rational {
                Rational(&self.0 $op &rhs.0)
            }
        }

        impl $trait<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational(self.0 $op &rhs.0)
            }
        }

        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Self) -> Rational {
                Rational(self.0 $op rhs.0)
            }
        }
    };
}

rational_binop!(Add, add, +);
rational_binop!(Sub, sub, -);
rational_binop!(Mul, mul, *);
// Callers check for a zero divisor; `Number` division maps it to NaN.
rational_binop!(Div, div, /);

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from(i64::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(p: i64, d: i64) -> Rational {
        Rational::from_i64(p, d)
    }

    #[test]
    fn test_field_operations() {
        assert_eq!(q(1, 2) + q(1, 3), q(5, 6));
        assert_eq!(q(1, 2) - q(1, 3), q(1, 6));
        assert_eq!(&q(2, 3) * &q(3, 4), q(1, 2));
        assert_eq!(q(1, 2) / q(1, 3), q(3, 2));
        assert_eq!(-q(1, 2), q(-1, 2));
    }

    #[test]
    fn test_normal_form() {
        let r = q(4, -6);
        assert_eq!(r.numerator(), Integer::new(-2));
        assert_eq!(r.denominator(), Integer::new(3));
        assert_eq!(r.signum(), -1);
        assert_eq!(q(0, -5).signum(), 0);
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Rational::checked_from_i64(1, 0), None);
        assert_eq!(Rational::checked_from_i64(6, 3), Some(Rational::from(2)));
    }

    #[test]
    fn test_integer_view() {
        assert_eq!(q(6, 3).to_integer(), Some(Integer::new(2)));
        assert_eq!(q(7, 3).to_integer(), None);
        assert_eq!(q(-7, 3).abs(), q(7, 3));
    }

    #[test]
    fn test_powi() {
        assert_eq!(q(2, 3).powi(2), Some(q(4, 9)));
        assert_eq!(q(2, 3).powi(-3), Some(q(27, 8)));
        assert_eq!(Rational::zero().powi(0), Some(Rational::one()));
        assert_eq!(Rational::zero().powi(-2), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(q(3, 1).to_string(), "3");
        assert_eq!(q(-2, 3).to_string(), "-2/3");
    }
}
