//! Arbitrary precision decimal reals.
//!
//! Finite values are `dashu::float::DBig` rounded to [`DEFAULT_PRECISION`]
//! significant digits. The extended values `+oo`, `-oo` and `NaN` keep the
//! arithmetic operators total, which interval endpoints and division by zero
//! both rely on.

use dashu::base::SquareRoot;
use dashu::float::DBig;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::{AbsoluteValue, Complex, Integer, Number, Rational, DEFAULT_PRECISION};

#[derive(Clone, PartialEq)]
enum RealValue {
    Finite(DBig),
    PositiveInfinity,
    NegativeInfinity,
    NaN,
}

/// A real number: a finite decimal, an infinity, or `NaN`.
///
/// Equality is structural, so `NaN == NaN`. Use [`Real::compare`] for the
/// numeric ordering, which is undefined whenever `NaN` is involved.
#[derive(Clone, PartialEq)]
pub struct Real(RealValue);

fn rounded(value: DBig) -> DBig {
    value.with_precision(DEFAULT_PRECISION).value()
}

impl Real {
    /// Wraps a finite decimal.
    #[must_use]
    pub fn create(value: DBig) -> Self {
        Self(RealValue::Finite(rounded(value)))
    }

    /// `+oo`.
    #[must_use]
    pub fn positive_infinity() -> Self {
        Self(RealValue::PositiveInfinity)
    }

    /// `-oo`.
    #[must_use]
    pub fn negative_infinity() -> Self {
        Self(RealValue::NegativeInfinity)
    }

    /// Not-a-number.
    #[must_use]
    pub fn nan() -> Self {
        Self(RealValue::NaN)
    }

    /// Finite zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(RealValue::Finite(DBig::ZERO))
    }

    /// Exact conversion from an integer.
    #[must_use]
    pub fn from_integer(value: &Integer) -> Self {
        Self::create(DBig::from(value.to_inner()))
    }

    /// Decimal approximation of a rational.
    #[must_use]
    pub fn from_rational(value: &Rational) -> Self {
        let num = rounded(DBig::from(value.numerator().to_inner()));
        let den = rounded(DBig::from(value.denominator().to_inner()));
        Self::create(num / den)
    }

    /// Converts from `f64`, mapping the IEEE specials onto the extended values.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::nan();
        }
        if value.is_infinite() {
            return if value > 0.0 {
                Self::positive_infinity()
            } else {
                Self::negative_infinity()
            };
        }
        // f64's Display never uses exponent notation, which DBig parses directly.
        DBig::from_str(&value.to_string()).map_or_else(|_| Self::nan(), Self::create)
    }

    /// Parses a decimal literal such as `3.25` or `-0.5`.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        DBig::from_str(s.trim()).ok().map(Self::create)
    }

    /// Returns the finite decimal, if any.
    #[must_use]
    pub fn as_decimal(&self) -> Option<&DBig> {
        match &self.0 {
            RealValue::Finite(d) => Some(d),
            _ => None,
        }
    }

    /// Returns true if the value is neither infinite nor `NaN`.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self.0, RealValue::Finite(_))
    }

    /// Returns true for `NaN`.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self.0, RealValue::NaN)
    }

    /// Returns true for either infinity.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self.0, RealValue::PositiveInfinity | RealValue::NegativeInfinity)
    }

    /// Returns true for finite zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(&self.0, RealValue::Finite(d) if *d == DBig::ZERO)
    }

    /// Returns true if strictly below zero (including `-oo`).
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.compare(&Self::zero()) == Some(Ordering::Less)
    }

    /// Returns true if strictly above zero (including `+oo`).
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.compare(&Self::zero()) == Some(Ordering::Greater)
    }

    /// Numeric ordering; `None` when either side is `NaN`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        use RealValue::{Finite, NaN, NegativeInfinity, PositiveInfinity};
        match (&self.0, &other.0) {
            (NaN, _) | (_, NaN) => None,
            (Finite(a), Finite(b)) => a.partial_cmp(b),
            (PositiveInfinity, PositiveInfinity) | (NegativeInfinity, NegativeInfinity) => {
                Some(Ordering::Equal)
            }
            (PositiveInfinity, _) | (_, NegativeInfinity) => Some(Ordering::Greater),
            (NegativeInfinity, _) | (_, PositiveInfinity) => Some(Ordering::Less),
        }
    }

    /// The exact integer this value equals, if it is a finite whole number.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        let d = self.as_decimal()?;
        if d.trunc() == *d {
            Some(Integer::create(d.to_int().value()))
        } else {
            None
        }
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match &self.0 {
            RealValue::Finite(d) => d.to_f64().value(),
            RealValue::PositiveInfinity => f64::INFINITY,
            RealValue::NegativeInfinity => f64::NEG_INFINITY,
            RealValue::NaN => f64::NAN,
        }
    }

    /// Widens to the complex level.
    #[must_use]
    pub fn to_complex(&self) -> Complex {
        Complex::new(self.clone(), Self::zero())
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    /// Principal square root of a non-negative value; `NaN` below zero.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        match &self.0 {
            RealValue::Finite(d) if *d >= DBig::ZERO => Self::create(rounded(d.clone()).sqrt()),
            RealValue::PositiveInfinity => Self::positive_infinity(),
            _ => Self::nan(),
        }
    }
}

impl AbsoluteValue for Real {
    fn abs_value(&self) -> Number {
        Number::from(self.abs())
    }
}

impl Add for &Real {
    type Output = Real;

    fn add(self, rhs: Self) -> Self::Output {
        use RealValue::{Finite, NaN, NegativeInfinity, PositiveInfinity};
        match (&self.0, &rhs.0) {
            (Finite(a), Finite(b)) => Real::create(a + b),
            (NaN, _) | (_, NaN) => Real::nan(),
            (PositiveInfinity, NegativeInfinity) | (NegativeInfinity, PositiveInfinity) => {
                Real::nan()
            }
            (PositiveInfinity, _) | (_, PositiveInfinity) => Real::positive_infinity(),
            (NegativeInfinity, _) | (_, NegativeInfinity) => Real::negative_infinity(),
        }
    }
}

impl Sub for &Real {
    type Output = Real;

    fn sub(self, rhs: Self) -> Self::Output {
        self + &(-rhs)
    }
}

impl Mul for &Real {
    type Output = Real;

    fn mul(self, rhs: Self) -> Self::Output {
        use RealValue::{Finite, NaN};
        match (&self.0, &rhs.0) {
            (Finite(a), Finite(b)) => Real::create(a * b),
            (NaN, _) | (_, NaN) => Real::nan(),
            _ => {
                // At least one infinity: the sign decides, zero is indeterminate.
                match (self.compare(&Real::zero()), rhs.compare(&Real::zero())) {
                    (Some(Ordering::Equal), _) | (_, Some(Ordering::Equal)) => Real::nan(),
                    (l, r) if l == r => Real::positive_infinity(),
                    _ => Real::negative_infinity(),
                }
            }
        }
    }
}

impl Div for &Real {
    type Output = Real;

    fn div(self, rhs: Self) -> Self::Output {
        use RealValue::{Finite, NaN};
        match (&self.0, &rhs.0) {
            (_, Finite(b)) if *b == DBig::ZERO => Real::nan(),
            (Finite(a), Finite(b)) => Real::create(a / b),
            (NaN, _) | (_, NaN) => Real::nan(),
            (Finite(_), _) => Real::zero(),
            (_, Finite(_)) => {
                if self.is_positive() == rhs.is_positive() {
                    Real::positive_infinity()
                } else {
                    Real::negative_infinity()
                }
            }
            _ => Real::nan(),
        }
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Self::Output {
        match &self.0 {
            RealValue::Finite(d) => Real(RealValue::Finite(-d.clone())),
            RealValue::PositiveInfinity => Real::negative_infinity(),
            RealValue::NegativeInfinity => Real::positive_infinity(),
            RealValue::NaN => Real::nan(),
        }
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Real({self})")
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            RealValue::Finite(d) => write!(f, "{d}"),
            RealValue::PositiveInfinity => write!(f, "+oo"),
            RealValue::NegativeInfinity => write!(f, "-oo"),
            RealValue::NaN => write!(f, "NaN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinity_arithmetic() {
        let inf = Real::positive_infinity();
        let one = Real::from_integer(&Integer::new(1));

        assert_eq!(&inf + &one, inf);
        assert!((&inf - &inf).is_nan());
        assert!((&inf * &Real::zero()).is_nan());
        assert_eq!(&inf * &(-&one), Real::negative_infinity());
        assert!((&one / &inf).is_zero());
    }

    #[test]
    fn test_division_by_zero_is_nan() {
        let one = Real::from_integer(&Integer::new(1));
        assert!((&one / &Real::zero()).is_nan());
    }

    #[test]
    fn test_ordering() {
        let a = Real::try_parse("1.5").unwrap();
        let b = Real::try_parse("-2.25").unwrap();

        assert_eq!(a.compare(&b), Some(Ordering::Greater));
        assert_eq!(Real::negative_infinity().compare(&b), Some(Ordering::Less));
        assert_eq!(Real::nan().compare(&a), None);
        assert!(b.is_negative());
        assert!(Real::positive_infinity().is_positive());
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(Real::try_parse("4.0").and_then(|r| r.to_integer()), Some(Integer::new(4)));
        assert_eq!(Real::try_parse("4.5").and_then(|r| r.to_integer()), None);
        assert_eq!(Real::positive_infinity().to_integer(), None);
    }

    #[test]
    fn test_sqrt() {
        let two = Real::from_integer(&Integer::new(2));
        let root = two.sqrt();
        assert!((root.to_f64() - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!(Real::from_integer(&Integer::new(-4)).sqrt().is_nan());
    }

    #[test]
    fn test_try_parse_rejects_garbage() {
        assert!(Real::try_parse("1.2.3").is_none());
        assert!(Real::try_parse("abc").is_none());
    }
}
