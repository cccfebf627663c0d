//! The numeric tower.
//!
//! [`Number`] is the tagged union `Integer ⊂ Rational ⊂ Real ⊂ Complex`.
//! Binary operations promote both operands to their common [`Level`],
//! compute there, and then downcast the result to the narrowest level that
//! still represents it exactly.

use dashu::base::SquareRoot;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::{AbsoluteValue, Complex, Integer, Rational, Real};

/// Position of a value in the tower, narrowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Whole numbers.
    Integer,
    /// Exact fractions.
    Rational,
    /// Decimal reals, including the infinities and `NaN`.
    Real,
    /// Complex numbers.
    Complex,
}

/// An exact (or, past the rational level, arbitrary precision) number.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    /// An arbitrary precision integer.
    Integer(Integer),
    /// A rational in lowest terms.
    Rational(Rational),
    /// A decimal real.
    Real(Real),
    /// A complex number.
    Complex(Complex),
}

impl Number {
    /// The tower level of this value.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Number::Integer(_) => Level::Integer,
            Number::Rational(_) => Level::Rational,
            Number::Real(_) => Level::Real,
            Number::Complex(_) => Level::Complex,
        }
    }

    /// `+oo`.
    #[must_use]
    pub fn positive_infinity() -> Self {
        Number::Real(Real::positive_infinity())
    }

    /// `-oo`.
    #[must_use]
    pub fn negative_infinity() -> Self {
        Number::Real(Real::negative_infinity())
    }

    /// Not-a-number.
    #[must_use]
    pub fn nan() -> Self {
        Number::Real(Real::nan())
    }

    /// Builds `re + im*i`, downcasting when `im` is zero.
    #[must_use]
    pub fn complex(re: Real, im: Real) -> Self {
        Number::Complex(Complex::new(re, im)).downcast()
    }

    /// Recognizes an integer or decimal literal.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Integer::try_parse(s)
            .map(Number::Integer)
            .or_else(|| Real::try_parse(s).map(Number::from))
    }

    /// Moves the value to the narrowest level that holds it exactly.
    #[must_use]
    pub fn downcast(self) -> Self {
        match self {
            Number::Complex(c) if c.is_real() => Number::Real(c.re().clone()).downcast(),
            Number::Real(r) => match r.to_integer() {
                Some(i) => Number::Integer(i),
                None => Number::Real(r),
            },
            Number::Rational(r) => match r.to_integer() {
                Some(i) => Number::Integer(i),
                None => Number::Rational(r),
            },
            other => other,
        }
    }

    /// Widens to a rational, if the value is at most rational.
    #[must_use]
    pub fn to_rational(&self) -> Option<Rational> {
        match self {
            Number::Integer(i) => Some(i.to_rational()),
            Number::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// Widens to a real, if the value is ordered.
    #[must_use]
    pub fn to_real(&self) -> Option<Real> {
        match self {
            Number::Integer(i) => Some(i.to_real()),
            Number::Rational(r) => Some(r.to_real()),
            Number::Real(r) => Some(r.clone()),
            Number::Complex(c) if c.is_real() => Some(c.re().clone()),
            Number::Complex(_) => None,
        }
    }

    /// Widens to the complex level.
    #[must_use]
    pub fn to_complex(&self) -> Complex {
        match self {
            Number::Complex(c) => c.clone(),
            other => other.to_real().unwrap_or_else(Real::nan).to_complex(),
        }
    }

    /// Returns the integer value, if this is an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Number::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Returns true if the value lies on the real line (not a proper complex).
    #[must_use]
    pub fn is_real(&self) -> bool {
        match self {
            Number::Complex(c) => c.is_real(),
            _ => true,
        }
    }

    /// Returns true for `NaN` at any level.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        match self {
            Number::Real(r) => r.is_nan(),
            Number::Complex(c) => c.re().is_nan() || c.im().is_nan(),
            _ => false,
        }
    }

    /// Returns true for an exact zero at any level.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_zero(),
            Number::Rational(r) => r.is_zero(),
            Number::Real(r) => r.is_zero(),
            Number::Complex(c) => c.re().is_zero() && c.im().is_zero(),
        }
    }

    /// Returns true for the value one at any level.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self.clone().downcast(), Number::Integer(i) if i.is_one())
    }

    /// Returns true if the value is ordered and below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.compare(&Number::from(0)) == Some(Ordering::Less)
    }

    /// Returns true if the value is ordered and above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.compare(&Number::from(0)) == Some(Ordering::Greater)
    }

    /// Numeric ordering across levels; `None` for complex values and `NaN`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.to_rational(), other.to_rational()) {
            return Some(a.cmp(&b));
        }
        if !self.is_real() || !other.is_real() {
            return None;
        }
        self.to_real()?.compare(&other.to_real()?)
    }

    /// Principal square root.
    ///
    /// Perfect squares stay exact; negative ordered values give a purely
    /// imaginary result.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        match self {
            Number::Integer(i) => match exact_sqrt(i) {
                Some(root) => Number::Integer(root),
                None if i.is_negative() => {
                    Number::complex(Real::zero(), Number::Integer(-i).sqrt().to_real_or_nan())
                }
                None => Number::Real(i.to_real().sqrt()).downcast(),
            },
            Number::Rational(r) => {
                if let (Some(n), Some(d)) = (exact_sqrt(&r.numerator()), exact_sqrt(&r.denominator())) {
                    return Number::from(Rational::new(n, d));
                }
                if r.is_negative() {
                    let root = Number::Rational(-r).sqrt().to_real_or_nan();
                    return Number::complex(Real::zero(), root);
                }
                Number::Real(r.to_real().sqrt()).downcast()
            }
            Number::Real(r) if r.is_negative() => Number::complex(Real::zero(), (-r).sqrt()),
            Number::Real(r) => Number::Real(r.sqrt()).downcast(),
            Number::Complex(c) => Number::Complex(c.sqrt()).downcast(),
        }
    }

    /// `self^exp`, exact for integer exponents over integer and rational bases.
    #[must_use]
    pub fn pow(&self, exp: &Number) -> Self {
        if let Some(e) = exp.as_integer().and_then(|e| e.to_i64()).and_then(|e| i32::try_from(e).ok()) {
            if let Some(base) = self.to_rational() {
                return base.powi(e).map_or_else(Number::nan, Number::from);
            }
        }
        if matches!(exp, Number::Rational(r) if *r == Rational::from_i64(1, 2)) {
            return self.sqrt();
        }
        let (Some(b), Some(e)) = (self.to_real(), exp.to_real()) else {
            return Number::Complex(self.to_complex().powc(&exp.to_complex())).downcast();
        };
        if b.is_negative() {
            return Number::Complex(self.to_complex().powc(&exp.to_complex())).downcast();
        }
        Number::Real(Real::from_f64(b.to_f64().powf(e.to_f64()))).downcast()
    }

    fn to_real_or_nan(&self) -> Real {
        self.to_real().unwrap_or_else(Real::nan)
    }

    fn common_level(&self, other: &Self) -> Level {
        self.level().max(other.level())
    }
}

/// Floor of the square root when the value is a perfect square.
fn exact_sqrt(value: &Integer) -> Option<Integer> {
    if value.is_negative() {
        return None;
    }
    let root = Integer::from(value.unsigned_abs().sqrt());
    (&root * &root == *value).then_some(root)
}

impl AbsoluteValue for Number {
    fn abs_value(&self) -> Number {
        match self {
            Number::Integer(i) => i.abs_value(),
            Number::Rational(r) => r.abs_value(),
            Number::Real(r) => r.abs_value(),
            Number::Complex(c) => c.abs_value(),
        }
        .downcast()
    }
}

macro_rules! tower_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for &Number {
            type Output = Number;

            fn $method(self, rhs: Self) -> Self::Output {
                match self.common_level(rhs) {
                    Level::Integer | Level::Rational => match (self.to_rational(), rhs.to_rational()) {
                        (Some(a), Some(b)) => Number::from(a $op b),
                        _ => Number::nan(),
                    },
                    Level::Real => Number::Real(&self.to_real_or_nan() $op &rhs.to_real_or_nan()),
                    Level::Complex => Number::Complex(&self.to_complex() $op &rhs.to_complex()),
                }
                .downcast()
            }
        }

        impl $trait for Number {
            type Output = Number;

            fn $method(self, rhs: Self) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

tower_binop!(Add, add, +);
tower_binop!(Sub, sub, -);
tower_binop!(Mul, mul, *);

impl Div for &Number {
    type Output = Number;

    fn div(self, rhs: Self) -> Self::Output {
        if rhs.is_zero() {
            return Number::nan();
        }
        match self.common_level(rhs) {
            Level::Integer | Level::Rational => match (self.to_rational(), rhs.to_rational()) {
                (Some(a), Some(b)) => Number::from(a / b),
                _ => Number::nan(),
            },
            Level::Real => Number::Real(&self.to_real_or_nan() / &rhs.to_real_or_nan()),
            Level::Complex => Number::Complex(&self.to_complex() / &rhs.to_complex()),
        }
        .downcast()
    }
}

impl Div for Number {
    type Output = Number;

    fn div(self, rhs: Self) -> Self::Output {
        &self / &rhs
    }
}

/// Integer modulus; other levels and a zero divisor give `NaN`.
impl Rem for &Number {
    type Output = Number;

    fn rem(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) if !b.is_zero() => Number::Integer(a % b),
            _ => Number::nan(),
        }
    }
}

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        match self {
            Number::Integer(i) => Number::Integer(-i),
            Number::Rational(r) => Number::Rational(-r),
            Number::Real(r) => Number::Real(-r),
            Number::Complex(c) => Number::Complex(-c),
        }
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl From<Integer> for Number {
    fn from(value: Integer) -> Self {
        Number::Integer(value)
    }
}

impl From<Rational> for Number {
    fn from(value: Rational) -> Self {
        Number::Rational(value).downcast()
    }
}

impl From<Real> for Number {
    fn from(value: Real) -> Self {
        Number::Real(value).downcast()
    }
}

impl From<Complex> for Number {
    fn from(value: Complex) -> Self {
        Number::Complex(value).downcast()
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(Integer::new(value))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(Integer::from(value))
    }
}

impl Zero for Number {
    fn zero() -> Self {
        Number::Integer(Integer::zero())
    }

    fn is_zero(&self) -> bool {
        Number::is_zero(self)
    }
}

impl One for Number {
    fn one() -> Self {
        Number::Integer(Integer::one())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Rational(r) => write!(f, "{r}"),
            Number::Real(r) => write!(f, "{r}"),
            Number::Complex(c) => write!(f, "{c}"),
        }
    }
}
