//! Complex numbers over [`Real`] parts.
//!
//! The complex level is unordered: there is no `compare` here. Transcendental
//! operations go through `f64` and are approximate.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{AbsoluteValue, Number, Real};

/// A complex number `re + im*i`.
#[derive(Clone, PartialEq)]
pub struct Complex {
    re: Real,
    im: Real,
}

impl Complex {
    /// Builds a complex number from its parts.
    #[must_use]
    pub fn new(re: Real, im: Real) -> Self {
        Self { re, im }
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Self {
        Self::new(Real::zero(), Real::from_f64(1.0))
    }

    /// Builds a complex number from `f64` parts.
    #[must_use]
    pub fn from_f64(re: f64, im: f64) -> Self {
        Self::new(Real::from_f64(re), Real::from_f64(im))
    }

    /// Real part.
    #[must_use]
    pub fn re(&self) -> &Real {
        &self.re
    }

    /// Imaginary part.
    #[must_use]
    pub fn im(&self) -> &Real {
        &self.im
    }

    /// Returns true if the imaginary part is exactly zero.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Returns the parts as an `f64` pair.
    #[must_use]
    pub fn to_f64(&self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self::new(self.re.clone(), -&self.im)
    }

    /// Squared modulus `re^2 + im^2`.
    #[must_use]
    pub fn norm_sqr(&self) -> Real {
        &(&self.re * &self.re) + &(&self.im * &self.im)
    }

    /// Modulus `|z|`.
    #[must_use]
    pub fn modulus(&self) -> Real {
        self.norm_sqr().sqrt()
    }

    /// Principal argument in `(-pi, pi]`.
    #[must_use]
    pub fn arg(&self) -> f64 {
        let (re, im) = self.to_f64();
        im.atan2(re)
    }

    /// Principal square root.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        // sqrt(z) = sqrt((|z| + re) / 2) + i * sign(im) * sqrt((|z| - re) / 2)
        let two = Real::from_f64(2.0);
        let m = self.modulus();
        let re = (&(&m + &self.re) / &two).sqrt();
        let im = (&(&m - &self.re) / &two).sqrt();
        if self.im.is_negative() {
            Self::new(re, -im)
        } else {
            Self::new(re, im)
        }
    }

    /// `e^z`.
    #[must_use]
    pub fn exp(&self) -> Self {
        let (re, im) = self.to_f64();
        let scale = re.exp();
        Self::from_f64(scale * im.cos(), scale * im.sin())
    }

    /// Principal natural logarithm.
    #[must_use]
    pub fn ln(&self) -> Self {
        Self::new(Real::from_f64(self.modulus().to_f64().ln()), Real::from_f64(self.arg()))
    }

    /// Principal power `self^exp = e^(exp * ln self)`.
    #[must_use]
    pub fn powc(&self, exp: &Self) -> Self {
        if self.re.is_zero() && self.im.is_zero() {
            return if exp.re.is_positive() {
                Self::new(Real::zero(), Real::zero())
            } else {
                Self::new(Real::nan(), Real::nan())
            };
        }
        (exp * &self.ln()).exp()
    }

    /// `sin z = sin a cosh b + i cos a sinh b`.
    #[must_use]
    pub fn sin(&self) -> Self {
        let (a, b) = self.to_f64();
        Self::from_f64(a.sin() * b.cosh(), a.cos() * b.sinh())
    }

    /// `cos z = cos a cosh b - i sin a sinh b`.
    #[must_use]
    pub fn cos(&self) -> Self {
        let (a, b) = self.to_f64();
        Self::from_f64(a.cos() * b.cosh(), -(a.sin() * b.sinh()))
    }
}

impl AbsoluteValue for Complex {
    fn abs_value(&self) -> Number {
        Number::from(self.modulus())
    }
}

impl Add for &Complex {
    type Output = Complex;

    fn add(self, rhs: Self) -> Self::Output {
        Complex::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl Sub for &Complex {
    type Output = Complex;

    fn sub(self, rhs: Self) -> Self::Output {
        Complex::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }
}

impl Mul for &Complex {
    type Output = Complex;

    fn mul(self, rhs: Self) -> Self::Output {
        // Purely real operands skip the cross terms, which would turn an
        // infinite real part into NaN.
        if self.is_real() && rhs.is_real() {
            return Complex::new(&self.re * &rhs.re, Real::zero());
        }
        Complex::new(
            &(&self.re * &rhs.re) - &(&self.im * &rhs.im),
            &(&self.re * &rhs.im) + &(&self.im * &rhs.re),
        )
    }
}

impl Div for &Complex {
    type Output = Complex;

    fn div(self, rhs: Self) -> Self::Output {
        if rhs.is_real() {
            return Complex::new(&self.re / &rhs.re, &self.im / &rhs.re);
        }
        let denom = rhs.norm_sqr();
        let num = self * &rhs.conj();
        Complex::new(&num.re / &denom, &num.im / &denom)
    }
}

impl Neg for &Complex {
    type Output = Complex;

    fn neg(self) -> Self::Output {
        Complex::new(-&self.re, -&self.im)
    }
}

impl fmt::Debug for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Complex({self})")
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.re.is_zero() {
            write!(f, "{}i", self.im)
        } else if self.im.is_negative() {
            write!(f, "{} - {}i", self.re, -&self.im)
        } else {
            write!(f, "{} + {}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(z: &Complex, re: f64, im: f64) -> bool {
        let (a, b) = z.to_f64();
        (a - re).abs() < 1e-9 && (b - im).abs() < 1e-9
    }

    #[test]
    fn test_display() {
        let four = Real::from_integer(&crate::Integer::new(4));
        assert_eq!(Complex::new(Real::zero(), four.clone()).to_string(), "4i");
        assert_eq!(Complex::new(four.clone(), -&four).to_string(), "4 - 4i");
    }

    #[test]
    fn test_mul_div() {
        let a = Complex::from_f64(1.0, 2.0);
        let b = Complex::from_f64(3.0, -1.0);

        assert!(approx(&(&a * &b), 5.0, 5.0));
        assert!(approx(&(&(&a * &b) / &b), 1.0, 2.0));
    }

    #[test]
    fn test_sqrt_of_negative_real() {
        let z = Complex::from_f64(-4.0, 0.0);
        assert!(approx(&z.sqrt(), 0.0, 2.0));
    }

    #[test]
    fn test_exp_ln_roundtrip() {
        let z = Complex::from_f64(0.5, -1.25);
        assert!(approx(&z.ln().exp(), 0.5, -1.25));
    }

    #[test]
    fn test_i_squared() {
        let i = Complex::i();
        assert!(approx(&(&i * &i), -1.0, 0.0));
    }
}
