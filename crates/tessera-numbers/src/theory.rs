//! Elementary number theory over [`Integer`].

use dashu::integer::UBig;

use crate::Integer;

/// Lazy prime factorization by trial division.
///
/// Yields `(prime, multiplicity)` pairs in increasing prime order. The
/// sequence is restartable: clone it before consuming to iterate again.
#[derive(Clone, Debug)]
pub struct Factorization {
    remaining: UBig,
    divisor: UBig,
}

impl Factorization {
    /// Starts factoring `n`. Zero and one have no prime factors.
    #[must_use]
    pub fn new(n: UBig) -> Self {
        let remaining = if n == UBig::ZERO { UBig::ONE } else { n };
        Self {
            remaining,
            divisor: UBig::from(2u8),
        }
    }
}

impl Iterator for Factorization {
    type Item = (Integer, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == UBig::ONE {
            return None;
        }
        while &self.divisor * &self.divisor <= self.remaining {
            if (&self.remaining % &self.divisor) == UBig::ZERO {
                let mut power = 0u32;
                while (&self.remaining % &self.divisor) == UBig::ZERO {
                    self.remaining = &self.remaining / &self.divisor;
                    power += 1;
                }
                let prime = Integer::from(self.divisor.clone());
                self.divisor += UBig::ONE;
                return Some((prime, power));
            }
            self.divisor += UBig::ONE;
        }
        // Whatever survives past sqrt is itself prime.
        let prime = std::mem::replace(&mut self.remaining, UBig::ONE);
        Some((Integer::from(prime), 1))
    }
}
