//! Property-based tests for the numeric tower.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{AbsoluteValue, Integer, Level, Number, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn positive_int() -> impl Strategy<Value = i64> {
        1i64..5000i64
    }

    fn small_prime() -> impl Strategy<Value = i64> {
        prop::sample::select(vec![2i64, 3, 5, 7, 11, 13, 31, 97, 101])
    }

    proptest! {
        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn small_integers_share_singletons(a in -1i64..=1i64) {
            let fresh = Integer::new(a);
            let again = Integer::new(a);
            prop_assert!(fresh.ptr_eq(&again));
        }

        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            prop_assert!((a % g.clone()).is_zero());
            prop_assert!((b % g).is_zero());
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            prop_assert!((a.clone() * a.recip()).is_one());
        }

        #[test]
        fn whole_quotients_downcast(a in small_int(), b in non_zero_int()) {
            let product = Number::from(a * b);
            let quotient = &product / &Number::from(b);
            prop_assert_eq!(quotient.level(), Level::Integer);
            prop_assert_eq!(quotient, Number::from(a));
        }

        #[test]
        fn tower_ops_agree_with_rationals(
            n1 in small_int(), d1 in non_zero_int(),
            n2 in small_int(), d2 in non_zero_int()
        ) {
            let a = Rational::from_i64(n1, d1);
            let b = Rational::from_i64(n2, d2);
            let lifted = Number::from(a.clone()) * Number::from(b.clone());
            prop_assert_eq!(lifted, Number::from(a * b));
        }

        #[test]
        fn abs_value_is_not_negative(n in small_int(), d in non_zero_int()) {
            let x = Number::from(Rational::from_i64(n, d));
            prop_assert!(!x.abs_value().is_negative());
        }

        #[test]
        fn factorization_reconstructs(n in positive_int()) {
            let n = Integer::new(n);
            let product = n
                .factorize()
                .fold(Integer::one(), |acc, (p, k)| acc * p.pow(k));
            prop_assert_eq!(product, n);
        }

        #[test]
        fn factors_are_prime(n in positive_int()) {
            for (p, _) in Integer::new(n).factorize() {
                prop_assert!(p.is_prime());
            }
        }

        #[test]
        fn phi_of_prime_is_predecessor(n in 2i64..3000i64) {
            let n = Integer::new(n);
            if n.is_prime() {
                prop_assert_eq!(n.phi(), &n - &Integer::one());
            }
        }

        #[test]
        fn phi_of_prime_power(p in small_prime(), k in 1u32..6u32) {
            let p = Integer::new(p);
            let expected = p.pow(k - 1) * (&p - &Integer::one());
            prop_assert_eq!(p.pow(k).phi(), expected);
        }

        #[test]
        fn non_positive_values_have_no_totient(n in -5000i64..=0i64) {
            let n = Integer::new(n);
            prop_assert!(n.phi().is_zero());
            prop_assert!(n.count_divisors().is_zero());
            prop_assert!(!n.is_prime());
        }

        #[test]
        fn phi_bounded(n in positive_int()) {
            let n = Integer::new(n);
            let phi = n.phi();
            prop_assert!(phi.is_positive());
            prop_assert!(phi <= n);
        }
    }
}
