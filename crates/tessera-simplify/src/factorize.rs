//! Content extraction from sums.
//!
//! `factorize` pulls the common numeric content (gcd of numerators over lcm
//! of denominators) and the common power factors out of every sum in a
//! tree, leaving the primitive part in parentheses:
//! `6*x^2 + 9*x` becomes `3 * x * (2*x + 3)`.

use tessera_core::{Entity, Node};
use tessera_numbers::{Integer, Number, Rational};

use crate::patterns::arithmetic::{rebuild_term, split_coefficient};

/// A term viewed as `coefficient * base_1^k_1 * ... * rest`.
struct Term {
    coefficient: Number,
    powers: Vec<(Entity, Integer)>,
}

impl Term {
    fn new(e: &Entity) -> Self {
        let (coefficient, factors) = split_coefficient(e);
        let powers = factors
            .into_iter()
            .map(|f| match f.node() {
                Node::Power { base, exp } => match exp.as_integer() {
                    Some(k) if k.is_positive() => (base.clone(), k.clone()),
                    _ => (f.clone(), Integer::new(1)),
                },
                _ => (f.clone(), Integer::new(1)),
            })
            .collect();
        Self {
            coefficient,
            powers,
        }
    }

    fn exponent_of(&self, base: &Entity) -> Option<&Integer> {
        self.powers.iter().find(|(b, _)| b == base).map(|(_, k)| k)
    }
}

fn power(base: Entity, k: &Integer) -> Entity {
    if k.to_i64() == Some(1) {
        base
    } else {
        base.pow(Entity::number(k.clone()))
    }
}

/// Gcd of the numerators over the lcm of the denominators.
///
/// `None` when some coefficient is not exact or every coefficient is zero.
fn content(terms: &[Term]) -> Option<Rational> {
    let mut numerators = Integer::new(0);
    let mut denominators = Integer::new(1);
    for term in terms {
        let r = term.coefficient.to_rational()?;
        numerators = numerators.gcd(&r.numerator());
        denominators = denominators.lcm(&r.denominator());
    }
    if numerators.to_i64() == Some(0) {
        return None;
    }
    let mut content = Rational::new(numerators, denominators);
    if terms.first().is_some_and(|t| t.coefficient.is_negative()) {
        content = -&content;
    }
    Some(content)
}

/// Common factor of a sum's terms, and the cofactors.
fn factor_sum(terms: &[Entity]) -> Option<(Vec<Entity>, Vec<Entity>)> {
    let terms: Vec<Term> = terms.iter().map(Term::new).collect();
    let first = terms.first()?;

    let common: Vec<(Entity, Integer)> = first
        .powers
        .iter()
        .filter_map(|(base, k)| {
            terms.iter().skip(1).try_fold(k.clone(), |min, t| {
                let other = t.exponent_of(base)?;
                Some(if other < &min { other.clone() } else { min })
            })
            .map(|min| (base.clone(), min))
        })
        .collect();
    let content = content(&terms).filter(|c| !Number::from(c.clone()).is_one());

    if common.is_empty() && content.is_none() {
        return None;
    }

    let cofactors = terms
        .into_iter()
        .map(|t| {
            let coefficient = match &content {
                Some(c) => &t.coefficient / &Number::from(c.clone()),
                None => t.coefficient,
            };
            let rest = t
                .powers
                .into_iter()
                .filter_map(|(base, k)| {
                    let k = match common.iter().find(|(b, _)| *b == base) {
                        Some((_, min)) => &k - min,
                        None => k,
                    };
                    k.is_positive().then(|| power(base, &k))
                })
                .collect();
            rebuild_term(coefficient, rest)
        })
        .collect();

    let mut factors: Vec<Entity> = content.into_iter().map(Entity::number).collect();
    factors.extend(common.into_iter().map(|(base, k)| power(base, &k)));
    Some((factors, cofactors))
}

/// Factors common content out of every sum in `expr`, innermost first.
#[must_use]
pub fn factorize(expr: &Entity) -> Entity {
    let expr = if expr.node().is_atom() {
        expr.clone()
    } else {
        expr.map_children(factorize)
    };
    let Node::Sum(terms) = expr.node() else {
        return expr;
    };
    match factor_sum(terms) {
        Some((mut factors, cofactors)) => {
            factors.push(Entity::sum(cofactors));
            Entity::product(factors)
        }
        None => expr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Entity {
        Entity::var("x")
    }

    fn int(n: i64) -> Entity {
        Entity::integer(n)
    }

    #[test]
    fn test_integer_content_and_power() {
        let e = int(6) * x().pow(2) + int(9) * x();
        let expected = Entity::product([int(3), x(), Entity::sum([int(2) * x(), int(3)])]);
        assert_eq!(factorize(&e), expected);
    }

    #[test]
    fn test_negative_leading_coefficient() {
        let e = int(-2) * x() - int(4);
        let expected = Entity::product([int(-2), Entity::sum([x(), int(2)])]);
        assert_eq!(factorize(&e), expected);
    }

    #[test]
    fn test_rational_content() {
        let e = Entity::rational(1, 2) * x() + Entity::rational(3, 4);
        let expected = Entity::product([
            Entity::rational(1, 4),
            Entity::sum([int(2) * x(), int(3)]),
        ]);
        assert_eq!(factorize(&e), expected);
    }

    #[test]
    fn test_structural_factor() {
        let y = Entity::var("y");
        let s = x().sin();
        let e = &s * &y + s.clone();
        let expected = Entity::product([s, Entity::sum([y, int(1)])]);
        assert_eq!(factorize(&e), expected);
    }

    #[test]
    fn test_nothing_to_factor() {
        let e = x() + int(1);
        assert_eq!(factorize(&e), e);
        assert_eq!(factorize(&x()), x());
    }

    #[test]
    fn test_nested_sums() {
        let inner = int(2) * x() + int(2);
        let e = inner.sin();
        let expected = Entity::product([int(2), Entity::sum([x(), int(1)])]).sin();
        assert_eq!(factorize(&e), expected);
    }
}
