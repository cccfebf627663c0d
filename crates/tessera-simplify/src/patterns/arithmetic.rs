//! Numeric folding and structural normalization.
//!
//! Sums and products are flattened, numeric operands are folded into a
//! single coefficient, and like terms (like bases, for products) are
//! collected. A normalized sum lists its terms in first-seen order with the
//! constant last; a normalized product puts its coefficient first.

use tessera_core::{Entity, Func, Node};
use tessera_numbers::{AbsoluteValue, Integer, Level, Number};

use super::{unary_arg, NamedRule};

/// Largest integer exponent folded over exact numbers.
const MAX_FOLDED_EXPONENT: i64 = 1024;

/// Largest radicand searched for square factors.
const MAX_SQUARE_PART: i64 = 1_000_000_000_000;

/// Returns the arithmetic patterns.
#[must_use]
pub fn patterns() -> Vec<NamedRule> {
    vec![
        NamedRule::new("fold-sum", fold_sum),
        NamedRule::new("fold-product", fold_product),
        NamedRule::new("fold-power", fold_power),
        NamedRule::new("fold-neg", fold_neg),
        NamedRule::new("fold-div", fold_div),
        NamedRule::new("fold-sqrt", fold_sqrt),
        NamedRule::new("fold-abs", fold_abs),
    ]
}

fn is_exact(n: &Number) -> bool {
    n.level() <= Level::Rational
}

/// Splits `term` into its numeric coefficient and remaining factors.
///
/// Nested products and negations are flattened into the coefficient, so
/// `-(2 * x * 3)` splits into `-6` and `[x]`.
#[must_use]
pub fn split_coefficient(term: &Entity) -> (Number, Vec<Entity>) {
    let mut coefficient = Number::from(1);
    let mut rest = Vec::new();
    collect_factors(term, &mut coefficient, &mut rest);
    (coefficient, rest)
}

fn collect_factors(e: &Entity, coefficient: &mut Number, rest: &mut Vec<Entity>) {
    match e.node() {
        Node::Number(n) => *coefficient = &*coefficient * n,
        Node::Neg(arg) => {
            *coefficient = -&*coefficient;
            collect_factors(arg, coefficient, rest);
        }
        Node::Product(factors) => {
            for factor in factors {
                collect_factors(factor, coefficient, rest);
            }
        }
        _ => rest.push(e.clone()),
    }
}

/// Inverse of [`split_coefficient`].
#[must_use]
pub fn rebuild_term(coefficient: Number, mut rest: Vec<Entity>) -> Entity {
    if rest.is_empty() || coefficient.is_zero() {
        return Entity::number(coefficient);
    }
    if coefficient.is_one() {
        return Entity::product(rest);
    }
    if (-&coefficient).is_one() {
        return -Entity::product(rest);
    }
    rest.insert(0, Entity::number(coefficient));
    Entity::product(rest)
}

fn collect_terms(e: &Entity, out: &mut Vec<Entity>) {
    match e.node() {
        Node::Sum(terms) => {
            for term in terms {
                collect_terms(term, out);
            }
        }
        _ => out.push(e.clone()),
    }
}

/// Flattens a sum, collects like terms and folds the constant.
#[must_use]
pub fn fold_sum(e: &Entity) -> Entity {
    if !matches!(e.node(), Node::Sum(_)) {
        return e.clone();
    }
    let mut terms = Vec::new();
    collect_terms(e, &mut terms);

    let mut constant = Number::from(0);
    let mut groups: Vec<(Entity, Vec<Entity>, Number)> = Vec::new();
    for term in &terms {
        let (coefficient, rest) = split_coefficient(term);
        if rest.is_empty() {
            constant = &constant + &coefficient;
            continue;
        }
        let key = Entity::product(rest.iter().cloned());
        match groups.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, total)) => *total = &*total + &coefficient,
            None => groups.push((key, rest, coefficient)),
        }
    }

    let mut out: Vec<Entity> = groups
        .into_iter()
        .filter(|(_, _, c)| !c.is_zero())
        .map(|(_, rest, c)| rebuild_term(c, rest))
        .collect();
    if !constant.is_zero() {
        out.push(Entity::number(constant));
    }
    Entity::sum(out)
}

/// Flattens a product, folds its coefficient and merges equal bases.
#[must_use]
pub fn fold_product(e: &Entity) -> Entity {
    if !matches!(e.node(), Node::Product(_)) {
        return e.clone();
    }
    let (coefficient, rest) = split_coefficient(e);
    if coefficient.is_zero() {
        return Entity::integer(0);
    }
    rebuild_term(coefficient, combine_powers(rest))
}

fn combine_powers(factors: Vec<Entity>) -> Vec<Entity> {
    let mut groups: Vec<(Entity, Vec<Entity>)> = Vec::new();
    for factor in factors {
        let (base, exp) = match factor.node() {
            Node::Power { base, exp } => (base.clone(), exp.clone()),
            _ => (factor.clone(), Entity::integer(1)),
        };
        match groups.iter_mut().find(|(b, _)| *b == base) {
            Some((_, exps)) => exps.push(exp),
            None => groups.push((base, vec![exp])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(base, mut exps)| {
            let exp = if exps.len() == 1 {
                exps.remove(0)
            } else {
                fold_sum(&Entity::sum(exps))
            };
            if exp.is_zero() {
                None
            } else if exp.is_one() {
                Some(base)
            } else {
                Some(base.pow(exp))
            }
        })
        .collect()
}

/// `x^0`, `x^1`, `1^x`, numeric powers and powers of powers.
#[must_use]
pub fn fold_power(e: &Entity) -> Entity {
    let Node::Power { base, exp } = e.node() else {
        return e.clone();
    };
    if exp.is_zero() || base.is_one() {
        return Entity::integer(1);
    }
    if exp.is_one() {
        return base.clone();
    }
    match (base.as_number(), exp.as_number()) {
        (Some(b), Some(x)) => fold_numeric_power(b, x).map_or_else(|| e.clone(), Entity::number),
        (None, Some(_)) => match (base.node(), exp.as_integer()) {
            (Node::Power { base: inner, exp: inner_exp }, Some(outer)) => {
                match inner_exp.as_integer() {
                    Some(k) => inner.pow(Entity::number(k * outer)),
                    None => e.clone(),
                }
            }
            _ => e.clone(),
        },
        _ => e.clone(),
    }
}

/// Folds `base^exp` when the result does not lose exactness.
fn fold_numeric_power(base: &Number, exp: &Number) -> Option<Number> {
    if !is_exact(base) || !is_exact(exp) {
        return Some(base.pow(exp));
    }
    if let Some(k) = exp.as_integer() {
        let k = k.to_i64().filter(|k| k.abs() <= MAX_FOLDED_EXPONENT)?;
        if base.is_zero() && k < 0 {
            return None;
        }
        return Some(base.pow(exp));
    }
    let root = base.pow(exp);
    is_exact(&root).then_some(root)
}

/// `--x = x`; negated numbers and products fold into the coefficient.
#[must_use]
pub fn fold_neg(e: &Entity) -> Entity {
    let Node::Neg(arg) = e.node() else {
        return e.clone();
    };
    if let Node::Neg(inner) = arg.node() {
        return inner.clone();
    }
    let (coefficient, rest) = split_coefficient(e);
    rebuild_term(coefficient, rest)
}

/// `x/1`, `0/x`, `x/x` and division by a non-zero number.
#[must_use]
pub fn fold_div(e: &Entity) -> Entity {
    let Node::Div { num, den } = e.node() else {
        return e.clone();
    };
    if den.is_one() {
        return num.clone();
    }
    match den.as_number() {
        Some(d) if d.is_zero() => e.clone(),
        Some(d) => {
            let (coefficient, rest) = split_coefficient(num);
            rebuild_term(&coefficient / d, rest)
        }
        None if num.is_zero() => Entity::integer(0),
        None if num == den => Entity::integer(1),
        None => e.clone(),
    }
}

/// Square roots of numbers, kept symbolic unless exact.
///
/// Square factors of small positive integers are pulled out:
/// `sqrt(8) = 2 * sqrt(2)`.
#[must_use]
pub fn fold_sqrt(e: &Entity) -> Entity {
    let Some(n) = unary_arg(e, &Func::Sqrt).and_then(Entity::as_number) else {
        return e.clone();
    };
    let root = n.sqrt();
    if !is_exact(n) || is_exact(&root) {
        return Entity::number(root);
    }
    // sqrt(-k^2) is the exact imaginary k*i.
    if n.is_negative() && is_exact(&(-n).sqrt()) {
        return Entity::number(root);
    }
    match n.as_integer().and_then(square_part) {
        Some((outer, inner)) => Entity::product([Entity::number(outer), Entity::number(inner).sqrt()]),
        None => e.clone(),
    }
}

/// Splits `n` into `outer^2 * inner` with `inner` square-free.
fn square_part(n: &Integer) -> Option<(Integer, Integer)> {
    if !n.is_positive() || n.to_i64().map_or(true, |v| v > MAX_SQUARE_PART) {
        return None;
    }
    let mut outer = Integer::new(1);
    let mut inner = Integer::new(1);
    for (p, k) in n.factorize() {
        outer = &outer * &p.pow(k / 2);
        inner = &inner * &p.pow(k % 2);
    }
    (outer.to_i64() != Some(1)).then_some((outer, inner))
}

/// Absolute value of a number.
#[must_use]
pub fn fold_abs(e: &Entity) -> Entity {
    match unary_arg(e, &Func::Abs).and_then(Entity::as_number) {
        Some(n) => Entity::number(n.abs_value()),
        None => e.clone(),
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
    fn test_split_coefficient() {
        let (c, rest) = split_coefficient(&-(int(2) * x() * int(3)));
        assert_eq!(c, Number::from(-6));
        assert_eq!(rest, vec![x()]);

        let (c, rest) = split_coefficient(&int(7));
        assert_eq!(c, Number::from(7));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_like_terms() {
        let e = x() + int(2) * x() + int(3) + int(4);
        assert_eq!(fold_sum(&e), Entity::sum([int(3) * x(), int(7)]));
    }

    #[test]
    fn test_cancellation() {
        assert_eq!(fold_sum(&(x() - x())), int(0));
        assert_eq!(fold_sum(&(x() + int(1) - int(1))), x());
    }

    #[test]
    fn test_nested_sums_flatten() {
        let y = Entity::var("y");
        let e = Entity::sum([x(), Entity::sum([y.clone(), int(1)]), int(2)]);
        assert_eq!(fold_sum(&e), Entity::sum([x(), y, int(3)]));
    }

    #[test]
    fn test_fold_product() {
        assert_eq!(fold_product(&(int(2) * x() * int(3))), int(6) * x());
        assert_eq!(fold_product(&(int(0) * x())), int(0));
        assert_eq!(fold_product(&(x() * x().pow(2))), x().pow(3));
        assert_eq!(fold_product(&(x() * x().pow(-1))), int(1));
        assert_eq!(fold_product(&(-x() * int(2))), int(-2) * x());
        assert_eq!(fold_product(&(int(-1) * x())), -x());
    }

    #[test]
    fn test_fold_power() {
        assert_eq!(fold_power(&x().pow(0)), int(1));
        assert_eq!(fold_power(&x().pow(1)), x());
        assert_eq!(fold_power(&int(1).pow(x())), int(1));
        assert_eq!(fold_power(&int(2).pow(10)), int(1024));
        assert_eq!(fold_power(&int(2).pow(-2)), Entity::rational(1, 4));
        assert_eq!(fold_power(&int(9).pow(Entity::rational(1, 2))), int(3));
        assert_eq!(fold_power(&int(0).pow(3)), int(0));
        assert_eq!(fold_power(&x().pow(2).pow(3)), x().pow(6));
    }

    #[test]
    fn test_inexact_powers_stay_symbolic() {
        let e = int(2).pow(Entity::rational(1, 2));
        assert_eq!(fold_power(&e), e);
        let e = int(0).pow(-1);
        assert_eq!(fold_power(&e), e);
        let e = int(2).pow(100_000);
        assert_eq!(fold_power(&e), e);
        let e = x().pow(Entity::rational(1, 2)).pow(2);
        assert_eq!(fold_power(&e), e);
    }

    #[test]
    fn test_fold_neg() {
        assert_eq!(fold_neg(&-(-x())), x());
        assert_eq!(fold_neg(&-int(3)), int(-3));
        assert_eq!(fold_neg(&-(int(2) * x())), int(-2) * x());
        assert_eq!(fold_neg(&-x()), -x());
    }

    #[test]
    fn test_fold_div() {
        assert_eq!(fold_div(&(x() / int(1))), x());
        assert_eq!(fold_div(&(int(6) / int(4))), Entity::rational(3, 2));
        assert_eq!(fold_div(&(x() / int(2))), Entity::rational(1, 2) * x());
        assert_eq!(fold_div(&(x() / x())), int(1));
        assert_eq!(fold_div(&(int(0) / x())), int(0));
        let e = x() / int(0);
        assert_eq!(fold_div(&e), e);
    }

    #[test]
    fn test_fold_functions() {
        assert_eq!(fold_sqrt(&int(16).sqrt()), int(4));
        assert_eq!(fold_sqrt(&Entity::rational(4, 9).sqrt()), Entity::rational(2, 3));
        let e = int(2).sqrt();
        assert_eq!(fold_sqrt(&e), e);
        assert_eq!(fold_sqrt(&int(8).sqrt()), int(2) * int(2).sqrt());
        assert_eq!(fold_sqrt(&int(72).sqrt()), int(6) * int(2).sqrt());
        let e = int(-8).sqrt();
        assert_eq!(fold_sqrt(&e), e);
        let imaginary = fold_sqrt(&int(-16).sqrt());
        assert_eq!(imaginary.to_string(), "4i");
        let imaginary = fold_sqrt(&Entity::rational(-1, 4).sqrt());
        assert!(matches!(imaginary.as_number(), Some(Number::Complex(_))));
        assert_eq!(fold_abs(&Entity::apply1(Func::Abs, &int(-5))), int(5));
    }

    #[test]
    fn test_normal_forms_are_stable() {
        let y = Entity::var("y");
        let inputs = [
            x() + int(2) * x() + y.clone() * int(3) + int(1),
            -(x() * int(4)) * y.clone(),
            x().pow(2) * x() * int(2),
            (x() + y.clone()) / int(3),
        ];
        for e in inputs {
            for pattern in patterns() {
                let once = pattern.apply(&e);
                assert_eq!(pattern.apply(&once), once, "{} is not stable on {e}", pattern.name);
            }
        }
    }
}
