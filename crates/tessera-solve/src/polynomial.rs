//! Polynomial shape recognition.
//!
//! An expression is viewed as a dense polynomial in one variable whose
//! coefficients are arbitrary entities free of that variable. Sums,
//! products, negations, non-negative integer powers and division by
//! variable-free denominators are understood; anything else that mentions
//! the variable is not a polynomial.

use tessera_core::{Entity, Node};

use crate::simplify_coefficient;

/// Highest degree considered.
pub const MAX_DEGREE: usize = 16;

type Coefficients = Vec<Entity>;

/// Coefficients of `expr` in `x`, constant term first.
///
/// Coefficients are simplified and trailing zeros are dropped, so the last
/// entry is the leading coefficient. Returns `None` if `expr` is not a
/// polynomial in `x` of degree at most [`MAX_DEGREE`].
#[must_use]
pub fn coefficients(expr: &Entity, x: &str) -> Option<Vec<Entity>> {
    let mut coeffs: Vec<Entity> = collect(expr, x)?
        .iter()
        .map(simplify_coefficient)
        .collect();
    while coeffs.len() > 1 && coeffs.last().is_some_and(Entity::is_zero) {
        coeffs.pop();
    }
    Some(coeffs)
}

/// `(a, b)` with `expr = a*x + b` and `a != 0`.
#[must_use]
pub fn try_linear(expr: &Entity, x: &str) -> Option<(Entity, Entity)> {
    match coefficients(expr, x)?.as_slice() {
        [b, a] => Some((a.clone(), b.clone())),
        _ => None,
    }
}

/// `(a, b, c)` with `expr = a*x^2 + b*x + c` and `a != 0`.
#[must_use]
pub fn try_quadratic(expr: &Entity, x: &str) -> Option<(Entity, Entity, Entity)> {
    match coefficients(expr, x)?.as_slice() {
        [c, b, a] => Some((a.clone(), b.clone(), c.clone())),
        _ => None,
    }
}

fn collect(e: &Entity, x: &str) -> Option<Coefficients> {
    if !e.contains_variable(x) {
        return Some(vec![e.clone()]);
    }
    match e.node() {
        Node::Variable(_) => Some(vec![Entity::integer(0), Entity::integer(1)]),
        Node::Sum(terms) => terms.iter().try_fold(vec![Entity::integer(0)], |acc, t| {
            Some(add(&acc, &collect(t, x)?))
        }),
        Node::Product(factors) => factors.iter().try_fold(vec![Entity::integer(1)], |acc, f| {
            mul(&acc, &collect(f, x)?)
        }),
        Node::Neg(arg) => Some(collect(arg, x)?.iter().map(|c| -c).collect()),
        Node::Power { base, exp } if !exp.contains_variable(x) => {
            let k = exp.as_integer()?.to_i64().and_then(|k| usize::try_from(k).ok())?;
            if k > MAX_DEGREE {
                return None;
            }
            let base = collect(base, x)?;
            (0..k).try_fold(vec![Entity::integer(1)], |acc, _| mul(&acc, &base))
        }
        Node::Div { num, den } if !den.contains_variable(x) => {
            Some(collect(num, x)?.iter().map(|c| c / den).collect())
        }
        _ => None,
    }
}

fn add(p: &[Entity], q: &[Entity]) -> Coefficients {
    (0..p.len().max(q.len()))
        .map(|i| match (p.get(i), q.get(i)) {
            (Some(a), Some(b)) if a.is_zero() => b.clone(),
            (Some(a), Some(b)) if b.is_zero() => a.clone(),
            (Some(a), Some(b)) => a + b,
            (Some(c), None) | (None, Some(c)) => c.clone(),
            (None, None) => Entity::integer(0),
        })
        .collect()
}

fn mul(p: &[Entity], q: &[Entity]) -> Option<Coefficients> {
    let degree = (p.len() + q.len()).saturating_sub(2);
    if degree > MAX_DEGREE {
        return None;
    }
    let mut out = vec![Entity::integer(0); degree + 1];
    for (i, a) in p.iter().enumerate().filter(|(_, a)| !a.is_zero()) {
        for (j, b) in q.iter().enumerate().filter(|(_, b)| !b.is_zero()) {
            let term = if a.is_one() {
                b.clone()
            } else if b.is_one() {
                a.clone()
            } else {
                a * b
            };
            out[i + j] = if out[i + j].is_zero() { term } else { &out[i + j] + &term };
        }
    }
    Some(out)
}
