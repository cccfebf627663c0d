//! Distribution of products over sums.

use log::trace;
use tessera_numbers::Integer;

use crate::entity::Entity;
use crate::expr::Node;

/// Largest integer exponent of a sum that [`Entity::expand`] multiplies out.
pub const MAX_EXPANSION_POWER: u32 = 16;

impl Entity {
    /// Multiplies out products of sums and small integer powers of sums.
    ///
    /// The result is a flat sum of terms; no like terms are collected.
    #[must_use]
    pub fn expand(&self) -> Entity {
        Entity::sum(expand_terms(self))
    }
}

/// The additive terms of `e` once fully distributed.
fn expand_terms(e: &Entity) -> Vec<Entity> {
    match e.node() {
        Node::Sum(terms) => terms.iter().flat_map(expand_terms).collect(),
        Node::Neg(arg) => expand_terms(arg).into_iter().map(|t| -t).collect(),
        Node::Product(factors) => factors
            .iter()
            .map(expand_terms)
            .fold(vec![Entity::integer(1)], |acc, terms| distribute(&acc, &terms)),
        Node::Div { num, den } => {
            let den = den.expand();
            expand_terms(num)
                .into_iter()
                .map(|t| t / den.clone())
                .collect()
        }
        Node::Power { base, exp } => {
            let n = exp
                .as_integer()
                .and_then(Integer::to_u32)
                .filter(|n| *n <= MAX_EXPANSION_POWER);
            let base_terms = expand_terms(base);
            match n {
                Some(n) if base_terms.len() > 1 => (0..n)
                    .fold(vec![Entity::integer(1)], |acc, _| distribute(&acc, &base_terms)),
                None if base_terms.len() > 1 && exp.as_integer().is_some_and(Integer::is_positive) => {
                    trace!("leaving {e} unexpanded: exponent above {MAX_EXPANSION_POWER}");
                    vec![Entity::sum(base_terms).pow(exp.expand())]
                }
                _ => vec![Entity::sum(base_terms).pow(exp.expand())],
            }
        }
        _ if e.node().is_atom() => vec![e.clone()],
        _ => vec![e.map_children(Entity::expand)],
    }
}

/// Every pairwise product of `left` and `right` terms.
fn distribute(left: &[Entity], right: &[Entity]) -> Vec<Entity> {
    let mut out = Vec::with_capacity(left.len() * right.len());
    for a in left {
        for b in right {
            out.push(multiply(a, b));
        }
    }
    out
}

/// `a * b`, flattening nested products and dropping unit factors.
fn multiply(a: &Entity, b: &Entity) -> Entity {
    if a.is_one() {
        return b.clone();
    }
    if b.is_one() {
        return a.clone();
    }
    if let Node::Neg(inner) = a.node() {
        return -multiply(inner, b);
    }
    if let Node::Neg(inner) = b.node() {
        return -multiply(a, inner);
    }
    let factors = |e: &Entity| match e.node() {
        Node::Product(fs) => fs.to_vec(),
        _ => vec![e.clone()],
    };
    let mut all = factors(a);
    all.extend(factors(b));
    Entity::product(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_numbers::Number;

    fn x() -> Entity {
        Entity::var("x")
    }

    fn y() -> Entity {
        Entity::var("y")
    }

    fn agrees_at(a: &Entity, b: &Entity, at: i64) -> bool {
        let value = |e: &Entity| {
            e.substitute("x", &Entity::integer(at))
                .substitute("y", &Entity::integer(at + 3))
                .eval_numerical()
                .unwrap()
        };
        value(a) == value(b)
    }

    #[test]
    fn test_expand_product_of_sums() {
        let e = (x() + 1) * (x() - y());
        let expanded = e.expand();
        match expanded.node() {
            Node::Sum(terms) => assert_eq!(terms.len(), 4),
            other => panic!("expected a sum, got {other:?}"),
        }
        for at in -2..3 {
            assert!(agrees_at(&e, &expanded, at));
        }
    }

    #[test]
    fn test_expand_power_of_sum() {
        let e = (x() + y()).pow(3);
        let expanded = e.expand();
        assert!(matches!(expanded.node(), Node::Sum(terms) if terms.len() == 8));
        assert!(agrees_at(&e, &expanded, 2));
    }

    #[test]
    fn test_large_power_left_alone() {
        let e = (x() + 1).pow(40);
        assert!(matches!(e.expand().node(), Node::Power { .. }));
    }

    #[test]
    fn test_expand_inside_functions() {
        let e = ((x() + 1) * x()).sin();
        let expanded = e.expand();
        assert!(matches!(expanded.node(), Node::Function { .. }));
        assert_eq!(
            expanded.substitute("x", &Entity::integer(0)).eval_numerical(),
            Ok(Number::from(0))
        );
    }

    #[test]
    fn test_expand_negated_sum() {
        let e = -(x() + y()) * Entity::integer(2);
        assert!(agrees_at(&e, &e.expand(), 5));
    }
}
