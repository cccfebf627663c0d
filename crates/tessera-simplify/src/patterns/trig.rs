//! Trigonometric identities.

use tessera_core::{Entity, Func, Node};

use super::{unary_arg, NamedRule};

/// Returns the trigonometric patterns.
#[must_use]
pub fn patterns() -> Vec<NamedRule> {
    vec![
        NamedRule::new("trig-special", special_values),
        NamedRule::new("trig-parity", parity),
        NamedRule::new("trig-inverse", inverse_composition),
        NamedRule::new("pythagorean", pythagorean),
    ]
}

fn is_pi(e: &Entity) -> bool {
    e.as_variable() == Some("pi")
}

/// Values at `0` and `pi`.
#[must_use]
pub fn special_values(e: &Entity) -> Entity {
    let Node::Function { func, args } = e.node() else {
        return e.clone();
    };
    let [arg] = args.as_slice() else {
        return e.clone();
    };
    let value = match func {
        Func::Sin | Func::Tan | Func::Asin | Func::Atan if arg.is_zero() => 0,
        Func::Cos if arg.is_zero() => 1,
        Func::Sin | Func::Tan if is_pi(arg) => 0,
        Func::Cos if is_pi(arg) => -1,
        _ => return e.clone(),
    };
    Entity::integer(value)
}

/// `sin(-x) = -sin(x)`, `cos(-x) = cos(x)`, `tan(-x) = -tan(x)`.
#[must_use]
pub fn parity(e: &Entity) -> Entity {
    let Node::Function { func, args } = e.node() else {
        return e.clone();
    };
    let Some(Node::Neg(inner)) = args.first().map(Entity::node) else {
        return e.clone();
    };
    if args.len() != 1 {
        return e.clone();
    }
    match func {
        Func::Sin | Func::Tan | Func::Asin | Func::Atan => -Entity::apply1(func.clone(), inner),
        Func::Cos => Entity::apply1(Func::Cos, inner),
        _ => e.clone(),
    }
}

/// `sin(asin(x)) = x` and the like.
#[must_use]
pub fn inverse_composition(e: &Entity) -> Entity {
    let pairs = [
        (Func::Sin, Func::Asin),
        (Func::Cos, Func::Acos),
        (Func::Tan, Func::Atan),
    ];
    for (outer, inverse) in &pairs {
        if let Some(inner) = unary_arg(e, outer).and_then(|arg| unary_arg(arg, inverse)) {
            return inner.clone();
        }
    }
    e.clone()
}

fn squared_arg<'a>(term: &'a Entity, func: &Func) -> Option<&'a Entity> {
    match term.node() {
        Node::Power { base, exp } if exp.as_integer().is_some_and(|k| k.to_i64() == Some(2)) => {
            unary_arg(base, func)
        }
        _ => None,
    }
}

/// `sin(a)^2 + cos(a)^2 = 1` inside a sum.
#[must_use]
pub fn pythagorean(e: &Entity) -> Entity {
    let Node::Sum(terms) = e.node() else {
        return e.clone();
    };
    for (i, term) in terms.iter().enumerate() {
        let Some(a) = squared_arg(term, &Func::Sin) else {
            continue;
        };
        let partner = terms
            .iter()
            .position(|t| squared_arg(t, &Func::Cos).is_some_and(|b| b == a));
        if let Some(j) = partner {
            let mut rest: Vec<Entity> = terms
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != i && *k != j)
                .map(|(_, t)| t.clone())
                .collect();
            rest.push(Entity::integer(1));
            return Entity::sum(rest);
        }
    }
    e.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Entity {
        Entity::var("x")
    }

    #[test]
    fn test_special_values() {
        let zero = Entity::integer(0);
        assert_eq!(special_values(&zero.sin()), Entity::integer(0));
        assert_eq!(special_values(&zero.cos()), Entity::integer(1));
        assert_eq!(special_values(&Entity::pi().cos()), Entity::integer(-1));
        let e = x().sin();
        assert_eq!(special_values(&e), e);
    }

    #[test]
    fn test_parity() {
        assert_eq!(parity(&(-x()).sin()), -x().sin());
        assert_eq!(parity(&(-x()).cos()), x().cos());
        let e = x().cos();
        assert_eq!(parity(&e), e);
    }

    #[test]
    fn test_inverse_composition() {
        let e = Entity::apply1(Func::Sin, &Entity::apply1(Func::Asin, &x()));
        assert_eq!(inverse_composition(&e), x());
        let e = Entity::apply1(Func::Asin, &x().sin());
        assert_eq!(inverse_composition(&e), e);
    }

    #[test]
    fn test_pythagorean() {
        let y = Entity::var("y");
        let e = Entity::sum([y.clone(), x().cos().pow(2), x().sin().pow(2)]);
        assert_eq!(pythagorean(&e), Entity::sum([y, Entity::integer(1)]));

        let e = Entity::sum([x().sin().pow(2), Entity::var("z").cos().pow(2)]);
        assert_eq!(pythagorean(&e), e);
    }
}
