//! Exponential and logarithm identities.

use tessera_core::{Entity, Func};

use super::{unary_arg, NamedRule};

/// Returns the exponential and logarithm patterns.
#[must_use]
pub fn patterns() -> Vec<NamedRule> {
    vec![
        NamedRule::new("exp-special", exp_special),
        NamedRule::new("ln-special", ln_special),
        NamedRule::new("exp-ln", exp_of_ln),
        NamedRule::new("ln-exp", ln_of_exp),
    ]
}

/// `exp(0) = 1`.
#[must_use]
pub fn exp_special(e: &Entity) -> Entity {
    match unary_arg(e, &Func::Exp) {
        Some(arg) if arg.is_zero() => Entity::integer(1),
        _ => e.clone(),
    }
}

/// `ln(1) = 0`, `ln(e) = 1`.
#[must_use]
pub fn ln_special(e: &Entity) -> Entity {
    match unary_arg(e, &Func::Ln) {
        Some(arg) if arg.is_one() => Entity::integer(0),
        Some(arg) if arg.as_variable() == Some("e") => Entity::integer(1),
        _ => e.clone(),
    }
}

/// `exp(ln(x)) = x`.
#[must_use]
pub fn exp_of_ln(e: &Entity) -> Entity {
    match unary_arg(e, &Func::Exp).and_then(|arg| unary_arg(arg, &Func::Ln)) {
        Some(inner) => inner.clone(),
        None => e.clone(),
    }
}

/// `ln(exp(x)) = x`.
#[must_use]
pub fn ln_of_exp(e: &Entity) -> Entity {
    match unary_arg(e, &Func::Ln).and_then(|arg| unary_arg(arg, &Func::Exp)) {
        Some(inner) => inner.clone(),
        None => e.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_values() {
        assert_eq!(exp_special(&Entity::integer(0).exp()), Entity::integer(1));
        assert_eq!(ln_special(&Entity::integer(1).ln()), Entity::integer(0));
        assert_eq!(ln_special(&Entity::e().ln()), Entity::integer(1));
        let e = Entity::integer(2).ln();
        assert_eq!(ln_special(&e), e);
    }

    #[test]
    fn test_inverses() {
        let x = Entity::var("x");
        assert_eq!(exp_of_ln(&x.ln().exp()), x);
        assert_eq!(ln_of_exp(&x.exp().ln()), x);
        let e = x.exp().exp();
        assert_eq!(exp_of_ln(&e), e);
    }
}
