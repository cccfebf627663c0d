//! Euler totient identities.

use tessera_core::{Entity, Func, Node};
use tessera_numbers::Integer;

use super::{unary_arg, NamedRule};

/// Returns the number-theoretic patterns.
#[must_use]
pub fn patterns() -> Vec<NamedRule> {
    vec![
        NamedRule::new("phi-prime-power", phi_of_prime_power),
        NamedRule::new("phi-prime", phi_of_prime),
        NamedRule::new("phi-integer", phi_of_integer),
    ]
}

fn prime_literal(e: &Entity) -> Option<&Integer> {
    e.as_integer().filter(|p| p.is_prime())
}

/// `phi(p^k) = p^(k-1) * (p-1)` for a prime literal `p`.
///
/// The exponent may be symbolic; a literal exponent must be at least one.
#[must_use]
pub fn phi_of_prime_power(e: &Entity) -> Entity {
    let Some(Node::Power { base, exp }) = unary_arg(e, &Func::Phi).map(Entity::node) else {
        return e.clone();
    };
    let Some(p) = prime_literal(base) else {
        return e.clone();
    };
    let lowered = match exp.as_integer() {
        Some(k) if k.is_positive() => Entity::number(k - &Integer::new(1)),
        Some(_) => return e.clone(),
        None if exp.as_number().is_some() => return e.clone(),
        None => Entity::sum([exp.clone(), Entity::integer(-1)]),
    };
    Entity::product([base.pow(lowered), Entity::number(p - &Integer::new(1))])
}

/// `phi(p) = p - 1` for a prime literal `p`.
#[must_use]
pub fn phi_of_prime(e: &Entity) -> Entity {
    match unary_arg(e, &Func::Phi).and_then(prime_literal) {
        Some(p) => Entity::number(p - &Integer::new(1)),
        None => e.clone(),
    }
}

/// `phi(n)` of any integer literal, zero for `n <= 0`.
#[must_use]
pub fn phi_of_integer(e: &Entity) -> Entity {
    match unary_arg(e, &Func::Phi).and_then(Entity::as_integer) {
        Some(n) => Entity::number(n.phi()),
        None => e.clone(),
    }
}
