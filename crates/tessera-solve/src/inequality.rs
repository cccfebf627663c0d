//! Solving `expr > 0`.

use std::cmp::Ordering;

use log::debug;
use tessera_core::{Entity, Interval, Set};

use crate::error::{SolveError, SolveResult};
use crate::polynomial::{try_linear, try_quadratic};
use crate::roots::{classify_root, solve_linear, solve_quadratic, RootKind};

/// True when `a` evaluates to a negative real.
///
/// Symbolic coefficients count as non-negative.
fn is_negative(a: &Entity) -> bool {
    a.eval_numerical().is_ok_and(|n| n.is_negative())
}

/// Orders two real roots ascending when they are comparable.
fn sort_roots(r1: Entity, r2: Entity) -> (Entity, Entity) {
    let order = match (r1.eval_numerical(), r2.eval_numerical()) {
        (Ok(a), Ok(b)) => a.compare(&b),
        _ => None,
    };
    match order {
        Some(Ordering::Greater) => (r2, r1),
        _ => (r1, r2),
    }
}

fn ray_below(root: Entity) -> Set {
    Interval::open(Entity::negative_infinity(), root).into()
}

fn ray_above(root: Entity) -> Set {
    Interval::open(root, Entity::infinity()).into()
}

/// Solves `expr > 0` for `x` over the reals.
///
/// Linear and quadratic shapes are recognized. A quadratic with a non-real
/// root yields `Empty` even when the parabola opens upwards; callers that
/// need "all reals" in that case must check the discriminant themselves.
///
/// # Errors
///
/// Returns [`SolveError::NotImplemented`] for any other shape.
pub fn solve_inequality(expr: &Entity, x: &str) -> SolveResult<Set> {
    if let Some((a, b)) = try_linear(expr, x) {
        let root = solve_linear(&a, &b);
        debug!("{expr} > 0 is linear in {x}: a = {a}, root = {root}");
        if classify_root(&root) == RootKind::Complex {
            return Ok(Set::Empty);
        }
        return Ok(if is_negative(&a) {
            ray_below(root)
        } else {
            ray_above(root)
        });
    }

    if let Some((a, b, c)) = try_quadratic(expr, x) {
        let [r1, r2] = solve_quadratic(&a, &b, &c);
        debug!("{expr} > 0 is quadratic in {x}: a = {a}, roots = {r1}, {r2}");
        if [&r1, &r2].iter().any(|r| classify_root(r) == RootKind::Complex) {
            return Ok(Set::Empty);
        }
        let (r1, r2) = sort_roots(r1, r2);
        return Ok(if is_negative(&a) {
            Interval::open(r1, r2).into()
        } else {
            ray_below(r1).union(ray_above(r2))
        });
    }

    debug!("{expr} > 0 has no supported shape in {x}");
    Err(SolveError::NotImplemented(format!("{expr} > 0")))
}
