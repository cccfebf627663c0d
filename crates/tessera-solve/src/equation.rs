//! Solving `expr = 0`.

use log::debug;
use tessera_core::{unite, Entity, Interval, Node, Set};

use crate::error::{SolveError, SolveResult};
use crate::polynomial::{try_linear, try_quadratic};
use crate::roots::{solve_linear, solve_quadratic};
use crate::simplify_coefficient;

/// Solves `expr = 0` for `x`.
///
/// Products are split into their factors, powers with a positive exponent
/// reduce to their base, and quotients drop the roots of their denominator.
/// Linear and quadratic factors are solved in closed form; quadratic roots
/// may be complex. An expression free of `x` gives all reals when it is
/// zero and no solutions otherwise.
///
/// # Errors
///
/// Returns [`SolveError::NotImplemented`] when a factor has no supported
/// shape.
pub fn solve_equation(expr: &Entity, x: &str) -> SolveResult<Set> {
    let expr = simplify_coefficient(expr);
    if !expr.contains_variable(x) {
        let zero = expr.is_zero() || expr.eval_numerical().is_ok_and(|n| n.is_zero());
        debug!("{expr} = 0 is constant in {x}: zero = {zero}");
        return Ok(if zero { Interval::reals().into() } else { Set::Empty });
    }

    match expr.node() {
        Node::Product(factors) => {
            debug!("{expr} = 0 splits into {} factors", factors.len());
            let sets = factors
                .iter()
                .filter(|f| f.contains_variable(x))
                .map(|f| solve_equation(f, x))
                .collect::<SolveResult<Vec<_>>>()?;
            return Ok(unite(sets));
        }
        Node::Neg(arg) => return solve_equation(arg, x),
        Node::Power { base, exp }
            if !exp.contains_variable(x) && exp.as_number().is_some_and(|n| n.is_positive()) =>
        {
            return solve_equation(base, x);
        }
        Node::Div { num, den } => {
            let roots = solve_equation(num, x)?;
            return Ok(drop_poles(roots, den, x));
        }
        _ => {}
    }

    if let Some((a, b)) = try_linear(&expr, x) {
        let root = solve_linear(&a, &b);
        debug!("{expr} = 0 is linear in {x}: root = {root}");
        return Ok(Set::finite([root]));
    }
    if let Some((a, b, c)) = try_quadratic(&expr, x) {
        let roots = solve_quadratic(&a, &b, &c);
        debug!("{expr} = 0 is quadratic in {x}: roots = {}, {}", roots[0], roots[1]);
        return Ok(Set::finite(roots));
    }

    Err(SolveError::NotImplemented(format!("{expr} = 0")))
}

/// Removes the points of a finite solution set where `den` vanishes.
fn drop_poles(roots: Set, den: &Entity, x: &str) -> Set {
    match roots {
        Set::Finite(points) => Set::finite(points.into_iter().filter(|p| {
            !den
                .substitute(x, p)
                .eval_numerical()
                .is_ok_and(|v| v.is_zero())
        })),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn x() -> Entity {
        Entity::var("x")
    }

    fn int(n: i64) -> Entity {
        Entity::integer(n)
    }

    #[test]
    fn test_linear() {
        assert_eq!(solve_equation(&(int(2) * x() - int(3)), "x"), Ok(Set::finite([Entity::rational(3, 2)])));
    }

    #[test]
    fn test_quadratic() {
        let e = x().pow(2) - int(5) * x() + int(6);
        assert_eq!(solve_equation(&e, "x"), Ok(Set::finite([int(2), int(3)])));
    }

    #[test]
    fn test_double_root_is_deduplicated() {
        let e = x().pow(2) - int(2) * x() + int(1);
        assert_eq!(solve_equation(&e, "x"), Ok(Set::finite([int(1)])));
    }

    #[test]
    fn test_complex_roots_are_kept() {
        let Ok(Set::Finite(roots)) = solve_equation(&(x().pow(2) + int(4)), "x") else {
            panic!("expected a finite set");
        };
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn test_zero_product_splits_cubics() {
        let e = x() * (x() - int(1)) * (x() + int(1));
        assert_eq!(solve_equation(&e, "x"), Ok(Set::finite([int(0), int(1), int(-1)])));
    }

    #[test]
    fn test_power_of_factor() {
        let e = (x() - int(4)).pow(3);
        assert_eq!(solve_equation(&e, "x"), Ok(Set::finite([int(4)])));
    }

    #[test]
    fn test_quotient_drops_poles() {
        let e = (x().pow(2) - int(1)) / (x() - int(1));
        assert_eq!(solve_equation(&e, "x"), Ok(Set::finite([int(-1)])));
    }

    #[test]
    fn test_constants() {
        assert_eq!(solve_equation(&(x() - x()), "x"), Ok(Interval::reals().into()));
        assert_eq!(solve_equation(&int(3), "x"), Ok(Set::Empty));
    }

    #[test]
    fn test_unsupported() {
        let e = x().pow(3) + x() + int(1);
        assert!(matches!(solve_equation(&e, "x"), Err(SolveError::NotImplemented(_))));
    }
}
