//! Extension methods tying the kernel crates together.
//!
//! [`Entity`] lives in `tessera-core`, which knows nothing about the
//! simplifier or the solver. [`EntityExt`] puts the higher-level
//! operations back on the expression itself.

use once_cell::sync::Lazy;
use tessera_core::{Entity, Set};
use tessera_simplify::Simplifier;
use tessera_solve::SolveResult;

static DEFAULT_SIMPLIFIER: Lazy<Simplifier> = Lazy::new(Simplifier::new);

/// Simplification and solving as methods on [`Entity`].
pub trait EntityExt {
    /// Simplifies with the default [`Simplifier`].
    #[must_use]
    fn simplify(&self) -> Entity;

    /// Simplifies with a caller-provided [`Simplifier`].
    #[must_use]
    fn simplify_with(&self, simplifier: &Simplifier) -> Entity;

    /// Pulls common content out of every sum.
    #[must_use]
    fn factorize(&self) -> Entity;

    /// Solves a boolean statement for `x`.
    ///
    /// # Errors
    ///
    /// Fails when the statement is not boolean or has no closed form.
    fn solve(&self, x: &str) -> SolveResult<Set>;

    /// Solves `self = 0` for `x`.
    ///
    /// # Errors
    ///
    /// Fails when the equation has no closed form.
    fn solve_equation(&self, x: &str) -> SolveResult<Set>;

    /// Solves `self > 0` for `x`.
    ///
    /// # Errors
    ///
    /// Fails unless `self` is linear or quadratic in `x`.
    fn solve_inequality(&self, x: &str) -> SolveResult<Set>;
}

impl EntityExt for Entity {
    fn simplify(&self) -> Entity {
        DEFAULT_SIMPLIFIER.simplify(self)
    }

    fn simplify_with(&self, simplifier: &Simplifier) -> Entity {
        simplifier.simplify(self)
    }

    fn factorize(&self) -> Entity {
        tessera_simplify::factorize(self)
    }

    fn solve(&self, x: &str) -> SolveResult<Set> {
        tessera_solve::solve(self, x)
    }

    fn solve_equation(&self, x: &str) -> SolveResult<Set> {
        tessera_solve::solve_equation(self, x)
    }

    fn solve_inequality(&self, x: &str) -> SolveResult<Set> {
        tessera_solve::solve_inequality(self, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Interval;
    use tessera_simplify::SimplifierConfig;
    use tessera_solve::SolveError;

    fn x() -> Entity {
        Entity::var("x")
    }

    fn int(n: i64) -> Entity {
        Entity::integer(n)
    }

    #[test]
    fn test_simplify() {
        assert_eq!((x() * int(1) + int(0)).simplify(), x());
        assert_eq!(int(3).pow(4).phi().simplify(), int(54));
    }

    #[test]
    fn test_simplify_with_custom_simplifier() {
        let y = Entity::var("y");
        let e = x() * (y.clone() / x());
        let patterns_only = Simplifier::with_config(SimplifierConfig::patterns_only());
        assert_eq!(e.simplify_with(&patterns_only), e);
        assert_eq!(e.simplify(), y);
    }

    #[test]
    fn test_factorize() {
        let e = int(4) * x() + int(6);
        let expected = Entity::product([int(2), Entity::sum([int(2) * x(), int(3)])]);
        assert_eq!(e.factorize(), expected);
    }

    #[test]
    fn test_solve_statement() {
        let both = (x() - int(1)).greater(0).and(&(x() - int(4)).less(0));
        let expected: Set = Interval::open(int(1), int(4)).into();
        assert_eq!(both.solve("x"), Ok(expected));
    }

    #[test]
    fn test_solve_equation() {
        let e = int(2) * x() - int(6);
        assert_eq!(e.solve_equation("x"), Ok(Set::finite([int(3)])));
    }

    #[test]
    fn test_solve_inequality() {
        let e = int(-1) * x() + int(5);
        let expected: Set = Interval::open(Entity::negative_infinity(), int(5)).into();
        assert_eq!(e.solve_inequality("x"), Ok(expected));
    }

    #[test]
    fn test_not_a_statement() {
        assert!(matches!(x().solve("x"), Err(SolveError::NotAStatement(_))));
    }
}
