//! Closed-form roots of linear and quadratic polynomials.

use tessera_core::Entity;
use tessera_numbers::Number;

use crate::simplify_coefficient;

/// Whether a root lies on the real line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKind {
    /// A real number, or a symbolic root not known to be complex.
    Real,
    /// A complex number with non-zero imaginary part.
    Complex,
}

/// Classifies `root` by evaluating it when possible.
#[must_use]
pub fn classify_root(root: &Entity) -> RootKind {
    match root.eval_numerical() {
        Ok(Number::Complex(_)) => RootKind::Complex,
        _ => RootKind::Real,
    }
}

/// The root `-b/a` of `a*x + b`.
#[must_use]
pub fn solve_linear(a: &Entity, b: &Entity) -> Entity {
    simplify_coefficient(&(-b / a.clone()))
}

/// The roots `(-b -/+ sqrt(b^2 - 4ac)) / 2a` of `a*x^2 + b*x + c`.
#[must_use]
pub fn solve_quadratic(a: &Entity, b: &Entity, c: &Entity) -> [Entity; 2] {
    let discriminant = simplify_coefficient(&(b.pow(2) - Entity::integer(4) * a.clone() * c.clone()));
    let root = simplify_coefficient(&discriminant.sqrt());
    let denominator = Entity::integer(2) * a.clone();
    let minus_b = -b;
    [
        simplify_coefficient(&((&minus_b - &root) / denominator.clone())),
        simplify_coefficient(&((&minus_b + &root) / denominator)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Entity {
        Entity::integer(n)
    }

    #[test]
    fn test_linear_root() {
        assert_eq!(solve_linear(&int(1), &int(-3)), int(3));
        assert_eq!(solve_linear(&int(-1), &int(-3)), int(-3));
        assert_eq!(solve_linear(&int(4), &int(2)), Entity::rational(-1, 2));
    }

    #[test]
    fn test_quadratic_roots() {
        let [r1, r2] = solve_quadratic(&int(1), &int(-3), &int(2));
        assert_eq!((r1, r2), (int(1), int(2)));

        let [r1, r2] = solve_quadratic(&int(-1), &int(3), &int(-2));
        assert_eq!((r1, r2), (int(2), int(1)));
    }

    #[test]
    fn test_irrational_roots_stay_exact() {
        let [r1, r2] = solve_quadratic(&int(1), &int(0), &int(-2));
        assert_eq!(r1, -int(2).sqrt());
        assert_eq!(r2, int(2).sqrt());
        assert_eq!(classify_root(&r1), RootKind::Real);
    }

    #[test]
    fn test_complex_roots() {
        let [r1, r2] = solve_quadratic(&int(1), &int(0), &int(1));
        assert_eq!(classify_root(&r1), RootKind::Complex);
        assert_eq!(classify_root(&r2), RootKind::Complex);
    }

    #[test]
    fn test_imaginary_roots_fold_to_numbers() {
        let [r1, r2] = solve_quadratic(&int(1), &int(0), &int(16));
        for (root, im) in [(r1, -4.0), (r2, 4.0)] {
            let Some(Number::Complex(z)) = root.as_number() else {
                panic!("{root} is not a folded complex number");
            };
            let (a, b) = z.to_f64();
            assert!(a.abs() < 1e-9 && (b - im).abs() < 1e-9, "{root}");
        }
    }

    #[test]
    fn test_symbolic_roots_are_real() {
        let root = solve_linear(&Entity::var("a"), &int(1));
        assert_eq!(classify_root(&root), RootKind::Real);
    }
}
