//! Ring and field laws over the arithmetic operators.
//!
//! Each law that divides by a subterm is guarded with [`is_not_zero`];
//! merging nested powers needs an integer outer exponent.

use egg::rewrite;

use crate::analysis::{is_integer, is_not_zero, Rewrite};

/// Identities, ordering laws, like terms, powers and quotients.
#[must_use]
pub fn rules() -> Vec<Rewrite> {
    vec![
        rewrite!("add-0"; "(+ ?a 0)" => "?a"),
        rewrite!("mul-1"; "(* ?a 1)" => "?a"),
        rewrite!("mul-0"; "(* ?a 0)" => "0"),
        rewrite!("div-1"; "(/ ?a 1)" => "?a"),
        rewrite!("pow-0"; "(^ ?a 0)" => "1"),
        rewrite!("pow-1"; "(^ ?a 1)" => "?a"),

        rewrite!("neg-neg"; "(neg (neg ?a))" => "?a"),
        rewrite!("neg-to-mul"; "(neg ?a)" => "(* -1 ?a)"),
        rewrite!("mul-to-neg"; "(* -1 ?a)" => "(neg ?a)"),
        rewrite!("sub-to-add"; "(- ?a ?b)" => "(+ ?a (neg ?b))"),
        rewrite!("add-inverse"; "(+ ?a (neg ?a))" => "0"),

        rewrite!("add-comm"; "(+ ?a ?b)" => "(+ ?b ?a)"),
        rewrite!("mul-comm"; "(* ?a ?b)" => "(* ?b ?a)"),
        rewrite!("add-assoc"; "(+ ?a (+ ?b ?c))" => "(+ (+ ?a ?b) ?c)"),
        rewrite!("mul-assoc"; "(* ?a (* ?b ?c))" => "(* (* ?a ?b) ?c)"),
        rewrite!("mul-distribute"; "(* ?a (+ ?b ?c))" => "(+ (* ?a ?b) (* ?a ?c))"),
        rewrite!("mul-collect"; "(+ (* ?a ?b) (* ?a ?c))" => "(* ?a (+ ?b ?c))"),

        rewrite!("terms-double"; "(+ ?a ?a)" => "(* 2 ?a)"),
        rewrite!("terms-absorb"; "(+ (* ?m ?a) ?a)" => "(* (+ ?m 1) ?a)"),
        rewrite!("terms-merge"; "(+ (* ?m ?a) (* ?n ?a))" => "(* (+ ?m ?n) ?a)"),

        rewrite!("pow-recip"; "(^ ?a -1)" => "(/ 1 ?a)"),
        rewrite!("pow-square"; "(* ?a ?a)" => "(^ ?a 2)"),
        rewrite!("pow-merge"; "(* (^ ?a ?m) (^ ?a ?n))" => "(^ ?a (+ ?m ?n))"),
        rewrite!("pow-absorb"; "(* (^ ?a ?m) ?a)" => "(^ ?a (+ ?m 1))"),
        rewrite!("pow-nest"; "(^ (^ ?a ?m) ?n)" => "(^ ?a (* ?m ?n))" if is_integer("?n")),

        rewrite!("div-self"; "(/ ?a ?a)" => "1" if is_not_zero("?a")),
        rewrite!("div-neg"; "(/ (neg ?a) ?b)" => "(neg (/ ?a ?b))"),
        rewrite!("div-cancel"; "(/ (* ?a ?b) ?b)" => "?a" if is_not_zero("?b")),
        rewrite!("mul-div-cancel"; "(* (/ ?a ?b) ?b)" => "?a" if is_not_zero("?b")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SymLang;
    use egg::{AstSize, Extractor, RecExpr, Runner};

    fn best(start: &str) -> String {
        let start: RecExpr<SymLang> = start.parse().unwrap();
        let runner = Runner::default()
            .with_expr(&start)
            .with_iter_limit(10)
            .with_node_limit(5_000)
            .run(&rules());
        let extractor = Extractor::new(&runner.egraph, AstSize);
        let (_, best) = extractor.find_best(runner.roots[0]);
        best.to_string()
    }

    #[test]
    fn test_identities() {
        assert_eq!(best("(+ x 0)"), "x");
        assert_eq!(best("(* x 0)"), "0");
        assert_eq!(best("(^ (* x 1) 1)"), "x");
    }

    #[test]
    fn test_cancellation() {
        assert_eq!(best("(- (+ x y) y)"), "x");
    }

    #[test]
    fn test_like_terms_fold_their_coefficients() {
        // Both factor orders cost the same, so either may be extracted.
        let folded = best("(+ (* 2 x) (* 3 x))");
        assert!(["(* 5 x)", "(* x 5)"].contains(&folded.as_str()), "{folded}");
    }

    #[test]
    fn test_zero_divisor_not_cancelled() {
        assert_eq!(best("(/ (* x 0) 0)"), "(/ 0 0)");
    }

    #[test]
    fn test_nested_power_needs_integer_exponent() {
        assert_eq!(best("(^ (^ x 2) 3)"), "(^ x 6)");
        assert_eq!(best("(^ (^ x 2) y)"), "(^ (^ x 2) y)");
    }
}
