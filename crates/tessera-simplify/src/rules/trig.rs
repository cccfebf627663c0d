//! Trigonometric laws.

use egg::rewrite;

use crate::analysis::Rewrite;

/// Pythagorean identity, parity, quotient and inverse compositions.
#[must_use]
pub fn rules() -> Vec<Rewrite> {
    vec![
        rewrite!("pythagorean"; "(+ (^ (sin ?x) 2) (^ (cos ?x) 2))" => "1"),
        rewrite!("pythagorean-swapped"; "(+ (^ (cos ?x) 2) (^ (sin ?x) 2))" => "1"),
        rewrite!("tan-quotient"; "(/ (sin ?x) (cos ?x))" => "(tan ?x)"),
        rewrite!("sin-double"; "(* 2 (* (sin ?x) (cos ?x)))" => "(sin (* 2 ?x))"),

        rewrite!("sin-0"; "(sin 0)" => "0"),
        rewrite!("cos-0"; "(cos 0)" => "1"),
        rewrite!("tan-0"; "(tan 0)" => "0"),

        rewrite!("sin-odd"; "(sin (neg ?x))" => "(neg (sin ?x))"),
        rewrite!("cos-even"; "(cos (neg ?x))" => "(cos ?x)"),
        rewrite!("tan-odd"; "(tan (neg ?x))" => "(neg (tan ?x))"),

        rewrite!("sin-asin"; "(sin (asin ?x))" => "?x"),
        rewrite!("cos-acos"; "(cos (acos ?x))" => "?x"),
        rewrite!("tan-atan"; "(tan (atan ?x))" => "?x"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SymLang;
    use egg::{AstSize, Extractor, RecExpr, Runner};

    fn best(start: &str) -> String {
        let start: RecExpr<SymLang> = start.parse().unwrap();
        let runner = Runner::default().with_expr(&start).run(&rules());
        let extractor = Extractor::new(&runner.egraph, AstSize);
        let (_, best) = extractor.find_best(runner.roots[0]);
        best.to_string()
    }

    #[test]
    fn test_pythagorean() {
        assert_eq!(best("(+ (^ (sin x) 2) (^ (cos x) 2))"), "1");
    }

    #[test]
    fn test_parity() {
        assert_eq!(best("(cos (neg x))"), "(cos x)");
        assert_eq!(best("(tan (atan y))"), "y");
    }
}
