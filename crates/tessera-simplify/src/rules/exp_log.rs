//! Exponential, logarithm and square-root laws.
//!
//! Variables are taken to be real. Laws that break for negative arguments,
//! such as `ln(x*y) = ln x + ln y` or `sqrt(x)*sqrt(y) = sqrt(x*y)`, are
//! left out.

use egg::rewrite;

use crate::analysis::Rewrite;

/// Exponential and logarithmic rules.
#[must_use]
pub fn rules() -> Vec<Rewrite> {
    vec![
        rewrite!("exp-0"; "(exp 0)" => "1"),
        rewrite!("ln-1"; "(ln 1)" => "0"),
        rewrite!("exp-ln"; "(exp (ln ?x))" => "?x"),
        rewrite!("ln-exp"; "(ln (exp ?x))" => "?x"),
        rewrite!("exp-scaled-ln"; "(exp (* ?n (ln ?x)))" => "(^ ?x ?n)"),
        rewrite!("exp-product"; "(* (exp ?a) (exp ?b))" => "(exp (+ ?a ?b))"),

        rewrite!("sqrt-as-pow"; "(sqrt ?x)" => "(^ ?x (/ 1 2))"),
        rewrite!("pow-as-sqrt"; "(^ ?x (/ 1 2))" => "(sqrt ?x)"),
        rewrite!("sqrt-square"; "(^ (sqrt ?x) 2)" => "?x"),
        rewrite!("sqrt-of-square"; "(sqrt (^ ?x 2))" => "(abs ?x)"),
        rewrite!("ln-sqrt"; "(ln (sqrt ?x))" => "(/ (ln ?x) 2)"),
    ]
}
