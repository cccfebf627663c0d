//! Cost functions for expression extraction.
//!
//! After equality saturation, we need to pick the "best" expression
//! from each equivalence class. Cost functions define what "best" means.

use egg::{CostFunction, Id, Language};

use crate::language::SymLang;

/// Which cost function the simplifier extracts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CostModel {
    /// [`AstSizeCost`].
    #[default]
    AstSize,
    /// [`WeightedCost`] with default weights.
    Weighted,
}

/// A cost function that minimizes AST size.
#[derive(Default)]
pub struct AstSizeCost;

impl CostFunction<SymLang> for AstSizeCost {
    type Cost = usize;

    fn cost<C>(&mut self, enode: &SymLang, mut costs: C) -> Self::Cost
    where
        C: FnMut(Id) -> Self::Cost,
    {
        enode.fold(1, |sum, id| sum + costs(id))
    }
}

/// A cost function that prefers polynomial forms over transcendental ones.
///
/// Literals are free, so folded constants always win, and opaque symbols
/// cost the same as variables.
#[derive(Default)]
pub struct WeightedCost;

impl CostFunction<SymLang> for WeightedCost {
    type Cost = usize;

    fn cost<C>(&mut self, enode: &SymLang, mut costs: C) -> Self::Cost
    where
        C: FnMut(Id) -> Self::Cost,
    {
        let base_cost = match enode {
            SymLang::Num(_) => 0,
            SymLang::Symbol(_) | SymLang::Neg(_) => 1,
            SymLang::Add(_) | SymLang::Sub(_) | SymLang::Mul(_) => 2,
            SymLang::Div(_) | SymLang::Pow(_) | SymLang::Abs(_) => 3,
            SymLang::Sqrt(_) => 4,
            SymLang::Sin(_)
            | SymLang::Cos(_)
            | SymLang::Tan(_)
            | SymLang::Asin(_)
            | SymLang::Acos(_)
            | SymLang::Atan(_)
            | SymLang::Exp(_)
            | SymLang::Ln(_) => 5,
        };

        enode.fold(base_cost, |sum, id| sum + costs(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EGraph;
    use egg::{Extractor, RecExpr, Runner};

    #[test]
    fn test_ast_size() {
        let expr: RecExpr<SymLang> = "(+ x 0)".parse().unwrap();
        let rules = crate::rules::arithmetic::rules();

        let runner: Runner<SymLang, _> = Runner::default().with_expr(&expr).run(&rules);
        let extractor = Extractor::new(&runner.egraph, AstSizeCost);
        let (cost, best) = extractor.find_best(runner.roots[0]);

        assert_eq!(best.to_string(), "x");
        assert_eq!(cost, 1);
    }

    #[test]
    fn test_weighted_prefers_literals() {
        let expr: RecExpr<SymLang> = "(* 2 (+ 3 4))".parse().unwrap();
        let mut egraph = EGraph::default();
        let root = egraph.add_expr(&expr);
        egraph.rebuild();

        let extractor = Extractor::new(&egraph, WeightedCost);
        let (cost, best) = extractor.find_best(root);
        assert_eq!(best.to_string(), "14");
        assert_eq!(cost, 0);
    }
}
