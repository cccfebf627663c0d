//! Constant folding inside the e-graph.
//!
//! Each e-class remembers the integer it is known to equal, if any. Classes
//! with a known value gain the literal and drop their other nodes.

use egg::{merge_option, Analysis, DidMerge, Id, Language, Subst, Var};
use num_traits::Zero;
use tessera_numbers::{Integer, Number};

use crate::language::SymLang;

/// The e-graph used by the saturation pass.
pub type EGraph = egg::EGraph<SymLang, ConstantFold>;

/// A rewrite over [`EGraph`].
pub type Rewrite = egg::Rewrite<SymLang, ConstantFold>;

/// Largest exponent folded for `integer ^ integer`.
const MAX_FOLDED_EXPONENT: u32 = 64;

/// Integer constant folding.
#[derive(Default, Clone, Copy, Debug)]
pub struct ConstantFold;

impl Analysis<SymLang> for ConstantFold {
    type Data = Option<Integer>;

    fn make(egraph: &EGraph, enode: &SymLang) -> Self::Data {
        let x = |i: &Id| egraph[*i].data.clone();
        Some(match enode {
            SymLang::Num(c) => c.clone(),
            SymLang::Add([a, b]) => x(a)? + x(b)?,
            SymLang::Sub([a, b]) => x(a)? - x(b)?,
            SymLang::Mul([a, b]) => x(a)? * x(b)?,
            SymLang::Neg(a) => -x(a)?,
            SymLang::Div([a, b]) => {
                let (a, b) = (x(a)?, x(b)?);
                if b.is_zero() {
                    return None;
                }
                match a / b {
                    Number::Integer(q) => q,
                    _ => return None,
                }
            }
            SymLang::Pow([a, b]) => {
                let exp = x(b)?.to_u32().filter(|e| *e <= MAX_FOLDED_EXPONENT)?;
                x(a)?.pow(exp)
            }
            _ => return None,
        })
    }

    fn merge(&mut self, to: &mut Self::Data, from: Self::Data) -> DidMerge {
        merge_option(to, from, |a, b| {
            debug_assert_eq!(*a, b, "merged non-equal constants");
            DidMerge(false, false)
        })
    }

    fn modify(egraph: &mut EGraph, id: Id) {
        if let Some(c) = egraph[id].data.clone() {
            let added = egraph.add(SymLang::Num(c));
            egraph.union(id, added);
            egraph[id].nodes.retain(|n| n.is_leaf());
        }
    }
}

/// Guard: the class bound to `var` is not known to be zero.
pub fn is_not_zero(var: &str) -> impl Fn(&mut EGraph, Id, &Subst) -> bool {
    let var: Option<Var> = var.parse().ok();
    move |egraph, _, subst| {
        var.and_then(|v| egraph[subst[v]].data.as_ref())
            .map_or(true, |c| !c.is_zero())
    }
}

/// Guard: the class bound to `var` is a known integer.
pub fn is_integer(var: &str) -> impl Fn(&mut EGraph, Id, &Subst) -> bool {
    let var: Option<Var> = var.parse().ok();
    move |egraph, _, subst| var.is_some_and(|v| egraph[subst[v]].data.is_some())
}
