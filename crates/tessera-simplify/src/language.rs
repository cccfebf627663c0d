//! The e-graph side of the arithmetic fragment.
//!
//! Sums and products are binary here; [`Translator`](crate::translate::Translator)
//! folds n-ary [`Entity`] nodes on the way in. Rationals enter as `(/ p q)`
//! over integer literals, so [`SymLang::Num`] only ever holds integers.
//!
//! [`Entity`]: tessera_core::Entity

use egg::{define_language, Id, Symbol};
use tessera_numbers::Integer;

define_language! {
    /// Operators the saturation rules are written against.
    pub enum SymLang {
        Num(Integer),
        // Variables, and `$i` placeholders for opaque subtrees.
        Symbol(Symbol),

        "+" = Add([Id; 2]),
        "-" = Sub([Id; 2]),
        "*" = Mul([Id; 2]),
        "/" = Div([Id; 2]),
        "neg" = Neg(Id),
        "^" = Pow([Id; 2]),

        "sin" = Sin(Id),
        "cos" = Cos(Id),
        "tan" = Tan(Id),
        "asin" = Asin(Id),
        "acos" = Acos(Id),
        "atan" = Atan(Id),

        "exp" = Exp(Id),
        "ln" = Ln(Id),
        "sqrt" = Sqrt(Id),
        "abs" = Abs(Id),
    }
}

impl SymLang {
    /// The literal, for [`SymLang::Num`].
    #[must_use]
    pub fn literal(&self) -> Option<&Integer> {
        match self {
            SymLang::Num(n) => Some(n),
            _ => None,
        }
    }

    /// True for a `$i` placeholder standing in for an opaque subtree.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        matches!(self, SymLang::Symbol(s) if s.as_str().starts_with('$'))
    }
}
