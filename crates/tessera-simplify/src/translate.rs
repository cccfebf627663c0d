//! Conversion between [`Entity`] trees and [`SymLang`] expressions.
//!
//! Sums and products are folded into binary nodes on the way in and
//! flattened on the way out. Subtrees the language cannot express (reals,
//! complex numbers, `phi`, user functions, statements, sets) are replaced by
//! symbols `$0`, `$1`, ... and restored afterwards.

use egg::{Id, RecExpr, Symbol};
use num_traits::Zero;
use tessera_core::{Entity, Func, Node, Number};

use crate::language::SymLang;

/// Returns true if `e` itself is expressible in [`SymLang`].
///
/// Children outside the fragment are still allowed; they become opaque.
#[must_use]
pub fn in_fragment(e: &Entity) -> bool {
    match e.node() {
        Node::Number(n) => matches!(n, Number::Integer(_) | Number::Rational(_)),
        Node::Variable(_) | Node::Sum(_) | Node::Product(_) | Node::Power { .. } => true,
        Node::Neg(_) | Node::Div { .. } => true,
        Node::Function { func, args } => args.len() == 1 && unary(func).is_some(),
        _ => false,
    }
}

fn unary(func: &Func) -> Option<fn(Id) -> SymLang> {
    Some(match func {
        Func::Sin => SymLang::Sin,
        Func::Cos => SymLang::Cos,
        Func::Tan => SymLang::Tan,
        Func::Asin => SymLang::Asin,
        Func::Acos => SymLang::Acos,
        Func::Atan => SymLang::Atan,
        Func::Exp => SymLang::Exp,
        Func::Ln => SymLang::Ln,
        Func::Sqrt => SymLang::Sqrt,
        Func::Abs => SymLang::Abs,
        Func::Phi | Func::Named(_) => return None,
    })
}

/// Round-trip state: the opaque subtrees met on the way in.
#[derive(Default, Debug)]
pub struct Translator {
    opaque: Vec<Entity>,
}

impl Translator {
    /// Creates an empty translator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of subtrees that were made opaque.
    #[must_use]
    pub fn opaque_count(&self) -> usize {
        self.opaque.len()
    }

    /// Translates `e` into a recursive expression.
    pub fn to_rec_expr(&mut self, e: &Entity) -> RecExpr<SymLang> {
        let mut expr = RecExpr::default();
        self.add(&mut expr, e);
        expr
    }

    fn add(&mut self, expr: &mut RecExpr<SymLang>, e: &Entity) -> Id {
        if !in_fragment(e) {
            let symbol = self.opaque_symbol(e);
            return expr.add(SymLang::Symbol(symbol));
        }
        match e.node() {
            Node::Number(Number::Integer(n)) => expr.add(SymLang::Num(n.clone())),
            Node::Number(Number::Rational(r)) => {
                let num = expr.add(SymLang::Num(r.numerator()));
                let den = expr.add(SymLang::Num(r.denominator()));
                expr.add(SymLang::Div([num, den]))
            }
            Node::Variable(name) => expr.add(SymLang::Symbol(Symbol::from(&**name))),
            Node::Sum(terms) => self.fold(expr, terms, SymLang::Add),
            Node::Product(factors) => self.fold(expr, factors, SymLang::Mul),
            Node::Power { base, exp } => {
                let base = self.add(expr, base);
                let exp = self.add(expr, exp);
                expr.add(SymLang::Pow([base, exp]))
            }
            Node::Neg(arg) => {
                let arg = self.add(expr, arg);
                expr.add(SymLang::Neg(arg))
            }
            Node::Div { num, den } => {
                let num = self.add(expr, num);
                let den = self.add(expr, den);
                expr.add(SymLang::Div([num, den]))
            }
            Node::Function { func, args } => match (unary(func), args.first()) {
                (Some(make), Some(arg)) => {
                    let arg = self.add(expr, arg);
                    expr.add(make(arg))
                }
                _ => {
                    let symbol = self.opaque_symbol(e);
                    expr.add(SymLang::Symbol(symbol))
                }
            },
            _ => {
                let symbol = self.opaque_symbol(e);
                expr.add(SymLang::Symbol(symbol))
            }
        }
    }

    fn fold(
        &mut self,
        expr: &mut RecExpr<SymLang>,
        operands: &[Entity],
        make: fn([Id; 2]) -> SymLang,
    ) -> Id {
        let mut ids = operands.iter().map(|o| self.add(expr, o)).collect::<Vec<_>>().into_iter();
        let Some(first) = ids.next() else {
            return expr.add(SymLang::Num(tessera_numbers::Integer::new(0)));
        };
        ids.fold(first, |acc, id| expr.add(make([acc, id])))
    }

    fn opaque_symbol(&mut self, e: &Entity) -> Symbol {
        let index = match self.opaque.iter().position(|o| o == e) {
            Some(i) => i,
            None => {
                self.opaque.push(e.clone());
                self.opaque.len() - 1
            }
        };
        Symbol::from(format!("${index}"))
    }

    /// Translates a recursive expression back, restoring opaque subtrees.
    #[must_use]
    pub fn from_rec_expr(&self, expr: &RecExpr<SymLang>) -> Entity {
        let nodes = expr.as_ref();
        match nodes.len() {
            0 => Entity::integer(0),
            n => self.build(nodes, Id::from(n - 1)),
        }
    }

    fn build(&self, nodes: &[SymLang], id: Id) -> Entity {
        let child = |id: &Id| self.build(nodes, *id);
        match &nodes[usize::from(id)] {
            SymLang::Num(n) => Entity::number(n.clone()),
            SymLang::Symbol(s) => self.restore(s.as_str()),
            SymLang::Add([a, b]) => Entity::sum(flatten_sum(child(a), child(b))),
            SymLang::Sub([a, b]) => Entity::sum(flatten_sum(child(a), -child(b))),
            SymLang::Mul([a, b]) => Entity::product(flatten_product(child(a), child(b))),
            SymLang::Div([a, b]) => rational_or_div(child(a), child(b)),
            SymLang::Neg(a) => -child(a),
            SymLang::Pow([a, b]) => child(a).pow(child(b)),
            SymLang::Sin(a) => Entity::apply1(Func::Sin, &child(a)),
            SymLang::Cos(a) => Entity::apply1(Func::Cos, &child(a)),
            SymLang::Tan(a) => Entity::apply1(Func::Tan, &child(a)),
            SymLang::Asin(a) => Entity::apply1(Func::Asin, &child(a)),
            SymLang::Acos(a) => Entity::apply1(Func::Acos, &child(a)),
            SymLang::Atan(a) => Entity::apply1(Func::Atan, &child(a)),
            SymLang::Exp(a) => Entity::apply1(Func::Exp, &child(a)),
            SymLang::Ln(a) => Entity::apply1(Func::Ln, &child(a)),
            SymLang::Sqrt(a) => Entity::apply1(Func::Sqrt, &child(a)),
            SymLang::Abs(a) => Entity::apply1(Func::Abs, &child(a)),
        }
    }

    fn restore(&self, name: &str) -> Entity {
        name.strip_prefix('$')
            .and_then(|i| i.parse::<usize>().ok())
            .and_then(|i| self.opaque.get(i).cloned())
            .unwrap_or_else(|| Entity::var(name))
    }
}

fn flatten_sum(a: Entity, b: Entity) -> Vec<Entity> {
    let mut terms = Vec::new();
    for e in [a, b] {
        match e.node() {
            Node::Sum(inner) => terms.extend(inner.iter().cloned()),
            _ => terms.push(e),
        }
    }
    terms
}

fn flatten_product(a: Entity, b: Entity) -> Vec<Entity> {
    let mut factors = Vec::new();
    for e in [a, b] {
        match e.node() {
            Node::Product(inner) => factors.extend(inner.iter().cloned()),
            _ => factors.push(e),
        }
    }
    factors
}

/// `(/ p q)` over literals is a fraction again.
fn rational_or_div(num: Entity, den: Entity) -> Entity {
    match (num.as_number(), den.as_number()) {
        (Some(Number::Integer(p)), Some(Number::Integer(q))) if !q.is_zero() => {
            Entity::number(p / q)
        }
        _ => num / den,
    }
}
