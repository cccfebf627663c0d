//! The [`Entity`] handle.
//!
//! An entity is a reference-counted pointer to an immutable [`Node`].
//! Cloning is a reference-count bump; subtrees are shared between parents
//! without copying. Equality is structural, with a pointer fast path.

use smallvec::smallvec;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use tessera_numbers::{Integer, Number, Rational};

use crate::expr::{Arguments, Func, Node, Operands, Priority, Relation};
use crate::set::Set;

/// Names evaluated as mathematical constants rather than free variables.
pub const CONSTANTS: [&str; 2] = ["pi", "e"];

/// An immutable expression.
#[derive(Clone)]
pub struct Entity(Arc<Node>);

impl Entity {
    /// Wraps a node.
    #[must_use]
    pub fn from_node(node: Node) -> Self {
        Self(Arc::new(node))
    }

    /// The node behind this handle.
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// Returns true if both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // === Construction ===

    /// A numeric literal.
    pub fn number(value: impl Into<Number>) -> Self {
        Self::from_node(Node::Number(value.into()))
    }

    /// An integer literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::number(value)
    }

    /// The exact fraction `num/den`; NaN when `den` is zero.
    #[must_use]
    pub fn rational(num: i64, den: i64) -> Self {
        Self::number(Rational::checked_from_i64(num, den).map_or_else(Number::nan, Number::from))
    }

    /// `+oo`.
    #[must_use]
    pub fn infinity() -> Self {
        Self::number(Number::positive_infinity())
    }

    /// `-oo`.
    #[must_use]
    pub fn negative_infinity() -> Self {
        Self::number(Number::negative_infinity())
    }

    /// A variable.
    #[must_use]
    pub fn var(name: &str) -> Self {
        Self::from_node(Node::Variable(Arc::from(name)))
    }

    /// The circle constant.
    #[must_use]
    pub fn pi() -> Self {
        Self::var("pi")
    }

    /// Euler's number.
    #[must_use]
    pub fn e() -> Self {
        Self::var("e")
    }

    /// An n-ary sum. A single operand is returned as is; no operands give 0.
    pub fn sum(terms: impl IntoIterator<Item = Entity>) -> Self {
        let mut terms: Operands = terms.into_iter().collect();
        match terms.len() {
            0 => Self::integer(0),
            1 => terms.remove(0),
            _ => Self::from_node(Node::Sum(terms)),
        }
    }

    /// An n-ary product. A single operand is returned as is; no operands give 1.
    pub fn product(factors: impl IntoIterator<Item = Entity>) -> Self {
        let mut factors: Operands = factors.into_iter().collect();
        match factors.len() {
            0 => Self::integer(1),
            1 => factors.remove(0),
            _ => Self::from_node(Node::Product(factors)),
        }
    }

    /// `self^exp`.
    #[must_use]
    pub fn pow(&self, exp: impl Into<Entity>) -> Self {
        Self::from_node(Node::Power {
            base: self.clone(),
            exp: exp.into(),
        })
    }

    /// Applies a function to arguments.
    pub fn apply(func: Func, args: impl IntoIterator<Item = Entity>) -> Self {
        let args: Arguments = args.into_iter().collect();
        Self::from_node(Node::Function { func, args })
    }

    /// Applies a one-argument function.
    #[must_use]
    pub fn apply1(func: Func, arg: &Entity) -> Self {
        Self::from_node(Node::Function {
            func,
            args: smallvec![arg.clone()],
        })
    }

    /// `phi(self)`.
    #[must_use]
    pub fn phi(&self) -> Self {
        Self::apply1(Func::Phi, self)
    }

    /// `sin(self)`.
    #[must_use]
    pub fn sin(&self) -> Self {
        Self::apply1(Func::Sin, self)
    }

    /// `cos(self)`.
    #[must_use]
    pub fn cos(&self) -> Self {
        Self::apply1(Func::Cos, self)
    }

    /// `exp(self)`.
    #[must_use]
    pub fn exp(&self) -> Self {
        Self::apply1(Func::Exp, self)
    }

    /// `ln(self)`.
    #[must_use]
    pub fn ln(&self) -> Self {
        Self::apply1(Func::Ln, self)
    }

    /// `sqrt(self)`.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        Self::apply1(Func::Sqrt, self)
    }

    /// A boolean literal.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self::from_node(Node::Boolean(value))
    }

    /// `not self`.
    #[must_use]
    pub fn not(&self) -> Self {
        Self::from_node(Node::Not(self.clone()))
    }

    /// `self and other`.
    #[must_use]
    pub fn and(&self, other: &Entity) -> Self {
        Self::from_node(Node::And(self.clone(), other.clone()))
    }

    /// `self or other`.
    #[must_use]
    pub fn or(&self, other: &Entity) -> Self {
        Self::from_node(Node::Or(self.clone(), other.clone()))
    }

    /// `lhs <relation> rhs`.
    #[must_use]
    pub fn compare(relation: Relation, lhs: &Entity, rhs: &Entity) -> Self {
        Self::from_node(Node::Compare {
            relation,
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        })
    }

    /// `self = other`.
    #[must_use]
    pub fn equals(&self, other: impl Into<Entity>) -> Self {
        Self::compare(Relation::Equal, self, &other.into())
    }

    /// `self > other`.
    #[must_use]
    pub fn greater(&self, other: impl Into<Entity>) -> Self {
        Self::compare(Relation::Greater, self, &other.into())
    }

    /// `self < other`.
    #[must_use]
    pub fn less(&self, other: impl Into<Entity>) -> Self {
        Self::compare(Relation::Less, self, &other.into())
    }

    /// `self >= other`.
    #[must_use]
    pub fn greater_or_equal(&self, other: impl Into<Entity>) -> Self {
        Self::compare(Relation::GreaterEqual, self, &other.into())
    }

    /// `self <= other`.
    #[must_use]
    pub fn less_or_equal(&self, other: impl Into<Entity>) -> Self {
        Self::compare(Relation::LessEqual, self, &other.into())
    }

    /// `self in set`.
    #[must_use]
    pub fn is_in(&self, set: Set) -> Self {
        Self::from_node(Node::In {
            element: self.clone(),
            set,
        })
    }

    // === Inspection ===

    /// Child entities, left to right.
    #[must_use]
    pub fn children(&self) -> Operands {
        self.0.children()
    }

    /// Binding priority, used for parenthesization.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.0.priority()
    }

    /// The numeric literal, if this is one.
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self.node() {
            Node::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The integer literal, if this is one.
    #[must_use]
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number().and_then(Number::as_integer)
    }

    /// The variable name, if this is a variable.
    #[must_use]
    pub fn as_variable(&self) -> Option<&str> {
        match self.node() {
            Node::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for a numeric literal equal to zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(Number::is_zero)
    }

    /// Returns true for a numeric literal equal to one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(Number::is_one)
    }

    /// Returns true if `name` occurs anywhere in the tree.
    #[must_use]
    pub fn contains_variable(&self, name: &str) -> bool {
        match self.node() {
            Node::Variable(v) => &**v == name,
            _ => self.children().iter().any(|c| c.contains_variable(name)),
        }
    }

    /// Free variables, sorted by name and deduplicated.
    ///
    /// Named constants (`pi`, `e`) are not free.
    #[must_use]
    pub fn free_variables(&self) -> Vec<Entity> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
            .into_iter()
            .map(|name| Self::from_node(Node::Variable(name)))
            .collect()
    }

    fn collect_variables(&self, names: &mut BTreeSet<Arc<str>>) {
        match self.node() {
            Node::Variable(v) if !CONSTANTS.contains(&&**v) => {
                names.insert(v.clone());
            }
            _ => {
                for child in self.children() {
                    child.collect_variables(names);
                }
            }
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Entity::size).sum::<usize>()
    }

    // === Transformation ===

    /// Rebuilds this node with every child passed through `f`.
    #[must_use]
    pub fn map_children<F: FnMut(&Entity) -> Entity>(&self, mut f: F) -> Entity {
        let node = match self.node() {
            Node::Number(_) | Node::Variable(_) | Node::Boolean(_) => return self.clone(),
            Node::Sum(args) => Node::Sum(args.iter().map(&mut f).collect()),
            Node::Product(args) => Node::Product(args.iter().map(&mut f).collect()),
            Node::Power { base, exp } => Node::Power {
                base: f(base),
                exp: f(exp),
            },
            Node::Neg(arg) => Node::Neg(f(arg)),
            Node::Div { num, den } => Node::Div {
                num: f(num),
                den: f(den),
            },
            Node::Function { func, args } => Node::Function {
                func: func.clone(),
                args: args.iter().map(&mut f).collect(),
            },
            Node::Not(arg) => Node::Not(f(arg)),
            Node::And(a, b) => {
                let a = f(a);
                Node::And(a, f(b))
            }
            Node::Or(a, b) => {
                let a = f(a);
                Node::Or(a, f(b))
            }
            Node::Compare { relation, lhs, rhs } => Node::Compare {
                relation: *relation,
                lhs: f(lhs),
                rhs: f(rhs),
            },
            Node::Set(set) => Node::Set(set.map_entities(&mut f)),
            Node::In { element, set } => {
                let element = f(element);
                Node::In {
                    element,
                    set: set.map_entities(&mut f),
                }
            }
        };
        Self::from_node(node)
    }

    /// Rebuilds this node over new children, given in [`Entity::children`] order.
    #[must_use]
    pub fn with_children(&self, children: &[Entity]) -> Entity {
        let mut replacements = children.iter();
        self.map_children(|old| replacements.next().cloned().unwrap_or_else(|| old.clone()))
    }

    /// Replaces every occurrence of `from` with `to`.
    #[must_use]
    pub fn replace(&self, from: &Entity, to: &Entity) -> Entity {
        if self == from {
            return to.clone();
        }
        if self.node().is_atom() {
            return self.clone();
        }
        self.map_children(|c| c.replace(from, to))
    }

    /// Substitutes `value` for the variable `name`.
    ///
    /// Subtrees without the variable are shared with the input.
    #[must_use]
    pub fn substitute(&self, name: &str, value: &Entity) -> Entity {
        if !self.contains_variable(name) {
            return self.clone();
        }
        match self.node() {
            Node::Variable(_) => value.clone(),
            _ => self.map_children(|c| c.substitute(name, value)),
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl From<Number> for Entity {
    fn from(value: Number) -> Self {
        Self::number(value)
    }
}

impl From<Integer> for Entity {
    fn from(value: Integer) -> Self {
        Self::number(value)
    }
}

impl From<Rational> for Entity {
    fn from(value: Rational) -> Self {
        Self::number(value)
    }
}

impl From<i64> for Entity {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<i32> for Entity {
    fn from(value: i32) -> Self {
        Self::number(value)
    }
}

impl From<bool> for Entity {
    fn from(value: bool) -> Self {
        Self::boolean(value)
    }
}

impl From<Set> for Entity {
    fn from(value: Set) -> Self {
        Self::from_node(Node::Set(value))
    }
}

impl From<&Entity> for Entity {
    fn from(value: &Entity) -> Self {
        value.clone()
    }
}

macro_rules! forward_entity_binop {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $trait for &Entity {
            type Output = Entity;

            fn $method(self, rhs: Self) -> Self::Output {
                let ($a, $b) = (self.clone(), rhs.clone());
                $body
            }
        }

        impl $trait for Entity {
            type Output = Entity;

            fn $method(self, rhs: Self) -> Self::Output {
                let ($a, $b) = (self, rhs);
                $body
            }
        }

        impl $trait<i64> for Entity {
            type Output = Entity;

            fn $method(self, rhs: i64) -> Self::Output {
                let ($a, $b) = (self, Entity::integer(rhs));
                $body
            }
        }

        impl $trait<i64> for &Entity {
            type Output = Entity;

            fn $method(self, rhs: i64) -> Self::Output {
                let ($a, $b) = (self.clone(), Entity::integer(rhs));
                $body
            }
        }
    };
}

forward_entity_binop!(Add, add, |a, b| Entity::from_node(Node::Sum(smallvec![a, b])));
forward_entity_binop!(Sub, sub, |a, b| Entity::from_node(Node::Sum(smallvec![a, -b])));
forward_entity_binop!(Mul, mul, |a, b| Entity::from_node(Node::Product(smallvec![a, b])));
forward_entity_binop!(Div, div, |a, b| Entity::from_node(Node::Div { num: a, den: b }));

impl Neg for Entity {
    type Output = Entity;

    fn neg(self) -> Self::Output {
        Entity::from_node(Node::Neg(self))
    }
}

impl Neg for &Entity {
    type Output = Entity;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

// === Display ===

/// Writes `child`, parenthesized if it binds looser than `bound`.
fn write_child(f: &mut fmt::Formatter<'_>, child: &Entity, bound: Priority) -> fmt::Result {
    if child.priority() > bound {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

/// Writes `child`, parenthesized unless it binds strictly tighter than `bound`.
fn write_strict(f: &mut fmt::Formatter<'_>, child: &Entity, bound: Priority) -> fmt::Result {
    if child.priority() >= bound {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: &[Entity],
    sep: &str,
    bound: Priority,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write_child(f, item, bound)?;
    }
    Ok(())
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Number(Number::Complex(c)) if c.re().is_zero() => write!(f, "{}i", c.im()),
            Node::Number(n) => write!(f, "{n}"),
            Node::Variable(name) => f.write_str(name),
            Node::Sum(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match term.node() {
                        Node::Neg(inner) if i > 0 => {
                            f.write_str(" - ")?;
                            write_strict(f, inner, Priority::Sum)?;
                        }
                        _ => {
                            if i > 0 {
                                f.write_str(" + ")?;
                            }
                            write_child(f, term, Priority::Sum)?;
                        }
                    }
                }
                Ok(())
            }
            Node::Product(factors) => write_joined(f, factors, " * ", Priority::Mul),
            Node::Power { base, exp } => {
                write_strict(f, base, Priority::Power)?;
                f.write_str("^")?;
                write_strict(f, exp, Priority::Power)
            }
            Node::Neg(arg) => {
                f.write_str("-")?;
                write_strict(f, arg, Priority::Mul)
            }
            Node::Div { num, den } => {
                write_child(f, num, Priority::Mul)?;
                f.write_str(" / ")?;
                write_strict(f, den, Priority::Mul)
            }
            Node::Function { func, args } => {
                write!(f, "{func}(")?;
                write_joined(f, args, ", ", Priority::Or)?;
                f.write_str(")")
            }
            Node::Boolean(b) => write!(f, "{b}"),
            Node::Not(arg) => {
                f.write_str("not ")?;
                write_child(f, arg, Priority::Not)
            }
            Node::And(a, b) => {
                write_child(f, a, Priority::And)?;
                f.write_str(" and ")?;
                write_child(f, b, Priority::And)
            }
            Node::Or(a, b) => {
                write_child(f, a, Priority::Or)?;
                f.write_str(" or ")?;
                write_child(f, b, Priority::Or)
            }
            Node::Compare { relation, lhs, rhs } => {
                write_strict(f, lhs, Priority::Comparison)?;
                write!(f, " {} ", relation.symbol())?;
                write_strict(f, rhs, Priority::Comparison)
            }
            Node::Set(set) => write!(f, "{set}"),
            Node::In { element, set } => {
                write_strict(f, element, Priority::Comparison)?;
                write!(f, " in {set}")
            }
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Entity {
        Entity::var("x")
    }

    #[test]
    fn test_structural_equality() {
        let a = x() + 1;
        let b = x() + 1;
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert_ne!(a, x() + 2);
    }

    #[test]
    fn test_construction_does_not_evaluate() {
        let e = Entity::integer(2) + Entity::integer(3);
        assert!(matches!(e.node(), Node::Sum(terms) if terms.len() == 2));
    }

    #[test]
    fn test_sum_product_degenerate_arity() {
        assert!(Entity::sum([]).is_zero());
        assert!(Entity::product([]).is_one());
        assert_eq!(Entity::sum([x()]), x());
    }

    #[test]
    fn test_children_and_rebuild() {
        let e = x().pow(2) * Entity::var("y");
        let children = e.children();
        assert_eq!(children.len(), 2);

        let swapped = e.with_children(&[children[1].clone(), children[0].clone()]);
        assert_eq!(swapped, Entity::var("y") * x().pow(2));
    }

    #[test]
    fn test_substitute_shares_untouched_subtrees() {
        let untouched = Entity::var("y").sin();
        let e = &untouched + &x();
        let s = e.substitute("x", &Entity::integer(3));

        assert_eq!(s, &untouched + &Entity::integer(3));
        assert!(s.children()[0].ptr_eq(&untouched));
    }

    #[test]
    fn test_substitute_inside_sets() {
        let set = Set::from(crate::set::Interval::open(Entity::var("a"), Entity::infinity()));
        let e = x().is_in(set);
        let s = e.substitute("a", &Entity::integer(0));
        assert!(!s.contains_variable("a"));
    }

    #[test]
    fn test_free_variables() {
        let e = Entity::var("y") * x() + x().sin() + Entity::pi();
        let names: Vec<String> = e.free_variables().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_display_parenthesization() {
        assert_eq!((x() + 1).to_string(), "x + 1");
        assert_eq!(((x() + 1) * Entity::var("y")).to_string(), "(x + 1) * y");
        assert_eq!((x() - Entity::integer(2)).to_string(), "x - 2");
        assert_eq!(Entity::integer(-2).pow(x()).to_string(), "(-2)^x");
        assert_eq!(x().pow(Entity::rational(1, 2)).to_string(), "x^(1/2)");
        assert_eq!(x().phi().to_string(), "phi(x)");
        assert_eq!(x().greater(0).to_string(), "x > 0");
        assert_eq!(
            x().greater(0).and(&x().less(3)).to_string(),
            "x > 0 and x < 3"
        );
    }
}
