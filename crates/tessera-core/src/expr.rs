//! Expression node types.
//!
//! A [`Node`] is the payload behind an [`Entity`] handle. Nodes are built
//! once and never mutated, so their children can be shared freely.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use tessera_numbers::Number;

use crate::entity::Entity;
use crate::set::Set;

/// Child list of a sum or product.
pub type Operands = SmallVec<[Entity; 4]>;

/// Argument list of a function application.
pub type Arguments = SmallVec<[Entity; 2]>;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // === Atoms ===
    /// A numeric literal at any tower level.
    Number(Number),

    /// A symbolic variable.
    Variable(Arc<str>),

    // === Arithmetic ===
    /// Sum of expressions: a + b + c + ...
    Sum(Operands),

    /// Product of expressions: a * b * c * ...
    Product(Operands),

    /// Power expression: base^exp.
    Power {
        /// The base of the power.
        base: Entity,
        /// The exponent.
        exp: Entity,
    },

    /// Negation: -expr.
    Neg(Entity),

    /// Division: numerator / denominator.
    Div {
        /// The numerator.
        num: Entity,
        /// The denominator.
        den: Entity,
    },

    /// A function application: f(arg1, arg2, ...).
    Function {
        /// The function applied.
        func: Func,
        /// The arguments.
        args: Arguments,
    },

    // === Statements ===
    /// `true` or `false`.
    Boolean(bool),

    /// Logical negation.
    Not(Entity),

    /// Logical conjunction.
    And(Entity, Entity),

    /// Logical disjunction.
    Or(Entity, Entity),

    /// A relation between two expressions, e.g. `x > 0`.
    Compare {
        /// The relation tested.
        relation: Relation,
        /// Left-hand side.
        lhs: Entity,
        /// Right-hand side.
        rhs: Entity,
    },

    // === Sets ===
    /// A set literal.
    Set(Set),

    /// Set membership: `element in set`.
    In {
        /// The tested element.
        element: Entity,
        /// The set.
        set: Set,
    },
}

impl Node {
    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(self, Node::Number(_) | Node::Variable(_) | Node::Boolean(_))
    }

    /// Returns true if this node can only be evaluated to a truth value.
    #[must_use]
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::Boolean(_)
                | Node::Not(_)
                | Node::And(..)
                | Node::Or(..)
                | Node::Compare { .. }
                | Node::In { .. }
        )
    }

    /// Returns the children of this node, left to right.
    ///
    /// The entities inside a set (elements and interval bounds) count as
    /// children of `Set` and `In` nodes.
    #[must_use]
    pub fn children(&self) -> Operands {
        match self {
            Node::Number(_) | Node::Variable(_) | Node::Boolean(_) => SmallVec::new(),
            Node::Sum(args) | Node::Product(args) => args.clone(),
            Node::Power { base, exp } => smallvec::smallvec![base.clone(), exp.clone()],
            Node::Neg(arg) | Node::Not(arg) => smallvec::smallvec![arg.clone()],
            Node::Div { num, den } => smallvec::smallvec![num.clone(), den.clone()],
            Node::Function { args, .. } => args.iter().cloned().collect(),
            Node::And(a, b) | Node::Or(a, b) => smallvec::smallvec![a.clone(), b.clone()],
            Node::Compare { lhs, rhs, .. } => smallvec::smallvec![lhs.clone(), rhs.clone()],
            Node::Set(set) => set.entities().into_iter().collect(),
            Node::In { element, set } => std::iter::once(element.clone())
                .chain(set.entities())
                .collect(),
        }
    }

    /// The priority used for parenthesization.
    #[must_use]
    pub fn priority(&self) -> Priority {
        match self {
            Node::Number(n) => number_priority(n),
            Node::Variable(_) | Node::Boolean(_) | Node::Set(_) => Priority::Leaf,
            Node::Function { .. } => Priority::Function,
            Node::Power { .. } => Priority::Power,
            Node::Product(_) | Node::Neg(_) | Node::Div { .. } => Priority::Mul,
            Node::Sum(_) => Priority::Sum,
            Node::Compare { .. } | Node::In { .. } => Priority::Comparison,
            Node::Not(_) => Priority::Not,
            Node::And(..) => Priority::And,
            Node::Or(..) => Priority::Or,
        }
    }
}

/// Negative numbers print with a sign and proper fractions with a slash, so
/// both bind like a product.
fn number_priority(n: &Number) -> Priority {
    match n {
        Number::Rational(_) => Priority::Mul,
        Number::Complex(c) if !c.re().is_zero() => Priority::Sum,
        Number::Complex(c) if c.im().is_negative() => Priority::Mul,
        Number::Complex(_) => Priority::Leaf,
        n if n.is_negative() => Priority::Mul,
        _ => Priority::Leaf,
    }
}

/// How tightly a node binds, loosest last.
///
/// A child needs parentheses when its priority is looser than its parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Numbers, variables, literals.
    Leaf,
    /// Function application.
    Function,
    /// Exponentiation.
    Power,
    /// Products, quotients, negation.
    Mul,
    /// Sums.
    Sum,
    /// Relations and membership.
    Comparison,
    /// Logical negation.
    Not,
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

/// A relation between two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
}

impl Relation {
    /// The operator symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Equal => "=",
            Relation::Less => "<",
            Relation::Greater => ">",
            Relation::LessEqual => "<=",
            Relation::GreaterEqual => ">=",
        }
    }

    /// The relation with both sides swapped: `a < b` is `b > a`.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Relation::Equal => Relation::Equal,
            Relation::Less => Relation::Greater,
            Relation::Greater => Relation::Less,
            Relation::LessEqual => Relation::GreaterEqual,
            Relation::GreaterEqual => Relation::LessEqual,
        }
    }
}

/// A function that can be applied to arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Func {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Principal square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Euler's totient.
    Phi,
    /// A user-declared function with no built-in semantics.
    Named(Arc<str>),
}

impl Func {
    /// The function's name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "arcsin",
            Func::Acos => "arccos",
            Func::Atan => "arctan",
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
            Func::Phi => "phi",
            Func::Named(name) => name,
        }
    }

    /// Looks up a built-in by name, falling back to a named function.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "arcsin" | "asin" => Func::Asin,
            "arccos" | "acos" => Func::Acos,
            "arctan" | "atan" => Func::Atan,
            "exp" => Func::Exp,
            "ln" => Func::Ln,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            "phi" => Func::Phi,
            other => Func::Named(Arc::from(other)),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom() {
        assert!(Node::Number(Number::from(42)).is_atom());
        assert!(Node::Variable(Arc::from("x")).is_atom());
        assert!(!Node::Neg(Entity::integer(1)).is_atom());
    }

    #[test]
    fn test_number_priority() {
        assert_eq!(Node::Number(Number::from(3)).priority(), Priority::Leaf);
        assert_eq!(Node::Number(Number::from(-3)).priority(), Priority::Mul);
        let half = Entity::rational(1, 2);
        assert_eq!(half.priority(), Priority::Mul);
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Leaf < Priority::Mul);
        assert!(Priority::Mul < Priority::Sum);
        assert!(Priority::Comparison < Priority::And);
        assert!(Priority::And < Priority::Or);
    }

    #[test]
    fn test_func_names_roundtrip() {
        for func in [Func::Sin, Func::Asin, Func::Ln, Func::Phi] {
            assert_eq!(Func::from_name(func.name()), func);
        }
        assert_eq!(Func::from_name("f"), Func::Named(Arc::from("f")));
    }

    #[test]
    fn test_relation_flip() {
        assert_eq!(Relation::Less.flipped(), Relation::Greater);
        assert_eq!(Relation::GreaterEqual.flipped(), Relation::LessEqual);
        assert_eq!(Relation::Equal.flipped(), Relation::Equal);
    }
}
