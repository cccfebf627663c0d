//! Numeric and boolean evaluation.

use std::cmp::Ordering;

use tessera_numbers::{AbsoluteValue, Number, Real};

use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use crate::expr::{Func, Node, Relation};

const PI_DIGITS: &str = "3.14159265358979323846264338327950288419716939937510";
const E_DIGITS: &str = "2.71828182845904523536028747135266249775724709369995";

fn cannot(expr: &Entity, reason: &'static str) -> CoreError {
    CoreError::CannotEvaluate {
        expr: expr.to_string(),
        reason,
    }
}

fn constant(digits: &str) -> Number {
    Real::try_parse(digits).map_or_else(Number::nan, Number::Real)
}

impl Entity {
    /// Evaluates to a number.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CannotEvaluate`] if the tree has free variables,
    /// statements, sets, or functions without numeric semantics.
    pub fn eval_numerical(&self) -> CoreResult<Number> {
        match self.node() {
            Node::Number(n) => Ok(n.clone()),
            Node::Variable(name) => match &**name {
                "pi" => Ok(constant(PI_DIGITS)),
                "e" => Ok(constant(E_DIGITS)),
                _ => Err(cannot(self, "free variable")),
            },
            Node::Sum(terms) => terms
                .iter()
                .try_fold(Number::from(0), |acc, t| Ok(&acc + &t.eval_numerical()?)),
            Node::Product(factors) => factors
                .iter()
                .try_fold(Number::from(1), |acc, t| Ok(&acc * &t.eval_numerical()?)),
            Node::Power { base, exp } => Ok(base.eval_numerical()?.pow(&exp.eval_numerical()?)),
            Node::Neg(arg) => Ok(-arg.eval_numerical()?),
            Node::Div { num, den } => Ok(&num.eval_numerical()? / &den.eval_numerical()?),
            Node::Function { func, args } => {
                let values = args
                    .iter()
                    .map(Entity::eval_numerical)
                    .collect::<CoreResult<Vec<_>>>()?;
                match values.as_slice() {
                    [x] => apply_numeric(func, x).ok_or_else(|| cannot(self, "no numeric value")),
                    _ => Err(cannot(self, "wrong number of arguments")),
                }
            }
            Node::Boolean(_)
            | Node::Not(_)
            | Node::And(..)
            | Node::Or(..)
            | Node::Compare { .. }
            | Node::In { .. } => Err(cannot(self, "statement in numeric context")),
            Node::Set(_) => Err(cannot(self, "set in numeric context")),
        }
    }

    /// Evaluates a statement to a truth value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CannotEvaluate`] for non-statements, unordered
    /// comparisons, and undecidable membership.
    pub fn eval_boolean(&self) -> CoreResult<bool> {
        match self.node() {
            Node::Boolean(b) => Ok(*b),
            Node::Not(arg) => Ok(!arg.eval_boolean()?),
            Node::And(a, b) => Ok(a.eval_boolean()? && b.eval_boolean()?),
            Node::Or(a, b) => Ok(a.eval_boolean()? || b.eval_boolean()?),
            Node::Compare { relation, lhs, rhs } => {
                let l = lhs.eval_numerical()?;
                let r = rhs.eval_numerical()?;
                let ordering = l.compare(&r);
                if *relation == Relation::Equal {
                    return Ok(ordering.map_or_else(|| l == r, Ordering::is_eq));
                }
                let ordering = ordering.ok_or_else(|| cannot(self, "unordered operands"))?;
                Ok(match relation {
                    Relation::Less => ordering.is_lt(),
                    Relation::Greater => ordering.is_gt(),
                    Relation::LessEqual => ordering.is_le(),
                    Relation::GreaterEqual | Relation::Equal => ordering.is_ge(),
                })
            }
            Node::In { element, set } => {
                let point = Entity::number(element.eval_numerical()?);
                set.contains(&point)
                    .ok_or_else(|| cannot(self, "undecidable membership"))
            }
            _ => Err(cannot(self, "not a statement")),
        }
    }

    /// Returns true if [`Entity::eval_numerical`] succeeds.
    #[must_use]
    pub fn is_evaluable_numerical(&self) -> bool {
        self.eval_numerical().is_ok()
    }

    /// Returns true if [`Entity::eval_boolean`] succeeds.
    #[must_use]
    pub fn is_evaluable_boolean(&self) -> bool {
        self.eval_boolean().is_ok()
    }
}

/// Applies a one-argument function to a number.
///
/// Real arguments go through `f64`; `ln` of a negative real and every
/// complex argument go through `Complex`.
fn apply_numeric(func: &Func, x: &Number) -> Option<Number> {
    match func {
        Func::Sqrt => return Some(x.sqrt()),
        Func::Abs => return Some(x.abs_value()),
        Func::Phi => return x.as_integer().map(|n| Number::from(n.phi())),
        Func::Named(_) => return None,
        _ => {}
    }
    if let Some(v) = x.to_real().map(|r| r.to_f64()) {
        let real = |value: f64| Some(Number::from(Real::from_f64(value)));
        return match func {
            Func::Sin => real(v.sin()),
            Func::Cos => real(v.cos()),
            Func::Tan => real(v.tan()),
            Func::Asin => real(v.asin()),
            Func::Acos => real(v.acos()),
            Func::Atan => real(v.atan()),
            Func::Exp => real(v.exp()),
            Func::Ln if v < 0.0 => Some(Number::from(x.to_complex().ln())),
            Func::Ln => real(v.ln()),
            _ => None,
        };
    }
    let z = x.to_complex();
    let value = match func {
        Func::Sin => z.sin(),
        Func::Cos => z.cos(),
        Func::Tan => &z.sin() / &z.cos(),
        Func::Exp => z.exp(),
        Func::Ln => z.ln(),
        _ => return None,
    };
    Some(Number::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::{Interval, Set};

    fn x() -> Entity {
        Entity::var("x")
    }

    #[test]
    fn test_eval_arithmetic() {
        let e = (Entity::integer(2) + Entity::integer(3)) * Entity::integer(4) - Entity::integer(1);
        assert_eq!(e.eval_numerical(), Ok(Number::from(19)));

        let q = Entity::integer(1) / Entity::integer(3);
        assert_eq!(q.eval_numerical().map(|n| n.to_string()), Ok("1/3".to_string()));
    }

    #[test]
    fn test_eval_free_variable_fails() {
        let e = x() + 1;
        assert!(matches!(e.eval_numerical(), Err(CoreError::CannotEvaluate { .. })));
        assert!(!e.is_evaluable_numerical());
        assert!(e.substitute("x", &Entity::integer(4)).is_evaluable_numerical());
    }

    #[test]
    fn test_eval_functions() {
        assert_eq!(Entity::integer(0).sin().eval_numerical(), Ok(Number::from(0)));
        assert_eq!(Entity::integer(0).exp().eval_numerical(), Ok(Number::from(1)));
        assert_eq!(Entity::integer(36).phi().eval_numerical(), Ok(Number::from(12)));
        assert_eq!(Entity::integer(49).sqrt().eval_numerical(), Ok(Number::from(7)));

        let pi = Entity::pi().eval_numerical().unwrap().to_real().unwrap().to_f64();
        assert!((pi - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_eval_named_function_fails() {
        let f = Entity::apply(Func::from_name("f"), [Entity::integer(1)]);
        assert!(f.eval_numerical().is_err());
        assert!(Entity::rational(1, 2).phi().eval_numerical().is_err());
    }

    #[test]
    fn test_eval_boolean() {
        let three = Entity::integer(3);
        assert_eq!(three.greater(2).eval_boolean(), Ok(true));
        assert_eq!(three.less_or_equal(2).eval_boolean(), Ok(false));
        assert_eq!(three.equals(Entity::rational(6, 2)).eval_boolean(), Ok(true));
        assert_eq!(
            three.greater(5).or(&Entity::boolean(true)).eval_boolean(),
            Ok(true)
        );
        assert_eq!(Entity::boolean(true).not().eval_boolean(), Ok(false));
    }

    #[test]
    fn test_eval_membership() {
        let interval: Set = Interval::closed(Entity::integer(0), Entity::integer(1)).into();
        assert_eq!(Entity::rational(1, 2).is_in(interval.clone()).eval_boolean(), Ok(true));
        assert_eq!(Entity::integer(2).is_in(interval).eval_boolean(), Ok(false));
    }

    #[test]
    fn test_context_mismatch() {
        assert!(Entity::integer(1).eval_boolean().is_err());
        assert!(Entity::boolean(true).eval_numerical().is_err());
        let unordered = Entity::integer(-1).sqrt().greater(0);
        assert!(unordered.eval_boolean().is_err());
    }
}
