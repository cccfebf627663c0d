//! Symbolic differentiation.
//!
//! The result is correct but unsimplified; terms whose derivative is a
//! literal zero are dropped while building it.

use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use crate::expr::{Func, Node};

impl Entity {
    /// Derivative with respect to the variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotDifferentiable`] for statements, sets,
    /// `phi`, and user functions whose arguments depend on `var`.
    pub fn derive(&self, var: &str) -> CoreResult<Entity> {
        if !self.contains_variable(var) {
            if self.node().is_statement() || matches!(self.node(), Node::Set(_)) {
                return Err(CoreError::NotDifferentiable(self.to_string()));
            }
            return Ok(Entity::integer(0));
        }
        match self.node() {
            Node::Variable(_) => Ok(Entity::integer(1)),
            Node::Sum(terms) => {
                let parts = terms
                    .iter()
                    .map(|t| t.derive(var))
                    .collect::<CoreResult<Vec<_>>>()?;
                Ok(sum_nonzero(parts))
            }
            Node::Product(factors) => {
                let mut terms = Vec::with_capacity(factors.len());
                for (i, factor) in factors.iter().enumerate() {
                    let d = factor.derive(var)?;
                    if d.is_zero() {
                        continue;
                    }
                    let mut product: Vec<Entity> = factors.iter().cloned().collect();
                    product[i] = d;
                    terms.push(Entity::product(product));
                }
                Ok(sum_nonzero(terms))
            }
            Node::Neg(arg) => Ok(-arg.derive(var)?),
            Node::Div { num, den } => {
                // (n'd - nd') / d^2
                let dn = num.derive(var)?;
                let dd = den.derive(var)?;
                let numerator = sum_nonzero(vec![
                    times(&dn, den),
                    if dd.is_zero() { dd } else { -times(num, &dd) },
                ]);
                Ok(numerator / den.pow(2))
            }
            Node::Power { base, exp } => derive_power(base, exp, var),
            Node::Function { func, args } => match args.as_slice() {
                [u] => chain_rule(self, func, u, var),
                _ => Err(CoreError::NotDifferentiable(self.to_string())),
            },
            _ => Err(CoreError::NotDifferentiable(self.to_string())),
        }
    }
}

fn derive_power(base: &Entity, exp: &Entity, var: &str) -> CoreResult<Entity> {
    let power = base.pow(exp);
    if !exp.contains_variable(var) {
        // e * b^(e-1) * b'
        let lowered = base.pow(exp - 1);
        return Ok(times(&(exp * &lowered), &base.derive(var)?));
    }
    if !base.contains_variable(var) {
        // b^e * ln(b) * e'
        return Ok(times(&(&power * &base.ln()), &exp.derive(var)?));
    }
    // b^e * (e' ln b + e b' / b)
    let inner = Entity::sum([
        &exp.derive(var)? * &base.ln(),
        exp * &(base.derive(var)? / base.clone()),
    ]);
    Ok(&power * &inner)
}

fn chain_rule(call: &Entity, func: &Func, u: &Entity, var: &str) -> CoreResult<Entity> {
    let outer = match func {
        Func::Sin => u.cos(),
        Func::Cos => -u.sin(),
        Func::Tan => Entity::integer(1) / u.cos().pow(2),
        Func::Asin => Entity::integer(1) / (Entity::integer(1) - u.pow(2)).sqrt(),
        Func::Acos => -(Entity::integer(1) / (Entity::integer(1) - u.pow(2)).sqrt()),
        Func::Atan => Entity::integer(1) / (Entity::integer(1) + u.pow(2)),
        Func::Exp => u.exp(),
        Func::Ln => Entity::integer(1) / u.clone(),
        Func::Sqrt => Entity::integer(1) / (Entity::integer(2) * u.sqrt()),
        Func::Abs => u / &Entity::apply1(Func::Abs, u),
        Func::Phi | Func::Named(_) => {
            return Err(CoreError::NotDifferentiable(call.to_string()));
        }
    };
    Ok(times(&outer, &u.derive(var)?))
}

/// `a * b`, skipping a literal one on either side.
fn times(a: &Entity, b: &Entity) -> Entity {
    if a.is_one() {
        b.clone()
    } else if b.is_one() {
        a.clone()
    } else {
        a * b
    }
}

fn sum_nonzero(terms: Vec<Entity>) -> Entity {
    Entity::sum(terms.into_iter().filter(|t| !t.is_zero()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_numbers::Number;

    fn x() -> Entity {
        Entity::var("x")
    }

    /// Value of `d/dx e` at `x = at`.
    fn slope(e: &Entity, at: i64) -> f64 {
        let d = e.derive("x").unwrap();
        let v = d.substitute("x", &Entity::integer(at)).eval_numerical().unwrap();
        v.to_real().unwrap().to_f64()
    }

    #[test]
    fn test_constants_and_variables() {
        assert!(Entity::integer(7).derive("x").unwrap().is_zero());
        assert!(Entity::var("y").derive("x").unwrap().is_zero());
        assert!(x().derive("x").unwrap().is_one());
    }

    #[test]
    fn test_polynomial() {
        // d/dx (x^3 + 2x) = 3x^2 + 2, which is 14 at x = 2
        let e = x().pow(3) + Entity::integer(2) * x();
        assert!((slope(&e, 2) - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_quotient() {
        // d/dx x / (x + 1) = 1 / (x + 1)^2, which is 1/4 at x = 1
        let e = x() / (x() + 1);
        let d = e.derive("x").unwrap();
        let v = d.substitute("x", &Entity::integer(1)).eval_numerical().unwrap();
        assert_eq!(v, Number::from(tessera_numbers::Rational::from_i64(1, 4)));
    }

    #[test]
    fn test_chain_rule() {
        // d/dx sin(x^2) = 2x cos(x^2)
        let e = x().pow(2).sin();
        let expected = 2.0 * 1.0_f64.cos();
        assert!((slope(&e, 1) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_general_power() {
        // d/dx x^x = x^x (ln x + 1), which is 4 (ln 2 + 1) at x = 2
        let e = x().pow(x());
        let expected = 4.0 * (2.0_f64.ln() + 1.0);
        assert!((slope(&e, 2) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_not_differentiable() {
        assert!(matches!(
            x().phi().derive("x"),
            Err(CoreError::NotDifferentiable(_))
        ));
        let f = Entity::apply(Func::from_name("f"), [x()]);
        assert!(f.derive("x").is_err());
        assert!(x().greater(0).derive("x").is_err());
        // Constant in the variable of differentiation.
        assert!(Entity::var("y").phi().derive("x").unwrap().is_zero());
    }
}
