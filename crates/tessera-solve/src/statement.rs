//! Solving boolean statements.

use log::debug;
use tessera_core::{Entity, FiniteSet, Interval, Node, Relation, Set};

use crate::equation::solve_equation;
use crate::error::{SolveError, SolveResult};
use crate::inequality::solve_inequality;
use crate::roots::{classify_root, RootKind};

/// Solves a statement for `x`, returning the set of satisfying values.
///
/// Comparisons are moved to one side: `a < b` becomes `b - a > 0`, and the
/// non-strict relations add the real roots of `a - b = 0` to the strict
/// solution. `and` intersects, `or` unites, and `x in S` is `S`.
///
/// # Errors
///
/// Returns [`SolveError::NotAStatement`] for entities that are not boolean
/// and [`SolveError::NotImplemented`] for negations and for comparisons
/// whose shape is unsupported.
pub fn solve(statement: &Entity, x: &str) -> SolveResult<Set> {
    match statement.node() {
        Node::Boolean(true) => Ok(Interval::reals().into()),
        Node::Boolean(false) => Ok(Set::Empty),
        Node::Compare { relation, lhs, rhs } => solve_comparison(*relation, lhs, rhs, x),
        Node::And(a, b) => Ok(solve(a, x)?.intersection(solve(b, x)?)),
        Node::Or(a, b) => Ok(solve(a, x)?.union(solve(b, x)?)),
        Node::In { element, set } if element.as_variable() == Some(x) => Ok(set.clone()),
        Node::Not(_) | Node::In { .. } => {
            debug!("{statement} has no solver for {x}");
            Err(SolveError::NotImplemented(statement.to_string()))
        }
        _ => Err(SolveError::NotAStatement(statement.to_string())),
    }
}

fn solve_comparison(relation: Relation, lhs: &Entity, rhs: &Entity, x: &str) -> SolveResult<Set> {
    let difference = lhs - rhs;
    let reversed = rhs - lhs;
    Ok(match relation {
        Relation::Equal => solve_equation(&difference, x)?,
        Relation::Greater => solve_inequality(&difference, x)?,
        Relation::Less => solve_inequality(&reversed, x)?,
        Relation::GreaterEqual => {
            solve_inequality(&difference, x)?.union(real_roots(&difference, x)?)
        }
        Relation::LessEqual => {
            solve_inequality(&reversed, x)?.union(real_roots(&difference, x)?)
        }
    })
}

/// The roots of `expr = 0` that lie on the real line.
fn real_roots(expr: &Entity, x: &str) -> SolveResult<Set> {
    Ok(match solve_equation(expr, x)? {
        Set::Finite(roots) => roots
            .into_iter()
            .filter(|r| classify_root(r) == RootKind::Real)
            .collect::<FiniteSet>()
            .into(),
        other => other,
    })
}
