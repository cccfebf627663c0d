//! End-to-end solving scenarios.

use tessera_core::{intersect, unite, Entity, Interval, Set};
use test_log::test;

use crate::{solve, solve_equation, solve_inequality, SolveError};

fn x() -> Entity {
    Entity::var("x")
}

fn int(n: i64) -> Entity {
    Entity::integer(n)
}

fn open(left: Entity, right: Entity) -> Set {
    Interval::open(left, right).into()
}

#[test]
fn linear_inequality_rays() {
    assert_eq!(
        solve_inequality(&(x() - int(3)), "x"),
        Ok(open(int(3), Entity::infinity()))
    );
    assert_eq!(
        solve_inequality(&(-x() - int(3)), "x"),
        Ok(open(Entity::negative_infinity(), int(-3)))
    );
}

#[test]
fn downward_parabola_is_positive_between_roots() {
    // a = -1, b = 3, c = -2
    let e = -x().pow(2) + int(3) * x() - int(2);
    assert_eq!(solve_inequality(&e, "x"), Ok(open(int(1), int(2))));
}

#[test]
fn upward_parabola_is_positive_outside_roots() {
    let e = (x() - int(1)) * (x() - int(2));
    let expected = open(Entity::negative_infinity(), int(1)).union(open(int(2), Entity::infinity()));
    assert_eq!(solve_inequality(&e, "x"), Ok(expected));
}

#[test]
fn positive_parabola_without_real_roots_is_empty() {
    // Kept as-is: an everywhere-positive parabola still reports no solutions.
    let e = x().pow(2) + x() + int(1);
    assert_eq!(solve_inequality(&e, "x"), Ok(Set::Empty));
}

#[test]
fn cubic_is_declined_not_empty() {
    let e = x().pow(3) - int(2) * x();
    let result = solve_inequality(&e, "x");
    assert!(matches!(result, Err(SolveError::NotImplemented(_))), "{result:?}");
}

#[test]
fn statement_round_trip() {
    let statement = (x().pow(2) - int(4)).less_or_equal(int(0));
    let solved = solve(&statement, "x").unwrap();
    assert_eq!(solved, Interval::closed(int(-2), int(2)).into());
    for (value, inside) in [(-3, false), (-2, true), (0, true), (2, true), (3, false)] {
        let substituted = statement.substitute("x", &int(value));
        assert_eq!(substituted.eval_boolean(), Ok(inside));
        assert_eq!(solved.contains(&int(value)), Some(inside));
    }
}

#[test]
fn equation_roots_satisfy_the_equation() {
    let e = int(2) * x().pow(2) - int(3) * x() - int(2);
    let Ok(Set::Finite(roots)) = solve_equation(&e, "x") else {
        panic!("expected finite roots");
    };
    assert_eq!(roots.len(), 2);
    for root in roots.iter() {
        let value = e.substitute("x", root).eval_numerical().unwrap();
        assert!(value.is_zero(), "{root} gives {value}");
    }
}

#[test]
fn set_folds_over_solutions() {
    let a = solve(&x().greater(int(0)), "x").unwrap();
    let b = solve(&x().less(int(5)), "x").unwrap();
    assert_eq!(intersect([a.clone(), b.clone()]), open(int(0), int(5)));
    assert_eq!(unite(Vec::<Set>::new()), Set::Empty);
    assert_eq!(intersect(Vec::<Set>::new()), Set::Empty);
    assert_eq!(unite([Set::Empty, a.clone()]), a);
    assert_eq!(Set::Empty.intersection(b), Set::Empty);
}

#[test]
fn symbolic_parameters_flow_through() {
    let k = Entity::var("k");
    let solved = solve(&(x() - k.clone()).equals(int(0)), "x").unwrap();
    assert_eq!(solved, Set::finite([k]));
}
