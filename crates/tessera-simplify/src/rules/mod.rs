//! Equality-saturation rewrite rules organized by category.

pub mod arithmetic;
pub mod exp_log;
pub mod trig;

use crate::analysis::Rewrite;

/// Collects all saturation rules.
#[must_use]
pub fn all_rules() -> Vec<Rewrite> {
    let mut rules = Vec::new();
    rules.extend(arithmetic::rules());
    rules.extend(trig::rules());
    rules.extend(exp_log::rules());
    rules
}
