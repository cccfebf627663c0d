//! Guarded rewrite patterns over [`Entity`].
//!
//! A pattern inspects the shape of a single node (and, recursively, its
//! children) and returns a replacement when the shape matches. When the
//! guard fails the input comes back unchanged, so patterns compose in any
//! order and may be re-applied freely.

pub mod arithmetic;
pub mod exp_log;
pub mod number_theory;
pub mod trig;

use std::fmt;

use tessera_core::{Entity, Func, Node};

/// A named, side-effect-free rewrite.
#[derive(Clone, Copy)]
pub struct NamedRule {
    /// Identifier used in logs.
    pub name: &'static str,
    /// The rewrite itself.
    pub rewrite: fn(&Entity) -> Entity,
}

impl NamedRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(name: &'static str, rewrite: fn(&Entity) -> Entity) -> Self {
        Self { name, rewrite }
    }

    /// Applies the rule to `e` (not to its children).
    #[must_use]
    pub fn apply(&self, e: &Entity) -> Entity {
        (self.rewrite)(e)
    }
}

impl fmt::Debug for NamedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamedRule").field(&self.name).finish()
    }
}

/// Collects every pattern library.
#[must_use]
pub fn all_patterns() -> Vec<NamedRule> {
    let mut patterns = Vec::new();
    patterns.extend(number_theory::patterns());
    patterns.extend(arithmetic::patterns());
    patterns.extend(exp_log::patterns());
    patterns.extend(trig::patterns());
    patterns
}

/// The single argument of `func(arg)`.
pub(crate) fn unary_arg<'a>(e: &'a Entity, func: &Func) -> Option<&'a Entity> {
    match e.node() {
        Node::Function { func: f, args } if f == func && args.len() == 1 => args.first(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let patterns = all_patterns();
        let mut names: Vec<_> = patterns.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), patterns.len());
    }

    #[test]
    fn test_unmatched_shapes_pass_through() {
        let e = Entity::var("x").phi() + Entity::var("y");
        for pattern in all_patterns() {
            let once = pattern.apply(&e);
            assert_eq!(pattern.apply(&once), once, "{pattern:?} is not stable");
        }
    }
}
