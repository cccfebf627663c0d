//! The main simplification engine.
//!
//! Simplification runs in three phases:
//!
//! 1. The pattern library is applied bottom-up until a fixpoint (or the
//!    iteration limit) is reached.
//! 2. Every maximal subtree in the egg fragment is saturated with the
//!    rewrite rules and the cheapest equivalent is extracted.
//! 3. The pattern library runs once more to normalize the extracted form.

use std::time::Duration;

use egg::{Extractor, RecExpr, Runner};
use log::trace;
use rayon::prelude::*;
use tessera_core::Entity;

use crate::analysis::{ConstantFold, Rewrite};
use crate::cost::{AstSizeCost, CostModel, WeightedCost};
use crate::language::SymLang;
use crate::patterns::{self, NamedRule};
use crate::rules;
use crate::translate::{in_fragment, Translator};

/// Configuration for the simplification engine.
#[derive(Clone, Debug)]
pub struct SimplifierConfig {
    /// Maximum number of pattern passes and of saturation iterations.
    pub iter_limit: usize,
    /// Maximum number of nodes in the e-graph.
    pub node_limit: usize,
    /// Time limit for one saturation run, in milliseconds.
    pub time_limit_ms: u64,
    /// Whether to run equality saturation at all.
    pub saturate: bool,
    /// Minimum number of children before siblings are rewritten in parallel.
    pub parallel_threshold: usize,
    /// Cost function used for extraction.
    pub cost_model: CostModel,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            iter_limit: 30,
            node_limit: 10_000,
            time_limit_ms: 500,
            saturate: true,
            parallel_threshold: 8,
            cost_model: CostModel::AstSize,
        }
    }
}

impl SimplifierConfig {
    /// Patterns only, no e-graph.
    #[must_use]
    pub fn patterns_only() -> Self {
        Self {
            saturate: false,
            ..Self::default()
        }
    }
}

/// The main simplification engine.
#[derive(Clone)]
pub struct Simplifier {
    /// Configuration.
    config: SimplifierConfig,
    /// Entity-level patterns.
    patterns: Vec<NamedRule>,
    /// Saturation rules.
    rules: Vec<Rewrite>,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplifier {
    /// Creates a new simplifier with the default patterns and rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimplifierConfig::default())
    }

    /// Creates a simplifier with custom configuration.
    #[must_use]
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self {
            config,
            patterns: patterns::all_patterns(),
            rules: rules::all_rules(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Sets custom patterns (replaces the default library).
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<NamedRule>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Adds patterns to the existing library.
    pub fn add_patterns(&mut self, patterns: impl IntoIterator<Item = NamedRule>) {
        self.patterns.extend(patterns);
    }

    /// Sets custom saturation rules (replaces default rules).
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rewrite>) -> Self {
        self.rules = rules;
        self
    }

    /// Adds saturation rules to the existing set.
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rewrite>) {
        self.rules.extend(rules);
    }

    /// Simplifies an expression.
    #[must_use]
    pub fn simplify(&self, expr: &Entity) -> Entity {
        self.simplify_with_stats(expr).0
    }

    /// Simplifies and returns both the result and statistics.
    #[must_use]
    pub fn simplify_with_stats(&self, expr: &Entity) -> (Entity, SimplificationStats) {
        let mut stats = SimplificationStats::default();
        let mut current = self.apply_patterns(expr, &mut stats);

        if self.config.saturate && !self.rules.is_empty() {
            let saturated = self.saturate(&current, &mut stats);
            if saturated != current {
                current = self.apply_patterns(&saturated, &mut stats);
            }
        }

        trace!(
            "simplified {expr} to {current} ({} passes, {} saturation runs)",
            stats.passes,
            stats.saturation_runs
        );
        (current, stats)
    }

    /// Runs pattern passes until nothing changes.
    fn apply_patterns(&self, expr: &Entity, stats: &mut SimplificationStats) -> Entity {
        let mut current = expr.clone();
        for _ in 0..self.config.iter_limit.max(1) {
            let next = rewrite_bottom_up(&current, &self.patterns, self.config.parallel_threshold);
            stats.passes += 1;
            if next == current {
                break;
            }
            trace!("pattern pass: {current} -> {next}");
            current = next;
        }
        current
    }

    /// Saturates every maximal subtree that the e-graph language covers.
    fn saturate(&self, expr: &Entity, stats: &mut SimplificationStats) -> Entity {
        if expr.node().is_atom() {
            return expr.clone();
        }
        if !in_fragment(expr) {
            return expr.map_children(|c| self.saturate(c, stats));
        }

        let mut translator = Translator::new();
        let start = translator.to_rec_expr(expr);
        let runner: Runner<SymLang, ConstantFold> = Runner::default()
            .with_expr(&start)
            .with_iter_limit(self.config.iter_limit)
            .with_node_limit(self.config.node_limit)
            .with_time_limit(Duration::from_millis(self.config.time_limit_ms))
            .run(&self.rules);

        stats.saturation_runs += 1;
        stats.iterations += runner.iterations.len();
        stats.egraph_nodes = stats.egraph_nodes.max(runner.egraph.total_number_of_nodes());
        stats.egraph_classes = stats.egraph_classes.max(runner.egraph.number_of_classes());
        stats.stop_reason = runner.stop_reason.as_ref().map(|r| format!("{r:?}"));
        trace!(
            "saturated {start}: {} iterations, {} nodes, stopped: {:?}",
            runner.iterations.len(),
            runner.egraph.total_number_of_nodes(),
            runner.stop_reason
        );

        let Some(&root) = runner.roots.first() else {
            return expr.clone();
        };
        let best: RecExpr<SymLang> = match self.config.cost_model {
            CostModel::AstSize => Extractor::new(&runner.egraph, AstSizeCost).find_best(root).1,
            CostModel::Weighted => Extractor::new(&runner.egraph, WeightedCost).find_best(root).1,
        };

        let candidate = translator.from_rec_expr(&best);
        if candidate.size() < expr.size() {
            candidate
        } else {
            expr.clone()
        }
    }
}

/// One bottom-up pass of `patterns` over `expr`.
///
/// Children are rewritten first (in parallel for wide nodes); a node whose
/// children all came back unchanged is reused rather than rebuilt.
fn rewrite_bottom_up(expr: &Entity, patterns: &[NamedRule], parallel_threshold: usize) -> Entity {
    let children = expr.children();
    let node = if children.is_empty() {
        expr.clone()
    } else {
        let rewritten: Vec<Entity> = if children.len() >= parallel_threshold {
            children
                .as_slice()
                .par_iter()
                .map(|c| rewrite_bottom_up(c, patterns, parallel_threshold))
                .collect()
        } else {
            children
                .iter()
                .map(|c| rewrite_bottom_up(c, patterns, parallel_threshold))
                .collect()
        };
        if rewritten.iter().zip(&children).all(|(new, old)| new.ptr_eq(old)) {
            expr.clone()
        } else {
            expr.with_children(&rewritten)
        }
    };

    patterns.iter().fold(node, |acc, pattern| {
        let next = pattern.apply(&acc);
        if next == acc {
            acc
        } else {
            trace!("{}: {acc} -> {next}", pattern.name);
            next
        }
    })
}

/// Statistics about the simplification process.
#[derive(Clone, Debug, Default)]
pub struct SimplificationStats {
    /// Number of bottom-up pattern passes.
    pub passes: usize,
    /// Number of e-graph runs.
    pub saturation_runs: usize,
    /// Total saturation iterations over all runs.
    pub iterations: usize,
    /// Largest e-graph seen, in nodes.
    pub egraph_nodes: usize,
    /// Largest e-graph seen, in equivalence classes.
    pub egraph_classes: usize,
    /// Reason the last runner stopped.
    pub stop_reason: Option<String>,
}
