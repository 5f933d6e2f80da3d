//! Run trace.
//!
//! The evaluator records one [`RuleAttempt`] per rule block it starts, so the
//! CLI's `--explain` report can show which rule fired and why the earlier
//! ones were abandoned. Collecting it is cheap: one entry per block.

use crate::error::RuleFailure;
use std::time::Duration;

/// How an evaluation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A block ran to its end without a failing statement. `line` is the
    /// 1-based line of its first statement.
    Matched { line: usize },
    /// A blank line stood where a block should start. An empty rule has
    /// nothing that can fail, so it succeeds without output and ends the run.
    EmptyRule { line: usize },
    /// The rule stream ran out before any block succeeded.
    Exhausted,
}

/// One rule block the evaluator started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleAttempt {
    /// 1-based line of the block's first statement.
    pub line: usize,
    /// Statements executed, including the failing one.
    pub executed: usize,
    /// Why the block was abandoned; `None` if it succeeded.
    pub failure: Option<RuleFailure>,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Evaluator::run`](super::Evaluator::run).
    pub total: Duration,
    /// Attempts in rule-file order.
    pub attempts: Vec<RuleAttempt>,
    /// Distinct patterns compiled during the run.
    pub patterns_compiled: usize,
}

/// Evaluation outcome bundled with its trace.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub outcome: Outcome,
    pub metrics: RunMetrics,
}

impl RunResult {
    /// Whether some rule, possibly an empty one, succeeded.
    pub fn matched(&self) -> bool {
        matches!(self.outcome, Outcome::Matched { .. } | Outcome::EmptyRule { .. })
    }
}
