//! Rule evaluation engine.
//!
//! This module is the entry point for everything that happens after the
//! fragment and the rule file have been obtained. It is split into focused
//! submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! fragment + cursor ─▶ Fragment::new            (state.rs, cursor.rs)
//!                            │
//! rule file (BufRead) ──▶ Evaluator::run        (evaluator.rs)
//!                            │  for each block:
//!                            │    MatchState::new (fresh per block)
//!                            │    Statement::parse + Executor::execute  (statement.rs)
//!                            │      matches    ─▶ PatternCache + MatchState::apply_match
//!                            │      echo       ─▶ template::format ─▶ out (eager)
//!                            │      is*        ─▶ template::format ─▶ PathResolver
//!                            v
//!                        RunResult { Outcome, RunMetrics }  (metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `state.rs`: `Fragment` and the per-rule `MatchState` (cursor-scoped
//!   narrowing, anchored decomposition, group offsets).
//! - `template.rs`: `$`-placeholder expansion.
//! - `statement.rs`: line grammar, verb dispatch and the path predicates.
//! - `patterns.rs`: per-run compiled pattern cache.
//! - `evaluator.rs`: block iteration over the rule stream.
//! - `metrics.rs`: outcome and per-block trace.
//!
//! ## Debugging
//!
//! Every statement outcome is logged at `debug` level through `log`; the CLI
//! turns it on with `-vv` or `KAK_PLUMB_LOG=debug`.

#[path = "engine/evaluator.rs"]
mod evaluator;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/patterns.rs"]
mod patterns;
#[path = "engine/state.rs"]
mod state;
#[path = "engine/statement.rs"]
mod statement;
#[path = "engine/template.rs"]
mod template;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use evaluator::Evaluator;
pub use metrics::{Outcome, RuleAttempt, RunMetrics, RunResult};
pub use patterns::PatternCache;
pub use state::{Fragment, MatchState, Span};
pub use statement::{PathKind, Statement, check_path};
pub use template::format;
