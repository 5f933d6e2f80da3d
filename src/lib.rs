//! Rule-driven plumbing for editor text.
//!
//! Given a fragment of text (typically a selection containing a file/line
//! reference) and a cursor inside it, `kak_plumb` evaluates an ordered rule
//! file and lets the first fully successful rule decide what to print.
//!
//! ```text
//! matches [\w./-]+:\d+          # narrow to the reference under the cursor
//! matches ([\w./-]+):(\d+)      # decompose it; must consume it whole
//! isfile $1                     # resolve and check the path
//! echo edit -existing $file $2  # emit the action
//! ```
//!
//! Rules are separated by a single blank line. A rule stops at its first failing
//! statement and the next rule is tried; `echo` output already written
//! stays written. If no rule succeeds the run ends quietly.
//!
//! Entry points: [`run`] for the whole pipeline, or [`Evaluator`] when the
//! fragment, resolver and rule stream are already at hand.

#[macro_use]
mod macros;
mod api;
pub mod cursor;
mod engine;
mod error;
pub mod path;

pub use api::{Config, DEFAULT_RULE_FILE, enter_working_dir, open_rules, read_input, run};
pub use engine::{
    Evaluator, Fragment, MatchState, Outcome, PathKind, PatternCache, RuleAttempt, RunMetrics, RunResult, Span,
    Statement, check_path, format,
};
pub use error::{ConfigError, RuleFailure, StatementError};
pub use path::{FsResolver, PathResolver};
