//! Error tiers.
//!
//! - [`ConfigError`] is fatal: the whole invocation stops and the binary exits
//!   non-zero with a diagnostic.
//! - [`RuleFailure`] only abandons the current rule; the evaluator moves on to
//!   the next block.
//!
//! Statement executors return [`StatementError`], which carries either tier so
//! both can be propagated with `?`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::PathKind;

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read target: {0}")]
    ReadInput(#[source] io::Error),

    #[error("no target provided on standard input")]
    EmptyInput,

    #[error("could not change working directory to {}: {source}", path.display())]
    WorkingDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not open the rule file {}: {source}", path.display())]
    RuleFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read the rule file: {0}")]
    ReadRules(#[source] io::Error),

    #[error("line {line}: could not parse {text:?}")]
    MalformedLine { line: usize, text: String },

    #[error("line {line}: {verb} needs an argument, got none")]
    MissingArgument { line: usize, verb: &'static str },

    #[error("line {line}: incorrect regexp: {source}")]
    InvalidPattern {
        line: usize,
        #[source]
        source: regex::Error,
    },

    #[error("could not write output: {0}")]
    Output(#[source] io::Error),
}

/// Why a rule was abandoned. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleFailure {
    #[error("no match overlaps the cursor")]
    NoMatchUnderCursor,

    #[error("match does not span the whole target")]
    NotAnchored,

    #[error("{} is not {kind}", path)]
    Predicate { kind: PathKind, path: String },

    #[error("could not examine path {path}: {message}")]
    Stat { path: String, message: String },

    #[error("could not determine the path of {template}: {message}")]
    Resolve { template: String, message: String },
}

/// Outcome of a single failing statement.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Failed(#[from] RuleFailure),
}
