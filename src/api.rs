//! Process-level entry points.
//!
//! [`Config`] carries what the command line decides (rule file, working
//! directory, cursor) and [`run`] drives one evaluation end to end: it builds
//! the fragment, enters the working directory, opens the rule file and hands
//! both to the [`Evaluator`](crate::Evaluator). The smaller helpers are public
//! so the binary can read stdin and report failures the same way.

use crate::engine::{Evaluator, Fragment, RunResult};
use crate::error::ConfigError;
use crate::path::{FsResolver, expand_home};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Default rule file location, before home expansion.
pub const DEFAULT_RULE_FILE: &str = "~/.kak-plumb";

/// Everything an invocation needs besides the fragment itself.
///
/// Built once at startup and passed down; nothing in the engine reads
/// process-wide settings on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rule file. A leading `~` is expanded; a relative path is taken
    /// relative to `working_dir`.
    pub rule_file: PathBuf,
    /// Directory relative paths in the fragment are resolved against.
    pub working_dir: PathBuf,
    /// Cursor as a character count into the fragment. Non-positive means
    /// the start.
    pub cursor: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self { rule_file: PathBuf::from(DEFAULT_RULE_FILE), working_dir: PathBuf::from("."), cursor: 0 }
    }
}

/// Resolve `input` with the rules from `config.rule_file`, writing `echo`
/// output to `out`.
///
/// Steps, in order: build the fragment, change the process working
/// directory to `config.working_dir`, open the rule file, evaluate.
/// A run where no rule matches is `Ok` with `Outcome::Exhausted`; a run
/// stopped by an empty rule is `Ok` with `Outcome::EmptyRule`.
///
/// # Example
/// ```no_run
/// use kak_plumb::{Config, run};
///
/// let config = Config { cursor: 3, ..Config::default() };
/// let mut out = Vec::new();
/// let result = run(&config, "src/main.rs:12".to_string(), &mut out)?;
/// if result.matched() {
///     print!("{}", String::from_utf8_lossy(&out));
/// }
/// # Ok::<(), kak_plumb::ConfigError>(())
/// ```
pub fn run<W: Write>(config: &Config, input: String, out: &mut W) -> Result<RunResult, ConfigError> {
    let fragment = Fragment::new(input, config.cursor)?;
    let resolver = enter_working_dir(&config.working_dir)?;
    let rules = open_rules(&config.rule_file)?;

    log::debug!(
        "resolving {:?} (cursor byte {}) in {} with {}",
        fragment.text(),
        fragment.cursor(),
        resolver.base().display(),
        config.rule_file.display()
    );

    Evaluator::new(&fragment, &resolver).run(rules, out)
}

/// Read the whole fragment from `reader` (normally standard input).
///
/// The fragment must be UTF-8; anything else is a fatal `ReadInput` error.
pub fn read_input<R: Read>(mut reader: R) -> Result<String, ConfigError> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer).map_err(ConfigError::ReadInput)?;
    Ok(buffer)
}

/// Change the process working directory and return a resolver rooted there.
pub fn enter_working_dir(dir: &Path) -> Result<FsResolver, ConfigError> {
    let path = expand_path(dir);
    std::env::set_current_dir(&path).map_err(|source| ConfigError::WorkingDir { path: path.clone(), source })?;
    FsResolver::current_dir().map_err(|source| ConfigError::WorkingDir { path, source })
}

/// Open the rule file for streaming evaluation.
pub fn open_rules(path: &Path) -> Result<BufReader<File>, ConfigError> {
    let path = expand_path(path);
    let file = File::open(&path).map_err(|source| ConfigError::RuleFile { path, source })?;
    Ok(BufReader::new(file))
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(text) => PathBuf::from(expand_home(text)),
        None => path.to_path_buf(),
    }
}
