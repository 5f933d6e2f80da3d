//! Rule statements: parsing one line into a [`Statement`] and executing it.
//!
//! ```text
//! line     := verb (" " argument)?
//! verb     := matches | echo | isfile | isdir | isexist | isnotexist
//! argument := rest of the line, verbatim
//! ```

use super::patterns::PatternCache;
use super::state::MatchState;
use super::template;
use crate::error::{ConfigError, RuleFailure, StatementError};
use crate::path::PathResolver;
use std::fmt;
use std::io::{self, Write};

/// Which property a predicate verb checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// `isfile`: exists and is not a directory.
    File,
    /// `isdir`: exists and is a directory.
    Dir,
    /// `isexist`: exists, of any type.
    Exist,
    /// `isnotexist`: does not exist.
    NotExist,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathKind::File => "a file",
            PathKind::Dir => "a directory",
            PathKind::Exist => "existing",
            PathKind::NotExist => "absent",
        })
    }
}

/// One parsed rule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Matches(String),
    Echo(String),
    IsFile(String),
    IsDir(String),
    IsExist(String),
    IsNotExist(String),
}

impl Statement {
    /// Parse a non-blank rule line. `line` is the 1-based line number, used
    /// for diagnostics.
    pub fn parse(line: usize, text: &str) -> Result<Self, ConfigError> {
        let Some(caps) = crate::regex!(r"^\s*(\w+)(?: (.*))?$").captures(text) else {
            return Err(ConfigError::MalformedLine { line, text: text.to_string() });
        };
        let verb = caps.get(1).map_or("", |m| m.as_str());
        let argument = caps.get(2).map_or("", |m| m.as_str());

        let required = |verb: &'static str| -> Result<String, ConfigError> {
            if argument.is_empty() {
                Err(ConfigError::MissingArgument { line, verb })
            } else {
                Ok(argument.to_string())
            }
        };

        Ok(match verb {
            "matches" => Statement::Matches(required("matches")?),
            "echo" => Statement::Echo(argument.to_string()),
            "isfile" => Statement::IsFile(required("isfile")?),
            "isdir" => Statement::IsDir(required("isdir")?),
            "isexist" => Statement::IsExist(required("isexist")?),
            "isnotexist" => Statement::IsNotExist(required("isnotexist")?),
            _ => return Err(ConfigError::MalformedLine { line, text: text.to_string() }),
        })
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Statement::Matches(_) => "matches",
            Statement::Echo(_) => "echo",
            Statement::IsFile(_) => "isfile",
            Statement::IsDir(_) => "isdir",
            Statement::IsExist(_) => "isexist",
            Statement::IsNotExist(_) => "isnotexist",
        }
    }

    pub fn argument(&self) -> &str {
        match self {
            Statement::Matches(arg)
            | Statement::Echo(arg)
            | Statement::IsFile(arg)
            | Statement::IsDir(arg)
            | Statement::IsExist(arg)
            | Statement::IsNotExist(arg) => arg,
        }
    }
}

/// Everything a statement needs besides the match state.
pub(crate) struct Executor<'a, R, W> {
    pub resolver: &'a R,
    pub patterns: &'a mut PatternCache,
    pub out: &'a mut W,
}

impl<R: PathResolver, W: Write> Executor<'_, R, W> {
    /// Run `statement` against `state`.
    ///
    /// `echo` writes (and flushes) immediately, so its output stands even if a
    /// later statement of the same rule fails.
    pub fn execute(
        &mut self,
        line: usize,
        statement: &Statement,
        state: &mut MatchState<'_>,
    ) -> Result<(), StatementError> {
        match statement {
            Statement::Matches(pattern) => {
                let re = self.patterns.get(line, pattern)?;
                state.apply_match(re)?;
            }
            Statement::Echo(tmpl) => {
                let text = template::format(tmpl, state);
                echo(self.out, &text).map_err(ConfigError::Output)?;
            }
            Statement::IsFile(tmpl) => check_path(self.resolver, state, tmpl, PathKind::File)?,
            Statement::IsDir(tmpl) => check_path(self.resolver, state, tmpl, PathKind::Dir)?,
            Statement::IsExist(tmpl) => check_path(self.resolver, state, tmpl, PathKind::Exist)?,
            Statement::IsNotExist(tmpl) => check_path(self.resolver, state, tmpl, PathKind::NotExist)?,
        }
        Ok(())
    }
}

fn echo<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "{text}")?;
    out.flush()
}

/// Shared procedure of the predicate verbs.
///
/// The resolved absolute path lands in `state.path` before the check, whether
/// or not the check passes. `file`/`dir` are only updated on success.
pub fn check_path<R: PathResolver>(
    resolver: &R,
    state: &mut MatchState<'_>,
    tmpl: &str,
    kind: PathKind,
) -> Result<(), RuleFailure> {
    let rendered = resolver.expand_home(&template::format(tmpl, state));
    let path = resolver.absolute(&rendered).map_err(|err| {
        log::warn!("could not determine the path of {tmpl:?}: {err}");
        RuleFailure::Resolve { template: tmpl.to_string(), message: err.to_string() }
    })?;
    state.path = path.to_string_lossy().into_owned();

    let metadata = match resolver.metadata(&path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return if kind == PathKind::NotExist { Ok(()) } else { Err(predicate_failed(kind, state)) };
        }
        Err(err) => {
            log::warn!("could not examine path {}: {err}", path.display());
            return Err(RuleFailure::Stat { path: state.path.clone(), message: err.to_string() });
        }
    };

    match kind {
        PathKind::NotExist => Err(predicate_failed(kind, state)),
        PathKind::Exist => Ok(()),
        PathKind::Dir if metadata.is_dir() => {
            state.dir = state.path.clone();
            Ok(())
        }
        PathKind::File if !metadata.is_dir() => {
            state.file = state.path.clone();
            Ok(())
        }
        PathKind::Dir | PathKind::File => Err(predicate_failed(kind, state)),
    }
}

fn predicate_failed(kind: PathKind, state: &MatchState<'_>) -> RuleFailure {
    RuleFailure::Predicate { kind, path: state.path.clone() }
}
