//! Rule evaluation.
//!
//! The rule file is consumed as a stream, one line at a time, and never
//! rewound:
//!
//! ```text
//!            ┌──────────── blank line / EOF ─────────────┐
//!            v                                           │
//! block start ─▶ statement ─ ok ─▶ statement ─ ok ─▶ … ──┴─▶ rule succeeded (stop)
//!   │                │                  │
//!   │                └──── failure ─────┴─▶ discard up to an empty line ─▶ block start
//!   │
//!   ├─ blank line ─▶ empty rule succeeded (stop, silent)
//!   └─ EOF ────────▶ exhausted (stop, silent)
//! ```
//!
//! A blank line (empty or whitespace only) ends a running block. A block
//! being discarded after a failure only ends at a line that is truly empty,
//! so whitespace-only lines inside it are discarded too. A blank line where a
//! block should start is an empty rule, and an empty rule has no statement
//! that can fail.
//!
//! Lines are parsed only when they are about to run, so a malformed line in a
//! block that is skipped (or never reached) is not an error.

use super::metrics::{Outcome, RuleAttempt, RunMetrics, RunResult};
use super::patterns::PatternCache;
use super::state::{Fragment, MatchState};
use super::statement::{Executor, Statement};
use crate::error::{ConfigError, StatementError};
use crate::path::PathResolver;
use std::io::{BufRead, Lines, Write};
use std::time::Instant;

/// Runs rule blocks against one fragment until one succeeds.
#[derive(Debug)]
pub struct Evaluator<'a, R> {
    fragment: &'a Fragment,
    resolver: &'a R,
    patterns: PatternCache,
}

impl<'a, R: PathResolver> Evaluator<'a, R> {
    pub fn new(fragment: &'a Fragment, resolver: &'a R) -> Self {
        Self { fragment, resolver, patterns: PatternCache::new() }
    }

    /// Evaluate `rules` in order, writing `echo` output to `out` as it happens.
    ///
    /// Returns `Outcome::Exhausted` (not an error) when no rule succeeds.
    pub fn run<B: BufRead, W: Write>(&mut self, rules: B, out: &mut W) -> Result<RunResult, ConfigError> {
        let start = Instant::now();
        let mut stream = RuleStream::new(rules);
        let mut attempts = Vec::new();

        let outcome = loop {
            let Some((line, text)) = stream.next_line()? else {
                break Outcome::Exhausted;
            };
            if is_blank(&text) {
                log::debug!("empty rule at line {line} ends evaluation");
                break Outcome::EmptyRule { line };
            }

            let attempt = self.attempt(line, &text, &mut stream, out)?;
            let succeeded = attempt.failure.is_none();
            attempts.push(attempt);

            if succeeded {
                log::debug!("rule at line {line} succeeded");
                break Outcome::Matched { line };
            }
        };

        if outcome == Outcome::Exhausted {
            log::debug!("no rule matched after {} attempts", attempts.len());
        }

        let metrics = RunMetrics { total: start.elapsed(), attempts, patterns_compiled: self.patterns.len() };
        Ok(RunResult { outcome, metrics })
    }

    /// Run one block whose first statement is `(line, text)`.
    fn attempt<B: BufRead, W: Write>(
        &mut self,
        line: usize,
        text: &str,
        stream: &mut RuleStream<B>,
        out: &mut W,
    ) -> Result<RuleAttempt, ConfigError> {
        let mut state = MatchState::new(self.fragment);
        let mut executor = Executor { resolver: self.resolver, patterns: &mut self.patterns, out };
        let mut executed = 0;
        let mut current = Some((line, text.to_string()));

        while let Some((number, text)) = current {
            let statement = Statement::parse(number, &text)?;
            executed += 1;

            match executor.execute(number, &statement, &mut state) {
                Ok(()) => log::debug!("line {number}: {} ok", statement.verb()),
                Err(StatementError::Config(err)) => return Err(err),
                Err(StatementError::Failed(failure)) => {
                    log::debug!("line {number}: {} failed: {failure}", statement.verb());
                    stream.skip_block()?;
                    return Ok(RuleAttempt { line, executed, failure: Some(failure) });
                }
            }

            current = stream.next_in_block()?;
        }

        Ok(RuleAttempt { line, executed, failure: None })
    }
}

/// Line-numbered view of the rule file.
struct RuleStream<B> {
    lines: Lines<B>,
    number: usize,
}

impl<B: BufRead> RuleStream<B> {
    fn new(rules: B) -> Self {
        Self { lines: rules.lines(), number: 0 }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>, ConfigError> {
        match self.lines.next() {
            None => Ok(None),
            Some(Err(err)) => Err(ConfigError::ReadRules(err)),
            Some(Ok(text)) => {
                self.number += 1;
                Ok(Some((self.number, text)))
            }
        }
    }

    /// Next line of the current block, or `None` at a blank line or EOF.
    fn next_in_block(&mut self) -> Result<Option<(usize, String)>, ConfigError> {
        Ok(self.next_line()?.filter(|(_, text)| !is_blank(text)))
    }

    /// Discard the rest of the current block, up to and including the next
    /// empty line. Whitespace-only lines do not stop the discard.
    fn skip_block(&mut self) -> Result<(), ConfigError> {
        while let Some((_, text)) = self.next_line()? {
            if text.is_empty() {
                break;
            }
        }
        Ok(())
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
