//! Per-rule match state.
//!
//! A [`MatchState`] is created fresh for every rule attempt and threaded by
//! exclusive reference through each statement of that rule. The first
//! `matches` narrows `target` to the match under the cursor; later ones must
//! consume the narrowed target whole.
//!
//! ```text
//! full_target: "see src/main.rs:12 for details"
//!                   ^ cursor
//! matches \S+:\d+      -> target = "src/main.rs:12", groups rebased to 0
//! matches (.+):(\d+)   -> anchored: must span 0..len(target)
//! ```

use crate::error::{ConfigError, RuleFailure};
use regex::{Captures, Regex};

/// The text being resolved and the cursor inside it. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    cursor: usize,
}

impl Fragment {
    /// Build a fragment from raw input and a character-count cursor.
    ///
    /// Empty input is rejected: there is nothing to plumb.
    pub fn new(text: impl Into<String>, cursor_chars: i64) -> Result<Self, ConfigError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ConfigError::EmptyInput);
        }
        let cursor = crate::cursor::byte_offset(&text, cursor_chars);
        Ok(Self { text, cursor })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor as a byte offset into [`Fragment::text`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Byte span of a capture group, relative to the current target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

#[derive(Debug, Clone)]
pub struct MatchState<'f> {
    full_target: &'f str,
    target: &'f str,
    cursor: usize,
    /// One entry per capture group (group 0 first); `None` if the group did
    /// not participate. Offsets are relative to `target`.
    groups: Vec<Option<Span>>,
    pub(crate) file: String,
    pub(crate) dir: String,
    pub(crate) path: String,
    first_match_done: bool,
}

impl<'f> MatchState<'f> {
    pub fn new(fragment: &'f Fragment) -> Self {
        Self {
            full_target: fragment.text(),
            target: fragment.text(),
            cursor: fragment.cursor(),
            groups: Vec::new(),
            file: String::new(),
            dir: String::new(),
            path: String::new(),
            first_match_done: false,
        }
    }

    /// Apply a `matches` statement.
    ///
    /// The first call in a rule selects the leftmost match whose span contains
    /// the cursor (both ends inclusive) and narrows `target` to it. Every later
    /// call must match `target` from offset 0 to its end.
    pub fn apply_match(&mut self, re: &Regex) -> Result<(), RuleFailure> {
        if self.first_match_done {
            return self.match_anchored(re);
        }

        let target = self.target;
        for caps in re.captures_iter(target) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if self.cursor < whole.start() || whole.end() < self.cursor {
                continue;
            }

            self.groups = spans(&caps, whole.start());
            self.target = &target[whole.range()];
            self.first_match_done = true;
            return Ok(());
        }

        Err(RuleFailure::NoMatchUnderCursor)
    }

    fn match_anchored(&mut self, re: &Regex) -> Result<(), RuleFailure> {
        self.groups = re.captures(self.target).map(|caps| spans(&caps, 0)).unwrap_or_default();

        match self.groups.first() {
            Some(Some(whole)) if whole.start == 0 && whole.end == self.target.len() => Ok(()),
            _ => Err(RuleFailure::NotAnchored),
        }
    }

    /// Text of capture group `n` in the current target, if it participated.
    pub fn group(&self, n: usize) -> Option<&'f str> {
        let span = (*self.groups.get(n)?)?;
        self.target.get(span.start..span.end)
    }

    pub fn groups(&self) -> &[Option<Span>] {
        &self.groups
    }

    pub fn full_target(&self) -> &'f str {
        self.full_target
    }

    pub fn target(&self) -> &'f str {
        self.target
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn first_match_done(&self) -> bool {
        self.first_match_done
    }
}

fn spans(caps: &Captures<'_>, shift: usize) -> Vec<Option<Span>> {
    caps.iter().map(|m| m.map(|m| Span { start: m.start() - shift, end: m.end() - shift })).collect()
}
