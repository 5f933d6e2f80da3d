//! Compiled patterns for a single run.
//!
//! Rule files often repeat the same `matches` pattern across blocks; the
//! cache compiles each distinct pattern text once per evaluation. It is owned
//! by the evaluator and dropped with it.

use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: HashMap<String, Regex>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` (or reuse an earlier compilation).
    ///
    /// `line` is only used to report a compile error.
    pub fn get(&mut self, line: usize, pattern: &str) -> Result<&Regex, ConfigError> {
        if !self.compiled.contains_key(pattern) {
            let re = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern { line, source })?;
            self.compiled.insert(pattern.to_string(), re);
        }
        Ok(&self.compiled[pattern])
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_each_pattern_once() {
        let mut cache = PatternCache::new();
        assert!(cache.get(1, r"\w+").unwrap().is_match("abc"));
        assert!(cache.get(5, r"\w+").unwrap().is_match("def"));
        cache.get(6, r"\d+").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn reports_the_line_of_a_bad_pattern() {
        let mut cache = PatternCache::new();
        let err = cache.get(7, r"(unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { line: 7, .. }));
        assert!(cache.is_empty());
    }
}
