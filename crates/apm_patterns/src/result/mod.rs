//! The outcome of a match: captures plus failure diagnostics.

use std::fmt;
use std::ops::Index;

use apm_value::Value;
use rustc_hash::FxHashMap;

use crate::context::Frame;
use crate::errors::{capture_not_found, PatternResult};
use crate::pattern::Pattern;

/// Result of matching a value against a pattern.
///
/// Captures are readable whether or not the match succeeded; after a failed
/// match they hold whatever was bound before the failure.
pub struct MatchResult {
    matched: bool,
    value: Value,
    pattern: Pattern,
    captures: Vec<(String, Value)>,
    index: FxHashMap<String, usize>,
    wildcards: Vec<Value>,
    failure: Vec<Frame>,
}

impl MatchResult {
    pub(crate) fn new(
        matched: bool,
        value: Value,
        pattern: Pattern,
        captures: Vec<(String, Value)>,
        wildcards: Vec<Value>,
        failure: Vec<Frame>,
    ) -> Self {
        let index = captures
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        MatchResult {
            matched,
            value,
            pattern,
            captures,
            index,
            wildcards,
            failure,
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let i = *self.index.get(name)?;
        self.captures.get(i).map(|(_, v)| v)
    }

    /// The capture, or `default` when it was not bound.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.get(name).unwrap_or(default)
    }

    /// The capture, or `CaptureNotFound`.
    pub fn capture(&self, name: &str) -> PatternResult<&Value> {
        self.get(name).ok_or_else(|| capture_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Capture names in first-bound order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, value)` pairs in first-bound order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.captures.iter().map(|(name, v)| (name.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Values bound by anonymous wildcards, in the order the wildcards were
    /// first bound.
    pub fn wildcard_matches(&self) -> &[Value] {
        &self.wildcards
    }

    /// Path from the root to the sub-match that caused the failure.
    ///
    /// Empty for successful matches and when tracing was disabled.
    pub fn failure_path(&self) -> &[Frame] {
        &self.failure
    }

    /// Human-readable account of the outcome.
    ///
    /// For a failure this names the whole value and pattern and then the
    /// innermost value and pattern that did not match; `short` keeps only
    /// the latter.
    pub fn explain(&self, short: bool) -> String {
        if self.matched {
            return format!("{}\n...matched the pattern:\n{}", self.value, self.pattern);
        }
        let (leaf_value, leaf_pattern) = match self.failure.last() {
            Some((v, p)) => (v, p),
            None => (&self.value, &self.pattern),
        };
        let leaf = format!("{leaf_value}\n...did not match the pattern:\n{leaf_pattern}");
        if short || self.failure.len() <= 1 {
            return leaf;
        }
        format!(
            "{}\n...did not match the pattern:\n{}\n...because:\n{leaf}",
            self.value, self.pattern
        )
    }
}

impl From<&MatchResult> for bool {
    fn from(result: &MatchResult) -> bool {
        result.matched
    }
}

impl From<MatchResult> for bool {
    fn from(result: MatchResult) -> bool {
        result.matched
    }
}

impl Index<&str> for MatchResult {
    type Output = Value;

    /// # Panics
    ///
    /// When no capture named `name` was bound.
    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(v) => v,
            None => panic!("{}", capture_not_found(name)),
        }
    }
}

impl fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("matches", &self.matched)
            .field("groups", &self.captures)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
