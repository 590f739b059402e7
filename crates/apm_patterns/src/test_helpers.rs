//! Shared helpers for unit tests.

use apm_value::Value;

use crate::{match_value, match_with, MatchOptions, MatchResult, Pattern};

pub fn ints(ns: &[i64]) -> Value {
    Value::list(ns.iter().copied().map(Value::int).collect())
}

pub fn lits(ns: &[i64]) -> Vec<Pattern> {
    ns.iter().copied().map(Pattern::lit).collect()
}

pub fn matches(value: &Value, pattern: &Pattern) -> bool {
    match_value(value, pattern).is_match()
}

pub fn strict_matches(value: &Value, pattern: &Pattern) -> bool {
    match_with(value, pattern, MatchOptions::new().with_strict(true)).is_match()
}

pub fn multimatch(value: &Value, pattern: &Pattern) -> MatchResult {
    match_with(value, pattern, MatchOptions::new().with_multimatch(true))
}
