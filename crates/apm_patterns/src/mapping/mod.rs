//! Mapping matching.
//!
//! Literal keys are looked up first; a missing key fails the match. Pattern
//! keys then run over the entries no literal key consumed:
//!
//! - `Any` and wildcard keys are existential: the first entry whose value
//!   matches is consumed, and the match fails if there is none.
//! - Any other key pattern is universal: every entry whose key matches must
//!   also match the value pattern, otherwise the entry is a mismatch.
//!
//! Unconsumed entries are matched against the remainder pattern if there is
//! one, and are rejected under strictness.

use apm_value::{MapValue, Value};
use smallvec::SmallVec;
use tracing::trace;

use crate::context::MatchContext;
use crate::pattern::{MapKey, MappingPattern, Pattern, PatternKind};

/// One flag per entry of the value.
type EntryFlags = SmallVec<[bool; 16]>;

fn is_existential(key: &Pattern) -> bool {
    matches!(key.kind(), PatternKind::Any | PatternKind::Wildcard(_))
}

fn lookup(map: &MapValue, key: &Value, strict: bool) -> Option<usize> {
    if strict {
        map.entries().iter().position(|(k, _)| k == key)
    } else {
        map.position_loose(key)
    }
}

impl MatchContext {
    pub(crate) fn match_mapping(&mut self, value: &Value, pattern: &MappingPattern, strict: bool) -> bool {
        let Some(map) = value.as_map() else {
            return false;
        };
        let entries = map.entries();
        let mut consumed: EntryFlags = SmallVec::from_elem(false, entries.len());
        let mut mismatched: EntryFlags = SmallVec::from_elem(false, entries.len());

        for (key, value_pattern) in pattern.entries() {
            let MapKey::Literal(key) = key else {
                continue;
            };
            let Some(index) = lookup(map, key, strict) else {
                trace!(%key, "mapping key missing");
                self.fail_here();
                return false;
            };
            if !self.dispatch(&entries[index].1, value_pattern, strict) {
                return false;
            }
            consumed[index] = true;
        }

        for (key, value_pattern) in pattern.entries() {
            let MapKey::Pattern(key_pattern) = key else {
                continue;
            };
            if is_existential(key_pattern) {
                let found = self.match_some_entry(entries, &consumed, key_pattern, value_pattern, strict);
                let Some(index) = found else {
                    trace!(%value_pattern, "no entry satisfies wildcard key");
                    self.fail_here();
                    return false;
                };
                consumed[index] = true;
                mismatched[index] = false;
                continue;
            }
            for (index, (k, v)) in entries.iter().enumerate() {
                if consumed[index] {
                    continue;
                }
                let cp = self.checkpoint();
                if !self.quietly(|ctx| ctx.dispatch(k, key_pattern, strict)) {
                    self.rollback(cp);
                    continue;
                }
                if self.dispatch(v, value_pattern, strict) {
                    self.commit(cp);
                    consumed[index] = true;
                } else {
                    self.rollback(cp);
                    trace!(key = %k, "entry value mismatch");
                    mismatched[index] = true;
                }
            }
        }

        if mismatched.iter().any(|&m| m) {
            return false;
        }

        if let Some(rest) = pattern.rest() {
            let remainder: MapValue = entries
                .iter()
                .zip(consumed.iter())
                .filter(|(_, &used)| !used)
                .map(|(entry, _)| entry.clone())
                .collect();
            if !self.dispatch(&Value::map(remainder), rest, strict) {
                return false;
            }
            consumed.iter_mut().for_each(|used| *used = true);
        }

        if strict && consumed.iter().any(|&used| !used) {
            trace!("strict mapping has unmatched entries");
            self.fail_here();
            return false;
        }
        true
    }

    /// First unconsumed entry matching both patterns; its captures are kept.
    fn match_some_entry(
        &mut self,
        entries: &[(Value, Value)],
        consumed: &EntryFlags,
        key_pattern: &Pattern,
        value_pattern: &Pattern,
        strict: bool,
    ) -> Option<usize> {
        for (index, (k, v)) in entries.iter().enumerate() {
            if consumed[index] {
                continue;
            }
            let cp = self.checkpoint();
            let matched = self.quietly(|ctx| {
                ctx.dispatch(k, key_pattern, strict) && ctx.dispatch(v, value_pattern, strict)
            });
            if matched {
                self.commit(cp);
                return Some(index);
            }
            self.rollback(cp);
        }
        None
    }
}
