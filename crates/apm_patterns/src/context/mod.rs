//! The matching context and the pattern dispatch.
//!
//! One `MatchContext` lives for one top-level match. It owns the captures,
//! the multimatch policy and the failure trace; strictness is threaded
//! through the dispatch as a parameter so that it covers exactly the subtree
//! below a `Strict` node.
//!
//! Speculative evaluation (alternatives, quantifier repetitions, mapping
//! entries) runs between [`MatchContext::checkpoint`] and either `commit` or
//! `rollback`; see [`captures`] for how that avoids copying state.

mod captures;
mod trace;

use std::sync::Arc;

use apm_value::Value;

use crate::aggregate::Aggregation;
use crate::options::MatchOptions;
use crate::pattern::{Pattern, PatternKind, WildcardId};
use crate::result::MatchResult;

pub use captures::CaptureSlot;
pub(crate) use captures::Checkpoint;
pub use trace::Frame;

use captures::Bindings;
use trace::Trace;

/// Per-match mutable state.
#[derive(Debug)]
pub struct MatchContext {
    bindings: Bindings,
    multimatch: bool,
    trace: Option<Trace>,
}

impl MatchContext {
    pub(crate) fn new(options: MatchOptions) -> Self {
        MatchContext {
            bindings: Bindings::default(),
            multimatch: options.multimatch,
            trace: options.trace.then(Trace::default),
        }
    }

    /// Match a sub-value non-strictly.
    pub fn match_value(&mut self, value: &Value, pattern: &Pattern) -> bool {
        self.dispatch(value, pattern, false)
    }

    /// Match a sub-value; `strict` applies to the whole subtree.
    pub fn match_strict(&mut self, value: &Value, pattern: &Pattern, strict: bool) -> bool {
        self.dispatch(value, pattern, strict)
    }

    /// Record `value` under `name`, following the multimatch policy.
    pub fn capture(&mut self, name: &str, value: Value) {
        self.bindings.capture(name, value, self.multimatch);
    }

    /// Current contents of a capture.
    pub fn captured(&self, name: &str) -> Option<&CaptureSlot> {
        self.bindings.get(name)
    }

    pub fn is_multimatch(&self) -> bool {
        self.multimatch
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.bindings.checkpoint()
    }

    pub(crate) fn commit(&mut self, cp: Checkpoint) {
        self.bindings.commit(cp);
    }

    pub(crate) fn rollback(&mut self, cp: Checkpoint) {
        self.bindings.rollback(cp);
    }

    /// Run `f` without recording failures.
    pub(crate) fn quietly<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if let Some(trace) = self.trace.as_mut() {
            trace.suspend();
        }
        let out = f(self);
        if let Some(trace) = self.trace.as_mut() {
            trace.resume();
        }
        out
    }

    /// Off-the-record test: no captures survive and no failure is recorded.
    pub(crate) fn lookahead(&mut self, value: &Value, pattern: &Pattern, strict: bool) -> bool {
        let cp = self.checkpoint();
        let matched = self.quietly(|ctx| ctx.dispatch(value, pattern, strict));
        self.rollback(cp);
        matched
    }

    /// Mark the innermost active frame as the cause of failure.
    pub(crate) fn fail_here(&mut self) {
        if let Some(trace) = self.trace.as_mut() {
            trace.fail_here();
        }
    }

    pub(crate) fn record(
        &mut self,
        name: &str,
        aggregate: Option<&Arc<dyn Aggregation>>,
        value: Value,
    ) {
        match aggregate {
            Some(agg) => self.bindings.aggregate(name, agg, &value),
            None => self.capture(name, value),
        }
    }

    pub(crate) fn bind_wildcard(&mut self, id: WildcardId, value: Value) {
        self.bindings.bind_wildcard(id, value);
    }

    pub(crate) fn into_result(self, matched: bool, value: Value, pattern: Pattern) -> MatchResult {
        let (captures, wildcards) = self.bindings.into_parts();
        let failure = match (matched, self.trace) {
            (false, Some(trace)) => trace.into_failure(),
            _ => Vec::new(),
        };
        MatchResult::new(matched, value, pattern, captures, wildcards, failure)
    }

    /// Match `value` against `pattern`, tracing the step.
    pub(crate) fn dispatch(&mut self, value: &Value, pattern: &Pattern, strict: bool) -> bool {
        let entered = self.trace.as_mut().map(|t| t.enter(value, pattern));
        let matched = self.dispatch_kind(value, pattern, strict);
        if let (Some(trace), Some(entered_at)) = (self.trace.as_mut(), entered) {
            trace.exit(entered_at, matched);
        }
        matched
    }

    fn dispatch_kind(&mut self, value: &Value, pattern: &Pattern, strict: bool) -> bool {
        match pattern.kind() {
            PatternKind::Any => true,
            PatternKind::Wildcard(id) => {
                self.bind_wildcard(*id, value.clone());
                true
            }
            PatternKind::Literal(lit) => self.match_literal(value, lit, strict),
            // A quantifier outside a sequence is the sequence `[q]`.
            PatternKind::Quantified(_) => {
                self.match_list(value, std::slice::from_ref(pattern), strict)
            }
            PatternKind::Capture { .. } if pattern.as_quantifier().is_some() => {
                self.match_list(value, std::slice::from_ref(pattern), strict)
            }
            PatternKind::Capture {
                inner,
                name,
                aggregate,
            } => {
                if !self.dispatch(value, inner, strict) {
                    return false;
                }
                self.record(name, aggregate.as_ref(), value.clone());
                true
            }
            PatternKind::AllOf(patterns) => patterns.iter().all(|p| self.dispatch(value, p, strict)),
            PatternKind::OneOf(patterns) => patterns.iter().any(|p| {
                let cp = self.checkpoint();
                if self.dispatch(value, p, strict) {
                    self.commit(cp);
                    true
                } else {
                    self.rollback(cp);
                    false
                }
            }),
            PatternKind::Either(left, right) => self.match_either(value, left, right, strict),
            PatternKind::Not(inner) => {
                let cp = self.checkpoint();
                let matched = self.dispatch(value, inner, false);
                self.rollback(cp);
                !matched
            }
            PatternKind::Strict(inner) => self.dispatch(value, inner, true),
            PatternKind::Sequence(items) => self.match_list(value, items, strict),
            PatternKind::Tuple(items) => {
                if strict && !matches!(value, Value::Tuple(_)) {
                    return false;
                }
                self.match_sequence(value, items, strict)
            }
            PatternKind::Mapping(mapping) => self.match_mapping(value, mapping, strict),
            PatternKind::Range(range) => self.match_range(value, range, strict),
            PatternKind::Object(object) => self.match_object(value, object, strict),
            PatternKind::Check(_)
            | PatternKind::InstanceOf(_)
            | PatternKind::SubclassOf(_)
            | PatternKind::Between(_)
            | PatternKind::Length(_)
            | PatternKind::Contains(_)
            | PatternKind::Regex(_)
            | PatternKind::Transformed { .. }
            | PatternKind::At { .. }
            | PatternKind::EachItem { .. }
            | PatternKind::Each { .. }
            | PatternKind::Truish
            | PatternKind::Custom(_) => self.match_leaf(value, pattern, strict),
        }
    }

    /// Sequence pattern; strictness demands a list value.
    fn match_list(&mut self, value: &Value, items: &[Pattern], strict: bool) -> bool {
        if strict && !matches!(value, Value::List(_)) {
            return false;
        }
        self.match_sequence(value, items, strict)
    }

    /// Both sides are evaluated; captures are kept only from the side that
    /// matched, and only when exactly one did.
    fn match_either(&mut self, value: &Value, left: &Pattern, right: &Pattern, strict: bool) -> bool {
        let cp = self.checkpoint();
        if self.dispatch(value, left, strict) {
            let right_cp = self.checkpoint();
            let right_matched = self.dispatch(value, right, strict);
            self.rollback(right_cp);
            if right_matched {
                self.rollback(cp);
                false
            } else {
                self.commit(cp);
                true
            }
        } else {
            self.rollback(cp);
            let cp = self.checkpoint();
            if self.dispatch(value, right, strict) {
                self.commit(cp);
                true
            } else {
                self.rollback(cp);
                false
            }
        }
    }

    /// Equality, or a field-wise match when both sides are records.
    pub(crate) fn match_literal(&mut self, value: &Value, lit: &Value, strict: bool) -> bool {
        if let (Value::Struct(v), Value::Struct(p)) = (value, lit) {
            return self.match_record_literal(v, p, strict);
        }
        if strict {
            value == lit && value.same_type(lit)
        } else {
            value.loose_eq(lit)
        }
    }
}

#[cfg(test)]
mod tests;
