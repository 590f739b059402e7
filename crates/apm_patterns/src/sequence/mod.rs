//! Sequence matching with quantified subsequences.
//!
//! Patterns are consumed left to right against a [`SequenceCursor`]. A plain
//! element takes exactly one item. A quantifier repeats its sub-pattern
//! tuple, each repetition tried on a fork of the cursor under a checkpoint
//! and committed only if the whole tuple matched.
//!
//! A reluctant quantifier stops as soon as the next item matches the pattern
//! that follows it (once its lower bound is met); a greedy one, or one with
//! nothing after it, repeats until its tuple no longer matches. Choices are
//! committed locally: a later failure does not reopen an earlier quantifier.

use apm_value::Value;
use smallvec::SmallVec;
use tracing::trace;

use crate::context::MatchContext;
use crate::cursor::SequenceCursor;
use crate::pattern::{Pattern, PatternKind, Quantifier};

/// Values matched by one repetition, one per tuple position.
type Repetition = SmallVec<[Value; 4]>;

/// The element a reluctant quantifier compares against to decide whether to
/// stop: the pattern itself, or the first sub-pattern of a following
/// quantifier.
fn stop_pattern(next: &Pattern) -> &Pattern {
    match next.as_quantifier() {
        Some((q, _)) => q.patterns().first().map_or(next, stop_pattern),
        None => next,
    }
}

fn repetition_value(values: Repetition) -> Value {
    if values.len() == 1 {
        values.into_iter().next().unwrap_or(Value::None)
    } else {
        Value::tuple(values.into_vec())
    }
}

impl MatchContext {
    /// Match every pattern in order; the value must have no items left over.
    pub(crate) fn match_sequence(&mut self, value: &Value, patterns: &[Pattern], strict: bool) -> bool {
        let Some(mut cursor) = SequenceCursor::new(value) else {
            return false;
        };
        if !self.match_run(&mut cursor, patterns, strict, None) {
            return false;
        }
        if cursor.is_exhausted() {
            true
        } else {
            trace!(position = cursor.position(), "items left over after sequence");
            self.fail_here();
            false
        }
    }

    /// Match `patterns` from the cursor's position, leaving the cursor after
    /// the last consumed item. Per-position values go to `out` when given.
    fn match_run(
        &mut self,
        cursor: &mut SequenceCursor,
        patterns: &[Pattern],
        strict: bool,
        mut out: Option<&mut Repetition>,
    ) -> bool {
        for (i, pattern) in patterns.iter().enumerate() {
            let next = patterns.get(i + 1);
            if let Some((quantifier, captures)) = pattern.as_quantifier() {
                let Some(reps) = self.match_quantifier(cursor, quantifier, next, strict) else {
                    return false;
                };
                let list = Value::list(reps);
                for capture in captures {
                    if let PatternKind::Capture {
                        name, aggregate, ..
                    } = capture.kind()
                    {
                        self.record(name, aggregate.as_ref(), list.clone());
                    }
                }
                if let Some(out) = out.as_deref_mut() {
                    out.push(list);
                }
                continue;
            }

            let Some(item) = cursor.next_item() else {
                trace!(position = cursor.position(), "sequence exhausted");
                self.fail_here();
                return false;
            };
            if !self.dispatch(&item, pattern, strict) {
                return false;
            }
            if let Some(out) = out.as_deref_mut() {
                out.push(item);
            }
        }
        true
    }

    /// Repeat the quantifier's tuple; returns the repetitions, or `None` when
    /// the lower bound is not reached.
    fn match_quantifier(
        &mut self,
        cursor: &mut SequenceCursor,
        quantifier: &Quantifier,
        next: Option<&Pattern>,
        strict: bool,
    ) -> Option<Vec<Value>> {
        let bounds = quantifier.bounds();
        let stop_at = if quantifier.is_greedy() {
            None
        } else {
            next.map(stop_pattern)
        };
        let mut reps: Vec<Value> = Vec::new();

        while bounds.ok_wrt_at_most(reps.len() + 1) {
            if let Some(stop) = stop_at {
                if bounds.ok_wrt_at_least(reps.len()) {
                    if let Some(item) = cursor.next_item() {
                        let stop_here = self.lookahead(&item, stop, strict);
                        cursor.rewind(1);
                        if stop_here {
                            trace!(count = reps.len(), %stop, "reluctant stop");
                            break;
                        }
                    }
                }
            }
            if cursor.is_exhausted() {
                break;
            }

            let mut fork = cursor.fork();
            let cp = self.checkpoint();
            let mut values = Repetition::new();
            if !self.match_run(&mut fork, quantifier.patterns(), strict, Some(&mut values)) {
                self.rollback(cp);
                trace!(count = reps.len(), "repetition failed");
                break;
            }
            self.commit(cp);
            let progressed = fork.position() > cursor.position();
            cursor.merge(&fork);
            reps.push(repetition_value(values));
            trace!(count = reps.len(), "repetition committed");
            if !progressed {
                // An empty repetition would repeat forever.
                break;
            }
        }

        if bounds.ok_wrt_at_least(reps.len()) {
            Some(reps)
        } else {
            trace!(count = reps.len(), %bounds, "quantifier below lower bound");
            self.fail_here();
            None
        }
    }
}
