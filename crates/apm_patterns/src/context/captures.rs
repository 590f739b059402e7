//! Capture bookkeeping with checkpoint and rollback.
//!
//! Writes made while a checkpoint is open are recorded in an undo log.
//! Rolling back replays the log backwards to the checkpoint; committing the
//! outermost checkpoint drops the log. No capture map is ever copied.

use std::sync::Arc;

use apm_value::Value;
use rustc_hash::FxHashMap;

use crate::aggregate::Aggregation;
use crate::pattern::WildcardId;

/// Contents of a named capture.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureSlot {
    Single(Value),
    /// Accumulated writes under multimatch, in encounter order.
    Multi(Vec<Value>),
}

impl CaptureSlot {
    /// The slot as a single value; accumulated writes become a list.
    pub fn into_value(self) -> Value {
        match self {
            CaptureSlot::Single(v) => v,
            CaptureSlot::Multi(vs) => Value::list(vs),
        }
    }
}

/// Inverse of one write.
#[derive(Debug)]
enum Undo {
    /// A new name was appended.
    Inserted,
    /// The slot at `index` held `previous`.
    Replaced { index: usize, previous: CaptureSlot },
    /// A value was pushed onto the multi slot at `index`.
    Appended { index: usize },
    /// A new wildcard slot was appended.
    WildcardInserted,
    /// The wildcard slot at `index` held `previous`.
    WildcardReplaced { index: usize, previous: Value },
}

/// Position in the undo log to roll back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoint(usize);

/// Named captures and wildcard slots, in first-write order.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
    captures: Vec<(String, CaptureSlot)>,
    capture_index: FxHashMap<String, usize>,
    wildcards: Vec<(WildcardId, Value)>,
    wildcard_index: FxHashMap<WildcardId, usize>,
    undo: Vec<Undo>,
    open_checkpoints: usize,
}

impl Bindings {
    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.open_checkpoints += 1;
        Checkpoint(self.undo.len())
    }

    /// Undo every write made since `cp` and close it.
    pub(crate) fn rollback(&mut self, cp: Checkpoint) {
        while self.undo.len() > cp.0 {
            if let Some(undo) = self.undo.pop() {
                self.revert(undo);
            }
        }
        self.close();
    }

    /// Keep every write made since `cp` and close it.
    ///
    /// The log survives until the outermost checkpoint commits, so an
    /// enclosing rollback still undoes these writes.
    pub(crate) fn commit(&mut self, _cp: Checkpoint) {
        self.close();
        if self.open_checkpoints == 0 {
            self.undo.clear();
        }
    }

    fn close(&mut self) {
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
    }

    fn log(&mut self, undo: Undo) {
        if self.open_checkpoints > 0 {
            self.undo.push(undo);
        }
    }

    fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::Inserted => {
                if let Some((name, _)) = self.captures.pop() {
                    self.capture_index.remove(&name);
                }
            }
            Undo::Replaced { index, previous } => {
                if let Some((_, slot)) = self.captures.get_mut(index) {
                    *slot = previous;
                }
            }
            Undo::Appended { index } => {
                if let Some((_, CaptureSlot::Multi(values))) = self.captures.get_mut(index) {
                    values.pop();
                }
            }
            Undo::WildcardInserted => {
                if let Some((id, _)) = self.wildcards.pop() {
                    self.wildcard_index.remove(&id);
                }
            }
            Undo::WildcardReplaced { index, previous } => {
                if let Some((_, slot)) = self.wildcards.get_mut(index) {
                    *slot = previous;
                }
            }
        }
    }

    fn insert(&mut self, name: &str, slot: CaptureSlot) {
        self.capture_index.insert(name.to_string(), self.captures.len());
        self.captures.push((name.to_string(), slot));
        self.log(Undo::Inserted);
    }

    fn replace(&mut self, index: usize, slot: CaptureSlot) {
        if let Some((_, current)) = self.captures.get_mut(index) {
            let previous = std::mem::replace(current, slot);
            self.log(Undo::Replaced { index, previous });
        }
    }

    /// Record `value` under `name`.
    ///
    /// Without multimatch the latest write wins. With multimatch every write,
    /// the first included, is appended to the name's list.
    pub(crate) fn capture(&mut self, name: &str, value: Value, multimatch: bool) {
        let Some(&index) = self.capture_index.get(name) else {
            let slot = if multimatch {
                CaptureSlot::Multi(vec![value])
            } else {
                CaptureSlot::Single(value)
            };
            self.insert(name, slot);
            return;
        };
        if !multimatch {
            self.replace(index, CaptureSlot::Single(value));
            return;
        }
        let appended = match self.captures.get_mut(index) {
            Some((_, CaptureSlot::Multi(values))) => {
                values.push(value.clone());
                true
            }
            _ => false,
        };
        if appended {
            self.log(Undo::Appended { index });
        } else if let Some((_, CaptureSlot::Single(first))) = self.captures.get(index) {
            // an aggregate or a custom write left a single value behind
            let list = CaptureSlot::Multi(vec![first.clone(), value]);
            self.replace(index, list);
        }
    }

    /// Fold `value` into the aggregate under `name`.
    pub(crate) fn aggregate(&mut self, name: &str, agg: &Arc<dyn Aggregation>, value: &Value) {
        match self.capture_index.get(name).copied() {
            Some(index) => {
                let current = match self.captures.get(index) {
                    Some((_, slot)) => slot.clone().into_value(),
                    None => agg.empty(),
                };
                self.replace(index, CaptureSlot::Single(agg.add(current, value)));
            }
            None => {
                let folded = agg.add(agg.empty(), value);
                self.insert(name, CaptureSlot::Single(folded));
            }
        }
    }

    /// Bind a wildcard slot; a rebind keeps the slot's original position.
    pub(crate) fn bind_wildcard(&mut self, id: WildcardId, value: Value) {
        if let Some(&index) = self.wildcard_index.get(&id) {
            if let Some((_, slot)) = self.wildcards.get_mut(index) {
                let previous = std::mem::replace(slot, value);
                self.log(Undo::WildcardReplaced { index, previous });
            }
            return;
        }
        self.wildcard_index.insert(id, self.wildcards.len());
        self.wildcards.push((id, value));
        self.log(Undo::WildcardInserted);
    }

    pub(crate) fn get(&self, name: &str) -> Option<&CaptureSlot> {
        let index = *self.capture_index.get(name)?;
        self.captures.get(index).map(|(_, slot)| slot)
    }

    /// Captures in first-write order, with wildcard values in first-bind order.
    pub(crate) fn into_parts(self) -> (Vec<(String, Value)>, Vec<Value>) {
        let captures = self
            .captures
            .into_iter()
            .map(|(name, slot)| (name, slot.into_value()))
            .collect();
        let wildcards = self.wildcards.into_iter().map(|(_, v)| v).collect();
        (captures, wildcards)
    }
}
