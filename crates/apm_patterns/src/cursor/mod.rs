//! Forkable cursor over the elements of a sequence value.
//!
//! Lists, tuples and sets are indexed directly. Other iterables (ranges,
//! maps, strings) are pulled lazily into a memo buffer that every fork of the
//! cursor shares, so each element is produced at most once however often
//! speculative forks revisit it.

use std::cell::RefCell;
use std::rc::Rc;

use apm_value::{Heap, Value, ValueIter};

#[derive(Debug)]
struct Memo {
    buffer: Vec<Value>,
    /// `None` once the source is exhausted.
    source: Option<ValueIter>,
}

impl Memo {
    fn get(&mut self, index: usize) -> Option<Value> {
        while self.buffer.len() <= index {
            let next = self.source.as_mut().and_then(Iterator::next);
            match next {
                Some(v) => self.buffer.push(v),
                None => {
                    self.source = None;
                    return None;
                }
            }
        }
        self.buffer.get(index).cloned()
    }
}

#[derive(Clone, Debug)]
enum Source {
    Slice(Heap<Vec<Value>>),
    Lazy(Rc<RefCell<Memo>>),
}

/// Position in a sequence value.
///
/// Cloning is forking: the clone has its own position over the same
/// elements.
#[derive(Clone, Debug)]
pub(crate) struct SequenceCursor {
    source: Source,
    pos: usize,
}

impl SequenceCursor {
    /// Cursor at the start of `value`; `None` when it is not iterable.
    pub(crate) fn new(value: &Value) -> Option<Self> {
        let source = match value {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                Source::Slice(items.clone())
            }
            _ => Source::Lazy(Rc::new(RefCell::new(Memo {
                buffer: Vec::new(),
                source: Some(value.iter_items()?),
            }))),
        };
        Some(SequenceCursor { source, pos: 0 })
    }

    /// Element `offset` places ahead of the position, pulling it if needed.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<Value> {
        let index = self.pos.checked_add(offset)?;
        match &self.source {
            Source::Slice(items) => items.get(index).cloned(),
            Source::Lazy(memo) => memo.borrow_mut().get(index),
        }
    }

    pub(crate) fn peek(&self) -> Option<Value> {
        self.peek_at(0)
    }

    /// Take the element at the position and advance past it.
    pub(crate) fn next_item(&mut self) -> Option<Value> {
        let item = self.peek()?;
        self.pos += 1;
        Some(item)
    }

    /// Independent cursor at the same position.
    pub(crate) fn fork(&self) -> Self {
        self.clone()
    }

    /// Adopt the position of a fork.
    pub(crate) fn merge(&mut self, fork: &SequenceCursor) {
        self.pos = fork.pos;
    }

    /// Step back, stopping at the start.
    pub(crate) fn rewind(&mut self, steps: usize) {
        self.pos = self.pos.saturating_sub(steps);
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.peek().is_none()
    }
}
