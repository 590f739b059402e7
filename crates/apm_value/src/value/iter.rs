//! Owned iteration over iterable values.
//!
//! Each variant carries its source behind a `Heap<T>` plus a position, so an
//! iterator can outlive the borrow of the value it came from.

use super::Value;
use crate::{Heap, MapValue, RangeValue};

/// Iterator over the elements of a list, tuple, set, map, range or string.
#[derive(Clone, Debug)]
pub enum ValueIter {
    /// Elements of a list, tuple or set.
    Items { items: Heap<Vec<Value>>, pos: usize },
    /// Keys of a map, in insertion order.
    MapKeys { map: Heap<MapValue>, pos: usize },
    /// Integers of a range; `next` is `None` once exhausted.
    Range { next: Option<i64>, range: RangeValue },
    /// Characters of a string, each yielded as a one-character string.
    Chars { data: Heap<String>, byte_pos: usize },
}

impl ValueIter {
    pub fn from_items(items: Heap<Vec<Value>>) -> Self {
        ValueIter::Items { items, pos: 0 }
    }

    pub fn from_map(map: Heap<MapValue>) -> Self {
        ValueIter::MapKeys { map, pos: 0 }
    }

    pub fn from_range(range: RangeValue) -> Self {
        ValueIter::Range {
            next: range.iter().next(),
            range,
        }
    }

    pub fn from_string(data: Heap<String>) -> Self {
        ValueIter::Chars { data, byte_pos: 0 }
    }
}

impl Iterator for ValueIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            ValueIter::Items { items, pos } => {
                let item = items.get(*pos)?.clone();
                *pos += 1;
                Some(item)
            }
            ValueIter::MapKeys { map, pos } => {
                let (key, _) = map.entries().get(*pos)?;
                *pos += 1;
                Some(key.clone())
            }
            ValueIter::Range { next, range } => {
                let current = (*next)?;
                *next = current
                    .checked_add(range.step)
                    .filter(|&n| range.contains(n));
                Some(Value::Int(current))
            }
            ValueIter::Chars { data, byte_pos } => {
                let ch = data[*byte_pos..].chars().next()?;
                *byte_pos += ch.len_utf8();
                Some(Value::string(ch.to_string()))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ValueIter::Items { items, pos } => {
                let n = items.len().saturating_sub(*pos);
                (n, Some(n))
            }
            ValueIter::MapKeys { map, pos } => {
                let n = map.len().saturating_sub(*pos);
                (n, Some(n))
            }
            ValueIter::Range { .. } | ValueIter::Chars { .. } => (0, None),
        }
    }
}
