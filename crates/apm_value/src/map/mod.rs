//! Insertion-ordered mapping with arbitrary value keys.

use rustc_hash::FxHashMap;

use crate::Value;

/// Mapping value.
///
/// Entries keep their insertion order, which is the order mapping patterns
/// visit them in. Keys are indexed by strict equality; [`MapValue::get_loose`]
/// falls back to a scan so that `1` finds a `1.0` key.
#[derive(Clone, Debug, Default)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
    index: FxHashMap<Value, usize>,
}

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing the value of an existing equal key in place.
    ///
    /// Returns the previous value for the key, if any.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Strict key lookup.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Position of the entry whose key loosely equals `key`.
    pub fn position_loose(&self, key: &Value) -> Option<usize> {
        if let Some(&i) = self.index.get(key) {
            return Some(i);
        }
        self.entries.iter().position(|(k, _)| k.loose_eq(key))
    }

    /// Lookup treating numerically equal keys as the same key.
    pub fn get_loose(&self, key: &Value) -> Option<&Value> {
        self.position_loose(key).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.position_loose(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = MapValue::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for MapValue {}

#[cfg(test)]
mod tests;
