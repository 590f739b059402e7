//! Tagged records: named types with ordered fields.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Heap, Value};

/// Declaration of a record type.
///
/// Field order is the declaration order; object patterns bind positional
/// sub-patterns to fields in this order.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RecordType {
    name: String,
    fields: Vec<String>,
    parent: Option<Arc<RecordType>>,
}

impl RecordType {
    /// Declare a root record type.
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(RecordType {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            parent: None,
        })
    }

    /// Declare a record type deriving from `parent`.
    ///
    /// The subtype inherits the parent's fields, followed by its own.
    pub fn derived<I, S>(name: impl Into<String>, parent: &Arc<RecordType>, fields: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all_fields = parent.fields.clone();
        all_fields.extend(fields.into_iter().map(Into::into));
        Arc::new(RecordType {
            name: name.into(),
            fields: all_fields,
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn parent(&self) -> Option<&Arc<RecordType>> {
        self.parent.as_ref()
    }

    /// Index of a field by name.
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Whether `self` is `other` or derives from it.
    pub fn is_subtype_of(&self, other: &RecordType) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty == other {
                return true;
            }
            current = ty.parent.as_deref();
        }
        false
    }
}

/// Record instance.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StructValue {
    ty: Arc<RecordType>,
    /// Field values in the type's field order.
    fields: Heap<Vec<Value>>,
}

impl StructValue {
    /// Build an instance from field values given in declaration order.
    ///
    /// Missing trailing fields are filled with `Value::None`; surplus values
    /// are dropped.
    pub fn new(ty: Arc<RecordType>, mut values: Vec<Value>) -> Self {
        values.resize(ty.fields.len(), Value::None);
        StructValue {
            ty,
            fields: Heap::new(values),
        }
    }

    /// Build an instance from named field values.
    pub fn from_named(ty: Arc<RecordType>, mut named: FxHashMap<String, Value>) -> Self {
        let values = ty
            .fields
            .iter()
            .map(|f| named.remove(f).unwrap_or(Value::None))
            .collect();
        StructValue {
            ty,
            fields: Heap::new(values),
        }
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        &self.ty.name
    }

    /// Get a field value by name.
    pub fn get_field(&self, field: &str) -> Option<&Value> {
        self.fields.get(self.ty.field_index(field)?)
    }

    /// Field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.fields
    }

    /// `(field name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .fields
            .iter()
            .map(String::as_str)
            .zip(self.fields.iter())
    }
}

impl fmt::Debug for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.ty.name);
        for (name, value) in self.iter() {
            s.field(name, value);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests;
