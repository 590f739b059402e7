//! Value types, as used by `InstanceOf` and `SubclassOf` patterns.

use std::fmt;
use std::sync::Arc;

use crate::RecordType;

/// Runtime type of a value.
///
/// `Number` is abstract: no value has it as its concrete type, but `Int` and
/// `Float` are subtypes of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    None,
    Bool,
    Int,
    Float,
    Number,
    Str,
    List,
    Tuple,
    Set,
    Map,
    Range,
    Type,
    Record(Arc<RecordType>),
}

impl ValueType {
    /// Whether a value of type `self` is also an instance of `other`.
    pub fn is_subtype_of(&self, other: &ValueType) -> bool {
        match (self, other) {
            (ValueType::Int | ValueType::Float, ValueType::Number) => true,
            (ValueType::Record(a), ValueType::Record(b)) => a.is_subtype_of(b),
            _ => self == other,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ValueType::None => "none",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Number => "number",
            ValueType::Str => "str",
            ValueType::List => "list",
            ValueType::Tuple => "tuple",
            ValueType::Set => "set",
            ValueType::Map => "map",
            ValueType::Range => "range",
            ValueType::Type => "type",
            ValueType::Record(ty) => ty.name(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
