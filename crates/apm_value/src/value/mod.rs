//! Runtime values matched by the pattern engine.
//!
//! # Heap Enforcement
//!
//! Heap payloads are created only through the `Value::` factory methods;
//! `Heap::new` is crate-private.
//!
//! ```text
//! let s = Value::string("hello");                 // OK
//! let xs = Value::list(vec![Value::int(1)]);      // OK
//! let s = Value::Str(Heap::new("hello".into()));  // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Equality
//!
//! `PartialEq` and `Hash` are strict: `Int(1) != Float(1.0)`. Floats follow
//! IEEE equality except that NaN equals NaN, so every value can be a map key.
//! Non-strict matching goes through [`Value::loose_eq`], which compares numbers by value.

mod iter;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::{Heap, MapValue, RangeValue, StructValue, ValueType};

pub use iter::ValueIter;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Absence of a value.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),

    // Heap Types
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    /// Fixed-arity tuple.
    Tuple(Heap<Vec<Value>>),
    /// Unordered collection without duplicates.
    Set(Heap<Vec<Value>>),
    Map(Heap<MapValue>),

    // Composite Types
    Range(RangeValue),
    /// Tagged record instance.
    Struct(StructValue),
    /// A type used as a value.
    Type(ValueType),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    /// Create a set value; duplicates are dropped, first occurrence wins.
    pub fn set(items: Vec<Value>) -> Self {
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(Heap::new(unique))
    }

    #[inline]
    pub fn map(map: MapValue) -> Self {
        Value::Map(Heap::new(map))
    }

    /// Create a map value from `(key, value)` pairs.
    pub fn map_from<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        Value::map(entries.into_iter().collect())
    }

    #[inline]
    pub fn range(range: RangeValue) -> Self {
        Value::Range(range)
    }

    #[inline]
    pub fn record(record: StructValue) -> Self {
        Value::Struct(record)
    }

    #[inline]
    pub fn ty(ty: ValueType) -> Self {
        Value::Type(ty)
    }
}

// Value Methods

impl Value {
    /// Concrete runtime type.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::None => ValueType::None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Tuple(_) => ValueType::Tuple,
            Value::Set(_) => ValueType::Set,
            Value::Map(_) => ValueType::Map,
            Value::Range(_) => ValueType::Range,
            Value::Struct(s) => ValueType::Record(s.record_type().clone()),
            Value::Type(_) => ValueType::Type,
        }
    }

    /// Get the type name for diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Struct(s) => s.type_name(),
            _ => match self.value_type() {
                ValueType::None => "none",
                ValueType::Bool => "bool",
                ValueType::Int => "int",
                ValueType::Float => "float",
                ValueType::Str => "str",
                ValueType::List => "list",
                ValueType::Tuple => "tuple",
                ValueType::Set => "set",
                ValueType::Map => "map",
                ValueType::Range => "range",
                _ => "type",
            },
        }
    }

    /// Whether both values are of the same concrete kind.
    pub fn same_type(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Struct(a), Value::Struct(b)) => a.record_type() == b.record_type(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }

    /// Check if this value is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Range(r) => !r.is_empty(),
            Value::Struct(_) | Value::Type(_) => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "numeric comparison of mixed int/float values follows f64 semantics"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Backing storage of lists, tuples and sets.
    pub fn as_items(&self) -> Option<&Heap<Vec<Value>>> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Number of elements of a sized value.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            Value::Range(r) => Some(r.len()),
            _ => None,
        }
    }

    /// Iterate the elements of an iterable value.
    ///
    /// Maps yield their keys, strings yield one-character strings.
    pub fn iter_items(&self) -> Option<ValueIter> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                Some(ValueIter::from_items(items.clone()))
            }
            Value::Map(map) => Some(ValueIter::from_map(map.clone())),
            Value::Range(r) => Some(ValueIter::from_range(*r)),
            Value::Str(s) => Some(ValueIter::from_string(s.clone())),
            _ => None,
        }
    }

    /// Whether `needle` is an element (or key, or substring) of this value.
    pub fn contains(&self, needle: &Value) -> bool {
        match (self, needle) {
            (Value::Str(hay), Value::Str(n)) => hay.contains(n.as_str()),
            (Value::List(items) | Value::Tuple(items) | Value::Set(items), _) => {
                items.iter().any(|item| item.loose_eq(needle))
            }
            (Value::Map(map), _) => map.contains_key(needle),
            (Value::Range(r), Value::Int(n)) => r.contains(*n),
            _ => false,
        }
    }

    /// Non-strict equality: numbers compare by value across `Int`/`Float`,
    /// recursively through containers.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => {
                self.as_float() == other.as_float()
            }
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.loose_eq(y))
            }
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.loose_eq(y)))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, v)| b.get_loose(k).is_some_and(|bv| v.loose_eq(bv)))
            }
            (Value::Struct(a), Value::Struct(b)) => {
                a.record_type() == b.record_type()
                    && a.values()
                        .iter()
                        .zip(b.values().iter())
                        .all(|(x, y)| x.loose_eq(y))
            }
            _ => self == other,
        }
    }

    /// Partial order over numbers, strings and booleans.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_float()?.partial_cmp(&other.as_float()?)
            }
            (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

// Conversions

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<RangeValue> for Value {
    fn from(r: RangeValue) -> Self {
        Value::Range(r)
    }
}

impl From<StructValue> for Value {
    fn from(s: StructValue) -> Self {
        Value::Struct(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items.into_iter().map(Into::into).collect())
    }
}

// Trait Implementations

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                write_seq(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Set(items) => {
                write!(f, "{{")?;
                write_seq(f, items)?;
                write!(f, "}}")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Range(r) => write!(f, "{r}"),
            Value::Struct(s) => {
                write!(f, "{}(", s.type_name())?;
                for (i, (name, value)) in s.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                write!(f, ")")
            }
            Value::Type(ty) => write!(f, "<type {ty}>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n:?})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::List(items) => write!(f, "List({:?})", &***items),
            Value::Tuple(items) => write!(f, "Tuple({:?})", &***items),
            Value::Set(items) => write!(f, "Set({:?})", &***items),
            Value::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Value::Range(r) => write!(f, "Range({r})"),
            Value::Struct(s) => write!(f, "{s:?}"),
            Value::Type(ty) => write!(f, "Type({ty})"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.contains(x))
            }
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Value::None => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(f) => float_bits(*f).hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(items) | Value::Tuple(items) => items.hash(state),
            Value::Set(items) => {
                // Order-independent, like equality.
                items.len().hash(state);
                unordered_hash(items.iter()).hash(state);
            }
            Value::Map(map) => {
                map.len().hash(state);
                unordered_hash(map.iter()).hash(state);
            }
            Value::Range(r) => r.hash(state),
            Value::Struct(s) => s.hash(state),
            Value::Type(ty) => ty.hash(state),
        }
    }
}

/// Bits of `f` with `-0.0` folded into `0.0` and every NaN into one NaN,
/// matching the float equality above.
fn float_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}

/// Combine element hashes so that the result does not depend on order.
fn unordered_hash<T: Hash>(items: impl Iterator<Item = T>) -> u64 {
    items
        .map(|item| {
            let mut hasher = FxHasher::default();
            item.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add)
}
