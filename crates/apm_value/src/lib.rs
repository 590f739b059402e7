//! APM Value - runtime value model for the apm pattern-matching engine.
//!
//! This crate provides:
//! - `Value`, a closed tagged union of scalars, sequences, mappings, ranges,
//!   tagged records and types
//! - `Heap<T>`, the shared payload wrapper behind every heap-backed value
//! - `RecordType`/`StructValue` for tagged records with single inheritance
//! - `ValueType`, the type lattice used by instance and subclass checks
//!
//! The matching engine lives in `apm_patterns`; nothing here knows about
//! patterns.

mod heap;
mod map;
mod range;
mod record;
mod types;
mod value;

pub use heap::Heap;
pub use map::MapValue;
pub use range::RangeValue;
pub use record::{RecordType, StructValue};
pub use types::ValueType;
pub use value::{Value, ValueIter};
