//! Aggregating captures.
//!
//! A capture bound to an [`Aggregation`] folds every matched value into a
//! running aggregate instead of overwriting (or appending to) the capture.

use std::fmt;
use std::sync::Arc;

use apm_value::{MapValue, Value};

/// Fold applied to every value recorded by an aggregating capture.
pub trait Aggregation: Send + Sync {
    /// Initial aggregate, used on the first write to a capture.
    fn empty(&self) -> Value;

    /// Fold `value` into `aggregate`.
    fn add(&self, aggregate: Value, value: &Value) -> Value;

    /// Short name shown when a pattern is displayed.
    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distinct matched values, in first-seen order.
#[derive(Clone, Copy, Debug, Default)]
pub struct SetAgg;

impl Aggregation for SetAgg {
    fn empty(&self) -> Value {
        Value::set(Vec::new())
    }

    fn add(&self, aggregate: Value, value: &Value) -> Value {
        let mut items = aggregate.as_items().map(|i| i.to_vec()).unwrap_or_default();
        items.push(value.clone());
        Value::set(items)
    }

    fn name(&self) -> &'static str {
        "Set"
    }
}

/// Every matched value, in match order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListAgg;

impl Aggregation for ListAgg {
    fn empty(&self) -> Value {
        Value::list(Vec::new())
    }

    fn add(&self, aggregate: Value, value: &Value) -> Value {
        let mut items = aggregate.as_list().map(<[Value]>::to_vec).unwrap_or_default();
        items.push(value.clone());
        Value::list(items)
    }

    fn name(&self) -> &'static str {
        "List"
    }
}

/// Number of matched values.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountAgg;

impl Aggregation for CountAgg {
    fn empty(&self) -> Value {
        Value::int(0)
    }

    fn add(&self, aggregate: Value, _value: &Value) -> Value {
        Value::int(aggregate.as_int().unwrap_or(0).saturating_add(1))
    }

    fn name(&self) -> &'static str {
        "Count"
    }
}

/// Map from matched value to the number of times it was matched.
#[derive(Clone, Copy, Debug, Default)]
pub struct HistogramAgg;

impl Aggregation for HistogramAgg {
    fn empty(&self) -> Value {
        Value::map(MapValue::new())
    }

    fn add(&self, aggregate: Value, value: &Value) -> Value {
        let mut map = aggregate.as_map().cloned().unwrap_or_default();
        let count = map.get(value).and_then(Value::as_int).unwrap_or(0);
        map.insert(value.clone(), Value::int(count.saturating_add(1)));
        Value::map(map)
    }

    fn name(&self) -> &'static str {
        "Histogram"
    }
}

/// Numeric sum of matched values.
///
/// Strings are parsed as integers first, then as floats; values that are
/// neither numbers nor numeric strings leave the sum unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SumAgg;

impl SumAgg {
    fn numeric(value: &Value) -> Option<Value> {
        match value {
            Value::Int(_) | Value::Float(_) => Some(value.clone()),
            Value::Str(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .map(Value::int)
                    .or_else(|_| s.parse::<f64>().map(Value::float))
                    .ok()
            }
            _ => None,
        }
    }
}

impl Aggregation for SumAgg {
    fn empty(&self) -> Value {
        Value::int(0)
    }

    fn add(&self, aggregate: Value, value: &Value) -> Value {
        let Some(addend) = Self::numeric(value) else {
            return aggregate;
        };
        if let (Value::Int(a), Value::Int(b)) = (&aggregate, &addend) {
            if let Some(sum) = a.checked_add(*b) {
                return Value::int(sum);
            }
        }
        match (aggregate.as_float(), addend.as_float()) {
            (Some(a), Some(b)) => Value::float(a + b),
            _ => aggregate,
        }
    }

    fn name(&self) -> &'static str {
        "Sum"
    }
}

/// Shared handles for the built-in aggregations.
pub fn set() -> Arc<dyn Aggregation> {
    Arc::new(SetAgg)
}

pub fn list() -> Arc<dyn Aggregation> {
    Arc::new(ListAgg)
}

pub fn count() -> Arc<dyn Aggregation> {
    Arc::new(CountAgg)
}

pub fn histogram() -> Arc<dyn Aggregation> {
    Arc::new(HistogramAgg)
}

pub fn sum() -> Arc<dyn Aggregation> {
    Arc::new(SumAgg)
}

#[cfg(test)]
mod tests;
