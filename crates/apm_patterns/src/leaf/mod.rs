//! Leaf patterns, ranges and records.

use std::cmp::Ordering;
use std::panic::{catch_unwind, AssertUnwindSafe};

use apm_value::{RangeValue, StructValue, Value};
use tracing::trace;

use crate::context::MatchContext;
use crate::pattern::{BetweenPattern, ObjectPattern, Pattern, PatternKind, RegexPattern};

/// One step of an `At` path: map key, list index (negative from the end) or
/// record field.
fn step(value: &Value, key: &Value) -> Option<Value> {
    match (value, key) {
        (Value::Map(map), _) => map.get_loose(key).cloned(),
        (Value::List(items) | Value::Tuple(items), Value::Int(i)) => {
            let len = i64::try_from(items.len()).ok()?;
            let index = if *i < 0 { len.checked_add(*i)? } else { *i };
            items.get(usize::try_from(index).ok()?).cloned()
        }
        (Value::Struct(s), Value::Str(field)) => s.get_field(field).cloned(),
        _ => None,
    }
}

/// Run a user closure; a panic inside it is reported like an `Err`.
fn call_user<T>(f: impl FnOnce() -> Result<T, String>) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panicked".to_string());
        Err(reason)
    })
}

fn within(value: &Value, between: &BetweenPattern) -> bool {
    let lower = match value.loose_cmp(&between.lo) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => !between.lo_exclusive,
        _ => false,
    };
    let upper = match value.loose_cmp(&between.hi) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => !between.hi_exclusive,
        _ => false,
    };
    lower && upper
}

impl MatchContext {
    pub(crate) fn match_leaf(&mut self, value: &Value, pattern: &Pattern, strict: bool) -> bool {
        match pattern.kind() {
            PatternKind::Check(predicate) => match call_user(|| predicate(value)) {
                Ok(matched) => matched,
                Err(reason) => {
                    trace!(%reason, "check failed");
                    false
                }
            },
            PatternKind::InstanceOf(types) => {
                let ty = value.value_type();
                types.iter().any(|t| ty.is_subtype_of(t))
            }
            PatternKind::SubclassOf(types) => match value {
                Value::Type(ty) => types.iter().any(|t| ty.is_subtype_of(t)),
                _ => false,
            },
            PatternKind::Between(between) => within(value, between),
            PatternKind::Length(bounds) => value.len().is_some_and(|n| bounds.contains(n)),
            PatternKind::Contains(needle) => value.contains(needle),
            PatternKind::Regex(regex) => self.match_regex(value, regex),
            PatternKind::Transformed { func, inner } => match call_user(|| func(value)) {
                Ok(transformed) => self.dispatch(&transformed, inner, strict),
                Err(reason) => {
                    trace!(%reason, "transform failed");
                    false
                }
            },
            PatternKind::At { path, inner } => {
                let mut current = value.clone();
                for key in path {
                    match step(&current, key) {
                        Some(next) => current = next,
                        None => return false,
                    }
                }
                self.dispatch(&current, inner, strict)
            }
            PatternKind::EachItem { key, value: value_pattern } => {
                let Some(map) = value.as_map() else {
                    return false;
                };
                map.iter().all(|(k, v)| {
                    self.dispatch(k, key, strict) && self.dispatch(v, value_pattern, strict)
                })
            }
            PatternKind::Each { inner, at_least } => {
                let Some(items) = value.iter_items() else {
                    return false;
                };
                let mut count = 0usize;
                for item in items {
                    if !self.dispatch(&item, inner, strict) {
                        return false;
                    }
                    count += 1;
                }
                count >= *at_least
            }
            PatternKind::Truish => value.is_truthy(),
            PatternKind::Custom(custom) => custom.match_value(value, self, strict),
            _ => false,
        }
    }

    fn match_regex(&mut self, value: &Value, regex: &RegexPattern) -> bool {
        let Some(text) = value.as_str() else {
            return false;
        };
        if !regex.binds_groups() {
            return regex.regex().is_match(text);
        }
        let Some(groups) = regex.regex().captures(text) else {
            return false;
        };
        for name in regex.regex().capture_names().flatten() {
            let group = groups
                .name(name)
                .map_or(Value::None, |m| Value::string(m.as_str()));
            self.capture(name, group);
        }
        true
    }

    /// A range pattern is the sequence of its integers.
    pub(crate) fn match_range(&mut self, value: &Value, range: &RangeValue, strict: bool) -> bool {
        if strict && !matches!(value, Value::List(_) | Value::Range(_)) {
            return false;
        }
        let Some(mut items) = value.iter_items() else {
            return false;
        };
        let mut expected = range.iter();
        loop {
            match (items.next(), expected.next()) {
                (None, None) => return true,
                (Some(item), Some(n)) => {
                    if !self.match_literal(&item, &Value::int(n), strict) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    pub(crate) fn match_object(&mut self, value: &Value, object: &ObjectPattern, strict: bool) -> bool {
        let Value::Struct(record) = value else {
            return false;
        };
        let fields = match object.record_type() {
            Some(ty) => {
                if !record.record_type().is_subtype_of(ty) {
                    trace!(expected = ty.name(), actual = record.type_name(), "record type mismatch");
                    return false;
                }
                ty.fields()
            }
            None => record.record_type().fields(),
        };
        if object.positional().len() > fields.len() {
            return false;
        }
        for (field, pattern) in fields.iter().zip(object.positional()) {
            let Some(field_value) = record.get_field(field) else {
                return false;
            };
            if !self.dispatch(field_value, pattern, strict) {
                return false;
            }
        }
        for (field, pattern) in object.named() {
            let Some(field_value) = record.get_field(field) else {
                return false;
            };
            if !self.dispatch(field_value, pattern, strict) {
                return false;
            }
        }
        true
    }

    /// A record literal matches a record of its type (or a subtype) whose
    /// fields match the literal's fields. Strictness rejects subtypes with
    /// extra fields.
    pub(crate) fn match_record_literal(&mut self, value: &StructValue, lit: &StructValue, strict: bool) -> bool {
        if !value.record_type().is_subtype_of(lit.record_type()) {
            return false;
        }
        if strict && value.values().len() != lit.values().len() {
            return false;
        }
        for (field, expected) in lit.iter() {
            let Some(actual) = value.get_field(field) else {
                return false;
            };
            if !self.dispatch(actual, &Pattern::lit(expected.clone()), strict) {
                return false;
            }
        }
        true
    }
}
