use super::*;
use pretty_assertions::assert_eq;

fn sample() -> MapValue {
    [
        (Value::string("b"), Value::int(2)),
        (Value::string("a"), Value::int(1)),
        (Value::int(3), Value::string("three")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_insertion_order_is_kept() {
    let keys: Vec<_> = sample().keys().cloned().collect();
    assert_eq!(
        keys,
        vec![Value::string("b"), Value::string("a"), Value::int(3)]
    );
}

#[test]
fn test_insert_replaces_in_place() {
    let mut map = sample();
    let previous = map.insert(Value::string("b"), Value::int(20));
    assert_eq!(previous, Some(Value::int(2)));
    assert_eq!(map.len(), 3);
    assert_eq!(map.entries()[0], (Value::string("b"), Value::int(20)));
}

#[test]
fn test_loose_lookup_finds_numeric_key() {
    let map = sample();
    assert_eq!(map.get(&Value::float(3.0)), None);
    assert_eq!(
        map.get_loose(&Value::float(3.0)),
        Some(&Value::string("three"))
    );
    assert!(map.contains_key(&Value::string("a")));
    assert!(!map.contains_key(&Value::string("z")));
}

#[test]
fn test_equality_ignores_order() {
    let reordered: MapValue = sample().entries().iter().rev().cloned().collect();
    assert_eq!(reordered, sample());
}
