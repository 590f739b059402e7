use super::*;
use pretty_assertions::assert_eq;

fn fold(agg: &dyn Aggregation, values: &[Value]) -> Value {
    values
        .iter()
        .fold(agg.empty(), |acc, v| agg.add(acc, v))
}

#[test]
fn test_set_keeps_first_occurrences() {
    let out = fold(
        &SetAgg,
        &[Value::string("foo"), Value::string("bar"), Value::string("foo")],
    );
    assert_eq!(out, Value::set(vec![Value::string("foo"), Value::string("bar")]));
}

#[test]
fn test_list_keeps_order_and_duplicates() {
    let out = fold(&ListAgg, &[Value::int(1), Value::int(1), Value::int(2)]);
    assert_eq!(out, Value::list(vec![Value::int(1), Value::int(1), Value::int(2)]));
}

#[test]
fn test_count() {
    assert_eq!(fold(&CountAgg, &[]), Value::int(0));
    assert_eq!(
        fold(&CountAgg, &[Value::None, Value::string("x"), Value::int(3)]),
        Value::int(3)
    );
}

#[test]
fn test_histogram() {
    let letters: Vec<Value> = "abcbdcaaca".chars().map(|c| Value::string(c.to_string())).collect();
    let out = fold(&HistogramAgg, &letters);
    let expected = Value::map_from([
        (Value::string("a"), Value::int(4)),
        (Value::string("b"), Value::int(2)),
        (Value::string("c"), Value::int(3)),
        (Value::string("d"), Value::int(1)),
    ]);
    assert_eq!(out, expected);
}

#[test]
fn test_sum_of_ints_stays_int() {
    let values: Vec<Value> = (1..10).map(Value::int).collect();
    assert_eq!(fold(&SumAgg, &values), Value::int(45));
}

#[test]
fn test_sum_parses_numeric_strings() {
    let out = fold(&SumAgg, &[Value::string("1"), Value::string("10.3")]);
    assert_eq!(out, Value::float(11.3));
}

#[test]
fn test_sum_ignores_non_numeric() {
    let out = fold(&SumAgg, &[Value::int(2), Value::string("abc"), Value::None]);
    assert_eq!(out, Value::int(2));
}

#[test]
fn test_names() {
    assert_eq!(set().name(), "Set");
    assert_eq!(list().name(), "List");
    assert_eq!(count().name(), "Count");
    assert_eq!(histogram().name(), "Histogram");
    assert_eq!(sum().name(), "Sum");
}
