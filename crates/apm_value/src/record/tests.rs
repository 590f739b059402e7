use super::*;
use pretty_assertions::assert_eq;

fn point() -> Arc<RecordType> {
    RecordType::new("Point", ["x", "y"])
}

#[test]
fn test_struct_get_field() {
    let p = StructValue::new(point(), vec![Value::int(1), Value::int(2)]);
    assert_eq!(p.get_field("x"), Some(&Value::int(1)));
    assert_eq!(p.get_field("y"), Some(&Value::int(2)));
    assert_eq!(p.get_field("z"), None);
}

#[test]
fn test_struct_pads_missing_fields() {
    let p = StructValue::new(point(), vec![Value::int(1)]);
    assert_eq!(p.values(), &[Value::int(1), Value::None]);
}

#[test]
fn test_struct_from_named() {
    let mut named = FxHashMap::default();
    named.insert("y".to_string(), Value::int(7));
    let p = StructValue::from_named(point(), named);
    assert_eq!(p.values(), &[Value::None, Value::int(7)]);
}

#[test]
fn test_derived_type_inherits_fields() {
    let base = point();
    let colored = RecordType::derived("ColoredPoint", &base, ["color"]);
    assert_eq!(colored.fields(), &["x", "y", "color"]);
    assert_eq!(colored.field_index("color"), Some(2));
    assert!(colored.is_subtype_of(&base));
    assert!(!base.is_subtype_of(&colored));
    assert!(base.is_subtype_of(&base));
}

#[test]
fn test_same_shape_different_name_is_not_subtype() {
    let record = RecordType::new("Record", ["foo", "bar"]);
    let user = RecordType::new("User", ["foo", "bar"]);
    assert!(!record.is_subtype_of(&user));
}

#[test]
fn test_struct_debug() {
    let p = StructValue::new(point(), vec![Value::int(1), Value::int(2)]);
    assert_eq!(format!("{p:?}"), "Point { x: Int(1), y: Int(2) }");
}
