use apm_value::Value;
use pretty_assertions::assert_eq;

use crate::errors::PatternError;
use crate::test_helpers::ints;
use crate::{match_value, match_with, MatchOptions, Pattern};

fn mixed() -> Value {
    Value::list(vec![Value::int(1), Value::int(2), Value::string("uvw"), Value::int(4)])
}

fn pair() -> Pattern {
    Pattern::seq([Pattern::any() >> "a", Pattern::any() >> "b"])
}

#[test]
fn test_capture_lookup() {
    let result = match_value(&ints(&[1, 2]), &pair());
    assert!(result.is_match());
    assert_eq!(result.get("a"), Some(&Value::int(1)));
    assert_eq!(result.get("c"), None);
    assert!(result.contains("b"));
    assert!(!result.contains("c"));

    let fallback = Value::int(0);
    assert_eq!(result.get_or("c", &fallback), &fallback);
    assert_eq!(result.get_or("b", &fallback), &Value::int(2));

    assert_eq!(result.capture("a"), Ok(&Value::int(1)));
    assert_eq!(
        result.capture("c"),
        Err(PatternError::CaptureNotFound { name: "c".to_string() })
    );
}

#[test]
fn test_names_in_binding_order() {
    let p = Pattern::seq([Pattern::any() >> "z", Pattern::any() >> "a", Pattern::any() >> "z"]);
    let result = match_value(&ints(&[1, 2, 3]), &p);
    assert_eq!(result.names().collect::<Vec<_>>(), vec!["z", "a"]);
    assert_eq!(result.len(), 2);
    assert_eq!(
        result.iter().collect::<Vec<_>>(),
        vec![("z", &Value::int(3)), ("a", &Value::int(2))]
    );
}

#[test]
#[should_panic(expected = "no capture named \"missing\"")]
fn test_index_panics_on_missing_capture() {
    let result = match_value(&ints(&[1, 2]), &pair());
    let _ = &result["missing"];
}

#[test]
fn test_captures_readable_after_failure() {
    let p = Pattern::seq([Pattern::any() >> "a", Pattern::lit(9)]);
    let result = match_value(&ints(&[1, 2]), &p);
    assert!(!result.is_match());
    assert_eq!(result.get("a"), Some(&Value::int(1)));
}

#[test]
fn test_bool_conversion() {
    let hit = match_value(&Value::int(1), &Pattern::lit(1));
    let miss = match_value(&Value::int(1), &Pattern::lit(2));
    assert!(bool::from(&hit));
    assert!(!bool::from(miss));
}

#[test]
fn test_explain_success() {
    let result = match_value(&Value::int(1), &Pattern::lit(1));
    assert_eq!(result.explain(false), "1\n...matched the pattern:\n1");
}

#[test]
fn test_explain_failure() {
    let result = match_value(&mixed(), &Pattern::each(Pattern::is_number()));
    assert!(!result.is_match());
    assert_eq!(result.failure_path().len(), 2);
    assert_eq!(
        result.explain(false),
        "[1, 2, \"uvw\", 4]\n...did not match the pattern:\nEach(InstanceOf(number))\n\
         ...because:\n\"uvw\"\n...did not match the pattern:\nInstanceOf(number)"
    );
    assert_eq!(
        result.explain(true),
        "\"uvw\"\n...did not match the pattern:\nInstanceOf(number)"
    );
}

#[test]
fn test_explain_root_failure_is_short() {
    let result = match_value(&Value::int(1), &Pattern::lit(2));
    assert_eq!(result.failure_path().len(), 1);
    assert_eq!(result.explain(false), "1\n...did not match the pattern:\n2");
}

#[test]
fn test_failure_path_cleared_by_recovery() {
    let p = Pattern::one_of([Pattern::lit(2), Pattern::lit(1)]);
    let result = match_value(&Value::int(1), &p);
    assert!(result.is_match());
    assert!(result.failure_path().is_empty());
}

#[test]
fn test_failure_path_without_tracing() {
    let options = MatchOptions::new().with_trace(false);
    let result = match_with(&mixed(), &Pattern::each(Pattern::is_number()), options);
    assert!(!result.is_match());
    assert!(result.failure_path().is_empty());
    assert_eq!(
        result.explain(false),
        "[1, 2, \"uvw\", 4]\n...did not match the pattern:\nEach(InstanceOf(number))"
    );
}

#[test]
fn test_wildcard_matches() {
    let first = Pattern::wildcard();
    let second = Pattern::wildcard();
    let p = Pattern::seq([first, second, Pattern::any()]);
    let result = match_value(&ints(&[1, 2, 3]), &p);
    assert_eq!(result.wildcard_matches(), &[Value::int(1), Value::int(2)]);
}

#[test]
fn test_debug_output() {
    let result = match_value(&Value::int(1), &(Pattern::any() >> "x"));
    assert_eq!(
        format!("{result:?}"),
        "MatchResult { matches: true, groups: [(\"x\", Int(1))], .. }"
    );
}
