use super::*;
use crate::aggregate;
use crate::test_helpers::{ints, matches, multimatch};
use crate::{match_value, Bounds};
use pretty_assertions::assert_eq;

fn ctx(multimatch: bool) -> MatchContext {
    MatchContext::new(MatchOptions::new().with_multimatch(multimatch))
}

#[test]
fn test_rollback_undoes_writes_since_checkpoint() {
    let mut ctx = ctx(false);
    ctx.capture("a", Value::int(1));
    let cp = ctx.checkpoint();
    ctx.capture("a", Value::int(2));
    ctx.capture("b", Value::int(3));
    ctx.rollback(cp);
    assert_eq!(ctx.captured("a"), Some(&CaptureSlot::Single(Value::int(1))));
    assert_eq!(ctx.captured("b"), None);
}

#[test]
fn test_inner_commit_is_undone_by_outer_rollback() {
    let mut ctx = ctx(false);
    let outer = ctx.checkpoint();
    let inner = ctx.checkpoint();
    ctx.capture("x", Value::int(1));
    ctx.commit(inner);
    assert!(ctx.captured("x").is_some());
    ctx.rollback(outer);
    assert!(ctx.captured("x").is_none());
}

#[test]
fn test_multimatch_first_write_is_a_list() {
    let mut ctx = ctx(true);
    ctx.capture("x", Value::int(1));
    assert_eq!(ctx.captured("x"), Some(&CaptureSlot::Multi(vec![Value::int(1)])));
    ctx.capture("x", Value::int(2));
    ctx.capture("x", Value::int(3));
    assert_eq!(
        ctx.captured("x"),
        Some(&CaptureSlot::Multi(vec![Value::int(1), Value::int(2), Value::int(3)]))
    );
}

#[test]
fn test_multimatch_rollback_restores_each_step() {
    let mut ctx = ctx(true);
    ctx.capture("x", Value::int(1));
    let cp = ctx.checkpoint();
    ctx.capture("x", Value::int(2));
    ctx.capture("x", Value::int(3));
    ctx.rollback(cp);
    assert_eq!(ctx.captured("x"), Some(&CaptureSlot::Multi(vec![Value::int(1)])));
}

#[test]
fn test_multimatch_rollback_removes_first_write() {
    let mut ctx = ctx(true);
    let cp = ctx.checkpoint();
    ctx.capture("x", Value::int(1));
    ctx.rollback(cp);
    assert_eq!(ctx.captured("x"), None);
}

#[test]
fn test_capture_records_on_success_only() {
    let p = Pattern::lit(1) >> "one";
    let result = match_value(&Value::int(1), &p);
    assert!(result.is_match());
    assert_eq!(result.get("one"), Some(&Value::int(1)));

    let result = match_value(&Value::int(2), &p);
    assert!(!result.is_match());
    assert_eq!(result.get("one"), None);
}

#[test]
fn test_latest_write_wins_without_multimatch() {
    let p = Pattern::seq([Pattern::wildcard() >> "x", Pattern::wildcard() >> "x"]);
    let result = match_value(&ints(&[1, 2]), &p);
    assert_eq!(result.get("x"), Some(&Value::int(2)));
}

#[test]
fn test_multimatch_accumulates_in_encounter_order() {
    let p = Pattern::seq([
        Pattern::wildcard() >> "x",
        Pattern::any(),
        Pattern::wildcard() >> "x",
    ]);
    let result = multimatch(&ints(&[1, 2, 3]), &p);
    assert_eq!(result.get("x"), Some(&ints(&[1, 3])));
}

#[test]
fn test_multimatch_single_write_reads_back_as_list() {
    let p = Pattern::seq([Pattern::some([Pattern::any() >> "x"], Bounds::UNBOUNDED)]);
    let result = multimatch(&ints(&[7]), &p);
    assert!(result.is_match());
    assert_eq!(result.get("x"), Some(&ints(&[7])));
}

#[test]
fn test_multimatch_keeps_one_list_apart_from_two_scalars() {
    let p = Pattern::seq([Pattern::some([Pattern::any() >> "x"], Bounds::UNBOUNDED)]);
    let nested = Value::list(vec![ints(&[1, 2])]);
    let flat = ints(&[1, 2]);
    let from_nested = multimatch(&nested, &p);
    let from_flat = multimatch(&flat, &p);
    assert_eq!(from_nested.get("x"), Some(&nested));
    assert_eq!(from_flat.get("x"), Some(&flat));
    assert_ne!(from_nested.get("x"), from_flat.get("x"));
}

#[test]
fn test_wildcard_slots_keep_first_seen_order() {
    let a = Pattern::wildcard();
    let b = Pattern::wildcard();
    let p = Pattern::seq([b.clone(), a.clone(), b]);
    let result = match_value(&ints(&[1, 2, 3]), &p);
    assert!(result.is_match());
    // `b` was seen first and rebound to 3 without moving
    assert_eq!(result.wildcard_matches(), &[Value::int(3), Value::int(2)]);
}

#[test]
fn test_any_never_captures() {
    let result = match_value(&ints(&[1, 2]), &Pattern::seq([Pattern::any(), Pattern::any()]));
    assert!(result.is_match());
    assert!(result.is_empty());
    assert!(result.wildcard_matches().is_empty());
}

#[test]
fn test_one_of_keeps_only_winning_branch_captures() {
    let p = Pattern::one_of([
        Pattern::seq([Pattern::wildcard() >> "a", Pattern::lit(9)]),
        Pattern::seq([Pattern::wildcard() >> "b", Pattern::any()]),
    ]);
    let result = match_value(&ints(&[1, 2]), &p);
    assert!(result.is_match());
    assert_eq!(result.get("a"), None);
    assert_eq!(result.get("b"), Some(&Value::int(1)));
}

#[test]
fn test_all_of_collects_every_capture() {
    let p = (Pattern::is_number() >> "n") & (Pattern::between(0, 10) >> "small");
    let result = match_value(&Value::int(4), &p);
    assert!(result.is_match());
    assert_eq!(result.len(), 2);
}

#[test]
fn test_not_never_captures() {
    let p = Pattern::not(Pattern::lit(1) >> "x");
    assert!(!matches(&Value::int(1), &p));
    let result = match_value(&Value::int(2), &p);
    assert!(result.is_match());
    assert!(result.get("x").is_none());
}

#[test]
fn test_not_ignores_ambient_strictness() {
    // 1.0 is not strictly 1, but Not evaluates its operand loosely
    let p = Pattern::strict(Pattern::not(Pattern::lit(1)));
    assert!(!matches(&Value::float(1.0), &p));
}

#[test]
fn test_either_is_exclusive_or() {
    let p = Pattern::either(Pattern::is_number(), Pattern::between(0, 10));
    assert!(!matches(&Value::int(5), &p));
    assert!(matches(&Value::int(50), &p));
    assert!(!matches(&Value::string("x"), &p));
}

#[test]
fn test_either_keeps_captures_of_matching_side_only() {
    // Both sides are evaluated; the side that failed leaves nothing behind,
    // even where it bound a capture before failing.
    let left = Pattern::seq([Pattern::wildcard() >> "l", Pattern::lit(0)]);
    let right = Pattern::seq([Pattern::wildcard() >> "r", Pattern::any()]);
    let result = match_value(&ints(&[1, 2]), &Pattern::either(left, right));
    assert!(result.is_match());
    assert_eq!(result.get("l"), None);
    assert_eq!(result.get("r"), Some(&Value::int(1)));

    let both = Pattern::either(Pattern::any() >> "l", Pattern::any() >> "r");
    let result = match_value(&Value::int(1), &both);
    assert!(!result.is_match());
    assert!(result.is_empty());
}

#[test]
fn test_aggregated_capture_folds() {
    let p = Pattern::each(Pattern::aggregate(Pattern::any(), "total", aggregate::sum()));
    let result = match_value(&ints(&[1, 2, 3]), &p);
    assert_eq!(result.get("total"), Some(&Value::int(6)));
}

#[test]
fn test_failed_branch_inside_quantifier_leaves_no_residue() {
    let rep = Pattern::seq([Pattern::wildcard() >> "seen", Pattern::lit(0)]);
    let p = Pattern::seq([Pattern::some_greedy([rep], Bounds::UNBOUNDED), Pattern::any()]);
    let result = match_value(&Value::list(vec![ints(&[7, 1])]), &p);
    assert!(result.is_match());
    assert_eq!(result.get("seen"), None);
}
