#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::errors::PatternError;
use pretty_assertions::assert_eq;

#[test]
fn test_bounds_validation() {
    assert_eq!(Bounds::new(None, None, Some(3)), Ok(Bounds::exactly(3)));
    assert_eq!(
        Bounds::new(Some(1), None, Some(3)),
        Err(PatternError::ConflictingBounds)
    );
    assert_eq!(
        Bounds::new(None, Some(2), Some(3)),
        Err(PatternError::ConflictingBounds)
    );
    assert_eq!(
        Bounds::between(3, 1),
        Err(PatternError::InvalidBounds {
            at_least: 3,
            at_most: 1
        })
    );
    assert!(Bounds::between(2, 2).is_ok());
}

#[test]
fn test_bounds_predicates() {
    let b = Bounds::between(1, 3).unwrap();
    assert!(!b.ok_wrt_at_least(0));
    assert!(b.ok_wrt_at_least(1));
    assert!(b.ok_wrt_at_most(3));
    assert!(!b.ok_wrt_at_most(4));
    assert!(b.contains(2));
    assert!(Bounds::UNBOUNDED.contains(usize::MAX));
    assert!(Bounds::UNBOUNDED.is_unbounded());
}

#[test]
fn test_quantifier_defaults_to_any() {
    let q = Pattern::some([], Bounds::UNBOUNDED);
    let PatternKind::Quantified(q) = q.kind() else {
        panic!("expected a quantifier");
    };
    assert_eq!(q.patterns().len(), 1);
    assert!(matches!(q.patterns()[0].kind(), PatternKind::Any));
    assert!(!q.is_greedy());
}

#[test]
fn test_literal_containers_are_lifted() {
    let p = Pattern::lit(Value::list(vec![Value::int(1), Value::int(2)]));
    assert!(matches!(p.kind(), PatternKind::Sequence(items) if items.len() == 2));

    let p = Pattern::lit(Value::tuple(vec![Value::int(1)]));
    assert!(matches!(p.kind(), PatternKind::Tuple(_)));

    let p = Pattern::lit(Value::map_from([(Value::string("a"), Value::int(1))]));
    let PatternKind::Mapping(m) = p.kind() else {
        panic!("expected a mapping pattern");
    };
    assert!(matches!(&m.entries()[0].0, MapKey::Literal(k) if *k == Value::string("a")));

    let p = Pattern::lit(3);
    assert!(matches!(p.kind(), PatternKind::Literal(Value::Int(3))));
}

#[test]
fn test_mapping_keys_split_into_literal_and_pattern() {
    let p = Pattern::mapping([
        (Pattern::lit("a"), Pattern::any()),
        (Pattern::wildcard(), Pattern::any()),
    ]);
    let PatternKind::Mapping(m) = p.kind() else {
        panic!("expected a mapping pattern");
    };
    assert!(matches!(m.entries()[0].0, MapKey::Literal(_)));
    assert!(matches!(m.entries()[1].0, MapKey::Pattern(_)));
    assert!(m.rest().is_none());
}

#[test]
fn test_wildcards_are_distinct_but_clones_share_identity() {
    let a = Pattern::wildcard();
    let b = Pattern::wildcard();
    let (PatternKind::Wildcard(ia), PatternKind::Wildcard(ib)) = (a.kind(), b.kind()) else {
        panic!("expected wildcards");
    };
    assert_ne!(ia, ib);
    let c = a.clone();
    assert!(c.ptr_eq(&a));
}

#[test]
fn test_invalid_regex_is_a_construction_error() {
    let err = Pattern::regex("(unclosed").err();
    assert!(matches!(err, Some(PatternError::InvalidRegex { .. })));
    assert!(Pattern::regex("[a-z]+").is_ok());
}

#[test]
fn test_operators_build_combinators() {
    let p = Pattern::lit(1) | Pattern::lit(2) | Pattern::lit(3);
    assert!(matches!(p.kind(), PatternKind::OneOf(ps) if ps.len() == 3));

    let p = Pattern::is_number() & Pattern::truish();
    assert!(matches!(p.kind(), PatternKind::AllOf(ps) if ps.len() == 2));

    let p = Pattern::lit(1) ^ Pattern::lit(2);
    assert!(matches!(p.kind(), PatternKind::Either(..)));

    let p = !Pattern::lit(1);
    assert!(matches!(p.kind(), PatternKind::Not(_)));

    let p = Pattern::wildcard() >> "x";
    assert!(matches!(p.kind(), PatternKind::Capture { name, .. } if name == "x"));
}

#[test]
fn test_display() {
    let q = Pattern::some([Pattern::is_number()], Bounds::at_least(1)) >> "xs";
    let p = Pattern::seq([Pattern::lit(1), Pattern::any(), q]);
    assert_eq!(
        p.to_string(),
        "[1, ..., Capture(Some(InstanceOf(number), at_least=1), name=\"xs\")]"
    );
    assert_eq!(
        Pattern::one_of([Pattern::lit("bar"), Pattern::lit(2.5)]).to_string(),
        "OneOf(\"bar\", 2.5)"
    );
    assert_eq!(Pattern::tuple([Pattern::wildcard()]).to_string(), "(_,)");
    assert_eq!(
        Pattern::mapping_with_rest([(Pattern::lit("a"), Pattern::lit(1))], Pattern::any())
            .to_string(),
        "{\"a\": 1, **...}"
    );
    assert_eq!(
        Pattern::at("a.b", Pattern::truish()).to_string(),
        "At(a.b, Truish)"
    );
    assert_eq!(
        Pattern::length(Bounds::exactly(2)).to_string(),
        "Length(exactly=2)"
    );
}

#[test]
fn test_as_quantifier_sees_through_captures() {
    let p = Pattern::some([], Bounds::UNBOUNDED) >> "x" >> "y";
    let Some((_, captures)) = p.as_quantifier() else {
        panic!("expected a quantifier");
    };
    let names: Vec<&str> = captures
        .iter()
        .filter_map(|c| match c.kind() {
            PatternKind::Capture { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["x", "y"]);
    assert!(Pattern::lit(1).as_quantifier().is_none());
}

#[test]
fn test_transform_is_bottom_up() {
    let p = Pattern::seq([Pattern::lit(1), Pattern::not(Pattern::lit(2))]);
    let mut visited = Vec::new();
    let out = p.transform(&mut |node: Pattern| {
        visited.push(node.to_string());
        node
    });
    assert_eq!(visited, vec!["1", "2", "Not(2)", "[1, Not(2)]"]);
    assert_eq!(out.to_string(), p.to_string());
}

#[test]
fn test_transform_can_wrap_nodes() {
    let p = Pattern::all_of([Pattern::lit(1), Pattern::truish()]);
    let mut n = 0;
    let out = p.transform(&mut |node: Pattern| match node.kind() {
        PatternKind::Literal(_) | PatternKind::Truish => {
            n += 1;
            Pattern::capture(node, format!("n{n}"))
        }
        _ => node,
    });
    assert_eq!(
        out.to_string(),
        "AllOf(Capture(1, name=\"n1\"), Capture(Truish, name=\"n2\"))"
    );
}

#[test]
fn test_transform_keeps_wildcard_identity() {
    let w = Pattern::wildcard();
    let p = Pattern::seq([w.clone()]);
    let out = p.transform(&mut |node: Pattern| node);
    let PatternKind::Sequence(items) = out.kind() else {
        panic!("expected a sequence");
    };
    assert!(items[0].ptr_eq(&w));
}
