//! Bottom-up pattern rewriting.

use super::{
    MapKey, MappingPattern, ObjectPattern, Pattern, PatternKind, Quantifier,
};

impl Pattern {
    /// Rebuild the tree bottom-up, passing every rebuilt node through `f`.
    ///
    /// Children are transformed before their parent, so `f` sees a node whose
    /// sub-patterns are already rewritten. Leaves are handed to `f` as-is;
    /// wildcards keep their slot identity.
    #[must_use]
    pub fn transform<F>(&self, f: &mut F) -> Pattern
    where
        F: FnMut(Pattern) -> Pattern,
    {
        let rebuilt = match self.kind() {
            PatternKind::Capture {
                inner,
                name,
                aggregate,
            } => Pattern::from_kind(PatternKind::Capture {
                inner: inner.transform(f),
                name: name.clone(),
                aggregate: aggregate.clone(),
            }),
            PatternKind::AllOf(ps) => Pattern::from_kind(PatternKind::AllOf(transform_all(ps, f))),
            PatternKind::OneOf(ps) => Pattern::from_kind(PatternKind::OneOf(transform_all(ps, f))),
            PatternKind::Either(l, r) => {
                let l = l.transform(f);
                let r = r.transform(f);
                Pattern::from_kind(PatternKind::Either(l, r))
            }
            PatternKind::Not(p) => Pattern::from_kind(PatternKind::Not(p.transform(f))),
            PatternKind::Strict(p) => Pattern::from_kind(PatternKind::Strict(p.transform(f))),
            PatternKind::Quantified(q) => Pattern::from_kind(PatternKind::Quantified(Quantifier {
                patterns: transform_all(&q.patterns, f),
                bounds: q.bounds,
                greedy: q.greedy,
            })),
            PatternKind::Sequence(ps) => {
                Pattern::from_kind(PatternKind::Sequence(transform_all(ps, f)))
            }
            PatternKind::Tuple(ps) => Pattern::from_kind(PatternKind::Tuple(transform_all(ps, f))),
            PatternKind::Mapping(m) => {
                let entries = m
                    .entries
                    .iter()
                    .map(|(key, value)| {
                        let key = match key {
                            MapKey::Literal(v) => MapKey::Literal(v.clone()),
                            MapKey::Pattern(p) => MapKey::Pattern(p.transform(f)),
                        };
                        (key, value.transform(f))
                    })
                    .collect();
                let rest = m.rest.as_ref().map(|r| r.transform(f));
                Pattern::from_kind(PatternKind::Mapping(MappingPattern { entries, rest }))
            }
            PatternKind::Object(o) => {
                let positional = transform_all(&o.positional, f);
                let named = o
                    .named
                    .iter()
                    .map(|(name, p)| (name.clone(), p.transform(f)))
                    .collect();
                Pattern::from_kind(PatternKind::Object(ObjectPattern {
                    ty: o.ty.clone(),
                    positional,
                    named,
                }))
            }
            PatternKind::Transformed { func, inner } => {
                Pattern::from_kind(PatternKind::Transformed {
                    func: func.clone(),
                    inner: inner.transform(f),
                })
            }
            PatternKind::At { path, inner } => Pattern::from_kind(PatternKind::At {
                path: path.clone(),
                inner: inner.transform(f),
            }),
            PatternKind::EachItem { key, value } => {
                let key = key.transform(f);
                let value = value.transform(f);
                Pattern::from_kind(PatternKind::EachItem { key, value })
            }
            PatternKind::Each { inner, at_least } => Pattern::from_kind(PatternKind::Each {
                inner: inner.transform(f),
                at_least: *at_least,
            }),
            PatternKind::Any
            | PatternKind::Wildcard(_)
            | PatternKind::Literal(_)
            | PatternKind::Range(_)
            | PatternKind::Check(_)
            | PatternKind::InstanceOf(_)
            | PatternKind::SubclassOf(_)
            | PatternKind::Between(_)
            | PatternKind::Length(_)
            | PatternKind::Contains(_)
            | PatternKind::Regex(_)
            | PatternKind::Truish
            | PatternKind::Custom(_) => self.clone(),
        };
        f(rebuilt)
    }
}

fn transform_all<F>(patterns: &[Pattern], f: &mut F) -> Vec<Pattern>
where
    F: FnMut(Pattern) -> Pattern,
{
    patterns.iter().map(|p| p.transform(f)).collect()
}
