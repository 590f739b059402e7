//! Readable rendering of patterns, used by failure explanations.

use std::fmt;

use super::{MapKey, Pattern, PatternKind};

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PatternKind::Any => write!(f, "..."),
            PatternKind::Wildcard(_) => write!(f, "_"),
            PatternKind::Literal(v) => write!(f, "{v}"),
            PatternKind::Capture {
                inner,
                name,
                aggregate,
            } => match aggregate {
                Some(agg) => write!(f, "Capture({inner}, name={name:?}, agg={})", agg.name()),
                None => write!(f, "Capture({inner}, name={name:?})"),
            },
            PatternKind::AllOf(ps) => {
                write!(f, "AllOf(")?;
                write_list(f, ps)?;
                write!(f, ")")
            }
            PatternKind::OneOf(ps) => {
                write!(f, "OneOf(")?;
                write_list(f, ps)?;
                write!(f, ")")
            }
            PatternKind::Either(l, r) => write!(f, "Either({l}, {r})"),
            PatternKind::Not(p) => write!(f, "Not({p})"),
            PatternKind::Strict(p) => write!(f, "Strict({p})"),
            PatternKind::Quantified(q) => {
                write!(f, "Some(")?;
                write_list(f, q.patterns())?;
                if !q.bounds().is_unbounded() {
                    write!(f, ", {}", q.bounds())?;
                }
                if q.is_greedy() {
                    write!(f, ", greedy=true")?;
                }
                write!(f, ")")
            }
            PatternKind::Sequence(ps) => {
                write!(f, "[")?;
                write_list(f, ps)?;
                write!(f, "]")
            }
            PatternKind::Tuple(ps) => {
                write!(f, "(")?;
                write_list(f, ps)?;
                if ps.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            PatternKind::Mapping(m) => {
                write!(f, "{{")?;
                for (i, (key, value)) in m.entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match key {
                        MapKey::Literal(k) => write!(f, "{k}: {value}")?,
                        MapKey::Pattern(k) => write!(f, "{k}: {value}")?,
                    }
                }
                if let Some(rest) = m.rest() {
                    if !m.entries().is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "**{rest}")?;
                }
                write!(f, "}}")
            }
            PatternKind::Range(r) => write!(f, "{r}"),
            PatternKind::Object(o) => {
                let name = o.record_type().map_or("Attrs", |ty| ty.name());
                write!(f, "{name}(")?;
                write_list(f, o.positional())?;
                for (i, (field, p)) in o.named().iter().enumerate() {
                    if i > 0 || !o.positional().is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field}={p}")?;
                }
                write!(f, ")")
            }
            PatternKind::Check(_) => write!(f, "Check(<fn>)"),
            PatternKind::InstanceOf(types) => {
                write!(f, "InstanceOf(")?;
                write_list(f, types)?;
                write!(f, ")")
            }
            PatternKind::SubclassOf(types) => {
                write!(f, "SubclassOf(")?;
                write_list(f, types)?;
                write!(f, ")")
            }
            PatternKind::Between(b) => {
                write!(f, "Between({}, {}", b.lo, b.hi)?;
                if b.lo_exclusive {
                    write!(f, ", lower_bound_exclusive=true")?;
                }
                if b.hi_exclusive {
                    write!(f, ", upper_bound_exclusive=true")?;
                }
                write!(f, ")")
            }
            PatternKind::Length(bounds) => write!(f, "Length({bounds})"),
            PatternKind::Contains(v) => write!(f, "Contains({v})"),
            PatternKind::Regex(r) => write!(f, "Regex({:?})", r.source()),
            PatternKind::Transformed { inner, .. } => write!(f, "Transformed(<fn>, {inner})"),
            PatternKind::At { path, inner } => {
                write!(f, "At(")?;
                for (i, key) in path.iter().enumerate() {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    match key.as_str() {
                        Some(s) => write!(f, "{s}")?,
                        None => write!(f, "{key}")?,
                    }
                }
                write!(f, ", {inner})")
            }
            PatternKind::EachItem { key, value } => write!(f, "EachItem({key}, {value})"),
            PatternKind::Each { inner, at_least } => {
                if *at_least > 0 {
                    write!(f, "Each({inner}, at_least={at_least})")
                } else {
                    write!(f, "Each({inner})")
                }
            }
            PatternKind::Truish => write!(f, "Truish"),
            PatternKind::Custom(c) => write!(f, "{}", c.describe()),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}
