//! The pattern algebra.
//!
//! A [`Pattern`] is an immutable tree built once and matched many times.
//! Nodes are shared through `Arc`, so cloning a pattern is O(1) and a clone
//! is the same node: cloning a wildcard keeps its capture slot.
//!
//! Container values given as literals are lifted into structural patterns
//! (`[1, 2]` becomes a sequence of literals, a map becomes a mapping pattern),
//! so `Pattern::lit(Value::list(..))` matches any iterable with those
//! elements, and a literal map matches any map holding at least those keys.

mod bounds;
mod display;
mod ops;
mod transform;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use apm_value::{RangeValue, RecordType, Value, ValueType};
use regex::Regex;

use crate::aggregate::Aggregation;
use crate::context::MatchContext;
use crate::errors::{invalid_regex, PatternResult};

pub use bounds::Bounds;

/// Test over a value for `Check`; an `Err` counts as a failed match.
pub type Predicate = Arc<dyn Fn(&Value) -> Result<bool, String> + Send + Sync>;

/// Value conversion for `Transformed`; an `Err` counts as a failed match.
pub type TransformFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// Identity of a wildcard node, the key of its capture slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WildcardId(u64);

static NEXT_WILDCARD: AtomicU64 = AtomicU64::new(0);

impl WildcardId {
    fn fresh() -> Self {
        WildcardId(NEXT_WILDCARD.fetch_add(1, Ordering::Relaxed))
    }
}

/// User-defined matching logic plugged into the algebra.
///
/// Implementations recurse through the context, so their sub-matches take
/// part in capture bookkeeping and failure tracing like built-in nodes.
pub trait CustomPattern: Send + Sync {
    fn match_value(&self, value: &Value, ctx: &mut MatchContext, strict: bool) -> bool;

    /// Text shown when the pattern is displayed.
    fn describe(&self) -> String {
        "Custom".to_string()
    }
}

/// A pattern node.
#[derive(Clone)]
pub struct Pattern(Arc<PatternKind>);

/// Pattern variants.
pub enum PatternKind {
    /// Matches anything, captures nothing.
    Any,
    /// Matches anything; the matched value is recorded in this node's slot.
    Wildcard(WildcardId),
    /// Scalar, set or record literal.
    Literal(Value),
    Capture {
        inner: Pattern,
        name: String,
        aggregate: Option<Arc<dyn Aggregation>>,
    },
    AllOf(Vec<Pattern>),
    OneOf(Vec<Pattern>),
    Either(Pattern, Pattern),
    Not(Pattern),
    Strict(Pattern),
    /// Repeated subsequence inside a sequence pattern.
    Quantified(Quantifier),
    Sequence(Vec<Pattern>),
    Tuple(Vec<Pattern>),
    Mapping(MappingPattern),
    /// A range used as a sequence of its integers.
    Range(RangeValue),
    Object(ObjectPattern),
    Check(Predicate),
    InstanceOf(Vec<ValueType>),
    SubclassOf(Vec<ValueType>),
    Between(BetweenPattern),
    Length(Bounds),
    Contains(Value),
    Regex(RegexPattern),
    Transformed {
        func: TransformFn,
        inner: Pattern,
    },
    At {
        path: Vec<Value>,
        inner: Pattern,
    },
    EachItem {
        key: Pattern,
        value: Pattern,
    },
    Each {
        inner: Pattern,
        at_least: usize,
    },
    Truish,
    Custom(Arc<dyn CustomPattern>),
}

/// Quantified subsequence: repetitions of a tuple of sub-patterns.
#[derive(Clone)]
pub struct Quantifier {
    patterns: Vec<Pattern>,
    bounds: Bounds,
    greedy: bool,
}

impl Quantifier {
    /// Sub-patterns matched, in order, by every repetition.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_greedy(&self) -> bool {
        self.greedy
    }
}

/// Key of a mapping pattern entry.
#[derive(Clone)]
pub enum MapKey {
    /// Looked up directly.
    Literal(Value),
    /// Matched against the keys of the value.
    Pattern(Pattern),
}

/// `{key: pattern, ..}` with an optional remainder pattern.
#[derive(Clone)]
pub struct MappingPattern {
    entries: Vec<(MapKey, Pattern)>,
    rest: Option<Pattern>,
}

impl MappingPattern {
    pub fn entries(&self) -> &[(MapKey, Pattern)] {
        &self.entries
    }

    /// Pattern matched against a map of the entries no key consumed.
    pub fn rest(&self) -> Option<&Pattern> {
        self.rest.as_ref()
    }
}

/// Record pattern: optional type, positional and named field patterns.
#[derive(Clone)]
pub struct ObjectPattern {
    ty: Option<Arc<RecordType>>,
    positional: Vec<Pattern>,
    named: Vec<(String, Pattern)>,
}

impl ObjectPattern {
    pub fn record_type(&self) -> Option<&Arc<RecordType>> {
        self.ty.as_ref()
    }

    pub fn positional(&self) -> &[Pattern] {
        &self.positional
    }

    pub fn named(&self) -> &[(String, Pattern)] {
        &self.named
    }
}

#[derive(Clone)]
pub struct BetweenPattern {
    pub lo: Value,
    pub hi: Value,
    pub lo_exclusive: bool,
    pub hi_exclusive: bool,
}

/// Full-match regular expression over strings.
#[derive(Clone)]
pub struct RegexPattern {
    source: String,
    regex: Regex,
    bind_groups: bool,
}

impl RegexPattern {
    fn compile(source: &str, bind_groups: bool) -> PatternResult<Self> {
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| invalid_regex(source, &e))?;
        Ok(RegexPattern {
            source: source.to_string(),
            regex,
            bind_groups,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Anchored form used for matching.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether named groups are recorded as captures.
    pub fn binds_groups(&self) -> bool {
        self.bind_groups
    }
}

// Construction

impl Pattern {
    fn from_kind(kind: PatternKind) -> Self {
        Pattern(Arc::new(kind))
    }

    pub fn kind(&self) -> &PatternKind {
        &self.0
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// `...`: matches anything without capturing.
    pub fn any() -> Self {
        Self::from_kind(PatternKind::Any)
    }

    /// `_`: a fresh anonymous capture slot.
    pub fn wildcard() -> Self {
        Self::from_kind(PatternKind::Wildcard(WildcardId::fresh()))
    }

    /// Literal value; containers are lifted into structural patterns.
    pub fn lit(value: impl Into<Value>) -> Self {
        let value = value.into();
        match &value {
            Value::List(items) => Self::seq(items.iter().cloned().map(Self::lit)),
            Value::Tuple(items) => Self::tuple(items.iter().cloned().map(Self::lit)),
            Value::Map(map) => Self::mapping(
                map.iter()
                    .map(|(k, v)| (Self::lit(k.clone()), Self::lit(v.clone()))),
            ),
            Value::Range(r) => Self::from_kind(PatternKind::Range(*r)),
            _ => Self::from_kind(PatternKind::Literal(value)),
        }
    }

    /// Record the matched value under `name`.
    pub fn capture(inner: Pattern, name: impl Into<String>) -> Self {
        Self::from_kind(PatternKind::Capture {
            inner,
            name: name.into(),
            aggregate: None,
        })
    }

    /// Fold the matched value into the aggregate stored under `name`.
    pub fn aggregate(inner: Pattern, name: impl Into<String>, agg: Arc<dyn Aggregation>) -> Self {
        Self::from_kind(PatternKind::Capture {
            inner,
            name: name.into(),
            aggregate: Some(agg),
        })
    }

    pub fn all_of(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self::from_kind(PatternKind::AllOf(patterns.into_iter().collect()))
    }

    pub fn one_of(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self::from_kind(PatternKind::OneOf(patterns.into_iter().collect()))
    }

    /// Exactly one of `left` and `right` matches.
    pub fn either(left: Pattern, right: Pattern) -> Self {
        Self::from_kind(PatternKind::Either(left, right))
    }

    pub fn not(inner: Pattern) -> Self {
        Self::from_kind(PatternKind::Not(inner))
    }

    pub fn strict(inner: Pattern) -> Self {
        Self::from_kind(PatternKind::Strict(inner))
    }

    /// Reluctant quantifier: stops as soon as the following pattern matches.
    ///
    /// No sub-patterns means one `Any` per repetition.
    pub fn some(patterns: impl IntoIterator<Item = Pattern>, bounds: Bounds) -> Self {
        Self::quantified(patterns, bounds, false)
    }

    /// Greedy quantifier: repeats until its sub-patterns stop matching.
    pub fn some_greedy(patterns: impl IntoIterator<Item = Pattern>, bounds: Bounds) -> Self {
        Self::quantified(patterns, bounds, true)
    }

    /// Every remaining element matches `inner`; at least `at_least` of them.
    pub fn remaining(inner: Pattern, at_least: usize) -> Self {
        Self::quantified([inner], Bounds::at_least(at_least), true)
    }

    fn quantified(patterns: impl IntoIterator<Item = Pattern>, bounds: Bounds, greedy: bool) -> Self {
        let mut patterns: Vec<Pattern> = patterns.into_iter().collect();
        if patterns.is_empty() {
            patterns.push(Self::any());
        }
        Self::from_kind(PatternKind::Quantified(Quantifier {
            patterns,
            bounds,
            greedy,
        }))
    }

    /// Ordered sequence; elements may be quantifiers.
    pub fn seq(items: impl IntoIterator<Item = Pattern>) -> Self {
        Self::from_kind(PatternKind::Sequence(items.into_iter().collect()))
    }

    /// Fixed-arity tuple.
    pub fn tuple(items: impl IntoIterator<Item = Pattern>) -> Self {
        Self::from_kind(PatternKind::Tuple(items.into_iter().collect()))
    }

    /// Mapping pattern; literal keys are looked up, other keys are matched.
    pub fn mapping(entries: impl IntoIterator<Item = (Pattern, Pattern)>) -> Self {
        Self::build_mapping(entries, None)
    }

    /// Mapping pattern whose unconsumed entries are matched against `rest`.
    pub fn mapping_with_rest(
        entries: impl IntoIterator<Item = (Pattern, Pattern)>,
        rest: Pattern,
    ) -> Self {
        Self::build_mapping(entries, Some(rest))
    }

    fn build_mapping(
        entries: impl IntoIterator<Item = (Pattern, Pattern)>,
        rest: Option<Pattern>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| {
                let key = match key.kind() {
                    PatternKind::Literal(v) => MapKey::Literal(v.clone()),
                    _ => MapKey::Pattern(key),
                };
                (key, value)
            })
            .collect();
        Self::from_kind(PatternKind::Mapping(MappingPattern { entries, rest }))
    }

    /// Record of `ty` (or a subtype); positional patterns follow field order.
    pub fn object<S: Into<String>>(
        ty: &Arc<RecordType>,
        positional: impl IntoIterator<Item = Pattern>,
        named: impl IntoIterator<Item = (S, Pattern)>,
    ) -> Self {
        Self::from_kind(PatternKind::Object(ObjectPattern {
            ty: Some(Arc::clone(ty)),
            positional: positional.into_iter().collect(),
            named: named.into_iter().map(|(n, p)| (n.into(), p)).collect(),
        }))
    }

    /// Record of any type with the named fields.
    pub fn attrs<S: Into<String>>(named: impl IntoIterator<Item = (S, Pattern)>) -> Self {
        Self::from_kind(PatternKind::Object(ObjectPattern {
            ty: None,
            positional: Vec::new(),
            named: named.into_iter().map(|(n, p)| (n.into(), p)).collect(),
        }))
    }

    /// Mapping with string keys.
    pub fn items<S: Into<String>>(named: impl IntoIterator<Item = (S, Pattern)>) -> Self {
        Self::mapping(
            named
                .into_iter()
                .map(|(n, p)| (Self::lit(Value::string(n)), p)),
        )
    }

    pub fn check(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::try_check(move |v| Ok(predicate(v)))
    }

    /// Like [`Pattern::check`] for a predicate that can fail; a failure is
    /// a no-match.
    pub fn try_check(
        predicate: impl Fn(&Value) -> Result<bool, String> + Send + Sync + 'static,
    ) -> Self {
        Self::from_kind(PatternKind::Check(Arc::new(predicate)))
    }

    /// Value's type is one of `types` or a subtype of one.
    pub fn instance_of(types: impl IntoIterator<Item = ValueType>) -> Self {
        Self::from_kind(PatternKind::InstanceOf(types.into_iter().collect()))
    }

    /// Value is a type that is one of `types` or a subtype of one.
    pub fn subclass_of(types: impl IntoIterator<Item = ValueType>) -> Self {
        Self::from_kind(PatternKind::SubclassOf(types.into_iter().collect()))
    }

    /// `lo <= value <= hi`.
    pub fn between(lo: impl Into<Value>, hi: impl Into<Value>) -> Self {
        Self::between_with(lo, hi, false, false)
    }

    pub fn between_with(
        lo: impl Into<Value>,
        hi: impl Into<Value>,
        lo_exclusive: bool,
        hi_exclusive: bool,
    ) -> Self {
        Self::from_kind(PatternKind::Between(BetweenPattern {
            lo: lo.into(),
            hi: hi.into(),
            lo_exclusive,
            hi_exclusive,
        }))
    }

    pub fn length(bounds: Bounds) -> Self {
        Self::from_kind(PatternKind::Length(bounds))
    }

    /// Element, key or substring containment.
    pub fn contains(needle: impl Into<Value>) -> Self {
        Self::from_kind(PatternKind::Contains(needle.into()))
    }

    /// The whole string matches `source`.
    pub fn regex(source: &str) -> PatternResult<Self> {
        Ok(Self::from_kind(PatternKind::Regex(RegexPattern::compile(
            source, false,
        )?)))
    }

    /// Like [`Pattern::regex`], also capturing every named group.
    pub fn regex_with_groups(source: &str) -> PatternResult<Self> {
        Ok(Self::from_kind(PatternKind::Regex(RegexPattern::compile(
            source, true,
        )?)))
    }

    /// Match `inner` against `func(value)`.
    pub fn transformed(
        func: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        inner: Pattern,
    ) -> Self {
        Self::from_kind(PatternKind::Transformed {
            func: Arc::new(func),
            inner,
        })
    }

    /// Drill into nested mappings along a dotted path of string keys.
    pub fn at(path: &str, inner: Pattern) -> Self {
        Self::at_path(path.split('.').map(Value::string), inner)
    }

    /// Drill into nested values along explicit keys (map keys, list indices
    /// or field names).
    pub fn at_path(path: impl IntoIterator<Item = Value>, inner: Pattern) -> Self {
        Self::from_kind(PatternKind::At {
            path: path.into_iter().collect(),
            inner,
        })
    }

    /// Every `(key, value)` entry of a map matches.
    pub fn each_item(key: Pattern, value: Pattern) -> Self {
        Self::from_kind(PatternKind::EachItem { key, value })
    }

    /// Every element matches `inner`.
    pub fn each(inner: Pattern) -> Self {
        Self::each_at_least(inner, 0)
    }

    /// Every element matches `inner` and there are at least `at_least`.
    pub fn each_at_least(inner: Pattern, at_least: usize) -> Self {
        Self::from_kind(PatternKind::Each { inner, at_least })
    }

    pub fn truish() -> Self {
        Self::from_kind(PatternKind::Truish)
    }

    pub fn custom(pattern: Arc<dyn CustomPattern>) -> Self {
        Self::from_kind(PatternKind::Custom(pattern))
    }

    // Derived patterns

    /// `inner` or anything.
    pub fn maybe(inner: Pattern) -> Self {
        Self::one_of([inner, Self::any()])
    }

    pub fn none_of(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self::not(Self::one_of(patterns))
    }

    /// Int or float; booleans are not numbers.
    pub fn is_number() -> Self {
        Self::instance_of([ValueType::Number])
    }

    pub fn is_string() -> Self {
        Self::instance_of([ValueType::Str])
    }

    /// Unwrap a quantifier, possibly behind a chain of captures.
    ///
    /// Returns the quantifier and the capture nodes around it, outermost
    /// last.
    pub(crate) fn as_quantifier(&self) -> Option<(&Quantifier, Vec<&Pattern>)> {
        let mut captures = Vec::new();
        let mut current = self;
        loop {
            match current.kind() {
                PatternKind::Quantified(q) => {
                    captures.reverse();
                    return Some((q, captures));
                }
                PatternKind::Capture { inner, .. } => {
                    captures.push(current);
                    current = inner;
                }
                _ => return None,
            }
        }
    }
}

// Conversions

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::lit(value)
    }
}

impl From<i64> for Pattern {
    fn from(n: i64) -> Self {
        Pattern::lit(n)
    }
}

impl From<i32> for Pattern {
    fn from(n: i32) -> Self {
        Pattern::lit(n)
    }
}

impl From<f64> for Pattern {
    fn from(f: f64) -> Self {
        Pattern::lit(f)
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::lit(b)
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::lit(s)
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::lit(s)
    }
}

impl From<RangeValue> for Pattern {
    fn from(r: RangeValue) -> Self {
        Pattern::lit(r)
    }
}

impl From<ValueType> for Pattern {
    fn from(ty: ValueType) -> Self {
        Pattern::instance_of([ty])
    }
}

#[cfg(test)]
mod tests;
