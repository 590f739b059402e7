//! APM Patterns - structural pattern matching over `apm_value` values.
//!
//! This crate provides:
//! - The pattern algebra (`Pattern`): literals, wildcards, captures,
//!   combinators, quantified subsequences, container and leaf patterns
//! - The matching engine (`MatchContext`) with checkpoint/rollback captures,
//!   multimatch accumulation and failure tracing
//! - Aggregating captures (`aggregate`)
//! - `MatchResult` with capture access and failure explanations
//!
//! # Example
//!
//! ```text
//! let pattern = Pattern::seq([
//!     Pattern::lit(1),
//!     Pattern::some([Pattern::any()], Bounds::UNBOUNDED) >> "middle",
//!     Pattern::lit(4),
//! ]);
//! let result = match_value(&Value::from(vec![1, 2, 3, 4]), &pattern);
//! assert_eq!(result["middle"], Value::from(vec![2, 3]));
//! ```
//!
//! # Tracing
//!
//! Set `RUST_LOG=apm_patterns=trace` and call [`init_tracing`] to see
//! quantifier and mapping decisions.

pub mod aggregate;
mod context;
mod cursor;
mod errors;
mod leaf;
mod mapping;
mod options;
mod pattern;
mod result;
mod sequence;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

use apm_value::Value;
use tracing::debug;

pub use aggregate::Aggregation;
pub use context::{CaptureSlot, Frame, MatchContext};
pub use errors::{PatternError, PatternResult};
pub use options::MatchOptions;
pub use pattern::{
    BetweenPattern, Bounds, CustomPattern, MapKey, MappingPattern, ObjectPattern, Pattern,
    PatternKind, Predicate, Quantifier, RegexPattern, TransformFn, WildcardId,
};
pub use result::MatchResult;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Match `value` against `pattern` with default options.
pub fn match_value(value: &Value, pattern: &Pattern) -> MatchResult {
    match_with(value, pattern, MatchOptions::default())
}

/// Match `value` against `pattern`.
pub fn match_with(value: &Value, pattern: &Pattern, options: MatchOptions) -> MatchResult {
    let span = tracing::debug_span!(
        "match",
        %pattern,
        strict = options.strict,
        multimatch = options.multimatch
    );
    let _guard = span.enter();

    let mut ctx = MatchContext::new(options);
    let matched = ctx.match_strict(value, pattern, options.strict);
    debug!(matched, "match finished");
    ctx.into_result(matched, value.clone(), pattern.clone())
}
