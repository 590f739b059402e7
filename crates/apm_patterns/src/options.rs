//! Per-call matching configuration.

use std::env;

/// Options for a top-level match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchOptions {
    /// Require identical concrete types and forbid unmatched mapping entries.
    pub strict: bool,
    /// Accumulate repeated captures of a name into a list.
    pub multimatch: bool,
    /// Record the `(value, pattern)` path of the failing sub-match.
    pub trace: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            strict: false,
            multimatch: false,
            trace: true,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_multimatch(mut self, multimatch: bool) -> Self {
        self.multimatch = multimatch;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Defaults overridden by `APM_STRICT`, `APM_MULTIMATCH` and `APM_TRACE`.
    ///
    /// Unset or unrecognized values leave the default in place.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(default)
        };
        MatchOptions {
            strict: flag("APM_STRICT", defaults.strict),
            multimatch: flag("APM_MULTIMATCH", defaults.multimatch),
            trace: flag("APM_TRACE", defaults.trace),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
