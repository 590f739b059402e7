//! Error types for pattern construction and capture lookup.
//!
//! A failed match is not an error: it is a negative [`MatchResult`](crate::MatchResult).
//! Errors only report programmer misuse, either a malformed pattern at build
//! time or a request for a capture the match never bound.

use thiserror::Error;

/// Result alias for fallible pattern construction.
pub type PatternResult<T> = Result<T, PatternError>;

/// Errors raised while building patterns or reading captures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// `exactly` was combined with `at_least` or `at_most`.
    #[error("`exactly` cannot be combined with `at_least` or `at_most`")]
    ConflictingBounds,

    /// `at_most` is smaller than `at_least`.
    #[error("invalid bounds: at_most={at_most} is less than at_least={at_least}")]
    InvalidBounds { at_least: usize, at_most: usize },

    /// The regular expression failed to compile.
    #[error("invalid regular expression {pattern:?}: {message}")]
    InvalidRegex { pattern: String, message: String },

    /// A capture name was looked up that the match did not bind.
    #[error("no capture named {name:?}")]
    CaptureNotFound { name: String },
}

/// Bound conflict between `exactly` and the open bounds.
#[cold]
pub fn conflicting_bounds() -> PatternError {
    PatternError::ConflictingBounds
}

/// `at_most < at_least`.
#[cold]
pub fn invalid_bounds(at_least: usize, at_most: usize) -> PatternError {
    PatternError::InvalidBounds { at_least, at_most }
}

/// Regex compilation failure.
#[cold]
pub fn invalid_regex(pattern: &str, err: &regex::Error) -> PatternError {
    PatternError::InvalidRegex {
        pattern: pattern.to_string(),
        message: err.to_string(),
    }
}

/// Unbound capture lookup.
#[cold]
pub fn capture_not_found(name: &str) -> PatternError {
    PatternError::CaptureNotFound {
        name: name.to_string(),
    }
}
