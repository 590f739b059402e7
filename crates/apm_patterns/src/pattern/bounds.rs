//! Count bounds shared by quantifiers and `Length`.

use std::fmt;

use crate::errors::{conflicting_bounds, invalid_bounds, PatternResult};

/// Inclusive count bounds; `None` means unbounded on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    at_least: Option<usize>,
    at_most: Option<usize>,
}

impl Bounds {
    /// No constraint on the count.
    pub const UNBOUNDED: Bounds = Bounds {
        at_least: None,
        at_most: None,
    };

    /// Validate `at_least`, `at_most` and `exactly` together.
    ///
    /// `exactly` sets both bounds and excludes the other two.
    pub fn new(
        at_least: Option<usize>,
        at_most: Option<usize>,
        exactly: Option<usize>,
    ) -> PatternResult<Self> {
        if let Some(n) = exactly {
            if at_least.is_some() || at_most.is_some() {
                return Err(conflicting_bounds());
            }
            return Ok(Self::exactly(n));
        }
        if let (Some(lo), Some(hi)) = (at_least, at_most) {
            if hi < lo {
                return Err(invalid_bounds(lo, hi));
            }
        }
        Ok(Bounds { at_least, at_most })
    }

    pub fn exactly(n: usize) -> Self {
        Bounds {
            at_least: Some(n),
            at_most: Some(n),
        }
    }

    pub fn at_least(n: usize) -> Self {
        Bounds {
            at_least: Some(n),
            at_most: None,
        }
    }

    pub fn at_most(n: usize) -> Self {
        Bounds {
            at_least: None,
            at_most: Some(n),
        }
    }

    /// Both bounds, validated.
    pub fn between(at_least: usize, at_most: usize) -> PatternResult<Self> {
        Self::new(Some(at_least), Some(at_most), None)
    }

    pub fn min(&self) -> Option<usize> {
        self.at_least
    }

    pub fn max(&self) -> Option<usize> {
        self.at_most
    }

    pub fn ok_wrt_at_least(&self, count: usize) -> bool {
        self.at_least.map_or(true, |lo| count >= lo)
    }

    pub fn ok_wrt_at_most(&self, count: usize) -> bool {
        self.at_most.map_or(true, |hi| count <= hi)
    }

    pub fn contains(&self, count: usize) -> bool {
        self.ok_wrt_at_least(count) && self.ok_wrt_at_most(count)
    }

    pub fn is_unbounded(&self) -> bool {
        self.at_least.is_none() && self.at_most.is_none()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.at_least, self.at_most) {
            (Some(lo), Some(hi)) if lo == hi => write!(f, "exactly={lo}"),
            (Some(lo), Some(hi)) => write!(f, "at_least={lo}, at_most={hi}"),
            (Some(lo), None) => write!(f, "at_least={lo}"),
            (None, Some(hi)) => write!(f, "at_most={hi}"),
            (None, None) => Ok(()),
        }
    }
}
