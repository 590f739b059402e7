//! Integer ranges.
//!
//! A range is matched like a list: it is iterated lazily, never indexed.

use std::cmp::Ordering;
use std::fmt;

/// Range value with a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeValue {
    /// Start of range (inclusive).
    pub start: i64,
    /// End of range.
    pub end: i64,
    /// Step increment (default 1). Can be negative for descending ranges.
    pub step: i64,
    /// Whether end is inclusive.
    pub inclusive: bool,
}

impl RangeValue {
    /// Create an exclusive range with step 1.
    pub fn exclusive(start: i64, end: i64) -> Self {
        RangeValue {
            start,
            end,
            step: 1,
            inclusive: false,
        }
    }

    /// Create an inclusive range with step 1.
    pub fn inclusive(start: i64, end: i64) -> Self {
        RangeValue {
            start,
            end,
            step: 1,
            inclusive: true,
        }
    }

    /// Create an exclusive range with custom step.
    pub fn exclusive_with_step(start: i64, end: i64, step: i64) -> Self {
        RangeValue {
            start,
            end,
            step,
            inclusive: false,
        }
    }

    /// Whether `value` lies within the bounds, ignoring step alignment.
    fn in_bounds(&self, value: i64) -> bool {
        match self.step.cmp(&0) {
            Ordering::Greater => {
                if self.inclusive {
                    value >= self.start && value <= self.end
                } else {
                    value >= self.start && value < self.end
                }
            }
            Ordering::Less => {
                if self.inclusive {
                    value <= self.start && value >= self.end
                } else {
                    value <= self.start && value > self.end
                }
            }
            Ordering::Equal => false,
        }
    }

    /// Iterate over the range values.
    pub fn iter(&self) -> impl Iterator<Item = i64> {
        let range = *self;
        let initial = range.in_bounds(range.start).then_some(range.start);
        std::iter::successors(initial, move |&current| {
            current
                .checked_add(range.step)
                .filter(|&next| range.in_bounds(next))
        })
    }

    /// Number of values the range yields.
    pub fn len(&self) -> usize {
        if !self.in_bounds(self.start) {
            return 0;
        }
        let span = self.end.abs_diff(self.start);
        let step = self.step.unsigned_abs();
        let count = if self.inclusive {
            span / step + 1
        } else {
            span.div_ceil(step)
        };
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a value is contained in the range.
    pub fn contains(&self, value: i64) -> bool {
        if !self.in_bounds(value) {
            return false;
        }
        // In bounds implies the step is non-zero.
        value.abs_diff(self.start) % self.step.unsigned_abs() == 0
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.inclusive { "..=" } else { ".." };
        write!(f, "{}{op}{}", self.start, self.end)?;
        if self.step != 1 {
            write!(f, " by {}", self.step)?;
        }
        Ok(())
    }
}
