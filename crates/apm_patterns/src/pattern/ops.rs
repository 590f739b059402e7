//! Operator sugar for composing patterns.
//!
//! | Operator | Pattern |
//! |----------|---------|
//! | `a & b`  | `AllOf(a, b)` |
//! | `a \| b` | `OneOf(a, b)` |
//! | `a ^ b`  | `Either(a, b)` |
//! | `!a`     | `Not(a)` |
//! | `a >> "n"` | `Capture(a, name="n")` |
//!
//! Chained `&` and `|` flatten into a single node.

use std::ops::{BitAnd, BitOr, BitXor, Not, Shr};

use super::{Pattern, PatternKind};

impl BitAnd for Pattern {
    type Output = Pattern;

    fn bitand(self, rhs: Pattern) -> Pattern {
        let mut parts = match self.kind() {
            PatternKind::AllOf(ps) => ps.clone(),
            _ => vec![self],
        };
        parts.push(rhs);
        Pattern::all_of(parts)
    }
}

impl BitOr for Pattern {
    type Output = Pattern;

    fn bitor(self, rhs: Pattern) -> Pattern {
        let mut parts = match self.kind() {
            PatternKind::OneOf(ps) => ps.clone(),
            _ => vec![self],
        };
        parts.push(rhs);
        Pattern::one_of(parts)
    }
}

impl BitXor for Pattern {
    type Output = Pattern;

    fn bitxor(self, rhs: Pattern) -> Pattern {
        Pattern::either(self, rhs)
    }
}

impl Not for Pattern {
    type Output = Pattern;

    fn not(self) -> Pattern {
        Pattern::not(self)
    }
}

impl Shr<&str> for Pattern {
    type Output = Pattern;

    fn shr(self, name: &str) -> Pattern {
        Pattern::capture(self, name)
    }
}
