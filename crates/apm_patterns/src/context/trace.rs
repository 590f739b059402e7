//! Failure tracing: the `(value, pattern)` path to the failing sub-match.

use apm_value::Value;
use tracing::trace;

use crate::pattern::Pattern;

/// One dispatch step on the path.
pub type Frame = (Value, Pattern);

#[derive(Debug)]
struct Failure {
    /// Value of `Trace::seq` when the snapshot was taken.
    seq: u64,
    frames: Vec<Frame>,
}

/// Stack of active dispatch frames plus the snapshot of the latest
/// relevant failure.
///
/// A failing frame keeps a snapshot taken inside it (the deeper cause) and
/// otherwise snapshots itself. A succeeding frame discards snapshots taken
/// inside it, since those failures were recovered from.
#[derive(Debug, Default)]
pub(crate) struct Trace {
    frames: Vec<Frame>,
    failure: Option<Failure>,
    seq: u64,
    /// Depth of off-the-record evaluation; no snapshots while non-zero.
    quiet: usize,
}

impl Trace {
    /// Push a frame; returns the marker to pass to [`Trace::exit`].
    pub(crate) fn enter(&mut self, value: &Value, pattern: &Pattern) -> u64 {
        self.frames.push((value.clone(), pattern.clone()));
        self.seq
    }

    pub(crate) fn exit(&mut self, entered_at: u64, matched: bool) {
        let inner = self.failure.as_ref().is_some_and(|f| f.seq > entered_at);
        if matched {
            if inner {
                self.failure = None;
            }
        } else if !inner {
            self.snapshot();
        }
        self.frames.pop();
    }

    /// Record the current path as the failure, replacing any deeper one.
    pub(crate) fn fail_here(&mut self) {
        self.snapshot();
    }

    fn snapshot(&mut self) {
        if self.quiet > 0 {
            return;
        }
        self.seq += 1;
        if let Some((value, pattern)) = self.frames.last() {
            trace!(%value, %pattern, depth = self.frames.len(), "no match");
        }
        self.failure = Some(Failure {
            seq: self.seq,
            frames: self.frames.clone(),
        });
    }

    pub(crate) fn suspend(&mut self) {
        self.quiet += 1;
    }

    pub(crate) fn resume(&mut self) {
        self.quiet = self.quiet.saturating_sub(1);
    }

    pub(crate) fn into_failure(self) -> Vec<Frame> {
        self.failure.map(|f| f.frames).unwrap_or_default()
    }
}
