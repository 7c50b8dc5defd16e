//! Progress reporting for splitzip pipeline operations.
//!
//! Both pipelines push `(phase, current, total)` events through a single
//! caller-supplied callback. The callback is the only channel between the
//! core and its host; the core never spawns threads of its own, but it may
//! run on a caller-owned worker, so the callback must be `Send + Sync`.

use std::fmt;

/// The named stage a progress event belongs to.
///
/// `Compressing` and `Splitting` occur during a split operation,
/// `Decoding` and `Extracting` during a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Compressing,
    Splitting,
    Decoding,
    Extracting,
}

impl Phase {
    /// The stable wire name of this phase.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Compressing => "compressing",
            Phase::Splitting => "splitting",
            Phase::Decoding => "decoding",
            Phase::Extracting => "extracting",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress callback function type.
///
/// Invoked synchronously as `(phase, current, total)`. Each unit of work in
/// a phase produces one `(i - 1, total)` event immediately before it starts
/// and one `(i, total)` event after it is durably finished, so the final
/// event of a phase always has `current == total`. Callers must tolerate
/// `total == 0`.
pub type ProgressCallback = dyn Fn(Phase, u64, u64) + Send + Sync;

/// Cheap handle over an optional callback so pipeline code can emit
/// unconditionally.
#[derive(Clone, Copy)]
pub(crate) struct Progress<'a> {
    callback: Option<&'a ProgressCallback>,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(callback: Option<&'a ProgressCallback>) -> Self {
        Self { callback }
    }

    pub(crate) fn emit(&self, phase: Phase, current: u64, total: u64) {
        if let Some(cb) = self.callback {
            cb(phase, current, total);
        }
    }
}
