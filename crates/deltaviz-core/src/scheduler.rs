#![forbid(unsafe_code)]

//! Stepped, cancellable prefix-sum reconstruction.
//!
//! [`SteppedCompute`] is the animated counterpart of
//! [`reconstruct`](crate::diff::reconstruct): the same recurrence, paid out
//! one cell per externally-driven [`tick`](SteppedCompute::tick). The
//! machine owns no timer — the host calls `tick` at its own cadence — and
//! every tick commits exactly one fully-computed cell, so the run can be
//! paused, cancelled, or invalidated between any two ticks without leaving
//! a half-written cell behind.
//!
//! # State machine
//!
//! ```text
//!            start()                 tick() x size
//!   Idle ────────────────▶ Running ────────────────▶ Done
//!    ▲                        │                       │
//!    └────── cancel() ────────┘        start() ───────┘ (fresh run)
//! ```
//!
//! # Invariants
//!
//! 1. Cells are committed in strictly increasing index order, 0 to
//!    `size - 1`; no skips, no reorders.
//! 2. A completed run's output is index-for-index identical to
//!    [`reconstruct`](crate::diff::reconstruct) for the same inputs.
//! 3. Once [`cancel`](SteppedCompute::cancel) returns, no further tick of
//!    that run can commit anything.
//!
//! The running-prefix recurrence follows `prefix[0] = diff[0]`,
//! `prefix[i] = prefix[i-1] + diff[i]`; each committed cell is
//! `initial[i] + prefix[i]`. With an all-zero baseline that is exactly
//! `out[i] = (i == 0 ? 0 : out[i-1]) + diff[i]`.

use tracing::{debug, trace};

/// Phase of the stepped reconstruction state machine.
///
/// Maps onto the compute cursor domain `[-1, size]`: `Idle` is `-1`,
/// `Running` is the next index to commit, `Done` is `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputePhase {
    /// No run in progress.
    Idle,
    /// A run is in progress; the next tick commits one more cell.
    Running,
    /// The last cell was committed; the output is complete.
    Done,
}

/// Outcome of a single [`SteppedCompute::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One cell was committed; more remain.
    Advanced {
        /// Index of the cell just committed.
        index: usize,
    },
    /// The final cell was committed; the machine is now [`ComputePhase::Done`].
    Finished,
    /// No run in progress; nothing happened.
    Idle,
}

/// One-cell-per-tick reconstruction over a difference array.
#[derive(Debug, Clone)]
pub struct SteppedCompute {
    phase: ComputePhase,
    next: usize,
    prefix: i64,
    out: Vec<i64>,
}

impl Default for SteppedCompute {
    fn default() -> Self {
        Self::new()
    }
}

impl SteppedCompute {
    /// Create an idle machine with an empty output buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: ComputePhase::Idle,
            next: 0,
            prefix: 0,
            out: Vec::new(),
        }
    }

    /// Begin a fresh run over `size` cells.
    ///
    /// Valid from `Idle` or `Done` only; a `start` while `Running` is a
    /// rejected no-op and returns `false`. On success the output buffer is
    /// reset to zeros and the cursor moves to 0.
    pub fn start(&mut self, size: usize) -> bool {
        if self.phase == ComputePhase::Running {
            return false;
        }
        self.out.clear();
        self.out.resize(size, 0);
        self.next = 0;
        self.prefix = 0;
        self.phase = ComputePhase::Running;
        debug!(size, "stepped reconstruction started");
        true
    }

    /// Commit one cell.
    ///
    /// `diff` must be the difference array the run was started against
    /// (length `size + 1`) and `initial` the baseline (length `size`);
    /// the owner guarantees freshness by cancelling the run whenever
    /// either changes.
    pub fn tick(&mut self, diff: &[i64], initial: &[i64]) -> Tick {
        if self.phase != ComputePhase::Running {
            return Tick::Idle;
        }
        let index = self.next;
        self.prefix += diff[index];
        self.out[index] = initial[index] + self.prefix;
        self.next += 1;
        trace!(index, value = self.out[index], "cell committed");
        if self.next == self.out.len() {
            self.phase = ComputePhase::Done;
            debug!(cells = self.out.len(), "stepped reconstruction finished");
            return Tick::Finished;
        }
        Tick::Advanced { index }
    }

    /// Abort the current run, discarding partial output.
    ///
    /// Synchronous and immediate: after this returns, the machine is
    /// `Idle` and no further tick of the cancelled run can commit. Returns
    /// `false` when there was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        if self.phase != ComputePhase::Running {
            return false;
        }
        self.discard();
        debug!("stepped reconstruction cancelled");
        true
    }

    /// Force the machine back to `Idle` from any phase.
    ///
    /// Called by the owner when the difference array changes, so a run can
    /// never continue against stale input. Unlike [`cancel`](Self::cancel)
    /// this also clears a completed run.
    pub fn invalidate(&mut self) {
        if self.phase != ComputePhase::Idle {
            debug!(phase = ?self.phase, "stepped reconstruction invalidated");
        }
        self.discard();
    }

    fn discard(&mut self) {
        self.phase = ComputePhase::Idle;
        self.next = 0;
        self.prefix = 0;
        self.out.iter_mut().for_each(|cell| *cell = 0);
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ComputePhase {
        self.phase
    }

    /// Whether a run is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == ComputePhase::Running
    }

    /// Compute cursor in `[-1, size]`: `-1` idle, next index while
    /// running, `size` when done.
    #[must_use]
    pub fn compute_cursor(&self) -> i64 {
        match self.phase {
            ComputePhase::Idle => -1,
            ComputePhase::Running => self.next as i64,
            ComputePhase::Done => self.out.len() as i64,
        }
    }

    /// The output buffer: committed cells up to the cursor, zeros beyond.
    #[must_use]
    pub fn output(&self) -> &[i64] {
        &self.out
    }
}
