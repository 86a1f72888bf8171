#![forbid(unsafe_code)]

//! Engine facade and invalidation wiring.
//!
//! [`DiffEngine`] is the boundary a presentation layer talks to. It owns
//! the [`UpdateStore`], a cached full difference array, the replay cursor,
//! and the stepped-compute machine, and keeps them coherent: every
//! successful mutation
//!
//! 1. rebuilds the cached difference array wholesale (no incremental
//!    patching — removing an update in the middle of the sequence cannot
//!    be undone with simple subtraction once other updates share its
//!    `r + 1` boundary),
//! 2. forces the stepped machine back to idle so it can never tick against
//!    a stale difference array,
//! 3. clamps the replay cursor to the new update count,
//! 4. bumps the generation counter.
//!
//! The generation counter identifies the current derived state. On this
//! single logical thread it is diagnostic; a rewrite that computes in the
//! background would compare generations to detect and discard stale runs.

use tracing::debug;

use crate::diff::{difference_array, reconstruct};
use crate::error::EngineError;
use crate::replay::{ReplayController, ReplaySnapshot};
use crate::scheduler::{ComputePhase, SteppedCompute, Tick};
use crate::store::{RangeUpdate, SizeChange, UpdateId, UpdateStore};

/// Facade over the store, derived arrays, replay, and stepped compute.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    store: UpdateStore,
    /// Cached difference array for the full update sequence, length
    /// `size + 1`. Rebuilt on every mutation.
    diff: Vec<i64>,
    replay: ReplayController,
    compute: SteppedCompute,
    generation: u64,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::with_store(UpdateStore::default())
    }
}

impl DiffEngine {
    /// Create an engine over an array of `size` zeros.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Ok(Self::with_store(UpdateStore::new(size)?))
    }

    fn with_store(store: UpdateStore) -> Self {
        let diff = difference_array(store.size(), store.updates(), None);
        Self {
            store,
            diff,
            replay: ReplayController::new(),
            compute: SteppedCompute::new(),
            generation: 0,
        }
    }

    fn invalidate(&mut self) {
        self.diff = difference_array(self.store.size(), self.store.updates(), None);
        self.compute.invalidate();
        self.replay.clamp(&self.store);
        self.generation += 1;
        debug!(
            generation = self.generation,
            updates = self.store.len(),
            size = self.store.size(),
            "derived state rebuilt"
        );
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Append a range update adding `val` to every element of `[l, r]`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidRange`] when `l > r` or `r >= size`; nothing
    /// changes on error.
    pub fn add_update(&mut self, l: usize, r: usize, val: i64) -> Result<RangeUpdate, EngineError> {
        let update = self.store.push(l, r, val)?;
        self.invalidate();
        Ok(update)
    }

    /// Remove the update with `id`; an absent id is a no-op.
    ///
    /// Returns whether anything was removed. Derived state is only rebuilt
    /// when the store actually changed.
    pub fn remove_update(&mut self, id: UpdateId) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Drop every update; size and baseline are untouched.
    pub fn reset(&mut self) {
        self.store.clear();
        self.invalidate();
    }

    /// Change the active array size.
    ///
    /// Updates whose range no longer fits are dropped, not clamped; the
    /// baseline is truncated or zero-padded in place. See
    /// [`UpdateStore::set_size`].
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSize`] if `n` is zero; the prior size is kept.
    pub fn set_size(&mut self, n: usize) -> Result<SizeChange, EngineError> {
        let change = self.store.set_size(n)?;
        self.invalidate();
        Ok(change)
    }

    /// Replace the baseline array, truncated or zero-padded to `size`.
    pub fn set_initial_array(&mut self, values: &[i64]) {
        self.store.set_initial(values);
        self.invalidate();
    }

    // ── Derivations ────────────────────────────────────────────────────

    /// The difference array, length `size + 1`.
    ///
    /// `prefix = Some(k)` derives it for the first `k` updates only;
    /// `None` returns the cached full array.
    #[must_use]
    pub fn diff_array(&self, prefix: Option<usize>) -> Vec<i64> {
        match prefix {
            None => self.diff.clone(),
            Some(k) => difference_array(self.store.size(), self.store.updates(), Some(k)),
        }
    }

    /// The fully reconstructed final array, length `size`. Instant,
    /// non-animated ground truth.
    #[must_use]
    pub fn final_array(&self) -> Vec<i64> {
        reconstruct(self.store.initial(), &self.diff)
    }

    // ── Stepped reconstruction ─────────────────────────────────────────

    /// Begin an animated reconstruction run.
    ///
    /// Returns `false` (no-op) when a run is already in progress.
    pub fn start_animated_compute(&mut self) -> bool {
        self.compute.start(self.store.size())
    }

    /// Cancel the in-flight run, if any, discarding partial output.
    pub fn cancel_animated_compute(&mut self) -> bool {
        self.compute.cancel()
    }

    /// Commit one cell of the animated run. Host-driven; the engine owns
    /// no timer.
    pub fn tick(&mut self) -> Tick {
        self.compute.tick(&self.diff, self.store.initial())
    }

    /// Compute cursor in `[-1, size]`; `-1` idle, `size` done.
    #[must_use]
    pub fn compute_cursor(&self) -> i64 {
        self.compute.compute_cursor()
    }

    /// Whether an animated run is in progress.
    #[must_use]
    pub fn is_computing(&self) -> bool {
        self.compute.is_running()
    }

    /// Phase of the stepped machine.
    #[must_use]
    pub fn compute_phase(&self) -> ComputePhase {
        self.compute.phase()
    }

    /// The animated run's output buffer: committed cells up to the
    /// cursor, zeros beyond.
    #[must_use]
    pub fn partial_final_array(&self) -> &[i64] {
        self.compute.output()
    }

    // ── Replay ─────────────────────────────────────────────────────────

    /// Current replay cursor in `[0, update_count]`.
    #[must_use]
    pub fn replay_cursor(&self) -> usize {
        self.replay.cursor()
    }

    /// Apply one more update to the replay view.
    pub fn replay_step_forward(&mut self) -> ReplaySnapshot {
        self.replay.step_forward(&self.store)
    }

    /// Un-apply one update from the replay view.
    pub fn replay_step_backward(&mut self) -> ReplaySnapshot {
        self.replay.step_backward(&self.store)
    }

    /// Move the replay cursor directly to `cursor` (capped at the count).
    pub fn replay_jump_to(&mut self, cursor: usize) -> ReplaySnapshot {
        self.replay.jump_to(&self.store, cursor)
    }

    /// Move the replay cursor just past the update with `id`.
    pub fn replay_jump_to_update(&mut self, id: UpdateId) -> Option<ReplaySnapshot> {
        self.replay.jump_to_update(&self.store, id)
    }

    /// The replay view at the current cursor, recomputed from scratch.
    #[must_use]
    pub fn replay_snapshot(&self) -> ReplaySnapshot {
        self.replay.snapshot(&self.store)
    }

    // ── Read-only state ────────────────────────────────────────────────

    /// Active array size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Updates in insertion order.
    #[must_use]
    pub fn updates(&self) -> &[RangeUpdate] {
        self.store.updates()
    }

    /// Number of active updates.
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.store.len()
    }

    /// The baseline array, length `size`.
    #[must_use]
    pub fn initial_array(&self) -> &[i64] {
        self.store.initial()
    }

    /// Monotonic counter identifying the current derived state; bumped on
    /// every rebuild.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
