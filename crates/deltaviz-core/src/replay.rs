#![forbid(unsafe_code)]

//! Scrub cursor over the update sequence.
//!
//! [`ReplayController`] lets a caller walk the update history one operation
//! at a time: cursor `k` shows the difference and final arrays "as if only
//! the first `k` updates, in insertion order, had been applied". Every
//! transition recomputes a fresh [`ReplaySnapshot`] from scratch in
//! O(size + cursor) — there is deliberately no incremental patching, so
//! stepping backward never has to undo partial sums.
//!
//! # States
//!
//! - idle-at-0: no updates applied;
//! - mid-range: `0 < cursor < update_count`;
//! - fully-applied: `cursor == update_count`.
//!
//! The controller never owns updates; it borrows the [`UpdateStore`] on
//! each transition. After a store mutation the owner must call
//! [`clamp`](ReplayController::clamp) so the cursor stays within bounds.

use tracing::trace;

use crate::diff::{difference_array, reconstruct};
use crate::store::{UpdateId, UpdateStore};

/// One recomputed view of the store at a given replay cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySnapshot {
    /// Number of updates applied in this view.
    pub cursor: usize,
    /// Difference array for the first `cursor` updates, length `size + 1`.
    pub diff: Vec<i64>,
    /// Final array for the same prefix, length `size`.
    pub final_values: Vec<i64>,
}

/// Cursor over `[0, update_count]` with saturating stepping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayController {
    cursor: usize,
}

impl ReplayController {
    /// Create a controller at cursor 0 (nothing applied).
    #[must_use]
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    /// The number of updates currently applied for inspection.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply one more update, capped at the update count.
    pub fn step_forward(&mut self, store: &UpdateStore) -> ReplaySnapshot {
        self.cursor = (self.cursor + 1).min(store.len());
        self.snapshot(store)
    }

    /// Un-apply one update, floored at 0.
    pub fn step_backward(&mut self, store: &UpdateStore) -> ReplaySnapshot {
        self.cursor = self.cursor.saturating_sub(1);
        self.snapshot(store)
    }

    /// Set the cursor directly, capped at the update count.
    pub fn jump_to(&mut self, store: &UpdateStore, cursor: usize) -> ReplaySnapshot {
        self.cursor = cursor.min(store.len());
        self.snapshot(store)
    }

    /// Position the cursor just past the update with `id`.
    ///
    /// Returns `None` (cursor untouched) when the id is not in the store.
    pub fn jump_to_update(&mut self, store: &UpdateStore, id: UpdateId) -> Option<ReplaySnapshot> {
        let index = store.updates().iter().position(|u| u.id == id)?;
        self.cursor = index + 1;
        Some(self.snapshot(store))
    }

    /// Re-bound the cursor after a store mutation: `min(cursor, count)`.
    pub fn clamp(&mut self, store: &UpdateStore) {
        self.cursor = self.cursor.min(store.len());
    }

    /// Recompute the current prefix view from scratch.
    #[must_use]
    pub fn snapshot(&self, store: &UpdateStore) -> ReplaySnapshot {
        let diff = difference_array(store.size(), store.updates(), Some(self.cursor));
        let final_values = reconstruct(store.initial(), &diff);
        trace!(cursor = self.cursor, "replay snapshot recomputed");
        ReplaySnapshot { cursor: self.cursor, diff, final_values }
    }
}
