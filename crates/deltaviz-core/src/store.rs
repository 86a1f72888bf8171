#![forbid(unsafe_code)]

//! Ordered range-update collection and baseline array.
//!
//! [`UpdateStore`] exclusively owns the update list: updates are created by
//! [`push`](UpdateStore::push), destroyed by [`remove`](UpdateStore::remove)
//! or [`clear`](UpdateStore::clear), and immutable in between. Everything
//! else in the engine borrows them.
//!
//! # Invariants
//!
//! 1. `0 <= l <= r < size` holds for every stored update at creation time.
//! 2. Ids are minted monotonically and never reused within one store.
//! 3. Removal preserves the insertion order of the survivors.
//! 4. `initial.len() == size` after every operation.
//!
//! # Size-change policy
//!
//! Shrinking the array **drops** any update whose range no longer fits
//! (`r >= new_size`) rather than clamping it. This is deliberate product
//! behavior, not an accident: a clamped update would go on contributing a
//! different value than the one the user entered. [`SizeChange`] reports
//! how many updates a resize displaced.

use tracing::debug;

use crate::error::EngineError;

/// Array size a store starts with when none is specified.
pub const DEFAULT_SIZE: usize = 10;

/// Identifier for a range update, unique within one [`UpdateStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UpdateId(u64);

impl UpdateId {
    /// The raw id value, for logs and external correlation.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UpdateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single additive range update: add `val` to every element of `[l, r]`.
///
/// Immutable once created; the store only ever appends or removes whole
/// updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeUpdate {
    /// Store-unique, monotonically increasing token.
    pub id: UpdateId,
    /// Inclusive lower bound.
    pub l: usize,
    /// Inclusive upper bound.
    pub r: usize,
    /// Value added to every element in the range.
    pub val: i64,
}

/// Outcome of a successful [`UpdateStore::set_size`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeChange {
    /// Size before the call.
    pub old_size: usize,
    /// Size after the call.
    pub new_size: usize,
    /// Updates dropped because their range no longer fits.
    pub dropped_updates: usize,
}

/// Ordered collection of range updates plus the active size and baseline.
#[derive(Debug, Clone)]
pub struct UpdateStore {
    size: usize,
    next_id: u64,
    updates: Vec<RangeUpdate>,
    initial: Vec<i64>,
}

impl Default for UpdateStore {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            next_id: 0,
            updates: Vec::new(),
            initial: vec![0; DEFAULT_SIZE],
        }
    }
}

impl UpdateStore {
    /// Create a store over an array of `size` zeros.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSize`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidSize { requested: size });
        }
        Ok(Self {
            size,
            next_id: 0,
            updates: Vec::new(),
            initial: vec![0; size],
        })
    }

    /// Validate and append a new range update.
    ///
    /// Validation is atomic: on error the update list is untouched and no
    /// id is consumed.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidRange`] when `l > r` or `r >= size`.
    pub fn push(&mut self, l: usize, r: usize, val: i64) -> Result<RangeUpdate, EngineError> {
        if l > r || r >= self.size {
            return Err(EngineError::InvalidRange { l, r, size: self.size });
        }
        let id = UpdateId(self.next_id);
        self.next_id += 1;
        let update = RangeUpdate { id, l, r, val };
        self.updates.push(update);
        debug!(id = id.raw(), l, r, val, "range update appended");
        Ok(update)
    }

    /// Remove the update with `id`, preserving the order of the rest.
    ///
    /// Returns whether anything was removed; an absent id is a no-op, not
    /// an error.
    pub fn remove(&mut self, id: UpdateId) -> bool {
        let before = self.updates.len();
        self.updates.retain(|u| u.id != id);
        let removed = self.updates.len() != before;
        if removed {
            debug!(id = id.raw(), remaining = self.updates.len(), "range update removed");
        }
        removed
    }

    /// Drop every update. Size and baseline are untouched.
    pub fn clear(&mut self) {
        self.updates.clear();
        debug!("update list cleared");
    }

    /// Replace the active size.
    ///
    /// Updates with `r >= n` are dropped (see the module-level policy note)
    /// and the baseline array is truncated or zero-padded in place, keeping
    /// existing values at unchanged indices.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSize`] if `n` is zero; the prior size is kept.
    pub fn set_size(&mut self, n: usize) -> Result<SizeChange, EngineError> {
        if n == 0 {
            return Err(EngineError::InvalidSize { requested: n });
        }
        let old_size = self.size;
        let before = self.updates.len();
        // Drop, never clamp: the two behaviors are observably different.
        self.updates.retain(|u| u.r < n);
        self.initial.resize(n, 0);
        self.size = n;
        let dropped_updates = before - self.updates.len();
        debug!(old_size, new_size = n, dropped_updates, "array size changed");
        Ok(SizeChange { old_size, new_size: n, dropped_updates })
    }

    /// Replace the baseline array, truncating or zero-padding `values` to
    /// the active size.
    pub fn set_initial(&mut self, values: &[i64]) {
        self.initial.clear();
        self.initial.extend(values.iter().copied().take(self.size));
        self.initial.resize(self.size, 0);
    }

    /// The active array size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The updates in insertion order.
    #[must_use]
    pub fn updates(&self) -> &[RangeUpdate] {
        &self.updates
    }

    /// The baseline array, always of length [`size`](Self::size).
    #[must_use]
    pub fn initial(&self) -> &[i64] {
        &self.initial
    }

    /// Number of active updates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Whether no updates are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_size() {
        assert_eq!(
            UpdateStore::new(0).unwrap_err(),
            EngineError::InvalidSize { requested: 0 }
        );
    }

    #[test]
    fn push_appends_in_order_with_fresh_ids() {
        let mut store = UpdateStore::new(8).unwrap();
        let a = store.push(0, 3, 5).unwrap();
        let b = store.push(2, 7, -1).unwrap();
        assert!(a.id < b.id);
        assert_eq!(store.updates(), &[a, b]);
    }

    #[test]
    fn push_rejects_inverted_range() {
        let mut store = UpdateStore::new(8).unwrap();
        let err = store.push(5, 2, 1).unwrap_err();
        assert_eq!(err, EngineError::InvalidRange { l: 5, r: 2, size: 8 });
        assert!(store.is_empty());
    }

    #[test]
    fn push_rejects_out_of_bounds_upper() {
        let mut store = UpdateStore::new(8).unwrap();
        assert!(store.push(0, 8, 1).is_err());
        assert!(store.push(0, 7, 1).is_ok());
    }

    #[test]
    fn failed_push_consumes_no_id() {
        let mut store = UpdateStore::new(4).unwrap();
        let a = store.push(0, 1, 1).unwrap();
        assert!(store.push(0, 9, 1).is_err());
        let b = store.push(1, 2, 1).unwrap();
        assert_eq!(b.id.raw(), a.id.raw() + 1);
    }

    #[test]
    fn remove_preserves_order_and_tolerates_absent_ids() {
        let mut store = UpdateStore::new(8).unwrap();
        let a = store.push(0, 1, 1).unwrap();
        let b = store.push(1, 2, 2).unwrap();
        let c = store.push(2, 3, 3).unwrap();
        assert!(store.remove(b.id));
        assert_eq!(store.updates(), &[a, c]);
        assert!(!store.remove(b.id));
        assert_eq!(store.updates(), &[a, c]);
    }

    #[test]
    fn set_size_drops_updates_that_no_longer_fit() {
        let mut store = UpdateStore::new(10).unwrap();
        let keep = store.push(0, 3, 1).unwrap();
        store.push(2, 8, 2).unwrap();
        let change = store.set_size(5).unwrap();
        assert_eq!(change.dropped_updates, 1);
        assert_eq!(store.updates(), &[keep]);
        assert_eq!(store.size(), 5);
    }

    #[test]
    fn set_size_zero_is_rejected_and_state_kept() {
        let mut store = UpdateStore::new(4).unwrap();
        store.push(0, 3, 7).unwrap();
        assert!(store.set_size(0).is_err());
        assert_eq!(store.size(), 4);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn resize_preserves_baseline_at_unchanged_indices() {
        let mut store = UpdateStore::new(4).unwrap();
        store.set_initial(&[1, 2, 3, 4]);
        store.set_size(6).unwrap();
        assert_eq!(store.initial(), &[1, 2, 3, 4, 0, 0]);
        store.set_size(3).unwrap();
        assert_eq!(store.initial(), &[1, 2, 3]);
    }

    #[test]
    fn set_initial_truncates_and_zero_pads() {
        let mut store = UpdateStore::new(4).unwrap();
        store.set_initial(&[9, 8]);
        assert_eq!(store.initial(), &[9, 8, 0, 0]);
        store.set_initial(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(store.initial(), &[1, 2, 3, 4]);
    }

    #[test]
    fn clear_keeps_size_and_baseline() {
        let mut store = UpdateStore::new(4).unwrap();
        store.set_initial(&[1, 1, 1, 1]);
        store.push(0, 2, 5).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.size(), 4);
        assert_eq!(store.initial(), &[1, 1, 1, 1]);
    }
}
