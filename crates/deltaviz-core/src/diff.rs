#![forbid(unsafe_code)]

//! Pure derivations: updates → difference array → final array.
//!
//! Both functions are stateless and never mutate their inputs; callers
//! decide what to cache and when to recompute.
//!
//! # Invariants
//!
//! 1. `difference_array(size, ..)` has length `size + 1`. The extra slot
//!    holds the cancellation term of updates ending at `size - 1` and is
//!    never read back during reconstruction.
//! 2. For each applied update, `out[l] += val` and `out[r + 1] -= val`.
//!    Final values are order-independent (addition commutes); the prefix
//!    cut is not — `prefix = Some(k)` means "as if only the first `k`
//!    updates, in insertion order, had been applied".
//! 3. `reconstruct(initial, diff)[i] == initial[i] + prefix_sum(diff)[i]`.

use crate::store::RangeUpdate;

/// Build the difference array for the first `prefix` updates.
///
/// `prefix` is clamped to the update count; `None` applies all updates.
#[must_use]
pub fn difference_array(size: usize, updates: &[RangeUpdate], prefix: Option<usize>) -> Vec<i64> {
    let k = prefix.unwrap_or(updates.len()).min(updates.len());
    let mut out = vec![0i64; size + 1];
    for update in &updates[..k] {
        if update.l < out.len() {
            out[update.l] += update.val;
        }
        if update.r + 1 < out.len() {
            out[update.r + 1] -= update.val;
        }
    }
    out
}

/// Recover the final array from a baseline and a difference array.
///
/// `diff` must have length `initial.len() + 1`; its last slot is never
/// consulted. This is the non-animated ground truth the stepped scheduler
/// is checked against, and the instant "jump to end" path.
#[must_use]
pub fn reconstruct(initial: &[i64], diff: &[i64]) -> Vec<i64> {
    debug_assert_eq!(diff.len(), initial.len() + 1);
    let mut out = Vec::with_capacity(initial.len());
    let mut prefix = 0i64;
    for (i, &base) in initial.iter().enumerate() {
        prefix += diff[i];
        out.push(base + prefix);
    }
    out
}
