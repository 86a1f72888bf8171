#![forbid(unsafe_code)]

//! Deltaviz engine core.
//!
//! An incremental update-accumulation and staged-reconstruction engine for
//! additive range updates over an integer array. Range updates are encoded
//! in a difference array (two point modifications per update, O(1) apply),
//! and the final array is recovered in a single O(n) prefix-sum pass.
//!
//! # Key components
//!
//! - [`UpdateStore`] — ordered, mutable collection of range updates plus the
//!   active array size and the user-supplied baseline array.
//! - [`difference_array`] / [`reconstruct`] — pure derivations: updates to
//!   difference array, difference array to final array.
//! - [`ReplayController`] — scrub cursor over the update sequence, exposing
//!   the difference/final arrays "as if only the first k updates applied".
//! - [`SteppedCompute`] — cancellable, externally-ticked state machine that
//!   commits one reconstructed cell per tick.
//! - [`DiffEngine`] — facade wiring the above together: every store
//!   mutation rebuilds derived state, cancels any in-flight stepped run,
//!   and clamps the replay cursor.
//!
//! # Concurrency model
//!
//! Single logical thread of control. Nothing here spawns threads, sleeps,
//! or owns a timer: the host drives [`DiffEngine::tick`] at whatever cadence
//! it likes, and cancellation is immediate and synchronous. Each tick
//! commits exactly one fully-computed cell, so the engine can be paused,
//! resumed, or invalidated between any two ticks without ever exposing a
//! half-written cell.

pub mod diff;
pub mod engine;
pub mod error;
pub mod replay;
pub mod scheduler;
pub mod store;

pub use diff::{difference_array, reconstruct};
pub use engine::DiffEngine;
pub use error::EngineError;
pub use replay::{ReplayController, ReplaySnapshot};
pub use scheduler::{ComputePhase, SteppedCompute, Tick};
pub use store::{DEFAULT_SIZE, RangeUpdate, SizeChange, UpdateId, UpdateStore};
