//! Core algorithms – height planning, snapshot bookkeeping, and the
//! interpolation driver.
//!
//! Data flows one direction through this module: the height planner
//! ([`plan::plan`]) produces a [`plan::TransitionPlan`], the capture step
//! (driven by `ui::animated_list`) wraps an offscreen buffer into an
//! [`engine::Snapshot`], and the [`engine::Driver`] interpolates between the
//! plan's source and destination rectangles until time runs out.  Nothing in
//! here performs terminal I/O.

pub mod curve;
pub mod engine;
pub mod heights;
pub mod plan;

use thiserror::Error;

/// Errors the animation engine signals to the host.
///
/// Benign races (a second `animate_to` while one is in flight, a zero-delta
/// request) are *not* errors — they are silent no-ops reported through
/// return values.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// The snapshot buffer for the requested capture could not be created.
    /// Fatal for that animation attempt; the engine resets to idle.
    #[error("snapshot buffer allocation failed ({width}x{height})")]
    SnapshotAlloc { width: u16, height: i32 },

    /// The item source was replaced while an animation was in flight.
    #[error("item source changed while an animation is in flight")]
    AnimationInFlight,
}
