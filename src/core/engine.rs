//! Interpolation driver — the timed state machine behind one transition.
//!
//! Phases: `Idle → AwaitingCapture → Animating → Idle`.  A transition is
//! admitted only from `Idle` (a request while one is in flight is a silent
//! no-op), the snapshot is attached by the capture step during the host's
//! next draw pass, and the clock starts only once the captured frame has
//! been laid out.  Exactly one [`Snapshot`] is ever live; it is dropped the
//! instant the animation finishes or is aborted.

use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use tracing::{debug, trace};

use super::curve::{self, Curve};
use super::plan::TransitionPlan;

/// Default animation duration, matching a "medium" UI transition.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

// ───────────────────────────────────────── clock ─────────────

/// Wall-clock bookkeeping for one animation.
///
/// `started == None` is the "not yet started" state: a paint can occur
/// before the first scheduled tick fires, and must render progress 0 rather
/// than skip the frame.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    started: Option<Instant>,
}

impl AnimationClock {
    pub fn unstarted() -> Self {
        Self { started: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Linear time fraction in `[0, 1]`; `0.0` while unstarted.
    pub fn progress(&self, now: Instant, duration: Duration) -> f32 {
        let Some(started) = self.started else {
            return 0.0;
        };
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Whether the animation's time budget has elapsed.  Never true while
    /// unstarted.
    pub fn expired(&self, now: Instant, duration: Duration) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) >= duration)
    }
}

// ───────────────────────────────────────── snapshot ──────────

/// An immutable captured frame plus the geometry it was captured for.
pub struct Snapshot {
    buffer: Buffer,
    src_start_y: i32,
    src_end_y: i32,
    dst_start_y: i32,
    dst_end_y: i32,
}

/// The source/destination rows for one painted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Top row to sample from the snapshot.
    pub src_y: i32,
    /// One past the bottom row to sample — clamped to both the snapshot's
    /// extent and the widget's current height.
    pub src_bottom: i32,
    /// Row at which the sample is painted.
    pub dst_y: i32,
}

impl FrameGeometry {
    pub fn sample_height(&self) -> i32 {
        (self.src_bottom - self.src_y).max(0)
    }
}

impl Snapshot {
    pub fn new(buffer: Buffer, plan: &TransitionPlan) -> Self {
        Self {
            buffer,
            src_start_y: plan.src_start_y,
            src_end_y: plan.src_end_y,
            dst_start_y: plan.dst_start_y,
            dst_end_y: plan.dst_end_y,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn height(&self) -> i32 {
        i32::from(self.buffer.area.height)
    }

    /// Blend the source and destination intervals at `eased` progress.
    /// The sample bottom never exceeds the snapshot's extent or the widget's
    /// current height, which changes independently in the growing case.
    pub fn frame_geometry(&self, eased: f32, widget_height: i32) -> FrameGeometry {
        FrameGeometry {
            src_y: curve::lerp(self.src_start_y, self.src_end_y, eased),
            src_bottom: self.height().min(widget_height),
            dst_y: curve::lerp(self.dst_start_y, self.dst_end_y, eased),
        }
    }
}

// ───────────────────────────────────────── driver ────────────

/// Driver phase.  Only the data valid for each phase is carried.
pub enum Phase {
    Idle,
    /// Plan computed; waiting for the next draw pass to capture.
    AwaitingCapture { plan: TransitionPlan },
    /// Snapshot in hand; interpolating (once the clock starts).
    Animating {
        plan: TransitionPlan,
        snapshot: Snapshot,
        clock: AnimationClock,
    },
}

/// Result of one driver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Finished,
}

/// The interpolation driver: phase machine, clock, and curve.
pub struct Driver {
    phase: Phase,
    duration: Duration,
    curve: Curve,
}

impl Driver {
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            duration,
            curve: Box::new(curve::ease_in_out),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Replace the interpolation curve (any monotonic `[0,1] → [0,1]` map).
    pub fn set_curve(&mut self, curve: impl Fn(f32) -> f32 + Send + 'static) {
        self.curve = Box::new(curve);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// True from the moment a plan is admitted until finish/abort.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Admit a plan.  Returns `false` (and changes nothing) when a
    /// transition is already in flight.
    pub fn begin(&mut self, plan: TransitionPlan) -> bool {
        if self.is_active() {
            trace!("transition request rejected: already in flight");
            return false;
        }
        debug!(
            start = plan.start_height,
            target = plan.target_height,
            "transition admitted, awaiting capture"
        );
        self.phase = Phase::AwaitingCapture { plan };
        true
    }

    /// Attach the captured frame, moving to `Animating` with an unstarted
    /// clock.  No-op outside `AwaitingCapture`.
    pub fn attach_snapshot(&mut self, buffer: Buffer) {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        self.phase = match phase {
            Phase::AwaitingCapture { plan } => {
                debug!(height = buffer.area.height, "snapshot captured");
                let snapshot = Snapshot::new(buffer, &plan);
                Phase::Animating {
                    plan,
                    snapshot,
                    clock: AnimationClock::unstarted(),
                }
            }
            other => other,
        };
    }

    /// Start the clock once the captured frame has been laid out.
    pub fn start_clock(&mut self, now: Instant) {
        if let Phase::Animating { clock, .. } = &mut self.phase {
            if !clock.is_started() {
                clock.start(now);
            }
        }
    }

    /// The snapshot, when one is live.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.phase {
            Phase::Animating { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Curve-shaped progress for painting; `0.0` before the clock starts.
    pub fn eased_progress(&self, now: Instant) -> f32 {
        match &self.phase {
            Phase::Animating { clock, .. } => (self.curve)(clock.progress(now, self.duration)),
            _ => 0.0,
        }
    }

    /// Advance time.  `Finished` once the duration has elapsed (or when
    /// ticked while idle, so a stale timer stops itself).
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        match &self.phase {
            Phase::Animating { clock, .. } => {
                if clock.expired(now, self.duration) {
                    TickOutcome::Finished
                } else {
                    trace!(progress = self.eased_progress(now), "tick");
                    TickOutcome::Continue
                }
            }
            Phase::AwaitingCapture { .. } => TickOutcome::Continue,
            Phase::Idle => TickOutcome::Finished,
        }
    }

    /// End the animation: drop the snapshot, return the plan for
    /// finalization.  `None` when idle.
    pub fn finish(&mut self) -> Option<TransitionPlan> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Animating { plan, .. } => {
                debug!(target = plan.target_height, "animation finished");
                Some(plan)
            }
            Phase::AwaitingCapture { plan } => Some(plan),
            Phase::Idle => None,
        }
    }

    /// Abandon the in-flight transition (capture failure).  The snapshot, if
    /// any, is dropped.
    pub fn abort(&mut self) {
        if self.is_active() {
            debug!("animation aborted");
        }
        self.phase = Phase::Idle;
    }
}
