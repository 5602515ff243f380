//! The animated list widget: capture-and-interpolate height transitions.
//!
//! Instead of re-rendering the live list on every frame of a height change,
//! the widget captures one offscreen frame of the list and slides a cropped
//! window of it between the planner's source and destination rectangles.
//! Live rendering resumes the moment the animation ends.
//!
//! The widget follows the usual split: [`AnimatedList`] is rebuilt each
//! frame, [`AnimatedListState`] persists and owns the engine.

use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
use tracing::debug;

use crate::core::{
    engine::{Driver, Phase, TickOutcome, DEFAULT_DURATION},
    heights::ItemHeightTable,
    plan::plan,
    AnimationError,
};

use super::list_view::{ListAdapter, ListState, ListView};

// ───────────────────────────────────────── deferred work ─────

/// One-shot actions that must run after the next completed draw pass, once
/// the geometry they depend on has been laid out.
enum AfterLayout {
    /// The snapshot is captured and painted once; start the clock.
    StartClock,
    /// Post-shrink scroll correction to the given absolute offset.  Must run
    /// after the resize's own layout has settled, not before.
    Reposition(i32),
    /// Surface a capture failure to the host.
    SignalError(AnimationError),
}

/// Events reported to the host when the deferred queue drains.
#[derive(Debug)]
pub enum LayoutEvent {
    /// The animation clock started; the host should begin frame ticks.
    AnimationStarted,
    /// The capture failed and the animation attempt was abandoned.
    CaptureFailed(AnimationError),
}

// ───────────────────────────────────────── state ─────────────

/// Persistent widget state: the live list, its measured heights, the current
/// declared height, and the interpolation driver.
pub struct AnimatedListState {
    table: ItemHeightTable,
    list: ListState,
    height: i32,
    spacing: u16,
    driver: Driver,
    /// Set while the capture render runs: the capture draws the real
    /// content and must never take the snapshot-painting path.
    capturing: bool,
    after_layout: Vec<AfterLayout>,
}

impl AnimatedListState {
    pub fn new(height: i32, spacing: u16) -> Self {
        Self {
            table: ItemHeightTable::default(),
            list: ListState::default(),
            height,
            spacing,
            driver: Driver::new(DEFAULT_DURATION),
            capturing: false,
            after_layout: Vec::new(),
        }
    }

    /// Declared widget height in rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_active()
    }

    pub fn duration(&self) -> std::time::Duration {
        self.driver.duration()
    }

    pub fn set_duration(&mut self, duration: std::time::Duration) {
        self.driver.set_duration(duration);
    }

    /// Replace the default ease-in-ease-out curve.
    pub fn set_curve(&mut self, curve: impl Fn(f32) -> f32 + Send + 'static) {
        self.driver.set_curve(curve);
    }

    /// Absolute scroll offset of the live list.
    pub fn scroll_offset(&self) -> i32 {
        self.list.scroll_offset(&self.table)
    }

    /// Scroll the live list.  Ignored while an animation is in flight.
    pub fn scroll_by(&mut self, delta: i32) {
        if self.driver.is_active() {
            return;
        }
        self.list.scroll_by(&self.table, delta, self.height);
    }

    /// Re-measure the item source into a fresh height table.
    ///
    /// Rejected while an animation is in flight — the plan and snapshot
    /// would no longer match the content.
    pub fn reload(&mut self, adapter: &dyn ListAdapter) -> Result<(), AnimationError> {
        if self.driver.is_active() {
            return Err(AnimationError::AnimationInFlight);
        }
        let offset = self.scroll_offset();
        self.table = adapter.measure_heights(self.spacing);
        debug!(
            items = self.table.len(),
            content = self.table.content_height(),
            "item source measured"
        );
        let max = (self.table.content_height() - self.height).max(0);
        self.list.reposition(&self.table, offset.clamp(0, max));
        Ok(())
    }

    /// Begin a transition to the given absolute height.
    ///
    /// Returns `false` — with no other effect — when an animation is already
    /// in flight, when the delta is zero, or when the target is negative.
    pub fn animate_to(&mut self, target_height: i32) -> bool {
        if self.driver.is_active() || target_height < 0 {
            return false;
        }
        let scroll_offset = self.scroll_offset();
        let Some(plan) = plan(
            self.height,
            target_height,
            scroll_offset,
            self.table.content_height(),
        ) else {
            return false;
        };

        // Growing: reposition the content first so the capture already
        // reflects the revealed region, then resize so the capture renders
        // at the target height.
        if plan.scroll_by != 0 {
            self.list
                .reposition(&self.table, scroll_offset + plan.scroll_by);
        }
        if plan.is_growing() {
            self.height = plan.target_height;
        }

        debug!(
            from = plan.start_height,
            to = plan.target_height,
            scroll_by = plan.scroll_by,
            "animate_to"
        );
        self.driver.begin(plan)
    }

    /// Convenience: transition by a relative number of rows.
    pub fn animate_by(&mut self, delta: i32) -> bool {
        self.animate_to(self.height + delta)
    }

    /// Advance the animation clock.  On `Finished` the snapshot is released,
    /// the declared height snaps to exactly the target, and any deferred
    /// scroll correction is queued for the next layout pass.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.driver.tick(now);
        if outcome == TickOutcome::Finished {
            if let Some(plan) = self.driver.finish() {
                self.height = plan.target_height;
                if let Some(correction) = plan.scroll_correction {
                    self.after_layout.push(AfterLayout::Reposition(correction));
                }
            }
        }
        outcome
    }

    /// Drain deferred one-shot work.  The host calls this once after every
    /// completed draw pass.
    pub fn on_layout_complete(&mut self, now: Instant) -> Vec<LayoutEvent> {
        let mut events = Vec::new();
        for action in std::mem::take(&mut self.after_layout) {
            match action {
                AfterLayout::StartClock => {
                    self.driver.start_clock(now);
                    events.push(LayoutEvent::AnimationStarted);
                }
                AfterLayout::Reposition(offset) => {
                    debug!(offset, "applying deferred scroll correction");
                    self.list.reposition(&self.table, offset);
                }
                AfterLayout::SignalError(err) => events.push(LayoutEvent::CaptureFailed(err)),
            }
        }
        events
    }

    // ── rendering ──────────────────────────────────────────────

    pub(crate) fn render_in(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        adapter: &dyn ListAdapter,
        now: Instant,
    ) {
        if area.is_empty() {
            return;
        }
        if self.capturing {
            self.render_live(area, buf, adapter);
            return;
        }
        if !self.driver.is_active() {
            self.render_live(area, buf, adapter);
            return;
        }
        if matches!(self.driver.phase(), Phase::AwaitingCapture { .. }) {
            match self.capture(adapter, area.width) {
                Ok(frame) => {
                    self.driver.attach_snapshot(frame);
                    self.after_layout.push(AfterLayout::StartClock);
                }
                Err(err) => {
                    self.driver.abort();
                    self.after_layout.push(AfterLayout::SignalError(err));
                    self.render_live(area, buf, adapter);
                    return;
                }
            }
        }
        // Every animating frame, including the first one drawn before the
        // clock starts (progress 0 — the starting crop, never a flash of
        // uncropped content).
        self.paint_snapshot(area, buf, now);
    }

    fn render_live(&mut self, area: Rect, buf: &mut Buffer, adapter: &dyn ListAdapter) {
        ListView::new(adapter)
            .spacing(self.spacing)
            .render(area, buf, &mut self.list);
    }

    /// Render the list's current visual state into an offscreen buffer sized
    /// to the widget's current bounds.
    fn capture(
        &mut self,
        adapter: &dyn ListAdapter,
        width: u16,
    ) -> Result<Buffer, AnimationError> {
        let height = self.height;
        if width == 0 || height <= 0 || height > i32::from(u16::MAX) {
            return Err(AnimationError::SnapshotAlloc { width, height });
        }
        let area = Rect::new(0, 0, width, height as u16);
        self.capturing = true;
        let mut frame = Buffer::empty(area);
        self.render_live(area, &mut frame, adapter);
        self.capturing = false;
        Ok(frame)
    }

    /// Paint one interpolated frame from the snapshot.  Rows falling outside
    /// the snapshot or the widget area are skipped, so a degenerate
    /// zero-height sample simply paints nothing.
    fn paint_snapshot(&self, area: Rect, buf: &mut Buffer, now: Instant) {
        let Some(snapshot) = self.driver.snapshot() else {
            return;
        };
        let eased = self.driver.eased_progress(now);
        let geo = snapshot.frame_geometry(eased, self.height);
        let source = snapshot.buffer();
        let width = area.width.min(source.area.width);

        for row in 0..geo.sample_height() {
            let sy = geo.src_y + row;
            let dy = geo.dst_y + row;
            if sy < 0 || sy >= snapshot.height() {
                continue;
            }
            if dy < 0 || dy >= i32::from(area.height) {
                continue;
            }
            for x in 0..width {
                if let Some(cell) = source.cell((x, sy as u16)) {
                    if let Some(target) = buf.cell_mut((area.x + x, area.y + dy as u16)) {
                        *target = cell.clone();
                    }
                }
            }
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// The per-frame widget — borrow the adapter, render into the state.
pub struct AnimatedList<'a> {
    adapter: &'a dyn ListAdapter,
}

impl<'a> AnimatedList<'a> {
    pub fn new(adapter: &'a dyn ListAdapter) -> Self {
        Self { adapter }
    }
}

impl StatefulWidget for AnimatedList<'_> {
    type State = AnimatedListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.render_in(area, buf, self.adapter, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::curve;
    use ratatui::text::Line;
    use std::time::Duration;

    /// Item `i` is `heights[i]` rows of the repeated digit `i`.
    struct Digits(Vec<u16>);

    impl ListAdapter for Digits {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn height_of(&self, index: usize) -> u16 {
            self.0[index]
        }

        fn render_line(&self, index: usize, _line: u16, width: u16) -> Line<'_> {
            Line::from(index.to_string().repeat(width as usize))
        }
    }

    fn state_with(adapter: &Digits, height: i32) -> AnimatedListState {
        let mut state = AnimatedListState::new(height, 0);
        state.set_duration(Duration::from_millis(100));
        state.set_curve(curve::linear);
        state.reload(adapter).unwrap();
        state
    }

    fn draw(state: &mut AnimatedListState, adapter: &Digits, height: u16, now: Instant) -> Buffer {
        let area = Rect::new(0, 0, 4, height);
        let mut buf = Buffer::empty(area);
        state.render_in(area, &mut buf, adapter, now);
        buf
    }

    fn symbol_at(buf: &Buffer, y: u16) -> &str {
        buf.cell((0u16, y)).expect("cell in bounds").symbol()
    }

    #[test]
    fn zero_delta_request_creates_nothing() {
        let adapter = Digits(vec![5, 5]);
        let mut state = state_with(&adapter, 6);
        assert!(!state.animate_to(6));
        assert!(!state.is_animating());
        assert!(state.on_layout_complete(Instant::now()).is_empty());
    }

    #[test]
    fn concurrent_request_is_rejected_without_side_effects() {
        let adapter = Digits(vec![5, 5, 5]);
        let mut state = state_with(&adapter, 4);
        assert!(state.animate_to(10));
        let height_after_first = state.height();
        assert!(!state.animate_to(6));
        assert!(!state.animate_by(2));
        assert_eq!(state.height(), height_after_first);

        // Let the first animation run to completion untouched.
        let t0 = Instant::now();
        draw(&mut state, &adapter, 10, t0);
        state.on_layout_complete(t0);
        assert_eq!(state.tick(t0 + state.duration()), TickOutcome::Finished);
        assert_eq!(state.height(), 10);
    }

    #[test]
    fn reload_is_rejected_while_animating() {
        let adapter = Digits(vec![5, 5]);
        let mut state = state_with(&adapter, 4);
        assert!(state.animate_to(8));
        assert!(matches!(
            state.reload(&adapter),
            Err(AnimationError::AnimationInFlight)
        ));
    }

    #[test]
    fn grow_captures_on_next_draw_and_starts_clock() {
        let adapter = Digits(vec![3, 3, 3]);
        let mut state = state_with(&adapter, 4);
        assert!(state.animate_to(8));
        // Growing resizes immediately so the capture renders at the target.
        assert_eq!(state.height(), 8);

        let t0 = Instant::now();
        draw(&mut state, &adapter, 8, t0);
        let events = state.on_layout_complete(t0);
        assert!(matches!(events.as_slice(), [LayoutEvent::AnimationStarted]));

        assert_eq!(state.tick(t0 + Duration::from_millis(50)), TickOutcome::Continue);
        assert_eq!(state.tick(t0 + Duration::from_millis(100)), TickOutcome::Finished);
        assert!(!state.is_animating());
        assert_eq!(state.height(), 8);
    }

    #[test]
    fn first_painted_frame_shows_starting_crop() {
        let adapter = Digits(vec![3, 3, 3]);
        let mut state = state_with(&adapter, 4);
        assert!(state.animate_to(8));

        // The capture draw happens before any tick: progress must be 0, so
        // the content sits at dst_start (4 rows down), the top rows blank.
        let t0 = Instant::now();
        let buf = draw(&mut state, &adapter, 8, t0);
        assert_eq!(symbol_at(&buf, 0), " ");
        assert_eq!(symbol_at(&buf, 3), " ");
        assert_eq!(symbol_at(&buf, 4), "0");
    }

    #[test]
    fn mid_animation_frame_interpolates_the_crop() {
        let adapter = Digits(vec![3, 3, 3]);
        let mut state = state_with(&adapter, 4);
        state.set_duration(Duration::from_secs(1));
        assert!(state.animate_to(8));

        let t0 = Instant::now();
        draw(&mut state, &adapter, 8, t0);
        state.on_layout_complete(t0);

        // Linear curve, progress 0.5: dst has slid from 4 down to 2.
        let buf = draw(&mut state, &adapter, 8, t0 + Duration::from_millis(500));
        assert_eq!(symbol_at(&buf, 1), " ");
        assert_eq!(symbol_at(&buf, 2), "0");
    }

    #[test]
    fn shrink_applies_deferred_scroll_correction() {
        // 9 rows of content in a 8-row frame, scrolled to the top.
        let adapter = Digits(vec![3, 3, 3]);
        let mut state = state_with(&adapter, 8);
        assert!(state.animate_to(5));
        // Shrinking keeps the start height until finalization.
        assert_eq!(state.height(), 8);

        let t0 = Instant::now();
        draw(&mut state, &adapter, 8, t0);
        state.on_layout_complete(t0);

        let duration = state.duration();
        assert_eq!(state.tick(t0 + duration), TickOutcome::Finished);
        assert_eq!(state.height(), 5);

        // Correction runs only on the next layout pass, after the resize.
        // content(9) < start(8)? no — content fills the frame: src_end = 3.
        draw(&mut state, &adapter, 5, t0 + duration);
        state.on_layout_complete(t0 + duration);
        assert_eq!(state.scroll_offset(), 3);
    }

    #[test]
    fn capture_failure_aborts_and_signals_the_host() {
        let adapter = Digits(vec![3, 3, 3]);
        let mut state = state_with(&adapter, 70_000);
        assert!(state.animate_by(10));

        let t0 = Instant::now();
        draw(&mut state, &adapter, 10, t0);
        assert!(!state.is_animating(), "attempt abandoned");
        let events = state.on_layout_complete(t0);
        assert!(matches!(
            events.as_slice(),
            [LayoutEvent::CaptureFailed(AnimationError::SnapshotAlloc { .. })]
        ));
    }

    #[test]
    fn empty_item_source_still_animates() {
        let adapter = Digits(vec![]);
        let mut state = state_with(&adapter, 6);
        assert!(state.animate_to(3));

        let t0 = Instant::now();
        draw(&mut state, &adapter, 6, t0);
        state.on_layout_complete(t0);
        assert_eq!(state.tick(t0 + state.duration()), TickOutcome::Finished);
        assert_eq!(state.height(), 3);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn grow_with_pre_scroll_repositions_before_capture() {
        // 16 rows of content in a 4-row frame, scrolled down 8.
        let adapter = Digits(vec![4, 4, 4, 4]);
        let mut state = state_with(&adapter, 4);
        state.scroll_by(8);
        assert_eq!(state.scroll_offset(), 8);

        assert!(state.animate_to(10));
        // delta 6 > 0, src_start = min(8, 6) = 6 → scrolled back 6 rows.
        assert_eq!(state.scroll_offset(), 2);
    }
}
