//! Height planner — the geometry policy for one transition.
//!
//! Given the current height, the target height, the list's absolute scroll
//! offset, and the total content height, [`plan`] computes everything the
//! rest of the engine needs: the source crop interval to sample from the
//! snapshot, the destination interval to paint it at, the pre-capture
//! reposition (growing) and the deferred post-animation scroll correction
//! (shrinking).  The planner never touches pixels or time.

/// The computed geometry for a single height transition.
///
/// Each `(start, end)` pair is a vertical interval interpolated over the
/// animation: `src_*` is the top row sampled from the snapshot, `dst_*` the
/// row at which the sample is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub start_height: i32,
    pub target_height: i32,
    pub src_start_y: i32,
    pub src_end_y: i32,
    pub dst_start_y: i32,
    pub dst_end_y: i32,
    /// Rows to scroll the live list by *before* capture (growing only,
    /// always `<= 0`).  Nonzero means the snapshot must reflect the
    /// repositioned content.
    pub scroll_by: i32,
    /// Absolute offset to reposition the live list to *after* the animation
    /// completes and the widget has been resized down.  Present only when
    /// shrinking leaves trailing whitespace to correct.
    pub scroll_correction: Option<i32>,
}

impl TransitionPlan {
    pub fn delta(&self) -> i32 {
        self.target_height - self.start_height
    }

    pub fn is_growing(&self) -> bool {
        self.delta() > 0
    }
}

/// Compute the transition plan, or `None` for a zero-delta request.
///
/// In-flight rejection is the caller's concern — the planner is pure.
pub fn plan(
    current_height: i32,
    target_height: i32,
    scroll_offset: i32,
    content_height: i32,
) -> Option<TransitionPlan> {
    let delta = target_height - current_height;
    if delta == 0 {
        return None;
    }

    let (src_start_y, src_end_y, dst_start_y, dst_end_y);
    let mut scroll_by = 0;
    let mut scroll_correction = None;

    if delta > 0 {
        // Growing: the revealed area slides up out of the prior content.
        // Never crop above the top of rendered content.
        src_start_y = delta.min(scroll_offset);
        src_end_y = 0;
        dst_start_y = delta;
        dst_end_y = 0;
        scroll_by = src_end_y - src_start_y;
    } else {
        // Shrinking: the content slides up while the frame waits to resize.
        src_start_y = 0;
        dst_start_y = 0;
        dst_end_y = -delta;
        src_end_y = if content_height < current_height {
            if content_height < target_height {
                // Content is shorter than even the target — nothing to scroll.
                0
            } else {
                // Compensate for the slack already visible below the content.
                -delta - (current_height - content_height)
            }
        } else {
            -delta
        };
        if src_end_y != 0 {
            scroll_correction = Some(scroll_offset + src_end_y - src_start_y);
        }
    }

    Some(TransitionPlan {
        start_height: current_height,
        target_height,
        src_start_y,
        src_end_y,
        dst_start_y,
        dst_end_y,
        scroll_by,
        scroll_correction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delta_is_a_no_op() {
        assert!(plan(200, 200, 0, 500).is_none());
        assert!(plan(0, 0, 0, 0).is_none());
    }

    #[test]
    fn growing_from_top() {
        let p = plan(200, 350, 0, 500).unwrap();
        assert_eq!(p.delta(), 150);
        assert_eq!(p.src_start_y, 0);
        assert_eq!(p.src_end_y, 0);
        assert_eq!(p.dst_start_y, 150);
        assert_eq!(p.dst_end_y, 0);
        assert_eq!(p.scroll_by, 0, "no pre-scroll needed at the top");
        assert_eq!(p.scroll_correction, None);
    }

    #[test]
    fn growing_with_pre_scroll() {
        let p = plan(200, 350, 80, 500).unwrap();
        assert_eq!(p.src_start_y, 80);
        assert_eq!(p.scroll_by, -80, "content scrolls back 80 rows before capture");
    }

    #[test]
    fn growing_pre_scroll_capped_by_delta() {
        // Scrolled further than the height delta: only crop `delta` rows.
        let p = plan(200, 300, 500, 900).unwrap();
        assert_eq!(p.src_start_y, 100);
        assert_eq!(p.scroll_by, -100);
    }

    #[test]
    fn shrinking_with_content_filling_frame() {
        let p = plan(400, 250, 120, 900).unwrap();
        assert_eq!(p.delta(), -150);
        assert_eq!(p.src_start_y, 0);
        assert_eq!(p.src_end_y, 150);
        assert_eq!(p.dst_start_y, 0);
        assert_eq!(p.dst_end_y, 150);
        assert_eq!(p.scroll_correction, Some(270));
    }

    #[test]
    fn shrinking_with_slack() {
        // Content 300 rows inside a 400-row frame: 100 rows of slack.
        let p = plan(400, 250, 0, 300).unwrap();
        assert_eq!(p.src_end_y, 50, "150 - 100 rows of existing slack");
        assert_eq!(p.scroll_correction, Some(50));
    }

    #[test]
    fn shrinking_below_content_height_needs_no_scroll() {
        // Content shorter than even the target height.
        let p = plan(400, 250, 0, 200).unwrap();
        assert_eq!(p.src_end_y, 0);
        assert_eq!(p.scroll_correction, None);
    }

    #[test]
    fn empty_content_degenerates_cleanly() {
        let p = plan(100, 40, 0, 0).unwrap();
        assert_eq!(p.src_end_y, 0);
        assert_eq!(p.dst_end_y, 60);
        assert_eq!(p.scroll_correction, None);
    }
}
