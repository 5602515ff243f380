//! Layout helpers — split the terminal area into regions.

use ratatui::layout::Rect;

/// Primary screen layout: the bottom-anchored list panel above a one-row
/// status bar.  The panel grows upward, so its top edge moves as its height
/// animates while its bottom edge stays put.
pub struct AppLayout {
    pub panel_area: Rect,
    pub status_area: Rect,
    /// Rows available to the panel (everything above the status bar).
    pub avail_rows: i32,
}

impl AppLayout {
    /// Compute the layout from the full terminal area and the panel's
    /// current declared height.
    pub fn from_area(area: Rect, panel_height: i32) -> Self {
        let avail = i32::from(area.height.saturating_sub(1));
        let height = panel_height.clamp(0, avail) as u16;
        let panel_area = Rect::new(
            area.x,
            area.y + avail as u16 - height,
            area.width,
            height,
        );
        let status_area = Rect::new(area.x, area.y + avail as u16, area.width, 1.min(area.height));
        Self {
            panel_area,
            status_area,
            avail_rows: avail,
        }
    }
}
