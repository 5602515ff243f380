//! Virtualized scrollable-list primitive.
//!
//! A thin collaborator of the animation engine: it renders only the visible
//! items, can report its absolute scroll offset, and can be repositioned so
//! that item *i*'s top aligns to a given row.  The animated widget wraps it
//! and invokes it both for live rendering and for offscreen capture.

use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::StatefulWidget};

use crate::core::heights::{ItemHeightTable, ItemPosition};

// ───────────────────────────────────────── adapter ───────────

/// Supplies item count, per-item measured height, and row content.
pub trait ListAdapter {
    fn len(&self) -> usize;

    /// Natural height of an item in rows, excluding inter-item spacing.
    fn height_of(&self, index: usize) -> u16;

    /// Content for row `line` (0-based) of item `index`.
    fn render_line(&self, index: usize, line: u16, width: u16) -> Line<'_>;

    /// Measure every item at its natural height into a fresh table.
    fn measure_heights(&self, spacing: u16) -> ItemHeightTable {
        ItemHeightTable::from_measured((0..self.len()).map(|i| self.height_of(i)), spacing)
    }
}

// ───────────────────────────────────────── state ─────────────

/// Persistent scroll state: the top-visible item and the row of its top edge
/// relative to the viewport top (`<= 0` when the item is partially scrolled
/// off).
#[derive(Debug, Clone, Copy, Default)]
pub struct ListState {
    pub top_item: usize,
    pub top_offset: i32,
}

impl ListState {
    /// Absolute scroll offset in rows from the top of the content.
    pub fn scroll_offset(&self, table: &ItemHeightTable) -> i32 {
        table.offset_of(ItemPosition {
            index: self.top_item,
            sub_offset: self.top_offset,
        })
    }

    /// Scroll so the content row `target` sits at the viewport top.
    /// Out-of-range targets clamp (start of content / last item).
    pub fn reposition(&mut self, table: &ItemHeightTable, target: i32) {
        let pos = table.resolve(target.max(0));
        self.top_item = pos.index;
        self.top_offset = pos.sub_offset;
    }

    /// Relative scroll, clamped so the viewport never runs past the content.
    pub fn scroll_by(&mut self, table: &ItemHeightTable, delta: i32, viewport_height: i32) {
        let max = (table.content_height() - viewport_height).max(0);
        let target = (self.scroll_offset(table) + delta).clamp(0, max);
        self.reposition(table, target);
    }
}

// ───────────────────────────────────────── widget ────────────

/// The list widget itself — created fresh each frame.
pub struct ListView<'a> {
    adapter: &'a dyn ListAdapter,
    spacing: u16,
}

impl<'a> ListView<'a> {
    pub fn new(adapter: &'a dyn ListAdapter) -> Self {
        Self {
            adapter,
            spacing: 0,
        }
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }
}

impl StatefulWidget for ListView<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() || self.adapter.len() == 0 {
            return;
        }
        if state.top_item >= self.adapter.len() {
            state.top_item = self.adapter.len() - 1;
            state.top_offset = 0;
        }

        let viewport = i32::from(area.height);
        let mut y = state.top_offset;
        let mut index = state.top_item;

        while index < self.adapter.len() && y < viewport {
            let item_height = i32::from(self.adapter.height_of(index));
            for line_no in 0..item_height {
                let dy = y + line_no;
                if dy < 0 || dy >= viewport {
                    continue;
                }
                let line = self.adapter.render_line(index, line_no as u16, area.width);
                buf.set_line(area.x, area.y + dy as u16, &line, area.width);
            }
            y += item_height + i32::from(self.spacing);
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test adapter: item `i` is `heights[i]` rows of the repeated digit `i`.
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

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).expect("cell in bounds").symbol()
    }

    fn render(adapter: &Digits, state: &mut ListState, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        ListView::new(adapter).render(area, &mut buf, state);
        buf
    }

    #[test]
    fn renders_items_top_to_bottom() {
        let adapter = Digits(vec![2, 3, 1]);
        let mut state = ListState::default();
        let buf = render(&adapter, &mut state, 4, 6);
        for (y, expected) in [(0, "0"), (1, "0"), (2, "1"), (3, "1"), (4, "1"), (5, "2")] {
            assert_eq!(symbol_at(&buf, 0, y), expected, "row {y}");
        }
    }

    #[test]
    fn clips_partially_scrolled_top_item() {
        let adapter = Digits(vec![3, 3]);
        let mut state = ListState {
            top_item: 0,
            top_offset: -2,
        };
        let buf = render(&adapter, &mut state, 2, 4);
        // Only the last row of item 0 is visible, then item 1.
        assert_eq!(symbol_at(&buf, 0, 0), "0");
        assert_eq!(symbol_at(&buf, 0, 1), "1");
    }

    #[test]
    fn scroll_by_clamps_to_content() {
        let adapter = Digits(vec![4, 4, 4]);
        let table = adapter.measure_heights(0);
        let mut state = ListState::default();

        state.scroll_by(&table, 100, 5);
        assert_eq!(state.scroll_offset(&table), 7, "12 rows - 5 viewport");

        state.scroll_by(&table, -100, 5);
        assert_eq!(state.scroll_offset(&table), 0);
    }

    #[test]
    fn reposition_round_trips_through_offset() {
        let adapter = Digits(vec![4, 6, 5]);
        let table = adapter.measure_heights(0);
        let mut state = ListState::default();
        state.reposition(&table, 7);
        assert_eq!(state.top_item, 1);
        assert_eq!(state.top_offset, -3);
        assert_eq!(state.scroll_offset(&table), 7);
    }

    #[test]
    fn stale_top_item_is_clamped_on_render() {
        let adapter = Digits(vec![2]);
        let mut state = ListState {
            top_item: 9,
            top_offset: -1,
        };
        render(&adapter, &mut state, 2, 4);
        assert_eq!(state.top_item, 0);
        assert_eq!(state.top_offset, 0);
    }
}
