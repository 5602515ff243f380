//! Cached per-item row heights.
//!
//! The table translates between an absolute scroll offset (rows from the top
//! of the content) and an (item index, sub-item offset) pair, in both
//! directions.  It is rebuilt whenever the item source changes and is the
//! only piece of state the height planner reads.

/// A position in the list expressed as a top-visible item plus the offset of
/// that item's top edge relative to the viewport top (`<= 0` unless the list
/// is positioned above its first item).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPosition {
    pub index: usize,
    pub sub_offset: i32,
}

/// Ordered per-item heights, each including the inter-item spacing row(s)
/// except after the last item.  Sum equals the total content height.
#[derive(Debug, Clone, Default)]
pub struct ItemHeightTable {
    heights: Vec<u16>,
    content_height: i32,
}

impl ItemHeightTable {
    /// Build the table from measured item heights.  `spacing` rows are added
    /// to every entry but the last.
    pub fn from_measured(measured: impl IntoIterator<Item = u16>, spacing: u16) -> Self {
        let mut heights: Vec<u16> = measured.into_iter().collect();
        let last = heights.len().saturating_sub(1);
        for (i, h) in heights.iter_mut().enumerate() {
            if i != last {
                *h = h.saturating_add(spacing);
            }
        }
        let content_height = heights.iter().map(|&h| i32::from(h)).sum();
        Self {
            heights,
            content_height,
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Total content height in rows (spacing included).
    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    /// Resolve an absolute row offset to an item position.
    ///
    /// Walks the table accumulating heights until the running sum exceeds
    /// `target`; that item becomes the top-visible item with
    /// `sub_offset = running_sum_before - target`.  A target at or past the
    /// end of the content clamps to the last item with offset 0.
    pub fn resolve(&self, target: i32) -> ItemPosition {
        let mut sum = 0i32;
        for (index, &h) in self.heights.iter().enumerate() {
            let next = sum + i32::from(h);
            if next > target {
                return ItemPosition {
                    index,
                    sub_offset: sum - target,
                };
            }
            sum = next;
        }
        ItemPosition {
            index: self.heights.len().saturating_sub(1),
            sub_offset: 0,
        }
    }

    /// Absolute row offset of a position — the inverse of [`resolve`].
    ///
    /// [`resolve`]: ItemHeightTable::resolve
    pub fn offset_of(&self, pos: ItemPosition) -> i32 {
        let before: i32 = self
            .heights
            .iter()
            .take(pos.index)
            .map(|&h| i32::from(h))
            .sum();
        before - pos.sub_offset
    }
}
