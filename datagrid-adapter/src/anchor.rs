use core::fmt;

use datagrid::{DataGrid, GridItem};

/// A scroll anchor that keeps a row in place across item changes.
///
/// The anchor records an item identity rather than a row index, so it survives inserts above
/// the viewport, reorders and wholesale [`DataGrid::set_items`] replacements.
#[derive(Clone, PartialEq)]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// Distance from the anchor row's top to the vertical offset.
    pub offset_in_viewport: f64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the first displayed scrolling row.
///
/// Returns `None` when no row is displayed.
pub fn capture_first_displayed_anchor<T: GridItem, K>(
    grid: &DataGrid<T>,
    key_of: impl FnOnce(&T) -> K,
) -> Option<ScrollAnchor<K>> {
    let row = grid.display_data().first_displayed_scrolling_row()?;
    let item = grid.item(row)?;
    Some(ScrollAnchor {
        key: key_of(item),
        offset_in_viewport: (grid.vertical_offset() - grid.row_top(row)).max(0.0),
    })
}

/// Scrolls so the anchored row sits where it was captured.
///
/// `key_to_row` maps the key onto a row index of the *current* items. Returns `false` when the
/// key is gone or maps outside the items. The resulting offset is clamped like any other
/// vertical scroll.
pub fn apply_anchor<T: GridItem, K>(
    grid: &mut DataGrid<T>,
    anchor: &ScrollAnchor<K>,
    key_to_row: impl FnOnce(&K) -> Option<usize>,
) -> bool {
    let Some(row) = key_to_row(&anchor.key) else {
        return false;
    };
    if row >= grid.row_count() {
        return false;
    }
    grid.set_vertical_offset(grid.row_top(row) + anchor.offset_in_viewport);
    true
}
