//! Layout participants.
//!
//! Presenters run the two layout passes the host drives: `measure` computes desired sizes (and
//! grows content-sized columns), `arrange` assigns final bounds and clips. They read column
//! metrics from the [`ColumnCollection`] and never change which rows are displayed.
//!
//! [`ColumnCollection`]: crate::ColumnCollection

mod cells;
mod column_headers;
mod details;
mod rows;

pub use cells::CellsPresenter;
pub use column_headers::{ColumnHeader, ColumnHeadersPresenter};
pub use details::DetailsPresenter;
pub use rows::RowsPresenter;

use crate::column::{CellElement, DataGridColumn};
use crate::geometry::{Rect, Size};
use crate::tolerance;

/// Host measuring service for generated content.
pub trait ElementMeasurer {
    fn measure_cell(&mut self, element: &CellElement, available: Size) -> Size;

    fn measure_header(&mut self, header: Option<&str>, available: Size) -> Size;

    /// Size of the details area of row `row_index`. Rows without details content report zero.
    fn measure_details(&mut self, row_index: usize, available: Size) -> Size {
        let _ = (row_index, available);
        Size::ZERO
    }
}

/// Measures text as a fixed-width font would lay it out on one line.
///
/// Useful for terminal hosts and for tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub char_width: f64,
    pub line_height: f64,
    /// Horizontal plus vertical padding around cell content.
    pub padding: f64,
    pub check_box_size: f64,
    pub details_height: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 16.0,
            padding: 4.0,
            check_box_size: 16.0,
            details_height: 0.0,
        }
    }
}

impl MonospaceMeasurer {
    fn text_size(&self, text: &str) -> Size {
        Size::new(
            text.chars().count() as f64 * self.char_width + 2.0 * self.padding,
            self.line_height + 2.0 * self.padding,
        )
    }
}

impl ElementMeasurer for MonospaceMeasurer {
    fn measure_cell(&mut self, element: &CellElement, available: Size) -> Size {
        let size = match element {
            CellElement::Empty | CellElement::Template { .. } => Size::ZERO,
            CellElement::TextBlock { text, .. } | CellElement::TextBox { text, .. } => {
                self.text_size(text)
            }
            CellElement::CheckBox { content, .. } => {
                let label = content.as_deref().map_or(0.0, |c| self.text_size(c).width);
                Size::new(
                    self.check_box_size + label + 2.0 * self.padding,
                    self.check_box_size.max(self.line_height) + 2.0 * self.padding,
                )
            }
        };
        constrain(size, available)
    }

    fn measure_header(&mut self, header: Option<&str>, available: Size) -> Size {
        constrain(self.text_size(header.unwrap_or_default()), available)
    }

    fn measure_details(&mut self, _row_index: usize, available: Size) -> Size {
        constrain(Size::new(available.width, self.details_height), available)
    }
}

/// Clamps a desired size to the space offered, as the host layout does.
pub(crate) fn constrain(desired: Size, available: Size) -> Size {
    Size::new(
        desired.width.min(available.width).max(0.0),
        desired.height.min(available.height).max(0.0),
    )
}

/// Whether a cell of `column` intersects the visible cells area.
///
/// `frozen_left_edge` is the right edge of the frozen columns laid out so far and
/// `scrolling_left_edge` the (scrolled) left edge of the next scrolling column. A scrolling
/// column fully covered by frozen columns is not displayed.
pub fn should_display_cell(
    column: &DataGridColumn,
    frozen_left_edge: f64,
    scrolling_left_edge: f64,
    cells_width: f64,
) -> bool {
    if !column.is_visible() {
        return false;
    }
    let left_edge = if column.is_frozen() {
        frozen_left_edge
    } else {
        scrolling_left_edge
    };
    let right_edge = left_edge + column.actual_width();
    tolerance::greater_than(right_edge, 0.0)
        && tolerance::less_than_or_close(left_edge, cells_width)
        && tolerance::greater_than(right_edge, frozen_left_edge)
}

/// Clip for a cell arranged at `cell_left_edge`: a scrolling cell partially under the frozen
/// columns only shows the part right of `frozen_left_edge`. `None` means unclipped.
pub fn ensure_cell_clip(
    is_frozen: bool,
    width: f64,
    height: f64,
    frozen_left_edge: f64,
    cell_left_edge: f64,
) -> Option<Rect> {
    if !is_frozen && frozen_left_edge > cell_left_edge {
        let x_clip = width.min(frozen_left_edge - cell_left_edge);
        Some(Rect::new(x_clip, 0.0, width - x_clip, height))
    } else {
        None
    }
}

/// Inputs a cells or headers pass needs from the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellsLayout {
    pub horizontal_offset: f64,
    pub cells_width: f64,
    /// Explicit row height, `None` to size rows to their cells.
    pub row_height: Option<f64>,
    /// Column of the current cell when the presented row is the current row.
    pub current_column: Option<usize>,
}
