use crate::column_collection::ColumnCollection;
use crate::display_data::DisplayData;
use crate::geometry::{Rect, Size};
use crate::row::DataGridRow;

use super::{CellsLayout, ElementMeasurer};

/// Stacks the displayed rows vertically.
///
/// The grid applies any pending vertical scroll before running this presenter, so the set of
/// displayed rows is stable for the whole pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowsPresenter {
    desired_size: Size,
    extent: Size,
}

impl RowsPresenter {
    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    /// Size of the arranged rows block.
    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Measures each displayed row. `current` is the current cell, as `(row, column)`.
    pub(crate) fn measure(
        &mut self,
        rows: &mut DisplayData<DataGridRow>,
        columns: &mut ColumnCollection,
        layout: CellsLayout,
        current: Option<(usize, usize)>,
        measurer: &mut dyn ElementMeasurer,
    ) -> Size {
        let mut width: f64 = 0.0;
        let mut height = 0.0;
        for (index, row) in rows.indexed_scrolling_rows_mut() {
            let layout = CellsLayout {
                current_column: current.filter(|&(r, _)| r == index).map(|(_, c)| c),
                ..layout
            };
            let size = row.measure(columns, &layout, measurer);
            width = width.max(size.width);
            height += size.height;
        }
        self.desired_size = Size::new(width, height);
        self.desired_size
    }

    /// Arranges rows top to bottom in logical order, starting `neg_vertical_offset` above the
    /// top edge (the hidden part of the first displayed row).
    pub(crate) fn arrange(
        &mut self,
        final_size: Size,
        rows: &mut DisplayData<DataGridRow>,
        columns: &ColumnCollection,
        horizontal_offset: f64,
        neg_vertical_offset: f64,
    ) -> Size {
        let mut top = -neg_vertical_offset;
        for row in rows.scrolling_rows_mut() {
            let height = row.desired_size().height;
            row.arrange(
                Rect::new(0.0, top, final_size.width, height),
                columns,
                horizontal_offset,
            );
            top += height;
        }
        self.extent = Size::new(final_size.width, (top + neg_vertical_offset).max(0.0));
        final_size
    }
}
