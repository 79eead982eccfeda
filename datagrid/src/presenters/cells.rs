use crate::column_collection::ColumnCollection;
use crate::geometry::{Rect, Size};
use crate::row::DataGridCell;

use super::{CellsLayout, ElementMeasurer, ensure_cell_clip, should_display_cell};

/// Lays out the cells of one row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellsPresenter {
    desired_height: f64,
    filler_left_edge: f64,
    actual_height: f64,
}

impl CellsPresenter {
    pub fn desired_height(&self) -> f64 {
        self.desired_height
    }

    pub fn filler_left_edge(&self) -> f64 {
        self.filler_left_edge
    }

    /// Measures the displayed cells of row `row_index`.
    ///
    /// Cells of hidden columns are collapsed. Cells of columns outside the viewport are
    /// collapsed without measuring, except on row 0, which always measures every cell so
    /// content-sized columns get a width. Content-sized columns grow their desired width to fit
    /// the measured cells.
    pub(crate) fn measure(
        &mut self,
        row_index: usize,
        cells: &mut [DataGridCell],
        filler_cell: &mut DataGridCell,
        columns: &mut ColumnCollection,
        layout: &CellsLayout,
        measurer: &mut dyn ElementMeasurer,
    ) -> Size {
        let (auto_size_height, measure_height) = match layout.row_height {
            Some(height) => {
                self.desired_height = height;
                (false, height)
            }
            None => {
                self.desired_height = 0.0;
                (true, f64::INFINITY)
            }
        };

        for (column, cell) in columns.iter().zip(cells.iter_mut()) {
            if !column.is_visible() {
                cell.collapse();
            }
        }

        let total_cells_width = columns.visible_edged_columns_width();
        let mut frozen_left_edge = 0.0;
        let mut scrolling_left_edge = -layout.horizontal_offset;
        let mut next = columns.first_visible_column();
        while let Some(index) = next {
            next = columns.next_visible_column(index);
            let Some(column) = columns.get(index) else {
                break;
            };
            let display = row_index == 0
                || should_display_cell(
                    column,
                    frozen_left_edge,
                    scrolling_left_edge,
                    layout.cells_width,
                );
            match cells.get_mut(index) {
                Some(cell) => {
                    ensure_cell_display(cell, display, layout.current_column == Some(index));
                    if display {
                        let width = column.effective_width();
                        let measure_width = if width.is_absolute() {
                            column.actual_width()
                        } else {
                            column.actual_max_width()
                        };
                        let desired =
                            cell.measure(Size::new(measure_width, measure_height), measurer);
                        if auto_size_height {
                            self.desired_height = self.desired_height.max(desired.height);
                        }
                        if width.grows_with_cells() && desired.width > column.desired_width() {
                            if let Some(column) = columns.get_mut(index) {
                                column.set_desired_width(desired.width);
                            }
                        }
                    }
                }
                None => {
                    gwarn!(
                        row_index,
                        index,
                        "CellsPresenter::measure: missing cell slot"
                    );
                }
            }

            let Some(column) = columns.get(index) else {
                break;
            };
            if column.is_frozen() {
                frozen_left_edge += column.actual_width();
            }
            scrolling_left_edge += column.actual_width();
        }

        // Measured unconditionally so activating the filler never needs another pass.
        filler_cell.measure(Size::new(f64::INFINITY, self.desired_height), measurer);

        Size::new(total_cells_width, self.desired_height)
    }

    /// Places frozen cells from the left edge and scrolling cells after them, shifted by the
    /// horizontal offset, then places the filler cell after the last column.
    pub(crate) fn arrange(
        &mut self,
        final_size: Size,
        cells: &mut [DataGridCell],
        filler_cell: &mut DataGridCell,
        columns: &ColumnCollection,
        horizontal_offset: f64,
    ) -> Size {
        self.actual_height = final_size.height;
        let mut frozen_left_edge = 0.0;
        let mut scrolling_left_edge = -horizontal_offset;
        for index in columns.visible_columns() {
            let Some(column) = columns.get(index) else {
                continue;
            };
            let width = column.actual_width();
            let cell_left_edge = if column.is_frozen() {
                let edge = frozen_left_edge;
                frozen_left_edge += width;
                edge
            } else {
                scrolling_left_edge
            };
            let Some(cell) = cells.get_mut(index) else {
                scrolling_left_edge += width;
                continue;
            };
            if cell.is_visible {
                cell.arrange(Rect::new(cell_left_edge, 0.0, width, final_size.height));
                cell.clip = ensure_cell_clip(
                    column.is_frozen(),
                    width,
                    final_size.height,
                    frozen_left_edge,
                    scrolling_left_edge,
                );
            }
            scrolling_left_edge += width;
        }

        self.filler_left_edge = scrolling_left_edge;
        // Zero wide while the filler is inactive.
        filler_cell.arrange(Rect::new(
            self.filler_left_edge,
            0.0,
            columns.filler().width(),
            final_size.height,
        ));
        final_size
    }

    /// Shows the filler cell exactly while the filler column is active.
    pub(crate) fn ensure_filler_visibility(
        &self,
        filler_cell: &mut DataGridCell,
        columns: &ColumnCollection,
    ) {
        let filler = columns.filler();
        if filler_cell.is_visible == filler.is_active() {
            return;
        }
        filler_cell.is_visible = filler.is_active();
        if filler_cell.is_visible {
            filler_cell.arrange(Rect::new(
                self.filler_left_edge,
                0.0,
                filler.width(),
                self.actual_height,
            ));
        }
    }
}

/// Collapses cells scrolled out of view. The current cell is never collapsed, it is clipped to
/// nothing instead so it keeps focus.
fn ensure_cell_display(cell: &mut DataGridCell, display: bool, is_current: bool) {
    if !is_current {
        cell.is_visible = display;
        return;
    }
    if display {
        cell.is_visible = true;
        cell.clip = None;
    } else {
        cell.clip = Some(Rect::EMPTY);
    }
}
