use alloc::vec::Vec;

use crate::column_collection::ColumnCollection;
use crate::geometry::{Rect, Size};

use super::{ElementMeasurer, constrain, ensure_cell_clip, should_display_cell};

/// Layout slot of one column header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnHeader {
    pub desired_size: Size,
    pub bounds: Rect,
    pub clip: Option<Rect>,
    pub is_visible: bool,
}

impl Default for ColumnHeader {
    fn default() -> Self {
        Self {
            desired_size: Size::ZERO,
            bounds: Rect::EMPTY,
            clip: None,
            is_visible: true,
        }
    }
}

/// Lays out the header row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnHeadersPresenter {
    // Indexed by column index.
    headers: Vec<ColumnHeader>,
    filler_header: Option<ColumnHeader>,
    desired_height: f64,
}

impl ColumnHeadersPresenter {
    pub fn header(&self, column_index: usize) -> Option<&ColumnHeader> {
        self.headers.get(column_index)
    }

    /// The filler header slot, created the first time the filler column became active.
    pub fn filler_header(&self) -> Option<&ColumnHeader> {
        self.filler_header.as_ref()
    }

    pub fn desired_height(&self) -> f64 {
        self.desired_height
    }

    /// Adds the slot of a column inserted at `column_index`.
    pub(crate) fn insert_header(&mut self, column_index: usize) {
        let at = column_index.min(self.headers.len());
        self.headers.insert(at, ColumnHeader::default());
    }

    pub(crate) fn remove_header(&mut self, column_index: usize) {
        if column_index < self.headers.len() {
            self.headers.remove(column_index);
        }
    }

    /// Collapses the slot of a hidden column.
    pub(crate) fn collapse_header(&mut self, column_index: usize) {
        if let Some(header) = self.headers.get_mut(column_index) {
            collapse(header);
        }
    }

    /// Measures every visible header; header-sized columns grow to fit their header.
    ///
    /// The header row is `header_height` tall when set, else as tall as the tallest header.
    pub(crate) fn measure(
        &mut self,
        columns: &mut ColumnCollection,
        horizontal_offset: f64,
        cells_width: f64,
        header_height: Option<f64>,
        measurer: &mut dyn ElementMeasurer,
    ) -> Size {
        self.headers
            .resize_with(columns.len(), ColumnHeader::default);
        for (column, header) in columns.iter().zip(&mut self.headers) {
            if !column.is_visible() {
                collapse(header);
            }
        }
        let (auto_size_height, measure_height) = match header_height {
            Some(height) => {
                self.desired_height = height;
                (false, height)
            }
            None => {
                self.desired_height = 0.0;
                (true, f64::INFINITY)
            }
        };

        let total_width = columns.visible_edged_columns_width();
        let mut frozen_left_edge = 0.0;
        let mut scrolling_left_edge = -horizontal_offset;
        let mut next = columns.first_visible_column();
        while let Some(index) = next {
            next = columns.next_visible_column(index);
            let Some(column) = columns.get(index) else {
                break;
            };
            let header = &mut self.headers[index];
            header.is_visible =
                should_display_cell(column, frozen_left_edge, scrolling_left_edge, cells_width);

            let width = column.effective_width();
            let measure_width = if width.is_absolute() {
                column.actual_width()
            } else {
                column.actual_max_width()
            };
            let available = Size::new(measure_width, measure_height);
            let desired = measurer.measure_header(column.header(), available);
            header.desired_size = constrain(desired, available);
            if auto_size_height {
                self.desired_height = self.desired_height.max(header.desired_size.height);
            }
            let desired_width = header.desired_size.width;
            if width.grows_with_header() && desired_width > column.desired_width() {
                if let Some(column) = columns.get_mut(index) {
                    column.set_desired_width(desired_width);
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

        Size::new(total_width, self.desired_height)
    }

    pub(crate) fn arrange(
        &mut self,
        final_size: Size,
        columns: &mut ColumnCollection,
        horizontal_offset: f64,
    ) -> Size {
        let height = final_size.height;
        let mut frozen_left_edge = 0.0;
        let mut scrolling_left_edge = -horizontal_offset;
        for index in columns.visible_columns() {
            let Some(column) = columns.get(index) else {
                continue;
            };
            let width = column.actual_width();
            let left_edge = if column.is_frozen() {
                let edge = frozen_left_edge;
                frozen_left_edge += width;
                edge
            } else {
                scrolling_left_edge
            };
            if let Some(header) = self.headers.get_mut(index) {
                if header.is_visible {
                    header.bounds = Rect::new(left_edge, 0.0, width, height);
                    header.clip = ensure_cell_clip(
                        column.is_frozen(),
                        width,
                        height,
                        frozen_left_edge,
                        scrolling_left_edge,
                    );
                }
            }
            scrolling_left_edge += width;
        }

        let filler = *columns.filler();
        if filler.is_active() && !filler.is_represented() {
            self.filler_header = Some(ColumnHeader::default());
            columns.filler_mut().set_represented(true);
        }
        if let Some(header) = &mut self.filler_header {
            header.is_visible = filler.is_active();
            header.bounds = Rect::new(scrolling_left_edge, 0.0, filler.width(), height);
        }
        final_size
    }
}

fn collapse(header: &mut ColumnHeader) {
    header.is_visible = false;
    header.desired_size = Size::ZERO;
    header.bounds = Rect::EMPTY;
    header.clip = None;
}
