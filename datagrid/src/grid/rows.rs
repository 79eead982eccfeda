use alloc::vec::Vec;

use super::DataGrid;
use crate::column::{CellContext, ColumnBehavior};
use crate::display_data::DisplayRow;
use crate::editing::DataGridEditingUnit;
use crate::error::{DataGridError, Result};
use crate::events::{
    DataGridRowDetailsEventArgs, DataGridRowEventArgs, DataGridSelectionChangedEventArgs, raise,
};
use crate::geometry::Size;
use crate::index_table::IndexToValueTable;
use crate::item::GridItem;
use crate::options::{DataGridRowDetailsVisibilityMode, Invalidation};
use crate::row::DataGridRow;
use crate::tolerance;

impl<T: GridItem> DataGrid<T> {
    /// Sets the whole grid size without running a layout pass, e.g. when an adapter learns
    /// about a resize before the next frame.
    pub fn set_viewport(&mut self, size: Size) {
        self.available = size;
        // An auto-sized header row keeps its last measured height.
        if self.columns.is_empty() {
            self.header_height = 0.0;
        } else if let Some(height) = self.options.column_header_height {
            self.header_height = height;
        }
        self.update_displayed_rows();
        self.update_displayed_columns();
        self.invalidate(Invalidation::Measure);
    }

    pub fn viewport(&self) -> Size {
        self.available
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.horizontal_offset
    }

    pub fn max_horizontal_offset(&self) -> f64 {
        (self.columns.visible_edged_columns_width() - self.cells_width()).max(0.0)
    }

    pub fn set_horizontal_offset(&mut self, offset: f64) {
        self.horizontal_offset = offset.max(0.0);
        self.clamp_horizontal_offset();
        self.update_displayed_columns();
        // Cells change display state, not only position.
        self.invalidate(Invalidation::Measure);
    }

    /// Offset of the viewport top within all rows.
    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    /// How far the first displayed row is scrolled above the top edge.
    pub fn neg_vertical_offset(&self) -> f64 {
        self.neg_vertical_offset
    }

    pub fn total_rows_height(&self) -> f64 {
        self.row_heights.total()
    }

    pub fn max_vertical_offset(&self) -> f64 {
        (self.row_heights.total() - self.cells_height()).max(0.0)
    }

    pub fn set_vertical_offset(&mut self, offset: f64) {
        self.vertical_offset = offset;
        self.update_displayed_rows();
        self.invalidate(Invalidation::Measure);
    }

    /// Scrolls by `delta` (positive scrolls down) and realizes the newly exposed rows.
    pub fn scroll_rows_by_height(&mut self, delta: f64) {
        self.set_vertical_offset(self.vertical_offset + delta);
    }

    /// Defers a vertical scroll to the next measure pass, for scrolls requested before the rows
    /// could be laid out.
    pub fn queue_vertical_scroll(&mut self, delta: f64) {
        let pending = self.display_data.pending_vertical_scroll_height();
        self.display_data
            .set_pending_vertical_scroll_height(pending + delta);
        self.invalidate(Invalidation::Measure);
    }

    /// Top of row `row_index` within all rows.
    pub fn row_top(&self, row_index: usize) -> f64 {
        self.row_heights.row_start(row_index)
    }

    /// Measured (or estimated) height of a row.
    pub fn row_height(&self, row_index: usize) -> Option<f64> {
        self.row_heights.height(row_index)
    }

    /// Scrolls the least distance that makes row `row_index` fully visible.
    pub fn scroll_into_view(&mut self, row_index: usize) -> Result<()> {
        self.check_row_index(row_index)?;
        let top = self.row_heights.row_start(row_index);
        let bottom = top + self.row_heights.height(row_index).unwrap_or(0.0);
        let viewport = self.cells_height();
        if top < self.vertical_offset {
            self.set_vertical_offset(top);
        } else if bottom > self.vertical_offset + viewport {
            self.set_vertical_offset(bottom - viewport);
        }
        Ok(())
    }

    /// Scrolls horizontally so column `column_index` is visible right of the frozen columns.
    pub fn scroll_column_into_view(&mut self, column_index: usize) -> Result<()> {
        let column = self
            .columns
            .get(column_index)
            .ok_or(DataGridError::ColumnNotInThisGrid(column_index))?;
        if column.is_frozen() {
            return Ok(());
        }
        let Some(left) = self.columns.column_left_edge(column_index) else {
            return Ok(());
        };
        let right = left + column.actual_width();
        let frozen = self.columns.visible_frozen_columns_width();
        if left - self.horizontal_offset < frozen {
            self.set_horizontal_offset(left - frozen);
        } else if right - self.horizontal_offset > self.cells_width() {
            self.set_horizontal_offset(right - self.cells_width());
        }
        Ok(())
    }

    /// Re-derives the row window from the vertical offset and viewport height, unloading rows
    /// that left the viewport (to the recycle pool) and realizing the rows that entered it.
    pub fn update_displayed_rows(&mut self) {
        let count = self.items.len();
        let viewport_height = self.cells_height();
        self.vertical_offset = self
            .vertical_offset
            .clamp(0.0, self.max_vertical_offset());
        if count == 0 || viewport_height <= 0.0 {
            self.neg_vertical_offset = 0.0;
            self.unload_all_rows();
            return;
        }
        let Some((first, within)) = self.row_heights.row_at_offset(self.vertical_offset) else {
            return;
        };

        let mut last = first;
        let mut top = -within;
        let mut bottom = top + self.row_heights.height(first).unwrap_or(0.0);
        let mut totally = usize::from(
            tolerance::greater_than_or_close(top, 0.0)
                && tolerance::less_than_or_close(bottom, viewport_height),
        );
        while tolerance::less_than(bottom, viewport_height) && last + 1 < count {
            last += 1;
            top = bottom;
            bottom = top + self.row_heights.height(last).unwrap_or(0.0);
            if tolerance::less_than_or_close(bottom, viewport_height) {
                totally += 1;
            }
        }

        self.neg_vertical_offset = within;
        self.set_displayed_range(first, last);
        self.display_data
            .set_num_totally_displayed_scrolling_rows(totally);
    }

    /// Hides the rows waiting in the recycle pool so a host can stop rendering them.
    pub fn remove_non_displayed_rows(&mut self) {
        if self.display_data.recyclable_row_count() == 0 {
            return;
        }
        gtrace!(
            count = self.display_data.recyclable_row_count(),
            "DataGrid: fully recycling rows"
        );
        self.display_data.fully_recycle_rows();
        self.invalidate(Invalidation::Arrange);
    }

    /// Inserts `item` at `index`, shifting later rows, selection and details down by one.
    pub fn insert_item(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.items.len() {
            return Err(DataGridError::ValueMustBeBetween {
                name: "index",
                low: 0,
                high: self.items.len() + 1,
            });
        }
        gdebug!(index, "DataGrid::insert_item");
        self.items.insert(index, item);
        self.row_heights.insert(index);
        self.selected_rows.insert_index(index);
        self.details_overrides.insert_index(index);
        let shift = |row: &mut Option<usize>| {
            if let Some(r) = row {
                if *r >= index {
                    *r += 1;
                }
            }
        };
        shift(&mut self.selected_row);
        shift(&mut self.anchor_row);
        shift(&mut self.editing_row);
        if let Some(edit) = &mut self.editing_cell {
            if edit.row_index >= index {
                edit.row_index += 1;
            }
        }
        self.current_cell = self
            .current_cell
            .map(|c| c.after_row_insertion(index));

        // Keep the rows on screen in place when the insertion happened above them.
        if self
            .display_data
            .first_displayed_scrolling_row()
            .is_some_and(|first| index < first)
        {
            self.vertical_offset += self.row_heights.height(index).unwrap_or(0.0);
        }

        let loaded = self
            .display_data
            .correct_rows_after_insertion(index, DataGridRow::new);
        self.renumber_displayed_rows();
        if loaded {
            let mut row = core::mem::take(self.display_data.displayed_row_mut(index));
            self.prepare_row(&mut row, index);
            let details = row.are_details_visible();
            *self.display_data.displayed_row_mut(index) = row;
            self.raise_loading_row(index, details);
        }
        self.update_displayed_rows();
        self.invalidate(Invalidation::Measure);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    ///
    /// An edit in progress on that row is committed, or cancelled if the commit fails; if
    /// neither succeeds nothing changes and [`DataGridError::CommitFailed`] is returned.
    pub fn remove_item(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(DataGridError::ValueMustBeBetween {
                name: "index",
                low: 0,
                high: self.items.len(),
            });
        }
        let edits_row = self.editing_row == Some(index)
            || self
                .editing_cell
                .as_ref()
                .is_some_and(|e| e.row_index == index);
        if edits_row {
            let committed = matches!(self.commit_edit(DataGridEditingUnit::Row, true), Ok(true));
            if !committed && !self.cancel_edit(DataGridEditingUnit::Row) {
                return Err(DataGridError::CommitFailed);
            }
        }
        gdebug!(index, "DataGrid::remove_item");

        let was_selected = self.selected_rows.contains(index);
        self.selected_rows.remove_index(index);
        self.details_overrides.remove_index(index);
        let unshift = |row: &mut Option<usize>| match *row {
            Some(r) if r == index => *row = None,
            Some(r) if r > index => *row = Some(r - 1),
            _ => {}
        };
        unshift(&mut self.selected_row);
        unshift(&mut self.anchor_row);
        unshift(&mut self.editing_row);
        if self.selected_row.is_none() {
            self.selected_row = self.selected_rows.first_index();
        }
        self.current_cell = self
            .current_cell
            .and_then(|c| c.after_row_deletion(index));

        let height = self.row_heights.height(index).unwrap_or(0.0);
        let above = self
            .display_data
            .first_displayed_scrolling_row()
            .is_some_and(|first| index < first);
        if let Some(row) = self.display_data.correct_rows_after_deletion(index) {
            self.raise_unloading_row(index, row.are_details_visible());
            if row.is_recyclable() {
                self.display_data.add_recyclable_row(row);
            }
        }
        self.row_heights.remove(index);
        let item = self.items.remove(index);
        if above {
            self.vertical_offset = (self.vertical_offset - height).max(0.0);
        }
        self.renumber_displayed_rows();
        self.update_displayed_rows();

        if was_selected {
            let mut args = DataGridSelectionChangedEventArgs {
                added_rows: Vec::new(),
                removed_rows: alloc::vec![index],
            };
            raise(&self.events.selection_changed, &mut args);
        }
        self.invalidate(Invalidation::Measure);
        Ok(item)
    }

    pub fn row_details_visibility_mode(&self) -> DataGridRowDetailsVisibilityMode {
        self.options.row_details_visibility_mode
    }

    /// Whether row `row_index` shows its details: a per-row override if one is set, else
    /// the grid's visibility mode.
    pub fn are_row_details_visible(&self, row_index: usize) -> bool {
        details_visible(
            self.options.row_details_visibility_mode,
            &self.details_overrides,
            &self.selected_rows,
            row_index,
        )
    }

    /// Overrides the details visibility of one row.
    pub fn set_row_details_visible(&mut self, row_index: usize, visible: bool) -> Result<()> {
        self.check_row_index(row_index)?;
        let was_visible = self.are_row_details_visible(row_index);
        self.details_overrides.add_value(row_index, visible);
        if was_visible != visible {
            self.forget_row_height(row_index);
        }
        self.sync_displayed_rows();
        self.invalidate(Invalidation::Measure);
        Ok(())
    }

    /// Drops the override of one row so the visibility mode applies again.
    pub fn clear_row_details_visibility(&mut self, row_index: usize) {
        let was_visible = self.are_row_details_visible(row_index);
        self.details_overrides.remove_value(row_index);
        if was_visible != self.are_row_details_visible(row_index) {
            self.forget_row_height(row_index);
        }
        self.sync_displayed_rows();
        self.invalidate(Invalidation::Measure);
    }

    /// Number of rows in `[lower, upper]` that show their details.
    pub fn details_count_between(&self, lower: usize, upper: usize) -> usize {
        if lower > upper {
            return 0;
        }
        let mode = self.options.row_details_visibility_mode;
        match mode {
            DataGridRowDetailsVisibilityMode::Collapsed => {
                count_inclusive(&self.details_overrides, lower, upper, true)
            }
            DataGridRowDetailsVisibilityMode::Visible => {
                upper - lower + 1 - count_inclusive(&self.details_overrides, lower, upper, false)
            }
            DataGridRowDetailsVisibilityMode::VisibleWhenSelected => {
                let mut count = count_inclusive(&self.selected_rows, lower, upper, true);
                for range in self.details_overrides.ranges() {
                    if range.upper < lower || range.lower > upper {
                        continue;
                    }
                    for row in range.lower.max(lower)..=range.upper.min(upper) {
                        match (range.value, self.selected_rows.contains(row)) {
                            (true, false) => count += 1,
                            (false, true) => count -= 1,
                            _ => {}
                        }
                    }
                }
                count
            }
        }
    }

    pub(crate) fn cell_context(&self, row_index: usize, column_index: usize) -> CellContext {
        CellContext {
            row_index,
            column_index,
            is_current: self
                .current_cell
                .is_some_and(|c| c.row_index == row_index && c.column_index == column_index),
        }
    }

    /// Drops the measured height of a row whose details appeared or disappeared while it was
    /// not displayed. Displayed rows are measured again on the next pass.
    pub(crate) fn forget_row_height(&mut self, row_index: usize) {
        if self.display_data.is_row_displayed(row_index) {
            return;
        }
        let delta = self.row_heights.unmeasure(row_index);
        let above = self
            .display_data
            .first_displayed_scrolling_row()
            .is_some_and(|first| row_index < first);
        if above {
            self.vertical_offset = (self.vertical_offset + delta).max(0.0);
        }
    }

    pub(crate) fn check_row_index(&self, row_index: usize) -> Result<()> {
        if row_index >= self.items.len() {
            return Err(DataGridError::ValueMustBeBetween {
                name: "row_index",
                low: 0,
                high: self.items.len(),
            });
        }
        Ok(())
    }

    /// Pushes selection, current, editing and details state into the displayed rows.
    pub(crate) fn sync_displayed_rows(&mut self) {
        let mode = self.options.row_details_visibility_mode;
        let mut details_changed = Vec::new();
        for (index, row) in self.display_data.indexed_scrolling_rows_mut() {
            row.is_selected = self.selected_rows.contains(index);
            row.is_current = self.current_cell.is_some_and(|c| c.row_index == index);
            row.is_editing = self.editing_row == Some(index);
            let visible =
                details_visible(mode, &self.details_overrides, &self.selected_rows, index);
            if row.details_presenter.is_visible() != visible {
                row.details_presenter.set_visible(visible);
                details_changed.push((index, visible));
            }
        }
        for (row_index, is_visible) in details_changed {
            let mut args = DataGridRowDetailsEventArgs {
                row_index,
                is_visible,
            };
            raise(&self.events.row_details_visibility_changed, &mut args);
            let handler = if is_visible {
                &self.events.loading_row_details
            } else {
                &self.events.unloading_row_details
            };
            raise(handler, &mut DataGridRowEventArgs { row_index });
        }
    }

    pub(crate) fn update_displayed_columns(&mut self) {
        let frozen_width = self.columns.visible_frozen_columns_width();
        let cells_width = self.cells_width();
        let mut left = 0.0;
        let mut first = None;
        let mut last_totally = None;
        for index in self.columns.visible_columns() {
            let Some(column) = self.columns.get(index) else {
                continue;
            };
            let width = column.actual_width();
            if !column.is_frozen() {
                let screen_left = left - self.horizontal_offset;
                let screen_right = screen_left + width;
                if first.is_none() && tolerance::greater_than(screen_right, frozen_width) {
                    first = Some(index);
                }
                if first.is_some()
                    && tolerance::greater_than_or_close(screen_left, frozen_width)
                    && tolerance::less_than_or_close(screen_right, cells_width)
                {
                    last_totally = Some(index);
                }
            }
            left += width;
        }
        self.display_data.set_first_displayed_scrolling_col(first);
        self.display_data
            .set_last_totally_displayed_scrolling_col(last_totally);
    }

    pub(crate) fn clamp_horizontal_offset(&mut self) {
        if self.cells_width() > 0.0 {
            self.horizontal_offset = self
                .horizontal_offset
                .clamp(0.0, self.max_horizontal_offset());
        }
    }

    pub(crate) fn raise_unloading_row(&self, row_index: usize, details_visible: bool) {
        if details_visible {
            raise(
                &self.events.unloading_row_details,
                &mut DataGridRowEventArgs { row_index },
            );
        }
        raise(
            &self.events.unloading_row,
            &mut DataGridRowEventArgs { row_index },
        );
    }

    fn raise_loading_row(&self, row_index: usize, details_visible: bool) {
        raise(
            &self.events.loading_row,
            &mut DataGridRowEventArgs { row_index },
        );
        if details_visible {
            raise(
                &self.events.loading_row_details,
                &mut DataGridRowEventArgs { row_index },
            );
        }
    }

    fn set_displayed_range(&mut self, first: usize, last: usize) {
        if let (Some(current_first), Some(current_last)) = (
            self.display_data.first_displayed_scrolling_row(),
            self.display_data.last_displayed_scrolling_row(),
        ) {
            if current_last < first || current_first > last {
                self.unload_all_rows();
            } else {
                while let Some(f) = self.display_data.first_displayed_scrolling_row() {
                    if f >= first {
                        break;
                    }
                    self.unload_row(f);
                }
                while let Some(l) = self.display_data.last_displayed_scrolling_row() {
                    if l <= last {
                        break;
                    }
                    self.unload_row(l);
                }
            }
        }

        if self.display_data.first_displayed_scrolling_row().is_none() {
            self.generate_row(first);
        }
        while let Some(f) = self.display_data.first_displayed_scrolling_row() {
            if f <= first {
                break;
            }
            self.generate_row(f - 1);
        }
        while let Some(l) = self.display_data.last_displayed_scrolling_row() {
            if l >= last {
                break;
            }
            self.generate_row(l + 1);
        }
    }

    fn unload_all_rows(&mut self) {
        while let Some(first) = self.display_data.first_displayed_scrolling_row() {
            self.unload_row(first);
        }
        self.display_data
            .set_num_totally_displayed_scrolling_rows(0);
    }

    fn unload_row(&mut self, row_index: usize) {
        let row = self.display_data.unload_scrolling_row(row_index);
        self.raise_unloading_row(row_index, row.are_details_visible());
        if let Some(edit) = &mut self.editing_cell {
            if edit.row_index == row_index {
                edit.stash = row
                    .cells
                    .get(edit.column_index)
                    .map(|cell| cell.content.clone());
            }
        }
        if row.is_recyclable() {
            self.display_data.add_recyclable_row(row);
        }
    }

    fn generate_row(&mut self, row_index: usize) {
        let mut row = self.display_data.get_used_row().unwrap_or_default();
        self.prepare_row(&mut row, row_index);
        let details = row.are_details_visible();
        self.display_data.load_scrolling_row(row_index, row);
        self.raise_loading_row(row_index, details);
    }

    /// Binds a fresh or recycled row visual to `row_index`.
    fn prepare_row(&mut self, row: &mut DataGridRow, row_index: usize) {
        let stash = match &mut self.editing_cell {
            Some(edit) if edit.row_index == row_index => {
                let column_index = edit.column_index;
                edit.stash.take().map(|element| (column_index, element))
            }
            _ => None,
        };

        row.index = Some(row_index);
        row.ensure_cells(self.columns.len());
        row.is_selected = self.selected_rows.contains(row_index);
        row.is_current = self.current_cell.is_some_and(|c| c.row_index == row_index);
        row.is_editing = self.editing_row == Some(row_index);
        row.details_presenter
            .set_visible(self.are_row_details_visible(row_index));

        let Some(item) = self.items.get(row_index) else {
            return;
        };
        for (column_index, (column, cell)) in
            self.columns.iter().zip(row.cells.iter_mut()).enumerate()
        {
            cell.is_editing = false;
            cell.clip = None;
            cell.content = column
                .kind()
                .generate_element(item, self.cell_context(row_index, column_index));
            if !column.is_visible() {
                cell.collapse();
            }
        }
        if let Some((column_index, element)) = stash {
            if let Some(cell) = row.cells.get_mut(column_index) {
                cell.content = element;
                cell.is_editing = true;
            }
        }
    }

    fn renumber_displayed_rows(&mut self) {
        for (index, row) in self.display_data.indexed_scrolling_rows_mut() {
            row.index = Some(index);
        }
    }
}

fn details_visible(
    mode: DataGridRowDetailsVisibilityMode,
    overrides: &IndexToValueTable<bool>,
    selected: &IndexToValueTable<bool>,
    row_index: usize,
) -> bool {
    if let Some(&visible) = overrides.value(row_index) {
        return visible;
    }
    match mode {
        DataGridRowDetailsVisibilityMode::Collapsed => false,
        DataGridRowDetailsVisibilityMode::Visible => true,
        DataGridRowDetailsVisibilityMode::VisibleWhenSelected => selected.contains(row_index),
    }
}

fn count_inclusive(
    table: &IndexToValueTable<bool>,
    lower: usize,
    upper: usize,
    value: bool,
) -> usize {
    table
        .ranges()
        .iter()
        .filter(|r| r.value == value && r.upper >= lower && r.lower <= upper)
        .map(|r| r.upper.min(upper) - r.lower.max(lower) + 1)
        .sum()
}
