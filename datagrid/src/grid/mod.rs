use alloc::vec::Vec;

use crate::column::{ColumnBehavior, ColumnChange, DataGridColumn};
use crate::column_collection::ColumnCollection;
use crate::coordinates::DataGridCellCoordinates;
use crate::display_data::DisplayData;
use crate::editing::CellEdit;
use crate::error::{DataGridError, Result};
use crate::events::{
    DataGridAutoGeneratingColumnEventArgs, DataGridColumnEventArgs,
    DataGridColumnReorderingEventArgs, DataGridEvents, raise,
};
use crate::geometry::Size;
use crate::index_table::IndexToValueTable;
use crate::item::{GridItem, PropertyKind};
use crate::length::DataGridLength;
use crate::options::{DataGridOptions, Invalidation};
use crate::presenters::{CellsLayout, ColumnHeadersPresenter, ElementMeasurer, RowsPresenter};
use crate::row::{DataGridCell, DataGridRow};
use crate::row_heights::RowHeights;
use crate::sorting::SortDescription;

mod edit;
mod keyboard;
mod rows;
mod selection;
mod sort;

// Measure passes allowed to settle row heights before giving up for this frame.
const MAX_MEASURE_PASSES: usize = 4;

/// A headless data grid over an owned item source.
///
/// The grid owns its items, columns, the live row window ([`DisplayData`]), the selection and
/// details tables, the current cell and the editing state. A host drives it with
/// [`Self::measure`]/[`Self::arrange`] and renders the resulting row and cell geometry.
pub struct DataGrid<T> {
    options: DataGridOptions,
    events: DataGridEvents,
    items: Vec<T>,
    columns: ColumnCollection,
    display_data: DisplayData<DataGridRow>,
    row_heights: RowHeights,
    selected_rows: IndexToValueTable<bool>,
    details_overrides: IndexToValueTable<bool>,
    selected_row: Option<usize>,
    anchor_row: Option<usize>,
    current_cell: Option<DataGridCellCoordinates>,
    editing_cell: Option<CellEdit>,
    editing_row: Option<usize>,
    sort_descriptions: Vec<SortDescription>,
    headers_presenter: ColumnHeadersPresenter,
    rows_presenter: RowsPresenter,
    // Whole grid size last offered by the host.
    available: Size,
    header_height: f64,
    horizontal_offset: f64,
    vertical_offset: f64,
    neg_vertical_offset: f64,
}

impl<T: GridItem> DataGrid<T> {
    pub fn new(options: DataGridOptions) -> Result<Self> {
        options.validate()?;
        let mut columns = ColumnCollection::new(options.column_defaults());
        columns.set_frozen_column_count(options.frozen_column_count);
        let estimate = options.row_height.unwrap_or(options.row_height_estimate);
        let row_heights = RowHeights::new(0, estimate);
        Ok(Self {
            options,
            events: DataGridEvents::default(),
            items: Vec::new(),
            columns,
            display_data: DisplayData::new(),
            row_heights,
            selected_rows: IndexToValueTable::new(),
            details_overrides: IndexToValueTable::new(),
            selected_row: None,
            anchor_row: None,
            current_cell: None,
            editing_cell: None,
            editing_row: None,
            sort_descriptions: Vec::new(),
            headers_presenter: ColumnHeadersPresenter::default(),
            rows_presenter: RowsPresenter::default(),
            available: Size::ZERO,
            header_height: 0.0,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            neg_vertical_offset: 0.0,
        })
    }

    pub fn options(&self) -> &DataGridOptions {
        &self.options
    }

    /// Replaces the options. Invalid options are rejected and leave the grid untouched.
    pub fn set_options(&mut self, options: DataGridOptions) -> Result<()> {
        options.validate()?;
        let was_single = self.options.selection_mode;
        let details_mode = self.options.row_details_visibility_mode;
        let row_height = self.options.row_height;
        let auto_generate = self.options.auto_generate_columns;
        self.options = options;

        self.columns.set_defaults(self.options.column_defaults());
        self.columns
            .set_frozen_column_count(self.options.frozen_column_count);
        let estimate = self.row_height_estimate();
        if row_height != self.options.row_height {
            // Heights measured under the old row height are stale.
            self.row_heights.reset_heights(estimate);
        } else {
            self.row_heights.set_estimate(estimate);
        }
        if was_single != self.options.selection_mode {
            self.coerce_selection_to_mode();
        }
        if details_mode != self.options.row_details_visibility_mode {
            self.details_overrides.clear();
            let display = &self.display_data;
            self.row_heights
                .unmeasure_where(|row| !display.is_row_displayed(row));
        }
        match (auto_generate, self.options.auto_generate_columns) {
            (false, true) => self.generate_columns(),
            (true, false) => self.remove_auto_generated_columns(),
            _ => {}
        }
        self.sync_displayed_rows();
        self.update_displayed_rows();
        self.invalidate(Invalidation::Measure);
        Ok(())
    }

    /// Height assumed for rows that were not measured yet.
    pub fn row_height_estimate(&self) -> f64 {
        self.options
            .row_height
            .unwrap_or(self.options.row_height_estimate)
    }

    pub fn events(&self) -> &DataGridEvents {
        &self.events
    }

    pub fn set_events(&mut self, events: DataGridEvents) {
        self.events = events;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    /// Replaces the item source.
    ///
    /// Any edit is abandoned without committing, and selection, details overrides, the sort
    /// and the current cell are reset. Displayed rows are discarded together with the recycle
    /// pools since they were prepared for the old items. With `auto_generate_columns` the
    /// generated columns are rebuilt from [`GridItem::properties`].
    pub fn set_items(&mut self, items: Vec<T>) {
        gdebug!(count = items.len(), "DataGrid::set_items");
        self.replace_items(items);
        self.sort_descriptions.clear();
        if self.options.auto_generate_columns {
            self.generate_columns();
        }
        self.update_displayed_rows();
        self.invalidate(Invalidation::Measure);
    }

    fn replace_items(&mut self, items: Vec<T>) {
        self.editing_cell = None;
        self.editing_row = None;
        let displayed: Vec<(usize, bool)> = self
            .display_data
            .indexed_scrolling_rows()
            .map(|(i, row)| (i, row.are_details_visible()))
            .collect();
        for (index, details) in displayed {
            self.raise_unloading_row(index, details);
        }
        self.display_data.clear_rows(false);

        self.items = items;
        self.row_heights.reset(self.items.len());
        self.selected_rows.clear();
        self.details_overrides.clear();
        self.selected_row = None;
        self.anchor_row = None;
        self.current_cell = None;
        self.vertical_offset = 0.0;
        self.neg_vertical_offset = 0.0;
    }

    pub fn columns(&self) -> &ColumnCollection {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&DataGridColumn> {
        self.columns.get(index)
    }

    pub fn add_column(&mut self, column: DataGridColumn) -> usize {
        self.insert_column(self.columns.len(), column)
    }

    /// Inserts a column at collection position `index` (clamped) and returns its index.
    pub fn insert_column(&mut self, index: usize, column: DataGridColumn) -> usize {
        let index = self.columns.insert(index, column);
        self.columns
            .set_frozen_column_count(self.options.frozen_column_count);
        self.headers_presenter.insert_header(index);
        if let Some(current) = &mut self.current_cell {
            if current.column_index >= index {
                current.column_index += 1;
            }
        }
        if let Some(edit) = &mut self.editing_cell {
            if edit.column_index >= index {
                edit.column_index += 1;
            }
        }
        let rows: Vec<usize> = self
            .display_data
            .indexed_scrolling_rows()
            .map(|(i, _)| i)
            .collect();
        for row_index in rows {
            let cell = self.generate_cell(row_index, index);
            let row = self.display_data.displayed_row_mut(row_index);
            let at = index.min(row.cells.len());
            row.cells.insert(at, cell);
        }
        self.invalidate(Invalidation::Measure);
        index
    }

    /// Removes column `index`. An edit in that column is cancelled; the current cell moves off
    /// the removed column.
    pub fn remove_column(&mut self, index: usize) -> Result<DataGridColumn> {
        if index >= self.columns.len() {
            return Err(DataGridError::ColumnNotInThisGrid(index));
        }
        if self
            .editing_cell
            .as_ref()
            .is_some_and(|e| e.column_index == index)
        {
            self.end_cell_edit_without_commit();
        }
        let column = self.columns.remove(index)?;
        self.columns
            .set_frozen_column_count(self.options.frozen_column_count);
        self.headers_presenter.remove_header(index);
        for row in self.display_data.scrolling_rows_mut() {
            if index < row.cells.len() {
                row.cells.remove(index);
            }
        }
        if let Some(edit) = &mut self.editing_cell {
            if edit.column_index > index {
                edit.column_index -= 1;
            }
        }
        match self.current_cell {
            Some(c) if c.column_index == index => {
                let moved = self
                    .columns
                    .first_visible_column()
                    .map(|col| DataGridCellCoordinates::new(col, c.row_index));
                self.set_current_cell_core(moved);
            }
            Some(c) if c.column_index > index => {
                self.current_cell =
                    Some(DataGridCellCoordinates::new(c.column_index - 1, c.row_index));
            }
            _ => {}
        }
        self.sync_displayed_rows();
        self.invalidate(Invalidation::Measure);
        Ok(column)
    }

    /// Mutates column `index` and reacts to the changes it recorded.
    pub fn with_column<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut DataGridColumn) -> R,
    ) -> Result<R> {
        let column = self
            .columns
            .get_mut(index)
            .ok_or(DataGridError::ColumnNotInThisGrid(index))?;
        let result = f(column);
        let changes = column.take_changes();
        self.apply_column_changes(index, &changes);
        Ok(result)
    }

    /// Resizes column `index` the way dragging its header edge does: to `width` clamped to the
    /// column's min and max width. Returns `Ok(false)` when the column is not user-resizable.
    pub fn resize_column(&mut self, index: usize, width: f64) -> Result<bool> {
        let column = self
            .columns
            .get(index)
            .ok_or(DataGridError::ColumnNotInThisGrid(index))?;
        if width.is_nan() {
            return Err(DataGridError::ValueCannotBeNaN { name: "width" });
        }
        if !column.can_user_resize() {
            return Ok(false);
        }
        let width = width
            .max(column.actual_min_width())
            .min(column.actual_max_width());
        let length = DataGridLength::pixel(width)?;
        gdebug!(index, width, "DataGrid::resize_column");
        self.with_column(index, |c| c.set_width(length))?;
        Ok(true)
    }

    /// Moves column `index` to `display_index`.
    ///
    /// Raises `column_reordering` first; returns `Ok(false)` when a handler cancels. Frozen
    /// columns cannot leave the frozen prefix and scrolling columns cannot enter it.
    pub fn set_column_display_index(&mut self, index: usize, display_index: usize) -> Result<bool> {
        self.columns.validate_display_index(index, display_index)?;
        let current = self
            .columns
            .get(index)
            .and_then(DataGridColumn::display_index);
        let Some(current) = current else {
            return Err(DataGridError::ColumnNotInThisGrid(index));
        };
        if current == display_index {
            return Ok(true);
        }
        let mut args = DataGridColumnReorderingEventArgs {
            column_index: index,
            new_display_index: display_index,
            cancel: false,
        };
        raise(&self.events.column_reordering, &mut args);
        if args.cancel {
            return Ok(false);
        }

        let before: Vec<Option<usize>> = self.columns.iter().map(|c| c.display_index()).collect();
        self.columns.set_display_index(index, display_index)?;
        for (column_index, old) in before.into_iter().enumerate() {
            let new = self.columns
                .get(column_index)
                .and_then(|c| c.display_index());
            if new != old {
                raise(
                    &self.events.column_display_index_changed,
                    &mut DataGridColumnEventArgs { column_index },
                );
            }
        }
        raise(
            &self.events.column_reordered,
            &mut DataGridColumnEventArgs {
                column_index: index,
            },
        );
        self.update_displayed_columns();
        self.invalidate(Invalidation::Measure);
        Ok(true)
    }

    pub fn display_data(&self) -> &DisplayData<DataGridRow> {
        &self.display_data
    }

    pub fn displayed_row(&self, row_index: usize) -> Option<&DataGridRow> {
        self.display_data.try_displayed_row(row_index)
    }

    pub fn headers_presenter(&self) -> &ColumnHeadersPresenter {
        &self.headers_presenter
    }

    pub fn rows_presenter(&self) -> &RowsPresenter {
        &self.rows_presenter
    }

    /// Width available to cells.
    pub fn cells_width(&self) -> f64 {
        self.available.width
    }

    /// Height available to rows (the grid height minus the header row).
    pub fn cells_height(&self) -> f64 {
        (self.available.height - self.header_height).max(0.0)
    }

    pub fn column_header_height(&self) -> f64 {
        self.header_height
    }

    /// Runs the measure pass over headers and rows and returns the grid's desired size.
    ///
    /// Row heights learned while measuring feed back into which rows are displayed, so the
    /// rows are re-realized and re-measured until the window is stable.
    pub fn measure(&mut self, available: Size, measurer: &mut dyn ElementMeasurer) -> Size {
        self.available = available;
        let cells_width = available.width;

        self.header_height = if self.columns.is_empty() {
            0.0
        } else {
            self.headers_presenter
                .measure(
                    &mut self.columns,
                    self.horizontal_offset,
                    cells_width,
                    self.options.column_header_height,
                    measurer,
                )
                .height
        };

        let pending = self.display_data.pending_vertical_scroll_height();
        if pending != 0.0 {
            self.display_data.set_pending_vertical_scroll_height(0.0);
            self.vertical_offset += pending;
        }

        let layout = CellsLayout {
            horizontal_offset: self.horizontal_offset,
            cells_width,
            row_height: self.options.row_height,
            current_column: None,
        };
        let current = self
            .current_cell
            .map(|c| (c.row_index, c.column_index));
        let mut rows_size = Size::ZERO;
        for _pass in 0..MAX_MEASURE_PASSES {
            self.update_displayed_rows();
            rows_size = self.rows_presenter.measure(
                &mut self.display_data,
                &mut self.columns,
                layout,
                current,
                measurer,
            );
            let mut changed = false;
            for (index, row) in self.display_data.indexed_scrolling_rows() {
                let delta = self
                    .row_heights
                    .set_height(index, row.desired_size().height);
                changed |= delta != 0.0;
            }
            if !changed {
                break;
            }
            gtrace!(
                pass = _pass,
                "DataGrid::measure: row heights changed, re-realizing rows"
            );
        }

        self.columns.update_filler(cells_width);
        self.clamp_horizontal_offset();
        self.update_displayed_columns();
        Size::new(
            rows_size.width.min(available.width),
            (self.header_height + rows_size.height).min(available.height),
        )
    }

    /// Runs the arrange pass. Headers take the top `column_header_height`, rows the rest.
    pub fn arrange(&mut self, final_size: Size) -> Size {
        self.available = final_size;
        if !self.columns.is_empty() {
            self.headers_presenter.arrange(
                Size::new(final_size.width, self.header_height),
                &mut self.columns,
                self.horizontal_offset,
            );
        }
        self.rows_presenter.arrange(
            Size::new(final_size.width, self.cells_height()),
            &mut self.display_data,
            &self.columns,
            self.horizontal_offset,
            self.neg_vertical_offset,
        );
        final_size
    }

    pub(crate) fn invalidate(&self, invalidation: Invalidation) {
        if let Some(f) = &self.options.on_invalidated {
            f(invalidation);
        }
    }

    fn apply_column_changes(&mut self, index: usize, changes: &[ColumnChange]) {
        if changes.is_empty() {
            return;
        }
        let mut invalidation = None;
        for change in changes {
            match *change {
                ColumnChange::Width | ColumnChange::Header => {
                    invalidation = Some(Invalidation::Measure);
                }
                ColumnChange::Visibility => {
                    let hidden = self.columns.get(index).is_some_and(|c| !c.is_visible());
                    if hidden {
                        self.collapse_column(index);
                    }
                    self.update_displayed_columns();
                    invalidation = Some(Invalidation::Measure);
                }
                ColumnChange::ReadOnly => {
                    let read_only = self.columns.get(index).is_some_and(|c| c.is_read_only());
                    if read_only
                        && self
                            .editing_cell
                            .as_ref()
                            .is_some_and(|e| e.column_index == index)
                    {
                        self.end_cell_edit_without_commit();
                    }
                }
                ColumnChange::Content(property) => {
                    let Some(column) = self.columns.get(index) else {
                        continue;
                    };
                    for row in self.display_data.scrolling_rows_mut() {
                        if let Some(cell) = row.cells.get_mut(index) {
                            column
                                .kind()
                                .refresh_cell_content(&mut cell.content, property);
                        }
                    }
                    invalidation = Some(Invalidation::Measure);
                }
            }
        }
        if let Some(invalidation) = invalidation {
            self.invalidate(invalidation);
        }
    }

    /// Replaces the auto-generated columns with one column per item property: a check box
    /// column for boolean properties, a text column otherwise.
    fn generate_columns(&mut self) {
        self.remove_auto_generated_columns();
        for property in T::properties() {
            let column = match property.kind {
                PropertyKind::Bool => DataGridColumn::check_box(property.name.clone()),
                PropertyKind::Text => DataGridColumn::text(property.name.clone()),
            };
            let mut args = DataGridAutoGeneratingColumnEventArgs {
                column: column
                    .with_header(property.name.clone())
                    .with_read_only(property.is_read_only),
                property_name: property.name,
                cancel: false,
            };
            raise(&self.events.auto_generating_column, &mut args);
            if args.cancel {
                continue;
            }
            let mut column = args.column;
            column.set_auto_generated(true);
            let _index = self.add_column(column);
            gtrace!(index = _index, "DataGrid: generated column");
        }
    }

    fn remove_auto_generated_columns(&mut self) {
        for index in (0..self.columns.len()).rev() {
            if !self
                .columns
                .get(index)
                .is_some_and(DataGridColumn::is_auto_generated)
            {
                continue;
            }
            if let Err(_err) = self.remove_column(index) {
                gwarn!(index, error = %_err, "DataGrid: cannot remove a generated column");
            }
        }
    }

    /// Takes a hidden column out of the header row and every displayed row. An edit in the
    /// column is abandoned and the current cell moves to a visible column.
    fn collapse_column(&mut self, index: usize) {
        if self
            .editing_cell
            .as_ref()
            .is_some_and(|e| e.column_index == index)
        {
            self.end_cell_edit_without_commit();
        }
        self.headers_presenter.collapse_header(index);
        for row in self.display_data.scrolling_rows_mut() {
            if let Some(cell) = row.cells.get_mut(index) {
                cell.collapse();
            }
        }
        if let Some(current) = self.current_cell {
            if current.column_index == index {
                let column = self
                    .columns
                    .next_visible_column(index)
                    .or_else(|| self.columns.previous_visible_column(index));
                let moved = column.map(|c| DataGridCellCoordinates::new(c, current.row_index));
                self.set_current_cell_core(moved);
            }
        }
    }

    /// Generates the display (or editing) content of one cell of a displayed row.
    fn generate_cell(&self, row_index: usize, column_index: usize) -> DataGridCell {
        let mut cell = DataGridCell::default();
        let (Some(item), Some(column)) = (self.items.get(row_index), self.columns.get(column_index))
        else {
            return cell;
        };
        let context = self.cell_context(row_index, column_index);
        cell.content = column.kind().generate_element(item, context);
        cell
    }
}

impl<T> core::fmt::Debug for DataGrid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataGrid")
            .field("row_count", &self.items.len())
            .field("column_count", &self.columns.len())
            .field(
                "displayed_rows",
                &(
                    self.display_data.first_displayed_scrolling_row(),
                    self.display_data.last_displayed_scrolling_row(),
                ),
            )
            .field("current_cell", &self.current_cell)
            .field("vertical_offset", &self.vertical_offset)
            .field("horizontal_offset", &self.horizontal_offset)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
