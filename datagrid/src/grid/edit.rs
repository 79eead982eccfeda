use super::DataGrid;
use crate::column::{CellElement, ColumnBehavior};
use crate::coordinates::DataGridCellCoordinates;
use crate::editing::{CellEdit, DataGridEditAction, DataGridEditingUnit, EditingTrigger};
use crate::error::{DataGridError, Result};
use crate::events::{
    DataGridBeginningEditEventArgs, DataGridCurrentCellChangedEventArgs,
    DataGridEndingEditEventArgs, DataGridPreparingCellForEditEventArgs, raise,
};
use crate::item::GridItem;
use crate::options::Invalidation;

impl<T: GridItem> DataGrid<T> {
    pub fn current_cell(&self) -> Option<DataGridCellCoordinates> {
        self.current_cell
    }

    /// Moves the current cell.
    ///
    /// A pending edit is committed first (the cell edit when staying on the same row, the row
    /// edit otherwise); if that fails the current cell does not move and
    /// [`DataGridError::CommitFailed`] is returned.
    pub fn set_current_cell(&mut self, cell: Option<DataGridCellCoordinates>) -> Result<()> {
        if let Some(cell) = cell {
            if self
                .columns
                .get(cell.column_index)
                .is_none_or(|c| !c.is_visible())
            {
                return Err(DataGridError::ColumnNotInThisGrid(cell.column_index));
            }
            self.check_row_index(cell.row_index)?;
        }
        if self.current_cell == cell {
            return Ok(());
        }
        if self.is_editing() {
            let same_row = match (cell, self.editing_row) {
                (Some(c), Some(row)) => c.row_index == row,
                _ => false,
            };
            let unit = if same_row {
                DataGridEditingUnit::Cell
            } else {
                DataGridEditingUnit::Row
            };
            if !matches!(self.commit_edit(unit, true), Ok(true)) {
                return Err(DataGridError::CommitFailed);
            }
        }

        self.set_current_cell_core(cell);
        Ok(())
    }

    /// Moves the current cell without committing edits and raises `current_cell_changed`.
    pub(crate) fn set_current_cell_core(&mut self, cell: Option<DataGridCellCoordinates>) {
        let previous = core::mem::replace(&mut self.current_cell, cell);
        if previous == cell {
            return;
        }
        gtrace!(?previous, ?cell, "DataGrid::set_current_cell");
        // Check boxes are only enabled in the current cell.
        for coords in [previous, cell].into_iter().flatten() {
            self.refresh_display_cell(coords.row_index, coords.column_index);
        }
        self.sync_displayed_rows();
        let mut args = DataGridCurrentCellChangedEventArgs {
            previous,
            current: cell,
        };
        raise(&self.events.current_cell_changed, &mut args);
        self.invalidate(Invalidation::Measure);
    }

    /// Coordinates of the cell hosting an editor.
    pub fn editing_cell(&self) -> Option<DataGridCellCoordinates> {
        self.editing_cell
            .as_ref()
            .map(|e| DataGridCellCoordinates::new(e.column_index, e.row_index))
    }

    /// Row with a pending row edit.
    pub fn editing_row(&self) -> Option<usize> {
        self.editing_row
    }

    pub fn is_editing(&self) -> bool {
        self.editing_cell.is_some() || self.editing_row.is_some()
    }

    /// The editor of the editing cell, whether or not its row is displayed.
    pub fn editing_element(&self) -> Option<&CellElement> {
        let edit = self.editing_cell.as_ref()?;
        match self.display_data.try_displayed_row(edit.row_index) {
            Some(row) => row.cells.get(edit.column_index).map(|c| &c.content),
            None => edit.stash.as_ref(),
        }
    }

    /// Mutable access to the editor, e.g. to type into a text box.
    pub fn editing_element_mut(&mut self) -> Option<&mut CellElement> {
        let (row_index, column_index) = self
            .editing_cell
            .as_ref()
            .map(|e| (e.row_index, e.column_index))?;
        if self.display_data.is_row_displayed(row_index) {
            return self
                .display_data
                .displayed_row_mut(row_index)
                .cells
                .get_mut(column_index)
                .map(|c| &mut c.content);
        }
        self.editing_cell.as_mut().and_then(|e| e.stash.as_mut())
    }

    /// Puts the current cell into editing mode.
    ///
    /// Returns `Ok(false)` when the cell is read-only, a `beginning_edit` handler cancelled, or
    /// a pending edit elsewhere could not be committed.
    pub fn begin_edit(&mut self, trigger: EditingTrigger) -> Result<bool> {
        let current = self.current_cell.ok_or(DataGridError::NoCurrentRow)?;
        if let Some(edit) = &self.editing_cell {
            if edit.row_index == current.row_index && edit.column_index == current.column_index {
                return Ok(true);
            }
            if !matches!(self.commit_edit(DataGridEditingUnit::Cell, true), Ok(true)) {
                return Ok(false);
            }
        }
        let Some(column) = self.columns.get(current.column_index) else {
            return Err(DataGridError::ColumnNotInThisGrid(current.column_index));
        };
        if column.is_read_only() {
            return Ok(false);
        }

        let mut args = DataGridBeginningEditEventArgs {
            column_index: current.column_index,
            row_index: current.row_index,
            trigger,
            cancel: false,
        };
        raise(&self.events.beginning_edit, &mut args);
        if args.cancel {
            gdebug!(
                row = current.row_index,
                "DataGrid::begin_edit cancelled by handler"
            );
            return Ok(false);
        }

        let Some(item) = self.items.get(current.row_index) else {
            return Err(DataGridError::NoCurrentRow);
        };
        let context = self.cell_context(current.row_index, current.column_index);
        let mut element = column.kind().generate_editing_element(item, context);
        let unedited = column.kind().prepare_cell_for_edit(&mut element, trigger);

        let mut args = DataGridPreparingCellForEditEventArgs {
            column_index: current.column_index,
            row_index: current.row_index,
            trigger,
            editing_element: element,
        };
        raise(&self.events.preparing_cell_for_edit, &mut args);
        let element = args.editing_element;

        let stash = match self.display_data.try_displayed_row_mut(current.row_index) {
            Some(row) => {
                if let Some(cell) = row.cells.get_mut(current.column_index) {
                    cell.content = element;
                    cell.is_editing = true;
                }
                None
            }
            None => Some(element),
        };
        self.editing_cell = Some(CellEdit {
            row_index: current.row_index,
            column_index: current.column_index,
            unedited,
            stash,
        });
        self.editing_row = Some(current.row_index);
        self.sync_displayed_rows();
        self.invalidate(Invalidation::Measure);
        Ok(true)
    }

    /// Commits the pending cell edit, and for [`DataGridEditingUnit::Row`] the row edit too.
    ///
    /// Returns `Ok(false)` when an ending handler cancelled. A value the item rejects is
    /// returned as the item's error and the edit stays open. With `exit_editing_mode` unset a
    /// committed cell keeps its editor.
    pub fn commit_edit(
        &mut self,
        unit: DataGridEditingUnit,
        exit_editing_mode: bool,
    ) -> Result<bool> {
        let editing = self
            .editing_cell
            .as_ref()
            .map(|e| (e.row_index, e.column_index));
        if let Some((row_index, column_index)) = editing {
            let mut args = DataGridEndingEditEventArgs {
                column_index: Some(column_index),
                row_index,
                editing_unit: DataGridEditingUnit::Cell,
                edit_action: DataGridEditAction::Commit,
                cancel: false,
            };
            raise(&self.events.cell_edit_ending, &mut args);
            if args.cancel {
                return Ok(false);
            }

            let value = match (self.columns.get(column_index), self.editing_element()) {
                (Some(column), Some(element)) => column
                    .kind()
                    .binding_path()
                    .map(alloc::string::String::from)
                    .zip(column.kind().edited_value(element)),
                _ => None,
            };
            if let Some((path, value)) = value {
                if let Some(item) = self.items.get_mut(row_index) {
                    item.set_value(&path, value.clone())?;
                }
                if let Some(edit) = &mut self.editing_cell {
                    edit.unedited = value;
                }
            }
            if exit_editing_mode || unit == DataGridEditingUnit::Row {
                self.finish_cell_edit();
            }
        }

        if unit == DataGridEditingUnit::Row {
            if let Some(row_index) = self.editing_row {
                let mut args = DataGridEndingEditEventArgs {
                    column_index: None,
                    row_index,
                    editing_unit: DataGridEditingUnit::Row,
                    edit_action: DataGridEditAction::Commit,
                    cancel: false,
                };
                raise(&self.events.row_edit_ending, &mut args);
                if args.cancel {
                    return Ok(false);
                }
                if exit_editing_mode {
                    self.editing_row = None;
                }
            }
        }
        self.sync_displayed_rows();
        self.invalidate(Invalidation::Measure);
        Ok(true)
    }

    /// Abandons the pending cell edit (and for [`DataGridEditingUnit::Row`] the row edit),
    /// restoring the editor to its unedited value. Returns `false` when a handler cancelled.
    pub fn cancel_edit(&mut self, unit: DataGridEditingUnit) -> bool {
        let editing = self
            .editing_cell
            .as_ref()
            .map(|e| (e.row_index, e.column_index));
        if let Some((row_index, column_index)) = editing {
            let mut args = DataGridEndingEditEventArgs {
                column_index: Some(column_index),
                row_index,
                editing_unit: DataGridEditingUnit::Cell,
                edit_action: DataGridEditAction::Cancel,
                cancel: false,
            };
            raise(&self.events.cell_edit_ending, &mut args);
            if args.cancel {
                return false;
            }
            let unedited = self
                .editing_cell
                .as_ref()
                .map(|e| e.unedited.clone())
                .unwrap_or_default();
            if let Some(column) = self.columns.get(column_index) {
                let element = match self.display_data.try_displayed_row_mut(row_index) {
                    Some(row) => row.cells.get_mut(column_index).map(|c| &mut c.content),
                    None => self.editing_cell.as_mut().and_then(|e| e.stash.as_mut()),
                };
                if let Some(element) = element {
                    column.kind().cancel_cell_edit(element, &unedited);
                }
            }
            self.finish_cell_edit();
        }

        if unit == DataGridEditingUnit::Row {
            if let Some(row_index) = self.editing_row {
                let mut args = DataGridEndingEditEventArgs {
                    column_index: None,
                    row_index,
                    editing_unit: DataGridEditingUnit::Row,
                    edit_action: DataGridEditAction::Cancel,
                    cancel: false,
                };
                raise(&self.events.row_edit_ending, &mut args);
                if args.cancel {
                    return false;
                }
            }
            self.editing_row = None;
        }
        self.sync_displayed_rows();
        self.invalidate(Invalidation::Measure);
        true
    }

    /// Drops the cell editor without writing back or raising events, used when the editing
    /// column goes away or becomes read-only.
    pub(crate) fn end_cell_edit_without_commit(&mut self) {
        if self.editing_cell.is_some() {
            gdebug!("DataGrid: abandoning cell edit");
            self.finish_cell_edit();
            self.sync_displayed_rows();
        }
    }

    /// Removes the editor and puts the display element of the bound value back.
    fn finish_cell_edit(&mut self) {
        let Some(edit) = self.editing_cell.take() else {
            return;
        };
        self.refresh_display_cell(edit.row_index, edit.column_index);
    }

    /// Regenerates the display element of one displayed, non-editing cell.
    fn refresh_display_cell(&mut self, row_index: usize, column_index: usize) {
        if self
            .editing_cell
            .as_ref()
            .is_some_and(|e| e.row_index == row_index && e.column_index == column_index)
        {
            return;
        }
        let (Some(item), Some(column)) = (self.items.get(row_index), self.columns.get(column_index))
        else {
            return;
        };
        let context = self.cell_context(row_index, column_index);
        let element = column.kind().generate_element(item, context);
        if let Some(cell) = self
            .display_data
            .try_displayed_row_mut(row_index)
            .and_then(|row| row.cells.get_mut(column_index))
        {
            cell.content = element;
            cell.is_editing = false;
        }
    }
}
