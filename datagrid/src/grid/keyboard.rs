use super::DataGrid;
use crate::coordinates::DataGridCellCoordinates;
use crate::editing::{DataGridEditingUnit, EditingKey, EditingTrigger};
use crate::error::Result;
use crate::item::GridItem;
use crate::keyboard::{DataGridKey, KeyModifiers};
use crate::options::DataGridSelectionMode;

impl<T: GridItem> DataGrid<T> {
    /// Runs the grid's keyboard handling for one key press.
    ///
    /// Returns `Ok(false)` when the key is left to the host, e.g. Tab outside editing mode or
    /// Ctrl+A in single selection mode. Moving the current cell commits a pending edit first; a
    /// failed commit is returned as [`crate::DataGridError::CommitFailed`] and nothing moves.
    ///
    /// Vertical moves select the new current row, or with Shift in extended mode every row
    /// between the anchor and the new current row. Ctrl jumps to the first or last row (Up,
    /// Down, Home, End) or column (Left, Right).
    pub fn process_key(&mut self, key: DataGridKey, modifiers: KeyModifiers) -> Result<bool> {
        gtrace!(?key, ?modifiers, "DataGrid::process_key");
        match key {
            DataGridKey::Up => self.process_up_key(modifiers),
            DataGridKey::Down => self.process_down_key(modifiers).map(|(handled, _)| handled),
            DataGridKey::PageUp => self.process_page_key(false, modifiers),
            DataGridKey::PageDown => self.process_page_key(true, modifiers),
            DataGridKey::Left => self.process_horizontal_key(false, modifiers),
            DataGridKey::Right => self.process_horizontal_key(true, modifiers),
            DataGridKey::Home => self.process_home_end_key(false, modifiers),
            DataGridKey::End => self.process_home_end_key(true, modifiers),
            DataGridKey::Tab => self.process_tab_key(modifiers),
            DataGridKey::Enter => self.process_enter_key(modifiers),
            DataGridKey::Escape => Ok(self.process_escape_key()),
            DataGridKey::F2 => self.process_f2_key(),
            DataGridKey::A => self.process_a_key(modifiers),
        }
    }

    /// First visible column and last row, or `None` when there is no cell to move to.
    fn navigation_bounds(&self) -> Option<(usize, usize)> {
        let first_column = self.columns.first_visible_column()?;
        let last_row = self.items.len().checked_sub(1)?;
        Some((first_column, last_row))
    }

    fn process_up_key(&mut self, modifiers: KeyModifiers) -> Result<bool> {
        let Some((first_column, _)) = self.navigation_bounds() else {
            return Ok(false);
        };
        let (row, column) = match self.current_cell {
            None => (0, first_column),
            Some(c) if modifiers.ctrl => (0, c.column_index),
            Some(c) if c.row_index > 0 => (c.row_index - 1, c.column_index),
            Some(_) => return Ok(true),
        };
        self.move_to_row(row, column, modifiers)?;
        Ok(true)
    }

    /// Returns whether the key was handled and whether the current cell moved.
    fn process_down_key(&mut self, modifiers: KeyModifiers) -> Result<(bool, bool)> {
        let Some((first_column, last_row)) = self.navigation_bounds() else {
            return Ok((false, false));
        };
        let (row, column) = match self.current_cell {
            None if modifiers.ctrl => (last_row, first_column),
            None => (0, first_column),
            Some(c) if modifiers.ctrl => (last_row, c.column_index),
            Some(c) if c.row_index < last_row => (c.row_index + 1, c.column_index),
            Some(_) => return Ok((true, false)),
        };
        self.move_to_row(row, column, modifiers)?;
        Ok((true, true))
    }

    /// Moves by the number of rows that fit the viewport entirely.
    fn process_page_key(&mut self, down: bool, modifiers: KeyModifiers) -> Result<bool> {
        let Some((first_column, last_row)) = self.navigation_bounds() else {
            return Ok(false);
        };
        let jump = self
            .display_data
            .num_totally_displayed_scrolling_rows()
            .max(1);
        let (start, column) = match self.current_cell {
            Some(c) => (c.row_index, c.column_index),
            None => {
                let first = self.display_data.first_displayed_scrolling_row();
                (first.unwrap_or(0), first_column)
            }
        };
        let row = if down {
            start.saturating_add(jump).min(last_row)
        } else {
            start.saturating_sub(jump)
        };
        self.move_to_row(row, column, modifiers)?;
        Ok(true)
    }

    fn process_horizontal_key(&mut self, right: bool, modifiers: KeyModifiers) -> Result<bool> {
        let Some((first_column, _)) = self.navigation_bounds() else {
            return Ok(false);
        };
        let Some(current) = self.current_cell else {
            self.move_to_row(0, first_column, KeyModifiers::NONE)?;
            return Ok(true);
        };
        let target = match (right, modifiers.ctrl) {
            (true, true) => self.columns.last_visible_column(),
            (false, true) => Some(first_column),
            (true, false) => self.columns.next_visible_column(current.column_index),
            (false, false) => self.columns.previous_visible_column(current.column_index),
        };
        if let Some(column) = target.filter(|&c| c != current.column_index) {
            self.move_within_row(column, current.row_index)?;
        }
        Ok(true)
    }

    /// Home/End move to the first/last column of the current row, or with Ctrl to the first
    /// cell of the first row/last cell of the last row.
    fn process_home_end_key(&mut self, end: bool, modifiers: KeyModifiers) -> Result<bool> {
        let Some((first_column, last_row)) = self.navigation_bounds() else {
            return Ok(false);
        };
        let column = if end {
            self.columns.last_visible_column().unwrap_or(first_column)
        } else {
            first_column
        };
        if modifiers.ctrl {
            let row = if end { last_row } else { 0 };
            self.move_to_row(row, column, modifiers)?;
            return Ok(true);
        }
        match self.current_cell {
            Some(current) => self.move_within_row(column, current.row_index)?,
            None => self.move_to_row(0, column, KeyModifiers::NONE)?,
        }
        Ok(true)
    }

    /// While editing, Tab commits and starts editing the next writable cell, wrapping to the
    /// next row (Shift+Tab goes backwards).
    fn process_tab_key(&mut self, modifiers: KeyModifiers) -> Result<bool> {
        if modifiers.ctrl || self.editing_cell.is_none() || self.options.is_read_only {
            return Ok(false);
        }
        let Some(current) = self.current_cell else {
            return Ok(false);
        };
        let back = modifiers.shift;
        let (row, column) = match self.neighbor_writable_column(current.column_index, back) {
            Some(column) => (current.row_index, column),
            None => {
                let row = if back {
                    current.row_index.checked_sub(1)
                } else {
                    Some(current.row_index + 1).filter(|&r| r < self.items.len())
                };
                let column = if back {
                    self.last_writable_column()
                } else {
                    self.first_writable_column()
                };
                match (row, column) {
                    (Some(row), Some(column)) => (row, column),
                    _ => return Ok(false),
                }
            }
        };

        self.set_current_cell(Some(DataGridCellCoordinates::new(column, row)))?;
        if row != current.row_index
            || self.options.selection_mode == DataGridSelectionMode::Extended
        {
            self.set_selected_index(Some(row))?;
        }
        self.scroll_cell_into_view(column, row)?;
        self.begin_edit(EditingTrigger::Key(EditingKey::Other))?;
        Ok(true)
    }

    /// Enter commits the cell edit and moves down like the Down key. Ctrl+Enter commits the
    /// cell and row edits without moving.
    fn process_enter_key(&mut self, modifiers: KeyModifiers) -> Result<bool> {
        let mut handled = true;
        let mut moved = false;
        if !modifiers.ctrl {
            (handled, moved) = self.process_down_key(KeyModifiers::NONE)?;
        }
        if !moved {
            let cell_committed = if self.editing_cell.is_some() {
                self.commit_edit(DataGridEditingUnit::Cell, true)?
            } else {
                true
            };
            if cell_committed && modifiers.ctrl && self.editing_row.is_some() {
                self.commit_edit(DataGridEditingUnit::Row, true)?;
            }
        }
        Ok(handled)
    }

    /// Cancels the cell edit, or the row edit once no cell is editing.
    fn process_escape_key(&mut self) -> bool {
        if self.editing_cell.is_some() {
            self.cancel_edit(DataGridEditingUnit::Cell);
            return true;
        }
        if self.editing_row.is_some() {
            self.cancel_edit(DataGridEditingUnit::Row);
            return true;
        }
        false
    }

    fn process_f2_key(&mut self) -> Result<bool> {
        if self.current_cell.is_none() || self.editing_cell.is_some() {
            return Ok(false);
        }
        self.begin_edit(EditingTrigger::Key(EditingKey::F2))
    }

    fn process_a_key(&mut self, modifiers: KeyModifiers) -> Result<bool> {
        if !modifiers.ctrl
            || modifiers.shift
            || modifiers.alt
            || self.options.selection_mode != DataGridSelectionMode::Extended
        {
            return Ok(false);
        }
        self.select_all()?;
        Ok(true)
    }

    /// Makes `(column, row)` current and selects the way a vertical move does.
    fn move_to_row(&mut self, row: usize, column: usize, modifiers: KeyModifiers) -> Result<()> {
        self.set_current_cell(Some(DataGridCellCoordinates::new(column, row)))?;
        let extend =
            modifiers.shift && self.options.selection_mode == DataGridSelectionMode::Extended;
        match self.anchor_row {
            Some(anchor) if extend => self.select_range_only(anchor, row),
            _ => self.set_selected_index(Some(row))?,
        }
        self.scroll_cell_into_view(column, row)
    }

    /// Moves along the current row. The selection does not change.
    fn move_within_row(&mut self, column: usize, row: usize) -> Result<()> {
        self.set_current_cell(Some(DataGridCellCoordinates::new(column, row)))?;
        self.scroll_cell_into_view(column, row)
    }

    fn scroll_cell_into_view(&mut self, column: usize, row: usize) -> Result<()> {
        self.scroll_column_into_view(column)?;
        self.scroll_into_view(row)
    }

    fn is_writable_column(&self, column_index: usize) -> bool {
        self.columns
            .get(column_index)
            .is_some_and(|c| !c.is_read_only())
    }

    fn neighbor_writable_column(&self, column_index: usize, back: bool) -> Option<usize> {
        let writable = |i: &usize| self.is_writable_column(*i);
        if back {
            self.columns
                .visible_columns()
                .rev()
                .skip_while(|&i| i != column_index)
                .skip(1)
                .find(writable)
        } else {
            self.columns
                .visible_columns()
                .skip_while(|&i| i != column_index)
                .skip(1)
                .find(writable)
        }
    }

    fn first_writable_column(&self) -> Option<usize> {
        self.columns
            .visible_columns()
            .find(|&i| self.is_writable_column(i))
    }

    fn last_writable_column(&self) -> Option<usize> {
        self.columns
            .visible_columns()
            .rev()
            .find(|&i| self.is_writable_column(i))
    }
}
