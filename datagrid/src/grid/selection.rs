use alloc::vec::Vec;

use super::DataGrid;
use crate::error::{DataGridError, Result};
use crate::events::{DataGridSelectionChangedEventArgs, raise};
use crate::index_table::IndexToValueTable;
use crate::item::GridItem;
use crate::options::{DataGridRowDetailsVisibilityMode, DataGridSelectionMode, Invalidation};
use crate::selection::{SelectedItems, SelectedItemsCollection};

impl<T: GridItem> DataGrid<T> {
    pub fn selection_mode(&self) -> DataGridSelectionMode {
        self.options.selection_mode
    }

    pub fn is_row_selected(&self, row_index: usize) -> bool {
        self.selected_rows.contains(row_index)
    }

    pub fn selected_row_count(&self) -> usize {
        self.selected_rows.index_count()
    }

    /// Selected rows in ascending order.
    pub fn selected_row_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected_rows.indexes()
    }

    /// The primary selected row: the first row selected since the selection was last empty.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_row
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selected_row.and_then(|row| self.items.get(row))
    }

    /// The row extended selections grow from.
    pub fn anchor_row(&self) -> Option<usize> {
        self.anchor_row
    }

    /// Selects exactly `row_index`, or clears the selection for `None`.
    pub fn set_selected_index(&mut self, row_index: Option<usize>) -> Result<()> {
        if let Some(row) = row_index {
            self.check_row_index(row)?;
        }
        let mut change = DataGridSelectionChangedEventArgs::default();
        let previous: Vec<usize> = self.selected_rows.indexes().collect();
        for row in previous {
            if Some(row) != row_index {
                self.unselect_row(row, &mut change);
            }
        }
        if let Some(row) = row_index {
            self.select_row(row, &mut change);
            self.selected_row = Some(row);
            self.anchor_row = Some(row);
        }
        self.finish_selection_change(change);
        Ok(())
    }

    /// Selects or unselects a single row. In single mode selecting a row unselects the others.
    pub fn set_row_selection(&mut self, row_index: usize, selected: bool) -> Result<()> {
        self.check_row_index(row_index)?;
        let mut change = DataGridSelectionChangedEventArgs::default();
        if selected {
            if self.options.selection_mode == DataGridSelectionMode::Single {
                let previous: Vec<usize> = self.selected_rows.indexes().collect();
                for row in previous {
                    if row != row_index {
                        self.unselect_row(row, &mut change);
                    }
                }
            }
            self.select_row(row_index, &mut change);
            if self.anchor_row.is_none() {
                self.anchor_row = Some(row_index);
            }
        } else {
            self.unselect_row(row_index, &mut change);
        }
        self.finish_selection_change(change);
        Ok(())
    }

    /// Adds `count` rows from `start` to the selection.
    pub fn select_rows(&mut self, start: usize, count: usize) -> Result<()> {
        if self.options.selection_mode == DataGridSelectionMode::Single {
            return Err(DataGridError::NotSupportedInSingleMode);
        }
        if count == 0 {
            return Ok(());
        }
        let end = start.saturating_add(count - 1);
        self.check_row_index(end)?;
        let mut change = DataGridSelectionChangedEventArgs::default();
        for row in start..=end {
            self.select_row(row, &mut change);
        }
        if self.anchor_row.is_none() {
            self.anchor_row = Some(start);
        }
        self.finish_selection_change(change);
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<()> {
        if self.options.selection_mode == DataGridSelectionMode::Single {
            return Err(DataGridError::NotSupportedInSingleMode);
        }
        match self.items.len() {
            0 => Ok(()),
            len => self.select_rows(0, len),
        }
    }

    pub fn clear_row_selection(&mut self) {
        let mut change = DataGridSelectionChangedEventArgs::default();
        let previous: Vec<usize> = self.selected_rows.indexes().collect();
        for row in previous {
            self.unselect_row(row, &mut change);
        }
        self.anchor_row = None;
        self.finish_selection_change(change);
    }

    /// Selects exactly the rows between `anchor` and `row` (inclusive), keeping the anchor.
    pub(crate) fn select_range_only(&mut self, anchor: usize, row: usize) {
        let (low, high) = (anchor.min(row), anchor.max(row));
        let mut change = DataGridSelectionChangedEventArgs::default();
        let outside: Vec<usize> = self
            .selected_rows
            .indexes()
            .filter(|&r| r < low || r > high)
            .collect();
        for r in outside {
            self.unselect_row(r, &mut change);
        }
        for r in low..=high {
            self.select_row(r, &mut change);
        }
        self.anchor_row = Some(anchor);
        self.finish_selection_change(change);
    }

    /// Read-only view of the selected items in row order.
    pub fn selected_items(&self) -> SelectedItems<'_, T> {
        SelectedItems::new(self)
    }

    /// Mutable view of the selected items.
    pub fn selected_items_mut(&mut self) -> SelectedItemsCollection<'_, T> {
        SelectedItemsCollection::new(self)
    }

    pub(crate) fn selection_table(&self) -> &IndexToValueTable<bool> {
        &self.selected_rows
    }

    /// Keeps at most one selected row after switching to single selection.
    pub(crate) fn coerce_selection_to_mode(&mut self) {
        if self.options.selection_mode != DataGridSelectionMode::Single
            || self.selected_rows.index_count() <= 1
        {
            return;
        }
        let keep = self.selected_row
            .or_else(|| self.selected_rows.first_index());
        gdebug!(?keep, "DataGrid: coercing selection to single mode");
        let mut change = DataGridSelectionChangedEventArgs::default();
        let previous: Vec<usize> = self.selected_rows.indexes().collect();
        for row in previous {
            if Some(row) != keep {
                self.unselect_row(row, &mut change);
            }
        }
        self.finish_selection_change(change);
    }

    fn select_row(&mut self, row_index: usize, change: &mut DataGridSelectionChangedEventArgs) {
        if self.selected_rows.contains(row_index) {
            return;
        }
        self.selected_rows.add_value(row_index, true);
        if self.selected_row.is_none() {
            self.selected_row = Some(row_index);
        }
        change.added_rows.push(row_index);
    }

    fn unselect_row(&mut self, row_index: usize, change: &mut DataGridSelectionChangedEventArgs) {
        if !self.selected_rows.contains(row_index) {
            return;
        }
        self.selected_rows.remove_value(row_index);
        if self.selected_row == Some(row_index) {
            self.selected_row = self.selected_rows.first_index();
        }
        if self.selected_rows.is_empty() {
            self.anchor_row = None;
        }
        change.removed_rows.push(row_index);
    }

    /// Pushes the new state into the displayed rows and raises `selection_changed` when
    /// anything actually changed.
    fn finish_selection_change(&mut self, mut change: DataGridSelectionChangedEventArgs) {
        if change.added_rows.is_empty() && change.removed_rows.is_empty() {
            return;
        }
        gtrace!(
            added = change.added_rows.len(),
            removed = change.removed_rows.len(),
            "DataGrid: selection changed"
        );
        if self.options.row_details_visibility_mode
            == DataGridRowDetailsVisibilityMode::VisibleWhenSelected
        {
            for &row in change.added_rows.iter().chain(&change.removed_rows) {
                if !self.details_overrides.contains(row) {
                    self.forget_row_height(row);
                }
            }
        }
        self.sync_displayed_rows();
        raise(&self.events.selection_changed, &mut change);
        // Details may appear or disappear with the selection.
        self.invalidate(Invalidation::Measure);
    }
}
