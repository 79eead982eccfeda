//! List views over the grid's selected rows.
//!
//! Both views translate between a position in the selection (ascending row order) and a row
//! index by walking the selection ranges.

use crate::editing::DataGridEditingUnit;
use crate::error::{DataGridError, Result};
use crate::grid::DataGrid;
use crate::item::GridItem;
use crate::options::DataGridSelectionMode;

/// Read-only view of the selected items.
#[derive(Debug)]
pub struct SelectedItems<'a, T> {
    grid: &'a DataGrid<T>,
}

impl<'a, T: GridItem> SelectedItems<'a, T> {
    pub(crate) fn new(grid: &'a DataGrid<T>) -> Self {
        Self { grid }
    }

    pub fn len(&self) -> usize {
        self.grid.selected_row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th selected item.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        let row = self.grid.selection_table().nth_index(index)?;
        self.grid.item(row)
    }

    /// Selected items in row order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        let grid = self.grid;
        grid.selected_row_indexes()
            .filter_map(move |row| grid.item(row))
    }

    /// Row index of the `index`-th selected item.
    pub fn row_at(&self, index: usize) -> Option<usize> {
        self.grid.selection_table().nth_index(index)
    }
}

impl<T: GridItem + PartialEq> SelectedItems<'_, T> {
    /// Position of `item` among the selected items.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        position_in_selection(self.grid, item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}

/// Mutable view of the selected items, borrowed from the grid.
///
/// Changes go through the grid so selection events fire and displayed rows follow.
#[derive(Debug)]
pub struct SelectedItemsCollection<'a, T> {
    grid: &'a mut DataGrid<T>,
}

impl<'a, T: GridItem> SelectedItemsCollection<'a, T> {
    pub(crate) fn new(grid: &'a mut DataGrid<T>) -> Self {
        Self { grid }
    }

    pub fn len(&self) -> usize {
        self.grid.selected_row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        let row = self.grid.selection_table().nth_index(index)?;
        self.grid.item(row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let grid = &*self.grid;
        grid.selected_row_indexes()
            .filter_map(move |row| grid.item(row))
    }

    /// Unselects the `index`-th selected item.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        self.check_multiple_selection()?;
        let count = self.len();
        let Some(row) = self.grid.selection_table().nth_index(index) else {
            return Err(DataGridError::ValueMustBeBetween {
                name: "index",
                low: 0,
                high: count,
            });
        };
        self.commit_row_edit(Some(row))?;
        self.grid.set_row_selection(row, false)
    }

    /// Unselects every item.
    pub fn clear(&mut self) -> Result<()> {
        self.check_multiple_selection()?;
        self.commit_row_edit(None)?;
        self.grid.clear_row_selection();
        Ok(())
    }

    pub fn insert(&mut self, _index: usize, _item: T) -> Result<()> {
        Err(DataGridError::NotSupported("inserting into the selected items"))
    }

    pub fn set(&mut self, _index: usize, _item: T) -> Result<()> {
        Err(DataGridError::NotSupported("replacing a selected item"))
    }

    fn check_multiple_selection(&self) -> Result<()> {
        if self.grid.selection_mode() == DataGridSelectionMode::Single {
            return Err(DataGridError::NotSupportedInSingleMode);
        }
        Ok(())
    }

    /// Commits the pending row edit when it is on `row` (or on any row for `None`).
    fn commit_row_edit(&mut self, row: Option<usize>) -> Result<()> {
        let Some(editing) = self.grid.editing_row() else {
            return Ok(());
        };
        if row.is_some_and(|r| r != editing) {
            return Ok(());
        }
        match self.grid.commit_edit(DataGridEditingUnit::Row, true) {
            Ok(true) => Ok(()),
            _ => Err(DataGridError::CommitFailed),
        }
    }
}

impl<T: GridItem + PartialEq> SelectedItemsCollection<'_, T> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        position_in_selection(self.grid, item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Selects `item` and returns its position among the selected items.
    ///
    /// The first item added to an empty selection becomes the grid's selected item.
    pub fn add(&mut self, item: &T) -> Result<usize> {
        self.check_multiple_selection()?;
        let row = self
            .grid
            .items()
            .iter()
            .position(|candidate| candidate == item)
            .ok_or(DataGridError::ItemNotInItemsSource)?;
        self.grid.set_row_selection(row, true)?;
        self.grid
            .selection_table()
            .position_of(row)
            .ok_or(DataGridError::ItemNotInItemsSource)
    }

    /// Unselects `item`. Returns `Ok(false)` when it was not selected.
    pub fn remove(&mut self, item: &T) -> Result<bool> {
        self.check_multiple_selection()?;
        let Some(row) = selected_row_of(self.grid, item) else {
            return Ok(false);
        };
        self.commit_row_edit(Some(row))?;
        self.grid.set_row_selection(row, false)?;
        Ok(true)
    }
}

fn selected_row_of<T: GridItem + PartialEq>(grid: &DataGrid<T>, item: &T) -> Option<usize> {
    grid.selected_row_indexes()
        .find(|&row| grid.item(row).is_some_and(|candidate| candidate == item))
}

fn position_in_selection<T: GridItem + PartialEq>(grid: &DataGrid<T>, item: &T) -> Option<usize> {
    let row = selected_row_of(grid, item)?;
    grid.selection_table().position_of(row)
}
