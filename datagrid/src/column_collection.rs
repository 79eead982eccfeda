use alloc::vec::Vec;

use crate::column::{ColumnDefaults, DataGridColumn, FillerColumn};
use crate::error::{DataGridError, Result};

/// The grid's columns, in collection order, plus the display order the presenters walk.
///
/// Columns `[0, frozen_column_count)` in display order are frozen.
#[derive(Clone, Debug, Default)]
pub struct ColumnCollection {
    columns: Vec<DataGridColumn>,
    // display index -> column index
    display_order: Vec<usize>,
    frozen_column_count: usize,
    defaults: ColumnDefaults,
    filler: FillerColumn,
}

impl ColumnCollection {
    pub fn new(defaults: ColumnDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DataGridColumn> {
        self.columns.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut DataGridColumn> {
        self.columns.get_mut(index)
    }

    /// Columns in collection order.
    pub fn iter(&self) -> core::slice::Iter<'_, DataGridColumn> {
        self.columns.iter()
    }

    /// Column indexes in display order.
    pub fn display_order(&self) -> &[usize] {
        &self.display_order
    }

    pub fn column_at_display_index(&self, display_index: usize) -> Option<&DataGridColumn> {
        self.display_order
            .get(display_index)
            .and_then(|&i| self.columns.get(i))
    }

    pub fn defaults(&self) -> &ColumnDefaults {
        &self.defaults
    }

    /// Replaces the inherited column settings. Returns `true` if any actual width changed.
    pub(crate) fn set_defaults(&mut self, defaults: ColumnDefaults) -> bool {
        self.defaults = defaults;
        let mut changed = false;
        for column in &mut self.columns {
            changed |= column.set_inherited(defaults);
        }
        changed
    }

    pub fn frozen_column_count(&self) -> usize {
        self.frozen_column_count
    }

    pub(crate) fn set_frozen_column_count(&mut self, count: usize) {
        self.frozen_column_count = count;
        self.update_frozen();
    }

    pub fn filler(&self) -> &FillerColumn {
        &self.filler
    }

    pub(crate) fn filler_mut(&mut self) -> &mut FillerColumn {
        &mut self.filler
    }

    /// Inserts `column` at collection position `index` (clamped to the end).
    ///
    /// A display index requested with [`DataGridColumn::with_display_index`] is honored when it
    /// is in range; otherwise the column is displayed last.
    pub(crate) fn insert(&mut self, index: usize, mut column: DataGridColumn) -> usize {
        let index = index.min(self.columns.len());
        for i in &mut self.display_order {
            if *i >= index {
                *i += 1;
            }
        }
        let display_index = column
            .display_index()
            .filter(|&d| d <= self.display_order.len())
            .unwrap_or(self.display_order.len());
        self.display_order.insert(display_index, index);

        column.set_inherited(self.defaults);
        column.take_changes();
        self.columns.insert(index, column);
        self.renumber();
        gdebug!(index, display_index, "ColumnCollection::insert");
        index
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<DataGridColumn> {
        if index >= self.columns.len() {
            return Err(DataGridError::ColumnNotInThisGrid(index));
        }
        self.display_order.retain(|&i| i != index);
        for i in &mut self.display_order {
            if *i > index {
                *i -= 1;
            }
        }
        let mut column = self.columns.remove(index);
        column.set_index(None);
        column.set_display_index_internal(None);
        column.set_frozen(false);
        self.renumber();
        Ok(column)
    }

    /// Checks that column `index` may move to `display_index` without crossing the frozen
    /// boundary.
    pub fn validate_display_index(&self, index: usize, display_index: usize) -> Result<()> {
        let column = self
            .columns
            .get(index)
            .ok_or(DataGridError::ColumnNotInThisGrid(index))?;
        if display_index >= self.columns.len() {
            return Err(DataGridError::ValueMustBeBetween {
                name: "display_index",
                low: 0,
                high: self.columns.len(),
            });
        }
        let target_frozen = display_index < self.frozen_column_count;
        match (column.is_frozen(), target_frozen) {
            (true, false) => Err(DataGridError::CannotMoveFrozenColumn),
            (false, true) => Err(DataGridError::CannotMoveNonFrozenColumn),
            _ => Ok(()),
        }
    }

    /// Moves column `index` to `display_index`, shifting the columns in between.
    pub(crate) fn set_display_index(&mut self, index: usize, display_index: usize) -> Result<()> {
        self.validate_display_index(index, display_index)?;
        let Some(current) = self.display_order.iter().position(|&i| i == index) else {
            return Err(DataGridError::ColumnNotInThisGrid(index));
        };
        if current == display_index {
            return Ok(());
        }
        let moved = self.display_order.remove(current);
        self.display_order.insert(display_index, moved);
        self.renumber();
        Ok(())
    }

    /// Visible column indexes in display order.
    pub fn visible_columns(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.display_order
            .iter()
            .copied()
            .filter(move |&i| self.columns[i].is_visible())
    }

    pub fn first_visible_column(&self) -> Option<usize> {
        self.visible_columns().next()
    }

    pub fn last_visible_column(&self) -> Option<usize> {
        self.visible_columns().next_back()
    }

    pub fn next_visible_column(&self, index: usize) -> Option<usize> {
        let display_index = self.columns.get(index)?.display_index()?;
        self.display_order[display_index + 1..]
            .iter()
            .copied()
            .find(|&i| self.columns[i].is_visible())
    }

    pub fn previous_visible_column(&self, index: usize) -> Option<usize> {
        let display_index = self.columns.get(index)?.display_index()?;
        self.display_order[..display_index]
            .iter()
            .rev()
            .copied()
            .find(|&i| self.columns[i].is_visible())
    }

    pub fn first_visible_scrolling_column(&self) -> Option<usize> {
        self.visible_columns()
            .find(|&i| !self.columns[i].is_frozen())
    }

    pub fn visible_column_count(&self) -> usize {
        self.visible_columns().count()
    }

    /// Sum of the actual widths of all visible columns.
    pub fn visible_edged_columns_width(&self) -> f64 {
        self.visible_columns()
            .map(|i| self.columns[i].actual_width())
            .sum()
    }

    pub fn visible_frozen_columns_width(&self) -> f64 {
        self.visible_columns()
            .filter(|&i| self.columns[i].is_frozen())
            .map(|i| self.columns[i].actual_width())
            .sum()
    }

    /// Left edge of column `index` in unscrolled coordinates.
    pub fn column_left_edge(&self, index: usize) -> Option<f64> {
        let column = self.columns.get(index)?;
        if !column.is_visible() {
            return None;
        }
        Some(
            self.visible_columns()
                .take_while(|&i| i != index)
                .map(|i| self.columns[i].actual_width())
                .sum(),
        )
    }

    /// Sizes the filler column to the space the visible columns leave in `cells_width`.
    /// Returns the new filler width.
    pub(crate) fn update_filler(&mut self, cells_width: f64) -> f64 {
        let total = self.visible_edged_columns_width();
        let width = if crate::tolerance::less_than(total, cells_width) {
            cells_width - total
        } else {
            0.0
        };
        self.filler.set_width(width);
        width
    }

    fn renumber(&mut self) {
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.set_index(Some(i));
        }
        for (d, &i) in self.display_order.iter().enumerate() {
            self.columns[i].set_display_index_internal(Some(d));
        }
        self.update_frozen();
    }

    fn update_frozen(&mut self) {
        for (d, &i) in self.display_order.iter().enumerate() {
            self.columns[i].set_frozen(d < self.frozen_column_count);
        }
    }
}
