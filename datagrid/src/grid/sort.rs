use alloc::string::String;
use core::cmp::Ordering;

use super::DataGrid;
use crate::editing::DataGridEditingUnit;
use crate::error::{DataGridError, Result};
use crate::events::{DataGridSortingEventArgs, raise};
use crate::item::GridItem;
use crate::options::Invalidation;
use crate::sorting::{ListSortDirection, SortDescription, compare_values};

impl<T: GridItem> DataGrid<T> {
    /// The active sort keys, most significant first.
    pub fn sort_descriptions(&self) -> &[SortDescription] {
        &self.sort_descriptions
    }

    /// Direction column `column_index` is sorted in, for the header's sort glyph.
    pub fn column_sort_direction(&self, column_index: usize) -> Option<ListSortDirection> {
        let property = self.columns.get(column_index)?.sort_property_name()?;
        self.sort_descriptions
            .iter()
            .find(|d| d.property_name == property)
            .map(|d| d.direction)
    }

    /// Handles a click on the header of column `column_index`.
    ///
    /// Sorts ascending, or flips the direction when the column is already sorted. With
    /// `add_to_existing` (a shift-click) the column joins the sort keys instead of replacing
    /// them. The items are reordered stably and selection and the current cell are reset.
    ///
    /// Returns `Ok(false)` when the column cannot be sorted (sorting disabled, or neither a sort
    /// member path nor a binding) or a `sorting` handler cancelled.
    pub fn request_sort(&mut self, column_index: usize, add_to_existing: bool) -> Result<bool> {
        let column = self
            .columns
            .get(column_index)
            .ok_or(DataGridError::ColumnNotInThisGrid(column_index))?;
        if !column.can_user_sort() {
            return Ok(false);
        }
        let Some(property) = column.sort_property_name().map(String::from) else {
            return Ok(false);
        };
        let existing = self
            .sort_descriptions
            .iter()
            .position(|d| d.property_name == property);
        let direction = existing.map_or(ListSortDirection::Ascending, |i| {
            self.sort_descriptions[i].direction.reversed()
        });

        if self.is_editing() {
            let committed = matches!(self.commit_edit(DataGridEditingUnit::Row, true), Ok(true));
            if !committed {
                return Err(DataGridError::CommitFailed);
            }
        }
        let mut args = DataGridSortingEventArgs {
            column_index,
            property_name: property.clone(),
            direction,
            add_to_existing,
            cancel: false,
        };
        raise(&self.events.sorting, &mut args);
        if args.cancel {
            gdebug!(column_index, "DataGrid::request_sort cancelled by handler");
            return Ok(false);
        }

        let sort = SortDescription::new(property, direction);
        match existing {
            Some(i) if add_to_existing => self.sort_descriptions[i] = sort,
            _ if add_to_existing => self.sort_descriptions.push(sort),
            _ => {
                self.sort_descriptions.clear();
                self.sort_descriptions.push(sort);
            }
        }
        self.apply_sort();
        Ok(true)
    }

    /// Drops every sort key. The items keep their current order.
    pub fn clear_sort(&mut self) {
        if !self.sort_descriptions.is_empty() {
            self.sort_descriptions.clear();
            self.invalidate(Invalidation::Arrange);
        }
    }

    fn apply_sort(&mut self) {
        gdebug!(
            keys = self.sort_descriptions.len(),
            "DataGrid: sorting items"
        );
        let mut items = core::mem::take(&mut self.items);
        let keys = &self.sort_descriptions;
        items.sort_by(|a, b| {
            keys.iter()
                .map(|key| {
                    let ordering = compare_values(
                        &a.value(&key.property_name),
                        &b.value(&key.property_name),
                    );
                    match key.direction {
                        ListSortDirection::Ascending => ordering,
                        ListSortDirection::Descending => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        self.replace_items(items);
        self.update_displayed_rows();
        self.invalidate(Invalidation::Measure);
    }
}
