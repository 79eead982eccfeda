/// Locates a cell by column and row index.
///
/// Used transiently (for example to describe the current cell while rows are inserted or
/// removed); it is not a durable identity for a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataGridCellCoordinates {
    pub column_index: usize,
    pub row_index: usize,
}

impl DataGridCellCoordinates {
    pub const fn new(column_index: usize, row_index: usize) -> Self {
        Self {
            column_index,
            row_index,
        }
    }

    /// Coordinates after a row was inserted at `row_index`, or `self` if the insertion was below.
    pub fn after_row_insertion(self, row_index: usize) -> Self {
        if self.row_index >= row_index {
            Self::new(self.column_index, self.row_index + 1)
        } else {
            self
        }
    }

    /// Coordinates after the row at `row_index` was removed.
    ///
    /// Returns `None` when the located row itself was removed.
    pub fn after_row_deletion(self, row_index: usize) -> Option<Self> {
        match self.row_index.cmp(&row_index) {
            core::cmp::Ordering::Less => Some(self),
            core::cmp::Ordering::Equal => None,
            core::cmp::Ordering::Greater => Some(Self::new(self.column_index, self.row_index - 1)),
        }
    }
}
