use alloc::sync::Arc;

use crate::column::{ColumnDefaults, DEFAULT_MIN_COLUMN_WIDTH};
use crate::error::{DataGridError, Result};
use crate::length::DataGridLength;

pub(crate) const DEFAULT_ROW_HEIGHT: f64 = 22.0;
const MINIMUM_COLUMN_HEADER_HEIGHT: f64 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataGridSelectionMode {
    Single,
    #[default]
    Extended,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataGridRowDetailsVisibilityMode {
    Collapsed,
    Visible,
    #[default]
    VisibleWhenSelected,
}

/// What the host has to redo after a grid mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Invalidation {
    /// Sizes may have changed: run `measure` then `arrange`.
    Measure,
    /// Only positions or clips changed: run `arrange`.
    Arrange,
}

/// A callback fired whenever the grid needs another layout pass.
pub type OnInvalidatedCallback = Arc<dyn Fn(Invalidation) + Send + Sync>;

/// Configuration for [`crate::DataGrid`].
///
/// Cheap to clone; the callback lives in an `Arc`.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataGridOptions {
    /// Explicit row height; `None` sizes each row to its cells.
    pub row_height: Option<f64>,
    /// Height assumed for rows that have not been measured yet.
    pub row_height_estimate: f64,
    /// Explicit header row height; `None` sizes the header row to the tallest header.
    pub column_header_height: Option<f64>,
    /// Width of columns that do not set their own.
    pub column_width: DataGridLength,
    pub min_column_width: f64,
    pub max_column_width: f64,
    pub frozen_column_count: usize,
    pub selection_mode: DataGridSelectionMode,
    pub row_details_visibility_mode: DataGridRowDetailsVisibilityMode,
    pub is_read_only: bool,
    pub can_user_reorder_columns: bool,
    pub can_user_resize_columns: bool,
    pub can_user_sort_columns: bool,
    /// Generate a column per item property (see [`crate::GridItem::properties`]) whenever the
    /// items are replaced.
    pub auto_generate_columns: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_invalidated: Option<OnInvalidatedCallback>,
}

impl Default for DataGridOptions {
    fn default() -> Self {
        Self {
            row_height: None,
            row_height_estimate: DEFAULT_ROW_HEIGHT,
            column_header_height: None,
            column_width: DataGridLength::AUTO,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_column_width: f64::INFINITY,
            frozen_column_count: 0,
            selection_mode: DataGridSelectionMode::default(),
            row_details_visibility_mode: DataGridRowDetailsVisibilityMode::default(),
            is_read_only: false,
            can_user_reorder_columns: true,
            can_user_resize_columns: true,
            can_user_sort_columns: true,
            auto_generate_columns: true,
            on_invalidated: None,
        }
    }
}

impl DataGridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, row_height: Option<f64>) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_row_height_estimate(mut self, estimate: f64) -> Self {
        self.row_height_estimate = estimate;
        self
    }

    pub fn with_column_header_height(mut self, height: Option<f64>) -> Self {
        self.column_header_height = height;
        self
    }

    pub fn with_column_width(mut self, width: DataGridLength) -> Self {
        self.column_width = width;
        self
    }

    pub fn with_column_width_limits(mut self, min: f64, max: f64) -> Self {
        self.min_column_width = min;
        self.max_column_width = max;
        self
    }

    pub fn with_frozen_column_count(mut self, count: usize) -> Self {
        self.frozen_column_count = count;
        self
    }

    pub fn with_selection_mode(mut self, mode: DataGridSelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_row_details_visibility_mode(
        mut self,
        mode: DataGridRowDetailsVisibilityMode,
    ) -> Self {
        self.row_details_visibility_mode = mode;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.is_read_only = read_only;
        self
    }

    pub fn with_can_user_reorder_columns(mut self, value: bool) -> Self {
        self.can_user_reorder_columns = value;
        self
    }

    pub fn with_can_user_resize_columns(mut self, value: bool) -> Self {
        self.can_user_resize_columns = value;
        self
    }

    pub fn with_can_user_sort_columns(mut self, value: bool) -> Self {
        self.can_user_sort_columns = value;
        self
    }

    pub fn with_auto_generate_columns(mut self, value: bool) -> Self {
        self.auto_generate_columns = value;
        self
    }

    pub fn with_on_invalidated(
        mut self,
        on_invalidated: Option<impl Fn(Invalidation) + Send + Sync + 'static>,
    ) -> Self {
        self.on_invalidated = on_invalidated.map(|f| Arc::new(f) as OnInvalidatedCallback);
        self
    }

    /// Rejects settings the layout cannot honor.
    pub fn validate(&self) -> Result<()> {
        if let Some(height) = self.row_height {
            check_finite("row_height", height)?;
            if height < 0.0 {
                return Err(DataGridError::at_least("row_height", 0));
            }
        }
        check_finite("row_height_estimate", self.row_height_estimate)?;
        if self.row_height_estimate < 0.0 {
            return Err(DataGridError::at_least("row_height_estimate", 0));
        }
        if let Some(height) = self.column_header_height {
            check_finite("column_header_height", height)?;
            if height < MINIMUM_COLUMN_HEADER_HEIGHT {
                return Err(DataGridError::at_least(
                    "column_header_height",
                    MINIMUM_COLUMN_HEADER_HEIGHT,
                ));
            }
        }
        check_finite("min_column_width", self.min_column_width)?;
        if self.min_column_width < 0.0 {
            return Err(DataGridError::at_least("min_column_width", 0));
        }
        if self.max_column_width.is_nan() {
            return Err(DataGridError::ValueCannotBeNaN {
                name: "max_column_width",
            });
        }
        if self.max_column_width < self.min_column_width {
            return Err(DataGridError::at_least(
                "max_column_width",
                "min_column_width",
            ));
        }
        Ok(())
    }

    pub(crate) fn column_defaults(&self) -> ColumnDefaults {
        ColumnDefaults {
            width: self.column_width,
            min_width: self.min_column_width,
            max_width: self.max_column_width,
            can_user_reorder: self.can_user_reorder_columns,
            can_user_resize: self.can_user_resize_columns,
            can_user_sort: self.can_user_sort_columns,
            is_read_only: self.is_read_only,
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(DataGridError::ValueCannotBeNaN { name });
    }
    if value.is_infinite() {
        return Err(DataGridError::ValueCannotBeInfinity { name });
    }
    Ok(())
}

impl core::fmt::Debug for DataGridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataGridOptions")
            .field("row_height", &self.row_height)
            .field("row_height_estimate", &self.row_height_estimate)
            .field("column_header_height", &self.column_header_height)
            .field("column_width", &self.column_width)
            .field("min_column_width", &self.min_column_width)
            .field("max_column_width", &self.max_column_width)
            .field("frozen_column_count", &self.frozen_column_count)
            .field("selection_mode", &self.selection_mode)
            .field(
                "row_details_visibility_mode",
                &self.row_details_visibility_mode,
            )
            .field("is_read_only", &self.is_read_only)
            .field("can_user_reorder_columns", &self.can_user_reorder_columns)
            .field("can_user_resize_columns", &self.can_user_resize_columns)
            .field("can_user_sort_columns", &self.can_user_sort_columns)
            .field("auto_generate_columns", &self.auto_generate_columns)
            .field("on_invalidated", &self.on_invalidated.is_some())
            .finish()
    }
}
