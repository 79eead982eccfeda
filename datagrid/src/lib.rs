//! A headless data-grid engine.
//!
//! For adapter-level utilities (scroll controllers, tweens, anchors), see the
//! `datagrid-adapter` crate.
//!
//! The crate implements the parts of a data grid that do not depend on a UI toolkit: the row
//! window with visual recycling ([`DisplayData`]), column sizing ([`DataGridLength`]), the
//! measure/arrange logic of the header, row, cell and details presenters, range-compressed
//! selection, current-cell tracking and inline editing.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the grid size and scroll offsets
//! - an [`ElementMeasurer`] that sizes generated cell content
//! - items implementing [`GridItem`] for bound columns
//!
//! and to render the rows, cells and clips the grid computes.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod column_collection;
mod coordinates;
mod display_data;
mod editing;
mod error;
mod events;
mod geometry;
mod grid;
mod index_table;
mod item;
mod keyboard;
mod length;
mod options;
mod presenters;
mod row;
mod row_heights;
mod selection;
mod sorting;
pub mod tolerance;

#[cfg(test)]
mod tests;

pub use column::{
    CellContext, CellElement, CheckBoxColumn, ColumnBehavior, ColumnChange, ColumnDefaults,
    ColumnKind, ContentProperty, DEFAULT_MIN_COLUMN_WIDTH, DataGridColumn, FillerColumn,
    FontStyle, TemplateColumn, TextColumn, TextSelection, TextStyle,
};
pub use column_collection::ColumnCollection;
pub use coordinates::DataGridCellCoordinates;
pub use display_data::{DisplayData, DisplayRow};
pub use editing::{DataGridEditAction, DataGridEditingUnit, EditingKey, EditingTrigger};
pub use error::{DataGridError, Result};
pub use events::{
    DataGridAutoGeneratingColumnEventArgs, DataGridBeginningEditEventArgs,
    DataGridColumnEventArgs, DataGridColumnReorderingEventArgs,
    DataGridCurrentCellChangedEventArgs, DataGridEndingEditEventArgs, DataGridEvents,
    DataGridPreparingCellForEditEventArgs, DataGridRowDetailsEventArgs, DataGridRowEventArgs,
    DataGridSelectionChangedEventArgs, DataGridSortingEventArgs, EventHandler,
};
pub use geometry::{Rect, Size};
pub use grid::DataGrid;
pub use index_table::{IndexRange, IndexToValueTable};
pub use item::{CellValue, GridItem, ItemProperty, PropertyKind};
pub use keyboard::{DataGridKey, KeyModifiers};
pub use length::{DataGridLength, DataGridLengthConverter, DataGridLengthUnit, NumberCulture};
pub use options::{
    DataGridOptions, DataGridRowDetailsVisibilityMode, DataGridSelectionMode, Invalidation,
    OnInvalidatedCallback,
};
pub use presenters::{
    CellsPresenter, ColumnHeader, ColumnHeadersPresenter, DetailsPresenter, ElementMeasurer,
    MonospaceMeasurer, RowsPresenter, ensure_cell_clip, should_display_cell,
};
pub use row::{DataGridCell, DataGridRow};
pub use selection::{SelectedItems, SelectedItemsCollection};
pub use sorting::{ListSortDirection, SortDescription};
