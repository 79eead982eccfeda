use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::column::{CellElement, DataGridColumn};
use crate::coordinates::DataGridCellCoordinates;
use crate::editing::{DataGridEditAction, DataGridEditingUnit, EditingTrigger};
use crate::sorting::ListSortDirection;

/// A grid event handler. Handlers may veto cancellable operations by setting `cancel`.
pub type EventHandler<A> = Arc<dyn Fn(&mut A) + Send + Sync>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataGridBeginningEditEventArgs {
    pub column_index: usize,
    pub row_index: usize,
    pub trigger: EditingTrigger,
    pub cancel: bool,
}

/// Raised after the editor of a cell was generated and prepared. Handlers may adjust the
/// editor before it is shown.
#[derive(Clone, Debug, PartialEq)]
pub struct DataGridPreparingCellForEditEventArgs {
    pub column_index: usize,
    pub row_index: usize,
    pub trigger: EditingTrigger,
    pub editing_element: CellElement,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataGridEndingEditEventArgs {
    /// `None` for row edits.
    pub column_index: Option<usize>,
    pub row_index: usize,
    pub editing_unit: DataGridEditingUnit,
    pub edit_action: DataGridEditAction,
    pub cancel: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataGridColumnEventArgs {
    pub column_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataGridColumnReorderingEventArgs {
    pub column_index: usize,
    pub new_display_index: usize,
    pub cancel: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataGridRowEventArgs {
    pub row_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataGridRowDetailsEventArgs {
    pub row_index: usize,
    pub is_visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataGridCurrentCellChangedEventArgs {
    pub previous: Option<DataGridCellCoordinates>,
    pub current: Option<DataGridCellCoordinates>,
}

/// Raised before a header click changes the sort. The grid reorders its items afterwards
/// unless a handler cancels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataGridSortingEventArgs {
    pub column_index: usize,
    pub property_name: String,
    pub direction: ListSortDirection,
    /// `true` when the column is added to the existing sort instead of replacing it.
    pub add_to_existing: bool,
    pub cancel: bool,
}

/// Raised for each column generated from the item properties. Handlers may adjust or drop it.
#[derive(Clone, Debug, PartialEq)]
pub struct DataGridAutoGeneratingColumnEventArgs {
    pub property_name: String,
    pub column: DataGridColumn,
    pub cancel: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataGridSelectionChangedEventArgs {
    pub added_rows: Vec<usize>,
    pub removed_rows: Vec<usize>,
}

/// Handlers for the grid's lifecycle notifications.
#[derive(Clone, Default)]
pub struct DataGridEvents {
    pub beginning_edit: Option<EventHandler<DataGridBeginningEditEventArgs>>,
    pub preparing_cell_for_edit: Option<EventHandler<DataGridPreparingCellForEditEventArgs>>,
    pub cell_edit_ending: Option<EventHandler<DataGridEndingEditEventArgs>>,
    pub row_edit_ending: Option<EventHandler<DataGridEndingEditEventArgs>>,
    pub column_reordering: Option<EventHandler<DataGridColumnReorderingEventArgs>>,
    pub column_reordered: Option<EventHandler<DataGridColumnEventArgs>>,
    pub column_display_index_changed: Option<EventHandler<DataGridColumnEventArgs>>,
    pub loading_row: Option<EventHandler<DataGridRowEventArgs>>,
    pub unloading_row: Option<EventHandler<DataGridRowEventArgs>>,
    /// A displayed row started showing its details.
    pub loading_row_details: Option<EventHandler<DataGridRowEventArgs>>,
    /// A displayed row stopped showing its details, or was unloaded while showing them.
    pub unloading_row_details: Option<EventHandler<DataGridRowEventArgs>>,
    pub row_details_visibility_changed: Option<EventHandler<DataGridRowDetailsEventArgs>>,
    pub selection_changed: Option<EventHandler<DataGridSelectionChangedEventArgs>>,
    pub current_cell_changed: Option<EventHandler<DataGridCurrentCellChangedEventArgs>>,
    pub sorting: Option<EventHandler<DataGridSortingEventArgs>>,
    pub auto_generating_column: Option<EventHandler<DataGridAutoGeneratingColumnEventArgs>>,
}

impl DataGridEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_beginning_edit(
        mut self,
        f: impl Fn(&mut DataGridBeginningEditEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.beginning_edit = Some(Arc::new(f));
        self
    }

    pub fn with_preparing_cell_for_edit(
        mut self,
        f: impl Fn(&mut DataGridPreparingCellForEditEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.preparing_cell_for_edit = Some(Arc::new(f));
        self
    }

    pub fn with_cell_edit_ending(
        mut self,
        f: impl Fn(&mut DataGridEndingEditEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.cell_edit_ending = Some(Arc::new(f));
        self
    }

    pub fn with_row_edit_ending(
        mut self,
        f: impl Fn(&mut DataGridEndingEditEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.row_edit_ending = Some(Arc::new(f));
        self
    }

    pub fn with_column_reordering(
        mut self,
        f: impl Fn(&mut DataGridColumnReorderingEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.column_reordering = Some(Arc::new(f));
        self
    }

    pub fn with_column_reordered(
        mut self,
        f: impl Fn(&mut DataGridColumnEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.column_reordered = Some(Arc::new(f));
        self
    }

    pub fn with_column_display_index_changed(
        mut self,
        f: impl Fn(&mut DataGridColumnEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.column_display_index_changed = Some(Arc::new(f));
        self
    }

    pub fn with_loading_row(
        mut self,
        f: impl Fn(&mut DataGridRowEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.loading_row = Some(Arc::new(f));
        self
    }

    pub fn with_unloading_row(
        mut self,
        f: impl Fn(&mut DataGridRowEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.unloading_row = Some(Arc::new(f));
        self
    }

    pub fn with_loading_row_details(
        mut self,
        f: impl Fn(&mut DataGridRowEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.loading_row_details = Some(Arc::new(f));
        self
    }

    pub fn with_unloading_row_details(
        mut self,
        f: impl Fn(&mut DataGridRowEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.unloading_row_details = Some(Arc::new(f));
        self
    }

    pub fn with_row_details_visibility_changed(
        mut self,
        f: impl Fn(&mut DataGridRowDetailsEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.row_details_visibility_changed = Some(Arc::new(f));
        self
    }

    pub fn with_selection_changed(
        mut self,
        f: impl Fn(&mut DataGridSelectionChangedEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.selection_changed = Some(Arc::new(f));
        self
    }

    pub fn with_current_cell_changed(
        mut self,
        f: impl Fn(&mut DataGridCurrentCellChangedEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.current_cell_changed = Some(Arc::new(f));
        self
    }

    pub fn with_sorting(
        mut self,
        f: impl Fn(&mut DataGridSortingEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.sorting = Some(Arc::new(f));
        self
    }

    pub fn with_auto_generating_column(
        mut self,
        f: impl Fn(&mut DataGridAutoGeneratingColumnEventArgs) + Send + Sync + 'static,
    ) -> Self {
        self.auto_generating_column = Some(Arc::new(f));
        self
    }
}

impl core::fmt::Debug for DataGridEvents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataGridEvents")
            .field("beginning_edit", &self.beginning_edit.is_some())
            .field(
                "preparing_cell_for_edit",
                &self.preparing_cell_for_edit.is_some(),
            )
            .field("cell_edit_ending", &self.cell_edit_ending.is_some())
            .field("row_edit_ending", &self.row_edit_ending.is_some())
            .field("column_reordering", &self.column_reordering.is_some())
            .field("column_reordered", &self.column_reordered.is_some())
            .field(
                "column_display_index_changed",
                &self.column_display_index_changed.is_some(),
            )
            .field("loading_row", &self.loading_row.is_some())
            .field("unloading_row", &self.unloading_row.is_some())
            .field("loading_row_details", &self.loading_row_details.is_some())
            .field(
                "unloading_row_details",
                &self.unloading_row_details.is_some(),
            )
            .field(
                "row_details_visibility_changed",
                &self.row_details_visibility_changed.is_some(),
            )
            .field("selection_changed", &self.selection_changed.is_some())
            .field("current_cell_changed", &self.current_cell_changed.is_some())
            .field("sorting", &self.sorting.is_some())
            .field(
                "auto_generating_column",
                &self.auto_generating_column.is_some(),
            )
            .finish()
    }
}

pub(crate) fn raise<A>(handler: &Option<EventHandler<A>>, args: &mut A) {
    if let Some(handler) = handler {
        handler(args);
    }
}
