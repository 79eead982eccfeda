use alloc::vec::Vec;

use crate::column::CellElement;
use crate::column_collection::ColumnCollection;
use crate::display_data::DisplayRow;
use crate::geometry::{Rect, Size};
use crate::presenters::{CellsLayout, CellsPresenter, DetailsPresenter, ElementMeasurer, constrain};

/// A cell slot in a row. Indexed by column index within its row.
#[derive(Clone, Debug, PartialEq)]
pub struct DataGridCell {
    pub(crate) content: CellElement,
    pub(crate) is_editing: bool,
    pub(crate) is_visible: bool,
    pub(crate) desired_size: Size,
    pub(crate) bounds: Rect,
    pub(crate) clip: Option<Rect>,
}

impl Default for DataGridCell {
    fn default() -> Self {
        Self {
            content: CellElement::Empty,
            is_editing: false,
            is_visible: true,
            desired_size: Size::ZERO,
            bounds: Rect::EMPTY,
            clip: None,
        }
    }
}

impl DataGridCell {
    pub fn content(&self) -> &CellElement {
        &self.content
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// `false` when the cell is collapsed because its column is hidden or scrolled out of view.
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Clip in cell coordinates; `None` draws the whole cell.
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    pub(crate) fn measure(&mut self, available: Size, measurer: &mut dyn ElementMeasurer) -> Size {
        let desired = measurer.measure_cell(&self.content, available);
        self.desired_size = constrain(desired, available);
        self.desired_size
    }

    pub(crate) fn arrange(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Takes the cell out of layout, e.g. when its column is hidden.
    pub(crate) fn collapse(&mut self) {
        self.is_visible = false;
        self.desired_size = Size::ZERO;
        self.bounds = Rect::EMPTY;
        self.clip = None;
    }

    fn reset(&mut self) {
        self.content = CellElement::Empty;
        self.is_editing = false;
        self.clip = None;
    }
}

/// A materialized row visual.
///
/// Owned by the grid's [`crate::DisplayData`] while displayed, and pooled for reuse after it
/// scrolls out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataGridRow {
    pub(crate) index: Option<usize>,
    pub(crate) cells: Vec<DataGridCell>,
    pub(crate) filler_cell: DataGridCell,
    pub(crate) cells_presenter: CellsPresenter,
    pub(crate) details_presenter: DetailsPresenter,
    pub(crate) is_selected: bool,
    pub(crate) is_editing: bool,
    pub(crate) is_current: bool,
    pub(crate) is_hidden: bool,
    pub(crate) desired_size: Size,
    pub(crate) bounds: Rect,
}

impl DataGridRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical row index, or `None` while pooled.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn cells(&self) -> &[DataGridCell] {
        &self.cells
    }

    pub fn cell(&self, column_index: usize) -> Option<&DataGridCell> {
        self.cells.get(column_index)
    }

    pub fn filler_cell(&self) -> &DataGridCell {
        &self.filler_cell
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn is_visible(&self) -> bool {
        !self.is_hidden
    }

    pub fn are_details_visible(&self) -> bool {
        self.details_presenter.is_visible()
    }

    pub fn details_presenter(&self) -> &DetailsPresenter {
        &self.details_presenter
    }

    pub fn cells_presenter(&self) -> &CellsPresenter {
        &self.cells_presenter
    }

    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Keeps one cell slot per column.
    pub(crate) fn ensure_cells(&mut self, column_count: usize) {
        self.cells.resize_with(column_count, DataGridCell::default);
    }

    pub(crate) fn measure(
        &mut self,
        columns: &mut ColumnCollection,
        layout: &CellsLayout,
        measurer: &mut dyn ElementMeasurer,
    ) -> Size {
        let Some(index) = self.index else {
            return Size::ZERO;
        };
        let cells = self.cells_presenter.measure(
            index,
            &mut self.cells,
            &mut self.filler_cell,
            columns,
            layout,
            measurer,
        );
        let details = self
            .details_presenter
            .measure(index, layout.cells_width, measurer);
        self.desired_size = Size::new(cells.width, cells.height + details);
        self.desired_size
    }

    pub(crate) fn arrange(
        &mut self,
        bounds: Rect,
        columns: &ColumnCollection,
        horizontal_offset: f64,
    ) {
        self.bounds = bounds;
        let cells_height = self.cells_presenter.desired_height();
        self.cells_presenter.arrange(
            Size::new(bounds.width, cells_height),
            &mut self.cells,
            &mut self.filler_cell,
            columns,
            horizontal_offset,
        );
        self.cells_presenter
            .ensure_filler_visibility(&mut self.filler_cell, columns);
        self.details_presenter.arrange(Rect::new(
            0.0,
            cells_height,
            bounds.width,
            bounds.height - cells_height,
        ));
    }
}

impl DisplayRow for DataGridRow {
    /// The editing row and the current row keep their state across scrolling and are never
    /// handed out for reuse.
    fn is_recyclable(&self) -> bool {
        !self.is_editing && !self.is_current
    }

    fn detach(&mut self, recycle: bool) {
        self.index = None;
        self.is_selected = false;
        self.is_editing = false;
        self.is_current = false;
        self.details_presenter.set_visible(false);
        if recycle {
            self.cells.iter_mut().for_each(DataGridCell::reset);
            self.filler_cell.reset();
        } else {
            self.cells.clear();
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.is_hidden = !visible;
    }
}
