use alloc::string::String;
use alloc::vec::Vec;

use crate::editing::{EditingKey, EditingTrigger};
use crate::error::{DataGridError, Result};
use crate::item::{CellValue, GridItem};
use crate::length::DataGridLength;

pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Text formatting a text column applies to its elements. `None` fields inherit from the host.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_style: Option<FontStyle>,
    pub font_weight: Option<u16>,
    /// ARGB.
    pub foreground: Option<u32>,
}

/// Caret/selection inside a text editor, in characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSelection {
    pub start: usize,
    pub length: usize,
}

/// The content a column generates for a cell.
///
/// Hosts turn this into real widgets; the engine only needs it to drive measuring and editing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellElement {
    #[default]
    Empty,
    TextBlock {
        text: String,
        style: TextStyle,
    },
    TextBox {
        text: String,
        style: TextStyle,
        selection: TextSelection,
    },
    CheckBox {
        is_checked: Option<bool>,
        is_three_state: bool,
        is_enabled: bool,
        content: Option<String>,
    },
    /// A host template, referenced by name.
    Template {
        name: String,
    },
}

/// Column property whose change requires existing cell content to be refreshed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentProperty {
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    Foreground,
    IsThreeState,
    CheckBoxContent,
    CellTemplate,
    CellEditingTemplate,
    Binding,
}

/// Where a generated element is going to live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellContext {
    pub row_index: usize,
    pub column_index: usize,
    pub is_current: bool,
}

/// What every column kind must be able to do for its cells.
pub trait ColumnBehavior {
    /// Path of the bound item property, if the column is bound.
    fn binding_path(&self) -> Option<&str>;

    fn generate_element(&self, item: &dyn GridItem, cell: CellContext) -> CellElement;

    fn generate_editing_element(&self, item: &dyn GridItem, cell: CellContext) -> CellElement;

    /// Seeds a freshly generated editor according to `trigger` and returns the unedited value,
    /// which is handed back to [`Self::cancel_cell_edit`] if the edit is abandoned.
    fn prepare_cell_for_edit(
        &self,
        editing_element: &mut CellElement,
        trigger: EditingTrigger,
    ) -> CellValue;

    fn cancel_cell_edit(&self, editing_element: &mut CellElement, unedited: &CellValue);

    /// The value to write back to the item on commit. `None` when the editor owns its own
    /// write-back (template editors).
    fn edited_value(&self, editing_element: &CellElement) -> Option<CellValue>;

    /// Reapplies `property` from the column to an already generated element.
    fn refresh_cell_content(&self, element: &mut CellElement, property: ContentProperty);
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextColumn {
    pub binding: Option<String>,
    pub style: TextStyle,
}

impl TextColumn {
    fn bound_text(&self, item: &dyn GridItem) -> String {
        self.binding
            .as_deref()
            .map(|path| item.value(path).to_display_string())
            .unwrap_or_default()
    }

    fn refresh_style(&self, style: &mut TextStyle, property: ContentProperty) {
        match property {
            ContentProperty::FontFamily => style.font_family = self.style.font_family.clone(),
            ContentProperty::FontSize => style.font_size = self.style.font_size,
            ContentProperty::FontStyle => style.font_style = self.style.font_style,
            ContentProperty::FontWeight => style.font_weight = self.style.font_weight,
            ContentProperty::Foreground => style.foreground = self.style.foreground,
            _ => *style = self.style.clone(),
        }
    }
}

impl ColumnBehavior for TextColumn {
    fn binding_path(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    fn generate_element(&self, item: &dyn GridItem, _cell: CellContext) -> CellElement {
        CellElement::TextBlock {
            text: self.bound_text(item),
            style: self.style.clone(),
        }
    }

    fn generate_editing_element(&self, item: &dyn GridItem, _cell: CellContext) -> CellElement {
        CellElement::TextBox {
            text: self.bound_text(item),
            style: self.style.clone(),
            selection: TextSelection::default(),
        }
    }

    fn prepare_cell_for_edit(
        &self,
        editing_element: &mut CellElement,
        trigger: EditingTrigger,
    ) -> CellValue {
        let CellElement::TextBox {
            text, selection, ..
        } = editing_element
        else {
            return CellValue::Text(String::new());
        };
        let len = text.chars().count();
        *selection = if trigger == EditingTrigger::Key(EditingKey::F2) {
            // Caret at the end.
            TextSelection {
                start: len,
                length: 0,
            }
        } else {
            TextSelection {
                start: 0,
                length: len,
            }
        };
        CellValue::Text(text.clone())
    }

    fn cancel_cell_edit(&self, editing_element: &mut CellElement, unedited: &CellValue) {
        if let CellElement::TextBox { text, .. } = editing_element {
            *text = String::from(unedited.as_text().unwrap_or_default());
        }
    }

    fn edited_value(&self, editing_element: &CellElement) -> Option<CellValue> {
        match editing_element {
            CellElement::TextBox { text, .. } => Some(CellValue::Text(text.clone())),
            _ => None,
        }
    }

    fn refresh_cell_content(&self, element: &mut CellElement, property: ContentProperty) {
        match element {
            CellElement::TextBlock { style, .. } | CellElement::TextBox { style, .. } => {
                self.refresh_style(style, property)
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckBoxColumn {
    pub binding: Option<String>,
    pub is_three_state: bool,
    pub content: Option<String>,
}

impl CheckBoxColumn {
    fn bound_state(&self, item: &dyn GridItem) -> Option<bool> {
        match self.binding.as_deref().map(|path| item.value(path)) {
            Some(CellValue::Bool(b)) => b,
            _ => Some(false),
        }
    }

    fn element(&self, is_checked: Option<bool>, is_enabled: bool) -> CellElement {
        CellElement::CheckBox {
            is_checked,
            is_three_state: self.is_three_state,
            is_enabled,
            content: self.content.clone(),
        }
    }
}

impl ColumnBehavior for CheckBoxColumn {
    fn binding_path(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    /// Only the current cell's check box is enabled, so a click elsewhere selects the cell
    /// instead of toggling the value.
    fn generate_element(&self, item: &dyn GridItem, cell: CellContext) -> CellElement {
        self.element(self.bound_state(item), cell.is_current)
    }

    fn generate_editing_element(&self, item: &dyn GridItem, _cell: CellContext) -> CellElement {
        self.element(self.bound_state(item), true)
    }

    fn prepare_cell_for_edit(
        &self,
        editing_element: &mut CellElement,
        trigger: EditingTrigger,
    ) -> CellValue {
        let CellElement::CheckBox {
            is_checked,
            is_three_state,
            ..
        } = editing_element
        else {
            return CellValue::Bool(Some(false));
        };
        let unedited = *is_checked;
        let toggle = matches!(
            trigger,
            EditingTrigger::Pointer { on_element: true } | EditingTrigger::Key(EditingKey::Space)
        );
        if toggle {
            *is_checked = if *is_three_state {
                match *is_checked {
                    Some(false) => Some(true),
                    Some(true) => None,
                    None => Some(false),
                }
            } else {
                Some(!is_checked.unwrap_or(false))
            };
        }
        CellValue::Bool(unedited)
    }

    fn cancel_cell_edit(&self, editing_element: &mut CellElement, unedited: &CellValue) {
        if let CellElement::CheckBox { is_checked, .. } = editing_element {
            *is_checked = unedited.as_bool().unwrap_or(Some(false));
        }
    }

    fn edited_value(&self, editing_element: &CellElement) -> Option<CellValue> {
        match editing_element {
            CellElement::CheckBox { is_checked, .. } => Some(CellValue::Bool(*is_checked)),
            _ => None,
        }
    }

    fn refresh_cell_content(&self, element: &mut CellElement, property: ContentProperty) {
        let CellElement::CheckBox {
            is_three_state,
            content,
            ..
        } = element
        else {
            return;
        };
        match property {
            ContentProperty::IsThreeState => *is_three_state = self.is_three_state,
            ContentProperty::CheckBoxContent => content.clone_from(&self.content),
            _ => {
                *is_three_state = self.is_three_state;
                content.clone_from(&self.content);
            }
        }
    }
}

/// A column whose cells are host templates.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateColumn {
    pub cell_template: Option<String>,
    /// Falls back to `cell_template` when unset.
    pub cell_editing_template: Option<String>,
}

impl TemplateColumn {
    fn element(template: Option<&String>) -> CellElement {
        template.map_or(CellElement::Empty, |name| CellElement::Template {
            name: name.clone(),
        })
    }
}

impl ColumnBehavior for TemplateColumn {
    fn binding_path(&self) -> Option<&str> {
        None
    }

    fn generate_element(&self, _item: &dyn GridItem, _cell: CellContext) -> CellElement {
        Self::element(self.cell_template.as_ref())
    }

    fn generate_editing_element(&self, _item: &dyn GridItem, _cell: CellContext) -> CellElement {
        Self::element(
            self.cell_editing_template
                .as_ref()
                .or(self.cell_template.as_ref()),
        )
    }

    fn prepare_cell_for_edit(&self, _: &mut CellElement, _: EditingTrigger) -> CellValue {
        CellValue::Empty
    }

    fn cancel_cell_edit(&self, _: &mut CellElement, _: &CellValue) {}

    fn edited_value(&self, _: &CellElement) -> Option<CellValue> {
        None
    }

    fn refresh_cell_content(&self, element: &mut CellElement, property: ContentProperty) {
        let CellElement::Template { name } = element else {
            return;
        };
        let source = match property {
            ContentProperty::CellEditingTemplate => self.cell_editing_template.as_ref(),
            ContentProperty::CellTemplate => self.cell_template.as_ref(),
            _ => return,
        };
        if let Some(source) = source {
            name.clone_from(source);
        }
    }
}

/// The closed set of column kinds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    Text(TextColumn),
    CheckBox(CheckBoxColumn),
    Template(TemplateColumn),
}

impl ColumnKind {
    fn behavior(&self) -> &dyn ColumnBehavior {
        match self {
            Self::Text(c) => c,
            Self::CheckBox(c) => c,
            Self::Template(c) => c,
        }
    }
}

impl ColumnBehavior for ColumnKind {
    fn binding_path(&self) -> Option<&str> {
        self.behavior().binding_path()
    }

    fn generate_element(&self, item: &dyn GridItem, cell: CellContext) -> CellElement {
        self.behavior().generate_element(item, cell)
    }

    fn generate_editing_element(&self, item: &dyn GridItem, cell: CellContext) -> CellElement {
        self.behavior().generate_editing_element(item, cell)
    }

    fn prepare_cell_for_edit(
        &self,
        editing_element: &mut CellElement,
        trigger: EditingTrigger,
    ) -> CellValue {
        self.behavior()
            .prepare_cell_for_edit(editing_element, trigger)
    }

    fn cancel_cell_edit(&self, editing_element: &mut CellElement, unedited: &CellValue) {
        self.behavior().cancel_cell_edit(editing_element, unedited)
    }

    fn edited_value(&self, editing_element: &CellElement) -> Option<CellValue> {
        self.behavior().edited_value(editing_element)
    }

    fn refresh_cell_content(&self, element: &mut CellElement, property: ContentProperty) {
        self.behavior().refresh_cell_content(element, property)
    }
}

/// Column settings inherited from the grid when the column does not set its own.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDefaults {
    pub width: DataGridLength,
    pub min_width: f64,
    pub max_width: f64,
    pub can_user_reorder: bool,
    pub can_user_resize: bool,
    pub can_user_sort: bool,
    pub is_read_only: bool,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            width: DataGridLength::AUTO,
            min_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_width: f64::INFINITY,
            can_user_reorder: true,
            can_user_resize: true,
            can_user_sort: true,
            is_read_only: false,
        }
    }
}

/// A change on a column that the owning grid has to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnChange {
    /// The actual width may have changed.
    Width,
    Visibility,
    ReadOnly,
    Header,
    /// Generated cell content must be refreshed for this property.
    Content(ContentProperty),
}

/// A grid column: common sizing and behavior state plus its [`ColumnKind`].
///
/// Setters never reach into the grid. They append a [`ColumnChange`] that the grid drains
/// (see [`crate::DataGrid::with_column`]) to invalidate layout or refresh cells.
#[derive(Clone, Debug, PartialEq)]
pub struct DataGridColumn {
    kind: ColumnKind,
    header: Option<String>,
    width: Option<DataGridLength>,
    min_width: Option<f64>,
    max_width: Option<f64>,
    desired_width: f64,
    index: Option<usize>,
    display_index: Option<usize>,
    is_visible: bool,
    is_frozen: bool,
    is_read_only: Option<bool>,
    can_user_reorder: Option<bool>,
    can_user_resize: Option<bool>,
    can_user_sort: Option<bool>,
    sort_member_path: Option<String>,
    is_auto_generated: bool,
    inherited: ColumnDefaults,
    changes: Vec<ColumnChange>,
}

impl DataGridColumn {
    pub fn new(kind: ColumnKind) -> Self {
        Self {
            kind,
            header: None,
            width: None,
            min_width: None,
            max_width: None,
            desired_width: 0.0,
            index: None,
            display_index: None,
            is_visible: true,
            is_frozen: false,
            is_read_only: None,
            can_user_reorder: None,
            can_user_resize: None,
            can_user_sort: None,
            sort_member_path: None,
            is_auto_generated: false,
            inherited: ColumnDefaults::default(),
            changes: Vec::new(),
        }
    }

    /// A text column bound to `path`.
    pub fn text(path: impl Into<String>) -> Self {
        Self::new(ColumnKind::Text(TextColumn {
            binding: Some(path.into()),
            style: TextStyle::default(),
        }))
    }

    /// A two-state check box column bound to `path`.
    pub fn check_box(path: impl Into<String>) -> Self {
        Self::new(ColumnKind::CheckBox(CheckBoxColumn {
            binding: Some(path.into()),
            is_three_state: false,
            content: None,
        }))
    }

    pub fn template(cell_template: impl Into<String>) -> Self {
        Self::new(ColumnKind::Template(TemplateColumn {
            cell_template: Some(cell_template.into()),
            cell_editing_template: None,
        }))
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_width(mut self, width: DataGridLength) -> Self {
        self.set_width(width);
        self.changes.clear();
        self
    }

    /// Requests a display position for when the column is added to a grid.
    pub fn with_display_index(mut self, display_index: usize) -> Self {
        self.display_index = Some(display_index);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.is_read_only = Some(read_only);
        self
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    /// Mutates kind-specific state and records a refresh of `property` for existing cells.
    pub fn update_kind(&mut self, property: ContentProperty, f: impl FnOnce(&mut ColumnKind)) {
        f(&mut self.kind);
        self.changes.push(ColumnChange::Content(property));
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn set_header(&mut self, header: Option<String>) {
        if self.header != header {
            self.header = header;
            self.changes.push(ColumnChange::Header);
        }
    }

    /// Position in the owning grid's column collection, or `None` when not owned.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: Option<usize>) {
        self.index = index;
    }

    pub fn display_index(&self) -> Option<usize> {
        self.display_index
    }

    pub(crate) fn set_display_index_internal(&mut self, display_index: Option<usize>) {
        self.display_index = display_index;
    }

    /// The width as set on the column, or `None` when inherited from the grid.
    pub fn width(&self) -> Option<DataGridLength> {
        self.width
    }

    pub fn effective_width(&self) -> DataGridLength {
        self.width.unwrap_or(self.inherited.width)
    }

    pub fn set_width(&mut self, width: DataGridLength) {
        if self.width == Some(width) {
            return;
        }
        self.width = Some(width);
        if width.is_absolute() {
            self.desired_width = width.value();
        }
        self.changes.push(ColumnChange::Width);
    }

    /// Reverts to the grid's default column width.
    pub fn clear_width(&mut self) {
        if self.width.take().is_some() {
            self.changes.push(ColumnChange::Width);
        }
    }

    pub fn min_width(&self) -> Option<f64> {
        self.min_width
    }

    pub fn actual_min_width(&self) -> f64 {
        self.min_width.unwrap_or(self.inherited.min_width)
    }

    pub fn set_min_width(&mut self, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(DataGridError::ValueCannotBeNaN { name: "min_width" });
        }
        if value < 0.0 {
            return Err(DataGridError::at_least("min_width", 0));
        }
        if value == f64::INFINITY {
            return Err(DataGridError::ValueCannotBeInfinity { name: "min_width" });
        }
        if value > self.actual_max_width() {
            return Err(DataGridError::at_most("min_width", "max_width"));
        }
        if self.min_width != Some(value) {
            let before = self.actual_width();
            self.min_width = Some(value);
            self.note_width_change(before);
        }
        Ok(())
    }

    pub fn max_width(&self) -> Option<f64> {
        self.max_width
    }

    pub fn actual_max_width(&self) -> f64 {
        self.max_width.unwrap_or(self.inherited.max_width)
    }

    pub fn set_max_width(&mut self, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(DataGridError::ValueCannotBeNaN { name: "max_width" });
        }
        if value < 0.0 {
            return Err(DataGridError::at_least("max_width", 0));
        }
        if value < self.actual_min_width() {
            return Err(DataGridError::at_least("max_width", "min_width"));
        }
        if self.max_width != Some(value) {
            let before = self.actual_width();
            self.max_width = Some(value);
            self.note_width_change(before);
        }
        Ok(())
    }

    /// Width the column would like before min/max coercion.
    pub fn desired_width(&self) -> f64 {
        self.desired_width
    }

    /// Returns `true` if the actual width changed.
    pub(crate) fn set_desired_width(&mut self, desired: f64) -> bool {
        if self.desired_width == desired {
            return false;
        }
        let before = self.actual_width();
        self.desired_width = desired;
        before != self.actual_width()
    }

    /// The laid out width: the absolute width, or the desired width for content-sized columns,
    /// clamped to `[actual_min_width, actual_max_width]`.
    pub fn actual_width(&self) -> f64 {
        let effective = self.effective_width();
        let target = if effective.is_absolute() {
            effective.value()
        } else {
            self.desired_width
        };
        target
            .max(self.actual_min_width())
            .min(self.actual_max_width())
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.is_visible != visible {
            self.is_visible = visible;
            self.changes.push(ColumnChange::Visibility);
        }
    }

    /// Frozen columns are pinned to the left edge. Driven by the grid's frozen column count.
    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.is_frozen = frozen;
    }

    pub fn is_read_only(&self) -> bool {
        self.is_read_only.unwrap_or(false) || self.inherited.is_read_only
    }

    pub fn set_read_only(&mut self, read_only: Option<bool>) {
        if self.is_read_only != read_only {
            self.is_read_only = read_only;
            self.changes.push(ColumnChange::ReadOnly);
        }
    }

    pub fn can_user_reorder(&self) -> bool {
        self.can_user_reorder
            .unwrap_or(self.inherited.can_user_reorder)
    }

    pub fn set_can_user_reorder(&mut self, value: Option<bool>) {
        self.can_user_reorder = value;
    }

    /// A column is resizable only when the grid allows resizing at all.
    pub fn can_user_resize(&self) -> bool {
        self.inherited.can_user_resize && self.can_user_resize.unwrap_or(true)
    }

    pub fn set_can_user_resize(&mut self, value: Option<bool>) {
        self.can_user_resize = value;
    }

    /// A column is sortable only when the grid allows sorting at all.
    pub fn can_user_sort(&self) -> bool {
        self.inherited.can_user_sort && self.can_user_sort.unwrap_or(true)
    }

    pub fn set_can_user_sort(&mut self, value: Option<bool>) {
        self.can_user_sort = value;
    }

    pub fn sort_member_path(&self) -> Option<&str> {
        self.sort_member_path.as_deref()
    }

    pub fn set_sort_member_path(&mut self, path: Option<String>) {
        self.sort_member_path = path;
    }

    /// The item property sorting on this column uses: the explicit sort path, else the binding.
    pub fn sort_property_name(&self) -> Option<&str> {
        self.sort_member_path
            .as_deref()
            .or_else(|| self.kind.binding_path())
    }

    /// Whether the grid generated the column from the item properties.
    pub fn is_auto_generated(&self) -> bool {
        self.is_auto_generated
    }

    pub(crate) fn set_auto_generated(&mut self, value: bool) {
        self.is_auto_generated = value;
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn take_changes(&mut self) -> Vec<ColumnChange> {
        core::mem::take(&mut self.changes)
    }

    /// Returns `true` if the actual width changed.
    pub(crate) fn set_inherited(&mut self, defaults: ColumnDefaults) -> bool {
        let before = self.actual_width();
        self.inherited = defaults;
        before != self.actual_width()
    }

    fn note_width_change(&mut self, before: f64) {
        if before != self.actual_width() {
            self.changes.push(ColumnChange::Width);
        }
    }
}

/// The synthetic column that fills the space right of the last real column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FillerColumn {
    width: f64,
    is_represented: bool,
}

impl FillerColumn {
    /// Active only while the real columns are narrower than the cells area.
    pub fn is_active(&self) -> bool {
        self.width > 0.0
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub(crate) fn set_width(&mut self, width: f64) {
        self.width = width.max(0.0);
    }

    /// Whether the filler slot has been added to the presenters' child lists.
    pub fn is_represented(&self) -> bool {
        self.is_represented
    }

    pub(crate) fn set_represented(&mut self, represented: bool) {
        self.is_represented = represented;
    }
}
