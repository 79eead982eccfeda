use crate::column::CellElement;
use crate::item::CellValue;

/// Key that started an edit, when an edit was started from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditingKey {
    F2,
    Space,
    Other,
}

/// The input that caused an edit to begin. Columns use it to decide how to seed the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditingTrigger {
    #[default]
    Programmatic,
    Key(EditingKey),
    /// A pointer press. `on_element` is `true` when the press landed on the editing element
    /// itself (e.g. the check box glyph) rather than elsewhere in the cell.
    Pointer { on_element: bool },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataGridEditingUnit {
    #[default]
    Cell,
    Row,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataGridEditAction {
    Cancel,
    Commit,
}

/// The cell currently hosting an editor.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellEdit {
    pub(crate) row_index: usize,
    pub(crate) column_index: usize,
    /// Value the editor showed before the user touched it; restored on cancel.
    pub(crate) unedited: CellValue,
    // Holds the editor while its row is scrolled out of the window.
    pub(crate) stash: Option<CellElement>,
}
