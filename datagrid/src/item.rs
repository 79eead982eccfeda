use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{DataGridError, Result};

/// A value read from (or written to) a bound property of a row item.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    /// Check box state; `None` is the indeterminate state of a three-state check box.
    Bool(Option<bool>),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<Option<bool>> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text shown in a read-only text cell.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Bool(Some(true)) => String::from("True"),
            Self::Bool(Some(false)) => String::from("False"),
            Self::Bool(None) => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(Some(b))
    }
}

impl From<Option<bool>> for CellValue {
    fn from(b: Option<bool>) -> Self {
        Self::Bool(b)
    }
}

/// The kind of value a property holds, used to pick a generated column's kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyKind {
    #[default]
    Text,
    Bool,
}

/// A bindable property of an item type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemProperty {
    pub name: String,
    pub kind: PropertyKind,
    pub is_read_only: bool,
}

impl ItemProperty {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }
}

/// A row item the grid can bind cells to.
///
/// Bound columns address item properties by path. Paths the item does not know read as
/// [`CellValue::Empty`].
pub trait GridItem {
    fn value(&self, path: &str) -> CellValue;

    /// Writes an edited value back to the item.
    ///
    /// Implementations reject read-only or unknown paths with
    /// [`DataGridError::ReadOnlyProperty`] and malformed values with
    /// [`DataGridError::InvalidValue`]. Every path is read-only by default.
    fn set_value(&mut self, path: &str, _value: CellValue) -> Result<()> {
        Err(DataGridError::ReadOnlyProperty(String::from(path)))
    }

    /// The properties columns are generated for when the grid auto-generates columns.
    fn properties() -> Vec<ItemProperty>
    where
        Self: Sized,
    {
        Vec::new()
    }
}
