use alloc::string::String;
use core::cmp::Ordering;

use crate::item::CellValue;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListSortDirection {
    #[default]
    Ascending,
    Descending,
}

impl ListSortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// One key of the grid's sort: an item property and a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortDescription {
    pub property_name: String,
    pub direction: ListSortDirection,
}

impl SortDescription {
    pub fn new(property_name: impl Into<String>, direction: ListSortDirection) -> Self {
        Self {
            property_name: property_name.into(),
            direction,
        }
    }
}

/// Orders two bound values: empty first, then check box states, then text.
pub(crate) fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    fn rank(value: &CellValue) -> u8 {
        match value {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Text(_) => 2,
        }
    }
    match (a, b) {
        (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
        (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}
