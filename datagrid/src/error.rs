use alloc::string::String;

/// Errors surfaced by fallible grid operations.
///
/// Internal invariant breaches of the row window are not represented here: those are bugs in
/// the caller and panic instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DataGridError {
    #[error("{name} cannot be set to NaN")]
    ValueCannotBeNaN { name: &'static str },

    #[error("{name} cannot be set to infinity")]
    ValueCannotBeInfinity { name: &'static str },

    #[error("{name} must be greater than or equal to {bound}")]
    ValueMustBeGreaterThanOrEqualTo { name: &'static str, bound: String },

    #[error("{name} must be less than or equal to {bound}")]
    ValueMustBeLessThanOrEqualTo { name: &'static str, bound: String },

    #[error("{name} must be greater than or equal to {low} and less than {high}")]
    ValueMustBeBetween {
        name: &'static str,
        low: usize,
        high: usize,
    },

    #[error("'{0}' is not a valid DataGridLength")]
    InvalidLength(String),

    #[error("the item is not contained in the items source")]
    ItemNotInItemsSource,

    #[error("column {0} is not in this grid")]
    ColumnNotInThisGrid(usize),

    #[error("the selected items collection cannot be changed in single selection mode")]
    NotSupportedInSingleMode,

    #[error("{0} is not supported")]
    NotSupported(&'static str),

    #[error("the pending edit could not be committed or cancelled; the operation cannot complete")]
    CommitFailed,

    #[error("there is no current row")]
    NoCurrentRow,

    #[error("frozen columns cannot be moved after non-frozen columns")]
    CannotMoveFrozenColumn,

    #[error("non-frozen columns cannot be moved before frozen columns")]
    CannotMoveNonFrozenColumn,

    #[error("property '{0}' is read-only")]
    ReadOnlyProperty(String),

    #[error("invalid value for '{path}': {reason}")]
    InvalidValue { path: String, reason: String },
}

pub type Result<T, E = DataGridError> = core::result::Result<T, E>;

impl DataGridError {
    pub(crate) fn at_least(name: &'static str, bound: impl core::fmt::Display) -> Self {
        Self::ValueMustBeGreaterThanOrEqualTo {
            name,
            bound: alloc::format!("{bound}"),
        }
    }

    pub(crate) fn at_most(name: &'static str, bound: impl core::fmt::Display) -> Self {
        Self::ValueMustBeLessThanOrEqualTo {
            name,
            bound: alloc::format!("{bound}"),
        }
    }

    /// Returns `true` for argument validation failures (as opposed to state conflicts).
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::ValueCannotBeNaN { .. }
                | Self::ValueCannotBeInfinity { .. }
                | Self::ValueMustBeGreaterThanOrEqualTo { .. }
                | Self::ValueMustBeLessThanOrEqualTo { .. }
                | Self::ValueMustBeBetween { .. }
                | Self::InvalidLength(_)
                | Self::ItemNotInItemsSource
                | Self::ColumnNotInThisGrid(_)
        )
    }
}
