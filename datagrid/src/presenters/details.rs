use crate::geometry::{Rect, Size};

use super::{ElementMeasurer, constrain};

/// Lays out the details area below a row's cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailsPresenter {
    is_visible: bool,
    desired_height: f64,
    bounds: Rect,
}

impl DetailsPresenter {
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
        if !visible {
            self.desired_height = 0.0;
        }
    }

    pub fn desired_height(&self) -> f64 {
        self.desired_height
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Collapsed details take no space.
    pub(crate) fn measure(
        &mut self,
        row_index: usize,
        cells_width: f64,
        measurer: &mut dyn ElementMeasurer,
    ) -> f64 {
        self.desired_height = if self.is_visible {
            let available = Size::new(cells_width, f64::INFINITY);
            constrain(measurer.measure_details(row_index, available), available).height
        } else {
            0.0
        };
        self.desired_height
    }

    pub(crate) fn arrange(&mut self, bounds: Rect) {
        self.bounds = if self.is_visible { bounds } else { Rect::EMPTY };
    }
}
