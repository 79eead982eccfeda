use datagrid::{DataGrid, DataGridError, DataGridOptions, GridItem, Result, Size};

use crate::{Easing, ScrollAnchor, Tween, apply_anchor, capture_first_displayed_anchor};

/// Delay after the last scroll event before [`Controller::is_scrolling`] turns off.
pub const DEFAULT_IS_SCROLLING_RESET_DELAY_MS: u64 = 150;

/// Where a row should land when scrolled to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Scrolls the least distance that shows the whole row.
    #[default]
    Auto,
}

/// A framework-neutral controller that wraps a [`DataGrid`] and provides common adapter
/// workflows (anchoring, tween-driven scrolling, `is_scrolling` debouncing).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick
///
/// and then run the grid's measure/arrange passes as usual. When the host owns a real scroll
/// container, the offset returned by `tick()` is the one to push back into it.
#[derive(Debug)]
pub struct Controller<T> {
    grid: DataGrid<T>,
    tween: Option<Tween>,
    is_scrolling: bool,
    last_scroll_ms: u64,
    is_scrolling_reset_delay_ms: u64,
}

impl<T: GridItem> Controller<T> {
    pub fn new(options: DataGridOptions) -> Result<Self> {
        Ok(Self::from_grid(DataGrid::new(options)?))
    }

    pub fn from_grid(grid: DataGrid<T>) -> Self {
        Self {
            grid,
            tween: None,
            is_scrolling: false,
            last_scroll_ms: 0,
            is_scrolling_reset_delay_ms: DEFAULT_IS_SCROLLING_RESET_DELAY_MS,
        }
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn is_scrolling_reset_delay_ms(&self) -> u64 {
        self.is_scrolling_reset_delay_ms
    }

    pub fn grid(&self) -> &DataGrid<T> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut DataGrid<T> {
        &mut self.grid
    }

    pub fn into_grid(self) -> DataGrid<T> {
        self.grid
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// `true` from a scroll event until the reset delay has passed without another one, or for
    /// as long as a tween runs.
    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn on_viewport(&mut self, size: Size) {
        self.grid.set_viewport(size);
    }

    /// Call this when the UI reports a vertical offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, offset: f64, now_ms: u64) {
        self.cancel_animation();
        self.apply_offset(offset, now_ms);
    }

    /// Advances the controller.
    ///
    /// - If a tween is active, moves the grid to the sampled offset and returns it.
    /// - Otherwise, runs `is_scrolling` debouncing and returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let Some(tween) = self.tween else {
            self.update_scrolling(now_ms);
            return None;
        };

        self.apply_offset(tween.sample(now_ms), now_ms);

        if tween.is_done(now_ms) {
            self.tween = None;
            self.is_scrolling = false;
        }

        Some(self.grid.vertical_offset())
    }

    /// Vertical offset that puts `row` at `align`, clamped to the scrollable range.
    pub fn row_offset(&self, row: usize, align: Align) -> Result<f64> {
        let count = self.grid.row_count();
        if row >= count {
            return Err(DataGridError::ValueMustBeBetween {
                name: "row_index",
                low: 0,
                high: count,
            });
        }
        let top = self.grid.row_top(row);
        let height = self.grid.row_height(row).unwrap_or(0.0);
        let view = self.grid.cells_height();
        let current = self.grid.vertical_offset();

        let target = match align {
            Align::Start => top,
            Align::End => top + height - view,
            Align::Center => top + height / 2.0 - view / 2.0,
            Align::Auto => {
                if top >= current && top + height <= current + view {
                    current
                } else if top < current || height > view {
                    top
                } else {
                    top + height - view
                }
            }
        };
        Ok(self.clamp_offset(target))
    }

    /// Scrolls to `row` immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_row(&mut self, row: usize, align: Align, now_ms: u64) -> Result<f64> {
        let offset = self.row_offset(row, align)?;
        self.cancel_animation();
        self.apply_offset(offset, now_ms);
        Ok(self.grid.vertical_offset())
    }

    /// Applies a vertical offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: f64, now_ms: u64) -> f64 {
        self.cancel_animation();
        self.apply_offset(offset, now_ms);
        self.grid.vertical_offset()
    }

    /// Starts a tween to `row` (adapter-driven).
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_row(
        &mut self,
        row: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Result<f64> {
        let to = self.row_offset(row, align)?;
        Ok(self.start_tween_to_offset(to, now_ms, duration_ms, easing))
    }

    /// Starts a tween to an offset (adapter-driven).
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_offset(
        &mut self,
        offset: f64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f64 {
        let to = self.clamp_offset(offset);
        let from = self.grid.vertical_offset();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "datagrid_adapter",
            from,
            to,
            duration_ms,
            "Controller: tween started"
        );
        self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
        self.is_scrolling = true;
        self.last_scroll_ms = now_ms;
        to
    }

    pub fn capture_first_displayed_anchor<K>(
        &self,
        key_of: impl FnOnce(&T) -> K,
    ) -> Option<ScrollAnchor<K>> {
        capture_first_displayed_anchor(&self.grid, key_of)
    }

    /// Applies a previously captured anchor by adjusting the vertical offset.
    ///
    /// This cancels any active tween.
    pub fn apply_anchor<K>(
        &mut self,
        anchor: &ScrollAnchor<K>,
        key_to_row: impl FnOnce(&K) -> Option<usize>,
    ) -> bool {
        self.cancel_animation();
        apply_anchor(&mut self.grid, anchor, key_to_row)
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return self.grid.vertical_offset();
        }
        offset.clamp(0.0, self.grid.max_vertical_offset())
    }

    fn apply_offset(&mut self, offset: f64, now_ms: u64) {
        self.grid.set_vertical_offset(self.clamp_offset(offset));
        self.is_scrolling = true;
        self.last_scroll_ms = now_ms;
    }

    fn update_scrolling(&mut self, now_ms: u64) {
        if self.is_scrolling
            && now_ms.saturating_sub(self.last_scroll_ms) >= self.is_scrolling_reset_delay_ms
        {
            self.is_scrolling = false;
        }
    }
}
