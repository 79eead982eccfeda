use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// A row visual that [`DisplayData`] can place in its window and recycle.
pub trait DisplayRow {
    /// Whether the row may be handed out again by [`DisplayData::get_used_row`].
    ///
    /// Rows that hold editing state or focus return `false`.
    fn is_recyclable(&self) -> bool;

    /// Releases per-row state (bindings, cell content, selection) before the row is pooled or
    /// dropped. `recycle` tells whether the visual will be reused.
    fn detach(&mut self, recycle: bool);

    fn set_visible(&mut self, visible: bool);
}

/// Tracks which logical rows are currently materialized and pools the visuals that are not.
///
/// The displayed rows form a contiguous window `[first, last]` over the logical row space. The
/// window is a ring buffer: rows enter and leave at both ends in `O(1)`, and
/// [`Self::displayed_row`] maps a logical index to its visual in `O(1)`.
///
/// A row visual is owned by exactly one of: the window, the recyclable pool, or the
/// fully-recycled pool.
///
/// Callers must keep the window contiguous: [`Self::load_scrolling_row`] only accepts indexes
/// adjacent to (or inside) the window, and [`Self::unload_scrolling_row`] only accepts displayed
/// indexes. Violations are bugs in the caller and panic.
#[derive(Clone, Debug)]
pub struct DisplayData<R> {
    scrolling_rows: VecDeque<R>,
    // Only meaningful while `scrolling_rows` is non-empty.
    first_scrolling_row: usize,
    // Detached but still laid out: reuse skips a fresh measure.
    recyclable_rows: Vec<R>,
    // Detached and hidden.
    fully_recycled_rows: Vec<R>,

    first_displayed_scrolling_col: Option<usize>,
    last_totally_displayed_scrolling_col: Option<usize>,
    num_totally_displayed_scrolling_rows: usize,
    pending_vertical_scroll_height: f64,
}

impl<R> Default for DisplayData<R> {
    fn default() -> Self {
        Self {
            scrolling_rows: VecDeque::new(),
            first_scrolling_row: 0,
            recyclable_rows: Vec::new(),
            fully_recycled_rows: Vec::new(),
            first_displayed_scrolling_col: None,
            last_totally_displayed_scrolling_col: None,
            num_totally_displayed_scrolling_rows: 0,
            pending_vertical_scroll_height: 0.0,
        }
    }
}

impl<R: DisplayRow> DisplayData<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_displayed_scrolling_row(&self) -> Option<usize> {
        (!self.scrolling_rows.is_empty()).then_some(self.first_scrolling_row)
    }

    pub fn last_displayed_scrolling_row(&self) -> Option<usize> {
        (!self.scrolling_rows.is_empty())
            .then(|| self.first_scrolling_row + self.scrolling_rows.len() - 1)
    }

    pub fn num_displayed_scrolling_rows(&self) -> usize {
        self.scrolling_rows.len()
    }

    pub fn num_totally_displayed_scrolling_rows(&self) -> usize {
        self.num_totally_displayed_scrolling_rows
    }

    pub fn set_num_totally_displayed_scrolling_rows(&mut self, count: usize) {
        self.num_totally_displayed_scrolling_rows = count;
    }

    pub fn first_displayed_scrolling_col(&self) -> Option<usize> {
        self.first_displayed_scrolling_col
    }

    pub fn set_first_displayed_scrolling_col(&mut self, col: Option<usize>) {
        self.first_displayed_scrolling_col = col;
    }

    pub fn last_totally_displayed_scrolling_col(&self) -> Option<usize> {
        self.last_totally_displayed_scrolling_col
    }

    pub fn set_last_totally_displayed_scrolling_col(&mut self, col: Option<usize>) {
        self.last_totally_displayed_scrolling_col = col;
    }

    /// Vertical scroll requested before the rows could be measured; applied on the next
    /// rows measure pass.
    pub fn pending_vertical_scroll_height(&self) -> f64 {
        self.pending_vertical_scroll_height
    }

    pub fn set_pending_vertical_scroll_height(&mut self, height: f64) {
        self.pending_vertical_scroll_height = height;
    }

    pub fn recyclable_row_count(&self) -> usize {
        self.recyclable_rows.len()
    }

    pub fn fully_recycled_row_count(&self) -> usize {
        self.fully_recycled_rows.len()
    }

    pub fn recyclable_rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.recyclable_rows.iter()
    }

    pub fn fully_recycled_rows(&self) -> impl Iterator<Item = &R> + '_ {
        self.fully_recycled_rows.iter()
    }

    pub fn is_row_displayed(&self, row_index: usize) -> bool {
        match self.last_displayed_scrolling_row() {
            Some(last) => row_index >= self.first_scrolling_row && row_index <= last,
            None => false,
        }
    }

    /// Returns the visual for a displayed row.
    ///
    /// # Panics
    ///
    /// Panics if `row_index` is outside the window.
    pub fn displayed_row(&self, row_index: usize) -> &R {
        self.assert_displayed(row_index);
        &self.scrolling_rows[row_index - self.first_scrolling_row]
    }

    /// Mutable variant of [`Self::displayed_row`].
    ///
    /// # Panics
    ///
    /// Panics if `row_index` is outside the window.
    pub fn displayed_row_mut(&mut self, row_index: usize) -> &mut R {
        self.assert_displayed(row_index);
        &mut self.scrolling_rows[row_index - self.first_scrolling_row]
    }

    pub fn try_displayed_row(&self, row_index: usize) -> Option<&R> {
        if !self.is_row_displayed(row_index) {
            return None;
        }
        self.scrolling_rows
            .get(row_index - self.first_scrolling_row)
    }

    pub fn try_displayed_row_mut(&mut self, row_index: usize) -> Option<&mut R> {
        if !self.is_row_displayed(row_index) {
            return None;
        }
        self.scrolling_rows
            .get_mut(row_index - self.first_scrolling_row)
    }

    /// Iterates the displayed rows in logical order, starting with the first displayed row.
    pub fn scrolling_rows(&self) -> impl DoubleEndedIterator<Item = &R> + ExactSizeIterator + '_ {
        self.scrolling_rows.iter()
    }

    pub fn scrolling_rows_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut R> + ExactSizeIterator + '_ {
        self.scrolling_rows.iter_mut()
    }

    /// Like [`Self::scrolling_rows`], paired with each row's logical index.
    pub fn indexed_scrolling_rows(&self) -> impl Iterator<Item = (usize, &R)> + '_ {
        let first = self.first_scrolling_row;
        self.scrolling_rows
            .iter()
            .enumerate()
            .map(move |(i, row)| (first + i, row))
    }

    pub fn indexed_scrolling_rows_mut(&mut self) -> impl Iterator<Item = (usize, &mut R)> + '_ {
        let first = self.first_scrolling_row;
        self.scrolling_rows
            .iter_mut()
            .enumerate()
            .map(move |(i, row)| (first + i, row))
    }

    /// Starts tracking `row` as the visual for logical row `row_index`.
    ///
    /// When the window is empty this starts a new window at `row_index`. Otherwise `row_index`
    /// must be in `[first - 1, last + 1]`: `first - 1` extends the window upwards, `last + 1`
    /// downwards, and an index inside the window splices the row in, pushing later rows down.
    ///
    /// # Panics
    ///
    /// Panics if `row_index` is not adjacent to the window.
    pub fn load_scrolling_row(&mut self, row_index: usize, row: R) {
        let Some(last) = self.last_displayed_scrolling_row() else {
            gtrace!(row_index, "load_scrolling_row: new window");
            self.first_scrolling_row = row_index;
            self.scrolling_rows.push_back(row);
            return;
        };
        let first = self.first_scrolling_row;
        assert!(
            row_index.saturating_add(1) >= first && row_index <= last + 1,
            "row {row_index} is not adjacent to the displayed rows [{first}, {last}]"
        );
        gtrace!(row_index, first, last, "load_scrolling_row");
        if row_index < first {
            self.scrolling_rows.push_front(row);
            self.first_scrolling_row = row_index;
        } else {
            self.scrolling_rows.insert(row_index - first, row);
        }
    }

    /// Stops tracking logical row `row_index` and returns its visual.
    ///
    /// Rows after `row_index` move up by one logical index; the window becomes empty when its
    /// last row is unloaded.
    ///
    /// # Panics
    ///
    /// Panics if `row_index` is not displayed.
    pub fn unload_scrolling_row(&mut self, row_index: usize) -> R {
        self.assert_displayed(row_index);
        let position = row_index - self.first_scrolling_row;
        gtrace!(row_index, position, "unload_scrolling_row");
        let Some(row) = self.scrolling_rows.remove(position) else {
            unreachable!("displayed row {row_index} missing from the window");
        };
        if self.scrolling_rows.is_empty() {
            self.reset_row_indexes();
        } else if position == 0 {
            self.first_scrolling_row += 1;
        }
        row
    }

    /// Detaches `row` and parks it in the recyclable pool.
    pub fn add_recyclable_row(&mut self, mut row: R) {
        row.detach(true);
        self.recyclable_rows.push(row);
    }

    /// Hides every recyclable row and moves it to the fully-recycled pool.
    pub fn fully_recycle_rows(&mut self) {
        while let Some(mut row) = self.recyclable_rows.pop() {
            row.set_visible(false);
            self.fully_recycled_rows.push(row);
        }
    }

    /// Takes a pooled row for reuse, preferring recyclable rows (no re-measure needed) over
    /// fully recycled ones (which are made visible again).
    ///
    /// Returns `None` when both pools are empty; the caller must create a new row.
    pub fn get_used_row(&mut self) -> Option<R> {
        if let Some(row) = self.recyclable_rows.pop() {
            return Some(row);
        }
        let mut row = self.fully_recycled_rows.pop()?;
        row.set_visible(true);
        Some(row)
    }

    /// Empties the window.
    ///
    /// With `recycle_rows`, recyclable rows go to the recyclable pool. Without it both pools are
    /// purged, because a full reset (e.g. a new item source) cannot assume the old visuals still
    /// fit. Rows that were not pooled are returned to the caller.
    pub fn clear_rows(&mut self, recycle_rows: bool) -> Vec<R> {
        gdebug!(
            recycle_rows,
            displayed = self.scrolling_rows.len(),
            "DisplayData::clear_rows"
        );
        self.reset_row_indexes();
        let rows = core::mem::take(&mut self.scrolling_rows);
        if !recycle_rows {
            self.recyclable_rows.clear();
            self.fully_recycled_rows.clear();
            return rows.into_iter().collect();
        }
        let mut abandoned = Vec::new();
        for row in rows {
            if row.is_recyclable() {
                self.add_recyclable_row(row);
            } else {
                abandoned.push(row);
            }
        }
        abandoned
    }

    /// Updates the window after logical row `row_index` was deleted.
    ///
    /// Returns the visual of the deleted row when it was displayed.
    pub fn correct_rows_after_deletion(&mut self, row_index: usize) -> Option<R> {
        let removed = self
            .is_row_displayed(row_index)
            .then(|| self.unload_scrolling_row(row_index));
        // Not an `else`: deleting the first displayed row also shifts the rows below it.
        if !self.scrolling_rows.is_empty() && row_index < self.first_scrolling_row {
            self.first_scrolling_row -= 1;
        }
        removed
    }

    /// Updates the window after a logical row was inserted at `row_index`.
    ///
    /// Inserting above the window shifts it down. Inserting inside the window, directly below
    /// it, or into an empty window loads a visual produced by `generate_row`. Returns whether a
    /// visual was loaded.
    pub fn correct_rows_after_insertion(
        &mut self,
        row_index: usize,
        generate_row: impl FnOnce() -> R,
    ) -> bool {
        let Some(last) = self.last_displayed_scrolling_row() else {
            self.load_scrolling_row(row_index, generate_row());
            return true;
        };
        if row_index < self.first_scrolling_row {
            self.first_scrolling_row += 1;
            return false;
        }
        if row_index <= last + 1 {
            self.load_scrolling_row(row_index, generate_row());
            return true;
        }
        false
    }

    fn reset_row_indexes(&mut self) {
        self.first_scrolling_row = 0;
        self.num_totally_displayed_scrolling_rows = 0;
    }

    fn assert_displayed(&self, row_index: usize) {
        assert!(
            self.is_row_displayed(row_index),
            "row {row_index} is not displayed (window: {:?}..={:?})",
            self.first_displayed_scrolling_row(),
            self.last_displayed_scrolling_row()
        );
    }
}
