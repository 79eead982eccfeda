use alloc::vec::Vec;

/// Per-row heights with prefix sums, for mapping vertical offsets to rows.
///
/// Rows start at an estimate and switch to their measured height once a presenter has laid them
/// out. A Fenwick tree over the heights keeps `row_start`/`row_at_offset` at `O(log n)`.
#[derive(Clone, Debug)]
pub(crate) struct RowHeights {
    heights: Vec<f64>,
    measured: Vec<bool>,
    tree: Vec<f64>, // 1-indexed
    total: f64,
    max_bit: usize,
    estimate: f64,
}

impl RowHeights {
    pub(crate) fn new(count: usize, estimate: f64) -> Self {
        let mut heights = Self {
            heights: alloc::vec![estimate; count],
            measured: alloc::vec![false; count],
            tree: Vec::new(),
            total: 0.0,
            max_bit: 0,
            estimate,
        };
        heights.rebuild();
        heights
    }

    pub(crate) fn total(&self) -> f64 {
        self.total
    }

    /// Changes the estimate used for rows that were never measured.
    pub(crate) fn set_estimate(&mut self, estimate: f64) {
        if self.estimate == estimate {
            return;
        }
        self.estimate = estimate;
        for (h, m) in self.heights.iter_mut().zip(&self.measured) {
            if !*m {
                *h = estimate;
            }
        }
        self.rebuild();
    }

    /// Forgets every measured height and gives all rows `estimate`, e.g. after the explicit
    /// row height changed.
    pub(crate) fn reset_heights(&mut self, estimate: f64) {
        self.estimate = estimate;
        self.heights.fill(estimate);
        self.measured.fill(false);
        self.rebuild();
    }

    /// Puts a measured row back to the estimate. Returns the change in height.
    pub(crate) fn unmeasure(&mut self, row: usize) -> f64 {
        let Some(cur) = self.heights.get(row).copied() else {
            return 0.0;
        };
        self.measured[row] = false;
        let delta = self.estimate - cur;
        if delta != 0.0 {
            self.heights[row] = self.estimate;
            self.add(row, delta);
        }
        delta
    }

    /// Puts every measured row `pred` accepts back to the estimate.
    pub(crate) fn unmeasure_where(&mut self, mut pred: impl FnMut(usize) -> bool) {
        let mut changed = false;
        let rows = self.heights.iter_mut().zip(&mut self.measured).enumerate();
        for (row, (height, measured)) in rows {
            if *measured && pred(row) {
                *measured = false;
                changed |= *height != self.estimate;
                *height = self.estimate;
            }
        }
        if changed {
            self.rebuild();
        }
    }

    pub(crate) fn height(&self, row: usize) -> Option<f64> {
        self.heights.get(row).copied()
    }

    /// Records a measured height. Returns the change relative to the previous height.
    pub(crate) fn set_height(&mut self, row: usize, height: f64) -> f64 {
        let Some(cur) = self.heights.get(row).copied() else {
            return 0.0;
        };
        self.measured[row] = true;
        if cur == height {
            return 0.0;
        }
        self.heights[row] = height;
        let delta = height - cur;
        self.add(row, delta);
        delta
    }

    pub(crate) fn insert(&mut self, row: usize) {
        let row = row.min(self.heights.len());
        self.heights.insert(row, self.estimate);
        self.measured.insert(row, false);
        self.rebuild();
    }

    pub(crate) fn remove(&mut self, row: usize) {
        if row >= self.heights.len() {
            return;
        }
        self.heights.remove(row);
        self.measured.remove(row);
        self.rebuild();
    }

    pub(crate) fn reset(&mut self, count: usize) {
        self.heights.clear();
        self.heights.resize(count, self.estimate);
        self.measured.clear();
        self.measured.resize(count, false);
        self.rebuild();
    }

    /// Sum of the heights of rows `[0, row)`.
    pub(crate) fn row_start(&self, row: usize) -> f64 {
        let mut i = row.min(self.heights.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    /// Returns the row covering `offset` and the distance from that row's top to `offset`.
    ///
    /// Offsets past the end map into the last row.
    pub(crate) fn row_at_offset(&self, offset: f64) -> Option<(usize, f64)> {
        let n = self.heights.len();
        if n == 0 {
            return None;
        }
        let mut target = offset.max(0.0);
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        if idx >= n {
            let last = n - 1;
            return Some((last, offset.max(0.0) - self.row_start(last)));
        }
        Some((idx, target))
    }

    fn add(&mut self, row: usize, delta: f64) {
        let n = self.heights.len();
        self.total += delta;
        let mut i = row + 1;
        while i <= n {
            self.tree[i] += delta;
            i += lsb(i);
        }
    }

    fn rebuild(&mut self) {
        let n = self.heights.len();
        self.tree.clear();
        self.tree.resize(n + 1, 0.0);
        self.total = 0.0;
        for i in 1..=n {
            let v = self.heights[i - 1];
            self.total += v;
            self.tree[i] += v;
            let j = i + lsb(i);
            if j <= n {
                self.tree[j] += self.tree[i];
            }
        }
        self.max_bit = if n == 0 {
            0
        } else {
            highest_power_of_two_leq(n)
        };
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
