use alloc::vec::Vec;

/// A closed range of indexes `[lower, upper]` that all map to the same value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange<T> {
    pub lower: usize,
    /// Inclusive.
    pub upper: usize,
    pub value: T,
}

impl<T> IndexRange<T> {
    pub fn count(&self) -> usize {
        self.upper - self.lower + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.lower <= index && index <= self.upper
    }
}

/// A sparse map from index to value, stored as sorted, non-overlapping ranges.
///
/// Adjacent ranges holding equal values are always merged, so a fully selected block of rows
/// costs a single entry no matter how many rows it spans. Lookups are `O(log ranges)`; edits
/// are `O(ranges)` in the worst case because they splice the backing `Vec`.
///
/// `insert_indexes`/`remove_indexes` shift the ranges to follow insertions and deletions in the
/// underlying row space, so the table stays aligned with the items it describes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexToValueTable<T> {
    ranges: Vec<IndexRange<T>>,
}

impl<T> Default for IndexToValueTable<T> {
    fn default() -> Self {
        Self { ranges: Vec::new() }
    }
}

impl<T: Clone + PartialEq> IndexToValueTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ranges(&self) -> &[IndexRange<T>] {
        &self.ranges
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of indexes holding a value.
    pub fn index_count(&self) -> usize {
        self.ranges.iter().map(IndexRange::count).sum()
    }

    pub fn first_index(&self) -> Option<usize> {
        self.ranges.first().map(|r| r.lower)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.ranges.last().map(|r| r.upper)
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    fn locate(&self, index: usize) -> Result<usize, usize> {
        let p = self.ranges.partition_point(|r| r.upper < index);
        if p < self.ranges.len() && self.ranges[p].lower <= index {
            Ok(p)
        } else {
            Err(p)
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.locate(index).is_ok()
    }

    /// Returns `true` when every index in `[start, end]` holds a value.
    pub fn contains_all(&self, start: usize, end: usize) -> bool {
        debug_assert!(start <= end);
        let Ok(mut p) = self.locate(start) else {
            return false;
        };
        loop {
            let upper = self.ranges[p].upper;
            if upper >= end {
                return true;
            }
            p += 1;
            match self.ranges.get(p) {
                Some(next) if next.lower == upper + 1 => {}
                _ => return false,
            }
        }
    }

    pub fn value(&self, index: usize) -> Option<&T> {
        self.locate(index).ok().map(|p| &self.ranges[p].value)
    }

    pub fn add_value(&mut self, index: usize, value: T) {
        self.add_values(index, 1, value);
    }

    pub fn add_values(&mut self, start: usize, count: usize, value: T) {
        if count == 0 {
            return;
        }
        self.set_range(start, start + count - 1, Some(value));
    }

    pub fn remove_value(&mut self, index: usize) {
        self.remove_values(index, 1);
    }

    pub fn remove_values(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        self.set_range(start, start + count - 1, None);
    }

    /// Opens a gap of `count` unset indexes at `start`, shifting every index at or after
    /// `start` up by `count`. A range spanning `start` is split around the gap.
    pub fn insert_indexes(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        let mut p = self.ranges.partition_point(|r| r.upper < start);
        if p < self.ranges.len() && self.ranges[p].lower < start {
            let tail = IndexRange {
                lower: start + count,
                upper: self.ranges[p].upper + count,
                value: self.ranges[p].value.clone(),
            };
            self.ranges[p].upper = start - 1;
            self.ranges.insert(p + 1, tail);
            p += 2;
        }
        for r in &mut self.ranges[p..] {
            r.lower += count;
            r.upper += count;
        }
    }

    pub fn insert_index(&mut self, index: usize) {
        self.insert_indexes(index, 1);
    }

    /// Deletes `count` indexes starting at `start` (dropping their values) and shifts every
    /// later index down by `count`.
    pub fn remove_indexes(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        self.set_range(start, start + count - 1, None);
        let p = self.ranges.partition_point(|r| r.upper < start);
        for r in &mut self.ranges[p..] {
            r.lower -= count;
            r.upper -= count;
        }
        self.merge_between(p.saturating_sub(1), p + 1);
    }

    pub fn remove_index(&mut self, index: usize) {
        self.remove_indexes(index, 1);
    }

    /// Counts the indexes strictly between `lower` and `upper` whose value equals `value`.
    pub fn index_count_between(&self, lower: usize, upper: usize, value: &T) -> usize {
        if upper <= lower + 1 {
            return 0;
        }
        let first = lower + 1;
        let last = upper - 1;
        let p = self.ranges.partition_point(|r| r.upper < first);
        self.ranges[p..]
            .iter()
            .take_while(|r| r.lower <= last)
            .filter(|r| r.value == *value)
            .map(|r| r.upper.min(last) - r.lower.max(first) + 1)
            .sum()
    }

    /// Returns the `n`-th index (in ascending order) that holds a value.
    pub fn nth_index(&self, n: usize) -> Option<usize> {
        let mut remaining = n;
        for r in &self.ranges {
            let count = r.count();
            if remaining < count {
                return Some(r.lower + remaining);
            }
            remaining -= count;
        }
        None
    }

    /// Inverse of [`Self::nth_index`]: the position of `index` among all indexes holding a value.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        let mut cumulated = 0usize;
        for r in &self.ranges {
            if r.upper >= index {
                return (r.lower <= index).then(|| cumulated + index - r.lower);
            }
            cumulated += r.count();
        }
        None
    }

    /// Iterates every index holding a value, in ascending order.
    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(|r| r.lower..=r.upper)
    }

    fn set_range(&mut self, start: usize, end: usize, value: Option<T>) {
        debug_assert!(start <= end);
        let first = self.ranges.partition_point(|r| r.upper < start);
        let last_exclusive = self.ranges.partition_point(|r| r.lower <= end);

        let mut replacement: Vec<IndexRange<T>> = Vec::with_capacity(3);
        if first < last_exclusive {
            let head = &self.ranges[first];
            if head.lower < start {
                replacement.push(IndexRange {
                    lower: head.lower,
                    upper: start - 1,
                    value: head.value.clone(),
                });
            }
        }
        if let Some(value) = value {
            replacement.push(IndexRange {
                lower: start,
                upper: end,
                value,
            });
        }
        if first < last_exclusive {
            let tail = &self.ranges[last_exclusive - 1];
            if tail.upper > end {
                replacement.push(IndexRange {
                    lower: end + 1,
                    upper: tail.upper,
                    value: tail.value.clone(),
                });
            }
        }

        let inserted = replacement.len();
        self.ranges.splice(first..last_exclusive, replacement);
        self.merge_between(first.saturating_sub(1), first + inserted + 1);
    }

    /// Merges touching ranges with equal values among `ranges[from..to]`.
    fn merge_between(&mut self, from: usize, to: usize) {
        let mut i = from;
        let mut to = to.min(self.ranges.len());
        while i + 1 < to {
            let (left, right) = (&self.ranges[i], &self.ranges[i + 1]);
            if left.upper + 1 == right.lower && left.value == right.value {
                self.ranges[i].upper = self.ranges[i + 1].upper;
                self.ranges.remove(i + 1);
                to -= 1;
            } else {
                i += 1;
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a IndexToValueTable<T> {
    type Item = &'a IndexRange<T>;
    type IntoIter = core::slice::Iter<'a, IndexRange<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
