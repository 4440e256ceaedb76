//! Per-dimension coordinate index.
//!
//! An `Axis` keeps one dimension's worth of point coordinates and
//! answers "which ids fall in `[lo, hi]`" as a contiguous slice of a
//! sorted view. The view is a cached projection of the unsorted store:
//! batch inserts leave it stale until the next [`Axis::sort`], while
//! [`Axis::inject`] maintains it incrementally.

use std::collections::HashMap;
use std::ops::Range;

use crate::error::Error;

/// One dimension's coordinate plus the owning point's id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEntry {
    pub value: f32,
    pub id: u32,
}

impl AxisEntry {
    /// Total order by value, ties broken by id so a rebuilt view is
    /// reproducible and `inject` agrees with `sort` on placement.
    #[inline]
    fn cmp_key(&self, other: &AxisEntry) -> std::cmp::Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.id.cmp(&other.id))
    }
}

/// Sorted-array range index over one dimension.
#[derive(Debug, Clone, Default)]
pub struct Axis {
    /// All entries keyed by point id.
    entries: HashMap<u32, AxisEntry>,
    /// Cached ascending projection of `entries`.
    sorted: Vec<AxisEntry>,
    /// Entries inserted since the last rebuild.
    stale: bool,
}

impl Axis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the unsorted store.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the sorted view is missing entries.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Batch insert: record the entry, leave the sorted view untouched.
    pub fn insert(&mut self, value: f32, id: u32) {
        self.entries.insert(id, AxisEntry { value, id });
        self.stale = true;
    }

    /// Incremental insert: record the entry and splice it into the
    /// sorted view at its binary-searched position.
    ///
    /// Fails with [`Error::StaleView`] when batch inserts are pending,
    /// since the splice position is only meaningful on a current view.
    pub fn inject(&mut self, value: f32, id: u32) -> Result<(), Error> {
        if self.stale {
            return Err(Error::StaleView);
        }
        let entry = AxisEntry { value, id };
        self.entries.insert(id, entry);
        let at = self
            .sorted
            .partition_point(|e| e.cmp_key(&entry) == std::cmp::Ordering::Less);
        self.sorted.insert(at, entry);
        Ok(())
    }

    /// Rebuild the sorted view from the unsorted store.
    pub fn sort(&mut self) {
        self.sorted.clear();
        self.sorted.extend(self.entries.values().copied());
        self.sorted.sort_unstable_by(AxisEntry::cmp_key);
        self.stale = false;
    }

    /// Index of the first entry with `value >= v`.
    #[inline]
    fn lower_bound(&self, v: f32) -> usize {
        self.sorted.partition_point(|e| e.value < v)
    }

    /// Index one past the last entry with `value <= v`.
    #[inline]
    fn upper_bound(&self, v: f32) -> usize {
        self.sorted.partition_point(|e| e.value <= v)
    }

    /// Exact sorted-view index range of entries with `lo <= value <= hi`.
    ///
    /// Valid only as of the last `sort` (or inject-only maintenance).
    pub fn query(&self, lo: f32, hi: f32) -> Range<usize> {
        let start = self.lower_bound(lo);
        let end = self.upper_bound(hi);
        start..end.max(start)
    }

    /// Id at a sorted-view index.
    #[inline]
    pub fn at(&self, index: usize) -> Option<u32> {
        self.sorted.get(index).map(|e| e.id)
    }

    /// Ids in a sorted-view index range.
    pub fn ids_in(&self, range: Range<usize>) -> impl Iterator<Item = u32> + '_ {
        self.sorted[range].iter().map(|e| e.id)
    }

    /// The sorted view as a slice.
    pub fn sorted_entries(&self) -> &[AxisEntry] {
        &self.sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_of(values: &[f32]) -> Axis {
        let mut axis = Axis::new();
        for (i, &v) in values.iter().enumerate() {
            axis.insert(v, i as u32 + 1);
        }
        axis.sort();
        axis
    }

    #[test]
    fn test_sort_orders_view() {
        let axis = axis_of(&[5.0, 1.0, 3.0, 2.0]);
        let values: Vec<f32> = axis.sorted_entries().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 5.0]);
        assert!(!axis.is_stale());
    }

    #[test]
    fn test_query_exact_bounds() {
        let axis = axis_of(&[1.0, 2.0, 2.0, 3.0, 7.0]);
        let range = axis.query(2.0, 3.0);
        let mut ids: Vec<u32> = axis.ids_in(range).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 3, 4]); // both 2.0 entries and the 3.0
    }

    #[test]
    fn test_query_outside_and_inverted() {
        let axis = axis_of(&[1.0, 2.0, 3.0]);
        assert!(axis.query(10.0, 20.0).is_empty());
        assert!(axis.query(-5.0, 0.5).is_empty());
        assert!(axis.query(3.0, 1.0).is_empty()); // lo > hi
    }

    #[test]
    fn test_query_empty_axis() {
        let axis = Axis::new();
        assert_eq!(axis.query(0.0, 100.0), 0..0);
        assert_eq!(axis.at(0), None);
    }

    #[test]
    fn test_inject_matches_sort() {
        let values = [4.0, 1.0, 3.0, 3.0, 9.0, 0.5];

        let mut batch = Axis::new();
        let mut incremental = Axis::new();
        for (i, &v) in values.iter().enumerate() {
            batch.insert(v, i as u32 + 1);
            incremental.inject(v, i as u32 + 1).unwrap();
        }
        batch.sort();

        assert_eq!(batch.sorted_entries(), incremental.sorted_entries());
    }

    #[test]
    fn test_inject_on_stale_view_fails() {
        let mut axis = Axis::new();
        axis.insert(1.0, 1);
        assert_eq!(axis.inject(2.0, 2), Err(Error::StaleView));

        // an explicit re-sort makes injection legal again
        axis.sort();
        assert_eq!(axis.inject(2.0, 2), Ok(()));
        assert_eq!(axis.at(1), Some(2));
    }

    #[test]
    fn test_sort_idempotent() {
        let mut axis = axis_of(&[2.0, 2.0, 1.0, 5.0]);
        let first: Vec<AxisEntry> = axis.sorted_entries().to_vec();
        axis.sort();
        assert_eq!(axis.sorted_entries(), &first[..]);
    }

    #[test]
    fn test_stale_after_insert() {
        let mut axis = axis_of(&[1.0]);
        assert!(!axis.is_stale());
        axis.insert(2.0, 2);
        assert!(axis.is_stale());
        // view still reflects the last sort
        assert_eq!(axis.sorted_entries().len(), 1);
        axis.sort();
        assert_eq!(axis.sorted_entries().len(), 2);
    }
}
