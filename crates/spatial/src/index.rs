//! Top-level spatial index.
//!
//! Owns the id→point map and the root [`Grid`], assigns ids, and
//! forwards insert/sort/query calls.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::error::Error;
use crate::grid::{Grid, GridLimits, GridStats};
use crate::point::Point;

/// Quadtree-backed database of 2D points.
#[derive(Debug)]
pub struct SpatialIndex {
    /// Next id to assign. Strictly increasing, never reused.
    next_id: u32,
    /// All points by id.
    points: HashMap<u32, Point>,
    root: Grid,
    limits: GridLimits,
}

impl SpatialIndex {
    /// Create an index over a `width` x `height` world centered at the
    /// origin.
    pub fn new(width: f32, height: f32, limits: GridLimits) -> Self {
        Self {
            next_id: 1,
            points: HashMap::new(),
            root: Grid::new(Vec2::ZERO, Vec2::new(width, height)),
            limits,
        }
    }

    /// Number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn limits(&self) -> GridLimits {
        self.limits
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a point (batch path). Call [`SpatialIndex::sort`] before the
    /// next query reflects it.
    pub fn add(&mut self, position: Vec2) -> u32 {
        let id = self.alloc_id();
        self.points.insert(id, Point::new(id, position));
        self.root.insert(id, position, &self.limits);
        id
    }

    /// Add a point (incremental path). Sorted views stay current, so no
    /// `sort` is needed before querying.
    ///
    /// Fails with [`Error::StaleView`] if batch adds are pending along
    /// the insertion path; the point is not recorded in that case.
    pub fn inject(&mut self, position: Vec2) -> Result<u32, Error> {
        let id = self.next_id;
        self.root.inject(id, position, &self.limits)?;
        self.next_id += 1;
        self.points.insert(id, Point::new(id, position));
        Ok(id)
    }

    /// Look up a point by id.
    pub fn get(&self, id: u32) -> Result<&Point, Error> {
        self.points.get(&id).ok_or(Error::NotFound(id))
    }

    /// Rebuild all leaf sorted views. Required after a batch of `add`
    /// calls and before the first query.
    pub fn sort(&mut self) {
        self.root.sort();
    }

    /// All points inside the box of `extent` around `center`.
    ///
    /// Order is unspecified. `Error::NotFound` here means an internal
    /// invariant was violated (a leaf id missing from the id map).
    pub fn query(&self, center: Vec2, extent: Vec2) -> Result<Vec<&Point>, Error> {
        let mut ids = HashSet::new();
        self.root.query(center, extent, &mut ids);
        ids.into_iter()
            .map(|id| self.points.get(&id).ok_or(Error::NotFound(id)))
            .collect()
    }

    /// Aggregate tree statistics (leaf count, depth, overflow).
    pub fn stats(&self) -> GridStats {
        self.root.stats(&self.limits)
    }
}

impl Default for SpatialIndex {
    /// An index over the largest representable extent with default
    /// limits.
    fn default() -> Self {
        Self::new(f32::MAX, f32::MAX, GridLimits::default())
    }
}
