//! Ordered, identity-indexed point collections.

use crate::compute::validation::validate_points;
use crate::error::{HotspotError, Result};
use hotspot_types::point::{GeoPoint, PointId};
use rustc_hash::FxHashMap;
use std::ops::Range;

/// An ordered sequence of points with identity lookup.
///
/// Identities are unique and every coordinate is a finite, in-range
/// latitude/longitude. A collection is never mutated once a scan starts.
#[derive(Debug, Clone, Default)]
pub struct PointCollection {
    points: Vec<GeoPoint>,
    index: FxHashMap<PointId, usize>,
}

impl PointCollection {
    /// Build a collection, rejecting invalid coordinates and repeated identities.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self> {
        validate_points(&points)?;

        let mut index = FxHashMap::default();
        index.reserve(points.len());
        for (position, point) in points.iter().enumerate() {
            if index.insert(point.id().clone(), position).is_some() {
                return Err(HotspotError::DuplicateIdentity(point.id().clone()));
            }
        }

        Ok(Self { points, index })
    }

    /// Build a collection keyed by position: the i-th coordinate pair gets `PointId::Record(i)`.
    pub fn from_coordinates<I>(coordinates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points = coordinates
            .into_iter()
            .enumerate()
            .map(|(i, (latitude, longitude))| GeoPoint::new(i, latitude, longitude))
            .collect();
        Self::new(points)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn get(&self, id: &PointId) -> Option<&GeoPoint> {
        self.index.get(id).map(|&position| &self.points[position])
    }

    pub fn contains(&self, id: &PointId) -> bool {
        self.index.contains_key(id)
    }

    /// Points in a contiguous range of positions.
    ///
    /// Returns `None` if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Option<&[GeoPoint]> {
        self.points.get(range)
    }

    /// Keep only the first `len` points.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.points.len() {
            return;
        }
        for dropped in self.points.drain(len..) {
            self.index.remove(dropped.id());
        }
    }
}
