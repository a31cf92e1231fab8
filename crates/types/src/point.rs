//! Identified geographic points.
//!
//! A [`GeoPoint`] wraps `geo::Point` (x = longitude, y = latitude) and carries
//! the [`PointId`] that distinguishes it inside its source collection. Two
//! points at the same coordinates with different identities are different
//! points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a point within its source collection.
///
/// `Record` is the zero-based position of the row the point was read from,
/// `Named` is a caller supplied key such as a value from an id column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Record(u64),
    Named(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(index) => write!(f, "{}", index),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<u64> for PointId {
    fn from(index: u64) -> Self {
        Self::Record(index)
    }
}

impl From<usize> for PointId {
    fn from(index: usize) -> Self {
        Self::Record(index as u64)
    }
}

impl From<&str> for PointId {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for PointId {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// A geographic coordinate with an identity.
///
/// # Examples
///
/// ```
/// use hotspot_types::point::GeoPoint;
///
/// let fountain = GeoPoint::new("fountain-square", 39.1015, -84.5125);
/// assert_eq!(fountain.latitude(), 39.1015);
/// assert_eq!(fountain.longitude(), -84.5125);
/// assert_eq!(fountain.id().to_string(), "fountain-square");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    id: PointId,
    inner: geo::Point<f64>,
}

impl GeoPoint {
    /// Create a point from an identity and latitude/longitude in degrees.
    #[inline]
    pub fn new(id: impl Into<PointId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            inner: geo::Point::new(longitude, latitude),
        }
    }

    /// Create a point from an identity and an existing `geo::Point`.
    #[inline]
    pub fn from_geo(id: impl Into<PointId>, point: geo::Point<f64>) -> Self {
        Self {
            id: id.into(),
            inner: point,
        }
    }

    #[inline]
    pub fn id(&self) -> &PointId {
        &self.id
    }

    /// Latitude in degrees (the y coordinate).
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.inner.y()
    }

    /// Longitude in degrees (the x coordinate).
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.inner.x()
    }

    /// Access the inner `geo::Point`.
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// True when both points have exactly the same latitude and longitude,
    /// regardless of identity.
    #[inline]
    pub fn same_location(&self, other: &GeoPoint) -> bool {
        self.inner == other.inner
    }

    /// Split into identity and coordinates.
    pub fn into_parts(self) -> (PointId, geo::Point<f64>) {
        (self.id, self.inner)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.inner
    }
}
