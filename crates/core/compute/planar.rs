//! Flat local-plane distance in feet.
//!
//! Latitude and longitude deltas are divided by fixed degree-per-foot
//! constants and combined with the Euclidean norm. This is a first-order
//! approximation that is only accurate near the latitude the constants were
//! calibrated for; error grows with distance from that latitude.

use crate::config::SearchConfig;
use geo::{Distance, Euclidean};
use hotspot_types::point::GeoPoint;

/// Offset between two points on the local plane, in feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarDelta {
    /// North-south component (latitude delta / latitude degrees per foot)
    pub lat_feet: f64,
    /// East-west component (longitude delta / longitude degrees per foot)
    pub lon_feet: f64,
}

/// Project the coordinate difference `a - b` onto the local plane.
#[inline]
pub fn project(a: &GeoPoint, b: &GeoPoint, config: &SearchConfig) -> PlanarDelta {
    PlanarDelta {
        lat_feet: (a.latitude() - b.latitude()) / config.latitude_degrees_per_foot,
        lon_feet: (a.longitude() - b.longitude()) / config.longitude_degrees_per_foot,
    }
}

/// Inverse of [`project`]: the latitude/longitude reached by moving
/// `north_feet` and `east_feet` from `origin`.
///
/// The round trip is exact only when both degree-per-foot constants are
/// powers of two. With other scales, such as the Ohio defaults, rounding can
/// leave the projected distance a few ULPs either side of the requested one,
/// so a point placed exactly on the radius may land inside it.
///
/// # Examples
///
/// ```
/// use hotspot::compute::planar::{distance_feet, offset_by_feet};
/// use hotspot::config::SearchConfig;
/// use hotspot_types::point::GeoPoint;
///
/// let config = SearchConfig::default();
/// let origin = GeoPoint::new(0u64, 39.1, -84.5);
/// let (lat, lon) = offset_by_feet(&origin, 300.0, 0.0, &config);
/// let moved = GeoPoint::new(1u64, lat, lon);
/// assert!((distance_feet(&origin, &moved, &config) - 300.0).abs() < 1e-6);
/// ```
pub fn offset_by_feet(
    origin: &GeoPoint,
    north_feet: f64,
    east_feet: f64,
    config: &SearchConfig,
) -> (f64, f64) {
    (
        origin.latitude() + north_feet * config.latitude_degrees_per_foot,
        origin.longitude() + east_feet * config.longitude_degrees_per_foot,
    )
}

/// Planar distance between two points in feet.
///
/// Symmetric, and exactly 0 when both points share latitude and longitude,
/// whatever their identities.
#[inline]
pub fn distance_feet(a: &GeoPoint, b: &GeoPoint, config: &SearchConfig) -> f64 {
    let delta = project(a, b, config);
    Euclidean.distance(
        geo::Point::new(0.0, 0.0),
        geo::Point::new(delta.lon_feet, delta.lat_feet),
    )
}
