//! Brute-force fixed-radius neighbor query.

use crate::collection::PointCollection;
use crate::compute::planar::distance_feet;
use crate::config::SearchConfig;
use hotspot_types::point::{GeoPoint, PointId};
use std::collections::BTreeSet;

/// Identities of the reference points near one query point, in ascending order.
pub type MatchSet = BTreeSet<PointId>;

/// Whether a distance counts as a neighbor.
///
/// Both bounds are strict: coincident points (distance 0) never match, and
/// neither does a point lying exactly on the radius.
#[inline]
pub fn is_neighbor_distance(distance_feet: f64, search_radius_feet: f64) -> bool {
    distance_feet > 0.0 && distance_feet < search_radius_feet
}

/// All reference points strictly between 0 and `search_radius_feet` feet from `query`.
///
/// Scans every reference point, O(|reference|) per call. No spatial index is
/// used.
///
/// # Examples
///
/// ```
/// use hotspot::collection::PointCollection;
/// use hotspot::compute::neighbors::within_radius;
/// use hotspot::config::SearchConfig;
/// use hotspot_types::point::{GeoPoint, PointId};
///
/// let reference = PointCollection::new(vec![
///     GeoPoint::new(0u64, 39.1000, -84.5000),
///     GeoPoint::new(1u64, 39.1001, -84.5000),
///     GeoPoint::new(2u64, 39.2000, -84.5000),
/// ])?;
///
/// let matches = within_radius(&reference.points()[0], &reference, &SearchConfig::default());
/// assert_eq!(matches.into_iter().collect::<Vec<_>>(), vec![PointId::Record(1)]);
/// # Ok::<(), hotspot::HotspotError>(())
/// ```
pub fn within_radius(
    query: &GeoPoint,
    reference: &PointCollection,
    config: &SearchConfig,
) -> MatchSet {
    reference
        .points()
        .iter()
        .filter(|candidate| {
            is_neighbor_distance(
                distance_feet(query, candidate, config),
                config.search_radius_feet,
            )
        })
        .map(|candidate| candidate.id().clone())
        .collect()
}
