//! Validation for geographic coordinates.

use crate::error::{HotspotError, Result};
use hotspot_types::point::GeoPoint;

/// Validates a latitude/longitude pair.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use hotspot::compute::validation::validate_coordinates;
///
/// assert!(validate_coordinates(39.1031, -84.5120).is_ok());
/// assert!(validate_coordinates(95.0, -84.5).is_err());
/// assert!(validate_coordinates(39.1, f64::NAN).is_err());
/// ```
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() {
        return Err(HotspotError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            latitude
        )));
    }

    if !longitude.is_finite() {
        return Err(HotspotError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            longitude
        )));
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(HotspotError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(HotspotError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            longitude
        )));
    }

    Ok(())
}

pub fn validate_point(point: &GeoPoint) -> Result<()> {
    validate_coordinates(point.latitude(), point.longitude())
}

/// Validates multiple points, reporting the offending identity.
pub fn validate_points(points: &[GeoPoint]) -> Result<()> {
    for point in points {
        validate_point(point).map_err(|e| match e {
            HotspotError::InvalidInput(message) => {
                HotspotError::InvalidInput(format!("Point {}: {}", point.id(), message))
            }
            other => other,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_ranges() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(90.0001, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.0001).is_err());
        assert!(validate_coordinates(f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_validate_points_names_identity() {
        let points = vec![
            GeoPoint::new(0u64, 39.1, -84.5),
            GeoPoint::new("bad-row", 39.1, 200.0),
        ];
        let err = validate_points(&points).unwrap_err();
        assert!(err.to_string().contains("bad-row"));
    }

    #[test]
    fn test_validate_points_message_not_nested() {
        let points = vec![
            GeoPoint::new(0u64, 39.1, -84.5),
            GeoPoint::new(1u64, 39.1001, -84.5),
            GeoPoint::new(2u64, 95.0, -84.5),
        ];
        let err = validate_points(&points).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Point 2: Latitude out of range [-90.0, 90.0]: 95"
        );
    }
}
