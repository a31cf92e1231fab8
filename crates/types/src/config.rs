use serde::{Deserialize, Serialize};

/// Degrees of latitude per foot, calibrated for central Ohio.
pub const OHIO_LATITUDE_DEGREES_PER_FOOT: f64 = 2.7500413975823255e-06;
/// Degrees of longitude per foot, calibrated for central Ohio.
pub const OHIO_LONGITUDE_DEGREES_PER_FOOT: f64 = 3.6435606060606596e-06;

/// Parameters of one neighbor scan.
///
/// The two scale constants describe a flat local plane around one reference
/// latitude. They must be recalibrated before scanning another region.
///
/// # Example
///
/// ```rust
/// use hotspot_types::config::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_search_radius_feet(250.0)
///     .with_worker_count(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Exclusive upper bound on neighbor distance, in feet.
    #[serde(default = "SearchConfig::default_search_radius_feet")]
    pub search_radius_feet: f64,

    #[serde(default = "SearchConfig::default_latitude_degrees_per_foot")]
    pub latitude_degrees_per_foot: f64,

    #[serde(default = "SearchConfig::default_longitude_degrees_per_foot")]
    pub longitude_degrees_per_foot: f64,

    /// Number of worker threads and query sub-ranges per scan.
    #[serde(default = "SearchConfig::default_worker_count")]
    pub worker_count: usize,
}

impl SearchConfig {
    const fn default_search_radius_feet() -> f64 {
        500.0
    }

    const fn default_latitude_degrees_per_foot() -> f64 {
        OHIO_LATITUDE_DEGREES_PER_FOOT
    }

    const fn default_longitude_degrees_per_foot() -> f64 {
        OHIO_LONGITUDE_DEGREES_PER_FOOT
    }

    const fn default_worker_count() -> usize {
        6
    }

    pub fn with_search_radius_feet(mut self, radius: f64) -> Self {
        self.search_radius_feet = radius;
        self
    }

    /// Replace both degree-per-foot scale constants.
    pub fn with_scale(mut self, latitude_degrees_per_foot: f64, longitude_degrees_per_foot: f64) -> Self {
        self.latitude_degrees_per_foot = latitude_degrees_per_foot;
        self.longitude_degrees_per_foot = longitude_degrees_per_foot;
        self
    }

    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.search_radius_feet.is_finite() || self.search_radius_feet <= 0.0 {
            return Err(format!(
                "Search radius must be finite and positive, got: {}",
                self.search_radius_feet
            ));
        }

        for (name, value) in [
            ("latitude_degrees_per_foot", self.latitude_degrees_per_foot),
            ("longitude_degrees_per_foot", self.longitude_degrees_per_foot),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be finite and positive, got: {}", name, value));
            }
        }

        if self.worker_count == 0 {
            return Err("Worker count must be greater than zero".to_string());
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_radius_feet: Self::default_search_radius_feet(),
            latitude_degrees_per_foot: Self::default_latitude_degrees_per_foot(),
            longitude_degrees_per_foot: Self::default_longitude_degrees_per_foot(),
            worker_count: Self::default_worker_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.search_radius_feet, 500.0);
        assert_eq!(config.worker_count, 6);
        assert_eq!(config.latitude_degrees_per_foot, OHIO_LATITUDE_DEGREES_PER_FOOT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(SearchConfig::default().with_worker_count(0).validate().is_err());
        assert!(SearchConfig::default().with_search_radius_feet(0.0).validate().is_err());
        assert!(SearchConfig::default().with_search_radius_feet(f64::NAN).validate().is_err());
        assert!(SearchConfig::default().with_scale(-1.0, 1.0).validate().is_err());
        assert!(SearchConfig::default().with_scale(1.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"worker_count": 2}"#).unwrap();
        assert_eq!(config.worker_count, 2);
        assert_eq!(config.search_radius_feet, 500.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let parsed: Result<SearchConfig, _> = serde_json::from_str(r#"{"radius": 2.0}"#);
        assert!(parsed.is_err());
    }
}
