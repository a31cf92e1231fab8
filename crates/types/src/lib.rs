//! # hotspot-types
//!
//! Leaf types shared by the hotspot neighbor-search crates:
//!
//! - **Points**: `GeoPoint`, an identified latitude/longitude built on `geo::Point`,
//!   and its `PointId`
//! - **Configuration**: `SearchConfig`, radius, degree-per-foot scale and worker count
//! - **Statistics**: `ScanStats`
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use hotspot_types::config::SearchConfig;
//! use hotspot_types::point::{GeoPoint, PointId};
//!
//! let recovery = GeoPoint::new(0u64, 39.1000, -84.5000);
//! assert_eq!(recovery.id(), &PointId::Record(0));
//!
//! let config = SearchConfig::default();
//! assert_eq!(config.search_radius_feet, 500.0);
//! ```

pub mod config;
pub mod point;
pub mod stats;
