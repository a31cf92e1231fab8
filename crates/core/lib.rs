//! Fixed-radius neighbor search over geographic point sets.
//!
//! For every query point, find every reference point strictly inside a search
//! radius measured in feet, using a local flat-plane approximation of the
//! Earth's surface. Query points with at least one neighbor are *hotspots*.
//!
//! ## Features
//! - **Planar distance**: per-axis degrees-per-foot scale factors, calibrated for Ohio by default
//! - **Strict bounds**: a point is never its own neighbor, and neither is anything at zero or at exactly the radius
//! - **Partitioned scans**: query points are split into contiguous near-equal chunks and scanned on a worker pool
//! - **Identity merge**: partial results are keyed by point identity and a duplicate key fails the scan
//! - **Batch pipeline**: CSV in, one hotspot table per dataset out
//!
//! ```rust
//! use hotspot::prelude::*;
//!
//! let points = PointCollection::from_coordinates(vec![
//!     (39.1000, -84.5),
//!     (39.1001, -84.5),
//! ])?;
//!
//! let config = SearchConfig::default();
//! let outcome = ScanCoordinator::new(&config).self_join(&points)?;
//!
//! let record = outcome.table.get(&PointId::Record(0)).unwrap();
//! assert_eq!(record.match_count, 1);
//! assert!(record.matches.contains(&PointId::Record(1)));
//! # Ok::<(), hotspot::HotspotError>(())
//! ```

pub mod collection;
pub mod compute;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod scan;
pub mod storage;

pub use collection::PointCollection;
pub use error::{HotspotError, Result};

pub use hotspot_types::point::{GeoPoint, PointId};
pub use hotspot_types::stats::ScanStats;

pub use config::{
    ColumnConfig, DatasetConfig, OHIO_LATITUDE_DEGREES_PER_FOOT, OHIO_LONGITUDE_DEGREES_PER_FOOT,
    ResolvedDataset, RunConfig, ScanMode, SearchConfig,
};

pub use compute::{MatchSet, distance_feet, within_radius};
pub use pipeline::{DatasetFailure, DatasetReport, Pipeline, RunSummary};
pub use scan::{
    LogProgress, NoopProgress, ProgressNotice, ProgressReporter, ResultRecord, ResultTable,
    ScanCoordinator, ScanOutcome,
};
pub use storage::{CsvLoader, CsvResultWriter, DatasetLoader, MemoryLoader, MemorySink, ResultSink};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{HotspotError, Result};

    pub use crate::{GeoPoint, PointCollection, PointId};

    pub use crate::{RunConfig, SearchConfig};

    pub use crate::{ResultTable, ScanCoordinator, ScanOutcome};

    pub use crate::{DatasetLoader, Pipeline, ResultSink, RunSummary};

    pub use crate::{CsvLoader, CsvResultWriter};
}
