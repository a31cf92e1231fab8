//! Dataset loading and result persistence
//!
//! The scan engine works on in-memory collections only. These traits are the
//! boundary to whatever stores the points and receives the hotspot tables,
//! with CSV file and in-memory implementations.

use crate::collection::PointCollection;
use crate::error::Result;
use crate::scan::ResultTable;
use std::path::{Path, PathBuf};

mod loader;
mod memory;
mod writer;

pub use loader::CsvLoader;
pub use memory::{MemoryLoader, MemorySink};
pub use writer::{CsvResultWriter, run_directory_name};

/// Source of point collections.
pub trait DatasetLoader: Send + Sync {
    /// Load every point stored at `path`.
    fn load(&self, path: &Path) -> Result<PointCollection>;

    /// Load at most `limit` points from the start of `path`.
    ///
    /// Loaders that can stream should stop reading at the limit, so rows past
    /// it are never parsed or validated. The default loads everything and
    /// truncates.
    fn load_head(&self, path: &Path, limit: Option<usize>) -> Result<PointCollection> {
        let mut points = self.load(path)?;
        if let Some(limit) = limit {
            points.truncate(limit);
        }
        Ok(points)
    }
}

/// Destination for hotspot tables.
pub trait ResultSink: Send + Sync {
    /// Persist the table for one dataset and return where it was written.
    fn write(&self, dataset: &str, table: &ResultTable) -> Result<PathBuf>;
}
