//! In-memory loader and sink, for embedding the pipeline without touching disk.

use super::{DatasetLoader, ResultSink};
use crate::collection::PointCollection;
use crate::error::Result;
use crate::scan::ResultTable;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Serves pre-built collections by path.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    datasets: FxHashMap<PathBuf, PointCollection>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, points: PointCollection) {
        self.datasets.insert(path.into(), points);
    }
}

impl DatasetLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<PointCollection> {
        self.datasets.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no dataset at {}", path.display()),
            )
            .into()
        })
    }
}

/// Keeps every written table, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Mutex<Vec<(String, ResultTable)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dataset: &str) -> Option<ResultTable> {
        self.tables
            .lock()
            .iter()
            .find(|(name, _)| name == dataset)
            .map(|(_, table)| table.clone())
    }

    pub fn datasets(&self) -> Vec<String> {
        self.tables.lock().iter().map(|(name, _)| name.clone()).collect()
    }
}

impl ResultSink for MemorySink {
    fn write(&self, dataset: &str, table: &ResultTable) -> Result<PathBuf> {
        self.tables.lock().push((dataset.to_string(), table.clone()));
        Ok(PathBuf::from(format!("memory://{}", dataset)))
    }
}
