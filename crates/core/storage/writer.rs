//! CSV hotspot table writer.

use super::ResultSink;
use crate::error::Result;
use crate::scan::ResultTable;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: [&str; 3] = ["id", "match_count", "matches"];
const MATCH_SEPARATOR: &str = ";";

/// Directory name for one run: `<radius>ft Search Radius -- <timestamp>`.
///
/// ```
/// use hotspot::storage::run_directory_name;
///
/// assert_eq!(
///     run_directory_name(500.0, "2016-12-31 23-59-00"),
///     "500ft Search Radius -- 2016-12-31 23-59-00"
/// );
/// ```
pub fn run_directory_name(search_radius_feet: f64, timestamp: &str) -> String {
    format!("{}ft Search Radius -- {}", search_radius_feet, timestamp)
}

#[derive(Serialize)]
struct Row {
    id: String,
    match_count: usize,
    matches: String,
}

/// Writes one `<dataset>.csv` per dataset into a directory, one row per record.
#[derive(Debug, Clone)]
pub struct CsvResultWriter {
    dir: PathBuf,
}

impl CsvResultWriter {
    /// Use `dir` as the output directory, creating it if needed.
    pub fn create<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResultSink for CsvResultWriter {
    fn write(&self, dataset: &str, table: &ResultTable) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.csv", dataset));
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;

        writer.write_record(HEADER)?;
        for record in table.iter() {
            let matches: Vec<String> = record.matches.iter().map(|m| m.to_string()).collect();
            writer.serialize(Row {
                id: record.id.to_string(),
                match_count: record.match_count,
                matches: matches.join(MATCH_SEPARATOR),
            })?;
        }
        writer.flush()?;

        Ok(path)
    }
}
