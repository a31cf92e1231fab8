//! Run configuration for hotspot scans
//!
//! This module provides the process-wide configuration and re-exports the
//! search parameters from the `hotspot-types` crate for convenience.
use crate::error::{HotspotError, Result};
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use hotspot_types::config::{
    OHIO_LATITUDE_DEGREES_PER_FOOT, OHIO_LONGITUDE_DEGREES_PER_FOOT, SearchConfig,
};

/// Cities scanned when no dataset list is configured.
pub const DEFAULT_CITIES: [&str; 5] = ["Cincinnati", "Dayton", "Akron", "Columbus", "Cleveland"];

/// Which collection plays which role in a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// One collection is both the query and the reference set.
    SelfJoin,
    /// Query and reference sets are distinct collections.
    Asymmetric,
}

/// Header names used to read point files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    #[serde(default = "ColumnConfig::default_latitude")]
    pub latitude: String,

    #[serde(default = "ColumnConfig::default_longitude")]
    pub longitude: String,

    /// Column holding a unique record key. Without it the record index is the identity.
    #[serde(default)]
    pub id: Option<String>,
}

impl ColumnConfig {
    fn default_latitude() -> String {
        "Latitude".to_string()
    }

    fn default_longitude() -> String {
        "Longitude".to_string()
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            latitude: Self::default_latitude(),
            longitude: Self::default_longitude(),
            id: None,
        }
    }
}

/// One dataset to scan.
///
/// Without `query` the dataset is a self-join over `reference` (default
/// `<name>.csv`). With `query` it is an asymmetric join: every query point
/// is checked against the reference points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<PathBuf>,
}

/// A dataset with its file paths resolved against the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDataset {
    pub name: String,
    pub reference: PathBuf,
    pub query: Option<PathBuf>,
}

impl ResolvedDataset {
    pub fn mode(&self) -> ScanMode {
        if self.query.is_some() {
            ScanMode::Asymmetric
        } else {
            ScanMode::SelfJoin
        }
    }
}

impl DatasetConfig {
    pub fn self_join(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: None,
            query: None,
        }
    }

    pub fn asymmetric(
        name: impl Into<String>,
        reference: impl Into<PathBuf>,
        query: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            reference: Some(reference.into()),
            query: Some(query.into()),
        }
    }

    pub fn mode(&self) -> ScanMode {
        if self.query.is_some() {
            ScanMode::Asymmetric
        } else {
            ScanMode::SelfJoin
        }
    }

    pub fn resolve(&self, input_dir: &Path) -> ResolvedDataset {
        let reference = self
            .reference
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.csv", self.name)));

        ResolvedDataset {
            name: self.name.clone(),
            reference: input_dir.join(reference),
            query: self.query.as_ref().map(|q| input_dir.join(q)),
        }
    }
}

/// Process-wide configuration, built once at startup.
///
/// # Example
///
/// ```rust
/// use hotspot::config::RunConfig;
///
/// let toml = r#"
///     input_dir = "data"
///     max_points = 100
///
///     [search]
///     search_radius_feet = 250.0
///     worker_count = 4
///
///     [[datasets]]
///     name = "Dayton"
/// "#;
/// let config = RunConfig::from_toml(toml).unwrap();
/// assert_eq!(config.search.worker_count, 4);
/// assert_eq!(config.datasets.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default = "RunConfig::default_input_dir")]
    pub input_dir: PathBuf,

    #[serde(default = "RunConfig::default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub columns: ColumnConfig,

    /// Read at most this many rows from each file
    #[serde(default)]
    pub max_points: Option<usize>,

    /// Emit a progress notice every this many query points per task (0 disables)
    #[serde(default = "RunConfig::default_progress_interval")]
    pub progress_interval: usize,

    #[serde(default = "RunConfig::default_datasets")]
    pub datasets: Vec<DatasetConfig>,
}

impl RunConfig {
    fn default_input_dir() -> PathBuf {
        PathBuf::from("data")
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from("output")
    }

    const fn default_progress_interval() -> usize {
        50
    }

    fn default_datasets() -> Vec<DatasetConfig> {
        DEFAULT_CITIES
            .iter()
            .map(|city| DatasetConfig::self_join(*city))
            .collect()
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_input_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_columns(mut self, columns: ColumnConfig) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_datasets(mut self, datasets: Vec<DatasetConfig>) -> Self {
        self.datasets = datasets;
        self
    }

    /// Restrict the run to the named datasets, in the given order.
    ///
    /// Names without a configured entry become self-join datasets.
    pub fn select_datasets<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        if names.is_empty() {
            return self;
        }

        let selected = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.datasets
                    .iter()
                    .find(|d| d.name == name)
                    .cloned()
                    .unwrap_or_else(|| DatasetConfig::self_join(name))
            })
            .collect();
        self.datasets = selected;
        self
    }

    pub fn resolved_datasets(&self) -> Vec<ResolvedDataset> {
        self.datasets
            .iter()
            .map(|d| d.resolve(&self.input_dir))
            .collect()
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.search.validate()?;

        if self.max_points == Some(0) {
            return Err("max_points must be greater than zero".to_string());
        }

        if self.columns.latitude.is_empty() || self.columns.longitude.is_empty() {
            return Err("Coordinate column names cannot be empty".to_string());
        }

        if self.datasets.is_empty() {
            return Err("At least one dataset must be configured".to_string());
        }

        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if dataset.name.trim().is_empty() {
                return Err("Dataset name cannot be empty".to_string());
            }
            if !seen.insert(dataset.name.as_str()) {
                return Err(format!("Dataset '{}' is configured twice", dataset.name));
            }
            if dataset.query.is_some() && dataset.reference.is_none() {
                return Err(format!(
                    "Dataset '{}' has a query file but no reference file",
                    dataset.name
                ));
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: RunConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: RunConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read a configuration file, choosing the format by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                Self::from_json(&text).map_err(|e| HotspotError::ConfigParse(e.to_string()))
            }
            #[cfg(feature = "toml")]
            Some("toml") => {
                Self::from_toml(&text).map_err(|e| HotspotError::ConfigParse(e.to_string()))
            }
            other => Err(HotspotError::ConfigParse(format!(
                "Unsupported configuration format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            input_dir: Self::default_input_dir(),
            output_dir: Self::default_output_dir(),
            columns: ColumnConfig::default(),
            max_points: None,
            progress_interval: Self::default_progress_interval(),
            datasets: Self::default_datasets(),
        }
    }
}
