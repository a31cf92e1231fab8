//! Sequential per-dataset driver.
//!
//! Datasets are processed one after another, each with a fresh worker pool and
//! no state carried between them. A dataset that fails to load is reported and
//! skipped. A scan whose worker panics writes no output for that dataset and
//! the run moves on. A partition violation stops the run.

use crate::collection::PointCollection;
use crate::config::{ResolvedDataset, RunConfig, ScanMode};
use crate::error::{HotspotError, Result};
use crate::scan::{NoopProgress, ProgressReporter, ScanCoordinator};
use crate::storage::{DatasetLoader, ResultSink};
use hotspot_types::stats::ScanStats;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

static NOOP_PROGRESS: NoopProgress = NoopProgress;

/// A dataset that was scanned and written.
#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub name: String,
    pub mode: ScanMode,
    pub stats: ScanStats,
    pub output: PathBuf,
}

/// A dataset that could not be completed.
#[derive(Debug)]
pub struct DatasetFailure {
    pub name: String,
    pub error: HotspotError,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<DatasetReport>,
    pub failures: Vec<DatasetFailure>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Pipeline<'a> {
    config: &'a RunConfig,
    loader: &'a dyn DatasetLoader,
    sink: &'a dyn ResultSink,
    progress: &'a dyn ProgressReporter,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a RunConfig,
        loader: &'a dyn DatasetLoader,
        sink: &'a dyn ResultSink,
    ) -> Self {
        Self {
            config,
            loader,
            sink,
            progress: &NOOP_PROGRESS,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    /// Run every configured dataset in order.
    pub fn run(&self) -> RunSummary {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        for dataset in self.config.resolved_datasets() {
            match self.run_dataset(&dataset) {
                Ok(report) => summary.reports.push(report),
                Err(error) => {
                    let stop = error.is_internal_error();
                    if error.is_input_error() {
                        log::warn!("{}: skipped, failed to load input: {}", dataset.name, error);
                    } else if matches!(error, HotspotError::Output(_)) {
                        log::error!("{}: {}", dataset.name, error);
                    } else if stop {
                        log::error!("{}: {}, aborting run", dataset.name, error);
                    } else {
                        log::error!("{}: scan failed: {}", dataset.name, error);
                    }
                    summary.failures.push(DatasetFailure {
                        name: dataset.name,
                        error,
                    });
                    if stop {
                        break;
                    }
                }
            }
        }

        summary.elapsed = started.elapsed();
        log::info!(
            "Run finished: {} datasets written, {} failed, total time {:.2?}",
            summary.reports.len(),
            summary.failures.len(),
            summary.elapsed
        );
        summary
    }

    /// Load, scan, filter and write a single dataset.
    pub fn run_dataset(&self, dataset: &ResolvedDataset) -> Result<DatasetReport> {
        let mode = dataset.mode();
        log::info!("{}: starting {:?} scan", dataset.name, mode);

        let reference = self.load(&dataset.reference)?;
        let query = match &dataset.query {
            Some(path) => Some(self.load(path)?),
            None => None,
        };

        let coordinator = ScanCoordinator::new(&self.config.search)
            .with_label(dataset.name.as_str())
            .with_progress(self.progress, self.config.progress_interval);

        let outcome = match &query {
            Some(query) => coordinator.scan(query, &reference)?,
            None => coordinator.self_join(&reference)?,
        };

        let hotspots = outcome.table.into_hotspots();
        let output = self
            .sink
            .write(&dataset.name, &hotspots)
            .map_err(|e| HotspotError::Output(Box::new(e)))?;

        log::info!(
            "{}: {} hotspots among {} query points, time elapsed {} ms, written to {}",
            dataset.name,
            outcome.stats.hotspots,
            outcome.stats.query_points,
            outcome.stats.elapsed_ms,
            output.display()
        );

        Ok(DatasetReport {
            name: dataset.name.clone(),
            mode,
            stats: outcome.stats,
            output,
        })
    }

    fn load(&self, path: &Path) -> Result<PointCollection> {
        self.loader.load_head(path, self.config.max_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use crate::storage::{MemoryLoader, MemorySink};
    use hotspot_types::point::PointId;

    fn cluster() -> PointCollection {
        PointCollection::from_coordinates(vec![
            (39.1000, -84.5000),
            (39.1001, -84.5000),
            (39.1002, -84.5000),
            (39.3000, -84.5000),
        ])
        .unwrap()
    }

    #[test]
    fn test_continues_after_missing_dataset() {
        let mut loader = MemoryLoader::new();
        loader.insert("data/Dayton.csv", cluster());
        let sink = MemorySink::new();

        let config = RunConfig::default().with_datasets(vec![
            DatasetConfig::self_join("Akron"),
            DatasetConfig::self_join("Dayton"),
        ]);
        let summary = Pipeline::new(&config, &loader, &sink).run();

        assert!(!summary.is_success());
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].name, "Akron");
        assert!(summary.failures[0].error.is_input_error());
        assert_eq!(summary.reports.len(), 1);
        assert_eq!(sink.datasets(), vec!["Dayton"]);
    }

    struct ReadOnlySink;

    impl ResultSink for ReadOnlySink {
        fn write(&self, dataset: &str, _table: &crate::scan::ResultTable) -> Result<PathBuf> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("output/{}.csv", dataset),
            )
            .into())
        }
    }

    #[test]
    fn test_write_failure_is_not_an_input_failure() {
        let mut loader = MemoryLoader::new();
        loader.insert("data/Dayton.csv", cluster());
        loader.insert("data/Akron.csv", cluster());
        let config = RunConfig::default().with_datasets(vec![
            DatasetConfig::self_join("Dayton"),
            DatasetConfig::self_join("Akron"),
        ]);

        let summary = Pipeline::new(&config, &loader, &ReadOnlySink).run();

        assert_eq!(summary.failures.len(), 2);
        for failure in &summary.failures {
            assert!(matches!(failure.error, HotspotError::Output(_)));
            assert!(!failure.error.is_input_error());
        }
    }

    #[test]
    fn test_output_only_contains_hotspots() {
        let mut loader = MemoryLoader::new();
        loader.insert("data/Dayton.csv", cluster());
        let sink = MemorySink::new();
        let config = RunConfig::default().with_datasets(vec![DatasetConfig::self_join("Dayton")]);

        let summary = Pipeline::new(&config, &loader, &sink).run();
        assert!(summary.is_success());
        assert_eq!(summary.reports[0].stats.hotspots, 3);

        let table = sink.get("Dayton").unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.get(&PointId::Record(3)).is_none());
    }

    #[test]
    fn test_max_points_truncates_input() {
        let mut loader = MemoryLoader::new();
        loader.insert("data/Dayton.csv", cluster());
        let sink = MemorySink::new();
        let config = RunConfig::default()
            .with_max_points(2)
            .with_datasets(vec![DatasetConfig::self_join("Dayton")]);

        let summary = Pipeline::new(&config, &loader, &sink).run();
        assert_eq!(summary.reports[0].stats.query_points, 2);
        assert_eq!(sink.get("Dayton").unwrap().len(), 2);
    }

    #[test]
    fn test_asymmetric_dataset() {
        let mut loader = MemoryLoader::new();
        loader.insert(
            "data/places.csv",
            PointCollection::new(vec![hotspot_types::point::GeoPoint::new(
                "courthouse",
                39.10005,
                -84.5,
            )])
            .unwrap(),
        );
        loader.insert("data/Cincinnati.csv", cluster());
        let sink = MemorySink::new();
        let config = RunConfig::default().with_datasets(vec![DatasetConfig::asymmetric(
            "Cincinnati",
            "places.csv",
            "Cincinnati.csv",
        )]);

        let summary = Pipeline::new(&config, &loader, &sink).run();
        assert!(summary.is_success());
        assert_eq!(summary.reports[0].mode, ScanMode::Asymmetric);

        let table = sink.get("Cincinnati").unwrap();
        assert_eq!(table.len(), 3);
        for record in table.iter() {
            assert_eq!(record.match_count, 1);
            assert!(record.matches.contains(&PointId::from("courthouse")));
        }
    }
}
