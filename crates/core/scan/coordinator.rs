//! Parallel brute-force scan over a partitioned query set.
//!
//! The query collection is cut into `worker_count` contiguous tasks. Each task
//! runs on its own thread of a pool built for this scan alone, comparing its
//! query points against the whole reference collection. The reference
//! collection is shared read-only and no task touches another task's query
//! points, so workers need no locking. Once every task has finished, the
//! partial tables are merged by identity.
//!
//! A panicking task fails the whole scan; no partial table is returned.

use crate::collection::PointCollection;
use crate::compute::neighbors::within_radius;
use crate::config::SearchConfig;
use crate::error::{HotspotError, Result};
use crate::scan::partition::{ScanTask, partition};
use crate::scan::progress::{NoopProgress, ProgressNotice, ProgressReporter};
use crate::scan::table::{ResultRecord, ResultTable};
use hotspot_types::stats::ScanStats;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

static NOOP_PROGRESS: NoopProgress = NoopProgress;

/// Result table of a scan, holding a record for every query point, plus counters.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub table: ResultTable,
    pub stats: ScanStats,
}

/// Runs radius queries for a whole query collection across a worker pool.
///
/// # Examples
///
/// ```
/// use hotspot::collection::PointCollection;
/// use hotspot::config::SearchConfig;
/// use hotspot::scan::ScanCoordinator;
/// use hotspot_types::point::PointId;
///
/// let points = PointCollection::from_coordinates(vec![
///     (39.1000, -84.5000),
///     (39.1001, -84.5000),
///     (39.5000, -84.5000),
/// ])?;
///
/// let config = SearchConfig::default().with_worker_count(2);
/// let outcome = ScanCoordinator::new(&config).self_join(&points)?;
///
/// let hotspots = outcome.table.into_hotspots();
/// assert_eq!(hotspots.len(), 2);
/// assert!(hotspots.get(&PointId::Record(2)).is_none());
/// # Ok::<(), hotspot::HotspotError>(())
/// ```
pub struct ScanCoordinator<'a> {
    config: &'a SearchConfig,
    label: String,
    progress: &'a dyn ProgressReporter,
    progress_interval: usize,
}

impl<'a> ScanCoordinator<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            label: String::from("scan"),
            progress: &NOOP_PROGRESS,
            progress_interval: 0,
        }
    }

    /// Name used in progress notices and log lines.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Report progress every `interval` query points per task. An interval of
    /// 0 disables reporting.
    pub fn with_progress(mut self, reporter: &'a dyn ProgressReporter, interval: usize) -> Self {
        self.progress = reporter;
        self.progress_interval = interval;
        self
    }

    /// Neighbors of every point drawn from the same collection.
    pub fn self_join(&self, points: &PointCollection) -> Result<ScanOutcome> {
        self.scan(points, points)
    }

    /// Neighbors in `reference` of every point in `query`.
    pub fn scan(&self, query: &PointCollection, reference: &PointCollection) -> Result<ScanOutcome> {
        self.config
            .validate()
            .map_err(HotspotError::InvalidConfig)?;

        let started = Instant::now();
        let workers = self.config.worker_count;

        let ranges = partition(query.len(), workers)?;
        let tasks = ScanTask::split(query, &ranges)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hotspot-worker-{}", i))
            .build()?;

        let partials: Vec<Result<ResultTable>> = pool.install(|| {
            tasks
                .into_par_iter()
                .map(|task| self.run_task(task, reference))
                .collect()
        });

        let mut table = ResultTable::new();
        for partial in partials {
            table.merge(partial?)?;
        }

        if table.len() != query.len() {
            return Err(HotspotError::PartitionViolation(format!(
                "merged {} records for {} query points",
                table.len(),
                query.len()
            )));
        }

        let mut stats = ScanStats::new(query.len(), reference.len(), workers);
        stats.record_hotspots(table.hotspot_count());
        stats.record_elapsed_ms(started.elapsed().as_millis() as u64);

        Ok(ScanOutcome { table, stats })
    }

    fn run_task(&self, task: ScanTask<'_>, reference: &PointCollection) -> Result<ResultTable> {
        let index = task.index;
        panic::catch_unwind(AssertUnwindSafe(|| self.scan_task(task, reference))).unwrap_or_else(
            |payload| {
                Err(HotspotError::WorkerPanicked {
                    task: index,
                    message: panic_message(payload.as_ref()),
                })
            },
        )
    }

    fn scan_task(&self, task: ScanTask<'_>, reference: &PointCollection) -> Result<ResultTable> {
        let total = task.queries.len();
        let mut table = ResultTable::new();

        for (i, point) in task.queries.iter().enumerate() {
            let completed = i + 1;
            let timed = (self.progress_interval > 0 && completed % self.progress_interval == 0)
                .then(Instant::now);

            let matches = within_radius(point, reference, self.config);

            if let Some(query_started) = timed {
                let left = u32::try_from(total - completed).unwrap_or(u32::MAX);
                self.progress.report(&ProgressNotice {
                    label: &self.label,
                    task: task.index,
                    completed,
                    total,
                    estimated_remaining: query_started.elapsed().saturating_mul(left),
                });
            }

            table.insert(ResultRecord::new(point.id().clone(), matches))?;
        }

        log::debug!(
            "{}: task {} scanned positions {}..{} ({} hotspots)",
            self.label,
            task.index,
            task.range.start,
            task.range.end,
            table.hotspot_count()
        );

        Ok(table)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
