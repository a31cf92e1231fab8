//! Observational progress notices emitted by workers during a scan.

use std::time::Duration;

/// A snapshot of one worker's progress through its task.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressNotice<'a> {
    /// Dataset being scanned
    pub label: &'a str,
    /// Task index within the scan
    pub task: usize,
    pub completed: usize,
    pub total: usize,
    /// Duration of the last query times the number of queries left in the task
    pub estimated_remaining: Duration,
}

/// Receives progress notices. Called concurrently from every worker; must not
/// influence results.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, notice: &ProgressNotice<'_>);
}

impl<F> ProgressReporter for F
where
    F: Fn(&ProgressNotice<'_>) + Send + Sync,
{
    fn report(&self, notice: &ProgressNotice<'_>) {
        self(notice)
    }
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _notice: &ProgressNotice<'_>) {}
}

/// Writes notices to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, notice: &ProgressNotice<'_>) {
        log::info!(
            "{} -- task {} -- {}/{} -- ~{:.1}s left",
            notice.label,
            notice.task,
            notice.completed,
            notice.total,
            notice.estimated_remaining.as_secs_f64()
        );
    }
}
