//! Error types for the hotspot engine.

use hotspot_types::point::PointId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HotspotError>;

#[derive(Debug, Error)]
pub enum HotspotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Duplicate point identity: {0}")]
    DuplicateIdentity(PointId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Partition invariant violated: {0}")]
    PartitionViolation(String),

    #[error("Worker for task {task} panicked: {message}")]
    WorkerPanicked { task: usize, message: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to write results: {0}")]
    Output(#[source] Box<HotspotError>),
}

impl HotspotError {
    /// True for failures caused by the data being scanned rather than by the
    /// engine. A run skips the affected dataset and moves on.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::Csv(_)
                | Self::InvalidInput(_)
                | Self::MissingColumn { .. }
                | Self::DuplicateIdentity(_)
        )
    }

    /// True when the engine itself can no longer be trusted. A run stops at
    /// the first such error.
    pub fn is_internal_error(&self) -> bool {
        matches!(self, Self::PartitionViolation(_))
    }
}
