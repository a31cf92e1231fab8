//! Work partitioning, parallel scan coordination and result tables.

pub mod coordinator;
pub mod partition;
pub mod progress;
pub mod table;

pub use coordinator::{ScanCoordinator, ScanOutcome};
pub use partition::{ScanTask, partition, verify_partition};
pub use progress::{LogProgress, NoopProgress, ProgressNotice, ProgressReporter};
pub use table::{ResultRecord, ResultTable};
