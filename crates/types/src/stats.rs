use serde::{Deserialize, Serialize};

/// Counters describing one completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of query points scanned
    pub query_points: usize,
    /// Number of reference points each query was compared against
    pub reference_points: usize,
    /// Number of worker tasks the query set was split into
    pub workers: usize,
    /// Total pairwise distance evaluations
    pub comparisons: u64,
    /// Query points with at least one match
    pub hotspots: usize,
    /// Wall-clock duration of the scan in milliseconds
    pub elapsed_ms: u64,
}

impl ScanStats {
    pub fn new(query_points: usize, reference_points: usize, workers: usize) -> Self {
        Self {
            query_points,
            reference_points,
            workers,
            comparisons: query_points as u64 * reference_points as u64,
            ..Self::default()
        }
    }

    pub fn record_hotspots(&mut self, hotspots: usize) {
        self.hotspots = hotspots;
    }

    pub fn record_elapsed_ms(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = elapsed_ms;
    }
}
