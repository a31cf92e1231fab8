//! Contiguous, near-equal splitting of a query collection into worker tasks.

use crate::collection::PointCollection;
use crate::error::{HotspotError, Result};
use hotspot_types::point::GeoPoint;
use std::ops::Range;

/// Split `len` positions into `parts` contiguous ranges.
///
/// Ranges are in position order and differ in size by at most one: the first
/// `len % parts` ranges hold `⌈len / parts⌉` positions, the rest hold
/// `⌊len / parts⌋`. When `parts > len` the trailing ranges are empty.
///
/// # Examples
///
/// ```
/// use hotspot::scan::partition::partition;
///
/// let ranges = partition(10, 4)?;
/// assert_eq!(ranges, vec![0..3, 3..6, 6..8, 8..10]);
/// # Ok::<(), hotspot::HotspotError>(())
/// ```
pub fn partition(len: usize, parts: usize) -> Result<Vec<Range<usize>>> {
    if parts == 0 {
        return Err(HotspotError::InvalidConfig(
            "Cannot partition into zero parts".to_string(),
        ));
    }

    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let size = if part < extra { base + 1 } else { base };
        ranges.push(start..start + size);
        start += size;
    }

    Ok(ranges)
}

/// Check that `ranges` tile `0..len` exactly once, in order.
///
/// A failure means the merge step cannot be trusted.
pub fn verify_partition(ranges: &[Range<usize>], len: usize) -> Result<()> {
    let mut expected_start = 0;
    for (i, range) in ranges.iter().enumerate() {
        if range.start != expected_start {
            return Err(HotspotError::PartitionViolation(format!(
                "range {} starts at {} but previous range ended at {}",
                i, range.start, expected_start
            )));
        }
        if range.end < range.start {
            return Err(HotspotError::PartitionViolation(format!(
                "range {} is inverted ({}..{})",
                i, range.start, range.end
            )));
        }
        expected_start = range.end;
    }

    if expected_start != len {
        return Err(HotspotError::PartitionViolation(format!(
            "ranges cover {} of {} query points",
            expected_start, len
        )));
    }

    Ok(())
}

/// One contiguous block of query points assigned to a single worker.
#[derive(Debug, Clone)]
pub struct ScanTask<'a> {
    pub index: usize,
    pub range: Range<usize>,
    pub queries: &'a [GeoPoint],
}

impl<'a> ScanTask<'a> {
    /// Cut `query` into one task per range.
    pub fn split(query: &'a PointCollection, ranges: &[Range<usize>]) -> Result<Vec<Self>> {
        verify_partition(ranges, query.len())?;

        ranges
            .iter()
            .enumerate()
            .map(|(index, range)| {
                let queries = query.slice(range.clone()).ok_or_else(|| {
                    HotspotError::PartitionViolation(format!(
                        "range {}..{} is outside the query set",
                        range.start, range.end
                    ))
                })?;
                Ok(Self {
                    index,
                    range: range.clone(),
                    queries,
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
