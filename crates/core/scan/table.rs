//! Per-query result records and the identity-keyed result table.

use crate::compute::neighbors::MatchSet;
use crate::error::{HotspotError, Result};
use hotspot_types::point::PointId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Neighbors found for one query point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub id: PointId,
    pub match_count: usize,
    pub matches: MatchSet,
}

impl ResultRecord {
    pub fn new(id: PointId, matches: MatchSet) -> Self {
        Self {
            id,
            match_count: matches.len(),
            matches,
        }
    }

    /// A query point with at least one neighbor.
    #[inline]
    pub fn is_hotspot(&self) -> bool {
        self.match_count > 0
    }
}

/// Result records keyed by query identity, iterated in identity order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    records: BTreeMap<PointId, ResultRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. A second record for the same identity is a partition
    /// violation: two workers were handed the same query point.
    pub fn insert(&mut self, record: ResultRecord) -> Result<()> {
        if self.records.contains_key(&record.id) {
            return Err(HotspotError::PartitionViolation(format!(
                "query point {} was scanned more than once",
                record.id
            )));
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Disjoint union with another table. Fails on the first shared identity
    /// instead of overwriting.
    pub fn merge(&mut self, other: ResultTable) -> Result<()> {
        for record in other.records.into_values() {
            self.insert(record)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &PointId) -> Option<&ResultRecord> {
        self.records.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.values()
    }

    pub fn hotspot_count(&self) -> usize {
        self.records.values().filter(|r| r.is_hotspot()).count()
    }

    /// Drop every record without matches.
    pub fn into_hotspots(mut self) -> Self {
        self.records.retain(|_, record| record.is_hotspot());
        self
    }
}

impl IntoIterator for ResultTable {
    type Item = ResultRecord;
    type IntoIter = std::collections::btree_map::IntoValues<PointId, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, matches: &[u64]) -> ResultRecord {
        ResultRecord::new(
            PointId::Record(id),
            matches.iter().map(|&m| PointId::Record(m)).collect(),
        )
    }

    #[test]
    fn test_record_counts_matches() {
        let r = record(1, &[2, 3, 3]);
        assert_eq!(r.match_count, 2);
        assert!(r.is_hotspot());
        assert!(!record(4, &[]).is_hotspot());
    }

    #[test]
    fn test_merge_disjoint() {
        let mut left = ResultTable::new();
        left.insert(record(0, &[1])).unwrap();
        let mut right = ResultTable::new();
        right.insert(record(1, &[0])).unwrap();
        right.insert(record(2, &[])).unwrap();

        left.merge(right).unwrap();
        assert_eq!(left.len(), 3);
        assert_eq!(left.hotspot_count(), 2);
    }

    #[test]
    fn test_merge_conflict_fails_loudly() {
        let mut left = ResultTable::new();
        left.insert(record(0, &[1])).unwrap();
        let mut right = ResultTable::new();
        right.insert(record(0, &[])).unwrap();

        let err = left.merge(right).unwrap_err();
        assert!(matches!(err, HotspotError::PartitionViolation(_)));
        assert_eq!(left.get(&PointId::Record(0)).unwrap().match_count, 1);
    }

    #[test]
    fn test_into_hotspots_filters_empty_records() {
        let mut table = ResultTable::new();
        table.insert(record(0, &[1])).unwrap();
        table.insert(record(1, &[0])).unwrap();
        table.insert(record(2, &[])).unwrap();

        let hotspots = table.into_hotspots();
        assert_eq!(hotspots.len(), 2);
        assert!(hotspots.get(&PointId::Record(2)).is_none());
        assert!(hotspots.iter().all(|r| r.match_count > 0));
    }
}
