//! CSV point loader.

use super::DatasetLoader;
use crate::collection::PointCollection;
use crate::config::ColumnConfig;
use crate::error::{HotspotError, Result};
use hotspot_types::point::{GeoPoint, PointId};
use std::path::Path;

/// Reads points from a CSV file with a header row.
///
/// Latitude and longitude are located by header name. With an id column the
/// column value is the point's identity, otherwise the zero-based record
/// index is.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    columns: ColumnConfig,
}

impl CsvLoader {
    pub fn new(columns: ColumnConfig) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &ColumnConfig {
        &self.columns
    }
}

impl DatasetLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<PointCollection> {
        self.read(path, None)
    }

    fn load_head(&self, path: &Path, limit: Option<usize>) -> Result<PointCollection> {
        self.read(path, limit)
    }
}

impl CsvLoader {
    fn read(&self, path: &Path, limit: Option<usize>) -> Result<PointCollection> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let position = |column: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| HotspotError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                })
        };

        let lat_col = position(&self.columns.latitude)?;
        let lon_col = position(&self.columns.longitude)?;
        let id_col = self.columns.id.as_deref().map(position).transpose()?;

        let mut points = Vec::new();
        let rows = reader.records().take(limit.unwrap_or(usize::MAX));
        for (row, record) in rows.enumerate() {
            let record = record?;

            let latitude = parse_coordinate(&record, lat_col, row, &self.columns.latitude)?;
            let longitude = parse_coordinate(&record, lon_col, row, &self.columns.longitude)?;

            let id = match id_col {
                Some(col) => match record.get(col) {
                    Some(value) if !value.is_empty() => PointId::Named(value.to_string()),
                    _ => {
                        return Err(HotspotError::InvalidInput(format!(
                            "Row {}: empty identity",
                            row
                        )));
                    }
                },
                None => PointId::Record(row as u64),
            };

            points.push(GeoPoint::new(id, latitude, longitude));
        }

        log::debug!("Loaded {} points from {}", points.len(), path.display());
        PointCollection::new(points)
    }
}

fn parse_coordinate(record: &csv::StringRecord, col: usize, row: usize, name: &str) -> Result<f64> {
    let raw = record.get(col).unwrap_or_default();
    raw.parse::<f64>().map_err(|_| {
        HotspotError::InvalidInput(format!("Row {}: cannot parse {} value '{}'", row, name, raw))
    })
}
