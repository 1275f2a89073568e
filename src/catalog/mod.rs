use crate::error::{AppError, Result};
use crate::models::{PlaceCategory, PlaceRecord};
use std::collections::HashMap;
use std::path::Path;

/// In-memory, per-region index over the curated place dataset.
///
/// Loaded once at startup and read-only afterwards, so it is safely shared
/// across concurrent recommendation batches without locking.
pub struct PlaceCatalog {
    records: Vec<PlaceRecord>,
    /// (region, name) -> position in `records`.
    by_region_name: HashMap<(String, String), usize>,
}

impl PlaceCatalog {
    pub fn from_records(records: Vec<PlaceRecord>) -> Self {
        let by_region_name = records
            .iter()
            .enumerate()
            .map(|(idx, r)| ((r.region.clone(), r.name.clone()), idx))
            .collect();

        PlaceCatalog {
            records,
            by_region_name,
        }
    }

    /// Load the dataset from a JSON array file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::CatalogLoad(format!("{}: {}", path.display(), e)))?;
        let records: Vec<PlaceRecord> = serde_json::from_str(&raw)
            .map_err(|e| AppError::CatalogLoad(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            records = records.len(),
            path = %path.display(),
            "Loaded place catalog from {}",
            path.display()
        );
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `k` records with the highest quality score for `region` and
    /// `category`. Ties keep catalog insertion order; fewer than `k` records
    /// are returned when the category is thin. Callers tolerate empty lists
    /// (they just yield fewer combinations).
    pub fn filtered_top(&self, region: &str, category: PlaceCategory, k: usize) -> Vec<&PlaceRecord> {
        let mut filtered: Vec<&PlaceRecord> = self
            .records
            .iter()
            .filter(|r| r.region == region && r.category == category)
            .collect();

        // Stable sort: equal scores keep insertion order.
        filtered.sort_by(|a, b| {
            b.quality_score
                .partial_cmp(&a.quality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        filtered.truncate(k);
        filtered
    }

    pub fn find(&self, region: &str, name: &str) -> Option<&PlaceRecord> {
        self.by_region_name
            .get(&(region.to_string(), name.to_string()))
            .map(|&idx| &self.records[idx])
    }

    pub fn quality_score(&self, region: &str, name: &str) -> Option<f64> {
        self.find(region, name).map(|r| r.quality_score)
    }
}
