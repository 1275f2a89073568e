use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Cafe,
    Restaurant,
    Attraction,
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Attraction => "attraction",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cafe" | "café" => Ok(PlaceCategory::Cafe),
            "restaurant" => Ok(PlaceCategory::Restaurant),
            "attraction" | "landmark" => Ok(PlaceCategory::Attraction),
            _ => Err(format!("Invalid place category: {}", s)),
        }
    }
}

/// One row of the curated place dataset. Loaded once at catalog
/// construction and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub region: String,
    pub name: String,
    pub category: PlaceCategory,
    /// Curated quality score (higher = better); feeds the place sub-score.
    pub quality_score: f64,
    /// Known coordinates, when the dataset carries them. Lets the
    /// local-first resolution strategy skip the external POI lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl PlaceRecord {
    pub fn new(region: &str, name: &str, category: PlaceCategory, quality_score: f64) -> Self {
        PlaceRecord {
            region: region.to_string(),
            name: name.to_string(),
            category,
            quality_score,
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}
