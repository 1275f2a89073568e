use crate::error::Result;
use crate::models::{Poi, ViaPoint};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

/// Outbound POI-lookup boundary.
#[async_trait]
pub trait PoiProvider: Send + Sync {
    /// First match for a search phrase (place name, optionally scoped to a
    /// region). `Ok(None)` means no match; transport-level failures may be
    /// surfaced as errors, but callers treat both as "unresolved".
    async fn search_poi(&self, keyword: &str, region: Option<&str>) -> Result<Option<Poi>>;
}

/// Outbound route-optimization boundary: submits start/end plus ordered
/// via-points, gets back an optimized visiting order with per-leg metrics.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn optimize_route(
        &self,
        start: &Poi,
        end: &Poi,
        via_points: &[ViaPoint],
    ) -> Result<RouteFeatureCollection>;
}

// Provider response types. The optimization provider answers with a feature
// collection of Point features (visited stops, in optimized order) and
// LineString features (legs). Any other shape fails to parse, which drops
// the candidate.

#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeatureCollection {
    pub properties: RouteTotals,
    pub features: Vec<RouteFeature>,
}

/// Whole-route totals. The provider serializes numbers as strings in
/// places, hence the tolerant decoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTotals {
    #[serde(default, deserialize_with = "flexible_f64")]
    pub total_distance: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub total_time: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub total_fare: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteFeature {
    pub geometry: FeatureGeometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum FeatureGeometry {
    Point {
        /// `[lng, lat]`
        coordinates: [f64; 2],
    },
    LineString {
        /// `[lng, lat]` pairs
        coordinates: Vec<[f64; 2]>,
    },
}

/// Union of Point and LineString feature properties; absent fields default
/// to zero / empty rather than failing the parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    /// Visiting order for Point features, segment index for LineStrings.
    #[serde(default, deserialize_with = "flexible_u32")]
    pub index: u32,
    #[serde(default, rename = "viaPointName")]
    pub via_point_name: String,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub time: f64,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub distance: f64,
    #[serde(default, rename = "Fare", deserialize_with = "flexible_f64")]
    pub fare: f64,
}

pub(crate) fn flexible_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) if s.trim().is_empty() => Ok(0.0),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub(crate) fn flexible_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u32),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) if s.trim().is_empty() => Ok(0),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
