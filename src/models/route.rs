use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// An intermediate stop submitted to the route provider for visiting-order
/// optimization. `id` is the 1-based position in the input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ViaPoint {
    pub id: u32,
    pub name: String,
    pub coordinates: Coordinates,
    pub dwell_time_seconds: u32,
}

impl ViaPoint {
    pub fn new(id: u32, name: String, coordinates: Coordinates, dwell_time_seconds: u32) -> Self {
        ViaPoint {
            id,
            name,
            coordinates,
            dwell_time_seconds,
        }
    }
}

/// One visited stop in the provider's optimized order. `index` is the
/// provider-assigned visiting order (1-based), which may differ from the
/// input order of the via-points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePoint {
    #[serde(rename = "pointId")]
    pub index: u32,
    #[serde(rename = "pointName")]
    pub name: String,
    #[serde(rename = "pointLatitude")]
    pub latitude: f64,
    #[serde(rename = "pointLongitude")]
    pub longitude: f64,
}

/// One leg between consecutive stops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePath {
    #[serde(rename = "pathId")]
    pub index: u32,
    #[serde(rename = "pathTime")]
    pub travel_time: f64,
    #[serde(rename = "pathDistance")]
    pub travel_distance: f64,
    #[serde(rename = "pathFare")]
    pub fare: f64,
}

/// Whole-route metrics: the four ranking criteria before normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteProperties {
    pub total_distance: f64,
    pub total_time: f64,
    pub total_fare: f64,
    /// Sum of catalog quality scores of the non-anchor places in the route.
    pub place_score: f64,
}

/// One fully built, unscaled route proposal for one place combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCandidate {
    pub properties: RouteProperties,
    pub points: Vec<RoutePoint>,
    pub paths: Vec<RoutePath>,
    /// Concatenated `[lng, lat]` polyline of all legs, in travel order.
    pub line_coordinates: Vec<[f64; 2]>,
}

/// Min-max normalized sub-scores, each in [0, 1]. Only meaningful relative
/// to the batch of candidates they were scaled against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaledProperties {
    pub scaled_distance: f64,
    pub scaled_time: f64,
    pub scaled_fare: f64,
    pub scaled_place_score: f64,
}

/// Final ranked unit: a candidate plus its scaled sub-scores and total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRouteCandidate {
    pub properties: RouteProperties,
    pub scaled_properties: ScaledProperties,
    /// Sum of the four scaled sub-scores, in [0, 4].
    pub total_route_score: f64,
    pub points: Vec<RoutePoint>,
    pub paths: Vec<RoutePath>,
    pub line_coordinates: Vec<[f64; 2]>,
}

// Request/Response types for API endpoints

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRoutesRequest {
    pub start_place: String,
    pub end_place: String,
    pub region: String,
    /// The fixed festival destination every combination must end at.
    pub anchor_place: String,
    #[serde(default = "default_combo_size")]
    pub combo_size: usize,
    #[serde(default = "default_combo_pool_size")]
    pub combo_pool_size: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_combo_size() -> usize {
    3
}

fn default_combo_pool_size() -> usize {
    5
}

fn default_top_k() -> usize {
    3
}

impl TopRoutesRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.start_place.trim().is_empty() {
            return Err("startPlace must not be empty".to_string());
        }
        if self.end_place.trim().is_empty() {
            return Err("endPlace must not be empty".to_string());
        }
        if self.region.trim().is_empty() {
            return Err("region must not be empty".to_string());
        }
        if self.anchor_place.trim().is_empty() {
            return Err("anchorPlace must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub routes: Vec<ScaledRouteCandidate>,
}
