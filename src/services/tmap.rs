use crate::error::{AppError, Result};
use crate::models::{Coordinates, Poi, ViaPoint};
use crate::services::providers::{PoiProvider, RouteFeatureCollection, RouteProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const TMAP_BASE_URL: &str = "https://apis.openapi.sk.com/tmap";

/// Number of via-points the routeOptimization endpoint variant accepts.
const ROUTE_OPTIMIZATION_VARIANT: u32 = 10;

#[derive(Clone)]
pub struct TmapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmapClient {
    pub fn new(api_key: String) -> Self {
        TmapClient {
            client: Client::new(),
            api_key,
            base_url: TMAP_BASE_URL.to_string(),
        }
    }

    /// Point the client at a proxy or test server instead of the real API.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        TmapClient {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl PoiProvider for TmapClient {
    /// Keyword POI search. Every failure mode — transport error, non-2xx
    /// status, unparseable body, empty result — reads as "no match" so a
    /// flaky lookup never takes down a whole batch.
    async fn search_poi(&self, keyword: &str, region: Option<&str>) -> Result<Option<Poi>> {
        let phrase = match region {
            Some(region) => format!("{} {}", region, keyword),
            None => keyword.to_string(),
        };
        let url = format!("{}/pois", self.base_url);

        tracing::debug!(phrase = %phrase, "TMAP POI search: {}", phrase);

        let response = match self
            .client
            .get(&url)
            .query(&[("version", "1"), ("searchKeyword", phrase.as_str())])
            .header("appKey", &self.api_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(phrase = %phrase, "TMAP POI request failed: {}", e);
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                phrase = %phrase,
                "TMAP POI search returned HTTP {}",
                response.status()
            );
            return Ok(None);
        }

        let body: PoiSearchResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(phrase = %phrase, "TMAP POI response not parseable: {}", e);
                return Ok(None);
            }
        };

        let Some(first) = body
            .search_poi_info
            .and_then(|info| info.pois.poi.into_iter().next())
        else {
            tracing::debug!(phrase = %phrase, "TMAP POI search found no match");
            return Ok(None);
        };

        // Coordinates arrive as decimal strings.
        let (Ok(lat), Ok(lng)) = (
            first.noor_lat.trim().parse::<f64>(),
            first.noor_lon.trim().parse::<f64>(),
        ) else {
            tracing::warn!(name = %first.name, "TMAP POI has unparseable coordinates");
            return Ok(None);
        };

        match Coordinates::new(lat, lng) {
            Ok(coordinates) => Ok(Some(Poi::new(first.name, coordinates))),
            Err(e) => {
                tracing::warn!(name = %first.name, "TMAP POI has invalid coordinates: {}", e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl RouteProvider for TmapClient {
    /// Via-point order optimization. Unlike POI lookup, failures here are
    /// surfaced as errors so the caller can drop the affected candidate.
    async fn optimize_route(
        &self,
        start: &Poi,
        end: &Poi,
        via_points: &[ViaPoint],
    ) -> Result<RouteFeatureCollection> {
        let url = format!(
            "{}/routes/routeOptimization{}?version=1&format=json",
            self.base_url, ROUTE_OPTIMIZATION_VARIANT
        );

        let body = OptimizationRequest::new(start, end, via_points);

        tracing::debug!(
            via_points = via_points.len(),
            "TMAP route optimization request: {} via-points",
            via_points.len()
        );

        let response = self
            .client
            .post(&url)
            .header("appKey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TmapApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                via_points = via_points.len(),
                "TMAP route optimization HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::TmapApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let collection: RouteFeatureCollection = response
            .json()
            .await
            .map_err(|e| AppError::TmapApi(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(
            features = collection.features.len(),
            distance = collection.properties.total_distance,
            "TMAP optimized route: {} features, {}m",
            collection.features.len(),
            collection.properties.total_distance
        );
        Ok(collection)
    }
}

// TMAP wire types

#[derive(Debug, Deserialize)]
struct PoiSearchResponse {
    #[serde(rename = "searchPoiInfo")]
    search_poi_info: Option<SearchPoiInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchPoiInfo {
    pois: PoiList,
}

#[derive(Debug, Deserialize)]
struct PoiList {
    #[serde(default)]
    poi: Vec<PoiEntry>,
}

#[derive(Debug, Deserialize)]
struct PoiEntry {
    name: String,
    #[serde(rename = "noorLat")]
    noor_lat: String,
    #[serde(rename = "noorLon")]
    noor_lon: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizationRequest {
    req_coord_type: &'static str,
    res_coord_type: &'static str,
    start_name: &'static str,
    start_x: String,
    start_y: String,
    end_name: &'static str,
    end_x: String,
    end_y: String,
    end_poi_id: &'static str,
    search_option: &'static str,
    /// Fare class; "0" is a passenger car.
    car_type: &'static str,
    via_points: Vec<ViaPointPayload>,
}

impl OptimizationRequest {
    fn new(start: &Poi, end: &Poi, via_points: &[ViaPoint]) -> Self {
        OptimizationRequest {
            req_coord_type: "WGS84GEO",
            res_coord_type: "WGS84GEO",
            start_name: "출발",
            start_x: start.coordinates.lng.to_string(),
            start_y: start.coordinates.lat.to_string(),
            end_name: "도착",
            end_x: end.coordinates.lng.to_string(),
            end_y: end.coordinates.lat.to_string(),
            end_poi_id: "",
            search_option: "0",
            car_type: "0",
            via_points: via_points.iter().map(ViaPointPayload::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ViaPointPayload {
    via_point_id: String,
    via_point_name: String,
    via_detail_address: &'static str,
    via_x: String,
    via_y: String,
    via_poi_id: &'static str,
    via_time: u32,
    wish_start_time: &'static str,
    wish_end_time: &'static str,
}

impl From<&ViaPoint> for ViaPointPayload {
    fn from(via: &ViaPoint) -> Self {
        ViaPointPayload {
            via_point_id: via.id.to_string(),
            via_point_name: via.name.clone(),
            via_detail_address: "",
            via_x: via.coordinates.lng.to_string(),
            via_y: via.coordinates.lat.to_string(),
            via_poi_id: "",
            via_time: via.dwell_time_seconds,
            wish_start_time: "",
            wish_end_time: "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_override() {
        let client = TmapClient::with_base_url(
            "my-key".to_string(),
            "http://localhost:4000/tmap".to_string(),
        );
        assert_eq!(client.base_url, "http://localhost:4000/tmap");
    }

    #[test]
    fn test_poi_search_response_parsing() {
        let json = serde_json::json!({
            "searchPoiInfo": {
                "totalCount": "2",
                "pois": {
                    "poi": [
                        {"name": "백제문화단지", "noorLat": "36.3061", "noorLon": "126.9065"},
                        {"name": "백제문화단지 주차장", "noorLat": "36.3070", "noorLon": "126.9060"}
                    ]
                }
            }
        });

        let response: PoiSearchResponse = serde_json::from_value(json).unwrap();
        let first = response
            .search_poi_info
            .unwrap()
            .pois
            .poi
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(first.name, "백제문화단지");
        assert_eq!(first.noor_lat, "36.3061");
    }

    #[test]
    fn test_empty_poi_search_response_parses() {
        let response: PoiSearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.search_poi_info.is_none());
    }

    #[test]
    fn test_optimization_request_wire_names() {
        let start = Poi::new(
            "출발지".to_string(),
            Coordinates::new(36.3622, 127.3561).unwrap(),
        );
        let end = start.clone();
        let via = vec![ViaPoint::new(
            1,
            "궁남지".to_string(),
            Coordinates::new(36.2714, 126.9079).unwrap(),
            600,
        )];

        let request = OptimizationRequest::new(&start, &end, &via);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["reqCoordType"], "WGS84GEO");
        assert_eq!(json["startX"], "127.3561");
        assert_eq!(json["viaPoints"][0]["viaPointId"], "1");
        assert_eq!(json["viaPoints"][0]["viaPointName"], "궁남지");
        assert_eq!(json["viaPoints"][0]["viaTime"], 600);
        assert_eq!(json["viaPoints"][0]["viaDetailAddress"], "");
    }
}
