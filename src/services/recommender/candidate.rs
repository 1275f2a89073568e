use crate::catalog::PlaceCatalog;
use crate::models::{Poi, RouteCandidate, RoutePath, RoutePoint, RouteProperties, ViaPoint};
use crate::services::poi_resolver::PoiResolver;
use crate::services::providers::{FeatureGeometry, RouteFeatureCollection, RouteProvider};
use crate::services::recommender::combinations::PlaceCombination;
use std::sync::Arc;

/// Turns one place combination into a structured route candidate by
/// resolving its stops, calling the route-optimization provider, and
/// extracting points, legs, and the place-quality sub-score.
pub struct CandidateBuilder {
    catalog: Arc<PlaceCatalog>,
    resolver: Arc<PoiResolver>,
    route_provider: Arc<dyn RouteProvider>,
    via_dwell_time_seconds: u32,
}

impl CandidateBuilder {
    pub fn new(
        catalog: Arc<PlaceCatalog>,
        resolver: Arc<PoiResolver>,
        route_provider: Arc<dyn RouteProvider>,
        via_dwell_time_seconds: u32,
    ) -> Self {
        CandidateBuilder {
            catalog,
            resolver,
            route_provider,
            via_dwell_time_seconds,
        }
    }

    /// Build one candidate. `None` means dropped: the anchor did not
    /// resolve, the provider call failed, or the payload was malformed.
    /// Drops never abort the batch; the caller simply gets fewer candidates.
    pub async fn build(
        &self,
        combination: &PlaceCombination,
        start: &Poi,
        end: &Poi,
        region: &str,
    ) -> Option<RouteCandidate> {
        // Unresolved non-anchor stops are dropped from the via-list so they
        // never count toward the place score of a route they are not on.
        let mut via_points: Vec<ViaPoint> = Vec::with_capacity(combination.stops.len() + 1);
        let mut resolved_stops: Vec<&str> = Vec::with_capacity(combination.stops.len());
        for name in &combination.stops {
            match self.resolver.resolve(name, region).await {
                Some(poi) => {
                    via_points.push(ViaPoint::new(
                        via_points.len() as u32 + 1,
                        name.clone(),
                        poi.coordinates,
                        self.via_dwell_time_seconds,
                    ));
                    resolved_stops.push(name);
                }
                None => {
                    tracing::debug!(place = %name, "Dropping unresolved via-point");
                }
            }
        }

        // The anchor is mandatory: without it the itinerary is meaningless.
        let Some(anchor_poi) = self.resolver.resolve(&combination.anchor, region).await else {
            tracing::debug!(
                anchor = %combination.anchor,
                "Abandoning combination: anchor unresolved"
            );
            return None;
        };
        via_points.push(ViaPoint::new(
            via_points.len() as u32 + 1,
            combination.anchor.clone(),
            anchor_poi.coordinates,
            self.via_dwell_time_seconds,
        ));

        let collection = match self
            .route_provider
            .optimize_route(start, end, &via_points)
            .await
        {
            Ok(collection) => collection,
            Err(e) => {
                tracing::debug!(
                    anchor = %combination.anchor,
                    "Dropping candidate: route provider call failed: {}",
                    e
                );
                return None;
            }
        };

        let (points, paths, line_coordinates) = extract_features(&collection);
        if points.is_empty() || paths.is_empty() {
            tracing::debug!(
                anchor = %combination.anchor,
                "Dropping candidate: provider payload has no usable features"
            );
            return None;
        }

        let place_score = self.place_score(region, &resolved_stops);

        Some(RouteCandidate {
            properties: RouteProperties {
                total_distance: collection.properties.total_distance,
                total_time: collection.properties.total_time,
                total_fare: collection.properties.total_fare,
                place_score,
            },
            points,
            paths,
            line_coordinates,
        })
    }

    /// Sum of catalog quality scores over the non-anchor stops that
    /// actually made it onto the route.
    fn place_score(&self, region: &str, resolved_stops: &[&str]) -> f64 {
        resolved_stops
            .iter()
            .map(|name| {
                self.catalog.quality_score(region, name).unwrap_or_else(|| {
                    tracing::debug!(place = %name, "Place missing from catalog, scoring as 0");
                    0.0
                })
            })
            .sum()
    }
}

/// Split the provider's feature collection into visited stops (ordered by
/// the provider-assigned visiting index), legs, and the concatenated
/// polyline of all leg geometries.
fn extract_features(
    collection: &RouteFeatureCollection,
) -> (Vec<RoutePoint>, Vec<RoutePath>, Vec<[f64; 2]>) {
    let mut points = Vec::new();
    let mut paths = Vec::new();
    let mut line_coordinates = Vec::new();

    for feature in &collection.features {
        match &feature.geometry {
            FeatureGeometry::Point { coordinates } => {
                points.push(RoutePoint {
                    index: feature.properties.index,
                    name: short_name(&feature.properties.via_point_name),
                    latitude: coordinates[1],
                    longitude: coordinates[0],
                });
            }
            FeatureGeometry::LineString { coordinates } => {
                paths.push(RoutePath {
                    index: feature.properties.index,
                    travel_time: feature.properties.time,
                    travel_distance: feature.properties.distance,
                    fare: feature.properties.fare,
                });
                line_coordinates.extend(coordinates.iter().copied());
            }
        }
    }

    // The visiting index is the optimized order, not the input order.
    points.sort_by_key(|point| point.index);
    (points, paths, line_coordinates)
}

/// The provider prefixes the visiting order onto the via-point name
/// ("3 궁남지"); keep only the final token.
fn short_name(raw: &str) -> String {
    raw.split_whitespace().last().unwrap_or(raw).to_string()
}
