#![allow(dead_code)]

use async_trait::async_trait;
use festiroute::catalog::PlaceCatalog;
use festiroute::config::{RecommenderConfig, ResolutionStrategy};
use festiroute::error::{AppError, Result};
use festiroute::models::{Coordinates, PlaceCategory, PlaceRecord, Poi, ViaPoint};
use festiroute::services::poi_resolver::PoiResolver;
use festiroute::services::providers::{
    FeatureGeometry, FeatureProperties, PoiProvider, RouteFeature, RouteFeatureCollection,
    RouteProvider, RouteTotals,
};
use festiroute::services::recommender::RouteRecommender;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Catalog fixture: region 부여 with cafés [A, B], restaurant [C],
/// attractions [D, E, F]. No coordinates, so resolution always exercises
/// the (mock) external provider.
pub fn sample_catalog() -> PlaceCatalog {
    PlaceCatalog::from_records(vec![
        PlaceRecord::new("부여", "A", PlaceCategory::Cafe, 4.0),
        PlaceRecord::new("부여", "B", PlaceCategory::Cafe, 3.9),
        PlaceRecord::new("부여", "C", PlaceCategory::Restaurant, 4.5),
        PlaceRecord::new("부여", "D", PlaceCategory::Attraction, 4.8),
        PlaceRecord::new("부여", "E", PlaceCategory::Attraction, 4.6),
        PlaceRecord::new("부여", "F", PlaceCategory::Attraction, 4.4),
    ])
}

/// Resolves every name to deterministic coordinates derived from the name,
/// except names registered as unresolvable. Every lookup keyword is logged
/// so tests can assert which names were searched, and how often.
pub struct StaticPoiProvider {
    unresolvable: HashSet<String>,
    pub searches: Mutex<Vec<String>>,
}

impl StaticPoiProvider {
    pub fn new() -> Self {
        StaticPoiProvider {
            unresolvable: HashSet::new(),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_unresolvable(names: &[&str]) -> Self {
        StaticPoiProvider {
            unresolvable: names.iter().map(|n| n.to_string()).collect(),
            searches: Mutex::new(Vec::new()),
        }
    }

    /// How many times `keyword` was searched.
    pub fn search_count(&self, keyword: &str) -> usize {
        self.searches
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.as_str() == keyword)
            .count()
    }
}

#[async_trait]
impl PoiProvider for StaticPoiProvider {
    async fn search_poi(&self, keyword: &str, _region: Option<&str>) -> Result<Option<Poi>> {
        self.searches.lock().unwrap().push(keyword.to_string());
        if self.unresolvable.contains(keyword) {
            return Ok(None);
        }
        let offset = keyword.bytes().map(|b| b as u64).sum::<u64>() % 500;
        let coordinates = Coordinates::new(36.0 + offset as f64 * 0.001, 127.0).unwrap();
        Ok(Some(Poi::new(keyword.to_string(), coordinates)))
    }
}

/// Answers every optimization request with a synthetic feature collection.
/// The optimized visiting order is the reverse of the input order, and the
/// totals vary deterministically with the via-point names so batches have
/// something to rank.
pub struct MockRouteProvider {
    pub calls: AtomicUsize,
    fail_all: bool,
}

impl MockRouteProvider {
    pub fn new() -> Self {
        MockRouteProvider {
            calls: AtomicUsize::new(0),
            fail_all: false,
        }
    }

    pub fn failing() -> Self {
        MockRouteProvider {
            calls: AtomicUsize::new(0),
            fail_all: true,
        }
    }
}

#[async_trait]
impl RouteProvider for MockRouteProvider {
    async fn optimize_route(
        &self,
        _start: &Poi,
        _end: &Poi,
        via_points: &[ViaPoint],
    ) -> Result<RouteFeatureCollection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(AppError::TmapApi("mock provider failure".to_string()));
        }

        let name_weight: usize = via_points.iter().map(|v| v.name.len()).sum();
        let leg_count = via_points.len().max(1);
        let total_distance = (name_weight * 37 % 5000 + 1000) as f64;
        let total_time = (leg_count * 600) as f64;
        let total_fare = ((name_weight % 3) * 1000) as f64;

        let mut features = Vec::new();
        // Emit point features in input order but with reversed visiting
        // indexes, so callers must order by index rather than position.
        let count = via_points.len();
        for (position, via) in via_points.iter().enumerate() {
            let visit_order = (count - position) as u32;
            features.push(RouteFeature {
                geometry: FeatureGeometry::Point {
                    coordinates: [via.coordinates.lng, via.coordinates.lat],
                },
                properties: FeatureProperties {
                    index: visit_order,
                    via_point_name: format!("{} {}", visit_order, via.name),
                    ..Default::default()
                },
            });
        }
        for leg in 0..leg_count {
            features.push(RouteFeature {
                geometry: FeatureGeometry::LineString {
                    coordinates: vec![[127.0, 36.0], [127.0, 36.1]],
                },
                properties: FeatureProperties {
                    index: leg as u32 + 1,
                    time: total_time / leg_count as f64,
                    distance: total_distance / leg_count as f64,
                    fare: total_fare / leg_count as f64,
                    ..Default::default()
                },
            });
        }

        Ok(RouteFeatureCollection {
            properties: RouteTotals {
                total_distance,
                total_time,
                total_fare,
            },
            features,
        })
    }
}

/// Route provider that never answers; exercises the per-build timeout.
pub struct StallingRouteProvider;

#[async_trait]
impl RouteProvider for StallingRouteProvider {
    async fn optimize_route(
        &self,
        _start: &Poi,
        _end: &Poi,
        _via_points: &[ViaPoint],
    ) -> Result<RouteFeatureCollection> {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        Err(AppError::TmapApi("unreachable".to_string()))
    }
}

pub fn test_recommender(
    poi_provider: Arc<dyn PoiProvider>,
    route_provider: Arc<dyn RouteProvider>,
) -> RouteRecommender {
    test_recommender_with_config(poi_provider, route_provider, RecommenderConfig::default())
}

pub fn test_recommender_with_config(
    poi_provider: Arc<dyn PoiProvider>,
    route_provider: Arc<dyn RouteProvider>,
    config: RecommenderConfig,
) -> RouteRecommender {
    let catalog = Arc::new(sample_catalog());
    let resolver = Arc::new(PoiResolver::new(
        catalog.clone(),
        poi_provider,
        ResolutionStrategy::LocalFirst,
        60,
    ));
    RouteRecommender::new(catalog, resolver, route_provider, config)
}

pub fn test_app_state(
    poi_provider: Arc<dyn PoiProvider>,
    route_provider: Arc<dyn RouteProvider>,
) -> Arc<festiroute::AppState> {
    let catalog = Arc::new(sample_catalog());
    let resolver = Arc::new(PoiResolver::new(
        catalog.clone(),
        poi_provider,
        ResolutionStrategy::LocalFirst,
        60,
    ));
    let recommender = RouteRecommender::new(
        catalog.clone(),
        resolver,
        route_provider,
        RecommenderConfig::default(),
    );
    Arc::new(festiroute::AppState {
        catalog,
        recommender,
    })
}
