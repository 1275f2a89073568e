pub mod candidate;
pub mod combinations;
pub mod scoring;

use crate::catalog::PlaceCatalog;
use crate::config::RecommenderConfig;
use crate::error::{AppError, Result};
use crate::models::route::TopRoutesRequest;
use crate::models::{Poi, RouteCandidate, ScaledRouteCandidate};
use crate::services::poi_resolver::PoiResolver;
use crate::services::providers::RouteProvider;
use candidate::CandidateBuilder;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

/// End-to-end itinerary recommendation: enumerate place combinations,
/// build one route candidate per combination against the external
/// providers, normalize the surviving batch, and rank.
pub struct RouteRecommender {
    catalog: Arc<PlaceCatalog>,
    resolver: Arc<PoiResolver>,
    builder: CandidateBuilder,
    config: RecommenderConfig,
}

impl RouteRecommender {
    pub fn new(
        catalog: Arc<PlaceCatalog>,
        resolver: Arc<PoiResolver>,
        route_provider: Arc<dyn RouteProvider>,
        config: RecommenderConfig,
    ) -> Self {
        let builder = CandidateBuilder::new(
            catalog.clone(),
            resolver.clone(),
            route_provider,
            config.via_dwell_time_seconds,
        );

        RouteRecommender {
            catalog,
            resolver,
            builder,
            config,
        }
    }

    /// Return the top `top_k` scored itineraries for the request.
    ///
    /// Per-combination failures (unresolved anchor, provider error or
    /// timeout, malformed payload) drop that candidate only. The call
    /// fails as a whole for an invalid combination size, an unresolvable
    /// start/end place, or when no candidate at all survives building.
    pub async fn get_top_k_routes(
        &self,
        request: &TopRoutesRequest,
    ) -> Result<Vec<ScaledRouteCandidate>> {
        let start = self
            .resolver
            .resolve(&request.start_place, &request.region)
            .await
            .ok_or_else(|| AppError::PoiNotFound(request.start_place.clone()))?;
        // Round trips reuse the resolved start; a distinct end resolves on
        // its own and is just as mandatory.
        let end = if request.start_place == request.end_place {
            start.clone()
        } else {
            self.resolver
                .resolve(&request.end_place, &request.region)
                .await
                .ok_or_else(|| AppError::PoiNotFound(request.end_place.clone()))?
        };

        let combinations = combinations::generate_combinations(
            &self.catalog,
            &request.region,
            &request.anchor_place,
            request.combo_size,
            request.combo_pool_size,
        )?;

        tracing::info!(
            combinations = combinations.len(),
            region = %request.region,
            anchor = %request.anchor_place,
            "Generated {} place combinations",
            combinations.len()
        );

        let candidates = self
            .build_batch(&combinations, &start, &end, &request.region)
            .await;

        if candidates.is_empty() {
            return Err(AppError::NoRouteFound);
        }
        tracing::info!(
            built = candidates.len(),
            total = combinations.len(),
            "Built {} of {} candidates",
            candidates.len(),
            combinations.len()
        );

        let scaled = scoring::scale_scores(candidates);
        Ok(scoring::rank_top_k(scaled, request.top_k))
    }

    /// Bounded, order-preserving fan-out over the combinations. Each build
    /// owns its combination and output slot; the collection point waits for
    /// every build to report a candidate or be dropped. A per-build timeout
    /// keeps one stalled provider call from blocking the batch, and
    /// dropping the returned future cancels all in-flight calls.
    async fn build_batch(
        &self,
        combinations: &[combinations::PlaceCombination],
        start: &Poi,
        end: &Poi,
        region: &str,
    ) -> Vec<RouteCandidate> {
        let timeout = Duration::from_secs(self.config.provider_timeout_seconds);

        let builds: Vec<_> = combinations
            .iter()
            .map(|combination| self.build_one(combination, start, end, region, timeout))
            .collect();

        futures::stream::iter(builds)
            .buffered(self.config.max_concurrent_builds)
            .filter_map(|candidate| async move { candidate })
            .collect()
            .await
    }

    async fn build_one(
        &self,
        combination: &combinations::PlaceCombination,
        start: &Poi,
        end: &Poi,
        region: &str,
        timeout: Duration,
    ) -> Option<RouteCandidate> {
        match tokio::time::timeout(
            timeout,
            self.builder.build(combination, start, end, region),
        )
        .await
        {
            Ok(candidate) => candidate,
            Err(_) => {
                tracing::debug!(
                    anchor = %combination.anchor,
                    timeout_s = timeout.as_secs(),
                    "Dropping candidate: build timed out after {}s",
                    timeout.as_secs()
                );
                None
            }
        }
    }
}
