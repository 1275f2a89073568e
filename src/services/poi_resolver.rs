use crate::catalog::PlaceCatalog;
use crate::config::ResolutionStrategy;
use crate::constants::DEFAULT_POI_CACHE_MAX_ENTRIES;
use crate::models::Poi;
use crate::services::providers::PoiProvider;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Resolves a place name (scoped to a region) to coordinates.
///
/// With [`ResolutionStrategy::LocalFirst`] a catalog record carrying
/// coordinates answers without a network call; everything else goes to the
/// external POI provider. Provider hits are cached since the same via-point
/// names recur across every combination of a batch.
pub struct PoiResolver {
    catalog: Arc<PlaceCatalog>,
    provider: Arc<dyn PoiProvider>,
    strategy: ResolutionStrategy,
    cache: Cache<String, Poi>,
}

impl PoiResolver {
    pub fn new(
        catalog: Arc<PlaceCatalog>,
        provider: Arc<dyn PoiProvider>,
        strategy: ResolutionStrategy,
        cache_ttl_seconds: u64,
    ) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(cache_ttl_seconds))
            .max_capacity(DEFAULT_POI_CACHE_MAX_ENTRIES)
            .build();

        PoiResolver {
            catalog,
            provider,
            strategy,
            cache,
        }
    }

    /// `None` means unresolved. Unresolved is not an error: callers drop
    /// the place, except for start/end/anchor which they handle themselves.
    pub async fn resolve(&self, name: &str, region: &str) -> Option<Poi> {
        if self.strategy == ResolutionStrategy::LocalFirst {
            if let Some(record) = self.catalog.find(region, name) {
                if let Some(coordinates) = record.coordinates {
                    tracing::debug!(place = %name, region = %region, "Resolved from catalog");
                    return Some(Poi::new(record.name.clone(), coordinates));
                }
            }
        }

        let cache_key = format!("{} {}", region, name);
        if let Some(poi) = self.cache.get(&cache_key).await {
            tracing::debug!(place = %name, region = %region, "Resolved from cache");
            return Some(poi);
        }

        match self.provider.search_poi(name, Some(region)).await {
            Ok(Some(poi)) => {
                self.cache.insert(cache_key, poi.clone()).await;
                Some(poi)
            }
            Ok(None) => {
                tracing::debug!(place = %name, region = %region, "Place unresolved");
                None
            }
            Err(e) => {
                tracing::debug!(
                    place = %name,
                    region = %region,
                    "Treating provider error as unresolved: {}",
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::models::{Coordinates, PlaceCategory, PlaceRecord};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        answer: Option<Poi>,
    }

    #[async_trait]
    impl PoiProvider for CountingProvider {
        async fn search_poi(&self, _keyword: &str, _region: Option<&str>) -> Result<Option<Poi>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.clone())
        }
    }

    fn catalog_with_coords() -> Arc<PlaceCatalog> {
        Arc::new(PlaceCatalog::from_records(vec![
            PlaceRecord::new("부여", "정림사지", PlaceCategory::Attraction, 4.5)
                .with_coordinates(Coordinates::new(36.2786, 126.9125).unwrap()),
            PlaceRecord::new("부여", "궁남지", PlaceCategory::Attraction, 4.5),
        ]))
    }

    fn external_poi() -> Poi {
        Poi::new(
            "궁남지".to_string(),
            Coordinates::new(36.2714, 126.9079).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_local_first_skips_provider() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            answer: Some(external_poi()),
        });
        let resolver = PoiResolver::new(
            catalog_with_coords(),
            provider.clone(),
            ResolutionStrategy::LocalFirst,
            60,
        );

        let poi = resolver.resolve("정림사지", "부여").await.unwrap();
        assert_eq!(poi.coordinates.lat, 36.2786);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_local_first_falls_back_when_catalog_has_no_coords() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            answer: Some(external_poi()),
        });
        let resolver = PoiResolver::new(
            catalog_with_coords(),
            provider.clone(),
            ResolutionStrategy::LocalFirst,
            60,
        );

        // 궁남지 is in the catalog but without coordinates.
        let poi = resolver.resolve("궁남지", "부여").await.unwrap();
        assert_eq!(poi.coordinates.lat, 36.2714);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_external_only_ignores_catalog() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            answer: Some(external_poi()),
        });
        let resolver = PoiResolver::new(
            catalog_with_coords(),
            provider.clone(),
            ResolutionStrategy::ExternalOnly,
            60,
        );

        resolver.resolve("정림사지", "부여").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provider_hits_are_cached() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            answer: Some(external_poi()),
        });
        let resolver = PoiResolver::new(
            catalog_with_coords(),
            provider.clone(),
            ResolutionStrategy::ExternalOnly,
            60,
        );

        resolver.resolve("궁남지", "부여").await.unwrap();
        resolver.resolve("궁남지", "부여").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_match_is_unresolved_not_error() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            answer: None,
        });
        let resolver = PoiResolver::new(
            catalog_with_coords(),
            provider,
            ResolutionStrategy::ExternalOnly,
            60,
        );

        assert!(resolver.resolve("없는곳", "부여").await.is_none());
    }
}
