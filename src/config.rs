use crate::constants::*;
use std::env;

/// How a place name is resolved to coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResolutionStrategy {
    /// Consult the local place catalog first; only unknown names go to the
    /// external POI-lookup provider.
    #[default]
    LocalFirst,
    /// Always ask the external provider, ignoring catalog coordinates.
    ExternalOnly,
}

impl std::str::FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local-first" | "local_first" => Ok(ResolutionStrategy::LocalFirst),
            "external-only" | "external_only" => Ok(ResolutionStrategy::ExternalOnly),
            _ => Err(format!(
                "Invalid resolution strategy: {}. Use 'local-first' or 'external-only'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub tmap_api_key: String,
    /// Override for the TMAP base URL (proxy or test server).
    pub tmap_base_url: Option<String>,
    pub place_data_path: String,
    pub poi_cache_ttl: u64,
    pub resolution_strategy: ResolutionStrategy,
    pub recommender: RecommenderConfig,
}

#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Dwell time (seconds) attached to every via-point sent to the
    /// route-optimization provider.
    pub via_dwell_time_seconds: u32,

    /// Upper bound on candidate builds running concurrently in one batch.
    pub max_concurrent_builds: usize,

    /// Per-candidate timeout (seconds) covering POI resolution and the
    /// route-provider call; expired builds are dropped.
    pub provider_timeout_seconds: u64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            via_dwell_time_seconds: DEFAULT_VIA_DWELL_TIME_SECONDS,
            max_concurrent_builds: DEFAULT_MAX_CONCURRENT_BUILDS,
            provider_timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECONDS,
        }
    }
}

impl RecommenderConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        Ok(Self {
            via_dwell_time_seconds: env::var("VIA_DWELL_TIME_SECONDS")
                .unwrap_or_else(|_| defaults.via_dwell_time_seconds.to_string())
                .parse()
                .map_err(|_| "Invalid VIA_DWELL_TIME_SECONDS")?,

            max_concurrent_builds: env::var("MAX_CONCURRENT_BUILDS")
                .unwrap_or_else(|_| defaults.max_concurrent_builds.to_string())
                .parse()
                .map_err(|_| "Invalid MAX_CONCURRENT_BUILDS")?,

            provider_timeout_seconds: env::var("PROVIDER_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| defaults.provider_timeout_seconds.to_string())
                .parse()
                .map_err(|_| "Invalid PROVIDER_TIMEOUT_SECONDS")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let recommender = RecommenderConfig::from_env()?;
        if recommender.max_concurrent_builds == 0 {
            return Err("MAX_CONCURRENT_BUILDS must be at least 1".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            tmap_api_key: env::var("TMAP_API_KEY").map_err(|_| "TMAP_API_KEY must be set")?,
            tmap_base_url: env::var("TMAP_BASE_URL").ok(),
            place_data_path: env::var("PLACE_DATA_PATH")
                .unwrap_or_else(|_| DEFAULT_PLACE_DATA_PATH.to_string()),
            poi_cache_ttl: env::var("POI_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_POI_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid POI_CACHE_TTL")?,
            resolution_strategy: env::var("POI_RESOLUTION_STRATEGY")
                .unwrap_or_else(|_| "local-first".to_string())
                .parse()?,
            recommender,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
