//! Stable application-wide constants.
//!
//! Values here are structural invariants and default fallbacks for
//! env-var-based configuration. For tuning knobs that benefit from runtime
//! experimentation, see [`RecommenderConfig`](crate::config::RecommenderConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Combination generation structural limits ---

/// Smallest valid combination size: one café + one restaurant. Anything
/// below this cannot satisfy the category mix and is rejected up front.
pub const MIN_COMBO_SIZE: usize = 2;

// --- Candidate building defaults ---

/// Default dwell time (seconds) submitted per via-point: 10 minutes.
/// Overridden by `VIA_DWELL_TIME_SECONDS`.
pub const DEFAULT_VIA_DWELL_TIME_SECONDS: u32 = 600;
/// Default bound on concurrently built candidates; keeps the batch within
/// the external providers' rate limits. Overridden by `MAX_CONCURRENT_BUILDS`.
pub const DEFAULT_MAX_CONCURRENT_BUILDS: usize = 4;
/// Default per-candidate timeout (seconds) against the route provider.
/// A timed-out build is dropped, never fatal to the batch.
/// Overridden by `PROVIDER_TIMEOUT_SECONDS`.
pub const DEFAULT_PROVIDER_TIMEOUT_SECONDS: u64 = 15;

// --- POI resolution cache defaults ---

/// Default resolved-POI cache TTL: 1 hour. Overridden by `POI_CACHE_TTL`.
pub const DEFAULT_POI_CACHE_TTL_SECONDS: u64 = 3_600;
/// Maximum entries for the in-memory resolved-POI cache (LRU eviction).
pub const DEFAULT_POI_CACHE_MAX_ENTRIES: u64 = 10_000;

// --- Place data defaults ---

/// Default path to the curated place dataset. Overridden by `PLACE_DATA_PATH`.
pub const DEFAULT_PLACE_DATA_PATH: &str = "data/places.json";
