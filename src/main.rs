use axum::Router;
use festiroute::catalog::PlaceCatalog;
use festiroute::config::Config;
use festiroute::services::poi_resolver::PoiResolver;
use festiroute::services::providers::{PoiProvider, RouteProvider};
use festiroute::services::recommender::RouteRecommender;
use festiroute::services::tmap::TmapClient;
use festiroute::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "festiroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Festiroute API server");

    // Load the place catalog once; it is read-only afterwards
    let catalog = Arc::new(PlaceCatalog::from_json_file(&config.place_data_path)?);

    // Initialize services
    let tmap_client = match config.tmap_base_url {
        Some(ref base_url) => {
            TmapClient::with_base_url(config.tmap_api_key.clone(), base_url.clone())
        }
        None => TmapClient::new(config.tmap_api_key.clone()),
    };
    let poi_provider: Arc<dyn PoiProvider> = Arc::new(tmap_client.clone());
    let route_provider: Arc<dyn RouteProvider> = Arc::new(tmap_client);

    let resolver = Arc::new(PoiResolver::new(
        catalog.clone(),
        poi_provider,
        config.resolution_strategy.clone(),
        config.poi_cache_ttl,
    ));
    let recommender = RouteRecommender::new(
        catalog.clone(),
        resolver,
        route_provider,
        config.recommender.clone(),
    );

    // Create application state
    let state = Arc::new(AppState {
        catalog,
        recommender,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", festiroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
