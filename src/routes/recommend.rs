use crate::error::{AppError, Result};
use crate::models::route::{RouteResponse, TopRoutesRequest};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /routes/recommend
/// Rank multi-stop itineraries around the requested festival anchor.
pub async fn recommend_routes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TopRoutesRequest>,
) -> Result<Json<RouteResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        region = %request.region,
        anchor = %request.anchor_place,
        combo_size = request.combo_size,
        top_k = request.top_k,
        "Recommendation request: region={}, anchor={}, comboSize={}, topK={}",
        request.region, request.anchor_place, request.combo_size, request.top_k
    );

    let routes = state.recommender.get_top_k_routes(&request).await?;
    Ok(Json(RouteResponse { routes }))
}
