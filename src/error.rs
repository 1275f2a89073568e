use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("TMAP API error: {0}")]
    TmapApi(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid combination size: {0} (must be at least 2)")]
    InvalidComboSize(usize),

    #[error("Could not resolve place: {0}")]
    PoiNotFound(String),

    #[error("No route could be built for any place combination")]
    NoRouteFound,

    #[error("Failed to load place catalog: {0}")]
    CatalogLoad(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::TmapApi(ref e) => {
                tracing::error!("TMAP API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error".to_string())
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::InvalidComboSize(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::PoiNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::NoRouteFound => {
                tracing::warn!("No candidate route survived building");
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::CatalogLoad(ref e) => {
                tracing::error!("Catalog load error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
