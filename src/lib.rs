// Library exports for testing and reusability

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

// App state for sharing across the application
use catalog::PlaceCatalog;
use services::recommender::RouteRecommender;
use std::sync::Arc;

pub struct AppState {
    pub catalog: Arc<PlaceCatalog>,
    pub recommender: RouteRecommender,
}
