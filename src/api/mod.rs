pub mod analysis;
pub mod health;

use crate::error::AppError;
use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analysis::router())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound("404 page not found".to_string())
}
