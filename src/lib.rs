//! minmax - nearest price reversal detection and trading bands for
//! exchange traded commodities.
//!
//! The core lives in [`services`]: [`services::scan`] walks a
//! [`types::TimeSeries`] backward to the nearest turning point, and
//! [`services::WindowAggregator`] runs it for every hop and direction and
//! derives the buy/sell bands. [`sources`] and [`api`] are the I/O around it.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::AnalysisService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis: Arc<AnalysisService>,
}

/// Build the full HTTP application for a state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::*;
