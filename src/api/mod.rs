//! HTTP API for the restructuring agent

pub mod error;
pub mod health;
pub mod strategy;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::strategy::StrategyEngine;

pub use error::ApiError;
pub use health::health_routes;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<StrategyEngine>,
}

impl AppState {
    pub fn new(engine: StrategyEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(strategy::service_info))
        .route("/score", post(strategy::score))
        .route("/generate-strategy", post(strategy::generate_strategy))
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
