//! Scoring and report generation endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::api::{error::ApiError, AppState};
use crate::domain::model::{Report, RestructuringRequest, StrategyResponse};

/// GET /
pub async fn service_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "HR Strategic Restructuring Agent API",
        "version": env!("CARGO_PKG_VERSION"),
        "scoring_version": state.engine.scoring().config().version,
        "endpoints": {
            "/generate-strategy": "POST - Generate restructuring report",
            "/score": "POST - Run the merit scoring algorithm only",
            "/health": "GET - Health check"
        }
    }))
}

/// POST /score
pub async fn score(
    State(state): State<AppState>,
    payload: Result<Json<RestructuringRequest>, JsonRejection>,
) -> Result<Json<Report>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.engine.score(&request.employees)))
}

/// POST /generate-strategy
pub async fn generate_strategy(
    State(state): State<AppState>,
    payload: Result<Json<RestructuringRequest>, JsonRejection>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.engine.run(&request.employees).await?;
    Ok(Json(response))
}
