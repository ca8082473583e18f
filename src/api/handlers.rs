//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use super::AppState;
use super::types::{HealthResponse, RecommendResponse};
use crate::advisor::{self, ConsumptionProfile};
use crate::error::AdvisorError;

/// `GET /api/health` → 200 + `HealthResponse` JSON
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Energy advisor backend is running",
    })
}

/// Computes a recommendation and attaches a summary.
///
/// `POST /api/recommend` → 200 + `RecommendResponse` JSON
/// Malformed body or invalid profile → 400 + `ErrorResponse`
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConsumptionProfile>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AdvisorError> {
    let Json(profile) = payload.map_err(|e| AdvisorError::MalformedRequest(e.body_text()))?;
    let rec = advisor::recommend(&profile)?;
    let summary = state.summary.generate(&rec).await;
    Ok(Json(RecommendResponse::new(rec, summary)))
}
