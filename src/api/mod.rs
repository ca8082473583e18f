//! REST API for renewable-energy recommendations.
//!
//! Provides two endpoints:
//! - `GET /api/health`: liveness check
//! - `POST /api/recommend`: sizing, economics, and summary for a consumption profile

mod handlers;
mod types;

pub use types::{ErrorResponse, HealthResponse, RecommendResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::summary::SummaryGenerator;

/// Application state shared across all request handlers.
///
/// Built once at startup and wrapped in `Arc`; nothing in it is mutated
/// per request.
pub struct AppState {
    /// Summary text producer, with or without a completion API behind it.
    pub summary: SummaryGenerator,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/recommend", post(handlers::recommend))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
