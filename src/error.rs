//! Request-level errors surfaced to API callers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::ErrorResponse;

/// Errors raised while turning a consumption profile into a recommendation.
///
/// Every variant maps to HTTP 400 with an `{"error": ...}` body.
#[derive(Debug, Error, PartialEq)]
pub enum AdvisorError {
    #[error("monthlyConsumption must be a finite, non-negative number (got {0})")]
    InvalidConsumption(f64),

    #[error("{field} must be a finite, non-negative rate (got {value})")]
    InvalidSlabRate { field: &'static str, value: f64 },

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
