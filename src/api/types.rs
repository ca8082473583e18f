//! API response types.
//!
//! Requests deserialize straight into
//! [`ConsumptionProfile`](crate::advisor::ConsumptionProfile) (camelCase);
//! responses use snake_case field names.

use serde::Serialize;

use crate::advisor::{Recommendation, RecommendationDetails, SystemType, UsageType};

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Recommendation plus its summary text.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub location: String,
    pub usage_type: UsageType,
    pub system_type: SystemType,
    pub recommended_size_kw: f64,
    pub estimated_generation_kwh: i64,
    pub monthly_savings: i64,
    pub system_cost: i64,
    pub payback_years: f64,
    /// Natural-language summary (completion API or template).
    pub gemini_summary: String,
    pub details: RecommendationDetails,
}

impl RecommendResponse {
    /// Attaches `summary` to a computed recommendation.
    pub fn new(rec: Recommendation, summary: String) -> Self {
        Self {
            location: rec.location,
            usage_type: rec.usage_type,
            system_type: rec.system_type,
            recommended_size_kw: rec.recommended_size_kw,
            estimated_generation_kwh: rec.estimated_generation_kwh,
            monthly_savings: rec.monthly_savings,
            system_cost: rec.system_cost,
            payback_years: rec.payback_years,
            gemini_summary: summary,
            details: rec.details,
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
