//! Text-generation collaborator used for natural-language summaries.
//!
//! The summary generator only sees the [`TextGenerator`] trait, so tests and
//! alternative backends can stand in for the HTTP client.

mod client;

pub use client::LmStudioClient;

use async_trait::async_trait;
use thiserror::Error;

/// Failures talking to a text-generation backend.
///
/// None of these reach API callers; the summary generator falls back to
/// template phrasing instead.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Http(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("HTTP {status} from completion API: {body}")]
    Status { status: u16, body: String },

    #[error("invalid completion payload: {0}")]
    InvalidResponse(String),

    #[error("completion API returned no text")]
    EmptyResponse,
}

/// A backend that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Cheap liveness probe.
    async fn is_available(&self) -> bool;

    /// Generates a completion for `prompt`, trimmed of surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Any transport, status, or payload problem is returned as an
    /// [`LlmError`].
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
