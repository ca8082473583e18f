//! Renewable-energy sizing and savings advisor.

/// Sizing, economics, and impact of a renewable installation.
pub mod advisor;
pub mod api;
pub mod billing;
pub mod config;
pub mod error;
pub mod io;
pub mod llm;
pub mod report;
/// Template and completion-API summaries.
pub mod summary;
