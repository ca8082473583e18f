//! Shared test fixtures for integration tests.

use std::sync::Arc;

use async_trait::async_trait;

use energy_advisor::advisor::{ConsumptionProfile, SlabRates, UsageType};
use energy_advisor::api::AppState;
use energy_advisor::llm::{LlmError, TextGenerator};
use energy_advisor::summary::SummaryGenerator;

/// Seed used wherever a reproducible template summary is needed.
pub const TEST_SEED: u64 = 42;

/// Profile with a flat tariff (or the default when `tariff` is `None`).
pub fn profile(location: &str, usage: &str, kwh: f64, tariff: Option<f64>) -> ConsumptionProfile {
    ConsumptionProfile {
        location: location.to_string(),
        usage_type: UsageType::from(usage),
        monthly_consumption: kwh,
        tariff,
        ..ConsumptionProfile::default()
    }
}

/// Profile billed on the default slab schedule (4, 6, 8, 10).
pub fn slab_profile(location: &str, usage: &str, kwh: f64) -> ConsumptionProfile {
    ConsumptionProfile {
        slabs: Some(SlabRates {
            slab1_rate: Some(4.0),
            slab2_rate: Some(6.0),
            slab3_rate: Some(8.0),
            slab4_rate: Some(10.0),
            ignored_keys: 0,
        }),
        ..profile(location, usage, kwh, None)
    }
}

/// Text generator that always answers with the same text.
pub struct CannedGenerator(pub &'static str);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn is_available(&self) -> bool {
        true
    }

    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Ok(self.0.to_string())
    }
}

/// Text generator whose every request fails.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn is_available(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Timeout(30))
    }
}

/// API state with template-only summaries and a fixed seed.
pub fn template_state() -> Arc<AppState> {
    Arc::new(AppState {
        summary: SummaryGenerator::template_only(Some(TEST_SEED)),
    })
}

/// API state delegating summaries to `generator`.
pub fn state_with(generator: Arc<dyn TextGenerator>) -> Arc<AppState> {
    Arc::new(AppState {
        summary: SummaryGenerator::with_generator(generator, Some(TEST_SEED)),
    })
}
