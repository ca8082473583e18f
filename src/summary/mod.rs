//! Natural-language recommendation summaries.
//!
//! [`SummaryGenerator`] asks an optional [`TextGenerator`] first and falls
//! back to the phrase-pool composer on any failure, so a summary is always
//! produced.

pub mod prompt;
pub mod template;

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::advisor::Recommendation;
use crate::llm::TextGenerator;

/// Produces summary text for recommendations.
///
/// Cheap to clone; the text generator handle is shared.
#[derive(Clone, Default)]
pub struct SummaryGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
    seed: Option<u64>,
}

impl SummaryGenerator {
    /// Template-only generator. `seed` fixes phrase selection when set.
    pub fn template_only(seed: Option<u64>) -> Self {
        Self {
            generator: None,
            seed,
        }
    }

    /// Generator that delegates to `generator` and falls back to templates.
    pub fn with_generator(generator: Arc<dyn TextGenerator>, seed: Option<u64>) -> Self {
        Self {
            generator: Some(generator),
            seed,
        }
    }

    /// Whether a text generator is configured.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Summary for `rec`. Never fails and never returns an empty string.
    pub async fn generate(&self, rec: &Recommendation) -> String {
        if let Some(generator) = &self.generator {
            let started = Instant::now();
            match generator.generate(&prompt::build_prompt(rec)).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "summary generated by completion API"
                    );
                    return text.trim().to_string();
                }
                Ok(_) => warn!("completion API returned blank text; using template summary"),
                Err(e) => warn!(error = %e, "completion API failed; using template summary"),
            }
        }
        self.template_summary(rec)
    }

    /// Phrase-pool summary for `rec`.
    pub fn template_summary(&self, rec: &Recommendation) -> String {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        template::compose(rec, &mut rng)
    }
}
