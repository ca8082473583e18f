//! Recommendation pipeline: sizing, generation, bills, and cost.

/// Installation cost, subsidy, payback, and emissions formulas.
pub mod economics;
pub mod engine;
/// Stable location hash and generation factor.
pub mod location;
pub mod types;

pub use engine::recommend;
pub use types::{
    ConsumptionProfile, Recommendation, RecommendationDetails, SlabRates, SubsidyInfo, SystemType,
    UsageType,
};
