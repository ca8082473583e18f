//! Recommendation pipeline: sizing, generation, before/after billing,
//! savings, cost, payback, and emissions.

use tracing::debug;

use super::economics::{co2_reduction_tons, estimate_cost, payback_years, round_to};
use super::location::location_factor;
use super::types::{ConsumptionProfile, Recommendation, RecommendationDetails, SystemType, UsageType};
use crate::error::AdvisorError;

/// Daily yield per installed kW for solar (kWh/kW/day).
pub const SOLAR_DAILY_YIELD: f64 = 4.2;
/// Daily yield per installed kW for wind (kWh/kW/day).
pub const WIND_DAILY_YIELD: f64 = 3.8;
/// Daily yield for open-field agricultural solar (kWh/kW/day).
pub const AGRICULTURE_SOLAR_DAILY_YIELD: f64 = 4.5;
/// Smallest agricultural system: one 5 HP irrigation pump (kW).
pub const MIN_PUMP_SIZE_KW: f64 = 3.7;
/// Days per billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// System size (kW, one decimal) covering `monthly_consumption_kwh`.
///
/// Sized at 1 kW per 100 kWh/month; agricultural systems never drop below
/// [`MIN_PUMP_SIZE_KW`].
pub fn recommended_size_kw(usage: &UsageType, monthly_consumption_kwh: f64) -> f64 {
    let size = round_to(monthly_consumption_kwh / 100.0, 1);
    if usage.is_agriculture() {
        size.max(MIN_PUMP_SIZE_KW)
    } else {
        size
    }
}

/// Daily yield multiplier for the usage/technology pair.
pub fn daily_yield(usage: &UsageType, system: SystemType) -> f64 {
    match (usage, system) {
        (UsageType::Agriculture, SystemType::Solar) => AGRICULTURE_SOLAR_DAILY_YIELD,
        (_, SystemType::Solar) => SOLAR_DAILY_YIELD,
        (_, SystemType::Wind) => WIND_DAILY_YIELD,
    }
}

/// Expected monthly generation (whole kWh, truncated).
pub fn estimated_generation_kwh(size_kw: f64, daily_yield: f64, location_factor: f64) -> i64 {
    (size_kw * daily_yield * DAYS_PER_MONTH * location_factor) as i64
}

/// Derives the full recommendation for `profile`.
///
/// Deterministic: the same profile always yields the same recommendation.
///
/// # Errors
///
/// Returns an [`AdvisorError`] when the profile fails
/// [`ConsumptionProfile::validate`].
pub fn recommend(profile: &ConsumptionProfile) -> Result<Recommendation, AdvisorError> {
    profile.validate()?;
    let plan = profile.tariff_plan()?;
    let usage = &profile.usage_type;
    let consumption = profile.monthly_consumption;

    let system_type = usage.system_type();
    let size_kw = recommended_size_kw(usage, consumption);
    let generation = estimated_generation_kwh(
        size_kw,
        daily_yield(usage, system_type),
        location_factor(&profile.location),
    );

    let current_bill = plan.bill(consumption);
    let remaining_consumption = (consumption - generation as f64).max(0.0);
    let new_bill = plan.bill(remaining_consumption);
    let monthly_savings = (current_bill - new_bill) as i64;

    let cost = estimate_cost(usage, system_type, size_kw);
    let payback = payback_years(cost.system_cost, monthly_savings);

    debug!(
        usage = %usage,
        system = %system_type,
        size_kw,
        generation_kwh = generation,
        monthly_savings,
        "recommendation computed"
    );
    if let Some(budget) = profile.budget {
        debug!(budget, "budget supplied; not used in sizing");
    }

    Ok(Recommendation {
        location: profile.location.clone(),
        usage_type: usage.clone(),
        system_type,
        recommended_size_kw: size_kw,
        estimated_generation_kwh: generation,
        monthly_savings,
        system_cost: cost.system_cost,
        payback_years: payback,
        details: RecommendationDetails {
            current_consumption: consumption,
            remaining_consumption,
            current_bill: round_to(current_bill, 2),
            new_bill: round_to(new_bill, 2),
            effective_tariff: round_to(plan.effective_tariff(consumption), 2),
            co2_reduction: round_to(co2_reduction_tons(generation), 2),
            slabs_used: plan.uses_slabs(),
            subsidy_info: cost.subsidy,
        },
    })
}
