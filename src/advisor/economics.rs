//! Installation cost, subsidy, payback, and emissions.

use super::types::{SubsidyInfo, SystemType, UsageType};

/// Installed cost per kW for residential/commercial solar.
pub const SOLAR_COST_PER_KW: f64 = 55_000.0;
/// Installed cost per kW for wind.
pub const WIND_COST_PER_KW: f64 = 75_000.0;
/// Installed cost per kW for agricultural solar (pump + panels).
pub const AGRICULTURE_COST_PER_KW: f64 = 45_000.0;
/// Share of the agricultural gross cost covered by subsidy.
pub const AGRICULTURE_SUBSIDY_FRACTION: f64 = 0.30;
/// Grid emissions intensity (kg CO2 per kWh).
pub const GRID_EMISSIONS_KG_PER_KWH: f64 = 0.82;

/// Net cost plus the subsidy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub system_cost: i64,
    pub subsidy: SubsidyInfo,
}

/// Upfront cost of a `size_kw` installation.
///
/// Agriculture is costed at [`AGRICULTURE_COST_PER_KW`] less a flat
/// [`AGRICULTURE_SUBSIDY_FRACTION`] subsidy; gross cost and subsidy are each
/// truncated to whole currency units. Other usages pay the full per-kW
/// price of their technology.
pub fn estimate_cost(usage: &UsageType, system: SystemType, size_kw: f64) -> CostEstimate {
    if usage.is_agriculture() {
        let gross_cost = (size_kw * AGRICULTURE_COST_PER_KW) as i64;
        let amount = (gross_cost as f64 * AGRICULTURE_SUBSIDY_FRACTION) as i64;
        return CostEstimate {
            system_cost: gross_cost - amount,
            subsidy: SubsidyInfo {
                available: true,
                percentage: Some(AGRICULTURE_SUBSIDY_FRACTION * 100.0),
                amount: Some(amount),
                gross_cost: Some(gross_cost),
            },
        };
    }

    let per_kw = match system {
        SystemType::Solar => SOLAR_COST_PER_KW,
        SystemType::Wind => WIND_COST_PER_KW,
    };
    CostEstimate {
        system_cost: (size_kw * per_kw) as i64,
        subsidy: SubsidyInfo::unavailable(),
    }
}

/// Years of savings needed to repay `system_cost`, to one decimal.
///
/// Returns 0 when there are no annual savings.
pub fn payback_years(system_cost: i64, monthly_savings: i64) -> f64 {
    let annual_savings = monthly_savings * 12;
    if annual_savings <= 0 {
        return 0.0;
    }
    round_to(system_cost as f64 / annual_savings as f64, 1)
}

/// Monthly CO2 avoided (tonnes) by displacing grid energy.
pub fn co2_reduction_tons(generation_kwh: i64) -> f64 {
    generation_kwh as f64 * GRID_EMISSIONS_KG_PER_KWH / 1000.0
}

/// Rounds `value` to `places` decimals, resolving exact ties to even.
///
/// Rounding follows the exact binary value of `value`, so `0.15` (stored
/// just below 0.15) rounds down to `0.1` while the exact tie `1.25` rounds
/// to `1.2`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let scaled = value * scale;
    // exact error of the product; nonzero means `scaled` only looks like a tie
    let err = value.mul_add(scale, -scaled);
    let rounded = if scaled.fract().abs() == 0.5 && err != 0.0 {
        if err > 0.0 { scaled.ceil() } else { scaled.floor() }
    } else {
        scaled.round_ties_even()
    };
    rounded / scale
}
