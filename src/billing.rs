//! Slab (tiered) electricity billing and tariff resolution.

use tracing::debug;

/// Flat per-unit rate used when no usable tariff is supplied.
pub const DEFAULT_FLAT_RATE: f64 = 8.0;

/// Capacity of the three bounded tiers (kWh): 0-100, 101-300, 301-500.
/// Everything above 500 kWh falls into the fourth, unbounded tier.
pub const TIER_CAPACITIES_KWH: [f64; 3] = [100.0, 200.0, 200.0];

/// Four-tier per-unit rate schedule.
///
/// Consumption is billed tier by tier in ascending order; units inside a
/// tier are charged at that tier's rate and unused tier capacity is never
/// carried into another tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabSchedule {
    /// Rate for 0–100 kWh.
    pub slab1_rate: f64,
    /// Rate for 101–300 kWh.
    pub slab2_rate: f64,
    /// Rate for 301–500 kWh.
    pub slab3_rate: f64,
    /// Rate above 500 kWh.
    pub slab4_rate: f64,
}

impl Default for SlabSchedule {
    fn default() -> Self {
        Self {
            slab1_rate: 4.0,
            slab2_rate: 6.0,
            slab3_rate: 8.0,
            slab4_rate: 10.0,
        }
    }
}

impl SlabSchedule {
    /// Creates a schedule from explicit tier rates.
    pub fn new(slab1_rate: f64, slab2_rate: f64, slab3_rate: f64, slab4_rate: f64) -> Self {
        Self {
            slab1_rate,
            slab2_rate,
            slab3_rate,
            slab4_rate,
        }
    }

    /// Tier rates in ascending tier order.
    pub fn rates(&self) -> [f64; 4] {
        [
            self.slab1_rate,
            self.slab2_rate,
            self.slab3_rate,
            self.slab4_rate,
        ]
    }

    /// Splits `consumption_kwh` into per-tier charges.
    ///
    /// Non-positive consumption yields four empty tiers.
    pub fn breakdown(&self, consumption_kwh: f64) -> BillBreakdown {
        let rates = self.rates();
        let mut remaining = consumption_kwh.max(0.0);
        let mut charges = Vec::with_capacity(rates.len());

        for (idx, rate) in rates.iter().enumerate() {
            let units = match TIER_CAPACITIES_KWH.get(idx) {
                Some(capacity) => capacity.min(remaining),
                None => remaining,
            };
            remaining -= units;
            charges.push(TierCharge {
                tier: TIER_LABELS[idx],
                units_kwh: units,
                rate: *rate,
                cost: units * rate,
            });
        }

        BillBreakdown { charges }
    }
}

const TIER_LABELS: [&str; 4] = ["slab1", "slab2", "slab3", "slab4"];

/// Computes the total slab bill for a monthly consumption.
///
/// Returns 0 for `consumption_kwh <= 0`.
///
/// # Examples
///
/// ```
/// use energy_advisor::billing::{SlabSchedule, compute_bill};
///
/// let schedule = SlabSchedule::default();
/// // 100 * 4 + 50 * 6
/// assert_eq!(compute_bill(150.0, &schedule), 700.0);
/// assert_eq!(compute_bill(0.0, &schedule), 0.0);
/// ```
pub fn compute_bill(consumption_kwh: f64, schedule: &SlabSchedule) -> f64 {
    if consumption_kwh <= 0.0 {
        return 0.0;
    }
    schedule.breakdown(consumption_kwh).total()
}

/// Units and cost billed within one tier (or the single flat tier).
#[derive(Debug, Clone, PartialEq)]
pub struct TierCharge {
    /// Tier label: `slab1`..`slab4`, or `flat`.
    pub tier: &'static str,
    /// Units billed in this tier (kWh).
    pub units_kwh: f64,
    /// Per-unit rate applied.
    pub rate: f64,
    /// `units_kwh * rate`.
    pub cost: f64,
}

/// Itemised bill.
#[derive(Debug, Clone, PartialEq)]
pub struct BillBreakdown {
    /// Per-tier charges in billing order.
    pub charges: Vec<TierCharge>,
}

impl BillBreakdown {
    /// Sum of all tier costs.
    pub fn total(&self) -> f64 {
        self.charges.iter().map(|c| c.cost).sum()
    }

    /// Sum of all billed units (kWh).
    pub fn units_kwh(&self) -> f64 {
        self.charges.iter().map(|c| c.units_kwh).sum()
    }
}

/// How a consumer is billed: by slab schedule when one was supplied,
/// otherwise at a flat per-unit rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TariffPlan {
    /// Slab schedule, when the consumer supplied one.
    pub slabs: Option<SlabSchedule>,
    /// Flat rate; also reported as the effective tariff when slab billing
    /// cannot produce an average (zero consumption).
    pub flat_rate: f64,
}

impl TariffPlan {
    /// Flat-rate plan. Missing, non-positive, or non-finite rates fall back
    /// to [`DEFAULT_FLAT_RATE`].
    pub fn flat(rate: Option<f64>) -> Self {
        let flat_rate = rate
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(DEFAULT_FLAT_RATE);
        Self {
            slabs: None,
            flat_rate,
        }
    }

    /// Slab plan with a flat fallback rate.
    pub fn slabs(schedule: SlabSchedule, fallback_rate: Option<f64>) -> Self {
        Self {
            slabs: Some(schedule),
            ..Self::flat(fallback_rate)
        }
    }

    /// Whether bills are computed from a slab schedule.
    pub fn uses_slabs(&self) -> bool {
        self.slabs.is_some()
    }

    /// Monthly bill for `consumption_kwh` under this plan.
    pub fn bill(&self, consumption_kwh: f64) -> f64 {
        match &self.slabs {
            Some(schedule) => compute_bill(consumption_kwh, schedule),
            None if consumption_kwh <= 0.0 => 0.0,
            None => consumption_kwh * self.flat_rate,
        }
    }

    /// Itemised bill for `consumption_kwh` under this plan.
    pub fn breakdown(&self, consumption_kwh: f64) -> BillBreakdown {
        match &self.slabs {
            Some(schedule) => schedule.breakdown(consumption_kwh),
            None => {
                let units = consumption_kwh.max(0.0);
                BillBreakdown {
                    charges: vec![TierCharge {
                        tier: "flat",
                        units_kwh: units,
                        rate: self.flat_rate,
                        cost: units * self.flat_rate,
                    }],
                }
            }
        }
    }

    /// Average cost per unit at `consumption_kwh`.
    ///
    /// With slabs and positive consumption this is `bill / consumption`;
    /// otherwise the flat rate.
    pub fn effective_tariff(&self, consumption_kwh: f64) -> f64 {
        match &self.slabs {
            Some(schedule) if consumption_kwh > 0.0 => {
                let tariff = compute_bill(consumption_kwh, schedule) / consumption_kwh;
                debug!(tariff, consumption_kwh, "effective tariff from slabs");
                tariff
            }
            _ => self.flat_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom() -> SlabSchedule {
        SlabSchedule::new(3.5, 5.25, 7.0, 9.5)
    }

    #[test]
    fn zero_and_negative_consumption_bill_nothing() {
        assert_eq!(compute_bill(0.0, &custom()), 0.0);
        assert_eq!(compute_bill(-25.0, &custom()), 0.0);
    }

    #[test]
    fn tier_boundaries_are_exact() {
        let s = custom();
        assert_eq!(compute_bill(100.0, &s), 100.0 * s.slab1_rate);
        assert_eq!(
            compute_bill(300.0, &s),
            100.0 * s.slab1_rate + 200.0 * s.slab2_rate
        );
        assert_eq!(
            compute_bill(500.0, &s),
            100.0 * s.slab1_rate + 200.0 * s.slab2_rate + 200.0 * s.slab3_rate
        );
    }

    #[test]
    fn top_tier_is_unbounded() {
        let s = SlabSchedule::default();
        // 400 + 1200 + 1600 + 250 * 10
        assert_eq!(compute_bill(750.0, &s), 5700.0);
    }

    #[test]
    fn partial_tier_bills_only_used_units() {
        let s = SlabSchedule::default();
        // 100 * 4 + 200 * 6 + 20 * 8
        assert_eq!(compute_bill(320.0, &s), 1760.0);
    }

    #[test]
    fn bill_is_monotonic_in_consumption() {
        let s = custom();
        let mut prev = 0.0;
        for step in 0..=1200 {
            let kwh = step as f64 * 0.75;
            let bill = compute_bill(kwh, &s);
            assert!(bill >= prev, "bill dropped at {kwh} kWh");
            prev = bill;
        }
    }

    #[test]
    fn breakdown_units_sum_to_consumption() {
        let b = SlabSchedule::default().breakdown(612.5);
        assert_eq!(b.charges.len(), 4);
        assert_eq!(b.units_kwh(), 612.5);
        assert_eq!(b.charges[3].units_kwh, 112.5);
        assert_eq!(b.charges[3].tier, "slab4");
    }

    #[test]
    fn flat_plan_falls_back_to_default_rate() {
        assert_eq!(TariffPlan::flat(None).flat_rate, DEFAULT_FLAT_RATE);
        assert_eq!(TariffPlan::flat(Some(0.0)).flat_rate, DEFAULT_FLAT_RATE);
        assert_eq!(TariffPlan::flat(Some(-3.0)).flat_rate, DEFAULT_FLAT_RATE);
        assert_eq!(TariffPlan::flat(Some(6.5)).flat_rate, 6.5);
    }

    #[test]
    fn flat_plan_bills_linearly() {
        let plan = TariffPlan::flat(Some(7.0));
        assert_eq!(plan.bill(150.0), 1050.0);
        assert_eq!(plan.bill(0.0), 0.0);
        assert_eq!(plan.effective_tariff(150.0), 7.0);
    }

    #[test]
    fn effective_tariff_averages_slab_bill() {
        let plan = TariffPlan::slabs(SlabSchedule::default(), None);
        // 1760 / 320
        assert_eq!(plan.effective_tariff(320.0), 5.5);
    }

    #[test]
    fn effective_tariff_without_consumption_uses_flat_rate() {
        let plan = TariffPlan::slabs(SlabSchedule::default(), Some(6.0));
        assert_eq!(plan.effective_tariff(0.0), 6.0);
        let plan = TariffPlan::slabs(SlabSchedule::default(), None);
        assert_eq!(plan.effective_tariff(0.0), DEFAULT_FLAT_RATE);
    }
}
