//! Slab billing properties across the public billing API.

use energy_advisor::billing::{DEFAULT_FLAT_RATE, SlabSchedule, TariffPlan, compute_bill};

#[test]
fn default_schedule_tier_boundaries() {
    let s = SlabSchedule::default();
    assert_eq!(compute_bill(0.0, &s), 0.0);
    assert_eq!(compute_bill(100.0, &s), 400.0);
    assert_eq!(compute_bill(300.0, &s), 1600.0);
    assert_eq!(compute_bill(500.0, &s), 3200.0);
    assert_eq!(compute_bill(600.0, &s), 4200.0);
}

#[test]
fn bill_is_monotone_in_consumption() {
    let s = SlabSchedule::new(3.5, 5.25, 7.0, 9.5);
    let mut prev = 0.0;
    for step in 0..=1500 {
        let kwh = step as f64 * 0.5;
        let bill = compute_bill(kwh, &s);
        assert!(bill >= prev, "bill dropped at {kwh} kWh: {bill} < {prev}");
        prev = bill;
    }
}

#[test]
fn bill_is_continuous_at_tier_edges() {
    let s = SlabSchedule::default();
    for edge in [100.0, 300.0, 500.0] {
        let below = compute_bill(edge - 1e-6, &s);
        let above = compute_bill(edge + 1e-6, &s);
        assert!((above - below).abs() < 1e-3, "jump at {edge}: {below} vs {above}");
    }
}

#[test]
fn non_positive_consumption_bills_zero() {
    let s = SlabSchedule::default();
    assert_eq!(compute_bill(-40.0, &s), 0.0);
    assert_eq!(TariffPlan::flat(Some(6.0)).bill(-40.0), 0.0);
}

#[test]
fn breakdown_total_matches_bill() {
    let s = SlabSchedule::new(4.5, 6.5, 8.5, 11.0);
    for kwh in [0.0, 42.0, 100.0, 250.0, 499.0, 731.5] {
        let breakdown = s.breakdown(kwh);
        assert!((breakdown.total() - compute_bill(kwh, &s)).abs() < 1e-9);
        assert!((breakdown.units_kwh() - kwh).abs() < 1e-9);
    }
}

#[test]
fn plan_resolution_and_effective_tariff() {
    let flat = TariffPlan::flat(None);
    assert!(!flat.uses_slabs());
    assert_eq!(flat.effective_tariff(250.0), DEFAULT_FLAT_RATE);

    let slabs = TariffPlan::slabs(SlabSchedule::default(), Some(7.0));
    assert!(slabs.uses_slabs());
    assert_eq!(slabs.bill(320.0), 1760.0);
    assert_eq!(slabs.effective_tariff(320.0), 5.5);
    assert_eq!(slabs.effective_tariff(0.0), 7.0);
}
