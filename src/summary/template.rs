//! Phrase-pool summary composer.
//!
//! One phrase is drawn from each of four pools (intro, generation, savings,
//! investment) and one from a benefit pool chosen by usage and technology,
//! then joined in that order.

use rand::Rng;

use crate::advisor::{Recommendation, SystemType, UsageType};

const AGRI_SOLAR_BENEFITS: &[&str] = &[
    "Solar irrigation pumps remove diesel costs and reduce dependence on grid supply.",
    "The PM-KUSUM scheme offers substantial subsidies for agricultural solar installations.",
    "Reliable solar-powered irrigation supports steadier crop yields.",
    "Surplus generation can be sold back to the grid as additional farm income.",
];

const AGRI_OTHER_BENEFITS: &[&str] = &[
    "Renewable power for farm operations cuts running costs significantly.",
    "Government programmes offer special incentives for farm-based renewable energy.",
    "Clean energy strengthens the sustainability credentials of farm produce.",
];

const SOLAR_BENEFITS: &[&str] = &[
    "This renewable installation will shrink your carbon footprint significantly.",
    "Beyond the financial return, you will be contributing to environmental sustainability.",
    "Solar panels need very little maintenance and deliver clean electricity for 25+ years.",
];

const WIND_BENEFITS: &[&str] = &[
    "Wind energy suits industrial sites with high, steady consumption.",
    "A wind system keeps generating day and night, complementing your demand profile.",
    "Industrial wind installations provide consistent power with minimal upkeep.",
];

/// Benefit pool for a usage/technology pair.
pub fn benefit_pool(usage: &UsageType, system: SystemType) -> &'static [&'static str] {
    match (usage, system) {
        (UsageType::Agriculture, SystemType::Solar) => AGRI_SOLAR_BENEFITS,
        (UsageType::Agriculture, SystemType::Wind) => AGRI_OTHER_BENEFITS,
        (_, SystemType::Solar) => SOLAR_BENEFITS,
        (_, SystemType::Wind) => WIND_BENEFITS,
    }
}

/// Formats whole currency units with thousands separators, e.g. `₹157,500`.
pub fn format_rupees(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₹{grouped}")
}

fn pick<R: Rng>(pool: Vec<String>, rng: &mut R) -> String {
    let idx = rng.random_range(0..pool.len());
    pool.into_iter().nth(idx).unwrap_or_default()
}

/// Composes a one-paragraph summary of `rec`.
///
/// Phrase choice is driven entirely by `rng`, so a seeded generator gives a
/// reproducible summary.
pub fn compose<R: Rng>(rec: &Recommendation, rng: &mut R) -> String {
    let usage = &rec.usage_type;
    let location = &rec.location;
    let system = rec.system_type;
    let size = rec.recommended_size_kw;
    let generation = rec.estimated_generation_kwh;
    let savings = format_rupees(rec.monthly_savings);
    let cost = format_rupees(rec.system_cost);
    let payback = rec.payback_years;

    let intro = pick(
        vec![
            format!("Based on your {usage} in {location}, we recommend a {size:.1} kW {system} energy system."),
            format!("For your {usage} located in {location}, a {size:.1} kW {system} system would be the best fit."),
            format!("Our analysis suggests a {size:.1} kW {system} system is ideal for your {usage} in {location}."),
        ],
        rng,
    );
    let generation_phrase = pick(
        vec![
            format!("This system should generate approximately {generation} kWh per month,"),
            format!("You can expect around {generation} kWh of generation monthly,"),
            format!("Under typical {location} conditions it will produce about {generation} kWh each month,"),
        ],
        rng,
    );
    let savings_phrase = pick(
        vec![
            format!("saving you {savings} on your monthly electricity bill."),
            format!("which translates to monthly savings of {savings}."),
            format!("cutting your electricity expenses by roughly {savings} per month."),
        ],
        rng,
    );
    let investment_phrase = pick(
        vec![
            format!("The total investment of {cost} would be recovered in {payback:.1} years, making it a sound financial decision."),
            format!("At a total cost of {cost}, the system pays for itself in {payback:.1} years."),
            format!("The system costs approximately {cost} with a payback period of {payback:.1} years."),
        ],
        rng,
    );
    let benefits = benefit_pool(usage, system);
    let benefit = benefits[rng.random_range(0..benefits.len())];

    format!("{intro} {generation_phrase} {savings_phrase} {investment_phrase} {benefit}")
}
