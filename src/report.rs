//! Plain-text rendering of a recommendation for the command line.

use std::fmt;

use crate::advisor::Recommendation;
use crate::summary::template::format_rupees;

/// A recommendation together with its summary text.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationReport {
    pub recommendation: Recommendation,
    pub summary: String,
}

impl RecommendationReport {
    pub fn new(recommendation: Recommendation, summary: String) -> Self {
        Self {
            recommendation,
            summary,
        }
    }
}

impl fmt::Display for RecommendationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rec = &self.recommendation;
        let d = &rec.details;
        writeln!(f, "--- Recommendation ---")?;
        writeln!(f, "Location:              {}", rec.location)?;
        writeln!(f, "Usage type:            {}", rec.usage_type)?;
        writeln!(
            f,
            "System:                {:.1} kW {}",
            rec.recommended_size_kw, rec.system_type
        )?;
        writeln!(
            f,
            "Generation:            {} kWh/month",
            rec.estimated_generation_kwh
        )?;
        writeln!(
            f,
            "Consumption:           {:.1} kWh -> {:.1} kWh from grid",
            d.current_consumption, d.remaining_consumption
        )?;
        writeln!(
            f,
            "Bill:                  {:.2} -> {:.2} ({} tariff, {:.2}/kWh)",
            d.current_bill,
            d.new_bill,
            if d.slabs_used { "slab" } else { "flat" },
            d.effective_tariff
        )?;
        writeln!(
            f,
            "Monthly savings:       {}",
            format_rupees(rec.monthly_savings)
        )?;
        writeln!(f, "System cost:           {}", format_rupees(rec.system_cost))?;
        let subsidy = &d.subsidy_info;
        if let (true, Some(amount), Some(gross)) =
            (subsidy.available, subsidy.amount, subsidy.gross_cost)
        {
            writeln!(
                f,
                "Subsidy:               {} of {} ({:.0}%)",
                format_rupees(amount),
                format_rupees(gross),
                subsidy.percentage.unwrap_or_default()
            )?;
        }
        writeln!(f, "Payback:               {:.1} years", rec.payback_years)?;
        writeln!(f, "CO2 reduction:         {:.2} t/month", d.co2_reduction)?;
        writeln!(f)?;
        write!(f, "{}", self.summary)
    }
}
