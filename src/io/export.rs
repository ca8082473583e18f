//! CSV export of the before/after bill breakdown.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::advisor::Recommendation;
use crate::billing::TariffPlan;

/// Column header for the breakdown export.
const HEADER: &str = "stage,tier,units_kwh,rate,cost";

/// Exports the per-tier bill before and after installation to a CSV file.
///
/// # Arguments
///
/// * `plan` - Tariff plan the recommendation was billed under
/// * `rec` - Computed recommendation
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_breakdown_csv(plan: &TariffPlan, rec: &Recommendation, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_breakdown_csv(plan, rec, buf)
}

/// Writes the breakdown as CSV to any writer.
///
/// One row per tier for the `current` stage, then one per tier for the
/// `after` stage. Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_breakdown_csv(
    plan: &TariffPlan,
    rec: &Recommendation,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER.split(','))?;

    let stages = [
        ("current", rec.details.current_consumption),
        ("after", rec.details.remaining_consumption),
    ];
    for (stage, kwh) in stages {
        for charge in plan.breakdown(kwh).charges {
            wtr.write_record(&[
                stage.to_string(),
                charge.tier.to_string(),
                format!("{:.2}", charge.units_kwh),
                format!("{:.2}", charge.rate),
                format!("{:.2}", charge.cost),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
