//! Prompt sent to the completion API.

use crate::advisor::Recommendation;

use super::template::format_rupees;

/// Builds the recommendation prompt embedding every computed metric.
pub fn build_prompt(rec: &Recommendation) -> String {
    format!(
        "You are an energy expert providing recommendations for renewable energy solutions.\n\
         \n\
         Based on the following information:\n\
         - Location: {location}\n\
         - Usage Type: {usage}\n\
         - System Type: {system}\n\
         - System Size: {size:.1} kW\n\
         - Monthly Generation: {generation} kWh\n\
         - Monthly Savings: {savings}\n\
         - Total System Cost: {cost}\n\
         - Payback Period: {payback:.1} years\n\
         - Monthly CO2 Reduction: {co2:.2} tonnes\n\
         \n\
         Write one paragraph recommending this renewable energy system, covering its benefits, \
         savings, and environmental impact.\n\
         Keep it focused and concise (3-5 sentences only).\n",
        location = rec.location,
        usage = rec.usage_type,
        system = rec.system_type,
        size = rec.recommended_size_kw,
        generation = rec.estimated_generation_kwh,
        savings = format_rupees(rec.monthly_savings),
        cost = format_rupees(rec.system_cost),
        payback = rec.payback_years,
        co2 = rec.details.co2_reduction,
    )
}
