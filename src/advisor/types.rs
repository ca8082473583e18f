//! Consumer inputs and the derived recommendation.

use std::fmt;

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::billing::{SlabSchedule, TariffPlan};
use crate::error::AdvisorError;

/// What the energy is used for.
///
/// Unrecognised values are kept verbatim in [`UsageType::Other`] and
/// treated like a home installation by the sizing and costing rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UsageType {
    #[default]
    Home,
    Factory,
    Agriculture,
    Other(String),
}

impl UsageType {
    /// Wire name, e.g. `"home"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Home => "home",
            Self::Factory => "factory",
            Self::Agriculture => "agriculture",
            Self::Other(s) => s,
        }
    }

    /// Generation technology recommended for this usage.
    pub fn system_type(&self) -> SystemType {
        match self {
            Self::Factory => SystemType::Wind,
            Self::Home | Self::Agriculture | Self::Other(_) => SystemType::Solar,
        }
    }

    pub fn is_agriculture(&self) -> bool {
        matches!(self, Self::Agriculture)
    }
}

impl From<String> for UsageType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "home" => Self::Home,
            "factory" => Self::Factory,
            "agriculture" => Self::Agriculture,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for UsageType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<UsageType> for String {
    fn from(u: UsageType) -> Self {
        match u {
            UsageType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renewable generation technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemType {
    Solar,
    Wind,
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Solar => "solar",
            Self::Wind => "wind",
        })
    }
}

/// Per-tier rates as supplied by the consumer; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSlabRates", rename_all = "camelCase")]
pub struct SlabRates {
    pub slab1_rate: Option<f64>,
    pub slab2_rate: Option<f64>,
    pub slab3_rate: Option<f64>,
    pub slab4_rate: Option<f64>,
    /// Keys present in the input that carried no rate: explicit nulls and
    /// unrecognised names.
    #[serde(skip_serializing)]
    pub ignored_keys: usize,
}

/// Wire shape of `slabs`, keeping track of which keys were present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlabRates {
    #[serde(default, deserialize_with = "present")]
    slab1_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    slab2_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    slab3_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    slab4_rate: Option<Option<f64>>,
    #[serde(flatten)]
    other: BTreeMap<String, IgnoredAny>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn present<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Option<f64>>, D::Error> {
    Option::<f64>::deserialize(de).map(Some)
}

impl From<RawSlabRates> for SlabRates {
    fn from(raw: RawSlabRates) -> Self {
        let fields = [raw.slab1_rate, raw.slab2_rate, raw.slab3_rate, raw.slab4_rate];
        let nulls = fields.iter().filter(|f| matches!(f, Some(None))).count();
        Self {
            slab1_rate: raw.slab1_rate.flatten(),
            slab2_rate: raw.slab2_rate.flatten(),
            slab3_rate: raw.slab3_rate.flatten(),
            slab4_rate: raw.slab4_rate.flatten(),
            ignored_keys: nulls + raw.other.len(),
        }
    }
}

impl SlabRates {
    /// True when the `slabs` object had no keys at all.
    ///
    /// Any key, even a null rate or an unrecognised name, selects slab
    /// billing with default rates for the missing tiers.
    pub fn is_empty(&self) -> bool {
        self.slab1_rate.is_none()
            && self.slab2_rate.is_none()
            && self.slab3_rate.is_none()
            && self.slab4_rate.is_none()
            && self.ignored_keys == 0
    }

    /// Fills missing tiers from [`SlabSchedule::default`].
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidSlabRate`] for a negative or
    /// non-finite rate.
    pub fn to_schedule(&self) -> Result<SlabSchedule, AdvisorError> {
        let defaults = SlabSchedule::default();
        Ok(SlabSchedule::new(
            checked_rate("slab1Rate", self.slab1_rate, defaults.slab1_rate)?,
            checked_rate("slab2Rate", self.slab2_rate, defaults.slab2_rate)?,
            checked_rate("slab3Rate", self.slab3_rate, defaults.slab3_rate)?,
            checked_rate("slab4Rate", self.slab4_rate, defaults.slab4_rate)?,
        ))
    }
}

fn checked_rate(field: &'static str, rate: Option<f64>, default: f64) -> Result<f64, AdvisorError> {
    match rate {
        None => Ok(default),
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Some(value) => Err(AdvisorError::InvalidSlabRate { field, value }),
    }
}

/// Energy consumer description, as received on the wire or read from a
/// profile file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsumptionProfile {
    /// Free-text location.
    pub location: String,
    pub usage_type: UsageType,
    /// Monthly grid consumption (kWh).
    pub monthly_consumption: f64,
    /// Flat tariff (currency/kWh).
    pub tariff: Option<f64>,
    pub slabs: Option<SlabRates>,
    /// Accepted for forward compatibility; no calculation reads it.
    pub budget: Option<f64>,
}

impl Default for ConsumptionProfile {
    fn default() -> Self {
        Self {
            location: "Unknown".to_string(),
            usage_type: UsageType::Home,
            monthly_consumption: 0.0,
            tariff: None,
            slabs: None,
            budget: None,
        }
    }
}

impl ConsumptionProfile {
    /// Checks the inputs the formulas cannot absorb by defaulting.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::InvalidConsumption`] for negative or
    /// non-finite consumption and [`AdvisorError::InvalidSlabRate`] for a bad
    /// slab rate.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if !self.monthly_consumption.is_finite() || self.monthly_consumption < 0.0 {
            return Err(AdvisorError::InvalidConsumption(self.monthly_consumption));
        }
        self.tariff_plan().map(|_| ())
    }

    /// Billing plan implied by the profile: slab billing when at least one
    /// tier rate was given, otherwise the flat tariff.
    pub fn tariff_plan(&self) -> Result<TariffPlan, AdvisorError> {
        match self.slabs.as_ref().filter(|s| !s.is_empty()) {
            Some(rates) => Ok(TariffPlan::slabs(rates.to_schedule()?, self.tariff)),
            None => Ok(TariffPlan::flat(self.tariff)),
        }
    }
}

/// Subsidy metadata attached to a recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubsidyInfo {
    pub available: bool,
    /// Subsidy share in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_cost: Option<i64>,
}

impl SubsidyInfo {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Intermediate billing and impact figures behind a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationDetails {
    /// Consumption before installation (kWh).
    pub current_consumption: f64,
    /// Grid consumption left after installation (kWh).
    pub remaining_consumption: f64,
    pub current_bill: f64,
    pub new_bill: f64,
    /// Average cost per unit before installation.
    pub effective_tariff: f64,
    /// Monthly CO2 avoided (tonnes).
    pub co2_reduction: f64,
    pub slabs_used: bool,
    pub subsidy_info: SubsidyInfo,
}

/// Sizing, economics, and impact of the recommended installation.
///
/// Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub location: String,
    pub usage_type: UsageType,
    pub system_type: SystemType,
    pub recommended_size_kw: f64,
    /// Expected monthly generation (kWh).
    pub estimated_generation_kwh: i64,
    pub monthly_savings: i64,
    /// Net upfront cost after any subsidy.
    pub system_cost: i64,
    /// Years until savings repay the cost; 0 when there are no savings.
    pub payback_years: f64,
    pub details: RecommendationDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_type_parses_known_and_unknown_values() {
        assert_eq!(UsageType::from("home"), UsageType::Home);
        assert_eq!(UsageType::from("factory"), UsageType::Factory);
        assert_eq!(UsageType::from("agriculture"), UsageType::Agriculture);
        assert_eq!(
            UsageType::from("office"),
            UsageType::Other("office".to_string())
        );
        assert_eq!(String::from(UsageType::Other("office".into())), "office");
    }

    #[test]
    fn system_type_follows_usage() {
        assert_eq!(UsageType::Home.system_type(), SystemType::Solar);
        assert_eq!(UsageType::Factory.system_type(), SystemType::Wind);
        assert_eq!(UsageType::Agriculture.system_type(), SystemType::Solar);
        assert_eq!(
            UsageType::Other("shop".into()).system_type(),
            SystemType::Solar
        );
    }

    #[test]
    fn profile_deserializes_with_defaults() {
        let p: ConsumptionProfile = serde_json::from_str(r#"{"monthlyConsumption": 250}"#).unwrap();
        assert_eq!(p.location, "Unknown");
        assert_eq!(p.usage_type, UsageType::Home);
        assert_eq!(p.monthly_consumption, 250.0);
        assert!(p.slabs.is_none());
    }

    #[test]
    fn empty_slabs_object_means_flat_billing() {
        let p: ConsumptionProfile =
            serde_json::from_str(r#"{"monthlyConsumption": 250, "slabs": {}}"#).unwrap();
        let plan = p.tariff_plan().unwrap();
        assert!(!plan.uses_slabs());
        assert_eq!(plan.flat_rate, 8.0);
    }

    #[test]
    fn null_slab_rate_selects_default_slabs() {
        let p: ConsumptionProfile = serde_json::from_str(
            r#"{"monthlyConsumption": 320, "slabs": {"slab1Rate": null}}"#,
        )
        .unwrap();
        let plan = p.tariff_plan().unwrap();
        assert_eq!(plan.slabs, Some(SlabSchedule::default()));
        assert_eq!(plan.bill(320.0), 1760.0);
    }

    #[test]
    fn unrecognised_slab_keys_select_default_slabs() {
        let p: ConsumptionProfile = serde_json::from_str(
            r#"{"monthlyConsumption": 320, "tariff": 9, "slabs": {"peakRate": 12}}"#,
        )
        .unwrap();
        assert_eq!(p.slabs.as_ref().map(|s| s.ignored_keys), Some(1));
        let plan = p.tariff_plan().unwrap();
        assert!(plan.uses_slabs());
        assert_eq!(plan.slabs, Some(SlabSchedule::default()));
    }

    #[test]
    fn partial_slabs_fill_missing_tiers() {
        let p: ConsumptionProfile = serde_json::from_str(
            r#"{"monthlyConsumption": 250, "slabs": {"slab2Rate": 7.5}}"#,
        )
        .unwrap();
        let plan = p.tariff_plan().unwrap();
        assert_eq!(plan.slabs, Some(SlabSchedule::new(4.0, 7.5, 8.0, 10.0)));
    }

    #[test]
    fn validation_rejects_negative_consumption() {
        let p = ConsumptionProfile {
            monthly_consumption: -10.0,
            ..ConsumptionProfile::default()
        };
        assert_eq!(p.validate(), Err(AdvisorError::InvalidConsumption(-10.0)));
    }

    #[test]
    fn validation_rejects_negative_slab_rate() {
        let p = ConsumptionProfile {
            monthly_consumption: 100.0,
            slabs: Some(SlabRates {
                slab4_rate: Some(-1.0),
                ..SlabRates::default()
            }),
            ..ConsumptionProfile::default()
        };
        assert!(matches!(
            p.validate(),
            Err(AdvisorError::InvalidSlabRate {
                field: "slab4Rate",
                ..
            })
        ));
    }

    #[test]
    fn unavailable_subsidy_serializes_flag_only() {
        let json = serde_json::to_value(SubsidyInfo::unavailable()).unwrap();
        assert_eq!(json, serde_json::json!({"available": false}));
    }
}
