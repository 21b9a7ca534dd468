//! Network-wide descriptors: time window, qualitative case labels, base MVA, violation costs.

use bidds_core::Real;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ElectricityDemand {
    Peak,
    High,
    Average,
    Low,
    Minimum,
}

/// Shared by the vre, solar and wind availability labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Availability {
    High,
    Average,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum WeatherTemperature {
    Hottest,
    Warm,
    Average,
    Cool,
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DayType {
    Weekday,
    Weekend,
    Holiday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NetLoad {
    Peak,
    High,
    Average,
    Low,
    Minimum,
    #[serde(rename = "High-Up-Ramp")]
    HighUpRamp,
    #[serde(rename = "High-Down-Ramp")]
    HighDownRamp,
}

/// Global attributes of one network snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct General {
    /// Period beginning timestamp of the first interval, `YYYY-MM-DDThh:mm` at UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_start: Option<String>,
    /// Period beginning timestamp of the interval following the last interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_demand: Option<ElectricityDemand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vre_availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solar_availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_temperature: Option<WeatherTemperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_type: Option<DayType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_load: Option<NetLoad>,
    /// Base MVA normalization constant.
    pub base_norm_mva: Real,
}

/// Penalties applied to bus balance and branch thermal violations ($/pu-h).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ViolationCostsParameters {
    pub p_bus_vio_cost: Real,
    pub q_bus_vio_cost: Real,
    pub s_vio_cost: Real,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_options_are_exact() {
        let load: NetLoad = serde_json::from_str("\"High-Up-Ramp\"").unwrap();
        assert_eq!(load, NetLoad::HighUpRamp);
        assert!(serde_json::from_str::<Season>("\"Autumn\"").is_err());
        assert!(serde_json::from_str::<Season>("\"winter\"").is_err());
    }

    #[test]
    fn optional_labels_are_omitted() {
        let general = General {
            timestamp_start: None,
            timestamp_stop: None,
            season: Some(Season::Summer),
            electricity_demand: None,
            vre_availability: None,
            solar_availability: None,
            wind_availability: None,
            weather_temperature: None,
            day_type: None,
            net_load: None,
            base_norm_mva: 100.0,
        };
        let json = serde_json::to_string(&general).unwrap();
        assert_eq!(json, r#"{"season":"Summer","base_norm_mva":100.0}"#);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r#"{"base_norm_mva": 100.0, "base_kv": 230.0}"#;
        assert!(serde_json::from_str::<General>(raw).is_err());
    }
}
