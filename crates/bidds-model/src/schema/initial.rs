//! Initial-status sub-records: the state of each entity at time period 0.

use bidds_core::{Indicator, Real};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BusInitialStatus {
    /// Voltage magnitude (p.u.)
    pub vm: Real,
    /// Voltage angle (rad)
    pub va: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ShuntInitialStatus {
    pub on_status: Indicator,
    pub step: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeviceInitialStatus {
    pub on_status: Indicator,
    /// Active production (producer) or consumption (consumer), p.u.
    pub p: Real,
    /// Reactive production (producer) or consumption (consumer), p.u.
    pub q: Real,
    /// Accumulated down time (hr)
    pub accu_down_time: Real,
    /// Accumulated up time (hr)
    pub accu_up_time: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AcLineInitialStatus {
    pub on_status: Indicator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TransformerInitialStatus {
    pub on_status: Indicator,
    /// Off-nominal taps ratio
    pub tm: Real,
    /// Phase shifting angle (rad)
    pub ta: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DcLineInitialStatus {
    pub on_status: Indicator,
    pub pdc_fr: Real,
    pub qdc_fr: Real,
    pub qdc_to: Real,
}
