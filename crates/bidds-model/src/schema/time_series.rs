//! Time-varying input: one value per time period for every array field.

use bidds_core::{CostBlock, Indicator, Real};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Horizon;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TimeSeriesGeneral {
    /// Number of time periods of the horizon
    pub time_periods: i64,
    /// Duration of each time period (hr)
    pub interval_duration: Vec<Real>,
}

impl TimeSeriesGeneral {
    /// Horizon length, when `time_periods` is a usable length.
    pub fn horizon(&self) -> Option<usize> {
        usize::try_from(self.time_periods).ok().filter(|n| *n > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeviceTimeSeries {
    pub uid: String,
    pub on_status_ub: Vec<Indicator>,
    pub on_status_lb: Vec<Indicator>,
    pub p_ub: Vec<Real>,
    pub p_lb: Vec<Real>,
    pub q_ub: Vec<Real>,
    pub q_lb: Vec<Real>,
    /// Per period, the offer or bid blocks `[marginal cost, block size]`
    pub cost: Vec<Vec<CostBlock>>,
    pub p_reg_res_up_cost: Vec<Real>,
    pub p_reg_res_down_cost: Vec<Real>,
    pub p_syn_res_cost: Vec<Real>,
    pub p_nsyn_res_cost: Vec<Real>,
    pub p_ramp_res_up_online_cost: Vec<Real>,
    pub p_ramp_res_down_online_cost: Vec<Real>,
    pub p_ramp_res_up_offline_cost: Vec<Real>,
    pub p_ramp_res_down_offline_cost: Vec<Real>,
    pub q_res_up_cost: Vec<Real>,
    pub q_res_down_cost: Vec<Real>,
}

impl DeviceTimeSeries {
    /// Per-period reserve cost arrays with their field names.
    pub fn reserve_costs(&self) -> [(&'static str, &[Real]); 10] {
        [
            ("p_reg_res_up_cost", self.p_reg_res_up_cost.as_slice()),
            ("p_reg_res_down_cost", self.p_reg_res_down_cost.as_slice()),
            ("p_syn_res_cost", self.p_syn_res_cost.as_slice()),
            ("p_nsyn_res_cost", self.p_nsyn_res_cost.as_slice()),
            ("p_ramp_res_up_online_cost", self.p_ramp_res_up_online_cost.as_slice()),
            ("p_ramp_res_down_online_cost", self.p_ramp_res_down_online_cost.as_slice()),
            ("p_ramp_res_up_offline_cost", self.p_ramp_res_up_offline_cost.as_slice()),
            ("p_ramp_res_down_offline_cost", self.p_ramp_res_down_offline_cost.as_slice()),
            ("q_res_up_cost", self.q_res_up_cost.as_slice()),
            ("q_res_down_cost", self.q_res_down_cost.as_slice()),
        ]
    }
}

impl Horizon for DeviceTimeSeries {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        let mut lengths = vec![
            ("on_status_ub", self.on_status_ub.len()),
            ("on_status_lb", self.on_status_lb.len()),
            ("p_ub", self.p_ub.len()),
            ("p_lb", self.p_lb.len()),
            ("q_ub", self.q_ub.len()),
            ("q_lb", self.q_lb.len()),
            ("cost", self.cost.len()),
        ];
        lengths.extend(self.reserve_costs().iter().map(|(name, v)| (*name, v.len())));
        lengths
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ActiveZonalReserveTimeSeries {
    pub uid: String,
    /// Ramping reserve up requirement per period (p.u.)
    #[serde(rename = "RAMPING_RESERVE_UP")]
    pub ramping_reserve_up: Vec<Real>,
    #[serde(rename = "RAMPING_RESERVE_DOWN")]
    pub ramping_reserve_down: Vec<Real>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReactiveZonalReserveTimeSeries {
    pub uid: String,
    #[serde(rename = "REACT_UP")]
    pub react_up: Vec<Real>,
    #[serde(rename = "REACT_DOWN")]
    pub react_down: Vec<Real>,
}

impl Horizon for ActiveZonalReserveTimeSeries {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("RAMPING_RESERVE_UP", self.ramping_reserve_up.len()),
            ("RAMPING_RESERVE_DOWN", self.ramping_reserve_down.len()),
        ]
    }
}

impl Horizon for ReactiveZonalReserveTimeSeries {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("REACT_UP", self.react_up.len()),
            ("REACT_DOWN", self.react_down.len()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TimeSeriesInput {
    pub general: TimeSeriesGeneral,
    pub simple_dispatchable_device: Vec<DeviceTimeSeries>,
    pub active_zonal_reserve: Vec<ActiveZonalReserveTimeSeries>,
    pub reactive_zonal_reserve: Vec<ReactiveZonalReserveTimeSeries>,
}

entity!(DeviceTimeSeries, "time_series_input.simple_dispatchable_device");
entity!(ActiveZonalReserveTimeSeries, "time_series_input.active_zonal_reserve");
entity!(ReactiveZonalReserveTimeSeries, "time_series_input.reactive_zonal_reserve");
