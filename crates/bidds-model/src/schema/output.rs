//! Solution records: one value per time period for every array field.

use bidds_core::{Indicator, Real};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Horizon;
use super::network::collect_uids;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BusOutput {
    pub uid: String,
    pub vm: Vec<Real>,
    pub va: Vec<Real>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ShuntOutput {
    pub uid: String,
    pub on_status: Vec<Indicator>,
    pub step: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeviceOutput {
    pub uid: String,
    pub on_status: Vec<Indicator>,
    pub p_on: Vec<Real>,
    pub q: Vec<Real>,
    pub p_reg_res_up: Vec<Real>,
    pub p_reg_res_down: Vec<Real>,
    pub p_syn_res: Vec<Real>,
    pub p_nsyn_res: Vec<Real>,
    pub p_ramp_res_up_online: Vec<Real>,
    pub p_ramp_res_down_online: Vec<Real>,
    pub p_ramp_res_up_offline: Vec<Real>,
    pub p_ramp_res_down_offline: Vec<Real>,
    pub q_res_up: Vec<Real>,
    pub q_res_down: Vec<Real>,
}

impl DeviceOutput {
    /// Reserve quantities with their field names.
    pub fn reserves(&self) -> [(&'static str, &[Real]); 10] {
        [
            ("p_reg_res_up", self.p_reg_res_up.as_slice()),
            ("p_reg_res_down", self.p_reg_res_down.as_slice()),
            ("p_syn_res", self.p_syn_res.as_slice()),
            ("p_nsyn_res", self.p_nsyn_res.as_slice()),
            ("p_ramp_res_up_online", self.p_ramp_res_up_online.as_slice()),
            ("p_ramp_res_down_online", self.p_ramp_res_down_online.as_slice()),
            ("p_ramp_res_up_offline", self.p_ramp_res_up_offline.as_slice()),
            ("p_ramp_res_down_offline", self.p_ramp_res_down_offline.as_slice()),
            ("q_res_up", self.q_res_up.as_slice()),
            ("q_res_down", self.q_res_down.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AcLineOutput {
    pub uid: String,
    pub on_status: Vec<Indicator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TransformerOutput {
    pub uid: String,
    pub tm: Vec<Real>,
    pub ta: Vec<Real>,
    pub on_status: Vec<Indicator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DcLineOutput {
    pub uid: String,
    pub pdc: Vec<Real>,
    pub qdc_fr: Vec<Real>,
    pub qdc_to: Vec<Real>,
}

impl Horizon for BusOutput {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![("vm", self.vm.len()), ("va", self.va.len())]
    }
}

impl Horizon for ShuntOutput {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("on_status", self.on_status.len()),
            ("step", self.step.len()),
        ]
    }
}

impl Horizon for DeviceOutput {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        let mut lengths = vec![
            ("on_status", self.on_status.len()),
            ("p_on", self.p_on.len()),
            ("q", self.q.len()),
        ];
        lengths.extend(self.reserves().iter().map(|(name, v)| (*name, v.len())));
        lengths
    }
}

impl Horizon for AcLineOutput {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![("on_status", self.on_status.len())]
    }
}

impl Horizon for TransformerOutput {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("tm", self.tm.len()),
            ("ta", self.ta.len()),
            ("on_status", self.on_status.len()),
        ]
    }
}

impl Horizon for DcLineOutput {
    fn lengths(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("pdc", self.pdc.len()),
            ("qdc_fr", self.qdc_fr.len()),
            ("qdc_to", self.qdc_to.len()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TimeSeriesOutput {
    pub bus: Vec<BusOutput>,
    pub shunt: Vec<ShuntOutput>,
    pub simple_dispatchable_device: Vec<DeviceOutput>,
    pub ac_line: Vec<AcLineOutput>,
    pub two_winding_transformer: Vec<TransformerOutput>,
    pub dc_line: Vec<DcLineOutput>,
}

impl TimeSeriesOutput {
    /// Every uid of the solution with its collection, in document order.
    pub fn uids(&self) -> Vec<(&'static str, &str)> {
        let mut uids = Vec::new();
        collect_uids(&mut uids, &self.bus);
        collect_uids(&mut uids, &self.shunt);
        collect_uids(&mut uids, &self.simple_dispatchable_device);
        collect_uids(&mut uids, &self.ac_line);
        collect_uids(&mut uids, &self.two_winding_transformer);
        collect_uids(&mut uids, &self.dc_line);
        uids
    }
}

entity!(BusOutput, "time_series_output.bus");
entity!(ShuntOutput, "time_series_output.shunt");
entity!(DeviceOutput, "time_series_output.simple_dispatchable_device");
entity!(AcLineOutput, "time_series_output.ac_line");
entity!(TransformerOutput, "time_series_output.two_winding_transformer");
entity!(DcLineOutput, "time_series_output.dc_line");
