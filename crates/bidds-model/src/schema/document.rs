//! Document roots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::network::Network;
use super::output::TimeSeriesOutput;
use super::reliability::Reliability;
use super::time_series::TimeSeriesInput;

/// Problem input: the network, its time-varying bounds and its contingencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(title = "InputDataFile")]
pub struct InputDataFile {
    pub network: Network,
    pub time_series_input: TimeSeriesInput,
    #[serde(default)]
    pub reliability: Reliability,
}

impl InputDataFile {
    /// Record count per collection, in document order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        let network = &self.network;
        let ts = &self.time_series_input;
        vec![
            ("bus", network.bus.len()),
            ("shunt", network.shunt.len()),
            (
                "simple_dispatchable_device",
                network.simple_dispatchable_device.len(),
            ),
            ("ac_line", network.ac_line.len()),
            (
                "two_winding_transformer",
                network.two_winding_transformer.len(),
            ),
            ("dc_line", network.dc_line.len()),
            ("active_zonal_reserve", network.active_zonal_reserve.len()),
            ("reactive_zonal_reserve", network.reactive_zonal_reserve.len()),
            (
                "time_series_input.simple_dispatchable_device",
                ts.simple_dispatchable_device.len(),
            ),
            (
                "time_series_input.active_zonal_reserve",
                ts.active_zonal_reserve.len(),
            ),
            (
                "time_series_input.reactive_zonal_reserve",
                ts.reactive_zonal_reserve.len(),
            ),
            ("contingency", self.reliability.contingency.len()),
        ]
    }
}

/// Solution of one problem input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(title = "OutputDataFile")]
pub struct OutputDataFile {
    pub time_series_output: TimeSeriesOutput,
}

impl OutputDataFile {
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        let out = &self.time_series_output;
        vec![
            ("bus", out.bus.len()),
            ("shunt", out.shunt.len()),
            (
                "simple_dispatchable_device",
                out.simple_dispatchable_device.len(),
            ),
            ("ac_line", out.ac_line.len()),
            ("two_winding_transformer", out.two_winding_transformer.len()),
            ("dc_line", out.dc_line.len()),
        ]
    }
}
