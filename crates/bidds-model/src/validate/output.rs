//! Rules of the solution document.

use bidds_core::{Checks, ValidationReport};

use super::document::check_unique_uids;
use super::{RecordRules, Validate, check_collection, check_record_lengths};
use crate::config::ValidationConfig;
use crate::schema::{
    AcLineOutput, BusOutput, DcLineOutput, DeviceOutput, Horizon, OutputDataFile,
    ShuntOutput, TimeSeriesOutput, TransformerOutput,
};

impl RecordRules for BusOutput {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_finite("vm", &self.vm);
        checks.each_finite("va", &self.va);
    }
}

impl RecordRules for ShuntOutput {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_int_non_negative("step", &self.step);
    }
}

impl RecordRules for DeviceOutput {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_finite("p_on", &self.p_on);
        checks.each_finite("q", &self.q);
        for (field, values) in self.reserves() {
            checks.each_non_negative(field, values);
        }
    }
}

impl RecordRules for AcLineOutput {
    fn check(&self, _checks: &mut Checks<'_>) {}
}

impl RecordRules for TransformerOutput {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_positive("tm", &self.tm);
        checks.each_finite("ta", &self.ta);
    }
}

impl RecordRules for DcLineOutput {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_finite("pdc", &self.pdc);
        checks.each_finite("qdc_fr", &self.qdc_fr);
        checks.each_finite("qdc_to", &self.qdc_to);
    }
}

validate_records!(
    BusOutput,
    ShuntOutput,
    DeviceOutput,
    AcLineOutput,
    TransformerOutput,
    DcLineOutput,
);

impl TimeSeriesOutput {
    /// Length of the first array of the first record, in collection order.
    pub fn horizon(&self) -> Option<usize> {
        fn first<T: Horizon>(records: &[T]) -> Option<usize> {
            records.first().and_then(|r| r.lengths().first().map(|(_, len)| *len))
        }
        first(&self.bus)
            .or_else(|| first(&self.shunt))
            .or_else(|| first(&self.simple_dispatchable_device))
            .or_else(|| first(&self.ac_line))
            .or_else(|| first(&self.two_winding_transformer))
            .or_else(|| first(&self.dc_line))
    }

    /// Every array of every record has `horizon` entries.
    pub(crate) fn check_horizon(&self, horizon: usize, report: &mut ValidationReport) {
        check_record_lengths(&self.bus, horizon, report);
        check_record_lengths(&self.shunt, horizon, report);
        check_record_lengths(&self.simple_dispatchable_device, horizon, report);
        check_record_lengths(&self.ac_line, horizon, report);
        check_record_lengths(&self.two_winding_transformer, horizon, report);
        check_record_lengths(&self.dc_line, horizon, report);
    }
}

impl Validate for TimeSeriesOutput {
    fn validate_into(&self, _config: &ValidationConfig, report: &mut ValidationReport) {
        check_collection(&self.bus, report);
        check_collection(&self.shunt, report);
        check_collection(&self.simple_dispatchable_device, report);
        check_collection(&self.ac_line, report);
        check_collection(&self.two_winding_transformer, report);
        check_collection(&self.dc_line, report);

        if let Some(horizon) = self.horizon() {
            self.check_horizon(horizon, report);
        }
        check_unique_uids(self.uids().into_iter().map(|(_, uid)| uid), report);
    }
}

impl Validate for OutputDataFile {
    fn validate_into(&self, config: &ValidationConfig, report: &mut ValidationReport) {
        self.time_series_output.validate_into(config, report);
    }
}
