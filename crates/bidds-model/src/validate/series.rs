//! Rules of the time-series input.
//!
//! Record rules compare arrays of one record period by period. The horizon
//! length comes from `general.time_periods`, so array lengths are checked at
//! section level.

use bidds_core::{Checks, EntityRef, ValidationReport, failing_indices, is_non_negative};

use super::{RecordRules, Validate, check_collection, check_record_lengths};
use crate::config::ValidationConfig;
use crate::schema::{
    ActiveZonalReserveTimeSeries, DeviceTimeSeries, ReactiveZonalReserveTimeSeries,
    TimeSeriesGeneral, TimeSeriesInput,
};

impl RecordRules for TimeSeriesGeneral {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.int_positive("time_periods", self.time_periods);
        checks.each_positive("interval_duration", &self.interval_duration);
        if let Some(horizon) = self.horizon() {
            checks.length("interval_duration", self.interval_duration.len(), horizon);
        }
    }
}

impl RecordRules for DeviceTimeSeries {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_finite("p_ub", &self.p_ub);
        checks.each_finite("p_lb", &self.p_lb);
        checks.each_finite("q_ub", &self.q_ub);
        checks.each_finite("q_lb", &self.q_lb);
        for (field, costs) in self.reserve_costs() {
            checks.each_non_negative(field, costs);
        }
        checks.elements(
            "cost",
            failing_indices(&self.cost, |blocks| {
                blocks.iter().all(|b| b.marginal_cost().is_finite())
            }),
            "marginal cost finite",
        );
        checks.elements(
            "cost",
            failing_indices(&self.cost, |blocks| {
                blocks.iter().all(|b| is_non_negative(b.size()))
            }),
            "block size >= 0",
        );

        if checks.passed() {
            checks.each_le(
                ("on_status_lb", self.on_status_lb.as_slice()),
                ("on_status_ub", self.on_status_ub.as_slice()),
            );
            checks.each_le(("p_lb", self.p_lb.as_slice()), ("p_ub", self.p_ub.as_slice()));
            checks.each_le(("q_lb", self.q_lb.as_slice()), ("q_ub", self.q_ub.as_slice()));
        }
    }
}

impl RecordRules for ActiveZonalReserveTimeSeries {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_non_negative("RAMPING_RESERVE_UP", &self.ramping_reserve_up);
        checks.each_non_negative("RAMPING_RESERVE_DOWN", &self.ramping_reserve_down);
    }
}

impl RecordRules for ReactiveZonalReserveTimeSeries {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.each_non_negative("REACT_UP", &self.react_up);
        checks.each_non_negative("REACT_DOWN", &self.react_down);
    }
}

validate_records!(
    DeviceTimeSeries,
    ActiveZonalReserveTimeSeries,
    ReactiveZonalReserveTimeSeries,
);

impl Validate for TimeSeriesGeneral {
    fn validate_into(&self, _config: &ValidationConfig, report: &mut ValidationReport) {
        self.check(&mut Checks::new(
            EntityRef::section("time_series_input.general"),
            report,
        ));
    }
}

impl Validate for TimeSeriesInput {
    fn validate_into(&self, config: &ValidationConfig, report: &mut ValidationReport) {
        self.general.validate_into(config, report);
        check_collection(&self.simple_dispatchable_device, report);
        check_collection(&self.active_zonal_reserve, report);
        check_collection(&self.reactive_zonal_reserve, report);

        let Some(horizon) = self.general.horizon() else {
            return;
        };
        check_record_lengths(&self.simple_dispatchable_device, horizon, report);
        check_record_lengths(&self.active_zonal_reserve, horizon, report);
        check_record_lengths(&self.reactive_zonal_reserve, horizon, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidds_core::{CostBlock, Indicator, ValidationError};

    fn device(horizon: usize) -> DeviceTimeSeries {
        DeviceTimeSeries {
            uid: "G1".to_string(),
            on_status_ub: vec![Indicator::On; horizon],
            on_status_lb: vec![Indicator::Off; horizon],
            p_ub: vec![1.0; horizon],
            p_lb: vec![0.0; horizon],
            q_ub: vec![0.5; horizon],
            q_lb: vec![-0.5; horizon],
            cost: vec![vec![CostBlock(10.0, 0.5), CostBlock(20.0, 0.5)]; horizon],
            p_reg_res_up_cost: vec![1.0; horizon],
            p_reg_res_down_cost: vec![1.0; horizon],
            p_syn_res_cost: vec![1.0; horizon],
            p_nsyn_res_cost: vec![1.0; horizon],
            p_ramp_res_up_online_cost: vec![1.0; horizon],
            p_ramp_res_down_online_cost: vec![1.0; horizon],
            p_ramp_res_up_offline_cost: vec![1.0; horizon],
            p_ramp_res_down_offline_cost: vec![1.0; horizon],
            q_res_up_cost: vec![1.0; horizon],
            q_res_down_cost: vec![1.0; horizon],
        }
    }

    fn section(device: DeviceTimeSeries, time_periods: i64) -> TimeSeriesInput {
        TimeSeriesInput {
            general: TimeSeriesGeneral {
                time_periods,
                interval_duration: vec![1.0; time_periods.max(0) as usize],
            },
            simple_dispatchable_device: vec![device],
            active_zonal_reserve: vec![],
            reactive_zonal_reserve: vec![],
        }
    }

    #[test]
    fn consistent_device_passes() {
        let ts = section(device(4), 4);
        assert!(ts.validate(&ValidationConfig::default()).is_ok());
    }

    #[test]
    fn lower_above_upper_reports_every_period() {
        let mut d = device(4);
        d.p_lb = vec![0.0, 2.0, 0.0, 3.0];
        let report = ts_report(section(d, 4));
        assert_eq!(report.len(), 1);
        match &report.errors()[0] {
            ValidationError::ElementConstraint { indices, .. } => assert_eq!(indices, &vec![1, 3]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_reserve_cost_skips_relations() {
        let mut d = device(3);
        d.q_res_up_cost[2] = -1.0;
        d.p_lb = vec![5.0; 3];
        let report = ts_report(section(d, 3));
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].fields(), vec!["q_res_up_cost"]);
    }

    #[test]
    fn arrays_must_cover_the_horizon() {
        let mut d = device(3);
        d.p_ub.pop();
        d.cost.push(vec![]);
        let report = ts_report(section(d, 3));
        let fields: Vec<_> = report.iter().flat_map(|e| e.fields()).collect();
        assert_eq!(fields, vec!["p_ub", "cost"]);
        assert!(report
            .iter()
            .all(|e| matches!(e, ValidationError::LengthMismatch { .. })));
    }

    #[test]
    fn zonal_requirements_must_cover_the_horizon() {
        let mut ts = section(device(2), 2);
        ts.active_zonal_reserve.push(ActiveZonalReserveTimeSeries {
            uid: "Z1".to_string(),
            ramping_reserve_up: vec![0.1, 0.1],
            ramping_reserve_down: vec![0.1],
        });
        ts.reactive_zonal_reserve.push(ReactiveZonalReserveTimeSeries {
            uid: "QZ1".to_string(),
            react_up: vec![0.1, 0.1, 0.1],
            react_down: vec![0.1, 0.1],
        });
        let report = ts_report(ts);
        let fields: Vec<_> = report.iter().flat_map(|e| e.fields()).collect();
        assert_eq!(fields, vec!["RAMPING_RESERVE_DOWN", "REACT_UP"]);
        assert_eq!(
            report.errors()[1].entity().and_then(|e| e.uid.as_deref()),
            Some("QZ1")
        );
    }

    #[test]
    fn negative_block_size_names_the_period() {
        let mut d = device(2);
        d.cost[1][0] = CostBlock(10.0, -0.1);
        let report = ts_report(section(d, 2));
        assert!(report.errors()[0].to_string().contains("block size >= 0 at indices [1]"));
    }

    #[test]
    fn non_positive_horizon() {
        let ts = section(device(0), 0);
        let report = ts_report(ts);
        assert_eq!(report.errors()[0].fields(), vec!["time_periods"]);
    }

    fn ts_report(ts: TimeSeriesInput) -> ValidationReport {
        ts.validate(&ValidationConfig::default()).unwrap_err()
    }
}
