//! Rules of the static network records.

use bidds_core::{
    Checks, EntityRef, Real, ValidationReport, failing_indices, is_non_negative,
};
use chrono::NaiveDateTime;

use super::{RecordRules, Validate, check_collection};
use crate::config::ValidationConfig;
use crate::schema::{
    AcLine, ActiveZonalReserve, AdditionalShunt, Bus, DcLine, General, Network,
    ReactiveCapability, ReactiveZonalReserve, Reliability, Shunt, SimpleDispatchableDevice,
    TwoWindingTransformer, ViolationCostsParameters,
};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse `YYYY-MM-DDThh:mm`, with optional seconds.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

impl RecordRules for General {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.positive("base_norm_mva", self.base_norm_mva);

        let mut parse = |field: &str, raw: &Option<String>| {
            let raw = raw.as_deref()?;
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                checks.invalid(field, raw, "YYYY-MM-DDThh:mm");
            }
            parsed
        };
        let start = parse("timestamp_start", &self.timestamp_start);
        let stop = parse("timestamp_stop", &self.timestamp_stop);

        if checks.passed()
            && let (Some(start), Some(stop)) = (start, stop)
        {
            checks.lt(("timestamp_start", start), ("timestamp_stop", stop));
        }
    }
}

impl RecordRules for ViolationCostsParameters {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.non_negative("p_bus_vio_cost", self.p_bus_vio_cost);
        checks.non_negative("q_bus_vio_cost", self.q_bus_vio_cost);
        checks.non_negative("s_vio_cost", self.s_vio_cost);
    }
}

impl RecordRules for Bus {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.positive("vm_lb", self.vm_lb);
        checks.finite("vm_ub", self.vm_ub);
        checks.positive("base_nom_volt", self.base_nom_volt);
        checks.opt_finite("longitude", self.longitude);
        checks.opt_finite("latitude", self.latitude);
        checks.opt_finite("con_loss_factor", self.con_loss_factor);
        checks.finite("initial_status.vm", self.initial_status.vm);
        checks.finite("initial_status.va", self.initial_status.va);

        if checks.passed() {
            checks.le(("vm_lb", self.vm_lb), ("vm_ub", self.vm_ub));
            checks.within(
                ("initial_status.vm", self.initial_status.vm),
                ("vm_lb", self.vm_lb),
                ("vm_ub", self.vm_ub),
            );
        }
    }
}

impl RecordRules for Shunt {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.finite("gs", self.gs);
        checks.finite("bs", self.bs);
        checks.int_non_negative("step_lb", self.step_lb);

        if checks.passed() {
            checks.le(("step_lb", self.step_lb), ("step_ub", self.step_ub));
            checks.within(
                ("initial_status.step", self.initial_status.step),
                ("step_lb", self.step_lb),
                ("step_ub", self.step_ub),
            );
        }
    }
}

impl RecordRules for SimpleDispatchableDevice {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.opt_finite("vm_setpoint", self.vm_setpoint);
        checks.opt_finite("nameplate_capacity", self.nameplate_capacity);
        checks.finite("startup_cost", self.startup_cost);
        checks.finite("shutdown_cost", self.shutdown_cost);
        checks.finite("on_cost", self.on_cost);
        checks.non_negative("in_service_time_lb", self.in_service_time_lb);
        checks.non_negative("down_time_lb", self.down_time_lb);

        for (field, value) in self.ramp_limits() {
            checks.non_negative(field, value);
        }
        for (field, value) in self.reserve_limits() {
            checks.non_negative(field, value);
        }

        let states = &self.startup_states;
        checks.elements(
            "startup_states",
            failing_indices(states, |s| s.cost_adjustment().is_finite()),
            "cost adjustment finite",
        );
        checks.elements(
            "startup_states",
            failing_indices(states, |s| is_non_negative(s.max_down_time())),
            "max_down_time >= 0",
        );
        checks.windows("startups_ub", &self.startups_ub);
        checks.windows("energy_req_ub", &self.energy_req_ub);
        checks.windows("energy_req_lb", &self.energy_req_lb);

        match self.reactive_capability {
            ReactiveCapability::Unconstrained => {}
            ReactiveCapability::Linear { q_0, beta } => {
                checks.finite("q_0", q_0);
                checks.finite("beta", beta);
            }
            ReactiveCapability::Bounded {
                q_0_ub,
                q_0_lb,
                beta_ub,
                beta_lb,
            } => {
                checks.finite("q_0_ub", q_0_ub);
                checks.finite("q_0_lb", q_0_lb);
                checks.finite("beta_ub", beta_ub);
                checks.finite("beta_lb", beta_lb);
            }
        }

        let status = &self.initial_status;
        {
            let mut initial = checks.child("initial_status");
            initial.finite("p", status.p);
            initial.finite("q", status.q);
            initial.non_negative("accu_down_time", status.accu_down_time);
            initial.non_negative("accu_up_time", status.accu_up_time);
        }

        if !checks.passed() {
            return;
        }

        if let ReactiveCapability::Bounded {
            q_0_ub,
            q_0_lb,
            beta_ub,
            beta_lb,
        } = self.reactive_capability
        {
            checks.le(("q_0_lb", q_0_lb), ("q_0_ub", q_0_ub));
            checks.le(("beta_lb", beta_lb), ("beta_ub", beta_ub));
        }

        let mut initial = checks.child("initial_status");
        let up = ("accu_up_time", status.accu_up_time.to_string());
        let down = ("accu_down_time", status.accu_down_time.to_string());
        initial.relation(
            "accu_up_time <= 0 or accu_down_time <= 0",
            &[up.clone(), down.clone()],
            status.accu_up_time <= 0.0 || status.accu_down_time <= 0.0,
        );
        let on = ("on_status", status.on_status.to_string());
        if status.on_status.is_on() {
            initial.relation(
                "on_status = 1 implies accu_up_time > 0",
                &[on, up],
                status.accu_up_time > 0.0,
            );
        } else {
            initial.relation(
                "on_status = 0 implies accu_down_time > 0",
                &[on, down],
                status.accu_down_time > 0.0,
            );
        }
    }
}

impl SimpleDispatchableDevice {
    pub fn ramp_limits(&self) -> [(&'static str, Real); 4] {
        [
            ("p_ramp_up_ub", self.p_ramp_up_ub),
            ("p_ramp_down_ub", self.p_ramp_down_ub),
            ("p_startup_ramp_ub", self.p_startup_ramp_ub),
            ("p_shutdown_ramp_ub", self.p_shutdown_ramp_ub),
        ]
    }

    pub fn reserve_limits(&self) -> [(&'static str, Real); 8] {
        [
            ("p_reg_res_up_ub", self.p_reg_res_up_ub),
            ("p_reg_res_down_ub", self.p_reg_res_down_ub),
            ("p_syn_res_ub", self.p_syn_res_ub),
            ("p_nsyn_res_ub", self.p_nsyn_res_ub),
            ("p_ramp_res_up_online_ub", self.p_ramp_res_up_online_ub),
            ("p_ramp_res_down_online_ub", self.p_ramp_res_down_online_ub),
            ("p_ramp_res_up_offline_ub", self.p_ramp_res_up_offline_ub),
            ("p_ramp_res_down_offline_ub", self.p_ramp_res_down_offline_ub),
        ]
    }
}

/// Fields shared by AC lines and transformers.
struct AcBranch<'a> {
    fr_bus: &'a str,
    to_bus: &'a str,
    r: Real,
    x: Real,
    b: Real,
    mva_ub_nom: Real,
    mva_ub_sht: Option<Real>,
    mva_ub_em: Real,
    connection_cost: Real,
    disconnection_cost: Real,
    additional_shunt: &'a AdditionalShunt,
}

impl AcBranch<'_> {
    fn check_fields(&self, checks: &mut Checks<'_>) {
        checks.finite("r", self.r);
        checks.finite("x", self.x);
        checks.finite("b", self.b);
        checks.positive("mva_ub_nom", self.mva_ub_nom);
        checks.opt_positive("mva_ub_sht", self.mva_ub_sht);
        checks.positive("mva_ub_em", self.mva_ub_em);
        checks.non_negative("connection_cost", self.connection_cost);
        checks.non_negative("disconnection_cost", self.disconnection_cost);
        if let Some(shunt) = self.additional_shunt.admittance() {
            checks.finite("g_fr", shunt.g_fr);
            checks.finite("b_fr", shunt.b_fr);
            checks.finite("g_to", shunt.g_to);
            checks.finite("b_to", shunt.b_to);
        }
    }

    fn check_relations(&self, checks: &mut Checks<'_>) {
        checks.distinct(("fr_bus", self.fr_bus), ("to_bus", self.to_bus));
        checks.le(("mva_ub_nom", self.mva_ub_nom), ("mva_ub_em", self.mva_ub_em));
        checks.relation(
            "|r| + |x| > 0",
            &[("r", self.r.to_string()), ("x", self.x.to_string())],
            self.r.abs() + self.x.abs() > 0.0,
        );
    }
}

impl<'a> From<&'a AcLine> for AcBranch<'a> {
    fn from(line: &'a AcLine) -> Self {
        AcBranch {
            fr_bus: &line.fr_bus,
            to_bus: &line.to_bus,
            r: line.r,
            x: line.x,
            b: line.b,
            mva_ub_nom: line.mva_ub_nom,
            mva_ub_sht: line.mva_ub_sht,
            mva_ub_em: line.mva_ub_em,
            connection_cost: line.connection_cost,
            disconnection_cost: line.disconnection_cost,
            additional_shunt: &line.additional_shunt,
        }
    }
}

impl<'a> From<&'a TwoWindingTransformer> for AcBranch<'a> {
    fn from(xfr: &'a TwoWindingTransformer) -> Self {
        AcBranch {
            fr_bus: &xfr.fr_bus,
            to_bus: &xfr.to_bus,
            r: xfr.r,
            x: xfr.x,
            b: xfr.b,
            mva_ub_nom: xfr.mva_ub_nom,
            mva_ub_sht: xfr.mva_ub_sht,
            mva_ub_em: xfr.mva_ub_em,
            connection_cost: xfr.connection_cost,
            disconnection_cost: xfr.disconnection_cost,
            additional_shunt: &xfr.additional_shunt,
        }
    }
}

impl RecordRules for AcLine {
    fn check(&self, checks: &mut Checks<'_>) {
        let branch = AcBranch::from(self);
        branch.check_fields(checks);
        if checks.passed() {
            branch.check_relations(checks);
        }
    }
}

impl RecordRules for TwoWindingTransformer {
    fn check(&self, checks: &mut Checks<'_>) {
        let branch = AcBranch::from(self);
        branch.check_fields(checks);
        checks.positive("tm_lb", self.tm_lb);
        checks.positive("tm_ub", self.tm_ub);
        checks.finite("ta_lb", self.ta_lb);
        checks.finite("ta_ub", self.ta_ub);
        checks.finite("initial_status.tm", self.initial_status.tm);
        checks.finite("initial_status.ta", self.initial_status.ta);

        if !checks.passed() {
            return;
        }
        branch.check_relations(checks);
        checks.le(("tm_lb", self.tm_lb), ("tm_ub", self.tm_ub));
        checks.le(("ta_lb", self.ta_lb), ("ta_ub", self.ta_ub));
        checks.within(
            ("initial_status.tm", self.initial_status.tm),
            ("tm_lb", self.tm_lb),
            ("tm_ub", self.tm_ub),
        );
        checks.within(
            ("initial_status.ta", self.initial_status.ta),
            ("ta_lb", self.ta_lb),
            ("ta_ub", self.ta_ub),
        );
        checks.relation(
            "not (tm_lb < tm_ub and ta_lb < ta_ub)",
            &[
                ("tm_lb", self.tm_lb.to_string()),
                ("tm_ub", self.tm_ub.to_string()),
                ("ta_lb", self.ta_lb.to_string()),
                ("ta_ub", self.ta_ub.to_string()),
            ],
            !(self.tm_lb < self.tm_ub && self.ta_lb < self.ta_ub),
        );
    }
}

impl RecordRules for DcLine {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.non_negative("pdc_ub", self.pdc_ub);
        checks.non_negative("qdc_fr_ub", self.qdc_fr_ub);
        checks.non_positive("qdc_fr_lb", self.qdc_fr_lb);
        checks.non_negative("qdc_to_ub", self.qdc_to_ub);
        checks.non_positive("qdc_to_lb", self.qdc_to_lb);
        let status = &self.initial_status;
        checks.finite("initial_status.pdc_fr", status.pdc_fr);
        checks.finite("initial_status.qdc_fr", status.qdc_fr);
        checks.finite("initial_status.qdc_to", status.qdc_to);

        if !checks.passed() {
            return;
        }
        checks.distinct(("fr_bus", self.fr_bus.as_str()), ("to_bus", self.to_bus.as_str()));
        checks.within(
            ("initial_status.pdc_fr", status.pdc_fr),
            ("-pdc_ub", -self.pdc_ub),
            ("pdc_ub", self.pdc_ub),
        );
        checks.within(
            ("initial_status.qdc_fr", status.qdc_fr),
            ("qdc_fr_lb", self.qdc_fr_lb),
            ("qdc_fr_ub", self.qdc_fr_ub),
        );
        checks.within(
            ("initial_status.qdc_to", status.qdc_to),
            ("qdc_to_lb", self.qdc_to_lb),
            ("qdc_to_ub", self.qdc_to_ub),
        );
    }
}

impl RecordRules for ActiveZonalReserve {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.non_negative("REG_UP", self.reg_up);
        checks.non_negative("REG_DOWN", self.reg_down);
        checks.non_negative("SYN", self.syn);
        checks.non_negative("NSYN", self.nsyn);
        checks.non_negative("REG_UP_vio_cost", self.reg_up_vio_cost);
        checks.non_negative("REG_DOWN_vio_cost", self.reg_down_vio_cost);
        checks.non_negative("SYN_vio_cost", self.syn_vio_cost);
        checks.non_negative("NSYN_vio_cost", self.nsyn_vio_cost);
        checks.non_negative(
            "RAMPING_RESERVE_UP_vio_cost",
            self.ramping_reserve_up_vio_cost,
        );
        checks.non_negative(
            "RAMPING_RESERVE_DOWN_vio_cost",
            self.ramping_reserve_down_vio_cost,
        );
    }
}

impl RecordRules for ReactiveZonalReserve {
    fn check(&self, checks: &mut Checks<'_>) {
        checks.non_negative("REACT_UP_vio_cost", self.react_up_vio_cost);
        checks.non_negative("REACT_DOWN_vio_cost", self.react_down_vio_cost);
    }
}

validate_records!(
    Bus,
    Shunt,
    SimpleDispatchableDevice,
    AcLine,
    TwoWindingTransformer,
    DcLine,
    ActiveZonalReserve,
    ReactiveZonalReserve,
);

impl Validate for General {
    fn validate_into(&self, _config: &ValidationConfig, report: &mut ValidationReport) {
        self.check(&mut Checks::new(EntityRef::section("network.general"), report));
    }
}

impl Validate for ViolationCostsParameters {
    fn validate_into(&self, _config: &ValidationConfig, report: &mut ValidationReport) {
        self.check(&mut Checks::new(
            EntityRef::section("network.violation_cost"),
            report,
        ));
    }
}

impl Validate for Network {
    fn validate_into(&self, config: &ValidationConfig, report: &mut ValidationReport) {
        self.general.validate_into(config, report);
        self.violation_cost.validate_into(config, report);
        check_collection(&self.bus, report);
        check_collection(&self.shunt, report);
        check_collection(&self.simple_dispatchable_device, report);
        check_collection(&self.ac_line, report);
        check_collection(&self.two_winding_transformer, report);
        check_collection(&self.dc_line, report);
        check_collection(&self.active_zonal_reserve, report);
        check_collection(&self.reactive_zonal_reserve, report);
    }
}

impl Validate for Reliability {
    fn validate_into(&self, config: &ValidationConfig, report: &mut ValidationReport) {
        if !config.single_component_contingencies {
            return;
        }
        for (index, contingency) in self.contingency.iter().enumerate() {
            if contingency.components.len() != 1 {
                report.push(bidds_core::ValidationError::Cardinality {
                    entity: EntityRef::item("contingency", index, &contingency.uid),
                    field: "components".to_string(),
                    expected: 1,
                    actual: contingency.components.len(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        AcLineInitialStatus, BusInitialStatus, DcLineInitialStatus, DeviceInitialStatus,
        DeviceType, ShuntInitialStatus, TransformerInitialStatus,
    };
    use crate::validate::validate_entity;
    use bidds_core::{ErrorClass, Indicator, ValidationError};

    fn relations(report: &ValidationReport) -> Vec<&str> {
        report
            .iter()
            .filter_map(|e| match e {
                ValidationError::CrossField { relation, .. } => Some(relation.as_str()),
                _ => None,
            })
            .collect()
    }

    fn device(on_status: Indicator, accu_up_time: Real, accu_down_time: Real) -> SimpleDispatchableDevice {
        SimpleDispatchableDevice {
            uid: "G1".to_string(),
            bus: "B1".to_string(),
            device_type: DeviceType::Producer,
            description: None,
            vm_setpoint: None,
            nameplate_capacity: None,
            startup_cost: 100.0,
            startup_states: vec![],
            shutdown_cost: 0.0,
            startups_ub: vec![],
            energy_req_ub: vec![],
            energy_req_lb: vec![],
            on_cost: 5.0,
            in_service_time_lb: 2.0,
            down_time_lb: 2.0,
            p_ramp_up_ub: 1.0,
            p_ramp_down_ub: 1.0,
            p_startup_ramp_ub: 1.0,
            p_shutdown_ramp_ub: 1.0,
            initial_status: DeviceInitialStatus {
                on_status,
                p: 0.0,
                q: 0.0,
                accu_down_time,
                accu_up_time,
            },
            reactive_capability: ReactiveCapability::Unconstrained,
            p_reg_res_up_ub: 0.1,
            p_reg_res_down_ub: 0.1,
            p_syn_res_ub: 0.1,
            p_nsyn_res_ub: 0.1,
            p_ramp_res_up_online_ub: 0.1,
            p_ramp_res_down_online_ub: 0.1,
            p_ramp_res_up_offline_ub: 0.1,
            p_ramp_res_down_offline_ub: 0.1,
        }
    }

    fn transformer(tm: (Real, Real, Real), ta: (Real, Real, Real)) -> TwoWindingTransformer {
        TwoWindingTransformer {
            uid: "T1".to_string(),
            fr_bus: "B1".to_string(),
            to_bus: "B2".to_string(),
            r: 0.01,
            x: 0.1,
            b: 0.0,
            tm_lb: tm.0,
            tm_ub: tm.1,
            ta_lb: ta.0,
            ta_ub: ta.1,
            mva_ub_nom: 1.0,
            mva_ub_sht: None,
            mva_ub_em: 1.2,
            connection_cost: 0.0,
            disconnection_cost: 0.0,
            initial_status: TransformerInitialStatus {
                on_status: Indicator::On,
                tm: tm.2,
                ta: ta.2,
            },
            additional_shunt: AdditionalShunt::Absent,
        }
    }

    fn bus(vm_lb: Real, vm_ub: Real, vm: Real) -> Bus {
        Bus {
            uid: "B1".to_string(),
            vm_ub,
            vm_lb,
            active_reserve_uids: vec![],
            reactive_reserve_uids: vec![],
            area: None,
            zone: None,
            longitude: None,
            latitude: None,
            city: None,
            county: None,
            state: None,
            country: None,
            con_loss_factor: None,
            base_nom_volt: 230.0,
            bus_type: None,
            initial_status: BusInitialStatus { vm, va: 0.0 },
        }
    }

    #[test]
    fn bus_within_bounds_is_accepted() {
        assert!(validate_entity(&bus(0.9, 1.1, 1.0)).is_ok());
    }

    #[test]
    fn bus_initial_vm_above_ub_cites_vm_ub() {
        let report = validate_entity(&bus(0.9, 1.1, 1.2)).unwrap_err();
        assert_eq!(report.len(), 1);
        let err = &report.errors()[0];
        assert_eq!(err.class(), ErrorClass::CrossField);
        assert!(err.fields().contains(&"vm_ub"));
    }

    #[test]
    fn degenerate_voltage_range() {
        assert!(validate_entity(&bus(1.0, 1.0, 1.0)).is_ok());
        assert!(validate_entity(&bus(1.0, 1.0, 0.99)).is_err());
    }

    #[test]
    fn zero_vm_lb_is_a_field_error() {
        let report = validate_entity(&bus(0.0, 1.1, 1.0)).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].class(), ErrorClass::Field);
    }

    #[test]
    fn timestamps_must_be_ordered() {
        let general = General {
            timestamp_start: Some("2024-07-01T12:00".to_string()),
            timestamp_stop: Some("2024-07-01T00:00".to_string()),
            season: None,
            electricity_demand: None,
            vre_availability: None,
            solar_availability: None,
            wind_availability: None,
            weather_temperature: None,
            day_type: None,
            net_load: None,
            base_norm_mva: 100.0,
        };
        let report = general
            .validate(&ValidationConfig::default())
            .unwrap_err();
        assert!(report.errors()[0].to_string().contains("timestamp_start < timestamp_stop"));
    }

    #[test]
    fn malformed_timestamp_is_a_field_error() {
        assert!(parse_timestamp("2024-07-01T12:00").is_some());
        assert!(parse_timestamp("2024-07-01T12:00:30").is_some());
        assert!(parse_timestamp("2024-07-01 12:00").is_none());
        assert!(parse_timestamp("07/01/2024").is_none());
    }

    #[test]
    fn online_device_with_up_time_is_accepted() {
        assert!(validate_entity(&device(Indicator::On, 4.0, 0.0)).is_ok());
        assert!(validate_entity(&device(Indicator::Off, 0.0, 3.0)).is_ok());
    }

    #[test]
    fn device_cannot_accumulate_up_and_down_time() {
        let report = validate_entity(&device(Indicator::On, 4.0, 2.0)).unwrap_err();
        assert_eq!(relations(&report), vec!["accu_up_time <= 0 or accu_down_time <= 0"]);
        let entity = report.errors()[0].entity().unwrap();
        assert_eq!(entity.member.as_deref(), Some("initial_status"));
    }

    #[test]
    fn online_device_needs_up_time() {
        let report = validate_entity(&device(Indicator::On, 0.0, 0.0)).unwrap_err();
        assert_eq!(relations(&report), vec!["on_status = 1 implies accu_up_time > 0"]);
    }

    #[test]
    fn offline_device_needs_down_time() {
        let report = validate_entity(&device(Indicator::Off, 0.0, 0.0)).unwrap_err();
        assert_eq!(relations(&report), vec!["on_status = 0 implies accu_down_time > 0"]);
    }

    #[test]
    fn bounded_capability_needs_ordered_intercepts() {
        let mut g = device(Indicator::On, 4.0, 0.0);
        g.reactive_capability = ReactiveCapability::Bounded {
            q_0_ub: -0.5,
            q_0_lb: 0.5,
            beta_ub: 0.2,
            beta_lb: -0.2,
        };
        let report = validate_entity(&g).unwrap_err();
        assert_eq!(relations(&report), vec!["q_0_lb <= q_0_ub"]);
    }

    #[test]
    fn transformer_adjusts_taps_or_angle_but_not_both() {
        assert!(validate_entity(&transformer((0.9, 1.1, 1.0), (0.0, 0.0, 0.0))).is_ok());
        assert!(validate_entity(&transformer((1.0, 1.0, 1.0), (-0.1, 0.1, 0.0))).is_ok());

        let report =
            validate_entity(&transformer((0.9, 1.1, 1.0), (-0.1, 0.1, 0.0))).unwrap_err();
        assert_eq!(relations(&report), vec!["not (tm_lb < tm_ub and ta_lb < ta_ub)"]);
        assert_eq!(report.errors()[0].fields(), vec!["tm_lb", "tm_ub", "ta_lb", "ta_ub"]);
    }

    #[test]
    fn transformer_initial_setting_within_bounds() {
        let report =
            validate_entity(&transformer((0.9, 1.1, 1.2), (0.0, 0.0, 0.1))).unwrap_err();
        let fields: Vec<_> = report.iter().map(|e| e.fields()).collect();
        assert_eq!(
            fields,
            vec![vec!["initial_status.tm", "tm_ub"], vec!["initial_status.ta", "ta_ub"]]
        );

        let report =
            validate_entity(&transformer((0.9, 1.1, 0.8), (0.0, 0.0, 0.0))).unwrap_err();
        assert_eq!(report.errors()[0].fields(), vec!["tm_lb", "initial_status.tm"]);
    }

    #[test]
    fn line_needs_some_series_impedance() {
        let line = AcLine {
            uid: "L1".to_string(),
            fr_bus: "B1".to_string(),
            to_bus: "B2".to_string(),
            r: 0.0,
            x: 0.0,
            b: 0.02,
            mva_ub_nom: 1.0,
            mva_ub_sht: None,
            mva_ub_em: 1.2,
            connection_cost: 0.0,
            disconnection_cost: 0.0,
            initial_status: AcLineInitialStatus {
                on_status: Indicator::On,
            },
            additional_shunt: AdditionalShunt::Absent,
        };
        let report = validate_entity(&line).unwrap_err();
        assert_eq!(relations(&report), vec!["|r| + |x| > 0"]);

        let line = AcLine { x: -0.05, ..line };
        assert!(validate_entity(&line).is_ok());
    }

    #[test]
    fn shunt_initial_step_within_bounds() {
        let mut shunt = Shunt {
            uid: "SH1".to_string(),
            bus: "B1".to_string(),
            gs: 0.0,
            bs: 0.05,
            step_ub: 2,
            step_lb: 0,
            initial_status: ShuntInitialStatus {
                on_status: Indicator::On,
                step: 2,
            },
        };
        assert!(validate_entity(&shunt).is_ok());

        shunt.initial_status.step = 3;
        let report = validate_entity(&shunt).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].fields(), vec!["initial_status.step", "step_ub"]);
    }

    #[test]
    fn dc_line_reports_every_violated_bound() {
        let line = DcLine {
            uid: "DC1".to_string(),
            fr_bus: "B1".to_string(),
            to_bus: "B2".to_string(),
            pdc_ub: 1.0,
            qdc_fr_ub: 0.5,
            qdc_fr_lb: -0.5,
            qdc_to_ub: 0.5,
            qdc_to_lb: -0.5,
            initial_status: DcLineInitialStatus {
                on_status: Indicator::On,
                pdc_fr: -1.5,
                qdc_fr: 0.6,
                qdc_to: 0.0,
            },
        };
        let report = validate_entity(&line).unwrap_err();
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|e| matches!(e, ValidationError::CrossField { .. })));
    }

    #[test]
    fn dc_line_lower_reactive_bound_must_not_be_positive() {
        let line = DcLine {
            uid: "DC1".to_string(),
            fr_bus: "B1".to_string(),
            to_bus: "B2".to_string(),
            pdc_ub: 1.0,
            qdc_fr_ub: 0.5,
            qdc_fr_lb: 0.1,
            qdc_to_ub: 0.5,
            qdc_to_lb: -0.5,
            initial_status: DcLineInitialStatus {
                on_status: Indicator::On,
                pdc_fr: 0.0,
                qdc_fr: 0.2,
                qdc_to: 0.0,
            },
        };
        let report = validate_entity(&line).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].fields(), vec!["qdc_fr_lb"]);
    }
}
