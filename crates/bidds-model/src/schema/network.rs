//! Static network records.

use bidds_core::{EnergyWindow, Indicator, Real, StartupState, StartupWindow};
use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::{Deserialize, Serialize};

use super::Entity;
use super::capability::{
    AdditionalShunt, AdditionalShuntDef, ReactiveCapability, ReactiveCapabilityDef,
    RecordFieldsError,
};
use super::general::{General, ViolationCostsParameters};
use super::initial::{
    AcLineInitialStatus, BusInitialStatus, DcLineInitialStatus, DeviceInitialStatus,
    ShuntInitialStatus, TransformerInitialStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum BusType {
    PQ,
    PV,
    Slack,
    #[serde(rename = "Not_used")]
    NotUsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Producer,
    Consumer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Bus {
    pub uid: String,
    /// Voltage magnitude upper bound (p.u.)
    pub vm_ub: Real,
    /// Voltage magnitude lower bound (p.u.)
    pub vm_lb: Real,
    /// Active reserve zones the bus participates in
    pub active_reserve_uids: Vec<String>,
    /// Reactive reserve zones the bus participates in
    pub reactive_reserve_uids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Contingency participation loss factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub con_loss_factor: Option<Real>,
    /// Nominal voltage (kV)
    pub base_nom_volt: Real,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub bus_type: Option<BusType>,
    pub initial_status: BusInitialStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Shunt {
    pub uid: String,
    pub bus: String,
    /// Conductance for one step (p.u.)
    pub gs: Real,
    /// Susceptance for one step (p.u.)
    pub bs: Real,
    pub step_ub: i64,
    pub step_lb: i64,
    pub initial_status: ShuntInitialStatus,
}

/// Simple producing or consuming device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SimpleDispatchableDeviceDef",
    into = "SimpleDispatchableDeviceDef"
)]
pub struct SimpleDispatchableDevice {
    pub uid: String,
    pub bus: String,
    pub device_type: DeviceType,
    pub description: Option<String>,
    pub vm_setpoint: Option<Real>,
    pub nameplate_capacity: Option<Real>,

    pub startup_cost: Real,
    /// Downtime-dependent startup states
    pub startup_states: Vec<StartupState>,
    pub shutdown_cost: Real,
    /// Maximum startups per time interval
    pub startups_ub: Vec<StartupWindow>,
    pub energy_req_ub: Vec<EnergyWindow>,
    pub energy_req_lb: Vec<EnergyWindow>,
    /// Fixed operating cost
    pub on_cost: Real,
    /// Minimum up time (hr)
    pub in_service_time_lb: Real,
    /// Minimum down time (hr)
    pub down_time_lb: Real,

    /// Ramp limits (p.u./hr)
    pub p_ramp_up_ub: Real,
    pub p_ramp_down_ub: Real,
    pub p_startup_ramp_ub: Real,
    pub p_shutdown_ramp_ub: Real,

    pub initial_status: DeviceInitialStatus,

    /// `q_linear_cap` / `q_bound_cap` and their fields
    pub reactive_capability: ReactiveCapability,

    /// Reserve upper bounds (p.u.)
    pub p_reg_res_up_ub: Real,
    pub p_reg_res_down_ub: Real,
    pub p_syn_res_ub: Real,
    pub p_nsyn_res_ub: Real,
    pub p_ramp_res_up_online_ub: Real,
    pub p_ramp_res_down_online_ub: Real,
    pub p_ramp_res_up_offline_ub: Real,
    pub p_ramp_res_down_offline_ub: Real,
}

/// Wire form of [`SimpleDispatchableDevice`], with the capability flags and
/// their gated fields inline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SimpleDispatchableDeviceDef {
    pub uid: String,
    pub bus: String,
    pub device_type: DeviceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_setpoint: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameplate_capacity: Option<Real>,

    pub startup_cost: Real,
    /// Downtime-dependent startup states
    pub startup_states: Vec<StartupState>,
    pub shutdown_cost: Real,
    /// Maximum startups per time interval
    pub startups_ub: Vec<StartupWindow>,
    pub energy_req_ub: Vec<EnergyWindow>,
    pub energy_req_lb: Vec<EnergyWindow>,
    /// Fixed operating cost
    pub on_cost: Real,
    /// Minimum up time (hr)
    pub in_service_time_lb: Real,
    /// Minimum down time (hr)
    pub down_time_lb: Real,

    /// Ramp limits (p.u./hr)
    pub p_ramp_up_ub: Real,
    pub p_ramp_down_ub: Real,
    pub p_startup_ramp_ub: Real,
    pub p_shutdown_ramp_ub: Real,

    pub initial_status: DeviceInitialStatus,

    /// Device has an additional linear reactive constraint
    pub q_linear_cap: Indicator,
    /// Device has additional reactive bounds
    pub q_bound_cap: Indicator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_0: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_0_ub: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_0_lb: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_ub: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_lb: Option<Real>,

    /// Reserve upper bounds (p.u.)
    pub p_reg_res_up_ub: Real,
    pub p_reg_res_down_ub: Real,
    pub p_syn_res_ub: Real,
    pub p_nsyn_res_ub: Real,
    pub p_ramp_res_up_online_ub: Real,
    pub p_ramp_res_down_online_ub: Real,
    pub p_ramp_res_up_offline_ub: Real,
    pub p_ramp_res_down_offline_ub: Real,
}

impl TryFrom<SimpleDispatchableDeviceDef> for SimpleDispatchableDevice {
    type Error = RecordFieldsError;

    fn try_from(def: SimpleDispatchableDeviceDef) -> Result<Self, Self::Error> {
        let reactive_capability = ReactiveCapability::try_from(ReactiveCapabilityDef {
            q_linear_cap: def.q_linear_cap,
            q_bound_cap: def.q_bound_cap,
            q_0: def.q_0,
            beta: def.beta,
            q_0_ub: def.q_0_ub,
            q_0_lb: def.q_0_lb,
            beta_ub: def.beta_ub,
            beta_lb: def.beta_lb,
        })
        .map_err(|source| RecordFieldsError::new::<Self>(&def.uid, source))?;

        Ok(SimpleDispatchableDevice {
            uid: def.uid,
            bus: def.bus,
            device_type: def.device_type,
            description: def.description,
            vm_setpoint: def.vm_setpoint,
            nameplate_capacity: def.nameplate_capacity,
            startup_cost: def.startup_cost,
            startup_states: def.startup_states,
            shutdown_cost: def.shutdown_cost,
            startups_ub: def.startups_ub,
            energy_req_ub: def.energy_req_ub,
            energy_req_lb: def.energy_req_lb,
            on_cost: def.on_cost,
            in_service_time_lb: def.in_service_time_lb,
            down_time_lb: def.down_time_lb,
            p_ramp_up_ub: def.p_ramp_up_ub,
            p_ramp_down_ub: def.p_ramp_down_ub,
            p_startup_ramp_ub: def.p_startup_ramp_ub,
            p_shutdown_ramp_ub: def.p_shutdown_ramp_ub,
            initial_status: def.initial_status,
            reactive_capability,
            p_reg_res_up_ub: def.p_reg_res_up_ub,
            p_reg_res_down_ub: def.p_reg_res_down_ub,
            p_syn_res_ub: def.p_syn_res_ub,
            p_nsyn_res_ub: def.p_nsyn_res_ub,
            p_ramp_res_up_online_ub: def.p_ramp_res_up_online_ub,
            p_ramp_res_down_online_ub: def.p_ramp_res_down_online_ub,
            p_ramp_res_up_offline_ub: def.p_ramp_res_up_offline_ub,
            p_ramp_res_down_offline_ub: def.p_ramp_res_down_offline_ub,
        })
    }
}

impl From<SimpleDispatchableDevice> for SimpleDispatchableDeviceDef {
    fn from(device: SimpleDispatchableDevice) -> Self {
        let capability = ReactiveCapabilityDef::from(device.reactive_capability);
        SimpleDispatchableDeviceDef {
            uid: device.uid,
            bus: device.bus,
            device_type: device.device_type,
            description: device.description,
            vm_setpoint: device.vm_setpoint,
            nameplate_capacity: device.nameplate_capacity,
            startup_cost: device.startup_cost,
            startup_states: device.startup_states,
            shutdown_cost: device.shutdown_cost,
            startups_ub: device.startups_ub,
            energy_req_ub: device.energy_req_ub,
            energy_req_lb: device.energy_req_lb,
            on_cost: device.on_cost,
            in_service_time_lb: device.in_service_time_lb,
            down_time_lb: device.down_time_lb,
            p_ramp_up_ub: device.p_ramp_up_ub,
            p_ramp_down_ub: device.p_ramp_down_ub,
            p_startup_ramp_ub: device.p_startup_ramp_ub,
            p_shutdown_ramp_ub: device.p_shutdown_ramp_ub,
            initial_status: device.initial_status,
            q_linear_cap: capability.q_linear_cap,
            q_bound_cap: capability.q_bound_cap,
            q_0: capability.q_0,
            beta: capability.beta,
            q_0_ub: capability.q_0_ub,
            q_0_lb: capability.q_0_lb,
            beta_ub: capability.beta_ub,
            beta_lb: capability.beta_lb,
            p_reg_res_up_ub: device.p_reg_res_up_ub,
            p_reg_res_down_ub: device.p_reg_res_down_ub,
            p_syn_res_ub: device.p_syn_res_ub,
            p_nsyn_res_ub: device.p_nsyn_res_ub,
            p_ramp_res_up_online_ub: device.p_ramp_res_up_online_ub,
            p_ramp_res_down_online_ub: device.p_ramp_res_down_online_ub,
            p_ramp_res_up_offline_ub: device.p_ramp_res_up_offline_ub,
            p_ramp_res_down_offline_ub: device.p_ramp_res_down_offline_ub,
        }
    }
}

/// AC transmission line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AcLineDef", into = "AcLineDef")]
pub struct AcLine {
    pub uid: String,
    pub fr_bus: String,
    pub to_bus: String,
    /// Series resistance (p.u.)
    pub r: Real,
    /// Series reactance (p.u.)
    pub x: Real,
    /// Shunt susceptance (p.u.)
    pub b: Real,
    /// MVA limit, nominal rating
    pub mva_ub_nom: Real,
    /// MVA limit, short term rating
    pub mva_ub_sht: Option<Real>,
    /// MVA limit, emergency rating
    pub mva_ub_em: Real,
    pub connection_cost: Real,
    pub disconnection_cost: Real,
    pub initial_status: AcLineInitialStatus,
    pub additional_shunt: AdditionalShunt,
}

/// Wire form of [`AcLine`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AcLineDef {
    pub uid: String,
    pub fr_bus: String,
    pub to_bus: String,
    /// Series resistance (p.u.)
    pub r: Real,
    /// Series reactance (p.u.)
    pub x: Real,
    /// Shunt susceptance (p.u.)
    pub b: Real,
    /// MVA limit, nominal rating
    pub mva_ub_nom: Real,
    /// MVA limit, short term rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mva_ub_sht: Option<Real>,
    /// MVA limit, emergency rating
    pub mva_ub_em: Real,
    pub connection_cost: Real,
    pub disconnection_cost: Real,
    pub initial_status: AcLineInitialStatus,
    /// Branch has additional shunt components
    pub additional_shunt: Indicator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_fr: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_fr: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_to: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_to: Option<Real>,
}

impl TryFrom<AcLineDef> for AcLine {
    type Error = RecordFieldsError;

    fn try_from(def: AcLineDef) -> Result<Self, Self::Error> {
        let additional_shunt = AdditionalShunt::try_from(AdditionalShuntDef {
            additional_shunt: def.additional_shunt,
            g_fr: def.g_fr,
            b_fr: def.b_fr,
            g_to: def.g_to,
            b_to: def.b_to,
        })
        .map_err(|source| RecordFieldsError::new::<Self>(&def.uid, source))?;

        Ok(AcLine {
            uid: def.uid,
            fr_bus: def.fr_bus,
            to_bus: def.to_bus,
            r: def.r,
            x: def.x,
            b: def.b,
            mva_ub_nom: def.mva_ub_nom,
            mva_ub_sht: def.mva_ub_sht,
            mva_ub_em: def.mva_ub_em,
            connection_cost: def.connection_cost,
            disconnection_cost: def.disconnection_cost,
            initial_status: def.initial_status,
            additional_shunt,
        })
    }
}

impl From<AcLine> for AcLineDef {
    fn from(line: AcLine) -> Self {
        let shunt = AdditionalShuntDef::from(line.additional_shunt);
        AcLineDef {
            uid: line.uid,
            fr_bus: line.fr_bus,
            to_bus: line.to_bus,
            r: line.r,
            x: line.x,
            b: line.b,
            mva_ub_nom: line.mva_ub_nom,
            mva_ub_sht: line.mva_ub_sht,
            mva_ub_em: line.mva_ub_em,
            connection_cost: line.connection_cost,
            disconnection_cost: line.disconnection_cost,
            initial_status: line.initial_status,
            additional_shunt: shunt.additional_shunt,
            g_fr: shunt.g_fr,
            b_fr: shunt.b_fr,
            g_to: shunt.g_to,
            b_to: shunt.b_to,
        }
    }
}

/// Two-winding transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "TwoWindingTransformerDef",
    into = "TwoWindingTransformerDef"
)]
pub struct TwoWindingTransformer {
    pub uid: String,
    pub fr_bus: String,
    pub to_bus: String,
    pub r: Real,
    pub x: Real,
    pub b: Real,
    /// Off-nominal taps ratio bounds
    pub tm_ub: Real,
    pub tm_lb: Real,
    /// Phase shifting angle bounds (rad)
    pub ta_ub: Real,
    pub ta_lb: Real,
    pub mva_ub_nom: Real,
    pub mva_ub_sht: Option<Real>,
    pub mva_ub_em: Real,
    pub connection_cost: Real,
    pub disconnection_cost: Real,
    pub initial_status: TransformerInitialStatus,
    pub additional_shunt: AdditionalShunt,
}

/// Wire form of [`TwoWindingTransformer`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TwoWindingTransformerDef {
    pub uid: String,
    pub fr_bus: String,
    pub to_bus: String,
    pub r: Real,
    pub x: Real,
    pub b: Real,
    /// Off-nominal taps ratio bounds
    pub tm_ub: Real,
    pub tm_lb: Real,
    /// Phase shifting angle bounds (rad)
    pub ta_ub: Real,
    pub ta_lb: Real,
    pub mva_ub_nom: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mva_ub_sht: Option<Real>,
    pub mva_ub_em: Real,
    pub connection_cost: Real,
    pub disconnection_cost: Real,
    pub initial_status: TransformerInitialStatus,
    /// Branch has additional shunt components
    pub additional_shunt: Indicator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_fr: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_fr: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g_to: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_to: Option<Real>,
}

impl TryFrom<TwoWindingTransformerDef> for TwoWindingTransformer {
    type Error = RecordFieldsError;

    fn try_from(def: TwoWindingTransformerDef) -> Result<Self, Self::Error> {
        let additional_shunt = AdditionalShunt::try_from(AdditionalShuntDef {
            additional_shunt: def.additional_shunt,
            g_fr: def.g_fr,
            b_fr: def.b_fr,
            g_to: def.g_to,
            b_to: def.b_to,
        })
        .map_err(|source| RecordFieldsError::new::<Self>(&def.uid, source))?;

        Ok(TwoWindingTransformer {
            uid: def.uid,
            fr_bus: def.fr_bus,
            to_bus: def.to_bus,
            r: def.r,
            x: def.x,
            b: def.b,
            tm_ub: def.tm_ub,
            tm_lb: def.tm_lb,
            ta_ub: def.ta_ub,
            ta_lb: def.ta_lb,
            mva_ub_nom: def.mva_ub_nom,
            mva_ub_sht: def.mva_ub_sht,
            mva_ub_em: def.mva_ub_em,
            connection_cost: def.connection_cost,
            disconnection_cost: def.disconnection_cost,
            initial_status: def.initial_status,
            additional_shunt,
        })
    }
}

impl From<TwoWindingTransformer> for TwoWindingTransformerDef {
    fn from(xfr: TwoWindingTransformer) -> Self {
        let shunt = AdditionalShuntDef::from(xfr.additional_shunt);
        TwoWindingTransformerDef {
            uid: xfr.uid,
            fr_bus: xfr.fr_bus,
            to_bus: xfr.to_bus,
            r: xfr.r,
            x: xfr.x,
            b: xfr.b,
            tm_ub: xfr.tm_ub,
            tm_lb: xfr.tm_lb,
            ta_ub: xfr.ta_ub,
            ta_lb: xfr.ta_lb,
            mva_ub_nom: xfr.mva_ub_nom,
            mva_ub_sht: xfr.mva_ub_sht,
            mva_ub_em: xfr.mva_ub_em,
            connection_cost: xfr.connection_cost,
            disconnection_cost: xfr.disconnection_cost,
            initial_status: xfr.initial_status,
            additional_shunt: shunt.additional_shunt,
            g_fr: shunt.g_fr,
            b_fr: shunt.b_fr,
            g_to: shunt.g_to,
            b_to: shunt.b_to,
        }
    }
}

/// Records whose JSON Schema is that of their wire struct.
macro_rules! schema_via_def {
    ($ty:ident, $def:ident) => {
        impl JsonSchema for $ty {
            fn schema_name() -> String {
                stringify!($ty).to_string()
            }

            fn json_schema(generator: &mut SchemaGenerator) -> Schema {
                $def::json_schema(generator)
            }
        }
    };
}

schema_via_def!(SimpleDispatchableDevice, SimpleDispatchableDeviceDef);
schema_via_def!(AcLine, AcLineDef);
schema_via_def!(TwoWindingTransformer, TwoWindingTransformerDef);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DcLine {
    pub uid: String,
    pub fr_bus: String,
    pub to_bus: String,
    /// Rated active power (p.u.)
    pub pdc_ub: Real,
    pub qdc_fr_ub: Real,
    pub qdc_fr_lb: Real,
    pub qdc_to_ub: Real,
    pub qdc_to_lb: Real,
    pub initial_status: DcLineInitialStatus,
}

/// Active reserve requirements of a zone, as fractions, and their shortfall costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ActiveZonalReserve {
    pub uid: String,
    /// Regulation up requirement, fraction of zone load
    #[serde(rename = "REG_UP")]
    pub reg_up: Real,
    /// Regulation down requirement, fraction of zone load
    #[serde(rename = "REG_DOWN")]
    pub reg_down: Real,
    /// Synchronized reserve requirement, fraction of the largest device
    #[serde(rename = "SYN")]
    pub syn: Real,
    /// Non-synchronized reserve requirement, fraction of the largest device
    #[serde(rename = "NSYN")]
    pub nsyn: Real,
    #[serde(rename = "REG_UP_vio_cost")]
    pub reg_up_vio_cost: Real,
    #[serde(rename = "REG_DOWN_vio_cost")]
    pub reg_down_vio_cost: Real,
    #[serde(rename = "SYN_vio_cost")]
    pub syn_vio_cost: Real,
    #[serde(rename = "NSYN_vio_cost")]
    pub nsyn_vio_cost: Real,
    #[serde(rename = "RAMPING_RESERVE_UP_vio_cost")]
    pub ramping_reserve_up_vio_cost: Real,
    #[serde(rename = "RAMPING_RESERVE_DOWN_vio_cost")]
    pub ramping_reserve_down_vio_cost: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReactiveZonalReserve {
    pub uid: String,
    #[serde(rename = "REACT_UP_vio_cost")]
    pub react_up_vio_cost: Real,
    #[serde(rename = "REACT_DOWN_vio_cost")]
    pub react_down_vio_cost: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Network {
    pub general: General,
    pub violation_cost: ViolationCostsParameters,
    pub bus: Vec<Bus>,
    pub shunt: Vec<Shunt>,
    pub simple_dispatchable_device: Vec<SimpleDispatchableDevice>,
    pub ac_line: Vec<AcLine>,
    pub two_winding_transformer: Vec<TwoWindingTransformer>,
    pub dc_line: Vec<DcLine>,
    pub active_zonal_reserve: Vec<ActiveZonalReserve>,
    pub reactive_zonal_reserve: Vec<ReactiveZonalReserve>,
}

impl Network {
    /// Uids a contingency may name: every AC line, transformer and DC line.
    pub fn branch_uids(&self) -> impl Iterator<Item = &str> {
        self.ac_line
            .iter()
            .map(|l| l.uid.as_str())
            .chain(self.two_winding_transformer.iter().map(|t| t.uid.as_str()))
            .chain(self.dc_line.iter().map(|l| l.uid.as_str()))
    }

    /// Every uid of the network with its collection, in document order.
    pub fn uids(&self) -> Vec<(&'static str, &str)> {
        let mut uids = Vec::new();
        collect_uids(&mut uids, &self.bus);
        collect_uids(&mut uids, &self.shunt);
        collect_uids(&mut uids, &self.simple_dispatchable_device);
        collect_uids(&mut uids, &self.ac_line);
        collect_uids(&mut uids, &self.two_winding_transformer);
        collect_uids(&mut uids, &self.dc_line);
        collect_uids(&mut uids, &self.active_zonal_reserve);
        collect_uids(&mut uids, &self.reactive_zonal_reserve);
        uids
    }
}

pub(crate) fn collect_uids<'a, T: Entity>(out: &mut Vec<(&'static str, &'a str)>, records: &'a [T]) {
    out.extend(records.iter().map(|r| (T::COLLECTION, r.uid())));
}

entity!(Bus, "bus");
entity!(Shunt, "shunt");
entity!(SimpleDispatchableDevice, "simple_dispatchable_device");
entity!(AcLine, "ac_line");
entity!(TwoWindingTransformer, "two_winding_transformer");
entity!(DcLine, "dc_line");
entity!(ActiveZonalReserve, "active_zonal_reserve");
entity!(ReactiveZonalReserve, "reactive_zonal_reserve");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line_json() -> serde_json::Value {
        json!({
            "uid": "L1", "fr_bus": "B1", "to_bus": "B2",
            "r": 0.01, "x": 0.1, "b": 0.02,
            "mva_ub_nom": 1.0, "mva_ub_em": 1.2,
            "connection_cost": 0.0, "disconnection_cost": 0.0,
            "initial_status": {"on_status": 1},
            "additional_shunt": 1,
            "g_fr": 0.0, "b_fr": 0.01, "g_to": 0.0, "b_to": 0.01
        })
    }

    #[test]
    fn inline_shunt_group_parses() {
        let line: AcLine = serde_json::from_value(line_json()).unwrap();
        let admittance = line.additional_shunt.admittance().unwrap();
        assert_eq!(admittance.b_to, 0.01);
        assert_eq!(line.mva_ub_sht, None);
    }

    #[test]
    fn missing_gated_field_fails_the_record() {
        let mut raw = line_json();
        raw.as_object_mut().unwrap().remove("g_to");
        let err = serde_json::from_value::<AcLine>(raw).unwrap_err().to_string();
        assert!(err.contains("ac_line 'L1': g_to is required when additional_shunt = 1"), "{err}");
    }

    #[test]
    fn unknown_line_field_is_rejected() {
        let mut raw = line_json();
        raw["mva_ub_shrt"] = json!(1.1);
        let err = serde_json::from_value::<AcLine>(raw).unwrap_err().to_string();
        assert!(err.contains("unknown field `mva_ub_shrt`"), "{err}");
    }

    #[test]
    fn line_writes_the_shunt_group_inline() {
        let line: AcLine = serde_json::from_value(line_json()).unwrap();
        assert_eq!(serde_json::to_value(&line).unwrap(), line_json());
    }

    #[test]
    fn upper_case_reserve_names() {
        let raw = json!({"uid": "Z1", "REACT_UP_vio_cost": 5.0, "REACT_DOWN_vio_cost": 4.0});
        let zone: ReactiveZonalReserve = serde_json::from_value(raw).unwrap();
        assert_eq!(zone.react_down_vio_cost, 4.0);
        let back = serde_json::to_value(&zone).unwrap();
        assert_eq!(back["REACT_UP_vio_cost"], 5.0);
    }

    #[test]
    fn bus_type_options() {
        assert_eq!(
            serde_json::from_str::<BusType>("\"Not_used\"").unwrap(),
            BusType::NotUsed
        );
        assert!(serde_json::from_str::<DeviceType>("\"storage\"").is_err());
    }
}
