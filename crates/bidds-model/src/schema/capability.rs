//! Flag-gated parameter groups.
//!
//! The wire format stores these as a 0/1 flag plus sibling fields that must be
//! present exactly when the flag is set. In memory they are enums, so a record
//! holding a flag without its fields (or fields without their flag) cannot be
//! built. The owning record's wire struct collects the flag and its fields into
//! a `*Def` group and converts it here; failures name the record.

use bidds_core::{ConditionalFieldsError, FlagGate, Indicator, Real};

use super::Entity;

/// Presence violations of one record.
#[derive(thiserror::Error, Debug)]
#[error("{collection} '{uid}': {source}")]
pub struct RecordFieldsError {
    pub collection: &'static str,
    pub uid: String,
    pub source: ConditionalFieldsError,
}

impl RecordFieldsError {
    pub fn new<T: Entity>(uid: &str, source: ConditionalFieldsError) -> Self {
        RecordFieldsError {
            collection: T::COLLECTION,
            uid: uid.to_string(),
            source,
        }
    }
}

/// Additional reactive power constraints of a dispatchable device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReactiveCapability {
    /// `q_linear_cap = 0`, `q_bound_cap = 0`
    #[default]
    Unconstrained,
    /// `q = q_0 + beta * p` (`q_linear_cap = 1`)
    Linear { q_0: Real, beta: Real },
    /// `q_0_lb + beta_lb * p <= q <= q_0_ub + beta_ub * p` (`q_bound_cap = 1`)
    Bounded {
        q_0_ub: Real,
        q_0_lb: Real,
        beta_ub: Real,
        beta_lb: Real,
    },
}

impl ReactiveCapability {
    pub fn q_linear_cap(&self) -> Indicator {
        matches!(self, ReactiveCapability::Linear { .. }).into()
    }

    pub fn q_bound_cap(&self) -> Indicator {
        matches!(self, ReactiveCapability::Bounded { .. }).into()
    }
}

/// Wire form of [`ReactiveCapability`]: both flags and every gated field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReactiveCapabilityDef {
    pub q_linear_cap: Indicator,
    pub q_bound_cap: Indicator,
    pub q_0: Option<Real>,
    pub beta: Option<Real>,
    pub q_0_ub: Option<Real>,
    pub q_0_lb: Option<Real>,
    pub beta_ub: Option<Real>,
    pub beta_lb: Option<Real>,
}

impl TryFrom<ReactiveCapabilityDef> for ReactiveCapability {
    type Error = ConditionalFieldsError;

    fn try_from(def: ReactiveCapabilityDef) -> Result<Self, Self::Error> {
        let linear = FlagGate::new("q_linear_cap", def.q_linear_cap);
        let bounded = FlagGate::new("q_bound_cap", def.q_bound_cap);

        let mut errors = Vec::new();
        linear.exclusive_with(&bounded, &mut errors);
        let linear = linear.take([("q_0", def.q_0), ("beta", def.beta)], &mut errors);
        let bounded = bounded.take(
            [
                ("q_0_ub", def.q_0_ub),
                ("q_0_lb", def.q_0_lb),
                ("beta_ub", def.beta_ub),
                ("beta_lb", def.beta_lb),
            ],
            &mut errors,
        );

        let capability = match (linear, bounded) {
            (Some([q_0, beta]), None) => ReactiveCapability::Linear { q_0, beta },
            (None, Some([q_0_ub, q_0_lb, beta_ub, beta_lb])) => ReactiveCapability::Bounded {
                q_0_ub,
                q_0_lb,
                beta_ub,
                beta_lb,
            },
            _ => ReactiveCapability::Unconstrained,
        };
        ConditionalFieldsError::check(errors, capability)
    }
}

impl From<ReactiveCapability> for ReactiveCapabilityDef {
    fn from(capability: ReactiveCapability) -> Self {
        let mut def = ReactiveCapabilityDef {
            q_linear_cap: capability.q_linear_cap(),
            q_bound_cap: capability.q_bound_cap(),
            ..Default::default()
        };
        match capability {
            ReactiveCapability::Unconstrained => {}
            ReactiveCapability::Linear { q_0, beta } => {
                def.q_0 = Some(q_0);
                def.beta = Some(beta);
            }
            ReactiveCapability::Bounded {
                q_0_ub,
                q_0_lb,
                beta_ub,
                beta_lb,
            } => {
                def.q_0_ub = Some(q_0_ub);
                def.q_0_lb = Some(q_0_lb);
                def.beta_ub = Some(beta_ub);
                def.beta_lb = Some(beta_lb);
            }
        }
        def
    }
}

/// Shunt admittance at both ends of a branch (p.u.).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShuntAdmittance {
    pub g_fr: Real,
    pub b_fr: Real,
    pub g_to: Real,
    pub b_to: Real,
}

/// Optional branch shunt components, gated by `additional_shunt`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AdditionalShunt {
    #[default]
    Absent,
    Present(ShuntAdmittance),
}

impl AdditionalShunt {
    pub fn flag(&self) -> Indicator {
        matches!(self, AdditionalShunt::Present(_)).into()
    }

    pub fn admittance(&self) -> Option<&ShuntAdmittance> {
        match self {
            AdditionalShunt::Absent => None,
            AdditionalShunt::Present(admittance) => Some(admittance),
        }
    }
}

/// Wire form of [`AdditionalShunt`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdditionalShuntDef {
    pub additional_shunt: Indicator,
    pub g_fr: Option<Real>,
    pub b_fr: Option<Real>,
    pub g_to: Option<Real>,
    pub b_to: Option<Real>,
}

impl TryFrom<AdditionalShuntDef> for AdditionalShunt {
    type Error = ConditionalFieldsError;

    fn try_from(def: AdditionalShuntDef) -> Result<Self, Self::Error> {
        let gate = FlagGate::new("additional_shunt", def.additional_shunt);
        let mut errors = Vec::new();
        let taken = gate.take(
            [
                ("g_fr", def.g_fr),
                ("b_fr", def.b_fr),
                ("g_to", def.g_to),
                ("b_to", def.b_to),
            ],
            &mut errors,
        );
        let shunt = match taken {
            Some([g_fr, b_fr, g_to, b_to]) => AdditionalShunt::Present(ShuntAdmittance {
                g_fr,
                b_fr,
                g_to,
                b_to,
            }),
            None => AdditionalShunt::Absent,
        };
        ConditionalFieldsError::check(errors, shunt)
    }
}

impl From<AdditionalShunt> for AdditionalShuntDef {
    fn from(shunt: AdditionalShunt) -> Self {
        let admittance = shunt.admittance().copied();
        AdditionalShuntDef {
            additional_shunt: shunt.flag(),
            g_fr: admittance.map(|a| a.g_fr),
            b_fr: admittance.map(|a| a.b_fr),
            g_to: admittance.map(|a| a.g_to),
            b_to: admittance.map(|a| a.b_to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_capability_from_wire() {
        let def = ReactiveCapabilityDef {
            q_linear_cap: Indicator::On,
            q_0: Some(0.1),
            beta: Some(-0.5),
            ..Default::default()
        };
        assert_eq!(
            ReactiveCapability::try_from(def).unwrap(),
            ReactiveCapability::Linear {
                q_0: 0.1,
                beta: -0.5
            }
        );
    }

    #[test]
    fn flag_without_fields_is_rejected() {
        let def = ReactiveCapabilityDef {
            q_bound_cap: Indicator::On,
            q_0_ub: Some(1.0),
            ..Default::default()
        };
        let err = ReactiveCapability::try_from(def).unwrap_err().to_string();
        assert!(err.contains("q_0_lb is required when q_bound_cap = 1"));
        assert!(err.contains("beta_ub is required"));
        assert!(err.contains("beta_lb is required"));
    }

    #[test]
    fn both_flags_are_rejected() {
        let def = ReactiveCapabilityDef {
            q_linear_cap: Indicator::On,
            q_bound_cap: Indicator::On,
            q_0: Some(0.0),
            beta: Some(0.0),
            q_0_ub: Some(1.0),
            q_0_lb: Some(0.0),
            beta_ub: Some(0.0),
            beta_lb: Some(0.0),
        };
        let err = ReactiveCapability::try_from(def).unwrap_err().to_string();
        assert!(err.contains("q_linear_cap and q_bound_cap cannot both be 1"));
    }

    #[test]
    fn fields_without_flag_are_rejected() {
        let def = AdditionalShuntDef {
            g_fr: Some(0.01),
            ..Default::default()
        };
        let err = AdditionalShunt::try_from(def).unwrap_err().to_string();
        assert!(err.contains("g_fr must be absent when additional_shunt = 0"));
    }

    #[test]
    fn absent_shunt_keeps_only_the_flag() {
        let def = AdditionalShuntDef::from(AdditionalShunt::Absent);
        assert_eq!(def, AdditionalShuntDef::default());
    }

    #[test]
    fn bounded_capability_sets_flags_and_fields() {
        let capability = ReactiveCapability::Bounded {
            q_0_ub: 1.0,
            q_0_lb: -1.0,
            beta_ub: 0.5,
            beta_lb: -0.5,
        };
        let def = ReactiveCapabilityDef::from(capability);
        assert_eq!(def.q_linear_cap, Indicator::Off);
        assert_eq!(def.q_bound_cap, Indicator::On);
        assert_eq!(def.q_0_lb, Some(-1.0));
        assert_eq!(def.q_0, None);
        assert_eq!(ReactiveCapability::try_from(def).unwrap(), capability);
    }
}
