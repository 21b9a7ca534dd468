//! Flag-gated conditional fields.
//!
//! On the wire a 0/1 flag decides whether a group of sibling fields is present:
//! flag = 1 requires every field of the group, flag = 0 forbids all of them.
//! [`FlagGate`] turns that flat form into `Option<[Real; N]>` and collects every
//! presence violation of a record instead of stopping at the first.

use std::fmt;

use thiserror::Error;

use crate::indicator::Indicator;
use crate::numeric::Real;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenceError {
    #[error("{field} is required when {flag} = 1")]
    Missing { flag: &'static str, field: &'static str },

    #[error("{field} must be absent when {flag} = 0")]
    Unexpected { flag: &'static str, field: &'static str },

    #[error("{first} and {second} cannot both be 1")]
    ExclusiveFlags {
        first: &'static str,
        second: &'static str,
    },
}

/// All presence violations of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalFieldsError(pub Vec<PresenceError>);

impl ConditionalFieldsError {
    /// `Ok(value)` when no violation was collected.
    pub fn check<T>(errors: Vec<PresenceError>, value: T) -> Result<T, ConditionalFieldsError> {
        if errors.is_empty() {
            Ok(value)
        } else {
            Err(ConditionalFieldsError(errors))
        }
    }
}

impl fmt::Display for ConditionalFieldsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConditionalFieldsError {}

#[derive(Debug, Clone, Copy)]
pub struct FlagGate {
    pub flag: &'static str,
    pub value: Indicator,
}

impl FlagGate {
    pub fn new(flag: &'static str, value: Indicator) -> Self {
        Self { flag, value }
    }

    /// Values of the gated group when the flag is set and the group is complete.
    pub fn take<const N: usize>(
        &self,
        fields: [(&'static str, Option<Real>); N],
        errors: &mut Vec<PresenceError>,
    ) -> Option<[Real; N]> {
        if self.value.is_on() {
            let mut values = [0.0; N];
            let mut complete = true;
            for (slot, (field, value)) in values.iter_mut().zip(fields) {
                match value {
                    Some(v) => *slot = v,
                    None => {
                        complete = false;
                        errors.push(PresenceError::Missing {
                            flag: self.flag,
                            field,
                        });
                    }
                }
            }
            complete.then_some(values)
        } else {
            for (field, value) in fields {
                if value.is_some() {
                    errors.push(PresenceError::Unexpected {
                        flag: self.flag,
                        field,
                    });
                }
            }
            None
        }
    }

    /// Record a violation when both gates are set.
    pub fn exclusive_with(&self, other: &FlagGate, errors: &mut Vec<PresenceError>) {
        if self.value.is_on() && other.value.is_on() {
            errors.push(PresenceError::ExclusiveFlags {
                first: self.flag,
                second: other.flag,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_on_requires_every_field() {
        let gate = FlagGate::new("additional_shunt", Indicator::On);
        let mut errors = Vec::new();
        let taken = gate.take(
            [("g_fr", Some(0.1)), ("b_fr", None), ("g_to", None)],
            &mut errors,
        );
        assert!(taken.is_none());
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("b_fr is required"));
    }

    #[test]
    fn flag_off_forbids_fields() {
        let gate = FlagGate::new("q_linear_cap", Indicator::Off);
        let mut errors = Vec::new();
        let taken = gate.take([("q_0", Some(0.0)), ("beta", None)], &mut errors);
        assert!(taken.is_none());
        assert_eq!(
            errors,
            vec![PresenceError::Unexpected {
                flag: "q_linear_cap",
                field: "q_0"
            }]
        );
    }

    #[test]
    fn complete_group_is_returned_in_order() {
        let gate = FlagGate::new("q_linear_cap", Indicator::On);
        let mut errors = Vec::new();
        let taken = gate.take([("q_0", Some(0.5)), ("beta", Some(-0.2))], &mut errors);
        assert_eq!(taken, Some([0.5, -0.2]));
        assert!(errors.is_empty());
    }

    #[test]
    fn exclusive_flags() {
        let a = FlagGate::new("q_linear_cap", Indicator::On);
        let b = FlagGate::new("q_bound_cap", Indicator::On);
        let mut errors = Vec::new();
        a.exclusive_with(&b, &mut errors);
        assert_eq!(errors.len(), 1);

        let c = FlagGate::new("q_bound_cap", Indicator::Off);
        let mut errors = Vec::new();
        a.exclusive_with(&c, &mut errors);
        assert!(errors.is_empty());
    }
}
