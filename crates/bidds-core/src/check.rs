//! Predicates that record failures against one record.
//!
//! A [`Checks`] is opened per record; every failing predicate pushes a
//! [`ValidationError`] carrying the record location into the shared report,
//! so a single pass enumerates all defects.

use std::fmt::Display;

use crate::blocks::Window;
use crate::error::{EntityRef, ValidationError, ValidationReport};
use crate::numeric::{Real, failing_indices, failing_pairs, is_non_negative, is_positive};

pub struct Checks<'a> {
    entity: EntityRef,
    report: &'a mut ValidationReport,
    start: usize,
}

impl<'a> Checks<'a> {
    pub fn new(entity: EntityRef, report: &'a mut ValidationReport) -> Self {
        let start = report.len();
        Self {
            entity,
            report,
            start,
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    /// Nothing has failed since this record was opened.
    pub fn passed(&self) -> bool {
        self.report.len() == self.start
    }

    /// Checks for a nested record sharing this report.
    pub fn child(&mut self, name: &str) -> Checks<'_> {
        let entity = self.entity.child(name);
        Checks::new(entity, &mut *self.report)
    }

    /// Record a single-field failure.
    pub fn invalid(&mut self, field: &str, value: impl Display, rule: &str) {
        self.report.push(ValidationError::FieldConstraint {
            entity: self.entity.clone(),
            field: field.to_string(),
            value: value.to_string(),
            rule: rule.to_string(),
        });
    }

    pub fn finite(&mut self, field: &str, v: Real) {
        if !v.is_finite() {
            self.invalid(field, v, "finite");
        }
    }

    pub fn opt_finite(&mut self, field: &str, v: Option<Real>) {
        if let Some(v) = v {
            self.finite(field, v);
        }
    }

    pub fn non_negative(&mut self, field: &str, v: Real) {
        if !is_non_negative(v) {
            self.invalid(field, v, ">= 0");
        }
    }

    pub fn positive(&mut self, field: &str, v: Real) {
        if !is_positive(v) {
            self.invalid(field, v, "> 0");
        }
    }

    pub fn non_positive(&mut self, field: &str, v: Real) {
        if !(v.is_finite() && v <= 0.0) {
            self.invalid(field, v, "<= 0");
        }
    }

    pub fn opt_positive(&mut self, field: &str, v: Option<Real>) {
        if let Some(v) = v {
            self.positive(field, v);
        }
    }

    pub fn int_non_negative(&mut self, field: &str, v: i64) {
        if v < 0 {
            self.invalid(field, v, ">= 0");
        }
    }

    pub fn int_positive(&mut self, field: &str, v: i64) {
        if v <= 0 {
            self.invalid(field, v, "> 0");
        }
    }

    /// Record an element-wise failure when `indices` is non-empty.
    pub fn elements(&mut self, field: &str, indices: Vec<usize>, rule: &str) {
        if !indices.is_empty() {
            self.report.push(ValidationError::ElementConstraint {
                entity: self.entity.clone(),
                field: field.to_string(),
                indices,
                rule: rule.to_string(),
            });
        }
    }

    pub fn each_finite(&mut self, field: &str, values: &[Real]) {
        let bad = failing_indices(values, |v| v.is_finite());
        self.elements(field, bad, "finite");
    }

    pub fn each_non_negative(&mut self, field: &str, values: &[Real]) {
        let bad = failing_indices(values, |v| is_non_negative(*v));
        self.elements(field, bad, ">= 0");
    }

    pub fn each_positive(&mut self, field: &str, values: &[Real]) {
        let bad = failing_indices(values, |v| is_positive(*v));
        self.elements(field, bad, "> 0");
    }

    pub fn each_int_non_negative(&mut self, field: &str, values: &[i64]) {
        let bad = failing_indices(values, |v| *v >= 0);
        self.elements(field, bad, ">= 0");
    }

    /// Record a cross-field failure unless `holds`.
    pub fn relation(&mut self, relation: &str, fields: &[(&str, String)], holds: bool) {
        if !holds {
            self.report.push(ValidationError::CrossField {
                entity: self.entity.clone(),
                fields: fields
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect(),
                relation: relation.to_string(),
            });
        }
    }

    pub fn le<T: PartialOrd + Display>(&mut self, lhs: (&str, T), rhs: (&str, T)) {
        let holds = lhs.1 <= rhs.1;
        self.relation(
            &format!("{} <= {}", lhs.0, rhs.0),
            &[(lhs.0, lhs.1.to_string()), (rhs.0, rhs.1.to_string())],
            holds,
        );
    }

    pub fn lt<T: PartialOrd + Display>(&mut self, lhs: (&str, T), rhs: (&str, T)) {
        let holds = lhs.1 < rhs.1;
        self.relation(
            &format!("{} < {}", lhs.0, rhs.0),
            &[(lhs.0, lhs.1.to_string()), (rhs.0, rhs.1.to_string())],
            holds,
        );
    }

    pub fn distinct(&mut self, lhs: (&str, &str), rhs: (&str, &str)) {
        self.relation(
            &format!("{} != {}", lhs.0, rhs.0),
            &[(lhs.0, lhs.1.to_string()), (rhs.0, rhs.1.to_string())],
            lhs.1 != rhs.1,
        );
    }

    /// `lb <= value <= ub`, each side reported separately so the violated bound is named.
    pub fn within<T: PartialOrd + Display + Copy>(
        &mut self,
        value: (&str, T),
        lb: (&str, T),
        ub: (&str, T),
    ) {
        self.le(lb, value);
        self.le(value, ub);
    }

    /// `lhs[t] <= rhs[t]` for every index, enumerating all failing indices.
    pub fn each_le<T: PartialOrd>(&mut self, lhs: (&str, &[T]), rhs: (&str, &[T])) {
        let bad = failing_pairs(lhs.1, rhs.1, |l, r| l <= r);
        self.elements(
            &format!("{}, {}", lhs.0, rhs.0),
            bad,
            &format!("{}[t] <= {}[t]", lhs.0, rhs.0),
        );
    }

    pub fn length(&mut self, field: &str, actual: usize, expected: usize) {
        if actual != expected {
            self.report.push(ValidationError::LengthMismatch {
                entity: self.entity.clone(),
                field: field.to_string(),
                expected,
                actual,
            });
        }
    }

    /// Interval blocks: start >= 0, end >= start, limit >= 0, starts non-decreasing.
    pub fn windows<W: Window>(&mut self, field: &str, blocks: &[W]) {
        let bad = failing_indices(blocks, |b| is_non_negative(b.start()));
        self.elements(field, bad, "start >= 0");

        let bad = failing_indices(blocks, |b| b.end().is_finite() && b.end() >= b.start());
        self.elements(field, bad, "end >= start");

        let bad = failing_indices(blocks, |b| is_non_negative(b.limit()));
        self.elements(field, bad, "limit >= 0");

        let bad: Vec<usize> = blocks
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1].start() < pair[0].start())
            .map(|(i, _)| i + 1)
            .collect();
        self.elements(field, bad, "start >= previous start");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{EnergyWindow, StartupWindow};
    use proptest::prelude::*;

    fn entity() -> EntityRef {
        EntityRef::item("simple_dispatchable_device", 0, "G1")
    }

    #[test]
    fn passed_tracks_only_this_record() {
        let mut report = ValidationReport::new();
        Checks::new(entity(), &mut report).positive("vm_lb", 0.0);

        let mut checks = Checks::new(entity(), &mut report);
        assert!(checks.passed());
        checks.non_negative("on_cost", -1.0);
        assert!(!checks.passed());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn within_names_violated_bound() {
        let mut report = ValidationReport::new();
        Checks::new(entity(), &mut report).within(
            ("initial_status.vm", 1.2),
            ("vm_lb", 0.9),
            ("vm_ub", 1.1),
        );
        assert_eq!(report.len(), 1);
        let err = &report.errors()[0];
        assert_eq!(err.fields(), vec!["initial_status.vm", "vm_ub"]);
    }

    #[test]
    fn windows_enumerate_every_offending_index() {
        let blocks = [
            StartupWindow(0.0, 24.0, 1),
            StartupWindow(-1.0, 4.0, 1),
            StartupWindow(5.0, 2.0, -1),
            StartupWindow(6.0, 1.0, 0),
        ];
        let mut report = ValidationReport::new();
        Checks::new(entity(), &mut report).windows("startups_ub", &blocks);

        let by_rule = |rule: &str| {
            report
                .iter()
                .find_map(|e| match e {
                    ValidationError::ElementConstraint {
                        rule: r, indices, ..
                    } if r == rule => Some(indices.clone()),
                    _ => None,
                })
                .unwrap_or_default()
        };
        assert_eq!(by_rule("start >= 0"), vec![1]);
        assert_eq!(by_rule("end >= start"), vec![2, 3]);
        assert_eq!(by_rule("limit >= 0"), vec![2]);
        assert_eq!(by_rule("start >= previous start"), vec![1]);
    }

    #[test]
    fn valid_energy_windows_pass() {
        let blocks = [EnergyWindow(0.0, 12.0, 3.5), EnergyWindow(12.0, 24.0, 0.0)];
        let mut report = ValidationReport::new();
        Checks::new(entity(), &mut report).windows("energy_req_ub", &blocks);
        assert!(report.is_empty());
    }

    #[test]
    fn each_le_reports_all_periods() {
        let lb = [0.0, 2.0, 1.0, 5.0];
        let ub = [1.0, 1.0, 1.0, 4.0];
        let mut report = ValidationReport::new();
        Checks::new(entity(), &mut report).each_le(("p_lb", &lb[..]), ("p_ub", &ub[..]));
        match &report.errors()[0] {
            ValidationError::ElementConstraint { indices, rule, .. } => {
                assert_eq!(indices, &vec![1, 3]);
                assert_eq!(rule, "p_lb[t] <= p_ub[t]");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn sorted_windows_always_pass(
            mut starts in proptest::collection::vec(0.0f64..100.0, 0..8),
            len in 0.0f64..10.0,
            limit in 0i64..5,
        ) {
            starts.sort_by(|a, b| a.total_cmp(b));
            let blocks: Vec<_> = starts
                .iter()
                .map(|&s| StartupWindow(s, s + len, limit))
                .collect();
            let mut report = ValidationReport::new();
            Checks::new(entity(), &mut report).windows("startups_ub", &blocks);
            prop_assert!(report.is_empty());
        }
    }
}
