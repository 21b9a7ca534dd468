//! Cross-entity rules: uid uniqueness and references between collections.

use std::collections::{HashMap, HashSet};

use bidds_core::{EntityRef, ValidationError, ValidationReport};

use super::Validate;
use crate::config::ValidationConfig;
use crate::schema::{Entity, InputDataFile, Network, OutputDataFile, TimeSeriesInput};

/// One error per uid occurring more than once, in order of first occurrence.
pub(crate) fn check_unique_uids<'a>(
    uids: impl IntoIterator<Item = &'a str>,
    report: &mut ValidationReport,
) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for uid in uids {
        let count = counts.entry(uid).or_insert(0);
        if *count == 0 {
            order.push(uid);
        }
        *count += 1;
    }
    for uid in order {
        let count = counts[uid];
        if count > 1 {
            report.push(ValidationError::DuplicateUid {
                uid: uid.to_string(),
                count,
            });
        }
    }
}

/// Uids of `targets` that are not in `domain`, deduplicated, in reference order.
fn unresolved<'a>(targets: impl IntoIterator<Item = &'a str>, domain: &HashSet<&str>) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for target in targets {
        if !domain.contains(target) && !missing.iter().any(|m| m == target) {
            missing.push(target.to_string());
        }
    }
    missing
}

fn check_references<'a, T: Entity + 'a>(
    records: &'a [T],
    field: &str,
    targets: impl Fn(&'a T) -> Vec<&'a str>,
    domain: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    for (index, record) in records.iter().enumerate() {
        let missing = unresolved(targets(record), domain);
        if !missing.is_empty() {
            report.push(ValidationError::UnresolvedReference {
                entity: EntityRef::item(T::COLLECTION, index, record.uid()),
                field: field.to_string(),
                missing,
            });
        }
    }
}

fn uid_set<T: Entity>(records: &[T]) -> HashSet<&str> {
    records.iter().map(|r| r.uid()).collect()
}

/// Every contingency names only AC lines, transformers or DC lines of the network.
fn check_contingencies(document: &InputDataFile, report: &mut ValidationReport) {
    let branches: HashSet<&str> = document.network.branch_uids().collect();
    check_references(
        &document.reliability.contingency,
        "components",
        |c| c.components.iter().map(String::as_str).collect(),
        &branches,
        report,
    );
}

fn check_bus_references(network: &Network, report: &mut ValidationReport) {
    let buses = uid_set(&network.bus);
    check_references(&network.shunt, "bus", |s| vec![s.bus.as_str()], &buses, report);
    check_references(
        &network.simple_dispatchable_device,
        "bus",
        |d| vec![d.bus.as_str()],
        &buses,
        report,
    );
    check_references(
        &network.ac_line,
        "fr_bus, to_bus",
        |l| vec![l.fr_bus.as_str(), l.to_bus.as_str()],
        &buses,
        report,
    );
    check_references(
        &network.two_winding_transformer,
        "fr_bus, to_bus",
        |t| vec![t.fr_bus.as_str(), t.to_bus.as_str()],
        &buses,
        report,
    );
    check_references(
        &network.dc_line,
        "fr_bus, to_bus",
        |l| vec![l.fr_bus.as_str(), l.to_bus.as_str()],
        &buses,
        report,
    );
}

fn check_reserve_zone_references(network: &Network, report: &mut ValidationReport) {
    let active = uid_set(&network.active_zonal_reserve);
    let reactive = uid_set(&network.reactive_zonal_reserve);
    check_references(
        &network.bus,
        "active_reserve_uids",
        |b| b.active_reserve_uids.iter().map(String::as_str).collect(),
        &active,
        report,
    );
    check_references(
        &network.bus,
        "reactive_reserve_uids",
        |b| b.reactive_reserve_uids.iter().map(String::as_str).collect(),
        &reactive,
        report,
    );
}

/// Time-series records and network records of one kind match one to one.
fn check_coverage<N: Entity, S: Entity>(
    network: &[N],
    series: &[S],
    report: &mut ValidationReport,
) {
    check_unique_uids(series.iter().map(|s| s.uid()), report);
    check_references(series, "uid", |s| vec![s.uid()], &uid_set(network), report);

    let covered = uid_set(series);
    for (index, record) in network.iter().enumerate() {
        if !covered.contains(record.uid()) {
            report.push(ValidationError::MissingCounterpart {
                entity: EntityRef::item(N::COLLECTION, index, record.uid()),
                collection: S::COLLECTION.to_string(),
            });
        }
    }
}

fn check_time_series_coverage(network: &Network, ts: &TimeSeriesInput, report: &mut ValidationReport) {
    check_coverage(
        &network.simple_dispatchable_device,
        &ts.simple_dispatchable_device,
        report,
    );
    check_coverage(&network.active_zonal_reserve, &ts.active_zonal_reserve, report);
    check_coverage(&network.reactive_zonal_reserve, &ts.reactive_zonal_reserve, report);
}

/// Document-level rules of an input document.
pub fn check_input_document(
    document: &InputDataFile,
    config: &ValidationConfig,
    report: &mut ValidationReport,
) {
    let network = &document.network;
    let uids = network.uids().into_iter().map(|(_, uid)| uid).chain(
        document
            .reliability
            .contingency
            .iter()
            .map(|c| c.uid.as_str()),
    );
    check_unique_uids(uids, report);
    check_contingencies(document, report);

    if config.check_bus_references {
        check_bus_references(network, report);
    }
    if config.check_reserve_zone_references {
        check_reserve_zone_references(network, report);
    }
    if config.check_time_series_coverage {
        check_time_series_coverage(network, &document.time_series_input, report);
    }
}

impl Validate for InputDataFile {
    fn validate_into(&self, config: &ValidationConfig, report: &mut ValidationReport) {
        self.network.validate_into(config, report);
        self.time_series_input.validate_into(config, report);
        self.reliability.validate_into(config, report);
        check_input_document(self, config, report);
    }
}

/// Check a solution against the input it solves.
///
/// Every solution record must name an input record of the same kind, every
/// input record must have a solution record, and every array must cover
/// `time_periods`.
pub fn validate_output_against_input(
    output: &OutputDataFile,
    input: &InputDataFile,
) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::new();
    let out = &output.time_series_output;
    let network = &input.network;

    check_coverage(&network.bus, &out.bus, &mut report);
    check_coverage(&network.shunt, &out.shunt, &mut report);
    check_coverage(
        &network.simple_dispatchable_device,
        &out.simple_dispatchable_device,
        &mut report,
    );
    check_coverage(&network.ac_line, &out.ac_line, &mut report);
    check_coverage(
        &network.two_winding_transformer,
        &out.two_winding_transformer,
        &mut report,
    );
    check_coverage(&network.dc_line, &out.dc_line, &mut report);

    if let Some(horizon) = input.time_series_input.general.horizon() {
        out.check_horizon(horizon, &mut report);
    }
    report.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_reported_once_with_count() {
        let mut report = ValidationReport::new();
        check_unique_uids(["B1", "B2", "B1", "B1", "B2", "B3"], &mut report);
        assert_eq!(
            report.errors(),
            &[
                ValidationError::DuplicateUid {
                    uid: "B1".to_string(),
                    count: 3
                },
                ValidationError::DuplicateUid {
                    uid: "B2".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn unresolved_keeps_reference_order_without_repeats() {
        let domain: HashSet<&str> = ["L1", "T1"].into_iter().collect();
        let missing = unresolved(["L9", "L1", "X", "L9"], &domain);
        assert_eq!(missing, vec!["L9".to_string(), "X".to_string()]);
    }
}
