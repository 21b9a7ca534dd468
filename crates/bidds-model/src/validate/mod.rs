//! Validation of records, sections and documents.
//!
//! Two tiers:
//! - [`RecordRules`] holds the rules of one record that need nothing outside it.
//!   Field rules run first; cross-field relations run only when every field
//!   rule of the record passed.
//! - [`Validate`] runs everything reachable from a value. For a document this
//!   includes the cross-entity rules (uid uniqueness, references).
//!
//! [`Validated<T>`] can only be obtained by running [`Validate`]. Mutating the
//! inner value requires leaving the wrapper and calling [`revalidate_document`]
//! (or [`Validated::modify`]), so document rules are never skipped.

use std::ops::Deref;

use bidds_core::{Checks, EntityRef, ValidationReport};
use serde::{Serialize, Serializer};

use crate::config::ValidationConfig;
use crate::schema::{Entity, Horizon};

pub use document::validate_output_against_input;

/// Rules local to one record.
pub trait RecordRules {
    fn check(&self, checks: &mut Checks<'_>);
}

pub trait Validate {
    /// Push every failure into `report`.
    fn validate_into(&self, config: &ValidationConfig, report: &mut ValidationReport);

    fn validate(&self, config: &ValidationConfig) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        self.validate_into(config, &mut report);
        report.into_result()
    }
}

/// Local rules of every record of a collection, located by index and uid.
pub(crate) fn check_collection<T: RecordRules + Entity>(records: &[T], report: &mut ValidationReport) {
    for (index, record) in records.iter().enumerate() {
        let mut checks = Checks::new(EntityRef::item(T::COLLECTION, index, record.uid()), report);
        record.check(&mut checks);
    }
}

/// Every per-period array of every record has `horizon` entries.
pub(crate) fn check_record_lengths<T: Entity + Horizon>(
    records: &[T],
    horizon: usize,
    report: &mut ValidationReport,
) {
    for (index, record) in records.iter().enumerate() {
        let mut checks = Checks::new(EntityRef::item(T::COLLECTION, index, record.uid()), report);
        for (field, len) in record.lengths() {
            checks.length(field, len, horizon);
        }
    }
}

/// Run the local rules of a single record, outside any document.
pub fn validate_entity<T: RecordRules + Entity>(record: &T) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::new();
    let mut checks = Checks::new(EntityRef::record(T::COLLECTION, record.uid()), &mut report);
    record.check(&mut checks);
    report.into_result()
}

macro_rules! validate_records {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::validate::Validate for $ty {
                fn validate_into(
                    &self,
                    _config: &$crate::config::ValidationConfig,
                    report: &mut ::bidds_core::ValidationReport,
                ) {
                    use $crate::schema::Entity;
                    let mut checks = ::bidds_core::Checks::new(
                        ::bidds_core::EntityRef::record(<$ty as Entity>::COLLECTION, self.uid()),
                        report,
                    );
                    $crate::validate::RecordRules::check(self, &mut checks);
                }
            }
        )*
    };
}

pub mod document;
pub mod network;
pub mod output;
pub mod series;

/// A value that passed [`Validate`] with the config it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    value: T,
    config: ValidationConfig,
}

impl<T: Validate> Validated<T> {
    pub fn new(value: T, config: &ValidationConfig) -> Result<Self, ValidationReport> {
        value.validate(config)?;
        Ok(Self {
            value,
            config: config.clone(),
        })
    }

    /// Apply `f` and re-run the full validation.
    pub fn modify(self, f: impl FnOnce(&mut T)) -> Result<Self, ValidationReport> {
        let Validated { mut value, config } = self;
        f(&mut value);
        Validated::new(value, &config)
    }
}

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for Validated<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T: Serialize> Serialize for Validated<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Validate a document again, typically after [`Validated::into_inner`] and mutation.
pub fn revalidate_document<T: Validate>(
    document: T,
    config: &ValidationConfig,
) -> Result<Validated<T>, ValidationReport> {
    Validated::new(document, config)
}
