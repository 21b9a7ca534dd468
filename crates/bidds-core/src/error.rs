use std::fmt;

use thiserror::Error;

/// Location of a record inside a document, e.g. `bus[3] 'B7'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub collection: String,
    pub index: Option<usize>,
    pub uid: Option<String>,
    /// Nested record below the collection item (`initial_status`).
    pub member: Option<String>,
}

impl EntityRef {
    /// A record that is not part of a list (`network.general`, `network.violation_cost`).
    pub fn section(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            index: None,
            uid: None,
            member: None,
        }
    }

    /// The `index`-th record of a collection.
    pub fn item(collection: impl Into<String>, index: usize, uid: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            index: Some(index),
            uid: Some(uid.into()),
            member: None,
        }
    }

    /// A record checked on its own, outside any document.
    pub fn record(collection: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            index: None,
            uid: Some(uid.into()),
            member: None,
        }
    }

    /// A nested record of this one (`bus[3] 'B7'.initial_status`).
    pub fn child(&self, name: &str) -> Self {
        let member = match &self.member {
            Some(member) => format!("{}.{}", member, name),
            None => name.to_string(),
        };
        Self {
            member: Some(member),
            ..self.clone()
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)?;
        if let Some(index) = self.index {
            write!(f, "[{}]", index)?;
        }
        if let Some(uid) = &self.uid {
            write!(f, " '{}'", uid)?;
        }
        if let Some(member) = &self.member {
            write!(f, ".{}", member)?;
        }
        Ok(())
    }
}

/// Coarse classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A single field violates its own bound.
    Field,
    /// A relation between fields of one record is violated.
    CrossField,
    /// A document-wide invariant is violated.
    CrossEntity,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{entity}: {field} = {value} fails {rule}")]
    FieldConstraint {
        entity: EntityRef,
        field: String,
        value: String,
        rule: String,
    },

    #[error("{entity}: {field} fails {rule} at indices {indices:?}")]
    ElementConstraint {
        entity: EntityRef,
        field: String,
        indices: Vec<usize>,
        rule: String,
    },

    #[error("{entity}: fails {relation} ({})", display_pairs(.fields))]
    CrossField {
        entity: EntityRef,
        fields: Vec<(String, String)>,
        relation: String,
    },

    #[error("uid '{uid}' appears {count} times")]
    DuplicateUid { uid: String, count: usize },

    #[error("{entity}: {field} references unknown uids {missing:?}")]
    UnresolvedReference {
        entity: EntityRef,
        field: String,
        missing: Vec<String>,
    },

    #[error("{entity}: {field} has {actual} elements, expected {expected}")]
    Cardinality {
        entity: EntityRef,
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("{entity}: {field} has length {actual}, expected {expected}")]
    LengthMismatch {
        entity: EntityRef,
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("{entity}: no matching record in {collection}")]
    MissingCounterpart { entity: EntityRef, collection: String },
}

fn display_pairs(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ValidationError::FieldConstraint { .. } | ValidationError::ElementConstraint { .. } => {
                ErrorClass::Field
            }
            ValidationError::CrossField { .. } => ErrorClass::CrossField,
            ValidationError::DuplicateUid { .. }
            | ValidationError::UnresolvedReference { .. }
            | ValidationError::Cardinality { .. }
            | ValidationError::LengthMismatch { .. }
            | ValidationError::MissingCounterpart { .. } => ErrorClass::CrossEntity,
        }
    }

    /// The record the error is attached to, if it is attached to one.
    pub fn entity(&self) -> Option<&EntityRef> {
        match self {
            ValidationError::FieldConstraint { entity, .. }
            | ValidationError::ElementConstraint { entity, .. }
            | ValidationError::CrossField { entity, .. }
            | ValidationError::UnresolvedReference { entity, .. }
            | ValidationError::Cardinality { entity, .. }
            | ValidationError::LengthMismatch { entity, .. }
            | ValidationError::MissingCounterpart { entity, .. } => Some(entity),
            ValidationError::DuplicateUid { .. } => None,
        }
    }

    /// Names of the fields involved in the failure.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldConstraint { field, .. }
            | ValidationError::ElementConstraint { field, .. }
            | ValidationError::UnresolvedReference { field, .. }
            | ValidationError::Cardinality { field, .. }
            | ValidationError::LengthMismatch { field, .. } => vec![field.as_str()],
            ValidationError::CrossField { fields, .. } => {
                fields.iter().map(|(name, _)| name.as_str()).collect()
            }
            ValidationError::DuplicateUid { .. } | ValidationError::MissingCounterpart { .. } => {
                vec![]
            }
        }
    }
}

/// Every failure found by one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn count_class(&self, class: ErrorClass) -> usize {
        self.errors.iter().filter(|e| e.class() == class).count()
    }

    /// `Ok(())` for an empty report, the report itself otherwise.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
