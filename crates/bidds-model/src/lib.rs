//! bidds-model: Bid-DS input and output documents and their validation.
//!
//! Loading parses the JSON (type-level rules: strict integers, 0/1 indicators,
//! enumerated options, flag-gated field groups) and then runs every record,
//! section and document rule. Saving accepts only validated documents.

pub mod config;
pub mod export;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use bidds_core::ValidationReport;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use config::ValidationConfig;
pub use export::{DocumentKind, input_schema, output_schema, save_schema, schema_json};
pub use schema::*;
pub use validate::{
    RecordRules, Validate, Validated, revalidate_document, validate_entity,
    validate_output_against_input,
};

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialized document is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Validation(#[from] ValidationReport),

    #[error("{} rejected: {report}", path.display())]
    Rejected {
        path: PathBuf,
        report: ValidationReport,
    },
}

impl DocumentError {
    /// Validation errors of a rejected document, loaded from a file or not.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            DocumentError::Validation(report) | DocumentError::Rejected { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Pretty JSON with a 4-space indent.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> DocumentResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Parse and validate a document held in memory.
pub fn from_json_str<T>(content: &str, config: &ValidationConfig) -> DocumentResult<Validated<T>>
where
    T: DeserializeOwned + Validate,
{
    let document: T = serde_json::from_str(content)?;
    Ok(Validated::new(document, config)?)
}

pub fn to_json_string<T: Serialize>(document: &Validated<T>) -> DocumentResult<String> {
    to_pretty_json(document)
}

fn load<T>(path: &Path, config: &ValidationConfig) -> DocumentResult<Validated<T>>
where
    T: DeserializeOwned + Validate,
{
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read document");

    let document: T = serde_json::from_str(&content).map_err(|source| {
        tracing::warn!(path = %path.display(), %source, "document failed to parse");
        DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Validated::new(document, config).map_err(|report| {
        tracing::warn!(path = %path.display(), errors = report.len(), "document rejected");
        DocumentError::Rejected {
            path: path.to_path_buf(),
            report,
        }
    })
}

fn save<T: Serialize>(path: &Path, document: &Validated<T>) -> DocumentResult<()> {
    let content = to_json_string(document)?;
    std::fs::write(path, content).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_input(path: &Path, config: &ValidationConfig) -> DocumentResult<Validated<InputDataFile>> {
    let document = load::<InputDataFile>(path, config)?;
    tracing::info!(
        path = %path.display(),
        buses = document.network.bus.len(),
        devices = document.network.simple_dispatchable_device.len(),
        contingencies = document.reliability.contingency.len(),
        time_periods = document.time_series_input.general.time_periods,
        "loaded input document"
    );
    Ok(document)
}

pub fn load_output(path: &Path, config: &ValidationConfig) -> DocumentResult<Validated<OutputDataFile>> {
    let document = load::<OutputDataFile>(path, config)?;
    tracing::info!(
        path = %path.display(),
        horizon = document.time_series_output.horizon().unwrap_or(0),
        "loaded output document"
    );
    Ok(document)
}

pub fn save_input(path: &Path, document: &Validated<InputDataFile>) -> DocumentResult<()> {
    save(path, document)?;
    tracing::info!(path = %path.display(), buses = document.network.bus.len(), "saved input document");
    Ok(())
}

pub fn save_output(path: &Path, document: &Validated<OutputDataFile>) -> DocumentResult<()> {
    save(path, document)?;
    tracing::info!(path = %path.display(), "saved output document");
    Ok(())
}
