//! JSON Schema of the input and output documents, derived from the record types.

use std::path::Path;
use std::str::FromStr;

use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::schema::{InputDataFile, OutputDataFile};
use crate::{DocumentError, DocumentResult, to_pretty_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Input,
    Output,
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(DocumentKind::Input),
            "output" => Ok(DocumentKind::Output),
            other => Err(format!("unknown document kind '{}'", other)),
        }
    }
}

pub fn input_schema() -> RootSchema {
    schema_for!(InputDataFile)
}

pub fn output_schema() -> RootSchema {
    schema_for!(OutputDataFile)
}

pub fn schema(kind: DocumentKind) -> RootSchema {
    match kind {
        DocumentKind::Input => input_schema(),
        DocumentKind::Output => output_schema(),
    }
}

pub fn schema_json(kind: DocumentKind) -> DocumentResult<String> {
    to_pretty_json(&schema(kind))
}

pub fn save_schema(kind: DocumentKind, path: &Path) -> DocumentResult<()> {
    let content = schema_json(kind)?;
    std::fs::write(path, content).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), ?kind, "wrote schema");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn definition(schema: &Value, name: &str) -> Value {
        schema["definitions"][name].clone()
    }

    #[test]
    fn input_schema_lists_wire_fields() {
        let schema = serde_json::to_value(input_schema()).unwrap();
        assert_eq!(schema["title"], "InputDataFile");

        let device = definition(&schema, "SimpleDispatchableDevice");
        let properties = device["properties"].as_object().unwrap();
        for field in ["q_linear_cap", "q_bound_cap", "q_0", "beta_lb", "p_ramp_up_ub"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
        assert!(!properties.contains_key("reactive_capability"));
        assert_eq!(device["additionalProperties"], false);

        let line = definition(&schema, "AcLine");
        assert!(line["properties"].get("b_to").is_some());
        assert_eq!(line["additionalProperties"], false);

        let zone = definition(&schema, "ActiveZonalReserve");
        assert!(zone["properties"].get("REG_UP").is_some());
    }

    #[test]
    fn indicator_is_a_zero_one_integer() {
        let schema = serde_json::to_value(input_schema()).unwrap();
        let indicator = definition(&schema, "Indicator");
        assert_eq!(indicator["type"], "integer");
        assert_eq!(indicator["enum"], serde_json::json!([0, 1]));
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("output".parse::<DocumentKind>(), Ok(DocumentKind::Output));
        assert!("network".parse::<DocumentKind>().is_err());
    }
}
