//! Switches for the document-level rules.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DocumentError, DocumentResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Require exactly one outaged component per contingency (N-1 only).
    pub single_component_contingencies: bool,
    /// Shunts, devices and branches must connect to buses of the network.
    pub check_bus_references: bool,
    /// Bus reserve zone lists must name zonal reserves of the network.
    pub check_reserve_zone_references: bool,
    /// Time-series records must match network records one to one.
    pub check_time_series_coverage: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            single_component_contingencies: false,
            check_bus_references: true,
            check_reserve_zone_references: true,
            check_time_series_coverage: true,
        }
    }
}

impl ValidationConfig {
    /// Read a config file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> DocumentResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        tracing::debug!(path = %path.display(), ?config, "loaded validation config");
        Ok(config)
    }

    /// Only the rules that need nothing outside a single record or section.
    pub fn local_only() -> Self {
        Self {
            single_component_contingencies: false,
            check_bus_references: false,
            check_reserve_zone_references: false,
            check_time_series_coverage: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: ValidationConfig =
            serde_yaml::from_str("single_component_contingencies: true\n").unwrap();
        assert!(config.single_component_contingencies);
        assert!(config.check_bus_references);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<ValidationConfig>("strict: true\n").is_err());
    }

    #[test]
    fn load_by_extension() {
        let dir = std::env::temp_dir();
        let json = dir.join("bidds_config_test.json");
        let yaml = dir.join("bidds_config_test.yaml");
        std::fs::write(&json, r#"{"check_bus_references": false}"#).unwrap();
        std::fs::write(&yaml, "check_time_series_coverage: false\n").unwrap();

        assert!(!ValidationConfig::load(&json).unwrap().check_bus_references);
        assert!(!ValidationConfig::load(&yaml).unwrap().check_time_series_coverage);

        let _ = std::fs::remove_file(json);
        let _ = std::fs::remove_file(yaml);
    }
}
