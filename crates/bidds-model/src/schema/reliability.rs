//! Contingency definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A set of branches outaged together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Contingency {
    pub uid: String,
    /// Uids of the outaged AC lines, transformers or DC lines
    pub components: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Reliability {
    #[serde(default)]
    pub contingency: Vec<Contingency>,
}

entity!(Contingency, "contingency");
