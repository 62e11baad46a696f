//! Tool descriptor types
//!
//! Descriptors are produced by the server in its `tools/list` reply and are
//! only ever read by the client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::identifiers::ToolName;

/// Description of a single tool parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Declared type of the parameter (e.g. `"string"`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

/// Metadata describing a callable tool exposed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, used as `params.name` in `tools/call`
    pub name: ToolName,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Parameters keyed by name
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterSpec>,
    /// JSON schema for the arguments, kept verbatim when the server sends one
    #[serde(rename = "inputSchema", default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
}

impl ToolDescriptor {
    /// Create a descriptor with no parameters
    pub fn new(name: impl Into<ToolName>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: BTreeMap::new(),
            input_schema: None,
        }
    }

    /// Add a parameter
    #[must_use]
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.parameters.insert(
            name.into(),
            ParameterSpec {
                kind: kind.into(),
                description: description.into(),
            },
        );
        self
    }
}
