//! `tools/*` payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::identifiers::ToolName;
use crate::types::tool::ToolDescriptor;

/// Result of `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsListResult {
    /// Tools in the order the server listed them
    pub tools: Vec<ToolDescriptor>,
}

/// Parameters of `tools/call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolsCallParams {
    /// Tool to invoke
    pub name: ToolName,
    /// Arguments, always an object on the wire
    pub arguments: Map<String, Value>,
}
