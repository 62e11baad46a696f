//! Handshake payloads
//!
//! The `initialize` call is the first exchange with a server; it carries the
//! protocol version, the client's declared capabilities and its identity.

use serde::{Deserialize, Serialize};

use super::capabilities::ClientCapabilities;

/// Protocol version requested in the handshake
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Method names used by the client
pub mod methods {
    /// Handshake call
    pub const INITIALIZE: &str = "initialize";
    /// Notification sent once the handshake response arrives
    pub const INITIALIZED: &str = "notifications/initialized";
    /// Tool listing call
    pub const TOOLS_LIST: &str = "tools/list";
    /// Tool invocation call
    pub const TOOLS_CALL: &str = "tools/call";
}

/// Client identity sent in the handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client name
    pub name: String,
    /// Client version
    pub version: String,
}

impl ClientInfo {
    /// Create a client identity
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), crate::VERSION)
    }
}

/// Parameters of the `initialize` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Requested protocol version
    pub protocol_version: String,
    /// Declared client capabilities
    pub capabilities: ClientCapabilities,
    /// Client identity
    pub client_info: ClientInfo,
}

impl InitializeParams {
    /// Handshake parameters for the current protocol version
    #[must_use]
    pub fn new(client_info: ClientInfo, capabilities: ClientCapabilities) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities,
            client_info,
        }
    }
}

/// Server identity returned by the handshake
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    #[serde(default)]
    pub name: String,
    /// Server version
    #[serde(default)]
    pub version: String,
}

/// Result of the `initialize` call
///
/// Every field is optional on the wire; servers vary in what they report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Protocol version the server agreed to
    #[serde(default)]
    pub protocol_version: String,
    /// Server capabilities, kept verbatim
    #[serde(default)]
    pub capabilities: serde_json::Value,
    /// Server identity
    #[serde(default)]
    pub server_info: ServerInfo,
    /// Free-form usage instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initialize_params_match_wire_shape() {
        let params = InitializeParams::new(
            ClientInfo::new("mcp-inspector", "0.8.1"),
            ClientCapabilities::standard(),
        );
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {"sampling": {}, "roots": {"listChanged": true}},
                "clientInfo": {"name": "mcp-inspector", "version": "0.8.1"}
            })
        );
    }

    #[test]
    fn initialize_result_tolerates_sparse_reply() {
        let result: InitializeResult =
            serde_json::from_value(json!({"serverInfo": {"name": "my mcp"}})).unwrap();
        assert_eq!(result.server_info.name, "my mcp");
        assert!(result.protocol_version.is_empty());
    }
}
