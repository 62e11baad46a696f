//! JSON-RPC envelope types
//!
//! This module defines the request and response envelopes exchanged with the
//! server, one per line on its stdio pipes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{McpClientError, Result};
use crate::types::identifiers::RequestId;

/// JSON-RPC version string carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

fn default_jsonrpc() -> String {
    JSONRPC_VERSION.to_string()
}

// A present-but-null `result` is still a result
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Outbound request or notification
///
/// A request with an `id` is a call and expects exactly one correlated
/// response; a request without one is a notification and expects nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always `"2.0"`
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,
    /// Request id, absent for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build a call that expects a response
    pub fn call(id: RequestId, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id: Some(id),
            method: method.into(),
            params: Some(params),
        }
    }

    /// Build a fire-and-forget notification
    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id: None,
            method: method.into(),
            params,
        }
    }

    /// Whether this is a notification (no id, no response expected)
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC error object, kept exactly as the server sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Optional server-defined payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Inbound response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version reported by the server
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,
    /// Id of the request this answers; `null` for some error responses
    #[serde(default)]
    pub id: Option<RequestId>,
    /// Success payload
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Build a success response
    #[must_use]
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response
    #[must_use]
    pub fn failure(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Parse a decoded frame into a response envelope
    ///
    /// # Errors
    /// Returns `McpClientError::Protocol` if the frame is not a response object
    pub fn from_frame(frame: Value) -> Result<Self> {
        serde_json::from_value(frame)
            .map_err(|e| McpClientError::protocol(format!("Malformed response: {e}")))
    }

    /// Split the envelope into its payload or the server's error
    ///
    /// # Errors
    /// Returns `McpClientError::Server` for an error response, and
    /// `McpClientError::Protocol` if the envelope carries both or neither of
    /// `result` and `error`
    pub fn into_result(self) -> Result<Value> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => Err(McpClientError::Server(error)),
            (Some(_), Some(_)) => Err(McpClientError::protocol(
                "Response carries both result and error",
            )),
            (None, None) => Err(McpClientError::protocol(
                "Response carries neither result nor error",
            )),
        }
    }
}

/// Whether a decoded frame was initiated by the server
///
/// Anything carrying a `method` is a server notification or a server-to-client
/// request (`ping`, `roots/list`, ...), never a response, whatever its `id`.
#[must_use]
pub fn is_server_message(frame: &Value) -> bool {
    frame.get("method").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_omits_id_and_params() {
        let request = JsonRpcRequest::notification("notifications/initialized", None);
        let line = serde_json::to_string(&request).unwrap();
        assert_eq!(
            line,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#
        );
        assert!(request.is_notification());
    }

    #[test]
    fn call_serializes_id_before_method() {
        let request = JsonRpcRequest::call(RequestId::new(3), "tools/list", json!({}));
        let line = serde_json::to_string(&request).unwrap();
        assert_eq!(line, r#"{"jsonrpc":"2.0","id":3,"method":"tools/list","params":{}}"#);
    }

    #[test]
    fn null_result_is_still_a_result() {
        let response = JsonRpcResponse::from_frame(json!({"jsonrpc": "2.0", "id": 1, "result": null}))
            .unwrap();
        assert_eq!(response.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn error_response_surfaces_payload() {
        let response = JsonRpcResponse::from_frame(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {"code": -32601, "message": "Unknown tool", "data": {"tool": "nope"}}
        }))
        .unwrap();

        match response.into_result() {
            Err(McpClientError::Server(error)) => {
                assert_eq!(error.code, -32601);
                assert_eq!(error.data, Some(json!({"tool": "nope"})));
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn empty_response_is_protocol_error() {
        let response = JsonRpcResponse::from_frame(json!({"id": 1})).unwrap();
        assert!(matches!(response.into_result(), Err(McpClientError::Protocol(_))));
    }

    #[test]
    fn detects_server_messages() {
        assert!(is_server_message(&json!({"jsonrpc": "2.0", "method": "notifications/message"})));
        assert!(is_server_message(&json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})));
        assert!(!is_server_message(&json!({"jsonrpc": "2.0", "id": 1, "result": {}})));
    }

    #[test]
    fn envelopes_survive_serialization() {
        let requests = [
            JsonRpcRequest::call(RequestId::new(5), "tools/call", json!({"name": "x", "arguments": {}})),
            JsonRpcRequest::notification("notifications/initialized", None),
            JsonRpcRequest::notification("notifications/progress", Some(json!({"progress": 1}))),
        ];
        for request in requests {
            let line = serde_json::to_string(&request).unwrap();
            let parsed: JsonRpcRequest = serde_json::from_str(&line).unwrap();
            assert_eq!(parsed, request);
        }

        let responses = [
            JsonRpcResponse::success(RequestId::new(1), json!({"tools": []})),
            JsonRpcResponse::success(RequestId::new(2), Value::Null),
            JsonRpcResponse::failure(
                Some(RequestId::new(3)),
                JsonRpcError {
                    code: -32601,
                    message: "Unknown tool".to_string(),
                    data: Some(json!({"tool": "nope"})),
                },
            ),
            JsonRpcResponse::failure(
                None,
                JsonRpcError {
                    code: -32700,
                    message: "Parse error".to_string(),
                    data: None,
                },
            ),
        ];
        for response in responses {
            let line = serde_json::to_string(&response).unwrap();
            let parsed: JsonRpcResponse = serde_json::from_str(&line).unwrap();
            assert_eq!(parsed, response);
        }
    }
}
