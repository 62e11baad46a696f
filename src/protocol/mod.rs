//! JSON-RPC protocol types
//!
//! This module provides the envelopes and payloads exchanged with a tool
//! server over its stdio pipes.
//!
//! # Overview
//!
//! Every message is a single line of JSON:
//! - Calls carry an `id` and receive exactly one response with the same `id`
//! - Notifications carry no `id` and receive nothing
//! - The session opens with an `initialize` call (id 0) followed by the
//!   `notifications/initialized` notification
//!
//! # Example: Building the handshake
//!
//! ```rust
//! use mcp_stdio_client::protocol::{
//!     ClientCapabilities, ClientInfo, InitializeParams, JsonRpcRequest, methods,
//! };
//! use mcp_stdio_client::RequestId;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = InitializeParams::new(ClientInfo::default(), ClientCapabilities::standard());
//! let request = JsonRpcRequest::call(
//!     RequestId::HANDSHAKE,
//!     methods::INITIALIZE,
//!     serde_json::to_value(params)?,
//! );
//!
//! let line = serde_json::to_string(&request)?;
//! assert!(line.starts_with(r#"{"jsonrpc":"2.0","id":0,"method":"initialize""#));
//! # Ok(())
//! # }
//! ```

mod capabilities;
mod initialize;
mod messages;
mod tools;

// Re-export public types
pub use capabilities::ClientCapabilities;
pub use initialize::{
    ClientInfo, InitializeParams, InitializeResult, PROTOCOL_VERSION, ServerInfo, methods,
};
pub use messages::{
    JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse, is_server_message,
};
pub use tools::{ToolsCallParams, ToolsListResult};
