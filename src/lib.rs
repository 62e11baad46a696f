//! # Stdio JSON-RPC tool client
//!
//! A client for tool servers that run as a subprocess and speak line-delimited
//! JSON-RPC over their stdin/stdout (the Model Context Protocol stdio
//! transport). The client spawns the server, performs the `initialize`
//! handshake, and exposes `tools/list` and `tools/call` as typed async calls.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_stdio_client::{Session, SessionOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = SessionOptions::builder("python")
//!         .arg("server.py")
//!         .build();
//!
//!     let mut session = Session::connect(options).await?;
//!
//!     let tools = session.list_tools().await?;
//!     log::info!("server exposes {} tools", tools.len());
//!
//!     let result = session
//!         .call_tool("get_weather", json!({"city": "Beijing"}))
//!         .await;
//!
//!     session.terminate()?;
//!     log::info!("weather: {:?}", result?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`transport`]: subprocess ownership and newline framing
//! - [`session`]: handshake, request ids, correlation, typed tool calls
//! - [`protocol`]: JSON-RPC envelopes and handshake payloads
//! - [`types`]: identifiers, tool descriptors, options
//! - [`orchestration`]: conversation log and prompt helpers for a model-driven caller
//! - [`error`]: error types
//!
//! Exactly one request is in flight at a time. Each response is matched to
//! its request by id; a reply that arrives after its call timed out is
//! dropped instead of being handed to the next call.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, McpClientError>`](Result):
//!
//! ```no_run
//! # use mcp_stdio_client::{McpClientError, Session, SessionOptions};
//! # async fn example() {
//! match Session::connect(SessionOptions::new("./server")).await {
//!     Ok(session) => { /* ... */ }
//!     Err(McpClientError::Spawn(msg)) => {
//!         log::error!("server could not start: {}", msg);
//!     }
//!     Err(e) => {
//!         log::error!("handshake failed: {}", e);
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod orchestration;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod types;

// Re-export commonly used types for external API
pub use error::{McpClientError, Result};
pub use session::{Session, SessionState, SharedSession};
pub use transport::{FramedTransport, SubprocessTransport, Transport};

pub use types::identifiers::{RequestId, SessionId, ToolName};
pub use types::options::{SessionOptions, SessionOptionsBuilder};
pub use types::tool::{ParameterSpec, ToolDescriptor};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
