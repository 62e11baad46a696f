//! Error types for the stdio JSON-RPC client

use thiserror::Error;

use crate::protocol::JsonRpcError;
use crate::types::identifiers::RequestId;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum McpClientError {
    /// Subprocess could not be launched
    #[error("Failed to spawn server process: {0}")]
    Spawn(String),

    /// Writing a frame to the server's stdin failed
    #[error("Write error: {0}")]
    Write(String),

    /// No frame arrived within the response timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// A line from the server was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// The server closed its output stream
    #[error("Server disconnected: {0}")]
    Disconnected(String),

    /// Well-formed JSON that is missing expected fields
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Response id does not belong to the outstanding request
    #[error("Response id {actual:?} does not match request id {expected}")]
    Correlation {
        /// Id of the request that was sent
        expected: RequestId,
        /// Id carried by the response, if any
        actual: Option<RequestId>,
    },

    /// The server answered with a JSON-RPC error object
    #[error("Server error {}: {}", .0.code, .0.message)]
    Server(JsonRpcError),

    /// Operation attempted before the handshake completed
    #[error("Session not ready: {0}")]
    NotReady(String),

    /// Operation attempted after the session was terminated
    #[error("Session is closed")]
    Closed,

    /// Arguments rejected before anything was sent
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, McpClientError>;

impl McpClientError {
    /// Create a spawn error
    pub fn spawn(msg: impl Into<String>) -> Self {
        Self::Spawn(msg.into())
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a disconnected error
    pub fn disconnected(msg: impl Into<String>) -> Self {
        Self::Disconnected(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a not-ready error
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the session is still usable after this error
    ///
    /// Timeouts and malformed lines leave the session in `Ready`; the caller
    /// may retry or report a tool failure. Everything else means the session
    /// (or the call) cannot proceed as-is.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Decode(_) | Self::Server(_))
    }
}
