//! Protocol session over a transport
//!
//! This module provides [`Session`], which runs the JSON-RPC exchange with a
//! tool server:
//! - The `initialize` handshake (id 0) and `notifications/initialized`
//! - Client-side request ids, strictly increasing from 1
//! - Response correlation by id, with late replies to timed-out calls dropped
//! - Typed `tools/list` and `tools/call` wrappers
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──initialize()──▶ Initializing ──ok──▶ Ready ──terminate()──▶ Closed
//!                                      │
//!                                      └──handshake failed: stays here, every
//!                                         operation fails with NotReady
//! ```
//!
//! Exactly one request is outstanding at a time. Operations take `&mut self`,
//! so callers are serialised by the borrow checker; use [`SharedSession`] to
//! share one session between tasks.
//!
//! # Example
//!
//! ```no_run
//! use mcp_stdio_client::{Session, SessionOptions};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = SessionOptions::builder("python").arg("server.py").build();
//! let mut session = Session::connect(options).await?;
//!
//! for tool in session.list_tools().await? {
//!     log::info!("{}: {}", tool.name, tool.description);
//! }
//!
//! let weather = session.call_tool("get_weather", json!({"city": "Beijing"})).await;
//! session.terminate()?;
//! log::info!("{:?}", weather?);
//! # Ok(())
//! # }
//! ```

mod calls;
mod handshake;
mod shared;

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use crate::Transport;
use crate::error::{McpClientError, Result};
use crate::protocol::{ClientCapabilities, ClientInfo, InitializeResult};
use crate::transport::SubprocessTransport;
use crate::transport::subprocess::config::DEFAULT_RESPONSE_TIMEOUT;
use crate::types::identifiers::{RequestId, SessionId};
use crate::types::options::SessionOptions;

pub use shared::SharedSession;

/// Number of failed request ids remembered for discarding late replies
pub const MAX_ABANDONED_IDS: usize = 64;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Transport exists, handshake not attempted
    Uninitialized,
    /// Handshake in progress, or failed
    Initializing,
    /// Handshake done; calls are accepted
    Ready,
    /// Terminated by the caller
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// JSON-RPC session with a tool server
pub struct Session<T: Transport = SubprocessTransport> {
    /// Log context
    id: SessionId,
    /// Frame transport, exclusively owned
    transport: T,
    /// Lifecycle state
    state: SessionState,
    /// Id for the next call
    next_id: RequestId,
    /// Id of the most recent call
    last_id: Option<RequestId>,
    /// Calls that failed before their response arrived
    abandoned: BTreeSet<RequestId>,
    /// Per-response timeout
    response_timeout: Duration,
    /// Identity sent in the handshake
    client_info: ClientInfo,
    /// Capabilities declared in the handshake
    capabilities: ClientCapabilities,
    /// Server's handshake reply
    server: Option<InitializeResult>,
}

impl Session<SubprocessTransport> {
    /// Spawn the server and complete the handshake
    ///
    /// The server process is terminated again if the handshake fails.
    ///
    /// # Errors
    /// Returns `McpClientError::Spawn` if the server cannot be launched, or the
    /// handshake's timeout, decode, server or protocol error
    pub async fn connect(options: SessionOptions) -> Result<Self> {
        let transport = SubprocessTransport::spawn_with(&options)?;
        let mut session = Self::new(transport)
            .with_response_timeout(options.response_timeout)
            .with_client_info(options.client_info)
            .with_capabilities(options.capabilities);

        if let Err(e) = session.initialize().await {
            log::warn!("[{}] Handshake failed: {e}", session.id);
            if let Err(term) = session.terminate() {
                log::warn!("[{}] Failed to terminate server: {term}", session.id);
            }
            return Err(e);
        }

        Ok(session)
    }
}

impl<T: Transport> Session<T> {
    /// Wrap a transport; the handshake is not sent yet
    pub fn new(transport: T) -> Self {
        Self {
            id: SessionId::generate(),
            transport,
            state: SessionState::Uninitialized,
            next_id: RequestId::HANDSHAKE.next(),
            last_id: None,
            abandoned: BTreeSet::new(),
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            client_info: ClientInfo::default(),
            capabilities: ClientCapabilities::standard(),
            server: None,
        }
    }

    /// Set the per-response timeout
    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Set the identity sent in the handshake
    #[must_use]
    pub fn with_client_info(mut self, client_info: ClientInfo) -> Self {
        self.client_info = client_info;
        self
    }

    /// Set the capabilities declared in the handshake
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: ClientCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Session id used in log lines
    #[must_use]
    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether calls are accepted
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// Id of the most recently sent call, including the handshake
    #[must_use]
    pub const fn last_request_id(&self) -> Option<RequestId> {
        self.last_id
    }

    /// Server's handshake reply, once Ready
    #[must_use]
    pub const fn server_info(&self) -> Option<&InitializeResult> {
        self.server.as_ref()
    }

    /// Per-response timeout
    #[must_use]
    pub const fn response_timeout(&self) -> Duration {
        self.response_timeout
    }

    /// Borrow the transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Stop the server and close the session
    ///
    /// Idempotent: later calls return `Ok(())` without doing anything.
    ///
    /// # Errors
    /// Returns error if the transport could not signal the server
    pub fn terminate(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        log::info!("[{}] Terminating session ({})", self.id, self.state);
        self.state = SessionState::Closed;
        self.transport.terminate()
    }

    /// Fail unless the session is Ready
    pub(crate) fn ensure_ready(&self) -> Result<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::Closed => Err(McpClientError::Closed),
            SessionState::Uninitialized => Err(McpClientError::not_ready(
                "handshake has not been performed",
            )),
            SessionState::Initializing => Err(McpClientError::not_ready(
                "handshake did not complete",
            )),
        }
    }
}
