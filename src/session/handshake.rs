//! The `initialize` handshake

use crate::Transport;
use crate::error::{McpClientError, Result};
use crate::protocol::{InitializeParams, InitializeResult, PROTOCOL_VERSION, methods};
use crate::types::identifiers::RequestId;

use super::{Session, SessionState};

impl<T: Transport> Session<T> {
    /// Perform the handshake: `initialize` (id 0), then `notifications/initialized`
    ///
    /// On success the session is Ready. On failure it stays in
    /// `Initializing`, the error is returned, and every later operation fails
    /// with `McpClientError::NotReady`.
    ///
    /// # Errors
    /// Returns `McpClientError::NotReady` if the handshake was already
    /// attempted, `McpClientError::Closed` after termination, and otherwise
    /// the error that stopped the handshake
    pub async fn initialize(&mut self) -> Result<&InitializeResult> {
        match self.state {
            SessionState::Uninitialized => {}
            SessionState::Closed => return Err(McpClientError::Closed),
            SessionState::Initializing | SessionState::Ready => {
                return Err(McpClientError::not_ready(format!(
                    "handshake already attempted (session is {})",
                    self.state
                )));
            }
        }

        self.state = SessionState::Initializing;
        log::debug!("[{}] Sending initialize as {}", self.id, self.client_info.name);

        let params = InitializeParams::new(self.client_info.clone(), self.capabilities);
        let params = serde_json::to_value(&params)
            .map_err(|e| McpClientError::protocol(format!("Failed to encode initialize: {e}")))?;

        let response = self
            .exchange(RequestId::HANDSHAKE, methods::INITIALIZE, params)
            .await?;
        let result = response.into_result()?;

        let result: InitializeResult = serde_json::from_value(result).map_err(|e| {
            McpClientError::protocol(format!("Malformed initialize result: {e}"))
        })?;

        if !result.protocol_version.is_empty() && result.protocol_version != PROTOCOL_VERSION {
            log::warn!(
                "[{}] Server answered with protocol version {} (requested {PROTOCOL_VERSION})",
                self.id,
                result.protocol_version
            );
        }

        self.notify(methods::INITIALIZED, None).await?;

        log::info!(
            "[{}] Session ready: server {} {}",
            self.id,
            result.server_info.name,
            result.server_info.version
        );
        self.state = SessionState::Ready;
        Ok(&*self.server.insert(result))
    }
}
