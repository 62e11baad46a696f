//! Request/response exchange and the typed tool calls

use serde_json::{Map, Value};

use crate::Transport;
use crate::error::{McpClientError, Result};
use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, ToolsCallParams, ToolsListResult, is_server_message,
    methods,
};
use crate::types::identifiers::{RequestId, ToolName};
use crate::types::tool::ToolDescriptor;

use super::{MAX_ABANDONED_IDS, Session};

impl<T: Transport> Session<T> {
    /// Send a call and wait for its correlated response
    ///
    /// The id counter advances even if the call fails, so ids are never
    /// reused.
    ///
    /// # Errors
    /// Returns `McpClientError::NotReady`/`Closed` outside the Ready state,
    /// and transport errors (`Write`, `Timeout`, `Decode`, `Disconnected`)
    /// unchanged
    pub async fn send_call(&mut self, method: &str, params: Value) -> Result<JsonRpcResponse> {
        self.ensure_ready()?;

        let id = self.next_id;
        self.next_id = id.next();
        self.exchange(id, method, params).await
    }

    /// Send a notification; nothing is read back
    ///
    /// # Errors
    /// Returns `McpClientError::NotReady`/`Closed` outside the Ready state,
    /// or `McpClientError::Write` if the frame cannot be written
    pub async fn send_notification(&mut self, method: &str, params: Option<Value>) -> Result<()> {
        self.ensure_ready()?;
        self.notify(method, params).await
    }

    /// List the server's tools, in the order the server reports them
    ///
    /// # Errors
    /// Returns `McpClientError::Protocol` if the reply has no `result.tools`
    /// or a descriptor is malformed, `McpClientError::Server` for an error
    /// reply, plus everything [`Session::send_call`] can return
    pub async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>> {
        let response = self.send_call(methods::TOOLS_LIST, Value::Object(Map::new())).await?;
        let result = response.into_result()?;

        let listing: ToolsListResult = serde_json::from_value(result).map_err(|e| {
            McpClientError::protocol(format!("tools/list reply lacks result.tools: {e}"))
        })?;

        log::debug!("[{}] Server lists {} tool(s)", self.id, listing.tools.len());
        Ok(listing.tools)
    }

    /// Invoke a tool and return its raw result payload
    ///
    /// `Null` arguments are sent as `{}`. The payload is opaque to the session;
    /// a server error (including an unknown tool) comes back as
    /// `McpClientError::Server` with the error object unchanged.
    ///
    /// # Errors
    /// Returns `McpClientError::InvalidArguments` if `arguments` is neither an
    /// object nor `Null`, plus everything [`Session::send_call`] can return
    pub async fn call_tool(
        &mut self,
        name: impl Into<ToolName>,
        arguments: Value,
    ) -> Result<Value> {
        self.ensure_ready()?;

        let arguments = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(McpClientError::invalid_arguments(format!(
                    "tool arguments must be a JSON object, got {other}"
                )));
            }
        };

        let params = ToolsCallParams {
            name: name.into(),
            arguments,
        };
        log::debug!("[{}] Calling tool {}", self.id, params.name);

        let params = serde_json::to_value(&params).map_err(|e| {
            McpClientError::invalid_arguments(format!("Failed to encode tool call: {e}"))
        })?;

        self.send_call(methods::TOOLS_CALL, params).await?.into_result()
    }

    /// Remember `id` as failed so a late reply to it is recognised
    ///
    /// Only the newest [`MAX_ABANDONED_IDS`] ids are kept; a reply to an older
    /// one is reported as a correlation failure.
    pub(super) fn abandon(&mut self, id: RequestId) {
        self.abandoned.insert(id);
        while self.abandoned.len() > MAX_ABANDONED_IDS {
            self.abandoned.pop_first();
        }
    }

    /// Write a notification without checking the state
    pub(super) async fn notify(&mut self, method: &str, params: Option<Value>) -> Result<()> {
        let request = JsonRpcRequest::notification(method, params);
        self.transport.write_frame(&request).await
    }

    /// Write one call and read frames until its response arrives
    ///
    /// The whole exchange shares one deadline. Server-initiated messages
    /// (notifications and requests) and late replies to abandoned calls are
    /// skipped; any other id is a correlation failure. If reading fails, `id`
    /// is remembered as abandoned so its reply can be recognised later.
    pub(super) async fn exchange(
        &mut self,
        id: RequestId,
        method: &str,
        params: Value,
    ) -> Result<JsonRpcResponse> {
        let request = JsonRpcRequest::call(id, method, params);
        self.last_id = Some(id);
        self.transport.write_frame(&request).await?;

        let deadline = tokio::time::Instant::now() + self.response_timeout;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            let frame = if remaining.is_zero() {
                Err(McpClientError::timeout(format!(
                    "no response to {method} (id {id}) within {} ms",
                    self.response_timeout.as_millis()
                )))
            } else {
                self.transport.read_frame(remaining).await
            };

            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    self.abandon(id);
                    return Err(e);
                }
            };

            if is_server_message(&frame) {
                match frame.get("id").filter(|v| !v.is_null()) {
                    Some(sid) => log::warn!(
                        "[{}] Ignoring server request {} (id {sid}) while waiting for id {id}",
                        self.id,
                        frame["method"]
                    ),
                    None => log::debug!(
                        "[{}] Skipping server notification while waiting for id {id}",
                        self.id
                    ),
                }
                continue;
            }

            let response = match JsonRpcResponse::from_frame(frame) {
                Ok(response) => response,
                Err(e) => {
                    self.abandon(id);
                    return Err(e);
                }
            };

            match response.id {
                Some(rid) if rid == id => return Ok(response),
                // A null id on an error reply can only refer to the call in flight
                None if response.error.is_some() => return Ok(response),
                Some(rid) if self.abandoned.remove(&rid) => {
                    log::warn!(
                        "[{}] Discarding late response to abandoned request {rid}",
                        self.id
                    );
                }
                actual => {
                    self.abandon(id);
                    return Err(McpClientError::Correlation {
                        expected: id,
                        actual,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FramedTransport;

    #[test]
    fn abandoned_ids_are_bounded() {
        let (client, _server) = tokio::io::duplex(1024);
        let (read, write) = tokio::io::split(client);
        let mut session = Session::new(FramedTransport::new(read, write));

        let total = MAX_ABANDONED_IDS as u64 + 10;
        for n in 1..=total {
            session.abandon(RequestId::new(n));
        }

        assert_eq!(session.abandoned.len(), MAX_ABANDONED_IDS);
        assert!(!session.abandoned.contains(&RequestId::new(10)));
        assert!(session.abandoned.contains(&RequestId::new(11)));
        assert!(session.abandoned.contains(&RequestId::new(total)));
    }
}
