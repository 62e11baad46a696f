//! Line-framed transport over an arbitrary byte pipe

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::Transport;
use crate::error::{McpClientError, Result};

use super::codec::{FrameCodec, InboundLine};

/// Transport that exchanges newline-delimited JSON over a reader/writer pair
///
/// The subprocess transport wraps one of these around a child's stdout and
/// stdin; tests drive one over in-memory pipes.
pub struct FramedTransport<R, W> {
    reader: FramedRead<R, FrameCodec>,
    writer: Option<FramedWrite<W, FrameCodec>>,
    eof: bool,
}

impl<R, W> FramedTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Create a transport with the default line limit
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_codec(reader, writer, FrameCodec::new())
    }

    /// Create a transport with a custom inbound line limit
    pub fn with_max_line_bytes(reader: R, writer: W, max_line_bytes: usize) -> Self {
        Self::with_codec(reader, writer, FrameCodec::with_max_line_bytes(max_line_bytes))
    }

    fn with_codec(reader: R, writer: W, codec: FrameCodec) -> Self {
        let max_line_bytes = codec.max_line_bytes();
        Self {
            reader: FramedRead::new(reader, codec),
            writer: Some(FramedWrite::new(
                writer,
                FrameCodec::with_max_line_bytes(max_line_bytes),
            )),
            eof: false,
        }
    }

    /// Drop the write half, closing the peer's input
    pub fn close_input(&mut self) {
        self.writer = None;
    }

    async fn write_impl<M>(&mut self, message: &M) -> Result<()>
    where
        M: Serialize + Sync,
    {
        let line = serde_json::to_string(message)
            .map_err(|e| McpClientError::write(format!("Failed to serialize frame: {e}")))?;

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| McpClientError::write("input stream is closed"))?;

        log::debug!("--> {line}");

        // `send` flushes, so the whole line reaches the pipe in one go
        writer
            .send(line)
            .await
            .map_err(|e| McpClientError::write(format!("Failed to write frame: {e}")))
    }

    async fn read_impl(&mut self, timeout: Duration) -> Result<serde_json::Value> {
        if self.eof {
            return Err(McpClientError::disconnected("output stream already ended"));
        }

        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            match tokio::time::timeout_at(deadline, self.reader.next()).await {
                Ok(Some(Ok(InboundLine::Text(line)))) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    log::debug!("<-- {line}");
                    return serde_json::from_str(line).map_err(|e| {
                        log::warn!("Dropping invalid JSON frame ({e}): {line}");
                        McpClientError::decode(format!("Invalid JSON frame ({e}): {line}"))
                    });
                }
                Ok(Some(Ok(InboundLine::Rejected(reason)))) => {
                    log::warn!("Dropping inbound line: {reason}");
                    return Err(McpClientError::decode(reason));
                }
                Ok(Some(Err(e))) => return Err(e),
                Ok(None) => {
                    self.eof = true;
                    return Err(McpClientError::disconnected("output stream closed"));
                }
                Err(_) => {
                    return Err(McpClientError::timeout(format!(
                        "no frame received within {} ms",
                        timeout.as_millis()
                    )));
                }
            }
        }
    }
}

impl<R, W> Transport for FramedTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn write_frame<M>(&mut self, message: &M) -> Result<()>
    where
        M: Serialize + Sync,
    {
        self.write_impl(message).await
    }

    async fn read_frame(&mut self, timeout: Duration) -> Result<serde_json::Value> {
        self.read_impl(timeout).await
    }

    fn is_ready(&self) -> bool {
        self.writer.is_some() && !self.eof
    }

    fn terminate(&mut self) -> Result<()> {
        self.close_input();
        Ok(())
    }
}
