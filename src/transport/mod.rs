//! Transport layer for talking to a tool server
//!
//! This module provides the transport abstraction and its implementations:
//! a line-framed transport over any async byte pipe, and a subprocess
//! transport that owns the server process and its stdio pipes.

pub mod codec;
pub mod framed;
pub mod subprocess;

use std::time::Duration;

use serde::Serialize;

use crate::error::Result;

/// Transport trait for exchanging JSON frames with a server
///
/// A frame is one JSON value serialized on a single line and terminated by
/// `\n`. Implementations are driven by exactly one caller at a time.
pub trait Transport: Send {
    /// Write one frame and flush it
    ///
    /// # Errors
    /// Returns `McpClientError::Write` if the pipe is closed or the transport
    /// has been terminated
    fn write_frame<M>(&mut self, message: &M) -> impl std::future::Future<Output = Result<()>> + Send
    where
        M: Serialize + Sync;

    /// Read the next frame, waiting at most `timeout`
    ///
    /// # Errors
    /// Returns `McpClientError::Timeout` if no line arrives in time,
    /// `McpClientError::Decode` if the line is not valid JSON and
    /// `McpClientError::Disconnected` at end of stream
    fn read_frame(
        &mut self,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<serde_json::Value>> + Send;

    /// Check if the transport can still carry frames
    fn is_ready(&self) -> bool;

    /// Stop the peer and release the pipes
    ///
    /// Idempotent; does not wait for the peer to exit.
    ///
    /// # Errors
    /// Returns error if the termination signal could not be sent
    fn terminate(&mut self) -> Result<()>;
}

pub use codec::{FrameCodec, InboundLine};
pub use framed::FramedTransport;
pub use subprocess::SubprocessTransport;
