//! Subprocess transport implementation

use std::time::Duration;

use serde::Serialize;
use tokio::process::{Child, ChildStdin, ChildStdout};

use crate::Transport;
use crate::error::{McpClientError, Result};
use crate::transport::FramedTransport;
use crate::types::options::SessionOptions;

/// Transport that owns a server subprocess and its stdio pipes
pub struct SubprocessTransport {
    pub(super) command: String,
    pub(super) process: Option<Child>,
    pub(super) framed: FramedTransport<ChildStdout, ChildStdin>,
}

impl SubprocessTransport {
    /// Spawn `command` with `args`, using default options for everything else
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns `McpClientError::Spawn` if the executable cannot be launched
    pub fn spawn<I, S>(command: impl Into<std::path::PathBuf>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = SessionOptions::builder(command).args(args).build();
        Self::spawn_with(&options)
    }

    /// Spawn the server described by `options`
    ///
    /// # Errors
    /// Returns `McpClientError::Spawn` if the executable cannot be launched
    pub fn spawn_with(options: &SessionOptions) -> Result<Self> {
        Self::spawn_impl(options)
    }

    /// OS process id, while the child is owned by this transport
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().and_then(Child::id)
    }

    /// Display form of the spawned command
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Transport for SubprocessTransport {
    async fn write_frame<M>(&mut self, message: &M) -> Result<()>
    where
        M: Serialize + Sync,
    {
        if self.process.is_none() {
            return Err(McpClientError::write("transport has been terminated"));
        }
        self.framed.write_frame(message).await
    }

    async fn read_frame(&mut self, timeout: Duration) -> Result<serde_json::Value> {
        if self.process.is_none() {
            return Err(McpClientError::disconnected("transport has been terminated"));
        }
        self.framed.read_frame(timeout).await
    }

    fn is_ready(&self) -> bool {
        self.process.is_some() && self.framed.is_ready()
    }

    fn terminate(&mut self) -> Result<()> {
        self.terminate_impl()
    }
}

impl Drop for SubprocessTransport {
    fn drop(&mut self) {
        self.drop_impl();
    }
}
