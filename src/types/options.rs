//! Session options and configuration
//!
//! This module contains the configuration for spawning a tool server and
//! talking to it, including a builder pattern for easy configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{McpClientError, Result};
use crate::protocol::{ClientCapabilities, ClientInfo};
use crate::transport::subprocess::config::{DEFAULT_MAX_LINE_BYTES, DEFAULT_RESPONSE_TIMEOUT};

// ============================================================================
// Session Options
// ============================================================================

/// Options for spawning a server and running a session against it
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Executable to launch (a path, or a bare name looked up on `PATH`)
    pub command: PathBuf,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Working directory for the server process
    pub cwd: Option<PathBuf>,
    /// Extra environment variables for the server process
    pub env: HashMap<String, String>,
    /// How long to wait for each response (default: 1000 ms)
    pub response_timeout: Duration,
    /// Maximum accepted length of one inbound line (default: 1 MiB)
    pub max_line_bytes: usize,
    /// Identity sent in the handshake
    pub client_info: ClientInfo,
    /// Capabilities declared in the handshake
    pub capabilities: ClientCapabilities,
}

impl SessionOptions {
    /// Options with defaults for everything but the command
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            cwd: None,
            env: HashMap::new(),
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            client_info: ClientInfo::default(),
            capabilities: ClientCapabilities::standard(),
        }
    }

    /// Create a new builder for `SessionOptions`
    pub fn builder(command: impl Into<PathBuf>) -> SessionOptionsBuilder {
        SessionOptionsBuilder {
            options: Self::new(command),
        }
    }

    /// Check the options before anything is spawned
    ///
    /// # Errors
    /// Returns `McpClientError::InvalidConfig` for an empty command, a zero
    /// timeout or a zero line limit
    pub fn validate(&self) -> Result<()> {
        if self.command.as_os_str().is_empty() {
            return Err(McpClientError::invalid_config("command must not be empty"));
        }
        if self.response_timeout.is_zero() {
            return Err(McpClientError::invalid_config(
                "response_timeout must be greater than zero",
            ));
        }
        if self.max_line_bytes == 0 {
            return Err(McpClientError::invalid_config(
                "max_line_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Builder for SessionOptions
// ============================================================================

/// Builder for `SessionOptions`
#[derive(Debug)]
pub struct SessionOptionsBuilder {
    options: SessionOptions,
}

impl SessionOptionsBuilder {
    /// Set all arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.options.args.push(arg.into());
        self
    }

    /// Set working directory
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.cwd = Some(path.into());
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.env.insert(key.into(), value.into());
        self
    }

    /// Set the per-response timeout
    #[must_use]
    pub const fn response_timeout(mut self, timeout: Duration) -> Self {
        self.options.response_timeout = timeout;
        self
    }

    /// Set the maximum inbound line length
    #[must_use]
    pub const fn max_line_bytes(mut self, max: usize) -> Self {
        self.options.max_line_bytes = max;
        self
    }

    /// Set the client identity
    #[must_use]
    pub fn client_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.options.client_info = ClientInfo::new(name, version);
        self
    }

    /// Set declared capabilities
    #[must_use]
    pub const fn capabilities(mut self, capabilities: ClientCapabilities) -> Self {
        self.options.capabilities = capabilities;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> SessionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let options = SessionOptions::builder("python").arg("server.py").build();
        assert_eq!(options.args, vec!["server.py".to_string()]);
        assert_eq!(options.response_timeout, Duration::from_millis(1000));
        assert_eq!(options.client_info.name, env!("CARGO_PKG_NAME"));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let options = SessionOptions::builder("python")
            .response_timeout(Duration::ZERO)
            .build();
        assert!(matches!(
            options.validate(),
            Err(McpClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(SessionOptions::new("").validate().is_err());
    }
}
