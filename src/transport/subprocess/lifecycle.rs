//! Lifecycle management for the subprocess transport (spawn, terminate)

use crate::error::{McpClientError, Result};
use crate::transport::FramedTransport;
use crate::types::options::SessionOptions;

use super::command::{CommandBuilder, resolve_program};
use super::transport::SubprocessTransport;

impl SubprocessTransport {
    /// Spawn the server process and wire up its stdio pipes
    ///
    /// # Errors
    /// Returns `McpClientError::Spawn` if the process cannot be started or its
    /// pipes cannot be obtained
    pub(super) fn spawn_impl(options: &SessionOptions) -> Result<Self> {
        options.validate()?;

        let program = resolve_program(&options.command)?;
        let mut cmd = CommandBuilder::new(&program, options).build();

        let display = std::iter::once(program.display().to_string())
            .chain(options.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        let mut child = cmd.spawn().map_err(|e| {
            if let Some(ref cwd) = options.cwd
                && !cwd.exists()
            {
                return McpClientError::spawn(format!(
                    "Working directory does not exist: {}",
                    cwd.display()
                ));
            }
            McpClientError::spawn(format!("{display}: {e}"))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| McpClientError::spawn("Failed to get stdin handle"))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| McpClientError::spawn("Failed to get stdout handle"))?;

        log::info!("Spawned server `{display}` (pid {:?})", child.id());

        Ok(Self {
            command: display,
            process: Some(child),
            framed: FramedTransport::with_max_line_bytes(stdout, stdin, options.max_line_bytes),
        })
    }

    /// Signal the child to stop and release the pipes
    ///
    /// Safe to call repeatedly; only the first call sends a signal.
    ///
    /// # Errors
    /// Returns `McpClientError::Io` if the kill signal could not be delivered
    /// to a process that is still running
    pub(super) fn terminate_impl(&mut self) -> Result<()> {
        // Closing stdin first lets well-behaved servers exit on their own
        self.framed.close_input();

        let Some(mut child) = self.process.take() else {
            return Ok(());
        };

        if let Ok(Some(status)) = child.try_wait() {
            log::debug!("Server `{}` already exited: {status}", self.command);
            return Ok(());
        }

        match child.start_kill() {
            Ok(()) => {
                log::info!("Sent termination signal to server `{}`", self.command);
                Ok(())
            }
            // Exited between try_wait and start_kill
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(McpClientError::Io(e)),
        }
    }

    /// Handle Drop cleanup
    pub(super) fn drop_impl(&mut self) {
        self.framed.close_input();

        if let Some(mut child) = self.process.take() {
            // Best effort; kill_on_drop covers the case where this fails
            let _ = child.start_kill();
        }
    }
}
