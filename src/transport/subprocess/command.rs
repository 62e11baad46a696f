//! Command building logic for the subprocess transport

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::error::{McpClientError, Result};
use crate::types::options::SessionOptions;

use super::config::DANGEROUS_ENV_VARS;

/// Resolve the executable to launch
///
/// Anything that looks like a path is used as given; a bare name is looked up
/// on `PATH` so a missing server is reported by name.
///
/// # Errors
/// Returns `McpClientError::Spawn` if a bare name is not found on `PATH`
pub fn resolve_program(command: &Path) -> Result<PathBuf> {
    if command.components().count() > 1 || command.is_absolute() {
        return Ok(command.to_path_buf());
    }

    which::which(command).map_err(|e| {
        McpClientError::spawn(format!("{}: not found on PATH ({e})", command.display()))
    })
}

/// Command builder for the server process
pub struct CommandBuilder<'a> {
    program: &'a Path,
    options: &'a SessionOptions,
}

impl<'a> CommandBuilder<'a> {
    /// Create a new command builder
    pub fn new(program: &'a Path, options: &'a SessionOptions) -> Self {
        Self { program, options }
    }

    /// Build the command with arguments, environment and stdio wiring
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(&self.options.args);

        if let Some(ref cwd) = self.options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &self.options.env {
            if DANGEROUS_ENV_VARS.contains(&key.as_str()) {
                log::warn!("Not forwarding {key} to server process");
                continue;
            }
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_used_verbatim() {
        let path = Path::new("./bin/server");
        assert_eq!(resolve_program(path).unwrap(), PathBuf::from("./bin/server"));
    }

    #[test]
    fn missing_bare_name_is_spawn_error() {
        let result = resolve_program(Path::new("definitely-not-a-real-server-binary-1f3a"));
        assert!(matches!(result, Err(McpClientError::Spawn(_))));
    }

    #[test]
    fn dangerous_env_is_filtered() {
        let options = SessionOptions::builder("server")
            .env("LD_PRELOAD", "/tmp/evil.so")
            .env("API_KEY", "abc")
            .build();
        let program = PathBuf::from("server");
        let cmd = CommandBuilder::new(&program, &options).build();

        let envs: Vec<_> = cmd
            .as_std()
            .get_envs()
            .map(|(k, _)| k.to_string_lossy().into_owned())
            .collect();
        assert!(envs.contains(&"API_KEY".to_string()));
        assert!(!envs.contains(&"LD_PRELOAD".to_string()));
    }
}
