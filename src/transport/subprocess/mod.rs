//! Subprocess transport implementation
//!
//! This module provides a transport that spawns the tool server as a child
//! process and exchanges frames with it over stdin/stdout. The child's stderr
//! is inherited, so its diagnostics go straight to the client's terminal.

mod command;
pub mod config;
mod lifecycle;
mod transport;

// Re-export public types
pub use transport::SubprocessTransport;
