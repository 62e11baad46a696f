//! Type definitions for the client
//!
//! - [`identifiers`] - Type-safe ID wrappers (`RequestId`, `ToolName`, `SessionId`)
//! - [`tool`] - Tool descriptors returned by `tools/list`
//! - [`options`] - Session configuration

pub mod identifiers;
pub mod options;
pub mod tool;

// Re-export commonly used types
pub use identifiers::{RequestId, SessionId, ToolName};
pub use options::{SessionOptions, SessionOptionsBuilder};
pub use tool::{ParameterSpec, ToolDescriptor};
