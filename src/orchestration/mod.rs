//! Helpers for an orchestrator that lets a language model pick tools
//!
//! None of these talk to a model; they cover the pieces around the model
//! call:
//! - [`ConversationLog`] - bounded, ordered log of role-tagged messages
//! - [`render_tool_catalog`] / [`tool_selection_prompt`] - describe the
//!   server's tools as prompt text
//! - [`extract_tool_call`] - pull a fenced `json` tool-call block out of a reply

mod catalog;
mod conversation;
mod tool_call;

pub use catalog::{render_tool_catalog, tool_selection_prompt};
pub use conversation::{ConversationLog, ConversationMessage, DEFAULT_HISTORY_CAPACITY, Role};
pub use tool_call::{ToolCallRequest, extract_tool_call};
