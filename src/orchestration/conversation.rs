//! Conversation history

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of messages kept in a log
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model
    System,
    /// End user
    User,
    /// Model reply
    Assistant,
    /// Tool output fed back to the model
    Tool,
}

/// One entry in a [`ConversationLog`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Author
    pub role: Role,
    /// Text content
    pub content: String,
    /// When the message was appended
    pub at: DateTime<Utc>,
}

/// Bounded, ordered, append-only log of conversation messages
///
/// Once `capacity` is reached the oldest non-system message is evicted. The
/// log is an ordinary value; pass it by reference to whatever processes a turn.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    messages: VecDeque<ConversationMessage>,
    capacity: usize,
}

impl ConversationLog {
    /// Create a log that keeps at most `capacity` messages
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message, evicting the oldest one if the log is full
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> &ConversationMessage {
        if self.messages.len() >= self.capacity {
            let victim = self
                .messages
                .iter()
                .position(|m| m.role != Role::System)
                .unwrap_or(0);
            self.messages.remove(victim);
        }

        self.messages.push_back(ConversationMessage {
            role,
            content: content.into(),
            at: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Messages from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.messages.iter()
    }

    /// Most recent message
    #[must_use]
    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.back()
    }

    /// Number of messages held
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Maximum number of messages held
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// `{role, content}` objects in the shape chat-completion APIs expect
    ///
    /// Tool output is sent with the `system` role.
    #[must_use]
    pub fn to_chat_messages(&self) -> Vec<serde_json::Value> {
        self.messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    Role::System | Role::Tool => "system",
                };
                serde_json::json!({"role": role, "content": m.content})
            })
            .collect()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut log = ConversationLog::default();
        log.push(Role::User, "what's the weather?");
        log.push(Role::Assistant, "I'll use the get_weather tool to help with this.");

        let roles: Vec<Role> = log.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[test]
    fn evicts_oldest_non_system_message() {
        let mut log = ConversationLog::new(3);
        log.push(Role::System, "rules");
        log.push(Role::User, "one");
        log.push(Role::Assistant, "two");
        log.push(Role::User, "three");

        let contents: Vec<&str> = log.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["rules", "two", "three"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn all_system_log_evicts_front() {
        let mut log = ConversationLog::new(2);
        log.push(Role::System, "a");
        log.push(Role::System, "b");
        log.push(Role::System, "c");

        let contents: Vec<&str> = log.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["b", "c"]);
    }

    #[test]
    fn chat_messages_map_tool_to_system() {
        let mut log = ConversationLog::default();
        log.push(Role::Tool, "Tool result: sunny");

        assert_eq!(
            log.to_chat_messages(),
            vec![serde_json::json!({"role": "system", "content": "Tool result: sunny"})]
        );
    }
}
