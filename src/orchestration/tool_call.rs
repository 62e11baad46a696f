//! Tool-call extraction from model replies

use serde::Deserialize;
use serde_json::Value;

use crate::types::identifiers::ToolName;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Tool invocation requested by a model reply
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCallRequest {
    /// Tool to call
    pub tool: ToolName,
    /// Arguments, `{}` when the reply gives none
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Find a fenced ```` ```json {"tool": .., "args": ..} ``` ```` block in `reply`
///
/// Returns `None` when the reply has no such block, or the block does not
/// parse as a tool call; the reply is then meant for the user as-is.
#[must_use]
pub fn extract_tool_call(reply: &str) -> Option<ToolCallRequest> {
    let start = reply.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let body = &reply[start..];
    let body = body.find(FENCE_CLOSE).map_or(body, |end| &body[..end]);

    match serde_json::from_str::<ToolCallRequest>(body.trim()) {
        Ok(call) if call.args.is_object() || call.args.is_null() => Some(ToolCallRequest {
            args: if call.args.is_null() { empty_args() } else { call.args },
            ..call
        }),
        Ok(call) => {
            log::debug!("Ignoring tool call with non-object args: {:?}", call.args);
            None
        }
        Err(e) => {
            log::debug!("Fenced block is not a tool call: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_fenced_call() {
        let reply = "Let me check.\n```json\n{\"tool\": \"get_weather\", \"args\": {\"city\": \"Beijing\"}}\n```\nOne moment.";
        let call = extract_tool_call(reply).unwrap();
        assert_eq!(call.tool.as_str(), "get_weather");
        assert_eq!(call.args, json!({"city": "Beijing"}));
    }

    #[test]
    fn missing_args_default_to_empty_object() {
        let call = extract_tool_call("```json\n{\"tool\": \"get_project_files\"}\n```").unwrap();
        assert_eq!(call.args, json!({}));
    }

    #[test]
    fn plain_reply_has_no_call() {
        assert_eq!(extract_tool_call("It is sunny in Beijing."), None);
    }

    #[test]
    fn malformed_block_is_ignored() {
        assert_eq!(extract_tool_call("```json\n{\"tool\": \n```"), None);
        assert_eq!(extract_tool_call("```json\n{\"args\": {}}\n```"), None);
    }

    #[test]
    fn unterminated_fence_still_parses() {
        let call = extract_tool_call("```json {\"tool\": \"read_file\", \"args\": {\"file\": \"a.txt\"}}").unwrap();
        assert_eq!(call.tool.as_str(), "read_file");
    }
}
