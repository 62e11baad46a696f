//! Tool catalog rendering for prompts

use std::fmt::Write as _;

use crate::types::tool::ToolDescriptor;

/// Render tool descriptors as plain text, one block per tool
///
/// ```text
/// Tool: get_weather
/// Description: get weather for city
/// Parameters:
/// - city (string): city name
/// ```
#[must_use]
pub fn render_tool_catalog(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .map(|tool| {
            let mut block = format!(
                "Tool: {}\nDescription: {}\nParameters:",
                tool.name, tool.description
            );
            for (name, spec) in &tool.parameters {
                let kind = if spec.kind.is_empty() { "unknown" } else { &spec.kind };
                let _ = write!(block, "\n- {name} ({kind}): {}", spec.description);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// System prompt asking the model to answer with a fenced tool-call block
/// when one of `tools` fits the request
#[must_use]
pub fn tool_selection_prompt(tools: &[ToolDescriptor]) -> String {
    format!(
        "You are an assistant that helps users by calling appropriate tools. \
         Here are the tools available to you:\n\n\
         {}\n\n\
         When a user asks a question, determine if you should use a tool. \
         If yes, respond with JSON in this format:\n\
         ```json\n{{\"tool\": \"tool_name\", \"args\": {{\"param1\": \"value1\"}}}}\n```\n\
         If no tool is needed, respond normally.",
        render_tool_catalog(tools)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_parameters_in_name_order() {
        let tools = vec![
            ToolDescriptor::new("read_file", "read a project file")
                .with_parameter("file", "string", "relative path"),
            ToolDescriptor::new("get_project_files", "list project files"),
        ];

        assert_eq!(
            render_tool_catalog(&tools),
            "Tool: read_file\nDescription: read a project file\nParameters:\n\
             - file (string): relative path\n\n\
             Tool: get_project_files\nDescription: list project files\nParameters:"
        );
    }

    #[test]
    fn missing_type_renders_as_unknown() {
        let tools = vec![ToolDescriptor::new("t", "d").with_parameter("x", "", "")];
        assert!(render_tool_catalog(&tools).contains("- x (unknown): "));
    }

    #[test]
    fn prompt_embeds_catalog() {
        let tools = vec![ToolDescriptor::new("get_weather", "get weather for city")];
        let prompt = tool_selection_prompt(&tools);
        assert!(prompt.contains("Tool: get_weather"));
        assert!(prompt.contains("```json\n{\"tool\": \"tool_name\""));
    }
}
