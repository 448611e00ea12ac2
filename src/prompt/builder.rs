use crate::{agent::planning::Plan, tools::ToolInfo};

const NO_TOOL_ENTRY: &str = "none - For informational tasks that don't need external tools";

const PLAN_SHAPE: &str = r#"{
    "task": "Original task",
    "objective": "Clear objective",
    "steps": [
        {
            "step_number": 1,
            "description": "What to do",
            "tool": "Tool name or 'none'",
            "params": {"param1": "value1"},
            "expected_outcome": "What we expect"
        }
    ],
    "success_criteria": "How to know if successful"
}"#;

/// Numbered tool catalog, always ending with the `none` pseudo-tool.
pub fn build_tools_prompt(tools: &[ToolInfo]) -> String {
    let mut lines: Vec<String> = tools
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            format!(
                "{}. {} - {}\n   params: {}",
                i + 1,
                tool.name,
                tool.description,
                tool.params_schema
            )
        })
        .collect();
    lines.push(format!("{}. {NO_TOOL_ENTRY}", tools.len() + 1));
    lines.join("\n")
}

pub fn build_plan_prompt(task: &str, tools: &[ToolInfo]) -> String {
    format!(
        r#"
Task: {task}

Available tools:
{tools}

Please create a JSON plan with the following structure:
{PLAN_SHAPE}

Only return valid JSON, no other text.
"#,
        tools = build_tools_prompt(tools),
    )
}

pub fn build_summary_prompt(plan: &Plan, results_json: &str) -> String {
    format!(
        r#"
Task: {}
Objective: {}
Success Criteria: {}

Execution Results:
{results_json}

Please create a clear, structured summary of:
1. What was accomplished
2. Key findings or data obtained
3. Any issues encountered
4. Next steps if needed

Be concise but comprehensive.
"#,
        plan.task, plan.objective, plan.success_criteria
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn catalog_lists_registered_tools_then_none() {
        let tools = vec![
            ToolInfo::new(
                "github_search_repos".to_string(),
                "Search GitHub repositories".to_string(),
                json!({"required": ["query"]}),
            ),
            ToolInfo::new(
                "get_weather".to_string(),
                "Get current weather".to_string(),
                json!({"required": ["city"]}),
            ),
        ];

        let prompt = build_plan_prompt("Weather in Paris", &tools);

        assert!(prompt.contains("Task: Weather in Paris"));
        assert!(prompt.contains("1. github_search_repos - Search GitHub repositories"));
        assert!(prompt.contains("2. get_weather - Get current weather"));
        assert!(prompt.contains("3. none - For informational tasks"));
        assert!(prompt.trim_end().ends_with("Only return valid JSON, no other text."));
    }

    #[test]
    fn empty_catalog_still_offers_none() {
        assert_eq!(build_tools_prompt(&[]), format!("1. {NO_TOOL_ENTRY}"));
    }
}
