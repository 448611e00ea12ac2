use crate::{llm::ChatMessage, prompt::builder::build_plan_prompt, tools::ToolInfo};

const PLANNER_SYSTEM_PROMPT: &str = "You are an AI planning agent. Your task is to break down \
user requests into concrete, actionable steps with required tools.";

pub fn generate_planner_messages(task: &str, tools: &[ToolInfo]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(PLANNER_SYSTEM_PROMPT),
        ChatMessage::user(build_plan_prompt(task, tools)),
    ]
}
