use crate::{
    agent::{planning::Plan, types::StepResult},
    llm::ChatMessage,
    prompt::builder::build_summary_prompt,
};

const VERIFIER_SYSTEM_PROMPT: &str = "You are an expert at formatting and summarizing technical \
results. Create a clear, structured summary.";

/// Summary request carrying the step results as pretty-printed JSON.
pub fn generate_summary_messages(
    plan: &Plan,
    results: &[StepResult],
) -> Result<Vec<ChatMessage>, serde_json::Error> {
    let results_json = serde_json::to_string_pretty(results)?;
    Ok(vec![
        ChatMessage::system(VERIFIER_SYSTEM_PROMPT),
        ChatMessage::user(build_summary_prompt(plan, &results_json)),
    ])
}
