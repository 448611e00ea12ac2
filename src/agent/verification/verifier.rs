use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::{
    agent::{
        core::base_agent::AgentBehavior,
        planning::Plan,
        types::{
            CompletionCheck, ExecutionResult, FinalAnswer, StepResult, Verification,
            VerificationStatus,
        },
        verification::formatter::{FALLBACK_NOTE, format_summary},
    },
    error::agent_error::AgentError,
    llm::LlmClient,
    message::verifier::generate_summary_messages,
};

const SUMMARY_TEMPERATURE: f32 = 0.2;

/// Checks step completion and assembles the final answer.
pub struct Verifier {
    llm: Option<Arc<dyn LlmClient>>,
}

impl Verifier {
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        if llm.is_none() {
            warn!("LLM not available for formatting, using manual summaries");
        }
        Self { llm }
    }

    pub fn rule_based() -> Self {
        Self { llm: None }
    }

    pub fn llm_available(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn verify(&self, plan: &Plan, execution: &ExecutionResult) -> Verification {
        info!("Verifying execution results");

        let completion_check = check_completion(plan, &execution.results);
        let status = if completion_check.all_steps_completed {
            VerificationStatus::Success
        } else {
            warn!(
                successful = completion_check.successful_steps,
                expected = completion_check.expected_steps,
                "Not all steps were completed"
            );
            VerificationStatus::Partial
        };

        let final_answer = self
            .final_answer(plan, &execution.results, completion_check)
            .await;

        info!(?status, "Verification finished");
        Verification {
            status,
            completion_check,
            final_answer,
        }
    }

    async fn final_answer(
        &self,
        plan: &Plan,
        results: &[StepResult],
        completion: CompletionCheck,
    ) -> FinalAnswer {
        let (summary, note) = match self.llm_summary(plan, results).await {
            Some(summary) => (summary, None),
            None => (
                format_summary(plan, results, &completion),
                Some(FALLBACK_NOTE.to_string()),
            ),
        };

        FinalAnswer {
            task: plan.task.clone(),
            objective: plan.objective.clone(),
            success_criteria: plan.success_criteria.clone(),
            completion,
            summary,
            raw_results: results.to_vec(),
            note,
        }
    }

    async fn llm_summary(&self, plan: &Plan, results: &[StepResult]) -> Option<String> {
        let llm = self.llm.as_ref()?;
        match summarize(llm.as_ref(), plan, results).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(error = %e, "LLM formatting failed, using fallback");
                None
            }
        }
    }
}

async fn summarize(
    llm: &dyn LlmClient,
    plan: &Plan,
    results: &[StepResult],
) -> Result<String, AgentError> {
    let messages = generate_summary_messages(plan, results)?;
    let summary = llm.complete(&messages, SUMMARY_TEMPERATURE, None).await?;
    if summary.trim().is_empty() {
        return Err(AgentError::Verification("empty summary".to_string()));
    }
    Ok(summary)
}

/// Counts how many of the plan's steps ended `completed` or `skipped`.
pub fn check_completion(plan: &Plan, results: &[StepResult]) -> CompletionCheck {
    let expected_steps = plan.steps.len();
    let successful_steps = results
        .iter()
        .filter(|result| result.status.is_successful())
        .count();

    CompletionCheck {
        expected_steps,
        executed_steps: results.len(),
        successful_steps,
        all_steps_completed: successful_steps == expected_steps,
    }
}

impl AgentBehavior for Verifier {
    fn name(&self) -> &str {
        "verifier"
    }

    fn get_status(&self) -> serde_json::Value {
        json!({
            "name": self.name(),
            "healthy": self.is_healthy(),
            "mode": if self.llm_available() { "llm" } else { "manual" },
        })
    }
}
