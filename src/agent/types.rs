use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{agent::context::ExecutionContext, tools::ToolResult};

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// No tool was required.
    Skipped,
    /// The step named a tool that is not registered.
    Error,
    /// The tool ran; its result may still report a data-level error.
    Completed,
    /// The tool could not be invoked with the step's parameters.
    Failed,
}

impl StepStatus {
    /// Counts towards `successful_steps`.
    pub fn is_successful(self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Skipped)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Skipped => write!(f, "skipped"),
            StepStatus::Error => write!(f, "error"),
            StepStatus::Completed => write!(f, "completed"),
            StepStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub step_number: usize,
    pub status: StepStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ToolResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StepResult {
    pub fn skipped(step_number: usize, description: String, reason: &str) -> Self {
        Self {
            step_number,
            status: StepStatus::Skipped,
            description,
            tool: None,
            params: None,
            result: None,
            error: None,
            reason: Some(reason.to_string()),
        }
    }

    pub fn error(step_number: usize, description: String, error: String) -> Self {
        Self {
            step_number,
            status: StepStatus::Error,
            description,
            tool: None,
            params: None,
            result: None,
            error: Some(error),
            reason: None,
        }
    }

    pub fn completed(
        step_number: usize,
        description: String,
        tool: String,
        params: Map<String, Value>,
        result: ToolResult,
    ) -> Self {
        Self {
            step_number,
            status: StepStatus::Completed,
            description,
            tool: Some(tool),
            params: Some(params),
            result: Some(result),
            error: None,
            reason: None,
        }
    }

    pub fn failed(step_number: usize, description: String, tool: String, error: String) -> Self {
        Self {
            step_number,
            status: StepStatus::Failed,
            description,
            tool: Some(tool),
            params: None,
            result: None,
            error: Some(error),
            reason: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
}

/// Everything the step runner produced for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    pub steps_executed: usize,
    pub results: Vec<StepResult>,
    pub execution_context: ExecutionContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCheck {
    pub expected_steps: usize,
    pub executed_steps: usize,
    pub successful_steps: usize,
    pub all_steps_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Success,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalAnswer {
    pub task: String,
    pub objective: String,
    pub success_criteria: String,
    pub completion: CompletionCheck,
    pub summary: String,
    pub raw_results: Vec<StepResult>,
    /// Present only when the deterministic formatter produced the summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub status: VerificationStatus,
    pub completion_check: CompletionCheck,
    pub final_answer: FinalAnswer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(serde_json::to_value(StepStatus::Skipped).unwrap(), json!("skipped"));
        assert_eq!(serde_json::to_value(VerificationStatus::Partial).unwrap(), json!("partial"));
        assert_eq!(StepStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn only_completed_and_skipped_count_as_successful() {
        assert!(StepStatus::Completed.is_successful());
        assert!(StepStatus::Skipped.is_successful());
        assert!(!StepStatus::Error.is_successful());
        assert!(!StepStatus::Failed.is_successful());
    }

    #[test]
    fn skipped_result_omits_empty_fields() {
        let result = StepResult::skipped(1, "think".to_string(), "No tool required");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "step_number": 1,
                "status": "skipped",
                "description": "think",
                "reason": "No tool required"
            })
        );
    }
}
