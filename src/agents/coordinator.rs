use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    agent::{
        AgentBehavior, ExecutionResult, Executor, FinalAnswer, Plan, Planner, Verification,
        Verifier,
    },
    error::Result,
    llm::{LlmClient, OpenAiClient, OpenAiClientConfig},
    shared::AppConfig,
    tools::{ToolRegistry, build_http_client, instantiate_tools},
};

/// Composite result of one task, tagged by `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TaskOutcome {
    Success(Box<CompletedTask>),
    Error(PlanningFailure),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success(_))
    }

    pub fn completed(&self) -> Option<&CompletedTask> {
        match self {
            TaskOutcome::Success(task) => Some(task.as_ref()),
            TaskOutcome::Error(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedTask {
    pub run_id: Uuid,
    pub user_task: String,
    pub plan: Plan,
    pub execution: ExecutionResult,
    pub verification: Verification,
    /// Same value as `verification.final_answer`.
    pub final_answer: FinalAnswer,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelinePhase {
    Planning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningFailure {
    pub phase: PipelinePhase,
    pub error: String,
}

/// Drives plan, execute and verify for one task at a time.
pub struct Coordinator {
    planner: Planner,
    executor: Executor,
    verifier: Verifier,
}

impl Coordinator {
    pub fn new(planner: Planner, executor: Executor, verifier: Verifier) -> Self {
        Self {
            planner,
            executor,
            verifier,
        }
    }

    /// Wires every component from configuration. A missing model key leaves
    /// the planner and verifier on their rule-based paths.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = build_http_client(config)?;

        let llm: Option<Arc<dyn LlmClient>> = match &config.llm.api_key {
            Some(api_key) if config.llm_enabled() => {
                let llm_config = OpenAiClientConfig::new(api_key.clone(), config.llm.model.clone())
                    .with_base_url(config.llm.base_url.clone())
                    .with_max_tokens(config.llm.max_tokens);
                let llm: Arc<dyn LlmClient> =
                    Arc::new(OpenAiClient::new(client.clone(), llm_config));
                Some(llm)
            }
            _ => None,
        };

        let registry = instantiate_tools(config, client);
        Ok(Self::with_registry(llm, registry))
    }

    /// Planner sees the registry's catalog; planner and verifier share `llm`.
    pub fn with_registry(llm: Option<Arc<dyn LlmClient>>, registry: ToolRegistry) -> Self {
        let planner = Planner::new(llm.clone(), registry.catalog());
        let verifier = Verifier::new(llm);
        Self::new(planner, Executor::new(registry), verifier)
    }

    pub async fn process(&self, task: &str) -> TaskOutcome {
        info!(task, "Processing task");

        let plan = match self.planner.generate(task).await {
            Ok(plan) => plan,
            Err(e) => {
                error!(error = %e, "Planning failed");
                return TaskOutcome::Error(PlanningFailure {
                    phase: PipelinePhase::Planning,
                    error: e.to_string(),
                });
            }
        };
        info!(steps = plan.steps.len(), "Plan created");

        let execution = self.executor.run(&plan).await;
        info!(steps = execution.steps_executed, "Executed steps");

        let verification = self.verifier.verify(&plan, &execution).await;
        let final_answer = verification.final_answer.clone();

        TaskOutcome::Success(Box::new(CompletedTask {
            run_id: Uuid::new_v4(),
            user_task: task.to_string(),
            plan,
            execution,
            verification,
            final_answer,
            completed_at: Utc::now(),
        }))
    }

    pub fn is_healthy(&self) -> bool {
        self.planner.is_healthy() && self.executor.is_healthy() && self.verifier.is_healthy()
    }

    /// Status of every component, keyed by component name.
    pub fn status(&self) -> serde_json::Value {
        json!({
            "planner": self.planner.get_status(),
            "executor": self.executor.get_status(),
            "verifier": self.verifier.get_status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;

    #[test]
    fn planning_failure_serializes_flat() {
        let outcome = TaskOutcome::Error(PlanningFailure {
            phase: PipelinePhase::Planning,
            error: "planning failed: invalid plan: plan must have at least one step".to_string(),
        });

        assert!(!outcome.is_success());
        assert!(outcome.completed().is_none());
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({
            "status": "error",
            "phase": "planning",
            "error": "planning failed: invalid plan: plan must have at least one step"
        }));
    }

    #[tokio::test]
    async fn blank_task_is_planned_as_informational() {
        let coordinator = Coordinator::with_registry(None, ToolRegistry::new());
        let outcome = coordinator.process("   ").await;

        let completed = outcome.completed().unwrap();
        assert_eq!(completed.plan.steps.len(), 1);
        assert!(!completed.plan.steps[0].requires_tool());
        assert_eq!(completed.execution.steps_executed, 1);
    }

    #[tokio::test]
    async fn informational_task_runs_all_stages() {
        let llm = Arc::new(MockLlmClient::unavailable());
        let coordinator =
            Coordinator::with_registry(Some(llm as Arc<dyn LlmClient>), ToolRegistry::new());

        let outcome = coordinator.process("Tell me a joke").await;
        let completed = outcome.completed().unwrap();

        assert_eq!(completed.user_task, "Tell me a joke");
        assert_eq!(completed.execution.steps_executed, 1);
        assert_eq!(completed.final_answer, completed.verification.final_answer);

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["verification"]["status"], "success");
        assert_eq!(value["execution"]["execution_context"]["step_1"]["status"], "skipped");
    }

    #[test]
    fn status_reports_each_component() {
        let coordinator = Coordinator::with_registry(None, ToolRegistry::new());
        let status = coordinator.status();
        assert_eq!(status["planner"]["mode"], "rule-based");
        assert_eq!(status["verifier"]["mode"], "manual");
        assert_eq!(status["executor"]["tools"], serde_json::json!([]));
        assert!(coordinator.is_healthy());
    }
}
