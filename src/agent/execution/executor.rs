use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    agent::{
        context::ExecutionContext,
        core::base_agent::AgentBehavior,
        planning::{Plan, Step},
        types::{ExecutionResult, ExecutionStatus, StepResult},
    },
    error::agent_error::AgentError,
    tools::ToolRegistry,
};

const NO_TOOL_REASON: &str = "No tool required";

/// Runs every step of a plan in order against the tool registry.
#[derive(Clone, Default)]
pub struct Executor {
    registry: ToolRegistry,
}

impl Executor {
    pub fn new(registry: ToolRegistry) -> Self {
        if registry.is_empty() {
            warn!("No tools registered, only tool-free steps can run");
        } else {
            info!(tools = registry.len(), "Executor ready");
        }
        Self { registry }
    }

    /// Executes `plan` start to finish.
    ///
    /// Per-step failures are recorded in that step's result and never stop
    /// the remaining steps.
    pub async fn run(&self, plan: &Plan) -> ExecutionResult {
        info!(steps = plan.steps.len(), "Executing plan");

        let mut context = ExecutionContext::default();
        let mut results = Vec::with_capacity(plan.steps.len());

        for (index, step) in plan.steps.iter().enumerate() {
            let step_number = step.step_number.unwrap_or(index + 1);
            let result = self.run_step(step_number, step).await;
            context.record(result.clone());
            results.push(result);
        }

        ExecutionResult {
            status: ExecutionStatus::Success,
            steps_executed: results.len(),
            results,
            execution_context: context,
        }
    }

    async fn run_step(&self, step_number: usize, step: &Step) -> StepResult {
        info!(step = step_number, description = %step.description, "Executing step");

        if !step.requires_tool() {
            return StepResult::skipped(step_number, step.description.clone(), NO_TOOL_REASON);
        }

        let Some(tool) = self.registry.get(&step.tool) else {
            let err = AgentError::ToolNotFound(step.tool.clone());
            warn!(step = step_number, tool = %step.tool, "Unknown tool");
            return StepResult::error(step_number, step.description.clone(), err.to_string());
        };

        match tool.execute(&step.params).await {
            Ok(result) => {
                if !result.is_success() {
                    warn!(step = step_number, tool = %step.tool, "Tool reported an error result");
                }
                StepResult::completed(
                    step_number,
                    step.description.clone(),
                    step.tool.clone(),
                    step.params.clone(),
                    result,
                )
            }
            Err(e) => {
                error!(step = step_number, tool = %step.tool, error = %e, "Step failed");
                StepResult::failed(
                    step_number,
                    step.description.clone(),
                    step.tool.clone(),
                    e.to_string(),
                )
            }
        }
    }
}

impl AgentBehavior for Executor {
    fn name(&self) -> &str {
        "executor"
    }

    fn get_status(&self) -> serde_json::Value {
        json!({
            "name": self.name(),
            "healthy": self.is_healthy(),
            "tools": self.registry.names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::{
        agent::types::StepStatus,
        tools::{NO_TOOL, Tool, ToolFailure, ToolResult, parse_params},
    };

    #[derive(serde::Deserialize)]
    struct EchoParams {
        query: String,
    }

    /// Fails with a data-level error for every query, counting its calls.
    #[derive(Default)]
    struct FlakySearch {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Tool for FlakySearch {
        fn name(&self) -> &str {
            "search"
        }

        fn description(&self) -> &str {
            "test search"
        }

        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {"query": {"type": "string"}}, "required": ["query"]})
        }

        async fn execute(&self, params: &Map<String, Value>) -> Result<ToolResult, AgentError> {
            let params: EchoParams = parse_params(self.name(), params)?;
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ToolResult::Error(ToolFailure::for_query(
                "connection reset",
                &params.query,
            )))
        }
    }

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn plan(steps: Vec<Step>) -> Plan {
        Plan {
            task: "test".to_string(),
            objective: "test".to_string(),
            steps,
            success_criteria: "all done".to_string(),
        }
    }

    fn executor() -> (Executor, Arc<FlakySearch>) {
        let tool = Arc::new(FlakySearch::default());
        let registry = ToolRegistry::new().with_tool(tool.clone());
        (Executor::new(registry), tool)
    }

    #[tokio::test]
    async fn runs_every_step_in_order_whatever_the_outcome() {
        let (executor, tool) = executor();
        let plan = plan(vec![
            Step::new(1, "think", NO_TOOL, Map::new(), ""),
            Step::new(2, "mystery", "teleport", Map::new(), ""),
            Step::new(3, "bad params", "search", params(json!({"q": 1})), ""),
            Step::new(4, "search", "search", params(json!({"query": "rust"})), ""),
        ]);

        let execution = executor.run(&plan).await;

        assert_eq!(execution.status, ExecutionStatus::Success);
        assert_eq!(execution.steps_executed, 4);
        let statuses: Vec<StepStatus> = execution.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Skipped,
                StepStatus::Error,
                StepStatus::Failed,
                StepStatus::Completed
            ]
        );
        assert_eq!(tool.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_tool_step_is_skipped_regardless_of_params() {
        let (executor, tool) = executor();
        let plan = plan(vec![Step::new(
            1,
            "ponder",
            NO_TOOL,
            params(json!({"query": "ignored"})),
            "",
        )]);

        let execution = executor.run(&plan).await;
        let result = &execution.results[0];
        assert_eq!(result.status, StepStatus::Skipped);
        assert_eq!(result.reason.as_deref(), Some(NO_TOOL_REASON));
        assert_eq!(tool.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_by_name() {
        let (executor, _) = executor();
        let execution = executor
            .run(&plan(vec![Step::new(1, "fly", "teleport", Map::new(), "")]))
            .await;
        assert_eq!(execution.results[0].status, StepStatus::Error);
        assert_eq!(
            execution.results[0].error.as_deref(),
            Some("Unknown tool: teleport")
        );
    }

    #[tokio::test]
    async fn data_level_error_still_completes_the_step() {
        let (executor, _) = executor();
        let execution = executor
            .run(&plan(vec![Step::new(
                1,
                "search",
                "search",
                params(json!({"query": "rust"})),
                "",
            )]))
            .await;

        let result = &execution.results[0];
        assert_eq!(result.status, StepStatus::Completed);
        match result.result.as_ref() {
            Some(ToolResult::Error(failure)) => {
                assert_eq!(failure.error, "connection reset");
                assert_eq!(failure.query.as_deref(), Some("rust"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn context_uses_position_when_step_number_is_missing() {
        let (executor, _) = executor();
        let mut first = Step::new(1, "a", NO_TOOL, Map::new(), "");
        first.step_number = None;
        let mut second = Step::new(1, "b", NO_TOOL, Map::new(), "");
        second.step_number = None;

        let execution = executor.run(&plan(vec![first, second])).await;

        assert_eq!(execution.execution_context.keys().count(), 2);
        assert_eq!(execution.execution_context.get(2).unwrap().description, "b");
        assert_eq!(execution.results[1].step_number, 2);
    }

    #[test]
    fn status_lists_registered_tools() {
        let (executor, _) = executor();
        assert_eq!(executor.get_status()["tools"], json!(["search"]));
    }
}
