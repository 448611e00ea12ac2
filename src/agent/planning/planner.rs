use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::{
    agent::{
        core::base_agent::AgentBehavior,
        planning::{Plan, rules},
    },
    error::agent_error::AgentError,
    llm::LlmClient,
    message::planner::generate_planner_messages,
    tools::ToolInfo,
    utils::string_util::truncate_for_log,
};

const PLANNING_TEMPERATURE: f32 = 0.3;

/// Turns a free-text task into a [`Plan`], preferring the model backend and
/// falling back to keyword rules.
pub struct Planner {
    llm: Option<Arc<dyn LlmClient>>,
    tools: Vec<ToolInfo>,
}

impl Planner {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, tools: Vec<ToolInfo>) -> Self {
        if llm.is_none() {
            warn!("LLM not available, using rule-based planner");
        }
        Self { llm, tools }
    }

    /// A planner that never consults a model.
    pub fn rule_based() -> Self {
        Self {
            llm: None,
            tools: Vec::new(),
        }
    }

    pub fn llm_available(&self) -> bool {
        self.llm.is_some()
    }

    /// Produces a plan for `task`.
    ///
    /// Model failures never surface here; [`AgentError::Planning`] means the
    /// rule-based path could not produce a usable plan either.
    pub async fn generate(&self, task: &str) -> Result<Plan, AgentError> {
        info!(task, "Planning task");

        if let Some(llm) = &self.llm {
            match self.llm_plan(llm.as_ref(), task).await {
                Ok(plan) => {
                    info!(steps = plan.steps.len(), "Generated LLM plan");
                    return Ok(plan);
                }
                Err(e) => warn!(error = %e, "LLM planning failed, using fallback"),
            }
        }

        rules::plan_for(task).map_err(|e| AgentError::Planning(e.to_string()))
    }

    async fn llm_plan(&self, llm: &dyn LlmClient, task: &str) -> Result<Plan, AgentError> {
        let messages = generate_planner_messages(task, &self.tools);
        let value = llm
            .complete_json(&messages, PLANNING_TEMPERATURE, None)
            .await?;
        debug!(plan = %truncate_for_log(&value.to_string(), 2_000), "model plan reply");
        Plan::from_value(value)
    }
}

impl AgentBehavior for Planner {
    fn name(&self) -> &str {
        "planner"
    }

    fn get_status(&self) -> serde_json::Value {
        json!({
            "name": self.name(),
            "healthy": self.is_healthy(),
            "mode": if self.llm_available() { "llm" } else { "rule-based" },
            "model": self.llm.as_ref().map(|llm| llm.model().to_string()),
        })
    }
}
