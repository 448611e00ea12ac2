use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

use crate::{error::agent_error::AgentError, tools::NO_TOOL};

const REQUIRED_PLAN_FIELDS: [&str; 4] = ["task", "objective", "steps", "success_criteria"];

fn default_tool() -> String {
    NO_TOOL.to_string()
}

// Lenient readers for model-written step fields.

/// A number or numeric string; anything else reads as absent.
fn lenient_step_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn tool_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(default_tool()),
        Value::String(s) if s.trim().is_empty() => Ok(default_tool()),
        Value::String(s) => Ok(s),
        other => Err(D::Error::custom(format!("tool must be a string, got {other}"))),
    }
}

/// Anything but an object reads as no params.
fn params_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Map<String, Value>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

fn text_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// One planned invocation (or no-op) within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based; model-produced plans may omit it, in which case the step's
    /// position is used.
    #[serde(
        default,
        deserialize_with = "lenient_step_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub step_number: Option<usize>,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,

    #[serde(default = "default_tool", deserialize_with = "tool_or_none")]
    pub tool: String,

    #[serde(default, deserialize_with = "params_or_empty")]
    pub params: Map<String, Value>,

    #[serde(default, deserialize_with = "text_or_empty")]
    pub expected_outcome: String,
}

impl Step {
    pub fn new(
        step_number: usize,
        description: impl Into<String>,
        tool: impl Into<String>,
        params: Map<String, Value>,
        expected_outcome: impl Into<String>,
    ) -> Self {
        Self {
            step_number: Some(step_number),
            description: description.into(),
            tool: tool.into(),
            params,
            expected_outcome: expected_outcome.into(),
        }
    }

    pub fn requires_tool(&self) -> bool {
        self.tool != NO_TOOL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub task: String,
    pub objective: String,
    pub steps: Vec<Step>,
    pub success_criteria: String,
}

impl Plan {
    /// Validates a model-produced plan: all four top-level fields present and
    /// at least one step.
    pub fn from_value(value: Value) -> Result<Self, AgentError> {
        let object = value
            .as_object()
            .ok_or_else(|| AgentError::InvalidPlan("plan is not a JSON object".to_string()))?;

        for field in REQUIRED_PLAN_FIELDS {
            if !object.contains_key(field) {
                return Err(AgentError::InvalidPlan(format!(
                    "missing required field in plan: {field}"
                )));
            }
        }

        let plan: Plan = serde_json::from_value(value)?;
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if self.steps.is_empty() {
            return Err(AgentError::InvalidPlan(
                "plan must have at least one step".to_string(),
            ));
        }
        Ok(())
    }
}
