//! Tool invokers: one adapter per external capability behind a uniform
//! contract (name, description, parameter schema, execute).

pub mod github;
pub mod instantiate;
pub mod model;
pub mod registry;
pub mod weather;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::agent_error::AgentError;

pub use github::GithubSearchTool;
pub use instantiate::{build_http_client, instantiate_tools};
pub use model::{ToolFailure, ToolInfo, ToolOutput, ToolResult};
pub use registry::ToolRegistry;
pub use weather::WeatherTool;

/// Sentinel tool name for informational steps.
pub const NO_TOOL: &str = "none";

#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable identifier used as a plan step's `tool` field.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON-Schema-like description of the accepted parameters.
    fn parameters(&self) -> Value;

    /// Runs the tool. Transport and API failures come back as
    /// `Ok(ToolResult::Error)`; `Err` is reserved for parameters the tool
    /// cannot interpret at all.
    async fn execute(&self, params: &Map<String, Value>) -> Result<ToolResult, AgentError>;

    fn info(&self) -> ToolInfo {
        ToolInfo::new(
            self.name().to_string(),
            self.description().to_string(),
            self.parameters(),
        )
    }
}

/// Deserializes a step's parameter map into a tool's typed parameters.
pub(crate) fn parse_params<T: DeserializeOwned>(
    tool: &str,
    params: &Map<String, Value>,
) -> Result<T, AgentError> {
    serde_json::from_value(Value::Object(params.clone())).map_err(|e| AgentError::InvalidParams {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}
