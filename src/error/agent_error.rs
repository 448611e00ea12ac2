use crate::llm::LlmError;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("planning failed: {0}")]
    Planning(String),

    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    #[error("invalid parameters for {tool}: {reason}")]
    InvalidParams { tool: String, reason: String },

    #[error("verification failed: {0}")]
    Verification(String),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    ModelError(#[from] LlmError),
}
