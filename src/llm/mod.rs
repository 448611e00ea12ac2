//! Model backend contract.
//!
//! The pipeline only needs two things from a language model: free-form
//! completion and a JSON-mode completion that tolerates an object embedded in
//! surrounding prose. Both are expressed on [`LlmClient`]; the JSON variant is
//! a provided method so every backend gets the same extraction rules.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::utils::string_util::{StripCodeBlock, extract_json_object, truncate_for_log};

pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, OpenAiClientConfig};

const JSON_ONLY_SUFFIX: &str = "\n\nRespond with valid JSON only.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("could not parse JSON from response: {0}")]
    Parse(String),
    #[error("model backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Model identifier, reported in component status.
    fn model(&self) -> &str;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError>;

    /// Asks for a pure-JSON answer and parses it.
    async fn complete_json(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<Value, LlmError> {
        let mut messages = messages.to_vec();
        if let Some(last) = messages.last_mut() {
            if last.role == Role::User {
                last.content.push_str(JSON_ONLY_SUFFIX);
            }
        }

        let reply = self.complete(&messages, temperature, max_tokens).await?;
        parse_json_reply(&reply)
    }
}

/// Parses a model reply as JSON, falling back to the first `{`..last `}` span.
pub fn parse_json_reply(reply: &str) -> Result<Value, LlmError> {
    if let Ok(value) = serde_json::from_str::<Value>(reply.strip_code_block()) {
        return Ok(value);
    }

    extract_json_object(reply)
        .and_then(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .ok_or_else(|| LlmError::Parse(truncate_for_log(reply, 500)))
}
