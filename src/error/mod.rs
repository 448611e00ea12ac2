pub mod agent_error;

use std::io;

use thiserror::Error as ThisError;

use crate::{error::agent_error::AgentError, llm::LlmError};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serde_json error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("model error: {0}")]
    ModelError(#[from] LlmError),

    #[error("agent error: {0}")]
    AgentError(#[from] AgentError),

    #[error("http client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("server error: {0}")]
    ServerError(String),
}

pub type Result<T> = core::result::Result<T, Error>;
