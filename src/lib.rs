pub mod agent;
pub mod agents;
pub mod cli;
pub mod error;
pub mod llm;
pub mod message;
pub mod prompt;
pub mod server;
pub mod shared;
pub mod tools;
pub mod utils;

pub use agents::{Coordinator, TaskOutcome};
pub use error::{Error, Result};
pub use shared::AppConfig;
