pub mod config;

pub use config::{AppConfig, GithubConfig, LlmConfig, ServerConfig, WeatherConfig};
