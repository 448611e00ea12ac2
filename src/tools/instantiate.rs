use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::Result,
    shared::AppConfig,
    tools::{GithubSearchTool, ToolRegistry, WeatherTool},
};

/// One HTTP client for every outbound call, carrying the configured timeout.
pub fn build_http_client(config: &AppConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// The fixed tool set: repository search, then weather.
pub fn instantiate_tools(config: &AppConfig, client: reqwest::Client) -> ToolRegistry {
    ToolRegistry::new()
        .with_tool(Arc::new(GithubSearchTool::new(
            client.clone(),
            config.github.base_url.clone(),
            config.github.token.clone(),
        )))
        .with_tool(Arc::new(WeatherTool::new(
            client,
            config.weather.base_url.clone(),
            config.weather.api_key.clone(),
        )))
}
