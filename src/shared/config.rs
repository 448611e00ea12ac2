use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Model backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: None,
            model: "gpt-4-turbo-preview".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 2000,
        }
    }
}

/// Repository search API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub base_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: "https://api.github.com".to_string(),
        }
    }
}

/// Weather API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Process configuration, built once at start-up and handed to each component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub github: GithubConfig,
    pub weather: WeatherConfig,
    pub server: ServerConfig,
    pub log_level: String,
    /// Per-request timeout applied to every outbound call.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            github: GithubConfig::default(),
            weather: WeatherConfig::default(),
            server: ServerConfig::default(),
            log_level: "info".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();

        if let Some(provider) = get("LLM_PROVIDER") {
            let provider = provider.to_lowercase();
            if provider != "openai" && provider != "none" {
                return Err(Error::ConfigError(format!(
                    "unsupported LLM_PROVIDER '{provider}' (expected 'openai' or 'none')"
                )));
            }
            config.llm.provider = provider;
        }
        config.llm.api_key = get("OPENAI_API_KEY");
        if let Some(model) = get("OPENAI_MODEL") {
            config.llm.model = model;
        }
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            config.llm.base_url = base_url;
        }
        if let Some(max_tokens) = get("OPENAI_MAX_TOKENS") {
            config.llm.max_tokens = parse_number("OPENAI_MAX_TOKENS", &max_tokens)?;
        }

        config.github.token = get("GITHUB_TOKEN");
        if let Some(base_url) = get("GITHUB_API_URL") {
            config.github.base_url = base_url;
        }

        config.weather.api_key = get("WEATHER_API_KEY");
        if let Some(base_url) = get("WEATHER_API_URL") {
            config.weather.base_url = base_url;
        }

        if let Some(host) = get("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            config.server.port = parse_number("SERVER_PORT", &port)?;
        }

        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level.to_lowercase();
        }
        if let Some(timeout) = get("REQUEST_TIMEOUT_SECS") {
            config.timeout_secs = parse_number("REQUEST_TIMEOUT_SECS", &timeout)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::ConfigError(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The model backend is used only when a provider and a key are both present.
    pub fn llm_enabled(&self) -> bool {
        self.llm.provider == "openai" && self.llm.api_key.is_some()
    }

    /// Credentials that are unset; each one degrades a capability rather than
    /// preventing start-up.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.llm.provider == "openai" && self.llm.api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        if self.github.token.is_none() {
            missing.push("GITHUB_TOKEN");
        }
        if self.weather.api_key.is_none() {
            missing.push("WEATHER_API_KEY");
        }
        missing
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| Error::ConfigError(format!("{key}='{raw}' is not a valid number: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.llm.model, "gpt-4-turbo-preview");
        assert!(!config.llm_enabled());
        assert_eq!(
            config.missing_credentials(),
            vec!["OPENAI_API_KEY", "GITHUB_TOKEN", "WEATHER_API_KEY"]
        );
    }

    #[test]
    fn reads_values_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("GITHUB_TOKEN", "ghp"),
            ("WEATHER_API_KEY", "owm"),
            ("SERVER_PORT", "9090"),
            ("LOG_LEVEL", "DEBUG"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert!(config.llm_enabled());
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn blank_api_key_means_degraded_mode() {
        let config = AppConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "   ")])).unwrap();
        assert!(!config.llm_enabled());
    }

    #[test]
    fn provider_none_disables_model() {
        let config = AppConfig::from_lookup(lookup(&[
            ("LLM_PROVIDER", "none"),
            ("OPENAI_API_KEY", "sk-1"),
        ]))
        .unwrap();
        assert!(!config.llm_enabled());
        assert!(!config.missing_credentials().contains(&"OPENAI_API_KEY"));
    }

    #[test]
    fn rejects_bad_numbers_and_providers() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")])),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "0")])),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("LLM_PROVIDER", "anthropic-ish")])),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn secrets_are_not_serialized() {
        let config = AppConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
