use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog entry describing a tool to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub params_schema: Value,
}

impl ToolInfo {
    pub fn new(name: String, description: String, params_schema: Value) -> Self {
        Self {
            name,
            description,
            params_schema,
        }
    }
}

/// Normalized outcome of a tool call, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult {
    Success(ToolOutput),
    Error(ToolFailure),
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Repositories(RepositorySearch),
    Weather(WeatherReport),
    Forecast(WeatherForecast),
    User(UserProfile),
}

/// Error payload; echoes back whichever input identified the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ToolFailure {
    pub fn for_query(error: impl ToString, query: &str) -> Self {
        Self {
            error: error.to_string(),
            query: Some(query.to_string()),
            city: None,
            username: None,
        }
    }

    pub fn for_city(error: impl ToString, city: &str) -> Self {
        Self {
            error: error.to_string(),
            query: None,
            city: Some(city.to_string()),
            username: None,
        }
    }

    pub fn for_username(error: impl ToString, username: &str) -> Self {
        Self {
            error: error.to_string(),
            query: None,
            city: None,
            username: Some(username.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySearch {
    pub query: String,
    pub count: usize,
    pub results: Vec<Repository>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub stars: u64,
    pub language: Option<String>,
    pub owner: String,
    pub forks: u64,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub weather: WeatherConditions,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: f64,
    pub wind_speed: f64,
    pub cloudiness: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub city: String,
    pub country: String,
    pub forecasts: Vec<ForecastEntry>,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub datetime: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: GithubUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failure_serializes_with_status_tag_and_echoed_input() {
        let result = ToolResult::Error(ToolFailure::for_query("timed out", "language:rust"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"status": "error", "error": "timed out", "query": "language:rust"})
        );
    }

    #[test]
    fn weather_success_reads_back_as_weather() {
        let value = json!({
            "status": "success",
            "city": "London",
            "country": "GB",
            "weather": {
                "description": "light rain",
                "temperature": 11.5,
                "feels_like": 10.9,
                "humidity": 81,
                "pressure": 1012,
                "wind_speed": 4.1,
                "cloudiness": 75
            },
            "units": "metric"
        });
        let result: ToolResult = serde_json::from_value(value).unwrap();
        match result {
            ToolResult::Success(ToolOutput::Weather(report)) => {
                assert_eq!(report.city, "London");
                assert_eq!(report.weather.humidity, 81);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
