use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use crate::error::agent_error::AgentError;
use crate::tools::model::{
    ForecastEntry, ToolFailure, ToolOutput, ToolResult, WeatherConditions, WeatherForecast,
    WeatherReport,
};
use crate::tools::{Tool, parse_params};

pub const WEATHER_TOOL: &str = "get_weather";

/// Forecast entries are 3-hourly; eight of them cover the next day.
const FORECAST_ENTRIES: usize = 8;

fn default_units() -> String {
    "metric".to_string()
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    city: String,
    #[serde(default = "default_units")]
    units: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    sys: SysBlock,
    #[serde(default)]
    weather: Vec<DescriptionBlock>,
    main: MainBlock,
    wind: WindBlock,
    clouds: CloudsBlock,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: ForecastCity,
    list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt_txt: String,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<DescriptionBlock>,
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct DescriptionBlock {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    humidity: u32,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CloudsBlock {
    all: u32,
}

fn first_description(blocks: Vec<DescriptionBlock>) -> String {
    blocks
        .into_iter()
        .next()
        .map(|block| block.description)
        .unwrap_or_default()
}

/// Current conditions and forecasts from the OpenWeatherMap API.
pub struct WeatherTool {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherTool {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Errors from here carry the request URL, which includes `appid`;
    /// callers strip it with `without_url` before reporting.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        units: &str,
    ) -> Result<T, reqwest::Error> {
        debug!(endpoint, city, units, "querying weather API");
        let api_key = self.api_key.as_deref().unwrap_or_default();
        self.client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&[("q", city), ("appid", api_key), ("units", units)])
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await
    }

    pub async fn current(&self, city: &str, units: &str) -> ToolResult {
        match self.fetch::<CurrentResponse>("weather", city, units).await {
            Ok(data) => ToolResult::Success(ToolOutput::Weather(WeatherReport {
                city: data.name,
                country: data.sys.country,
                weather: WeatherConditions {
                    description: first_description(data.weather),
                    temperature: data.main.temp,
                    feels_like: data.main.feels_like,
                    humidity: data.main.humidity,
                    pressure: data.main.pressure,
                    wind_speed: data.wind.speed,
                    cloudiness: data.clouds.all,
                },
                units: units.to_string(),
            })),
            Err(e) => {
                let e = e.without_url();
                error!(city, error = %e, "Weather API error");
                ToolResult::Error(ToolFailure::for_city(e, city))
            }
        }
    }

    /// Next 24 hours of 3-hourly forecasts.
    pub async fn forecast(&self, city: &str, units: &str) -> ToolResult {
        match self.fetch::<ForecastResponse>("forecast", city, units).await {
            Ok(data) => ToolResult::Success(ToolOutput::Forecast(WeatherForecast {
                city: data.city.name,
                country: data.city.country,
                forecasts: data
                    .list
                    .into_iter()
                    .take(FORECAST_ENTRIES)
                    .map(|item| ForecastEntry {
                        datetime: item.dt_txt,
                        temperature: item.main.temp,
                        description: first_description(item.weather),
                        humidity: item.main.humidity,
                        wind_speed: item.wind.speed,
                    })
                    .collect(),
                units: units.to_string(),
            })),
            Err(e) => {
                let e = e.without_url();
                error!(city, error = %e, "Weather API error");
                ToolResult::Error(ToolFailure::for_city(e, city))
            }
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        WEATHER_TOOL
    }

    fn description(&self) -> &str {
        "Get current weather information for a city"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name (e.g., 'London', 'New York')"
                },
                "units": {
                    "type": "string",
                    "description": "Temperature units (metric, imperial)",
                    "default": "metric"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, params: &Map<String, Value>) -> Result<ToolResult, AgentError> {
        let params: WeatherParams = parse_params(self.name(), params)?;
        Ok(self.current(&params.city, &params.units).await)
    }
}
