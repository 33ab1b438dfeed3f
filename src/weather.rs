use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::WeatherSnapshot;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("missing weather API key")]
    MissingKey,
    #[error("{0}")]
    Http(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Source of current conditions for a location.
pub trait WeatherProvider {
    /// `Ok(None)` means the provider answered but without usable conditions.
    fn fetch(&self, location: &str, date: NaiveDate) -> Result<Option<WeatherSnapshot>, WeatherError>;
}

const USER_AGENT: &str = "event-advisor/0.1";

pub struct WeatherApiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl WeatherApiClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, WeatherError> {
        let api_key = config
            .weather_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(WeatherError::MissingKey)?
            .to_string();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| WeatherError::Http(err.to_string()))?;

        Ok(Self {
            base_url: config.weather_endpoint.clone(),
            api_key,
            client,
        })
    }
}

impl WeatherProvider for WeatherApiClient {
    fn fetch(&self, location: &str, date: NaiveDate) -> Result<Option<WeatherSnapshot>, WeatherError> {
        // current conditions only; the date is not sent upstream
        let url = format!("{}/current.json", self.base_url.trim_end_matches('/'));
        debug!(%location, %date, %url, "requesting current weather");

        let response = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("q", location), ("aqi", "no")])
            .send()
            .map_err(|err| WeatherError::Http(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| WeatherError::Http(err.to_string()))?;
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_current(&body)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentDoc {
    temp_c: f64,
    feelslike_c: Option<f64>,
    humidity: Option<i64>,
    wind_kph: Option<f64>,
    condition: ConditionDoc,
}

#[derive(Debug, Deserialize)]
struct ConditionDoc {
    text: String,
}

/// Body must be JSON; a missing or malformed `current` block is tolerated.
pub fn parse_current(body: &str) -> Result<Option<WeatherSnapshot>, WeatherError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| WeatherError::Decode(err.to_string()))?;

    let current = match value.get("current") {
        Some(current) => current.clone(),
        None => {
            warn!("weather response has no current conditions");
            return Ok(None);
        }
    };

    match serde_json::from_value::<CurrentDoc>(current) {
        Ok(doc) => Ok(Some(WeatherSnapshot {
            temperature_c: doc.temp_c,
            feels_like_c: doc.feelslike_c.unwrap_or(doc.temp_c),
            condition: doc.condition.text,
            humidity_percent: doc.humidity,
            wind_kph: doc.wind_kph,
        })),
        Err(err) => {
            warn!("weather response has malformed current conditions: {err}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_conditions() {
        let body = r#"{
            "location": {"name": "Singapore"},
            "current": {
                "temp_c": 31.0,
                "feelslike_c": 37.2,
                "humidity": 70,
                "wind_kph": 11.2,
                "condition": {"text": "Partly cloudy", "code": 1003}
            }
        }"#;
        let snapshot = parse_current(body)
            .expect("valid body")
            .expect("current conditions");
        assert_eq!(snapshot.temperature_c, 31.0);
        assert_eq!(snapshot.feels_like_c, 37.2);
        assert_eq!(snapshot.condition, "Partly cloudy");
        assert_eq!(snapshot.humidity_percent, Some(70));
        assert_eq!(snapshot.wind_kph, Some(11.2));
    }

    #[test]
    fn feels_like_defaults_to_temperature() {
        let body = r#"{"current": {"temp_c": 12.5, "condition": {"text": "Mist"}}}"#;
        let snapshot = parse_current(body)
            .expect("valid body")
            .expect("current conditions");
        assert_eq!(snapshot.feels_like_c, 12.5);
        assert_eq!(snapshot.humidity_percent, None);
        assert_eq!(snapshot.wind_kph, None);
    }

    #[test]
    fn missing_or_malformed_current_degrades() {
        assert_eq!(parse_current(r#"{"error": "none"}"#).expect("json"), None);
        assert_eq!(
            parse_current(r#"{"current": {"condition": {"text": "Sunny"}}}"#).expect("json"),
            None
        );
    }

    #[test]
    fn non_json_body_is_an_error() {
        let err = parse_current("<html>bad gateway</html>").expect_err("not json");
        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[test]
    fn client_requires_api_key() {
        let config = AppConfig::default();
        assert!(matches!(
            WeatherApiClient::from_config(&config),
            Err(WeatherError::MissingKey)
        ));
    }
}
