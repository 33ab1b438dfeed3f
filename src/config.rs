use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils;

pub const DEFAULT_WEATHER_ENDPOINT: &str = "http://api.weatherapi.com/v1";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4";
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 800;
pub const DEFAULT_LOCATION: &str = "Singapore";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub weather_api_key: Option<String>,
    pub weather_endpoint: String,
    pub llm_endpoint: String,
    pub llm_model: String,
    pub llm_api_key: Option<String>,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub database_path: Option<PathBuf>,
    pub default_location: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            llm_endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_api_key: None,
            llm_temperature: DEFAULT_LLM_TEMPERATURE,
            llm_max_tokens: DEFAULT_LLM_MAX_TOKENS,
            database_path: None,
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl AppConfig {
    /// `config.json` from the data directory, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = read_config(&utils::config_path())?;
        config.apply_overrides(|name| env::var(name).ok());
        Ok(config)
    }

    /// Applies overrides from `lookup`, typically `std::env::var`. Blank
    /// values are ignored, as are numbers that fail to parse.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = get("WEATHER_API_KEY") {
            self.weather_api_key = Some(key);
        }
        if let Some(endpoint) = get("WEATHER_ENDPOINT") {
            self.weather_endpoint = endpoint;
        }
        if let Some(key) = get("LLM_API_KEY").or_else(|| get("OPENAI_API_KEY")) {
            self.llm_api_key = Some(key);
        }
        if let Some(endpoint) = get("LLM_ENDPOINT") {
            self.llm_endpoint = endpoint;
        }
        if let Some(model) = get("LLM_MODEL") {
            self.llm_model = model;
        }
        if let Some(temperature) = get("LLM_TEMPERATURE").and_then(|s| s.parse::<f32>().ok()) {
            self.llm_temperature = temperature;
        }
        if let Some(max_tokens) = get("LLM_MAX_TOKENS").and_then(|s| s.parse::<u32>().ok()) {
            self.llm_max_tokens = max_tokens;
        }
        if let Some(path) = get("EVENT_ADVISOR_DB") {
            self.database_path = Some(PathBuf::from(path));
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(utils::database_path)
    }
}

pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
