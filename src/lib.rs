pub mod advisor;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod db;
pub mod format;
pub mod llm;
pub mod logging;
pub mod models;
pub mod query;
mod utils;
pub mod weather;

use anyhow::Context;

use config::AppConfig;
use coordinator::Coordinator;
use db::Store;
use llm::LLMComposer;
use weather::WeatherApiClient;

pub use coordinator::{Recommendation, RecommendationRequest, NO_EVENTS_MESSAGE};
pub use models::{Category, EventRecord, QueryCriteria, TimeOfDay, WeatherSnapshot};

/// Opens the catalog named by `config`.
pub fn open_store(config: &AppConfig) -> anyhow::Result<Store> {
    let path = config.database_path();
    Store::open(&path).with_context(|| format!("unable to open event catalog at {}", path.display()))
}

/// Rebuilds the catalog with the sample events and returns how many were stored.
pub fn setup_catalog(config: &AppConfig) -> anyhow::Result<usize> {
    let mut store = open_store(config)?;
    let count = store
        .rebuild(&db::sample_events())
        .context("failed to rebuild event catalog")?;
    Ok(count)
}

/// Wires the WeatherAPI client, the SQLite catalog and the chat-completions
/// composer from `config`.
pub fn build_coordinator(config: &AppConfig) -> anyhow::Result<Coordinator> {
    let weather = WeatherApiClient::from_config(config).context("weather provider not configured")?;
    let store = open_store(config)?;
    let composer = LLMComposer::from_config(config);
    Ok(Coordinator::new(
        Box::new(weather),
        Box::new(store),
        Box::new(composer),
    ))
}
