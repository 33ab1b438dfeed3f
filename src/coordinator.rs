use thiserror::Error;
use tracing::{info, warn};

use crate::advisor;
use crate::catalog::{CatalogError, EventCatalog};
use crate::format;
use crate::llm::{ComposeError, RecommendationGenerator};
use crate::models::{QueryCriteria, RecommendationContext};
use crate::query;
use crate::weather::{WeatherError, WeatherProvider};

pub const NO_EVENTS_MESSAGE: &str = "No events found matching your criteria for this date.";

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Weather API error: {0}")]
    Weather(#[from] WeatherError),
    #[error("Database error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Recommendation error: {0}")]
    Recommendation(#[from] ComposeError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Ready(String),
    NoEvents,
}

#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub location: String,
    pub criteria: QueryCriteria,
}

/// Weather lookup, event query, rendering and generation for one request.
pub struct Coordinator {
    weather: Box<dyn WeatherProvider>,
    catalog: Box<dyn EventCatalog>,
    generator: Box<dyn RecommendationGenerator>,
}

struct Prepared {
    weather_block: String,
    context_text: String,
}

impl Coordinator {
    pub fn new(
        weather: Box<dyn WeatherProvider>,
        catalog: Box<dyn EventCatalog>,
        generator: Box<dyn RecommendationGenerator>,
    ) -> Self {
        Self {
            weather,
            catalog,
            generator,
        }
    }

    /// The weather block followed by the generator's answer.
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation, RecommendError> {
        let Some(prepared) = self.prepare(request)? else {
            return Ok(Recommendation::NoEvents);
        };

        info!("generating personalized recommendations");
        let answer = self
            .generator
            .generate(&prepared.context_text, format::RECOMMENDATION_INSTRUCTIONS)?;

        Ok(Recommendation::Ready(format!("{}\n{}", prepared.weather_block, answer)))
    }

    /// The rendered context document, without calling the generator.
    pub fn preview(&self, request: &RecommendationRequest) -> Result<Recommendation, RecommendError> {
        Ok(match self.prepare(request)? {
            Some(prepared) => Recommendation::Ready(prepared.context_text),
            None => Recommendation::NoEvents,
        })
    }

    /// Text for the user: the recommendation, the no-events message, or a
    /// single `Error: ...` line.
    pub fn respond(&self, request: &RecommendationRequest) -> String {
        into_text(self.recommend(request))
    }

    pub fn respond_preview(&self, request: &RecommendationRequest) -> String {
        into_text(self.preview(request))
    }

    fn prepare(&self, request: &RecommendationRequest) -> Result<Option<Prepared>, RecommendError> {
        let criteria = &request.criteria;
        info!(location = %request.location, date = %criteria.date, "fetching weather data");
        let weather = self.weather.fetch(&request.location, criteria.date)?;

        let (clothing, transport) = match &weather {
            Some(snapshot) => (
                advisor::clothing_suggestions(snapshot.temperature_c, &snapshot.condition),
                advisor::transport_suggestion(snapshot.temperature_c, &snapshot.condition).to_string(),
            ),
            None => {
                warn!(location = %request.location, "weather snapshot unavailable, skipping advice");
                (Vec::new(), advisor::TRANSPORT_UNAVAILABLE.to_string())
            }
        };

        info!("fetching events");
        let events = query::query_events(self.catalog.as_ref(), criteria)?;
        if events.is_empty() {
            info!(date = %criteria.date, "no events matched");
            return Ok(None);
        }

        let context = RecommendationContext {
            weather,
            clothing,
            transport,
            grouped_events: query::group_by_time_of_day(events),
            location: request.location.clone(),
            date: criteria.date,
        };

        Ok(Some(Prepared {
            weather_block: format::render_weather(&context),
            context_text: format::render_context(&context),
        }))
    }
}

fn into_text(result: Result<Recommendation, RecommendError>) -> String {
    match result {
        Ok(Recommendation::Ready(text)) => text,
        Ok(Recommendation::NoEvents) => NO_EVENTS_MESSAGE.to_string(),
        Err(err) => {
            warn!("recommendation failed: {err}");
            let message = err.to_string().replace(['\r', '\n'], " ");
            format!("Error: {message}")
        }
    }
}
