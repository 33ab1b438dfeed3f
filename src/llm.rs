use reqwest::blocking::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("composer unavailable: {0}")]
    Unavailable(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("LLM response missing content")]
    EmptyResponse,
}

/// Turns a rendered context document into recommendation text.
pub trait RecommendationGenerator {
    fn generate(&self, context: &str, instructions: &str) -> Result<String, ComposeError>;
}

const SYSTEM_PROMPT: &str = "You are an event recommender. Provide CONCISE, bulleted recommendations.

RULES:
1. Use simple bullet points (•) for each event
2. Each recommendation: 1-2 sentences MAX
3. Format: Event name, time, brief reason why
4. Mention if booking urgency (limited spots)
5. Consider weather for indoor vs outdoor
6. Be direct and concise - no long explanations
7. Use emojis sparingly (only for urgency 🔴 or free 🎉)

Example format:
• Morning Yoga (6:00-7:30) - Great outdoor start to the day, only 8 spots left
• Art Exhibition (10:00-18:00) - Indoor option if weather turns, free entry
• Summer Concert (18:00-22:00) - Evening outdoor event, 120 spots available

Keep it SHORT and ACTIONABLE.";

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct LLMComposer {
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl LLMComposer {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.llm_model.clone(),
            base_url: config.llm_endpoint.clone(),
            api_key: config
                .llm_api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            client: Client::new(),
        }
    }

    fn payload(&self, context: &str, instructions: &str) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "system",
                    "content": SYSTEM_PROMPT,
                },
                {
                    "role": "user",
                    "content": build_user_prompt(context, instructions),
                }
            ],
        })
    }
}

impl RecommendationGenerator for LLMComposer {
    fn generate(&self, context: &str, instructions: &str) -> Result<String, ComposeError> {
        let base = self.base_url.trim_end_matches('/');
        let url = format!("{}/chat/completions", base);
        debug!(%url, model = %self.model, "requesting recommendations");

        let mut request = self.client.post(url).json(&self.payload(context, instructions));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .map_err(|err| ComposeError::Unavailable(err.to_string()))?;

        let status = response.status();
        let text_body = response
            .text()
            .map_err(|err| ComposeError::Unavailable(err.to_string()))?;

        if !status.is_success() {
            return Err(ComposeError::Status {
                status: status.as_u16(),
                body: text_body,
            });
        }

        extract_content(&text_body)
    }
}

fn build_user_prompt(context: &str, instructions: &str) -> String {
    format!("{context}\n\n{instructions}")
}

fn extract_content(body: &str) -> Result<String, ComposeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| ComposeError::Unavailable(err.to_string()))?;

    value
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ComposeError::EmptyResponse)
}
