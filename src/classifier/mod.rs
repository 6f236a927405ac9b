//! Recipe classifier client
//!
//! One POST per classification to an OpenAI-compatible chat-completion
//! endpoint (OpenRouter by default):
//! - build the payload from the recipe
//! - send it with bearer auth
//! - map non-success statuses to `RemoteService`
//! - take `choices[0].message.content` and parse it best-effort
//!
//! There are no retries and no caching; every call is one user action.

mod types;

use crate::config::Config;
use crate::error::{ChefSortError, Result};
use chefsort_common::{build_chat_request, parse_classification, ChatRequest, Classification, Recipe};
use reqwest::Client;
use types::ChatCompletionResponse;

/// User agent string identifying this client
const USER_AGENT: &str = concat!("chefsort/", env!("CARGO_PKG_VERSION"));

/// Value of the `X-Title` attribution header
const APP_TITLE: &str = "ChefSort";

pub struct RecipeClassifier {
    http: Client,
    endpoint: String,
    model: String,
    referer: String,
}

impl RecipeClassifier {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            referer: config.referer.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Classify one recipe
    pub async fn classify(&self, api_key: &str, recipe: &Recipe) -> Result<Classification> {
        let request = build_chat_request(&self.model, recipe);
        let content = self.complete(api_key, &request).await?;

        let classification = parse_classification(&content);
        if !classification.is_structured() {
            tracing::warn!(title = %recipe.title, "AI reply was not a JSON object, showing raw text");
        }
        Ok(classification)
    }

    /// Send a chat request and return the first choice's text
    pub async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, model = %request.model, "Calling chat-completion API");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = %status, bytes = body.len(), "Chat-completion API responded");

        if !status.is_success() {
            tracing::warn!(status = %status, "Chat-completion API returned an error status");
            return Err(ChefSortError::RemoteService {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(status.as_u16(), &body)
    }
}

/// Message text of the first choice in a success body
pub fn extract_content(status: u16, body: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let parsed: ChatCompletionResponse =
        serde_json::from_value(value).map_err(|e| ChefSortError::UnexpectedResponseShape {
            reason: e.to_string(),
            body: body.to_string(),
        })?;

    if let Some(error) = parsed.error {
        tracing::warn!(message = ?error.message(), "Chat-completion API reported an error in a success body");
        return Err(ChefSortError::RemoteService {
            status: error.status().unwrap_or(status),
            body: body.to_string(),
        });
    }

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| ChefSortError::UnexpectedResponseShape {
            reason: "no message content in first choice".into(),
            body: body.to_string(),
        })
}
