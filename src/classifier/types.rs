//! Chat-completion response body
//!
//! Only the fields we read. OpenRouter may answer 200 with an `error`
//! instead of `choices`, either an object or a bare message string.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiError {
    Detailed {
        #[serde(default)]
        code: Option<Value>,
        #[serde(default)]
        message: Option<String>,
    },
    Message(String),
}

impl ApiError {
    /// Numeric code as an HTTP-style status, when it is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Detailed { code, .. } => code
                .as_ref()
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok()),
            ApiError::Message(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Detailed { message, .. } => message.as_deref(),
            ApiError::Message(message) => Some(message),
        }
    }
}
