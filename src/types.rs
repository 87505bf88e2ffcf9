// Type definitions and enums

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use crate::report::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LLMProvider {
    Gateway,
    OpenRouter,
    OpenAI,
}

impl LLMProvider {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "gateway" => Some(LLMProvider::Gateway),
            "openrouter" => Some(LLMProvider::OpenRouter),
            "openai" => Some(LLMProvider::OpenAI),
            _ => None,
        }
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Gateway => write!(f, "gateway"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::OpenAI => write!(f, "openai"),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LLMMessage {
    pub role: String, // "user", "assistant", "system"
    pub content: String,
}

impl LLMMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    /// Empty when the upstream returned no message content.
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream rate limit exceeded")]
    RateLimited,

    #[error("Upstream credits exhausted")]
    CreditsExhausted,

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("LLM returned no content")]
    EmptyCompletion,

    #[error("Malformed analysis JSON: {0}")]
    MalformedAnalysis(String),

    #[error("Analysis is missing field `{0}`")]
    IncompleteAnalysis(String),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::CreditsExhausted => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the end user. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidRequest(message) => message.clone(),
            AppError::Configuration(_) => "AI service not configured".to_string(),
            AppError::RateLimited => "Rate limit exceeded. Please try again in a moment.".to_string(),
            AppError::CreditsExhausted => "AI credits exhausted. Please add credits to continue.".to_string(),
            AppError::LLMApi(_) => "Failed to analyze decision".to_string(),
            AppError::EmptyCompletion => "Invalid response from AI".to_string(),
            AppError::MalformedAnalysis(_) => "Failed to parse analysis result".to_string(),
            AppError::IncompleteAnalysis(_) => "Incomplete analysis result".to_string(),
            AppError::Report(_) => "Unable to generate PDF. Please try again.".to_string(),
            AppError::Internal(message) => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
