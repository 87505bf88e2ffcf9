use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::LLMConfig;
use crate::llm::gateway::ChatGatewayAdapter;
use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Default chat-completions base URL of each provider.
pub fn default_base_url(provider: LLMProvider) -> &'static str {
    match provider {
        LLMProvider::Gateway => "https://ai.gateway.lovable.dev/v1",
        LLMProvider::OpenRouter => "https://openrouter.ai/api/v1",
        LLMProvider::OpenAI => "https://api.openai.com/v1",
    }
}

/// Build the adapter for the configured provider.
///
/// Every supported provider speaks the OpenAI-compatible chat completions
/// protocol, so they differ only in base URL. A missing API key is reported
/// as a configuration error at call time.
pub fn adapter_from_config(config: &LLMConfig) -> AppResult<Arc<dyn LLMAdapter>> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| AppError::Configuration("AI_GATEWAY_API_KEY is not configured".to_string()))?;
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| default_base_url(config.provider).to_string());

    let adapter = ChatGatewayAdapter::new(&api_key, &base_url, Duration::from_secs(config.request_timeout_secs))?;
    Ok(Arc::new(adapter))
}
