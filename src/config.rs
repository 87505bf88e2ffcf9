use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::env;

use crate::types::LLMProvider;

pub const DEFAULT_PRODUCT_NAME: &str = "Decision Trace Engine";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// `["*"]` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    pub provider: LLMProvider,
    pub model: String,
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

// Keeps the API key out of `info!("{:?}", config)`.
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub product_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 3000,
                host: "0.0.0.0".to_string(),
                cors_allowed_origins: vec!["*".to_string()],
            },
            llm: LLMConfig {
                api_key: None,
                provider: LLMProvider::Gateway,
                model: "google/gemini-2.5-flash".to_string(),
                base_url: None,
                request_timeout_secs: 60,
            },
            report: ReportConfig {
                product_name: DEFAULT_PRODUCT_NAME.to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let provider_name = env::var("AI_PROVIDER").unwrap_or_else(|_| defaults.llm.provider.to_string());
        let provider = LLMProvider::parse(&provider_name)
            .ok_or_else(|| anyhow!("Unsupported AI_PROVIDER: {}", provider_name))?;

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| defaults.server.port.to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|raw| parse_origins(&raw))
                    .unwrap_or(defaults.server.cors_allowed_origins),
            },
            llm: LLMConfig {
                api_key: env::var("AI_GATEWAY_API_KEY").ok().filter(|key| !key.trim().is_empty()),
                provider,
                model: env::var("AI_MODEL").unwrap_or(defaults.llm.model),
                base_url: env::var("AI_GATEWAY_URL").ok(),
                request_timeout_secs: env::var("AI_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| defaults.llm.request_timeout_secs.to_string())
                    .parse()?,
            },
            report: ReportConfig {
                product_name: env::var("REPORT_PRODUCT_NAME").unwrap_or(defaults.report.product_name),
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_empty() {
        assert_eq!(
            parse_origins(" http://localhost:5173, ,http://localhost:3000 "),
            vec!["http://localhost:5173".to_string(), "http://localhost:3000".to_string()]
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.provider, LLMProvider::Gateway);
        assert_eq!(config.report.product_name, "Decision Trace Engine");
    }
}
