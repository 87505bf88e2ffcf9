//! Decision Analyst
//!
//! Forwards a decision to the configured LLM with a fixed auditing prompt and
//! turns the reply into an [`AnalysisResult`]:
//! - strips markdown code fences around the JSON
//! - requires all seven fields to be present
//! - rounds and clamps `confidence_score` into `0..=100`
//! - coerces an unknown `risk_level` to `Medium`

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::config::LLMConfig;
use crate::llm::provider::{adapter_from_config, LLMAdapter};
use crate::models::{AnalysisResult, ConfidenceScore, DecisionInput, RiskLevel};
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};

pub const SYSTEM_PROMPT: &str = r#"You are a neutral, analytical decision auditor. Your role is to critically examine human decisions and expose their reasoning quality.

Guidelines:
- Be analytical, skeptical, and concise
- Penalize overconfidence in your scoring
- Identify cognitive biases explicitly by name (e.g., confirmation bias, sunk cost fallacy, availability heuristic)
- Avoid emotional, supportive, or validating language
- Focus on gaps in reasoning, not on reassurance
- Be direct about risks and missing information

You must return ONLY valid JSON matching this exact structure:
{
  "decision_summary": "A neutral 1-2 sentence summary of the decision made",
  "assumptions": ["List of unstated assumptions underlying this decision"],
  "hidden_biases": ["List of cognitive biases that may have influenced this decision, named specifically"],
  "missing_information": ["List of critical information that was not considered or is unknown"],
  "alternative_decision_paths": ["List of alternative approaches that could have been considered"],
  "confidence_score": <number 0-100 representing how well-reasoned this decision is>,
  "risk_level": "Low | Medium | High"
}

Scoring guidelines for confidence_score:
- 0-30: Poorly reasoned, significant biases, major gaps
- 31-50: Some valid reasoning but notable weaknesses
- 51-70: Reasonably sound with moderate concerns
- 71-85: Well-reasoned with minor gaps
- 86-100: Exceptionally thorough (rare - require extraordinary evidence)

Risk level guidelines:
- Low: Decision is easily reversible, limited downside
- Medium: Moderate consequences, some reversibility
- High: Significant stakes, difficult to reverse, major potential impact

Return ONLY the JSON object, no additional text or markdown."#;

pub const REQUIRED_FIELDS: [&str; 7] = [
    "decision_summary",
    "assumptions",
    "hidden_biases",
    "missing_information",
    "alternative_decision_paths",
    "confidence_score",
    "risk_level",
];

const LOG_PREVIEW_CHARS: usize = 100;

pub struct DecisionAnalyst {
    adapter: Option<Arc<dyn LLMAdapter>>,
    model: String,
}

impl DecisionAnalyst {
    pub fn new(adapter: Arc<dyn LLMAdapter>, model: impl Into<String>) -> Self {
        Self {
            adapter: Some(adapter),
            model: model.into(),
        }
    }

    /// An analyst without an API key still starts; every request then fails
    /// with a configuration error.
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let adapter = match adapter_from_config(config) {
            Ok(adapter) => Some(adapter),
            Err(AppError::Configuration(reason)) => {
                warn!(reason = %reason, "AI service not configured, analysis requests will fail");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            adapter,
            model: config.model.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.adapter.is_some()
    }

    pub async fn analyze(&self, input: &DecisionInput) -> AppResult<AnalysisResult> {
        let decision = input.decision.trim();
        if decision.is_empty() {
            return Err(AppError::InvalidRequest("Decision description is required".to_string()));
        }

        let adapter = self.adapter.as_ref().ok_or_else(|| {
            error!("AI_GATEWAY_API_KEY is not configured");
            AppError::Configuration("AI_GATEWAY_API_KEY is not configured".to_string())
        })?;

        let message = user_message(decision, input.context.as_deref());
        let preview: String = message.chars().take(LOG_PREVIEW_CHARS).collect();
        info!(model = %self.model, "Analyzing decision: {}...", preview);

        let request = LLMRequest {
            model: self.model.clone(),
            messages: vec![LLMMessage::system(SYSTEM_PROMPT), LLMMessage::user(message)],
        };

        let response = adapter.create_chat_completion(&request).await?;
        if response.content.trim().is_empty() {
            error!(finish_reason = %response.finish_reason, "No content in AI response");
            return Err(AppError::EmptyCompletion);
        }

        let analysis = parse_analysis(&response.content).map_err(|e| {
            error!(error = %e, content = %response.content, "Failed to parse AI response");
            e
        })?;

        info!(
            confidence = analysis.confidence_score.value(),
            risk = %analysis.risk_level,
            "Analysis complete"
        );
        Ok(analysis)
    }
}

/// `Decision: <d>` plus `Additional Context: <c>` when context is given.
pub fn user_message(decision: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("Decision: {}\n\nAdditional Context: {}", decision, context),
        None => format!("Decision: {}", decision),
    }
}

/// Remove a leading ```` ```json ```` or ```` ``` ```` fence and a trailing ```` ``` ````.
pub fn strip_code_fences(content: &str) -> &str {
    let mut clean = content.trim();
    if let Some(rest) = clean.strip_prefix("```json") {
        clean = rest;
    }
    if let Some(rest) = clean.strip_prefix("```") {
        clean = rest;
    }
    if let Some(rest) = clean.strip_suffix("```") {
        clean = rest;
    }
    clean.trim()
}

/// Validate and normalize the model's JSON reply.
pub fn parse_analysis(content: &str) -> AppResult<AnalysisResult> {
    let value: Value = serde_json::from_str(strip_code_fences(content))
        .map_err(|e| AppError::MalformedAnalysis(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| AppError::MalformedAnalysis("expected a JSON object".to_string()))?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !object.contains_key(**field)) {
        error!(field = %missing, "Missing field in analysis");
        return Err(AppError::IncompleteAnalysis(missing.to_string()));
    }

    Ok(AnalysisResult {
        decision_summary: text_field(&object["decision_summary"]),
        assumptions: list_field(object, "assumptions")?,
        hidden_biases: list_field(object, "hidden_biases")?,
        missing_information: list_field(object, "missing_information")?,
        alternative_decision_paths: list_field(object, "alternative_decision_paths")?,
        confidence_score: score_field(&object["confidence_score"])?,
        risk_level: risk_field(&object["risk_level"]),
    })
}

fn text_field(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn list_field(object: &Map<String, Value>, field: &str) -> AppResult<Vec<String>> {
    match &object[field] {
        Value::Array(items) => Ok(items.iter().map(text_field).collect()),
        Value::Null => Ok(Vec::new()),
        Value::String(single) => Ok(vec![single.clone()]),
        _ => Err(AppError::MalformedAnalysis(format!("`{}` must be a list of strings", field))),
    }
}

fn score_field(value: &Value) -> AppResult<ConfidenceScore> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.map(ConfidenceScore::clamped)
        .ok_or_else(|| AppError::MalformedAnalysis("`confidence_score` must be a number".to_string()))
}

fn risk_field(value: &Value) -> RiskLevel {
    match value.as_str().and_then(RiskLevel::parse) {
        Some(level) => level,
        None => {
            warn!(risk_level = %value, "Unknown risk level, using Medium");
            RiskLevel::Medium
        }
    }
}
