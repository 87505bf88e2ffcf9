use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::DecisionAnalyst;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyst: Arc<DecisionAnalyst>,
}

// Core models shared by the proxy, the UI and the report renderer

/// Confidence that a decision was well reasoned, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ConfidenceScore(u8);

impl ConfidenceScore {
    pub const MAX: u8 = 100;

    /// Round and clamp an arbitrary number into range. Non-finite input maps to 0.
    pub fn clamped(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self(0);
        }
        Self(raw.round().clamp(0.0, Self::MAX as f64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ConfidenceScore {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(format!("confidence_score {} is outside 0..=100", value))
        }
    }
}

impl From<ConfidenceScore> for u8 {
    fn from(score: ConfidenceScore) -> Self {
        score.0
    }
}

impl fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Exact, case-sensitive match on the three known levels.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured critique of one decision.
///
/// Produced once per analysis request, read by the report cards and the PDF
/// renderer, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub decision_summary: String,
    pub assumptions: Vec<String>,
    pub hidden_biases: Vec<String>,
    pub missing_information: Vec<String>,
    pub alternative_decision_paths: Vec<String>,
    pub confidence_score: ConfidenceScore,
    pub risk_level: RiskLevel,
}

// API Request/Response types

/// Body of an analysis request.
///
/// Field types are not enforced here: a non-string `decision` reads as empty
/// and is refused as blank by the analyst, a non-string `context` keeps its
/// JSON text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionInput {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub decision: String,
    #[serde(default, deserialize_with = "text_or_json")]
    pub context: Option<String>,
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}

fn text_or_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}
