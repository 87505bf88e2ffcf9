//! Report cards
//!
//! Server-side HTML for the interactive report: the metrics row (confidence
//! meter and risk badge) followed by one card per analysis section.

use html_escape::encode_text;

use crate::models::{AnalysisResult, ConfidenceScore, RiskLevel};
use crate::report::palette::Tier;
use crate::report::EMPTY_LIST_PLACEHOLDER;

/// Visual emphasis of a report card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardVariant {
    #[default]
    Default,
    Warning,
    Info,
}

/// Colors applied to one card variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub border: &'static str,
    pub background: &'static str,
    pub icon_background: &'static str,
    pub accent: &'static str,
}

impl CardVariant {
    pub const fn style(self) -> CardStyle {
        match self {
            CardVariant::Default => CardStyle {
                border: "rgba(148, 163, 184, 0.5)",
                background: "transparent",
                icon_background: "#e2e8f0",
                accent: "#64748b",
            },
            CardVariant::Warning => CardStyle {
                border: "rgba(218, 165, 32, 0.3)",
                background: "rgba(218, 165, 32, 0.05)",
                icon_background: "rgba(218, 165, 32, 0.1)",
                accent: "#daa520",
            },
            CardVariant::Info => CardStyle {
                border: "rgba(20, 100, 100, 0.3)",
                background: "rgba(20, 100, 100, 0.05)",
                icon_background: "rgba(20, 100, 100, 0.1)",
                accent: "#146464",
            },
        }
    }

    fn class(self) -> &'static str {
        match self {
            CardVariant::Default => "card",
            CardVariant::Warning => "card card-warning",
            CardVariant::Info => "card card-info",
        }
    }
}

pub enum CardBody<'a> {
    Text(&'a str),
    Items(&'a [String]),
}

pub struct Card<'a> {
    pub title: &'a str,
    pub body: CardBody<'a>,
    pub variant: CardVariant,
}

impl Card<'_> {
    pub fn to_html(&self) -> String {
        let style = self.variant.style();
        let mut html = format!(
            r#"<section class="{}" style="border-color:{};background:{}"><header><span class="card-icon" style="background:{}"></span><h3>{}</h3></header>"#,
            self.variant.class(),
            style.border,
            style.background,
            style.icon_background,
            encode_text(self.title)
        );

        match &self.body {
            CardBody::Text(text) => {
                html.push_str(&format!("<p>{}</p>", encode_text(text)));
            }
            CardBody::Items([]) => {
                html.push_str(&format!(r#"<p class="muted"><em>{}</em></p>"#, EMPTY_LIST_PLACEHOLDER));
            }
            CardBody::Items(items) => {
                html.push_str("<ul>");
                for item in items.iter() {
                    html.push_str(&format!(
                        r#"<li><span class="dot" style="background:{}"></span><span>{}</span></li>"#,
                        style.accent,
                        encode_text(item)
                    ));
                }
                html.push_str("</ul>");
            }
        }

        html.push_str("</section>");
        html
    }
}

pub fn confidence_label(score: ConfidenceScore) -> &'static str {
    match Tier::from_score(score) {
        Tier::Success => "High Confidence",
        Tier::Warning => "Moderate Confidence",
        Tier::Danger => "Low Confidence",
    }
}

/// Score, label and a bar filled to the score's percentage.
pub fn confidence_meter(score: ConfidenceScore) -> String {
    let color = Tier::from_score(score).color().hex();
    format!(
        concat!(
            r#"<div class="meter"><div class="meter-head"><span class="meter-score">{score}</span>"#,
            r#"<span class="muted">{label}</span></div>"#,
            r#"<div class="meter-track"><div class="meter-fill" style="width:{score}%;background:{color}"></div></div>"#,
            r#"<div class="meter-scale"><span>0</span><span>50</span><span>100</span></div></div>"#
        ),
        score = score,
        label = confidence_label(score),
        color = color
    )
}

pub fn risk_badge(level: RiskLevel) -> String {
    let color = Tier::from_risk(level).color().hex();
    let symbol = match level {
        RiskLevel::Low => "&#10003;",
        RiskLevel::Medium => "&#9888;",
        RiskLevel::High => "&#10007;",
    };
    format!(
        r#"<span class="risk-badge" style="color:{color};border-color:{color}">{symbol} {level} Risk</span>"#,
        color = color,
        symbol = symbol,
        level = level
    )
}

/// The complete report fragment inserted into the page after an analysis.
pub fn report_cards(analysis: &AnalysisResult) -> String {
    let cards = [
        Card {
            title: "Decision Summary",
            body: CardBody::Text(&analysis.decision_summary),
            variant: CardVariant::Info,
        },
        Card {
            title: "Assumptions",
            body: CardBody::Items(&analysis.assumptions),
            variant: CardVariant::Default,
        },
        Card {
            title: "Hidden Cognitive Biases",
            body: CardBody::Items(&analysis.hidden_biases),
            variant: CardVariant::Warning,
        },
        Card {
            title: "Missing Information",
            body: CardBody::Items(&analysis.missing_information),
            variant: CardVariant::Default,
        },
        Card {
            title: "Alternative Decision Paths",
            body: CardBody::Items(&analysis.alternative_decision_paths),
            variant: CardVariant::Info,
        },
    ];

    let mut html = String::from(r#"<div class="report">"#);
    html.push_str(r#"<div class="metrics">"#);
    html.push_str(&format!(
        r#"<section class="card"><header><h3>Confidence Score</h3></header>{}</section>"#,
        confidence_meter(analysis.confidence_score)
    ));
    html.push_str(&format!(
        r#"<section class="card"><header><h3>Risk Assessment</h3></header><div class="center">{}</div></section>"#,
        risk_badge(analysis.risk_level)
    ));
    html.push_str("</div>");
    for card in &cards {
        html.push_str(&card.to_html());
    }
    html.push_str("</div>");
    html
}
