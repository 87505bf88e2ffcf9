//! Colors shared by the PDF report and the HTML report cards.

use crate::models::{ConfidenceScore, RiskLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to the `0.0..=1.0` range PDF color operators expect.
    pub fn unit(self) -> [f32; 3] {
        [self.0 as f32 / 255.0, self.1 as f32 / 255.0, self.2 as f32 / 255.0]
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const SUCCESS: Rgb = Rgb(34, 139, 34);
pub const WARNING: Rgb = Rgb(218, 165, 32);
pub const DANGER: Rgb = Rgb(178, 34, 34);

pub const TITLE: Rgb = Rgb(20, 80, 80);
pub const TIMESTAMP: Rgb = Rgb(100, 100, 100);
pub const METRICS_FILL: Rgb = Rgb(240, 245, 245);
pub const HEADING: Rgb = Rgb(40, 40, 40);
pub const BODY: Rgb = Rgb(60, 60, 60);
pub const MUTED: Rgb = Rgb(150, 150, 150);

pub const ACCENT_PRIMARY: Rgb = Rgb(20, 100, 100);
pub const ACCENT_NEUTRAL: Rgb = Rgb(100, 100, 100);
pub const ACCENT_CAUTION: Rgb = Rgb(180, 120, 40);

/// Three-level quality scale used wherever a score or a risk level is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Success,
    Warning,
    Danger,
}

impl Tier {
    pub fn from_score(score: ConfidenceScore) -> Self {
        match score.value() {
            70.. => Tier::Success,
            40.. => Tier::Warning,
            _ => Tier::Danger,
        }
    }

    pub fn from_risk(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Tier::Success,
            RiskLevel::Medium => Tier::Warning,
            RiskLevel::High => Tier::Danger,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Tier::Success => SUCCESS,
            Tier::Warning => WARNING,
            Tier::Danger => DANGER,
        }
    }
}
