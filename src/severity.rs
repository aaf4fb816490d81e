//! Severity banding for 0–10 symptom values, used by the result views.

use serde::Serialize;

/// Display band for a symptom rating: 0–3 low, 4–6 medium, 7–10 high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Band for a rating. Inputs above 10 are prevented by validation; they
    /// classify as high rather than panicking.
    pub fn from_value(value: u8) -> Self {
        match value {
            0..=3 => Severity::Low,
            4..=6 => Severity::Medium,
            _ => Severity::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Presentation color token, matching the original banding.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Low => "green",
            Severity::Medium => "yellow",
            Severity::High => "red",
        }
    }
}
