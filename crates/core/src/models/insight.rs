use serde::{Deserialize, Serialize};

/// Category of a generated insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightKind {
    /// Returns achieved so far (ROI, monthly performance)
    Performance,
    /// How the earnings rate is moving over time
    Trend,
    /// How contributions split across account types
    Distribution,
    /// Forward-looking estimates
    Projection,
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightKind::Performance => write!(f, "Performance"),
            InsightKind::Trend => write!(f, "Trend"),
            InsightKind::Distribution => write!(f, "Distribution"),
            InsightKind::Projection => write!(f, "Projection"),
        }
    }
}

/// Direction of the earnings-rate trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Accelerating,
    Decelerating,
    Steady,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Accelerating => write!(f, "accelerating"),
            TrendDirection::Decelerating => write!(f, "decelerating"),
            TrendDirection::Steady => write!(f, "steady"),
        }
    }
}

/// A single derived observation about the portfolio, ready for display.
///
/// The text is fully rendered by the core — the frontend just shows it.
/// The numeric payload carries the headline figure unrounded so callers can
/// re-format or chart it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// Which family of observation this is
    pub kind: InsightKind,

    /// Rendered, human-readable text
    pub text: String,

    /// The headline number behind the text (a percentage, dollar amount,
    /// or year count — see the producing method for which)
    pub value: f64,
}

impl Insight {
    pub fn new(kind: InsightKind, text: impl Into<String>, value: f64) -> Self {
        Self {
            kind,
            text: text.into(),
            value,
        }
    }
}
