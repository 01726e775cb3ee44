use serde::{Deserialize, Serialize};

/// Tuning constants for insight generation.
///
/// The thresholds are inherited from the spreadsheet-era dashboard and have
/// no documented justification; they live here as configuration rather than
/// magic numbers so callers can adjust them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSettings {
    /// Relative change in earnings rate (recent third vs earliest third)
    /// beyond which the trend is reported as accelerating/decelerating.
    pub trend_change_threshold: f64,

    /// How many months forward the linear balance projection runs.
    pub projection_horizon_months: u32,

    /// Minimum number of records for the earnings-rate comparison.
    /// Below this, a third of the history is too short to rate.
    pub min_trend_records: usize,

    /// Minimum span in days before a compound growth rate is reported.
    pub min_growth_span_days: i64,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            trend_change_threshold: 0.10,
            projection_horizon_months: 12,
            min_trend_records: 6,
            min_growth_span_days: 30,
        }
    }
}
