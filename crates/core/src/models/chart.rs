use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single point of the combo chart: contribution bars over a balance line.
///
/// The core generates these — the frontend just renders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    /// The date for this data point
    pub date: NaiveDate,

    /// Total contributed on this date (bar height; same-day rows summed)
    pub investment: f64,

    /// Running balance as of this date (line value; last row of the day wins)
    pub total_balance: f64,

    /// Non-empty notes from this date's rows, for tooltip annotations
    pub notes: Vec<String>,
}

/// Per-calendar-month aggregate for coarser chart granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub year: i32,

    /// 1-based calendar month
    pub month: u32,

    /// Total contributed during the month
    pub invested: f64,

    /// Balance of the month's last record
    pub closing_balance: f64,
}
