use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Derived summary of the transaction history.
///
/// Recomputed on every request, never persisted: the source of truth is
/// always the record sequence itself. All fields hold unrounded values;
/// two-decimal rounding happens only at presentation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Date of the most recent record
    pub as_of_date: NaiveDate,

    /// Date of the earliest record
    pub inception_date: NaiveDate,

    /// Total number of records summarized
    pub record_count: usize,

    /// Sum of all contributions
    pub total_invested: f64,

    /// Running balance of the most recent record
    pub current_balance: f64,

    /// current_balance − total_invested
    pub total_earnings: f64,

    /// Calendar-month span between first and last record date.
    /// Zero only when they share a date; distinct dates count at least one.
    pub duration_months: u32,

    /// total_earnings per month of duration. Equals total_earnings itself
    /// when the history spans a single date.
    pub average_monthly_earnings: f64,
}

/// Format a monetary value for display: `$1,234.56`.
/// Negative values render as `-$1,234.56`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as i64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as i64;

    // Group the integer part with thousands separators
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < -0.004 { "-" } else { "" };
    format!("{sign}${grouped}.{cents:02}")
}
