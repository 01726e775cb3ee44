use chrono::{Datelike, NaiveDate};

use crate::errors::CoreError;
use crate::models::snapshot::PortfolioSnapshot;
use crate::models::transaction::TransactionRecord;

/// Computes the derived portfolio summary from the transaction history.
///
/// Pure arithmetic over an in-memory slice — no I/O, no shared state.
/// Accumulation is done on raw values; rounding is left to presentation.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Compute a full snapshot of the history.
    ///
    /// Records must be sorted by date ascending (the ledger guarantees this).
    /// Fails with `EmptyHistory` when there is nothing to summarize.
    pub fn snapshot(
        &self,
        records: &[TransactionRecord],
    ) -> Result<PortfolioSnapshot, CoreError> {
        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(CoreError::EmptyHistory),
        };

        let total_invested: f64 = records.iter().map(|r| r.investment).sum();
        // total_balance is a running snapshot; only the latest row counts
        let current_balance = last.total_balance;
        let total_earnings = current_balance - total_invested;

        let duration_months = duration_months(first.date, last.date);
        let average_monthly_earnings =
            total_earnings / f64::from(duration_months.max(1));

        Ok(PortfolioSnapshot {
            as_of_date: last.date,
            inception_date: first.date,
            record_count: records.len(),
            total_invested,
            current_balance,
            total_earnings,
            duration_months,
            average_monthly_earnings,
        })
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Calendar-month difference between two dates:
/// `(to.year − from.year) * 12 + (to.month − from.month)`.
/// Negative when `to` precedes `from`.
#[must_use]
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12
        + i64::from(to.month() as i32 - from.month() as i32)
}

/// Month span of a record range for rate arithmetic.
///
/// Distinct dates inside one calendar month still count as one month;
/// a span of zero is reserved for a history that starts and ends on the
/// same date.
#[must_use]
pub fn duration_months(from: NaiveDate, to: NaiveDate) -> u32 {
    if from == to {
        return 0;
    }
    let months = months_between(from, to).max(1);
    u32::try_from(months).unwrap_or(0)
}
