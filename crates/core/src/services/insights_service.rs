use chrono::Datelike;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::insight::{Insight, InsightKind, TrendDirection};
use crate::models::ledger::Ledger;
use crate::models::settings::InsightSettings;
use crate::models::snapshot::{format_currency, PortfolioSnapshot};
use crate::models::transaction::{AccountType, TransactionRecord};
use crate::services::metrics_service::{months_between, MetricsService};

/// Generates human-readable observations from the transaction history.
///
/// Every insight is a pure function of the records and the tuning settings.
/// Output order is deterministic: performance, monthly performance, growth,
/// earnings trend, distribution (largest share first), projection, doubling
/// time. Insights whose preconditions aren't met are simply omitted.
pub struct InsightsService {
    metrics_service: MetricsService,
}

impl InsightsService {
    pub fn new() -> Self {
        Self {
            metrics_service: MetricsService::new(),
        }
    }

    /// Generate the full insight list for a ledger.
    /// Fails with `EmptyHistory` when there are no records.
    pub fn insights(&self, ledger: &Ledger) -> Result<Vec<Insight>, CoreError> {
        let records = &ledger.records;
        let settings = &ledger.settings;
        let snapshot = self.metrics_service.snapshot(records)?;

        let mut insights = Vec::new();

        if let Some(insight) = self.performance_insight(&snapshot) {
            insights.push(insight);
        }
        if let Some(insight) = self.latest_month_insight(records) {
            insights.push(insight);
        }
        if let Some(insight) = self.growth_insight(records, settings) {
            insights.push(insight);
        }
        if let Some(insight) = self.earnings_trend_insight(records, settings) {
            insights.push(insight);
        }
        insights.extend(self.distribution_insights(records, snapshot.total_invested));
        insights.push(self.projection_insight(&snapshot, settings));
        if let Some(insight) = self.doubling_insight(&snapshot) {
            insights.push(insight);
        }

        Ok(insights)
    }

    /// Overall return on investment, absolute and annualized.
    /// Payload: ROI in percent. Skipped when nothing was invested.
    fn performance_insight(&self, snapshot: &PortfolioSnapshot) -> Option<Insight> {
        if snapshot.total_invested <= 0.0 {
            return None;
        }
        let roi_pct = (snapshot.total_earnings / snapshot.total_invested) * 100.0;
        let annualized_pct = if snapshot.duration_months > 0 {
            roi_pct / f64::from(snapshot.duration_months) * 12.0
        } else {
            0.0
        };

        let text = if roi_pct > 15.0 {
            format!(
                "Excellent performance: the portfolio has earned {roi_pct:.1}% returns \
                 ({annualized_pct:.1}% annualized), well above average market returns."
            )
        } else if roi_pct > 8.0 {
            format!(
                "Good performance: the portfolio has earned {roi_pct:.1}% returns \
                 ({annualized_pct:.1}% annualized), above average market returns."
            )
        } else if roi_pct > 0.0 {
            format!(
                "The portfolio shows positive returns of {roi_pct:.1}% \
                 ({annualized_pct:.1}% annualized), a solid foundation."
            )
        } else {
            format!(
                "The portfolio currently shows {roi_pct:.1}% returns. \
                 This may improve with more time in the market."
            )
        };

        Some(Insight::new(InsightKind::Performance, text, roi_pct))
    }

    /// Balance change of the last recorded month against the closing balance
    /// of the month before it. Anchored on the data, not the wall clock.
    /// Payload: month-over-month change in percent.
    fn latest_month_insight(&self, records: &[TransactionRecord]) -> Option<Insight> {
        let last = records.last()?;
        let (year, month) = (last.date.year(), last.date.month());
        let (prev_year, prev_month) = if month > 1 {
            (year, month - 1)
        } else {
            (year - 1, 12u32)
        };

        let closing = |y: i32, m: u32| {
            records
                .iter()
                .filter(|r| r.date.year() == y && r.date.month() == m)
                .next_back()
                .map(|r| r.total_balance)
        };

        let current = closing(year, month)?;
        let previous = closing(prev_year, prev_month)?;
        if previous.abs() < f64::EPSILON {
            return None;
        }

        let change_pct = (current - previous) / previous * 100.0;
        let month_name = last.date.format("%B");

        let text = if change_pct > 5.0 {
            format!("Outstanding {month_name}: the balance grew {change_pct:.1}% over the previous month.")
        } else if change_pct > 2.0 {
            format!("Strong {month_name}: the balance grew {change_pct:.1}% over the previous month.")
        } else if change_pct > 0.0 {
            format!("Positive growth in {month_name}: the balance rose {change_pct:.1}%.")
        } else {
            format!("The balance changed {change_pct:.1}% in {month_name} relative to the previous month.")
        };

        Some(Insight::new(InsightKind::Performance, text, change_pct))
    }

    /// Compound monthly growth rate of the balance across the whole span.
    /// Needs at least `min_growth_span_days` of history and a positive
    /// opening balance. Payload: monthly growth in percent.
    fn growth_insight(
        &self,
        records: &[TransactionRecord],
        settings: &InsightSettings,
    ) -> Option<Insight> {
        let first = records.first()?;
        let last = records.last()?;

        let span_days = (last.date - first.date).num_days();
        if span_days < settings.min_growth_span_days {
            return None;
        }
        let months = months_between(first.date, last.date);
        if months <= 0 || first.total_balance <= 0.0 {
            return None;
        }

        let ratio = last.total_balance / first.total_balance;
        let monthly_pct = (ratio.powf(1.0 / months as f64) - 1.0) * 100.0;

        let text = if monthly_pct > 3.0 {
            format!("Impressive growth rate: the balance is growing at roughly {monthly_pct:.1}% per month.")
        } else if monthly_pct > 1.0 {
            format!("Solid growth rate: the balance is growing at roughly {monthly_pct:.1}% per month.")
        } else if monthly_pct > 0.0 {
            format!("The balance is growing steadily at roughly {monthly_pct:.1}% per month.")
        } else {
            format!("The balance has changed {monthly_pct:.1}% per month over the recorded period.")
        };

        Some(Insight::new(InsightKind::Trend, text, monthly_pct))
    }

    /// Earnings rate of the most recent third of the records against the
    /// earliest third. Payload: relative change in percent (zero when the
    /// early rate is too small to compare against).
    fn earnings_trend_insight(
        &self,
        records: &[TransactionRecord],
        settings: &InsightSettings,
    ) -> Option<Insight> {
        if records.len() < settings.min_trend_records {
            return None;
        }
        let chunk = records.len() / 3;
        let early_rate = segment_earnings_rate(&records[..chunk]);
        let recent_rate = segment_earnings_rate(&records[records.len() - chunk..]);

        let direction =
            classify_trend(early_rate, recent_rate, settings.trend_change_threshold);
        let change_pct = if early_rate.abs() < f64::EPSILON {
            0.0
        } else {
            (recent_rate - early_rate) / early_rate.abs() * 100.0
        };

        let recent = format_currency(recent_rate);
        let early = format_currency(early_rate);
        let text = match direction {
            TrendDirection::Accelerating => format!(
                "Earnings are accelerating: the recent rate of {recent}/month is up from \
                 {early}/month in the earliest stretch of the history."
            ),
            TrendDirection::Decelerating => format!(
                "Earnings are decelerating: the recent rate of {recent}/month is down from \
                 {early}/month in the earliest stretch of the history."
            ),
            TrendDirection::Steady => format!(
                "Earnings are steady: the recent rate of {recent}/month is in line with the \
                 earliest stretch of the history."
            ),
        };

        Some(Insight::new(InsightKind::Trend, text, change_pct))
    }

    /// One insight per account type: its share of total contributions,
    /// largest first. Untagged rows are excluded from the grouping.
    fn distribution_insights(
        &self,
        records: &[TransactionRecord],
        total_invested: f64,
    ) -> Vec<Insight> {
        if total_invested <= 0.0 {
            return Vec::new();
        }

        let mut by_account: HashMap<AccountType, f64> = HashMap::new();
        for record in records {
            if record.account_type != AccountType::Unspecified && record.investment > 0.0 {
                *by_account.entry(record.account_type).or_insert(0.0) += record.investment;
            }
        }

        let mut groups: Vec<(AccountType, f64)> = by_account.into_iter().collect();
        groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let multiple = groups.len() > 1;
        groups
            .iter()
            .enumerate()
            .map(|(i, &(account, amount))| {
                let pct = amount / total_invested * 100.0;
                let text = if i == 0 && multiple && pct > 80.0 {
                    format!(
                        "Contributions are heavily concentrated in {account} ({pct:.1}%). \
                         Consider diversifying across account types."
                    )
                } else if i == 0 && multiple && pct > 60.0 {
                    format!(
                        "{account} carries a significant share of contributions ({pct:.1}%), \
                         a clear focus with some diversification."
                    )
                } else if i == 0 && multiple {
                    format!(
                        "Contributions are balanced across account types, with {account} \
                         the largest at {pct:.1}%."
                    )
                } else {
                    format!(
                        "{account} accounts for {pct:.1}% of contributions ({}).",
                        format_currency(amount)
                    )
                };
                Insight::new(InsightKind::Distribution, text, pct)
            })
            .collect()
    }

    /// Linear extrapolation of the average monthly earnings over the
    /// configured horizon. Payload: projected balance.
    fn projection_insight(
        &self,
        snapshot: &PortfolioSnapshot,
        settings: &InsightSettings,
    ) -> Insight {
        let horizon = settings.projection_horizon_months;
        let projected = snapshot.current_balance
            + snapshot.average_monthly_earnings * f64::from(horizon);

        let text = format!(
            "At the current average of {}/month, the balance would reach about {} in \
             {horizon} months. This is a linear estimate, not a guarantee.",
            format_currency(snapshot.average_monthly_earnings),
            format_currency(projected),
        );

        Insight::new(InsightKind::Projection, text, projected)
    }

    /// How long the balance would take to double at the current average
    /// monthly return. Payload: years. Skipped unless both the balance and
    /// the average earnings are positive.
    fn doubling_insight(&self, snapshot: &PortfolioSnapshot) -> Option<Insight> {
        if snapshot.average_monthly_earnings <= 0.0 || snapshot.current_balance <= 0.0 {
            return None;
        }
        let monthly_rate = snapshot.average_monthly_earnings / snapshot.current_balance;
        let years = std::f64::consts::LN_2 / (1.0 + monthly_rate).ln() / 12.0;

        let text = format!(
            "At the current average monthly return, the balance could double in roughly \
             {years:.1} years. This is an estimate, not a guarantee."
        );

        Some(Insight::new(InsightKind::Projection, text, years))
    }
}

impl Default for InsightsService {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify the earnings-rate movement between two segments.
///
/// When the early rate is too small for a relative comparison, the direction
/// follows the sign of the recent rate.
#[must_use]
pub fn classify_trend(early_rate: f64, recent_rate: f64, threshold: f64) -> TrendDirection {
    if early_rate.abs() < f64::EPSILON {
        return if recent_rate > f64::EPSILON {
            TrendDirection::Accelerating
        } else if recent_rate < -f64::EPSILON {
            TrendDirection::Decelerating
        } else {
            TrendDirection::Steady
        };
    }

    let change = (recent_rate - early_rate) / early_rate.abs();
    if change > threshold {
        TrendDirection::Accelerating
    } else if change < -threshold {
        TrendDirection::Decelerating
    } else {
        TrendDirection::Steady
    }
}

/// Earnings per month across a segment of consecutive records.
///
/// Segment earnings = balance change across the segment minus contributions
/// made after the segment's first record (that record's balance already
/// reflects its own contribution). A single-record segment has no internal
/// movement and rates at zero.
fn segment_earnings_rate(segment: &[TransactionRecord]) -> f64 {
    let (first, last) = match (segment.first(), segment.last()) {
        (Some(first), Some(last)) if segment.len() >= 2 => (first, last),
        _ => return 0.0,
    };

    let contributions: f64 = segment[1..].iter().map(|r| r.investment).sum();
    let earnings = (last.total_balance - first.total_balance) - contributions;
    let months = months_between(first.date, last.date).max(1);
    earnings / months as f64
}
