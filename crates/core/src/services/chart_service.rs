use chrono::Datelike;

use crate::models::chart::{ChartPoint, MonthlyPoint};
use crate::models::transaction::TransactionRecord;

/// Generates chart-ready series from the record sequence.
///
/// The core computes all the numbers — the frontend only renders.
/// Input must be sorted by date ascending (the ledger guarantees this);
/// empty input yields an empty series.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Combo-chart series: one point per distinct date.
    ///
    /// Contribution bars sum all of the day's investments; the balance line
    /// carries the day's last snapshot. Non-empty notes are collected for
    /// tooltip annotations.
    #[must_use]
    pub fn combo_points(&self, records: &[TransactionRecord]) -> Vec<ChartPoint> {
        let mut points: Vec<ChartPoint> = Vec::new();

        for record in records {
            let note = record
                .notes
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(str::to_string);

            match points.last_mut() {
                Some(point) if point.date == record.date => {
                    point.investment += record.investment;
                    point.total_balance = record.total_balance;
                    point.notes.extend(note);
                }
                _ => {
                    points.push(ChartPoint {
                        date: record.date,
                        investment: record.investment,
                        total_balance: record.total_balance,
                        notes: note.into_iter().collect(),
                    });
                }
            }
        }

        points
    }

    /// Per-calendar-month series: total contributed and closing balance.
    #[must_use]
    pub fn monthly_points(&self, records: &[TransactionRecord]) -> Vec<MonthlyPoint> {
        let mut points: Vec<MonthlyPoint> = Vec::new();

        for record in records {
            let (year, month) = (record.date.year(), record.date.month());
            match points.last_mut() {
                Some(point) if point.year == year && point.month == month => {
                    point.invested += record.investment;
                    point.closing_balance = record.total_balance;
                }
                _ => {
                    points.push(MonthlyPoint {
                        year,
                        month,
                        invested: record.investment,
                        closing_balance: record.total_balance,
                    });
                }
            }
        }

        points
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
