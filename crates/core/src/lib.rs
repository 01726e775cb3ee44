pub mod errors;
pub mod loader;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use models::{
    chart::{ChartPoint, MonthlyPoint},
    insight::Insight,
    ledger::Ledger,
    settings::InsightSettings,
    snapshot::PortfolioSnapshot,
    transaction::{AccountType, RecordSortOrder, TransactionRecord},
};
use services::{
    chart_service::ChartService, insights_service::InsightsService,
    ledger_service::LedgerService, metrics_service::MetricsService,
};

use errors::CoreError;

/// Main entry point for the Portfolio Tracker core library.
/// Holds the transaction history and the services that operate on it.
///
/// Everything here is synchronous and pure; the spreadsheet the history
/// comes from and the dashboard that renders the results are both external.
#[must_use]
pub struct PortfolioTracker {
    ledger: Ledger,
    ledger_service: LedgerService,
    metrics_service: MetricsService,
    insights_service: InsightsService,
    chart_service: ChartService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("records", &self.ledger.records.len())
            .field("settings", &self.ledger.settings)
            .finish()
    }
}

impl Default for PortfolioTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioTracker {
    /// Create a tracker with no records and default insight tuning.
    pub fn new() -> Self {
        Self::build(Ledger::default())
    }

    /// Create a tracker from pre-parsed records.
    /// Every record is validated; input order doesn't matter.
    pub fn from_records(records: Vec<TransactionRecord>) -> Result<Self, CoreError> {
        let mut tracker = Self::new();
        for record in records {
            tracker
                .ledger_service
                .add_record(&mut tracker.ledger, record)?;
        }
        Ok(tracker)
    }

    /// Create a tracker from spreadsheet-shaped CSV text.
    /// Malformed rows are rejected with their line number.
    pub fn load_from_csv(data: &str) -> Result<Self, CoreError> {
        let records = loader::records_from_csv(data)?;
        Self::from_records(records)
    }

    // ── Record Management ───────────────────────────────────────────

    /// Add a transaction row. Validates before inserting; the ledger stays
    /// sorted by date.
    pub fn add_record(
        &mut self,
        date: NaiveDate,
        investment: f64,
        total_balance: f64,
        account_type: AccountType,
    ) -> Result<(), CoreError> {
        let record = TransactionRecord::new(date, investment, total_balance, account_type);
        self.ledger_service.add_record(&mut self.ledger, record)
    }

    /// Add a transaction row with notes attached.
    pub fn add_record_with_notes(
        &mut self,
        date: NaiveDate,
        investment: f64,
        total_balance: f64,
        account_type: AccountType,
        notes: impl Into<String>,
    ) -> Result<(), CoreError> {
        let record =
            TransactionRecord::with_notes(date, investment, total_balance, account_type, notes);
        self.ledger_service.add_record(&mut self.ledger, record)
    }

    /// Remove the record at `index` (date order, oldest first).
    /// Returns the removed record.
    pub fn remove_record(&mut self, index: usize) -> Result<TransactionRecord, CoreError> {
        self.ledger_service.remove_record(&mut self.ledger, index)
    }

    /// Get the total number of records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.ledger.records.len()
    }

    /// Get all records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[TransactionRecord] {
        &self.ledger.records
    }

    /// Get records sorted by a specific order.
    #[must_use]
    pub fn records_sorted(&self, order: &RecordSortOrder) -> Vec<&TransactionRecord> {
        self.ledger_service.records_sorted(&self.ledger, order)
    }

    /// Get records for a single account type, oldest first.
    #[must_use]
    pub fn records_for_account(&self, account_type: AccountType) -> Vec<&TransactionRecord> {
        self.ledger_service
            .records_for_account(&self.ledger, account_type)
    }

    /// Get records within a date range (inclusive), oldest first.
    #[must_use]
    pub fn records_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&TransactionRecord> {
        self.ledger_service.records_in_range(&self.ledger, from, to)
    }

    /// Search records by notes and account label (case-insensitive).
    #[must_use]
    pub fn search_records(&self, query: &str) -> Vec<&TransactionRecord> {
        self.ledger_service.search(&self.ledger, query)
    }

    /// Date of the earliest record.
    #[must_use]
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.ledger.records.first().map(|r| r.date)
    }

    /// Date of the most recent record.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.ledger.records.last().map(|r| r.date)
    }

    // ── Metrics ─────────────────────────────────────────────────────

    /// Compute the derived portfolio summary.
    /// Fails with `EmptyHistory` when there are no records.
    pub fn snapshot(&self) -> Result<PortfolioSnapshot, CoreError> {
        self.metrics_service.snapshot(&self.ledger.records)
    }

    /// Generate the insight list: performance, trend, distribution, and
    /// projection observations. Fails with `EmptyHistory` when there are
    /// no records.
    pub fn insights(&self) -> Result<Vec<Insight>, CoreError> {
        self.insights_service.insights(&self.ledger)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Combo-chart series: contribution bars over a balance line.
    #[must_use]
    pub fn combo_chart(&self) -> Vec<ChartPoint> {
        self.chart_service.combo_points(&self.ledger.records)
    }

    /// Per-calendar-month aggregate series.
    #[must_use]
    pub fn monthly_chart(&self) -> Vec<MonthlyPoint> {
        self.chart_service.monthly_points(&self.ledger.records)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current insight tuning.
    #[must_use]
    pub fn settings(&self) -> &InsightSettings {
        &self.ledger.settings
    }

    /// Set the relative-change threshold for the earnings trend.
    /// Must be a positive, finite fraction (e.g., 0.10 for 10%).
    pub fn set_trend_threshold(&mut self, threshold: f64) -> Result<(), CoreError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Invalid trend threshold {threshold}: must be a positive finite fraction"
            )));
        }
        self.ledger.settings.trend_change_threshold = threshold;
        Ok(())
    }

    /// Set the projection horizon in months. Must be at least 1.
    pub fn set_projection_horizon(&mut self, months: u32) -> Result<(), CoreError> {
        if months == 0 {
            return Err(CoreError::ValidationError(
                "Projection horizon must be at least one month".into(),
            ));
        }
        self.ledger.settings.projection_horizon_months = months;
        Ok(())
    }

    // ── JSON Exchange ───────────────────────────────────────────────

    /// Export all records as a JSON string.
    pub fn export_records_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger.records).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize records to JSON: {e}"))
        })
    }

    /// Import records from a JSON string. All records are validated first;
    /// if any record fails validation, none are added (all-or-nothing).
    /// Returns the number of records imported.
    pub fn import_records_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let records: Vec<TransactionRecord> = serde_json::from_str(json)?;
        let count = records.len();

        // Phase 1: validate against a scratch ledger
        let mut staged = self.ledger.clone();
        for record in records {
            self.ledger_service.add_record(&mut staged, record)?;
        }

        // Phase 2: all valid — commit
        self.ledger = staged;
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            ledger_service: LedgerService::new(),
            metrics_service: MetricsService::new(),
            insights_service: InsightsService::new(),
            chart_service: ChartService::new(),
        }
    }
}
