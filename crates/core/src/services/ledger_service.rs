use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::transaction::{AccountType, RecordSortOrder, TransactionRecord};

/// Manages the record sequence: validated inserts, removal, and queries.
///
/// Pure business logic — no I/O. The ledger's date ordering is maintained
/// here and relied on by every downstream computation.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Add a record to the ledger, keeping date order.
    /// Validates the record before inserting.
    pub fn add_record(
        &self,
        ledger: &mut Ledger,
        record: TransactionRecord,
    ) -> Result<(), CoreError> {
        self.validate_record(&record)?;
        Self::sorted_insert(&mut ledger.records, record);
        Ok(())
    }

    /// Remove the record at `index` (positions follow date order, oldest
    /// first). Returns the removed record.
    pub fn remove_record(
        &self,
        ledger: &mut Ledger,
        index: usize,
    ) -> Result<TransactionRecord, CoreError> {
        if index >= ledger.records.len() {
            return Err(CoreError::RecordNotFound(index));
        }
        Ok(ledger.records.remove(index))
    }

    /// Get all records sorted by a specific order.
    #[must_use]
    pub fn records_sorted<'a>(
        &self,
        ledger: &'a Ledger,
        order: &RecordSortOrder,
    ) -> Vec<&'a TransactionRecord> {
        let mut records: Vec<&TransactionRecord> = ledger.records.iter().collect();
        match order {
            RecordSortOrder::DateDesc => records.sort_by(|a, b| b.date.cmp(&a.date)),
            RecordSortOrder::DateAsc => records.sort_by(|a, b| a.date.cmp(&b.date)),
            RecordSortOrder::InvestmentDesc => records.sort_by(|a, b| {
                b.investment
                    .partial_cmp(&a.investment)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            RecordSortOrder::InvestmentAsc => records.sort_by(|a, b| {
                a.investment
                    .partial_cmp(&b.investment)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            RecordSortOrder::BalanceDesc => records.sort_by(|a, b| {
                b.total_balance
                    .partial_cmp(&a.total_balance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            RecordSortOrder::BalanceAsc => records.sort_by(|a, b| {
                a.total_balance
                    .partial_cmp(&b.total_balance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        records
    }

    /// Get records for a single account type, oldest first.
    #[must_use]
    pub fn records_for_account<'a>(
        &self,
        ledger: &'a Ledger,
        account_type: AccountType,
    ) -> Vec<&'a TransactionRecord> {
        ledger
            .records
            .iter()
            .filter(|r| r.account_type == account_type)
            .collect()
    }

    /// Get records within a date range (inclusive), oldest first.
    #[must_use]
    pub fn records_in_range<'a>(
        &self,
        ledger: &'a Ledger,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<&'a TransactionRecord> {
        ledger
            .records
            .iter()
            .filter(|r| r.date >= from && r.date <= to)
            .collect()
    }

    /// Search records by matching the query against notes and the account
    /// label (case-insensitive).
    #[must_use]
    pub fn search<'a>(&self, ledger: &'a Ledger, query: &str) -> Vec<&'a TransactionRecord> {
        let q = query.to_lowercase();
        ledger
            .records
            .iter()
            .filter(|r| {
                r.notes.as_deref().unwrap_or("").to_lowercase().contains(&q)
                    || r.account_type.to_string().to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Validate a record before it enters the ledger.
    ///
    /// Rules:
    /// - Amounts must be finite numbers
    /// - Investment cannot be negative (zero is allowed for balance-only rows)
    /// - Total balance cannot be negative
    fn validate_record(&self, record: &TransactionRecord) -> Result<(), CoreError> {
        if !record.investment.is_finite() || !record.total_balance.is_finite() {
            return Err(CoreError::ValidationError(
                "Amounts must be finite numbers".into(),
            ));
        }
        if record.investment < 0.0 {
            return Err(CoreError::ValidationError(
                "Investment amount cannot be negative".into(),
            ));
        }
        if record.total_balance < 0.0 {
            return Err(CoreError::ValidationError(
                "Total balance cannot be negative".into(),
            ));
        }
        Ok(())
    }

    /// Insert into a date-sorted Vec in O(log n) for the search.
    /// Same-date records keep insertion order; the newest row on a date is
    /// the day's authoritative balance snapshot.
    fn sorted_insert(records: &mut Vec<TransactionRecord>, record: TransactionRecord) {
        let pos = records.partition_point(|r| r.date <= record.date);
        records.insert(pos, record);
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
