use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The registered account a contribution belongs to.
///
/// The set is closed: rows carrying a blank, `-`, or unrecognized tag fall
/// back to `Unspecified` instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Retirement Savings Plan
    Rsp,
    /// Tax-Free Savings Account
    Tfsa,
    /// First Home Savings Account
    Fhsa,
    /// No account tag on the row
    Unspecified,
}

impl AccountType {
    /// Parse a spreadsheet cell into an account tag (case-insensitive).
    /// Blank cells, the `-` placeholder, and unknown labels map to
    /// `Unspecified`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "RSP" => AccountType::Rsp,
            "TFSA" => AccountType::Tfsa,
            "FHSA" => AccountType::Fhsa,
            _ => AccountType::Unspecified,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Rsp => write!(f, "RSP"),
            AccountType::Tfsa => write!(f, "TFSA"),
            AccountType::Fhsa => write!(f, "FHSA"),
            AccountType::Unspecified => write!(f, "-"),
        }
    }
}

/// Sort order for record listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest contribution first
    InvestmentDesc,
    /// Smallest contribution first
    InvestmentAsc,
    /// Highest balance first
    BalanceDesc,
    /// Lowest balance first
    BalanceAsc,
}

/// A single row of the transaction history.
///
/// **Important**: `total_balance` is a snapshot (the running portfolio value
/// as of `date`), not an increment. Summing balances is always a bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Date of the row (no time component — daily granularity)
    pub date: NaiveDate,

    /// Amount contributed on this date (zero for balance-only updates)
    pub investment: f64,

    /// Running portfolio value as of this date
    pub total_balance: f64,

    /// Which registered account the contribution went into
    pub account_type: AccountType,

    /// Optional free-text notes (e.g., source, rationale, memo)
    #[serde(default)]
    pub notes: Option<String>,
}

impl TransactionRecord {
    pub fn new(
        date: NaiveDate,
        investment: f64,
        total_balance: f64,
        account_type: AccountType,
    ) -> Self {
        Self {
            date,
            investment,
            total_balance,
            account_type,
            notes: None,
        }
    }

    /// Create a record with notes attached.
    pub fn with_notes(
        date: NaiveDate,
        investment: f64,
        total_balance: f64,
        account_type: AccountType,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            investment,
            total_balance,
            account_type,
            notes: Some(notes.into()),
        }
    }
}
