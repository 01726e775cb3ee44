use serde::{Deserialize, Serialize};

use super::settings::InsightSettings;
use super::transaction::TransactionRecord;

/// The main data container: the full transaction history plus insight tuning.
///
/// The history itself lives in an external spreadsheet; this is the
/// in-memory working copy, kept sorted by date ascending at all times.
/// Records are immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// All transaction rows, oldest first
    pub records: Vec<TransactionRecord>,

    /// Insight tuning constants
    pub settings: InsightSettings,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            settings: InsightSettings::default(),
        }
    }
}
