use thiserror::Error;

/// Unified error type for the entire portfolio-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Metrics Engine ──────────────────────────────────────────────
    #[error("Transaction history is empty — nothing to compute")]
    EmptyHistory,

    // ── Load Boundary ───────────────────────────────────────────────
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Record validation failed: {0}")]
    ValidationError(String),

    #[error("Record not found at position {0}")]
    RecordNotFound(usize),

    // ── JSON Exchange ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
