use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::transaction::{AccountType, TransactionRecord};

/// Spreadsheet date format (e.g., `03/14/2025`).
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Columns after the header row: Date, Investment, Total Balance,
/// Account Type, Notes. Mapping is positional; header text is not trusted.
/// Notes may be absent.
const MIN_FIELDS: usize = 4;

/// Parse spreadsheet-shaped CSV text into transaction records.
///
/// This is the load boundary: dates are normalized, money fields are cleaned
/// of `$` and `,` and parsed, and any row that can't be made sense of is
/// rejected with its line number. Fetching the CSV (Google Sheets export,
/// local backup file) is the caller's job.
///
/// Output is sorted by date ascending regardless of sheet row order.
pub fn records_from_csv(data: &str) -> Result<Vec<TransactionRecord>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| CoreError::MalformedRecord {
            line: e.position().map_or(0, csv::Position::line),
            reason: e.to_string(),
        })?;
        let line = row.position().map_or(0, csv::Position::line);

        // Hand-maintained sheets accumulate stray blank rows
        if row.iter().all(str::is_empty) {
            continue;
        }
        if row.len() < MIN_FIELDS {
            return Err(CoreError::MalformedRecord {
                line,
                reason: format!(
                    "expected at least {MIN_FIELDS} fields, found {}",
                    row.len()
                ),
            });
        }

        let date = parse_date(row.get(0).unwrap_or(""), line)?;
        let investment = parse_money(row.get(1).unwrap_or(""), "Investment", line)?;
        let total_balance = parse_money(row.get(2).unwrap_or(""), "Total Balance", line)?;
        let account_type = AccountType::from_label(row.get(3).unwrap_or(""));
        let notes = row
            .get(4)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        records.push(TransactionRecord {
            date,
            investment,
            total_balance,
            account_type,
            notes,
        });
    }

    records.sort_by_key(|r| r.date);
    Ok(records)
}

fn parse_date(raw: &str, line: u64) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| CoreError::MalformedRecord {
        line,
        reason: format!("unparsable date '{raw}' (expected MM/DD/YYYY)"),
    })
}

/// Parse a money cell, tolerating `$1,234.56` formatting.
/// A blank cell reads as zero (an untouched sheet row, not bad data).
fn parse_money(raw: &str, column: &str, line: u64) -> Result<f64, CoreError> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(0.0);
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| CoreError::MalformedRecord {
            line,
            reason: format!("non-numeric {column} value '{raw}'"),
        })
}
