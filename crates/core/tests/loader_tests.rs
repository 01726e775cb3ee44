// ═══════════════════════════════════════════════════════════════════
// Loader Tests — CSV load boundary: parsing, cleanup, rejection
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::loader::records_from_csv;
use portfolio_tracker_core::models::transaction::AccountType;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const HEADER: &str = "Date,Investment,Total Balance,Account Type,Notes\n";

// ═══════════════════════════════════════════════════════════════════
//  Happy path
// ═══════════════════════════════════════════════════════════════════

mod parsing {
    use super::*;

    #[test]
    fn parses_plain_rows() {
        let csv = format!(
            "{HEADER}01/01/2024,1000,1000,RSP,first deposit\n01/01/2025,500,1800,TFSA,"
        );
        let records = records_from_csv(&csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, d(2024, 1, 1));
        assert_eq!(records[0].investment, 1000.0);
        assert_eq!(records[0].total_balance, 1000.0);
        assert_eq!(records[0].account_type, AccountType::Rsp);
        assert_eq!(records[0].notes.as_deref(), Some("first deposit"));
        assert_eq!(records[1].account_type, AccountType::Tfsa);
        assert!(records[1].notes.is_none());
    }

    #[test]
    fn cleans_dollar_signs_and_separators() {
        let csv = format!("{HEADER}03/14/2024,\"$1,250.50\",\"$10,000.00\",TFSA,");
        let records = records_from_csv(&csv).unwrap();

        assert_eq!(records[0].investment, 1250.50);
        assert_eq!(records[0].total_balance, 10_000.0);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let csv = format!("{HEADER} 01/05/2024 , 100 , 600 , rsp , note \n");
        let records = records_from_csv(&csv).unwrap();

        assert_eq!(records[0].date, d(2024, 1, 5));
        assert_eq!(records[0].account_type, AccountType::Rsp);
        assert_eq!(records[0].notes.as_deref(), Some("note"));
    }

    #[test]
    fn dash_account_reads_as_unspecified() {
        let csv = format!("{HEADER}01/05/2024,0,600,-,balance check\n");
        let records = records_from_csv(&csv).unwrap();
        assert_eq!(records[0].account_type, AccountType::Unspecified);
    }

    #[test]
    fn unknown_account_reads_as_unspecified() {
        let csv = format!("{HEADER}01/05/2024,100,600,Margin,\n");
        let records = records_from_csv(&csv).unwrap();
        assert_eq!(records[0].account_type, AccountType::Unspecified);
    }

    #[test]
    fn blank_money_cells_read_as_zero() {
        let csv = format!("{HEADER}01/05/2024,,600,TFSA,\n");
        let records = records_from_csv(&csv).unwrap();
        assert_eq!(records[0].investment, 0.0);
    }

    #[test]
    fn notes_column_may_be_absent() {
        let csv = "Date,Investment,Total Balance,Account Type\n01/05/2024,100,600,TFSA\n";
        let records = records_from_csv(csv).unwrap();
        assert!(records[0].notes.is_none());
    }

    #[test]
    fn output_is_sorted_by_date() {
        let csv = format!(
            "{HEADER}06/01/2024,300,900,TFSA,\n01/01/2024,500,500,RSP,\n03/01/2024,100,650,FHSA,"
        );
        let records = records_from_csv(&csv).unwrap();

        let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 3, 1), d(2024, 6, 1)]);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(records_from_csv(HEADER).unwrap().is_empty());
        assert!(records_from_csv("").unwrap().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Rejection
// ═══════════════════════════════════════════════════════════════════

mod rejection {
    use super::*;

    #[test]
    fn unparsable_date_is_rejected_with_line() {
        let csv = format!("{HEADER}01/01/2024,100,100,RSP,\n2024-02-01,50,160,TFSA,\n");
        let err = records_from_csv(&csv).unwrap_err();

        match err {
            CoreError::MalformedRecord { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("2024-02-01"));
                assert!(reason.contains("MM/DD/YYYY"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_investment_is_rejected() {
        let csv = format!("{HEADER}01/01/2024,lots,100,RSP,\n");
        let err = records_from_csv(&csv).unwrap_err();

        match err {
            CoreError::MalformedRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("Investment"));
                assert!(reason.contains("lots"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_balance_is_rejected() {
        let csv = format!("{HEADER}01/01/2024,100,plenty,RSP,\n");
        let err = records_from_csv(&csv).unwrap_err();

        match err {
            CoreError::MalformedRecord { reason, .. } => {
                assert!(reason.contains("Total Balance"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn too_few_fields_is_rejected() {
        let csv = format!("{HEADER}01/01/2024,100\n");
        let err = records_from_csv(&csv).unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn first_bad_row_stops_the_load() {
        // Silent row loss would corrupt every downstream aggregate
        let csv = format!("{HEADER}bad,100,100,RSP,\n01/02/2024,50,150,TFSA,\n");
        assert!(records_from_csv(&csv).is_err());
    }
}
