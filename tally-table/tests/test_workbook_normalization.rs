use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use tally_core::{StatementPeriod, StatementTransaction, reconcile};
use tally_table::{CsvWorkbook, records_in_period};

fn march_period() -> StatementPeriod {
    StatementPeriod::ending_on(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

fn write_csv(path: &std::path::Path, contents: &str) {
    let mut f = fs::File::create(path).unwrap();
    write!(f, "{contents}").unwrap();
}

#[test]
fn test_multi_sheet_workbook_with_one_unusable_sheet() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        &dir.path().join("meals.csv"),
        "Transaction Date,Vendor,Amount\n\
         03/01/24,coffee,$4.50\n\
         03/02/24,lunch,12.00\n\
         01/05/24,too early,99.00\n",
    );
    write_csv(
        &dir.path().join("travel.csv"),
        "Date,Total Charge\n\
         03/05/24,\"$1,204.30\"\n\
         bad date,50.00\n",
    );
    // No date or amount headers: contributes nothing.
    write_csv(&dir.path().join("notes.csv"), "Who,Why\njan,conference\n");

    let workbook = CsvWorkbook::open(dir.path());
    let records = records_in_period(&workbook, &march_period());

    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![4.50, 12.00, 1204.30]);
    assert!(records.iter().all(|r| r.date.ends_with("/24")));
}

#[test]
fn test_unreadable_workbook_degrades_to_empty() {
    let workbook = CsvWorkbook::open("/nonexistent/expenses");
    assert!(records_in_period(&workbook, &march_period()).is_empty());
}

#[test]
fn test_workbook_feeds_reconciliation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    write_csv(
        &path,
        "Date,Amount\n\
         03/01/24,4.50\n\
         03/05/24,1204.30\n",
    );

    let statement = vec![
        StatementTransaction {
            date: "03/01/24".to_string(),
            merchant: "COFFEE HOUSE".to_string(),
            amount: 4.50,
        },
        StatementTransaction {
            date: "03/02/24".to_string(),
            merchant: "GROCERY MART".to_string(),
            amount: 52.10,
        },
    ];

    let workbook = CsvWorkbook::open(&path);
    let records = records_in_period(&workbook, &march_period());
    let report = reconcile("JANET SMITH", march_period(), &statement, &records);

    assert_eq!(report.table_count, 2);
    assert_eq!(report.matched, 1);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].merchant, "GROCERY MART");
}
