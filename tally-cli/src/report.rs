//! Text rendering of a reconciliation report.

use tally_core::{ReconcileReport, format_money};

pub fn render(report: &ReconcileReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Cardholder:       {}\n", report.cardholder));
    out.push_str(&format!("Statement period: {}\n\n", report.period));
    out.push_str(&format!(
        "Statement: {} transactions, total ${}\n",
        report.statement_count,
        format_money(report.statement_total)
    ));
    out.push_str(&format!(
        "Expenses:  {} rows, total ${}\n",
        report.table_count,
        format_money(report.table_total)
    ));
    out.push_str(&format!("Matched:   {}\n", report.matched));

    if report.missing.is_empty() {
        out.push_str("\nEvery statement transaction has an expense entry.\n");
    } else {
        out.push_str(&format!(
            "\nMissing from expenses: {} transactions, total ${}\n",
            report.missing.len(),
            format_money(report.missing_total)
        ));
        for txn in &report.missing {
            out.push_str(&format!(
                "  {}  {:<40}  ${}\n",
                txn.date,
                txn.merchant,
                format_money(txn.amount)
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::{StatementPeriod, StatementTransaction};

    fn report() -> ReconcileReport {
        ReconcileReport {
            cardholder: "JANET SMITH".to_string(),
            period: StatementPeriod::ending_on(
                NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            ),
            statement_count: 2,
            table_count: 1,
            matched: 1,
            missing: vec![StatementTransaction {
                date: "02/28/24".to_string(),
                merchant: "AIRLINE TICKETS".to_string(),
                amount: 1204.30,
            }],
            statement_total: 1208.80,
            table_total: 4.50,
            missing_total: 1204.30,
        }
    }

    #[test]
    fn test_renders_totals_with_separators() {
        let text = render(&report());
        assert!(text.contains("JANET SMITH"));
        assert!(text.contains("02/14/24 - 03/15/24"));
        assert!(text.contains("total $1,208.80"));
        assert!(text.contains("Missing from expenses: 1 transactions, total $1,204.30"));
        assert!(text.contains("AIRLINE TICKETS"));
    }

    #[test]
    fn test_clean_run_has_no_missing_block() {
        let mut r = report();
        r.missing.clear();
        r.missing_total = 0.0;
        r.matched = 2;
        let text = render(&r);
        assert!(text.contains("Every statement transaction has an expense entry."));
        assert!(!text.contains("Missing from expenses"));
    }
}
