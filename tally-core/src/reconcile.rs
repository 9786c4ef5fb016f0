//! Greedy first-fit matching between statement transactions and workbook rows.
//!
//! Matching is deliberately order-dependent: each statement transaction, in
//! document order, consumes the earliest remaining workbook amount inside the
//! tolerance band. When several pool amounts sit within tolerance of one
//! transaction this can produce a different pairing than an optimal
//! assignment would, and that is the pinned, observable behavior.

use crate::model::{ReconcileReport, StatementPeriod, StatementTransaction, TableRecord};

/// Two amounts within ±0.50 of each other are considered equivalent.
pub const AMOUNT_TOLERANCE: f64 = 0.50;

/// Match statement transactions against workbook records and total up the run.
///
/// Each workbook amount is usable at most once. Unmatched statement
/// transactions land in `missing`, preserving document order.
pub fn reconcile(
    cardholder: &str,
    period: StatementPeriod,
    statement: &[StatementTransaction],
    table: &[TableRecord],
) -> ReconcileReport {
    let mut available: Vec<f64> = table.iter().map(|r| r.amount).collect();
    let mut missing = Vec::new();
    let mut matched = 0;

    for txn in statement {
        let hit = available
            .iter()
            .position(|&a| a - AMOUNT_TOLERANCE <= txn.amount && txn.amount <= a + AMOUNT_TOLERANCE);
        match hit {
            Some(idx) => {
                available.remove(idx);
                matched += 1;
            }
            None => missing.push(txn.clone()),
        }
    }

    let statement_total = statement.iter().map(|t| t.amount).sum();
    let table_total = table.iter().map(|r| r.amount).sum();
    let missing_total = missing.iter().map(|t: &StatementTransaction| t.amount).sum();

    ReconcileReport {
        cardholder: cardholder.to_string(),
        period,
        statement_count: statement.len(),
        table_count: table.len(),
        matched,
        missing,
        statement_total,
        table_total,
        missing_total,
    }
}
