//! Core records shared by the statement and workbook sides of a run.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The billing window a statement covers.
///
/// Statements only carry a closing date, so the start is a fixed 30-day
/// lookback from it rather than an explicit cycle-start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    /// Build the period from its closing date: `(end - 30 days, end)`.
    pub fn ending_on(end: NaiveDate) -> Self {
        Self {
            start: end - Duration::days(30),
            end,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%m/%d/%y"),
            self.end.format("%m/%d/%y")
        )
    }
}

/// A cardholder anchor located in the statement text.
///
/// Duplicate names are kept as-is: two occurrences yield two sections, and
/// lookups resolve to the first in scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardholderSection {
    pub name: String,
    /// Byte offset of the anchor in the statement text.
    pub offset: usize,
}

/// One transaction line pulled out of a cardholder section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    /// MM/DD/YY, as printed on the statement.
    pub date: String,
    pub merchant: String,
    pub amount: f64,
}

/// A normalized row from the expense workbook.
///
/// No merchant field: workbook schemas are too inconsistent to expose one
/// reliably, so matching is amount-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// MM/DD/YY, reformatted from whatever the sheet carried.
    pub date: String,
    pub amount: f64,
}

/// Read-only output of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub cardholder: String,
    pub period: StatementPeriod,
    pub statement_count: usize,
    pub table_count: usize,
    pub matched: usize,
    /// Statement transactions with no workbook counterpart, in document order.
    pub missing: Vec<StatementTransaction>,
    pub statement_total: f64,
    pub table_total: f64,
    pub missing_total: f64,
}
