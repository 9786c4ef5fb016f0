//! Column inference and row normalization over a tabular source.
//!
//! Workbook schemas vary per sheet, so columns are inferred from header text
//! and every failure short of a missing workbook degrades to skipping: a
//! sheet without usable columns, a row with an unparsable cell, a sheet that
//! fails to read at all. Diagnostics go to tracing, never into the result.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::source::{Sheet, TabularSource};
use tally_core::{StatementPeriod, TableRecord};

const AMOUNT_HEADER_KEYWORDS: &[&str] = &["amount", "total", "charge"];

const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y"];

/// Normalize every qualifying row inside the statement period.
///
/// Never fails: an unreadable source yields an empty list.
pub fn records_in_period<S: TabularSource>(source: &S, period: &StatementPeriod) -> Vec<TableRecord> {
    let names = match source.sheet_names() {
        Ok(names) => names,
        Err(e) => {
            warn!("unable to open workbook: {e:#}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for name in names {
        let sheet = match source.read_sheet(&name) {
            Ok(sheet) => sheet,
            Err(e) => {
                warn!("skipping sheet '{name}': {e:#}");
                continue;
            }
        };
        match sheet_records(&sheet, period) {
            Some(found) => records.extend(found),
            None => debug!("sheet '{name}': no date/amount columns, skipped"),
        }
    }
    records
}

/// `None` when the sheet has no inferable date or amount column.
fn sheet_records(sheet: &Sheet, period: &StatementPeriod) -> Option<Vec<TableRecord>> {
    let date_col = sheet
        .headers
        .iter()
        .position(|h| h.to_lowercase().contains("date"))?;
    let amount_col = sheet.headers.iter().position(|h| {
        let h = h.to_lowercase();
        AMOUNT_HEADER_KEYWORDS.iter().any(|k| h.contains(k))
    })?;

    let mut records = Vec::new();
    for row in &sheet.rows {
        let Some(date) = row.get(date_col).and_then(|c| parse_date_cell(c)) else {
            continue;
        };
        let Some(amount) = row.get(amount_col).and_then(|c| parse_amount_cell(c)) else {
            continue;
        };
        if period.contains(date) {
            records.push(TableRecord {
                date: date.format("%m/%d/%y").to_string(),
                amount,
            });
        }
    }
    Some(records)
}

/// Strip currency symbols and thousands separators, then coerce.
fn parse_amount_cell(cell: &str) -> Option<f64> {
    let cleaned: String = cell.chars().filter(|&c| c != '$' && c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    // f64's FromStr accepts "NaN"/"inf"; those are junk cells here, and a
    // NaN would poison every total downstream.
    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Accept the date layouts seen across expense sheets; a trailing time
/// component (exported datetime cells) is ignored.
fn parse_date_cell(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    let date_part = cell.split_once(' ').map_or(cell, |(d, _)| d);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}
