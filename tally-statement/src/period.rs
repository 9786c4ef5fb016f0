//! Statement period from the closing-date anchor.
//!
//! Expected anchor in the extracted text:
//!   Closing Date 03/15/24

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

use tally_core::{ReconcileError, StatementPeriod};

/// Find the closing-date anchor and derive the 30-day billing window from it.
pub fn statement_period(text: &str) -> Result<StatementPeriod> {
    let re = Regex::new(r"Closing Date\s*(\d{2}/\d{2}/\d{2})")?;
    let caps = re.captures(text).ok_or(ReconcileError::PeriodNotFound)?;
    let end = NaiveDate::parse_from_str(&caps[1], "%m/%d/%y")
        .map_err(|_| ReconcileError::PeriodNotFound)?;
    Ok(StatementPeriod::ending_on(end))
}
