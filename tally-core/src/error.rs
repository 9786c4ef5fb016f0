//! Fatal per-run failures surfaced to the caller.
//!
//! Everything else in the pipeline degrades silently: malformed statement
//! chunks, unparsable workbook rows, and unreadable sheets are skipped, not
//! raised.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// No "Closing Date MM/DD/YY" anchor in the statement text.
    #[error("Closing Date not found in statement")]
    PeriodNotFound,

    /// The statement text contains no cardholder section anchors.
    #[error("no cardholders found in statement")]
    NoCardholdersFound,

    /// Only possible when the section list is empty.
    #[error("could not match '{0}' to any cardholder")]
    NameNotMatched(String),
}
