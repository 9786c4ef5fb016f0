//! tally-table: normalize a heterogeneous expense workbook into comparable
//! records, filtered to the statement period.

pub mod normalize;
pub mod source;

pub use normalize::records_in_period;
pub use source::{CsvWorkbook, Sheet, TabularSource};
