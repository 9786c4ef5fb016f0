//! tally-core: shared data model, error taxonomy, and the reconciliation engine

pub mod error;
pub mod model;
pub mod money;
pub mod reconcile;

pub use error::ReconcileError;
pub use model::{
    CardholderSection, ReconcileReport, StatementPeriod, StatementTransaction, TableRecord,
};
pub use money::format_money;
pub use reconcile::{AMOUNT_TOLERANCE, reconcile};
