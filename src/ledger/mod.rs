//! Ledger aggregate, persistence-friendly types, and query helpers.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod query;

pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
pub use query::{parse_date_bound, DateWindow, IncomeQuery, TransactionQuery};
