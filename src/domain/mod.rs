//! Core domain types shared across services, storage, and the CLI.

pub mod account;
pub mod common;
pub mod income;
pub mod month;
pub mod reports;
pub mod transaction;
pub mod user;

pub use account::Account;
pub use common::{Displayable, Identifiable, NamedEntity};
pub use income::IncomeRecord;
pub use month::{MonthKey, MonthlyTotal};
pub use reports::{
    BasicStats, CategoryBreakdown, ExpensePoint, ExpenseTrend, IncomeForecast, IncomePoint,
    IncomeStats, IncomeTotals, ModelInfo, Period, Summary, TransactionStats, TransactionTotals,
};
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
