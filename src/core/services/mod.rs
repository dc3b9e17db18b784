pub mod account_service;
pub mod forecast_service;
pub mod income_service;
pub mod seed_service;
pub mod session_service;
pub mod stats_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use forecast_service::ForecastService;
pub use income_service::IncomeService;
pub use seed_service::{SeedReport, SeedService};
pub use session_service::SessionService;
pub use stats_service::StatsService;
pub use transaction_service::TransactionService;

use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, FinanceError>;
