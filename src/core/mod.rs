//! Coordination layer: the persistence facade, domain services, and
//! filesystem path helpers.

pub mod ledger_manager;
pub mod paths;
pub mod services;

pub use ledger_manager::LedgerManager;
