pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::FinanceError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Abstraction over persistence backends capable of storing ledgers and
/// their backup snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn ledger_path(&self, name: &str) -> PathBuf;
    fn list_ledgers(&self) -> Result<Vec<String>>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, ledger: &Ledger, name: &str, note: Option<&str>) -> Result<PathBuf>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Ledger>;
    fn last_ledger(&self) -> Result<Option<String>>;
    fn record_last_ledger(&self, name: Option<&str>) -> Result<()>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to managed storage when not overridden.
    fn save_to_path(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        json_backend::save_ledger_to_path(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Ledger> {
        json_backend::load_ledger_from_path(path)
    }
}

pub use json_backend::{canonical_name, JsonStorage};
