use std::path::PathBuf;

use crate::errors::{FinanceError, Result};
use crate::ledger::Ledger;
use crate::storage::StorageBackend;

/// Facade that coordinates the open ledger, persistence, and backups.
pub struct LedgerManager {
    pub current: Option<Ledger>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn require_current(&self) -> Result<&Ledger> {
        self.current
            .as_ref()
            .ok_or_else(|| FinanceError::Storage("no ledger loaded".into()))
    }

    pub fn require_current_mut(&mut self) -> Result<&mut Ledger> {
        self.current
            .as_mut()
            .ok_or_else(|| FinanceError::Storage("no ledger loaded".into()))
    }

    /// Creates a new ledger file and makes it current.
    pub fn create(&mut self, name: &str) -> Result<PathBuf> {
        let path = self.storage.ledger_path(name);
        if path.exists() {
            return Err(FinanceError::Conflict(format!(
                "Ledger '{}' already exists",
                name
            )));
        }
        let ledger = Ledger::new(name);
        self.storage.save(&ledger, name)?;
        self.storage.record_last_ledger(Some(name))?;
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        tracing::debug!("created ledger `{}`", name);
        Ok(path)
    }

    /// Loads a named ledger and makes it current.
    pub fn open(&mut self, name: &str) -> Result<PathBuf> {
        let ledger = self.storage.load(name)?;
        self.ensure_schema_support(ledger.schema_version)?;
        self.storage.record_last_ledger(Some(name))?;
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        Ok(self.storage.ledger_path(name))
    }

    /// Persists the current ledger under its name.
    pub fn save(&mut self) -> Result<PathBuf> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| FinanceError::Storage("current ledger is unnamed".into()))?;
        let mut snapshot = self
            .current
            .clone()
            .ok_or_else(|| FinanceError::Storage("no ledger loaded".into()))?;
        snapshot.touch();
        self.storage.save(&snapshot, &name)?;
        self.current = Some(snapshot);
        Ok(self.storage.ledger_path(&name))
    }

    /// Persists the current ledger under a new name and rebinds it.
    pub fn save_as(&mut self, name: &str) -> Result<PathBuf> {
        let mut snapshot = self
            .current
            .clone()
            .ok_or_else(|| FinanceError::Storage("no ledger loaded".into()))?;
        snapshot.name = name.to_string();
        snapshot.touch();
        self.storage.save(&snapshot, name)?;
        self.storage.record_last_ledger(Some(name))?;
        self.current = Some(snapshot);
        self.current_name = Some(name.to_string());
        Ok(self.storage.ledger_path(name))
    }

    /// Writes a timestamped backup snapshot of the current ledger.
    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| FinanceError::Storage("current ledger is unnamed".into()))?;
        let ledger = self.require_current()?;
        self.storage.backup(ledger, name, note)
    }

    pub fn list_ledgers(&self) -> Result<Vec<String>> {
        self.storage.list_ledgers()
    }

    pub fn list_backups(&self) -> Result<Vec<String>> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| FinanceError::Storage("current ledger is unnamed".into()))?;
        self.storage.list_backups(name)
    }

    /// Replaces the current ledger with the named backup snapshot.
    pub fn restore_backup(&mut self, backup_name: &str) -> Result<()> {
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| FinanceError::Storage("current ledger is unnamed".into()))?;
        let restored = self.storage.restore(&name, backup_name)?;
        self.ensure_schema_support(restored.schema_version)?;
        self.current = Some(restored);
        Ok(())
    }

    pub fn last_opened(&self) -> Result<Option<String>> {
        self.storage.last_ledger()
    }

    pub fn record_last_opened(&self, name: Option<&str>) -> Result<()> {
        self.storage.record_last_ledger(name)
    }

    pub fn set_current(&mut self, ledger: Ledger, name: Option<String>) {
        self.current = Some(ledger);
        self.current_name = name;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
    }

    fn ensure_schema_support(&self, schema_version: u8) -> Result<()> {
        if schema_version > Ledger::schema_version_default() {
            return Err(FinanceError::Storage(format!(
                "ledger schema v{} is newer than supported v{}",
                schema_version,
                Ledger::schema_version_default()
            )));
        }
        Ok(())
    }
}
