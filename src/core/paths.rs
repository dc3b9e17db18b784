use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".finance_core";
const LEDGER_DIR: &str = "ledgers";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";
const CONFIG_BACKUP_DIR: &str = "config_backups";
const STATE_FILE: &str = "state.json";

/// Returns the application-specific data directory, defaulting to `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINANCE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Resolves the storage root, honoring an explicit override.
pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(app_data_dir)
}

/// Managed ledgers directory under the given root.
pub fn ledgers_dir_in(root: &Path) -> PathBuf {
    root.join(LEDGER_DIR)
}

/// Base directory for backup snapshots under the given root.
pub fn backups_dir_in(root: &Path) -> PathBuf {
    root.join(BACKUP_DIR)
}

/// Path to the active configuration file under the given root.
pub fn config_file_in(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Directory containing configuration backups under the given root.
pub fn config_backups_dir_in(root: &Path) -> PathBuf {
    root.join(CONFIG_BACKUP_DIR)
}

/// Path to the shared state file (tracking last opened ledger, etc.).
pub fn state_file_in(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
