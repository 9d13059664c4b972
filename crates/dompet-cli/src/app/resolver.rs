//! Path resolution for config and ledger files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_db_path, DompetConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking DOMPET_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the ledger database path: `--db`/`DOMPET_DB`, then the config
/// file, then the XDG data directory.
pub fn resolve_db_path(cli: &Cli, config: &DompetConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.ledger.path.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_db_path()
}

/// Error message when the ledger file is missing.
pub fn missing_ledger_message(path: &Path) -> String {
    format!("No ledger found at {}", path.display())
}

/// Hint shown alongside `missing_ledger_message`.
pub fn missing_ledger_hint() -> &'static str {
    "Run `dompet init`, or point at a ledger with --db / DOMPET_DB"
}
