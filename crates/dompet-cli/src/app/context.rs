//! Application context for the Dompet CLI.
//!
//! Bundles CLI arguments with the loaded config so handlers don't thread
//! several parameters around.

use std::path::PathBuf;

use tracing::debug;

use dompet_core::SqliteLedger;

use crate::cli::Cli;
use crate::config::{read_config, DompetConfig};
use crate::ui::UiContext;

use super::errors::CliError;
use super::resolver::{
    missing_ledger_hint, missing_ledger_message, resolve_config_path, resolve_db_path,
};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: DompetConfig,
}

impl<'a> AppContext<'a> {
    /// Build a context, reading the config file when one exists.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path()?;
        let config = if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            read_config(&config_path)?
        } else {
            DompetConfig::default()
        };
        Ok(Self { cli, config })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn config(&self) -> &DompetConfig {
        &self.config
    }

    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, &self.config)
    }

    /// UI context for a command honoring the global color/unicode flags.
    pub fn ui(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }

    /// Open the existing ledger. A missing file is reported, not created.
    pub fn open_store(&self) -> anyhow::Result<SqliteLedger> {
        let path = self.db_path()?;
        if !path.exists() {
            return Err(CliError::not_found(missing_ledger_message(&path), missing_ledger_hint()).into());
        }
        Ok(SqliteLedger::open(&path)?)
    }
}
