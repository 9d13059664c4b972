use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dompet_core::DEFAULT_DB_FILE;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DompetConfig {
    #[serde(default)]
    pub ledger: LedgerSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Abbreviate large amounts (1.2M, 35K)
    #[serde(default)]
    pub compact: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            compact: false,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

impl DompetConfig {
    pub fn new(ledger_path: PathBuf, currency: String) -> Self {
        Self {
            ledger: LedgerSection {
                path: Some(ledger_path.to_string_lossy().to_string()),
            },
            display: DisplaySection {
                currency,
                compact: false,
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(DEFAULT_DB_FILE))
}

pub fn read_config(path: &Path) -> anyhow::Result<DompetConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &DompetConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("dompet"));
        }
    }
    Ok(home_dir()?.join(".config").join("dompet"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("dompet"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("dompet"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
