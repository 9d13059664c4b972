//! # Dompet Core
//!
//! Core library for Dompet - a local, single-user personal finance ledger.
//!
//! This crate provides the embedded storage layer (transactions, categories,
//! budgets), the aggregation queries built on top of it, and the small
//! helpers presentation layers need, independent of any user interface.
//!
//! ## Architecture
//!
//! - **storage**: `LedgerStore` trait, data model, and the SQLite engine
//! - **period**: budget period windows (daily, weekly, monthly)
//! - **stats**: derived statistics helpers (dense daily series, change ratios)
//! - **receipt**: receipt-extraction drafts and their conversion to transactions
//! - **handle**: async façade for callers running on a tokio runtime

pub mod error;
pub mod fs;
pub mod handle;
pub mod period;
pub mod receipt;
pub mod stats;
pub mod storage;

pub use error::{LedgerError, Result};
pub use handle::LedgerHandle;
pub use storage::{LedgerStore, SqliteLedger};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the ledger database inside the data directory.
pub const DEFAULT_DB_FILE: &str = "dompet.db";
