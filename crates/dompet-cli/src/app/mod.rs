//! Application-level utilities for the Dompet CLI.
//!
//! This module provides:
//! - Path resolution for config and ledger files
//! - The per-invocation context handed to command handlers
//! - Errors carrying exit codes and hints

mod context;
mod errors;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use errors::{exit_code_for, CliError};
pub use resolver::resolve_config_path;
