//! Input and parsing helper functions for the CLI.
//!
//! - Reading receipt files and delete confirmations (`input`)
//! - Date, duration, month and enum parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{confirm_delete, read_source};
pub use parsing::{parse_datetime, parse_duration, parse_kind, parse_month, parse_period};
