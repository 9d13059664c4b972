//! UI primitives for the Dompet CLI.
//!
//! - **context**: environment detection (TTY, color, unicode) and output mode
//! - **theme**: badges and color styles
//! - **render**: tables, headers, hints, key/value lines
//! - **format**: amounts, dates, category labels, progress bars

mod context;
pub mod format;
pub mod render;
pub mod theme;

pub use context::{OutputMode, UiContext};
pub use theme::Badge;

pub use render::{badge, header, hint, kv, print, print_error, print_json, table, Column};
