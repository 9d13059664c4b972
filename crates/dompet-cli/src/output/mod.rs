//! Output formatting for transactions and budgets.
//!
//! - `json`: stable JSON shapes for `--json`
//! - `text`: table rows and detail blocks

mod json;
mod text;

// Re-export public API
pub use json::{budget_status_json, transaction_json, transactions_json};
pub use text::{
    budget_rows, signed_amount, transaction_details, transaction_rows, BUDGET_COLUMNS,
    TRANSACTION_COLUMNS,
};
