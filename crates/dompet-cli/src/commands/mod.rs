//! Command handlers, one module per command group.

mod budgets;
mod categories;
mod init;
mod maintenance;
mod misc;
mod receipt;
mod reports;
mod transactions;

pub use budgets::handle_budget;
pub use categories::handle_category;
pub use init::handle_init;
pub use maintenance::handle_backup;
pub use misc::handle_completions;
pub use receipt::handle_receipt;
pub use reports::{handle_stats, handle_summary};
pub use transactions::{handle_add, handle_delete, handle_edit, handle_list, handle_show};
