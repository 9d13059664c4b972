//! Storage layer: data model, the `LedgerStore` trait, and the SQLite engine.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteLedger;
pub use traits::LedgerStore;
pub use types::{
    Budget, BudgetPatch, BudgetPeriod, BudgetStatus, Category, CategoryTotal, DailyStat,
    DateRange, NewBudget, NewCategory, NewTransaction, Summary, Transaction, TransactionFilter,
    TransactionKind, TransactionPatch,
};
