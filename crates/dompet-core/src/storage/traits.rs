//! Ledger store trait definition.
//!
//! The `LedgerStore` trait is the narrow query/command interface presentation
//! layers call into. It is object-safe so callers can hold `Arc<dyn LedgerStore>`.

use chrono::{DateTime, Local};

use super::types::{
    Budget, BudgetPatch, BudgetPeriod, BudgetStatus, Category, CategoryTotal, DailyStat,
    DateRange, NewBudget, NewCategory, NewTransaction, Summary, Transaction, TransactionFilter,
    TransactionKind, TransactionPatch,
};
use crate::error::Result;
use crate::period;

/// Storage interface for the personal finance ledger.
///
/// All implementations must ensure:
/// - `amount > 0` for every stored transaction and budget
/// - Category names are unique (insert-if-absent)
/// - Deletes and updates of a missing id are silent no-ops
/// - Aggregations over an empty store return zeros / empty collections
pub trait LedgerStore: Send + Sync {
    /// Create schema, apply additive migrations and seed default categories.
    ///
    /// Idempotent: repeated calls never duplicate schema objects, re-seed
    /// categories, or reset data.
    fn initialize(&self) -> Result<()>;

    // --- Transaction operations ---

    /// Insert a new transaction.
    ///
    /// # Returns
    ///
    /// Returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if the amount is not a positive, finite number.
    fn add_transaction(&self, transaction: &NewTransaction) -> Result<i64>;

    /// List transactions matching the filter.
    ///
    /// Ordered by `date` descending, then `created_at` descending.
    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// All transactions, newest first, optionally capped at `limit`.
    fn get_transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>> {
        let mut filter = TransactionFilter::new();
        filter.limit = limit;
        self.list_transactions(&filter)
    }

    /// Transactions whose `date` falls in the inclusive range.
    fn get_transactions_by_date_range(&self, range: &DateRange) -> Result<Vec<Transaction>> {
        self.list_transactions(&TransactionFilter::new().range(*range))
    }

    /// Transactions of one direction.
    fn get_transactions_by_type(&self, kind: TransactionKind) -> Result<Vec<Transaction>> {
        self.list_transactions(&TransactionFilter::new().kind(kind))
    }

    /// Get a transaction by id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(transaction))` if found, `Ok(None)` if not found.
    fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>>;

    /// Apply a sparse patch. An empty patch or a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if the patch carries a non-positive amount.
    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<()>;

    /// Delete a transaction. Deleting a missing id succeeds.
    fn delete_transaction(&self, id: i64) -> Result<()>;

    // --- Category operations ---

    /// Categories ordered by type then name, or by name when filtered to one type.
    fn get_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<Category>>;

    /// Insert a category unless one with the same name exists.
    ///
    /// # Returns
    ///
    /// Returns `Some(id)` for a new row, `None` when the name was already taken.
    fn add_category(&self, category: &NewCategory) -> Result<Option<i64>>;

    /// Delete a category. Transactions referencing its name are untouched.
    fn delete_category(&self, id: i64) -> Result<()>;

    // --- Budget operations ---

    /// Budgets, most recently created first.
    fn get_budgets(&self) -> Result<Vec<Budget>>;

    /// Insert a budget and return its id.
    fn add_budget(&self, budget: &NewBudget) -> Result<i64>;

    /// Apply a sparse patch. An empty patch or a missing id is a no-op.
    fn update_budget(&self, id: i64, patch: &BudgetPatch) -> Result<()>;

    /// Delete a budget. Deleting a missing id succeeds.
    fn delete_budget(&self, id: i64) -> Result<()>;

    /// Sum of expense amounts for `category` within `range`.
    fn category_expense_in(&self, category: &str, range: &DateRange) -> Result<f64>;

    /// Expense total for `category` in the current occurrence of `period`.
    fn get_budget_progress(&self, category: &str, period: BudgetPeriod) -> Result<f64> {
        let range = period::window(period, &Local::now());
        self.category_expense_in(category, &range)
    }

    /// Progress of every budget as of `now`.
    fn budget_statuses(&self, now: DateTime<Local>) -> Result<Vec<BudgetStatus>> {
        let today = now.date_naive();
        self.get_budgets()?
            .into_iter()
            .map(|budget| {
                let window = period::window(budget.period, &now);
                let spent = self.category_expense_in(&budget.category, &window)?;
                let ratio = (spent / budget.amount).min(1.0);
                Ok(BudgetStatus {
                    spent,
                    ratio,
                    over_limit: spent >= budget.amount,
                    days_left: period::days_left(budget.period, today),
                    window,
                    as_of: now,
                    budget,
                })
            })
            .collect()
    }

    // --- Aggregation operations ---

    /// Sum of amounts of one direction, all-time when `range` is `None`.
    fn total_by_kind(&self, kind: TransactionKind, range: Option<&DateRange>) -> Result<f64>;

    fn get_total_income(&self, range: Option<&DateRange>) -> Result<f64> {
        self.total_by_kind(TransactionKind::Income, range)
    }

    fn get_total_expense(&self, range: Option<&DateRange>) -> Result<f64> {
        self.total_by_kind(TransactionKind::Expense, range)
    }

    /// Income minus expense over the same range.
    fn get_balance(&self, range: Option<&DateRange>) -> Result<f64> {
        let income = self.get_total_income(range)?;
        let expense = self.get_total_expense(range)?;
        Ok(income - expense)
    }

    /// Income, expense and balance in one call.
    fn get_summary(&self, range: Option<&DateRange>) -> Result<Summary> {
        let income = self.get_total_income(range)?;
        let expense = self.get_total_expense(range)?;
        Ok(Summary {
            income,
            expense,
            balance: income - expense,
        })
    }

    /// Per-category sums, largest first. Categories without rows are absent.
    fn get_category_totals(
        &self,
        kind: TransactionKind,
        range: Option<&DateRange>,
    ) -> Result<Vec<CategoryTotal>>;

    /// One row per local calendar day with at least one transaction, ascending.
    fn get_daily_stats(&self, range: &DateRange) -> Result<Vec<DailyStat>>;
}
