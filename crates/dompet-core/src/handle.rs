//! Async façade over a [`LedgerStore`].
//!
//! SQLite calls block, so every operation runs on tokio's blocking pool.
//! Clones share the same underlying store.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::task;

use crate::error::{LedgerError, Result};
use crate::storage::{
    Budget, BudgetPatch, BudgetPeriod, BudgetStatus, Category, CategoryTotal, DailyStat,
    DateRange, LedgerStore, NewBudget, NewCategory, NewTransaction, Summary, Transaction,
    TransactionFilter, TransactionKind, TransactionPatch,
};

/// Cloneable async access to a shared store.
///
/// Each call moves its owned arguments onto the blocking pool, so handles can
/// be used freely from async request handlers.
#[derive(Clone)]
pub struct LedgerHandle {
    store: Arc<dyn LedgerStore>,
}

impl LedgerHandle {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn LedgerStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| LedgerError::Storage(format!("Ledger task failed: {}", e)))?
    }

    pub async fn initialize(&self) -> Result<()> {
        self.run(|store| store.initialize()).await
    }

    pub async fn add_transaction(&self, transaction: NewTransaction) -> Result<i64> {
        self.run(move |store| store.add_transaction(&transaction)).await
    }

    pub async fn list_transactions(&self, filter: TransactionFilter) -> Result<Vec<Transaction>> {
        self.run(move |store| store.list_transactions(&filter)).await
    }

    pub async fn get_transactions(&self, limit: Option<usize>) -> Result<Vec<Transaction>> {
        self.run(move |store| store.get_transactions(limit)).await
    }

    pub async fn get_transactions_by_date_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<Transaction>> {
        self.run(move |store| store.get_transactions_by_date_range(&range))
            .await
    }

    pub async fn get_transactions_by_type(
        &self,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>> {
        self.run(move |store| store.get_transactions_by_type(kind)).await
    }

    pub async fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        self.run(move |store| store.get_transaction_by_id(id)).await
    }

    pub async fn update_transaction(&self, id: i64, patch: TransactionPatch) -> Result<()> {
        self.run(move |store| store.update_transaction(id, &patch))
            .await
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.run(move |store| store.delete_transaction(id)).await
    }

    pub async fn get_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<Category>> {
        self.run(move |store| store.get_categories(kind)).await
    }

    pub async fn add_category(&self, category: NewCategory) -> Result<Option<i64>> {
        self.run(move |store| store.add_category(&category)).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.run(move |store| store.delete_category(id)).await
    }

    pub async fn get_budgets(&self) -> Result<Vec<Budget>> {
        self.run(|store| store.get_budgets()).await
    }

    pub async fn add_budget(&self, budget: NewBudget) -> Result<i64> {
        self.run(move |store| store.add_budget(&budget)).await
    }

    pub async fn update_budget(&self, id: i64, patch: BudgetPatch) -> Result<()> {
        self.run(move |store| store.update_budget(id, &patch)).await
    }

    pub async fn delete_budget(&self, id: i64) -> Result<()> {
        self.run(move |store| store.delete_budget(id)).await
    }

    pub async fn get_budget_progress(
        &self,
        category: impl Into<String>,
        period: BudgetPeriod,
    ) -> Result<f64> {
        let category = category.into();
        self.run(move |store| store.get_budget_progress(&category, period))
            .await
    }

    pub async fn budget_statuses(&self, now: DateTime<Local>) -> Result<Vec<BudgetStatus>> {
        self.run(move |store| store.budget_statuses(now)).await
    }

    pub async fn get_total_income(&self, range: Option<DateRange>) -> Result<f64> {
        self.run(move |store| store.get_total_income(range.as_ref()))
            .await
    }

    pub async fn get_total_expense(&self, range: Option<DateRange>) -> Result<f64> {
        self.run(move |store| store.get_total_expense(range.as_ref()))
            .await
    }

    pub async fn get_balance(&self, range: Option<DateRange>) -> Result<f64> {
        self.run(move |store| store.get_balance(range.as_ref())).await
    }

    pub async fn get_summary(&self, range: Option<DateRange>) -> Result<Summary> {
        self.run(move |store| store.get_summary(range.as_ref())).await
    }

    pub async fn get_category_totals(
        &self,
        kind: TransactionKind,
        range: Option<DateRange>,
    ) -> Result<Vec<CategoryTotal>> {
        self.run(move |store| store.get_category_totals(kind, range.as_ref()))
            .await
    }

    pub async fn get_daily_stats(&self, range: DateRange) -> Result<Vec<DailyStat>> {
        self.run(move |store| store.get_daily_stats(&range)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteLedger;
    use chrono::{TimeZone, Utc};

    fn handle() -> LedgerHandle {
        LedgerHandle::new(Arc::new(SqliteLedger::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_round_trip_through_blocking_pool() {
        let ledger = handle();
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        let id = ledger
            .add_transaction(
                NewTransaction::new(TransactionKind::Expense, 45.0, "Food & Dining", date)
                    .with_description("Lunch"),
            )
            .await
            .unwrap();

        let fetched = ledger.get_transaction_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.description, "Lunch");
        assert_eq!(fetched.date, date);
    }

    #[tokio::test]
    async fn test_clones_share_one_store() {
        let first = handle();
        let second = first.clone();
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        first
            .add_transaction(NewTransaction::new(TransactionKind::Income, 300.0, "Salary", date))
            .await
            .unwrap();

        assert_eq!(second.get_balance(None).await.unwrap(), 300.0);
    }

    #[tokio::test]
    async fn test_concurrent_writers_get_distinct_ids() {
        let ledger = handle();
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        let tasks: Vec<_> = (1..=8)
            .map(|n| {
                let ledger = ledger.clone();
                tokio::spawn(async move {
                    ledger
                        .add_transaction(NewTransaction::new(
                            TransactionKind::Expense,
                            n as f64,
                            "Shopping",
                            date,
                        ))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap());
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        assert_eq!(ledger.get_total_expense(None).await.unwrap(), 36.0);
    }

    #[tokio::test]
    async fn test_validation_errors_surface() {
        let ledger = handle();
        let err = ledger
            .add_budget(NewBudget::new("Shopping", -1.0, BudgetPeriod::Weekly))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
