//! SQLite storage backend.
//!
//! A single connection guarded by a mutex serializes all access; one
//! process, one logical writer. Each read recomputes from persisted state.

mod patch;
mod row;
pub mod schema;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{Local, TimeZone, Utc};
use rusqlite::Connection;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::storage::traits::LedgerStore;
use crate::storage::types::{
    Budget, BudgetPatch, Category, CategoryTotal, DailyStat, DateRange, NewBudget, NewCategory,
    NewTransaction, Transaction, TransactionFilter, TransactionKind, TransactionPatch,
};

use patch::Assignments;
use row::{
    decode_timestamp, encode_timestamp, BudgetRow, CategoryRow, TransactionRow, BUDGET_COLUMNS,
    CATEGORY_COLUMNS, TRANSACTION_COLUMNS,
};

/// SQLite-backed ledger store.
pub struct SqliteLedger {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Open (or create) the ledger file at `path` and initialize it.
    ///
    /// The returned handle is ready to use; there is no lazy setup on first access.
    pub fn open(path: &Path) -> Result<Self> {
        crate::fs::ensure_parent_dir(path)?;
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened ledger file");
        Self::with_connection(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory ledger (tests and throwaway sessions).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, None)
    }

    fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        let ledger = Self {
            path,
            conn: Mutex::new(conn),
        };
        ledger.initialize()?;
        Ok(ledger)
    }

    /// Location of the backing file, `None` for in-memory ledgers.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| LedgerError::Storage("SQLite connection poisoned".to_string()))
    }

    /// Write a consistent copy of the ledger to `destination`, replacing any
    /// existing file there.
    pub fn backup_to(&self, destination: &Path) -> Result<()> {
        crate::fs::ensure_parent_dir(destination)?;
        let temp_path = crate::fs::temp_sibling(destination)?;
        let temp_str = temp_path
            .to_str()
            .ok_or_else(|| LedgerError::Storage("Backup path is not valid UTF-8".to_string()))?;

        {
            let conn = self.lock_conn()?;
            if let Err(err) = conn.execute("VACUUM INTO ?1", [temp_str]) {
                let _ = std::fs::remove_file(&temp_path);
                return Err(err.into());
            }
        }

        crate::fs::rename_with_fallback(&temp_path, destination)?;
        debug!(destination = %destination.display(), "wrote ledger backup");
        Ok(())
    }

    /// Daily income/expense buckets keyed by the calendar date in `tz`.
    pub fn get_daily_stats_in<Tz: TimeZone>(
        &self,
        range: &DateRange,
        tz: &Tz,
    ) -> Result<Vec<DailyStat>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, type, amount FROM transactions WHERE date BETWEEN ? AND ? ORDER BY date",
        )?;
        let rows = stmt.query_map(
            (encode_timestamp(&range.start), encode_timestamp(&range.end)),
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            },
        )?;

        let mut buckets: BTreeMap<_, (f64, f64)> = BTreeMap::new();
        for row in rows {
            let (date, kind, amount) = row?;
            let day = decode_timestamp(&date)?.with_timezone(tz).date_naive();
            let bucket = buckets.entry(day).or_insert((0.0, 0.0));
            match kind.as_str() {
                "income" => bucket.0 += amount,
                "expense" => bucket.1 += amount,
                other => {
                    return Err(LedgerError::Storage(format!(
                        "Invalid transaction type: {}",
                        other
                    )))
                }
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(day, (income, expense))| DailyStat {
                day,
                income,
                expense,
            })
            .collect())
    }
}

fn validate_amount(amount: f64, subject: &str) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "{} amount must be a positive number (got {})",
            subject, amount
        )));
    }
    Ok(())
}

impl LedgerStore for SqliteLedger {
    fn initialize(&self) -> Result<()> {
        let mut conn = self.lock_conn()?;
        schema::initialize(&mut conn)
    }

    fn add_transaction(&self, transaction: &NewTransaction) -> Result<i64> {
        validate_amount(transaction.amount, "Transaction")?;

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (type, amount, category, description, date, image, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            (
                transaction.kind.as_str(),
                transaction.amount,
                &transaction.category,
                &transaction.description,
                encode_timestamp(&transaction.date),
                &transaction.image,
                encode_timestamp(&Utc::now()),
            ),
        )?;
        let id = conn.last_insert_rowid();

        debug!(id, kind = %transaction.kind, "inserted transaction");
        Ok(id)
    }

    fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(kind) = filter.kind {
            conditions.push("type = ?");
            params.push(Box::new(kind.as_str()));
        }

        if let Some(ref category) = filter.category {
            conditions.push("category = ?");
            params.push(Box::new(category.clone()));
        }

        if let Some(range) = filter.range {
            conditions.push("date BETWEEN ? AND ?");
            params.push(Box::new(encode_timestamp(&range.start)));
            params.push(Box::new(encode_timestamp(&range.end)));
        }

        let mut query = format!("SELECT {} FROM transactions", TRANSACTION_COLUMNS);
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY date DESC, created_at DESC, id DESC");

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params.push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter()),
            TransactionRow::from_row,
        )?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?.try_into()?);
        }
        Ok(transactions)
    }

    fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.lock_conn()?;

        let result = conn.query_row(
            &format!("SELECT {} FROM transactions WHERE id = ?", TRANSACTION_COLUMNS),
            [id],
            TransactionRow::from_row,
        );

        match result {
            Ok(row) => Ok(Some(row.try_into()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<()> {
        if let Some(amount) = patch.amount {
            validate_amount(amount, "Transaction")?;
        }

        let assignments = Assignments::from(patch);
        if assignments.is_empty() {
            return Ok(());
        }

        let (sql, params) = assignments.into_update("transactions", id);
        let conn = self.lock_conn()?;
        let changed = conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?;

        debug!(id, changed, "updated transaction");
        Ok(())
    }

    fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.lock_conn()?;
        let changed = conn.execute("DELETE FROM transactions WHERE id = ?", [id])?;
        debug!(id, changed, "deleted transaction");
        Ok(())
    }

    fn get_categories(&self, kind: Option<TransactionKind>) -> Result<Vec<Category>> {
        let conn = self.lock_conn()?;

        let (sql, params) = match kind {
            Some(kind) => (
                format!(
                    "SELECT {} FROM categories WHERE type = ? ORDER BY name",
                    CATEGORY_COLUMNS
                ),
                vec![kind.as_str()],
            ),
            None => (
                format!("SELECT {} FROM categories ORDER BY type, name", CATEGORY_COLUMNS),
                Vec::new(),
            ),
        };

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), CategoryRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Category::try_from).collect()
    }

    fn add_category(&self, category: &NewCategory) -> Result<Option<i64>> {
        if category.name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Category name must not be empty".to_string(),
            ));
        }

        let conn = self.lock_conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO categories (name, type, icon, color) VALUES (?, ?, ?, ?)",
            (
                &category.name,
                category.kind.as_str(),
                &category.icon,
                &category.color,
            ),
        )?;

        if inserted == 0 {
            debug!(name = %category.name, "category name taken, insert ignored");
            return Ok(None);
        }
        let id = conn.last_insert_rowid();
        debug!(id, name = %category.name, "inserted category");
        Ok(Some(id))
    }

    fn delete_category(&self, id: i64) -> Result<()> {
        let conn = self.lock_conn()?;
        let changed = conn.execute("DELETE FROM categories WHERE id = ?", [id])?;
        debug!(id, changed, "deleted category");
        Ok(())
    }

    fn get_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM budgets ORDER BY created_at DESC, id DESC",
            BUDGET_COLUMNS
        ))?;
        let rows = stmt.query_map([], BudgetRow::from_row)?;

        let mut budgets = Vec::new();
        for row in rows {
            budgets.push(row?.try_into()?);
        }
        Ok(budgets)
    }

    fn add_budget(&self, budget: &NewBudget) -> Result<i64> {
        validate_amount(budget.amount, "Budget")?;

        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO budgets (category, amount, period, created_at) VALUES (?, ?, ?, ?)",
            (
                &budget.category,
                budget.amount,
                budget.period.as_str(),
                encode_timestamp(&Utc::now()),
            ),
        )?;
        let id = conn.last_insert_rowid();

        debug!(id, period = %budget.period, "inserted budget");
        Ok(id)
    }

    fn update_budget(&self, id: i64, patch: &BudgetPatch) -> Result<()> {
        if let Some(amount) = patch.amount {
            validate_amount(amount, "Budget")?;
        }

        let assignments = Assignments::from(patch);
        if assignments.is_empty() {
            return Ok(());
        }

        let (sql, params) = assignments.into_update("budgets", id);
        let conn = self.lock_conn()?;
        let changed = conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?;

        debug!(id, changed, "updated budget");
        Ok(())
    }

    fn delete_budget(&self, id: i64) -> Result<()> {
        let conn = self.lock_conn()?;
        let changed = conn.execute("DELETE FROM budgets WHERE id = ?", [id])?;
        debug!(id, changed, "deleted budget");
        Ok(())
    }

    fn category_expense_in(&self, category: &str, range: &DateRange) -> Result<f64> {
        let conn = self.lock_conn()?;
        let total = conn.query_row(
            r#"
            SELECT COALESCE(SUM(amount), 0.0)
            FROM transactions
            WHERE type = 'expense' AND category = ? AND date BETWEEN ? AND ?
            "#,
            (
                category,
                encode_timestamp(&range.start),
                encode_timestamp(&range.end),
            ),
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn total_by_kind(&self, kind: TransactionKind, range: Option<&DateRange>) -> Result<f64> {
        let conn = self.lock_conn()?;

        let mut query =
            String::from("SELECT COALESCE(SUM(amount), 0.0) FROM transactions WHERE type = ?");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(kind.as_str())];
        if let Some(range) = range {
            query.push_str(" AND date BETWEEN ? AND ?");
            params.push(Box::new(encode_timestamp(&range.start)));
            params.push(Box::new(encode_timestamp(&range.end)));
        }

        let total = conn.query_row(
            &query,
            rusqlite::params_from_iter(params.iter()),
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn get_category_totals(
        &self,
        kind: TransactionKind,
        range: Option<&DateRange>,
    ) -> Result<Vec<CategoryTotal>> {
        let conn = self.lock_conn()?;

        let mut query =
            String::from("SELECT category, SUM(amount) AS total FROM transactions WHERE type = ?");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(kind.as_str())];
        if let Some(range) = range {
            query.push_str(" AND date BETWEEN ? AND ?");
            params.push(Box::new(encode_timestamp(&range.start)));
            params.push(Box::new(encode_timestamp(&range.end)));
        }
        query.push_str(" GROUP BY category ORDER BY total DESC, category ASC");

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get_daily_stats(&self, range: &DateRange) -> Result<Vec<DailyStat>> {
        self.get_daily_stats_in(range, &Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use tempfile::tempdir;

    fn at(y: i32, m: u32, d: u32, h: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dompet.db");

        let ledger = SqliteLedger::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(ledger.path(), Some(path.as_path()));
    }

    #[test]
    fn test_in_memory_has_no_path() {
        let ledger = SqliteLedger::open_in_memory().unwrap();
        assert!(ledger.path().is_none());
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let ledger = SqliteLedger::open_in_memory().unwrap();

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let tx = NewTransaction::new(TransactionKind::Expense, amount, "Gift", at(2024, 3, 1, 9));
            let err = ledger.add_transaction(&tx).unwrap_err();
            assert!(err.is_validation());
        }

        let err = ledger
            .add_budget(&NewBudget::new("Shopping", 0.0, crate::storage::BudgetPeriod::Monthly))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_patch_with_bad_amount_leaves_row_untouched() {
        let ledger = SqliteLedger::open_in_memory().unwrap();
        let id = ledger
            .add_transaction(&NewTransaction::new(
                TransactionKind::Expense,
                20.0,
                "Shopping",
                at(2024, 3, 1, 9),
            ))
            .unwrap();

        let patch = TransactionPatch::new().amount(-1.0).category("Gift");
        assert!(ledger.update_transaction(id, &patch).is_err());

        let stored = ledger.get_transaction_by_id(id).unwrap().unwrap();
        assert_eq!(stored.amount, 20.0);
        assert_eq!(stored.category, "Shopping");
    }

    #[test]
    fn test_daily_stats_bucket_by_zone_date() {
        let ledger = SqliteLedger::open_in_memory().unwrap();
        // 20:00 UTC on the 1st is already the 2nd at UTC+7.
        ledger
            .add_transaction(&NewTransaction::new(
                TransactionKind::Income,
                100.0,
                "Salary",
                at(2024, 3, 1, 20),
            ))
            .unwrap();
        ledger
            .add_transaction(&NewTransaction::new(
                TransactionKind::Expense,
                40.0,
                "Shopping",
                at(2024, 3, 2, 3),
            ))
            .unwrap();

        let range = DateRange::new(at(2024, 2, 28, 0), at(2024, 3, 5, 0));
        let utc = ledger.get_daily_stats_in(&range, &Utc).unwrap();
        let plus7 = ledger
            .get_daily_stats_in(&range, &FixedOffset::east_opt(7 * 3600).unwrap())
            .unwrap();

        assert_eq!(utc.len(), 2);
        assert_eq!(plus7.len(), 1);
        assert_eq!(plus7[0].day, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(plus7[0].income, 100.0);
        assert_eq!(plus7[0].expense, 40.0);
    }

    #[test]
    fn test_backup_is_a_readable_ledger() {
        let dir = tempdir().unwrap();
        let ledger = SqliteLedger::open(&dir.path().join("dompet.db")).unwrap();
        ledger
            .add_transaction(&NewTransaction::new(
                TransactionKind::Income,
                250.0,
                "Gift",
                at(2024, 3, 1, 9),
            ))
            .unwrap();

        let backup_path = dir.path().join("backups").join("copy.db");
        ledger.backup_to(&backup_path).unwrap();
        // A second backup replaces the first.
        ledger.backup_to(&backup_path).unwrap();

        let restored = SqliteLedger::open(&backup_path).unwrap();
        assert_eq!(restored.get_total_income(None).unwrap(), 250.0);
        assert_eq!(
            restored.get_categories(None).unwrap().len(),
            schema::DEFAULT_CATEGORIES.len()
        );
    }

    #[test]
    fn test_failed_backup_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let ledger = SqliteLedger::open_in_memory().unwrap();
        let backup_dir = dir.path().join("backups");
        std::fs::create_dir_all(&backup_dir).unwrap();

        // VACUUM is refused while a transaction is open.
        ledger.lock_conn().unwrap().execute_batch("BEGIN").unwrap();
        assert!(ledger.backup_to(&backup_dir.join("copy.db")).is_err());
        ledger.lock_conn().unwrap().execute_batch("ROLLBACK").unwrap();

        assert_eq!(std::fs::read_dir(&backup_dir).unwrap().count(), 0);
    }
}
