//! Schema creation, additive migrations and default category seeding.

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::types::TransactionKind;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('income', 'expense')),
        amount REAL NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        date TEXT NOT NULL,
        image TEXT,
        created_at TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    );

    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL CHECK(type IN ('income', 'expense')),
        icon TEXT NOT NULL,
        color TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS budgets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT NOT NULL,
        amount REAL NOT NULL,
        period TEXT NOT NULL CHECK(period IN ('daily', 'weekly', 'monthly')),
        created_at TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    );
"#;

const INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(type);
    CREATE INDEX IF NOT EXISTS idx_categories_type ON categories(type);
    CREATE INDEX IF NOT EXISTS idx_budgets_category ON budgets(category);
"#;

/// Additive column migrations. Each may already be applied; failures are
/// logged and skipped rather than aborting initialization.
const COLUMN_MIGRATIONS: &[(&str, &str)] = &[(
    "transactions.image",
    "ALTER TABLE transactions ADD COLUMN image TEXT",
)];

/// Default category seeded into an empty store: (name, type, icon, color).
pub const DEFAULT_CATEGORIES: &[(&str, TransactionKind, &str, &str)] = &[
    ("Salary", TransactionKind::Income, "briefcase", "#10b981"),
    ("Freelance", TransactionKind::Income, "laptop", "#3b82f6"),
    ("Investment", TransactionKind::Income, "chart.line.uptrend.xyaxis", "#8b5cf6"),
    ("Gift", TransactionKind::Income, "gift", "#ec4899"),
    ("Other Income", TransactionKind::Income, "plus.circle", "#06b6d4"),
    ("Food & Dining", TransactionKind::Expense, "fork.knife", "#ef4444"),
    ("Transportation", TransactionKind::Expense, "car", "#f59e0b"),
    ("Shopping", TransactionKind::Expense, "cart", "#ec4899"),
    ("Entertainment", TransactionKind::Expense, "ticket", "#8b5cf6"),
    ("Bills & Utilities", TransactionKind::Expense, "bolt", "#3b82f6"),
    ("Healthcare", TransactionKind::Expense, "heart", "#f43f5e"),
    ("Education", TransactionKind::Expense, "book", "#06b6d4"),
    ("Other Expense", TransactionKind::Expense, "minus.circle", "#6b7280"),
];

/// Bring `conn` to the current schema and seed defaults. Safe to call repeatedly.
pub(crate) fn initialize(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    debug!("schema tables ensured");

    for (name, statement) in COLUMN_MIGRATIONS {
        match conn.execute_batch(statement) {
            Ok(()) => debug!(migration = name, "applied column migration"),
            Err(err) => warn!(migration = name, error = %err, "skipped column migration"),
        }
    }

    conn.execute_batch(INDEXES)?;
    seed_default_categories(conn)?;
    Ok(())
}

/// Insert the default categories, but only into an empty category table.
fn seed_default_categories(conn: &mut Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
    if count > 0 {
        debug!(count, "categories present, skipping seed");
        return Ok(());
    }

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO categories (name, type, icon, color) VALUES (?, ?, ?, ?)",
        )?;
        for (name, kind, icon, color) in DEFAULT_CATEGORIES {
            stmt.execute((name, kind.as_str(), icon, color))?;
        }
    }
    tx.commit()?;

    debug!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
    Ok(())
}
