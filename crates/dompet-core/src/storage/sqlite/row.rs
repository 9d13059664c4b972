//! Row types for database queries and timestamp encoding.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{LedgerError, Result};
use crate::storage::types::{Budget, Category, Transaction};

pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, type, amount, category, description, date, image, created_at";
pub(crate) const CATEGORY_COLUMNS: &str = "id, name, type, icon, color";
pub(crate) const BUDGET_COLUMNS: &str = "id, category, amount, period, created_at";

/// Encode a timestamp as fixed-width ISO-8601 (`2024-03-01T09:30:00.000Z`),
/// so string comparison in SQL matches chronological order.
pub(crate) fn encode_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode a stored timestamp. Accepts any RFC 3339 value and the
/// `YYYY-MM-DD HH:MM:SS` form SQLite's `CURRENT_TIMESTAMP` produces.
pub(crate) fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| LedgerError::Storage(format!("Invalid timestamp \"{}\": {}", value, e)))
}

/// Raw row data from the transactions table, before parsing into domain types.
#[derive(Debug)]
pub struct TransactionRow {
    pub id: i64,
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: String,
    pub image: Option<String>,
    pub created_at: Option<String>,
}

impl TransactionRow {
    /// Read a row selected with `TRANSACTION_COLUMNS`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            kind: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            description: row.get(4)?,
            date: row.get(5)?,
            image: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = LedgerError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        let kind = row
            .kind
            .parse()
            .map_err(|_| LedgerError::Storage(format!("Invalid transaction type: {}", row.kind)))?;
        let date = decode_timestamp(&row.date)?;
        // Legacy rows may lack created_at; fall back to the attributed date.
        let created_at = match row.created_at {
            Some(ref value) => decode_timestamp(value)?,
            None => date,
        };

        Ok(Transaction {
            id: row.id,
            kind,
            amount: row.amount,
            category: row.category,
            description: row.description.unwrap_or_default(),
            date,
            image: row.image,
            created_at,
        })
    }
}

/// Raw row data from the categories table.
#[derive(Debug)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub icon: String,
    pub color: String,
}

impl CategoryRow {
    /// Read a row selected with `CATEGORY_COLUMNS`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: row.get(2)?,
            icon: row.get(3)?,
            color: row.get(4)?,
        })
    }
}

impl TryFrom<CategoryRow> for Category {
    type Error = LedgerError;

    fn try_from(row: CategoryRow) -> Result<Self> {
        let kind = row
            .kind
            .parse()
            .map_err(|_| LedgerError::Storage(format!("Invalid category type: {}", row.kind)))?;
        Ok(Category {
            id: row.id,
            name: row.name,
            kind,
            icon: row.icon,
            color: row.color,
        })
    }
}

/// Raw row data from the budgets table.
#[derive(Debug)]
pub struct BudgetRow {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    pub period: String,
    pub created_at: Option<String>,
}

impl BudgetRow {
    /// Read a row selected with `BUDGET_COLUMNS`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            category: row.get(1)?,
            amount: row.get(2)?,
            period: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl TryFrom<BudgetRow> for Budget {
    type Error = LedgerError;

    fn try_from(row: BudgetRow) -> Result<Self> {
        let period = row
            .period
            .parse()
            .map_err(|_| LedgerError::Storage(format!("Invalid budget period: {}", row.period)))?;
        let created_at = row
            .created_at
            .as_deref()
            .map(decode_timestamp)
            .transpose()?
            .unwrap_or_default();

        Ok(Budget {
            id: row.id,
            category: row.category,
            amount: row.amount,
            period,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_timestamp_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let fractional = whole + chrono::Duration::microseconds(123_456);

        assert_eq!(encode_timestamp(&whole), "2024-03-01T09:30:00.000Z");
        assert_eq!(encode_timestamp(&fractional), "2024-03-01T09:30:00.123Z");
    }

    #[test]
    fn test_decode_accepts_sqlite_current_timestamp() {
        let decoded = decode_timestamp("2024-03-01 09:30:00").unwrap();
        assert_eq!(decoded, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_decode_accepts_offsets() {
        let decoded = decode_timestamp("2024-03-01T16:30:00+07:00").unwrap();
        assert_eq!(decoded, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_invalid_kind_is_storage_error() {
        let row = TransactionRow {
            id: 1,
            kind: "transfer".to_string(),
            amount: 1.0,
            category: "Gift".to_string(),
            description: None,
            date: "2024-03-01T00:00:00.000Z".to_string(),
            image: None,
            created_at: None,
        };

        let err = Transaction::try_from(row).unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
    }
}
