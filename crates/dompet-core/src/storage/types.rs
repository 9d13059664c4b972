//! Core data types for the storage layer.
//!
//! Categories are referenced by name, not id: transactions and budgets keep
//! their label even after the category row is deleted. Renaming a category
//! is deliberately not offered.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Direction of a transaction (and the kind a category belongs to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::Validation(format!(
                "Unknown transaction type \"{}\" (expected income or expense)",
                other
            ))),
        }
    }
}

/// Recurring window a budget ceiling applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(LedgerError::Validation(format!(
                "Unknown budget period \"{}\" (expected daily, weekly or monthly)",
                other
            ))),
        }
    }
}

/// Inclusive time range used by range-restricted queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// True if `instant` falls inside the range (both bounds inclusive).
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}

/// A stored transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: i64,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Positive magnitude; direction is carried by `kind`
    pub amount: f64,

    /// Category name (denormalized, may be orphaned)
    pub category: String,

    /// Free text, often "merchant - note"
    pub description: String,

    /// When the transaction is attributed to
    pub date: DateTime<Utc>,

    /// Optional receipt image reference
    pub image: Option<String>,

    /// Store-assigned insertion timestamp
    pub created_at: DateTime<Utc>,
}

/// Builder for creating new transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub image: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            description: String::new(),
            date,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Sparse update for a transaction: only `Some` fields are written.
///
/// `image` is doubly optional so a patch can clear the reference
/// (`Some(None)`) as well as leave it untouched (`None`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub image: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.image.is_none()
    }
}

/// Filter for querying transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by direction
    pub kind: Option<TransactionKind>,

    /// Filter by exact category name
    pub category: Option<String>,

    /// Inclusive bounds on `date`
    pub range: Option<DateRange>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,

    /// Unique across the store, case-sensitively
    pub name: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Display-only symbol reference
    pub icon: String,

    /// Display-only color
    pub color: String,
}

/// Builder for creating new categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(
        name: impl Into<String>,
        kind: TransactionKind,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// A spending ceiling for a category over a recurring period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub created_at: DateTime<Utc>,
}

/// Builder for creating new budgets.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub period: BudgetPeriod,
}

impl NewBudget {
    pub fn new(category: impl Into<String>, amount: f64, period: BudgetPeriod) -> Self {
        Self {
            category: category.into(),
            amount,
            period,
        }
    }
}

/// Sparse update for a budget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<BudgetPeriod>,
}

impl BudgetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn period(mut self, period: BudgetPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.amount.is_none() && self.period.is_none()
    }
}

/// Per-category sum for one direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Income and expense sums for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub day: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

impl DailyStat {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Income, expense and balance over one range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// A budget together with its derived progress for the current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget: Budget,

    /// Expense total in the current occurrence of the period
    pub spent: f64,

    /// `spent / amount`, capped at 1.0
    pub ratio: f64,

    /// Spending has reached the ceiling
    pub over_limit: bool,

    /// Whole days remaining after today in the current period
    pub days_left: u32,

    /// Window the progress was computed over
    pub window: DateRange,

    /// Local time the status was computed at
    pub as_of: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!(" expense ".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
    }

    #[test]
    fn test_unknown_kind_is_validation_error() {
        let err = "transfer".parse::<TransactionKind>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_period_is_validation_error() {
        let err = "yearly".parse::<BudgetPeriod>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!("WEEKLY".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Weekly);
    }

    #[test]
    fn test_transaction_patch_builder() {
        let patch = TransactionPatch::new().amount(500.0).image(None);

        assert!(!patch.is_empty());
        assert_eq!(patch.amount, Some(500.0));
        assert_eq!(patch.image, Some(None));
        assert!(patch.category.is_none());
        assert!(TransactionPatch::new().is_empty());
    }

    #[test]
    fn test_transaction_filter_builder() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();

        let filter = TransactionFilter::new()
            .kind(TransactionKind::Expense)
            .category("Shopping")
            .range(DateRange::new(start, end))
            .limit(10);

        assert_eq!(filter.kind, Some(TransactionKind::Expense));
        assert_eq!(filter.category.as_deref(), Some("Shopping"));
        assert_eq!(filter.range.map(|r| r.start), Some(start));
        assert_eq!(filter.limit, Some(10));
    }

    #[test]
    fn test_date_range_contains_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let range = DateRange::new(start, end);

        assert!(range.contains(&start));
        assert!(range.contains(&end));
        assert!(!range.contains(&(end + chrono::Duration::milliseconds(1))));
    }

    #[test]
    fn test_transaction_serializes_kind_as_type() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let tx = Transaction {
            id: 7,
            kind: TransactionKind::Expense,
            amount: 12.5,
            category: "Food & Dining".to_string(),
            description: "Cafe - latte".to_string(),
            date,
            image: None,
            created_at: date,
        };

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["category"], "Food & Dining");
    }
}
