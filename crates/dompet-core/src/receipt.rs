//! Receipt extraction drafts.
//!
//! An external extractor (OCR or a language model) returns a loosely
//! structured record for a photographed receipt. This module parses that
//! record and turns it into an ordinary [`NewTransaction`]; the store never
//! sees where the fields came from.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LedgerError, Result};
use crate::storage::{NewTransaction, TransactionKind};

const DESCRIPTION_SEPARATOR: &str = " - ";

/// Fields an extractor may recover from a receipt. All are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDraft {
    #[serde(default)]
    pub merchant: Option<String>,
    /// `YYYY-MM-DD` or a full RFC 3339 timestamp.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ReceiptDraft {
    /// Parse an extractor reply, tolerating a surrounding Markdown code fence.
    pub fn from_model_reply(text: &str) -> Result<Self> {
        let cleaned = text.replace("```json", "").replace("```", "");
        Ok(serde_json::from_str(cleaned.trim())?)
    }

    /// Build an expense from this draft.
    ///
    /// A missing date falls back to `now`, a missing category to
    /// `fallback_category`. The merchant and `note` are joined into the
    /// description.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` when the draft carries no amount.
    pub fn into_new_transaction(
        self,
        note: &str,
        fallback_category: &str,
        now: DateTime<Utc>,
    ) -> Result<NewTransaction> {
        let amount = self
            .amount
            .ok_or_else(|| LedgerError::Validation("Receipt has no amount".to_string()))?;

        let date = match self.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_receipt_date(raw).unwrap_or_else(|| {
                warn!(date = raw, "unreadable receipt date, using current time");
                now
            }),
            _ => now,
        };

        let category = self
            .category
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback_category.to_string());

        let description = compose_description(self.merchant.as_deref().unwrap_or(""), note);

        Ok(NewTransaction::new(TransactionKind::Expense, amount, category, date)
            .with_description(description))
    }
}

/// Date-only values are taken as midnight UTC.
fn parse_receipt_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}

/// Join a merchant and a note as `"merchant - note"`, or return whichever is non-empty.
pub fn compose_description(merchant: &str, note: &str) -> String {
    let merchant = merchant.trim();
    let note = note.trim();
    match (merchant.is_empty(), note.is_empty()) {
        (false, false) => format!("{}{}{}", merchant, DESCRIPTION_SEPARATOR, note),
        (false, true) => merchant.to_string(),
        _ => note.to_string(),
    }
}

/// Split a composite description back into `(merchant, note)`.
///
/// Descriptions without the separator are treated as a bare merchant.
pub fn split_description(description: &str) -> (&str, Option<&str>) {
    match description.split_once(DESCRIPTION_SEPARATOR) {
        Some((merchant, note)) => (merchant, Some(note)),
        None => (description, None),
    }
}
