//! JSON output shapes.

use dompet_core::receipt::split_description;
use dompet_core::storage::{BudgetStatus, Transaction};

/// A transaction plus its description split into merchant and note.
pub fn transaction_json(tx: &Transaction) -> serde_json::Value {
    let (merchant, note) = split_description(&tx.description);
    serde_json::json!({
        "id": tx.id,
        "type": tx.kind,
        "amount": tx.amount,
        "category": tx.category,
        "description": tx.description,
        "merchant": merchant,
        "note": note,
        "date": tx.date,
        "image": tx.image,
        "created_at": tx.created_at,
    })
}

pub fn transactions_json(transactions: &[Transaction]) -> Vec<serde_json::Value> {
    transactions.iter().map(transaction_json).collect()
}

pub fn budget_status_json(status: &BudgetStatus) -> serde_json::Value {
    serde_json::json!({
        "id": status.budget.id,
        "category": status.budget.category,
        "amount": status.budget.amount,
        "period": status.budget.period,
        "spent": status.spent,
        "remaining": (status.budget.amount - status.spent).max(0.0),
        "ratio": status.ratio,
        "over_limit": status.over_limit,
        "days_left": status.days_left,
        "window_start": status.window.start,
        "window_end": status.window.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dompet_core::storage::TransactionKind;

    #[test]
    fn test_transaction_json_splits_description() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let tx = Transaction {
            id: 7,
            kind: TransactionKind::Expense,
            amount: 42.0,
            category: "Food & Dining".to_string(),
            description: "Warung Padang - lunch".to_string(),
            date,
            image: None,
            created_at: date,
        };

        let value = transaction_json(&tx);

        assert_eq!(value["type"], "expense");
        assert_eq!(value["merchant"], "Warung Padang");
        assert_eq!(value["note"], "lunch");
        assert!(value["image"].is_null());
    }
}
