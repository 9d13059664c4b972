//! Human-readable rows and detail blocks.

use dompet_core::receipt::split_description;
use dompet_core::storage::{BudgetStatus, Transaction, TransactionKind};

use crate::config::DisplaySection;
use crate::ui::format::{
    category_label, format_amount, format_datetime, format_money, progress_bar, single_line,
    truncate,
};
use crate::ui::theme::{styled, styles};
use crate::ui::{kv, Column, UiContext};

pub const TRANSACTION_COLUMNS: [Column; 5] = [
    Column::new("ID"),
    Column::new("Date"),
    Column::new("Category"),
    Column::new("Description"),
    Column::numeric("Amount"),
];

pub const BUDGET_COLUMNS: [Column; 6] = [
    Column::new("ID"),
    Column::new("Category"),
    Column::new("Period"),
    Column::numeric("Spent"),
    Column::numeric("Limit"),
    Column::new("Progress"),
];

/// Signed, colored amount: `+1,000.00` for income, `-400.00` for expense.
pub fn signed_amount(ctx: &UiContext, kind: TransactionKind, amount: f64, compact: bool) -> String {
    match kind {
        TransactionKind::Income => styled(
            &format!("+{}", format_amount(amount, compact)),
            styles::income(),
            ctx.color,
        ),
        TransactionKind::Expense => styled(
            &format!("-{}", format_amount(amount, compact)),
            styles::expense(),
            ctx.color,
        ),
    }
}

pub fn transaction_rows(
    ctx: &UiContext,
    transactions: &[Transaction],
    display: &DisplaySection,
) -> Vec<Vec<String>> {
    transactions
        .iter()
        .map(|tx| {
            vec![
                tx.id.to_string(),
                format_datetime(&tx.date),
                category_label(&tx.category, ctx.unicode),
                truncate(&single_line(&tx.description), 40),
                signed_amount(ctx, tx.kind, tx.amount, display.compact),
            ]
        })
        .collect()
}

/// Key/value block for `show`.
pub fn transaction_details(
    ctx: &UiContext,
    tx: &Transaction,
    display: &DisplaySection,
) -> Vec<String> {
    let (merchant, note) = split_description(&tx.description);
    let mut lines = vec![
        kv(ctx, "ID", &tx.id.to_string()),
        kv(ctx, "Type", tx.kind.as_str()),
        kv(
            ctx,
            "Amount",
            &format_money(tx.amount, &display.currency, display.compact),
        ),
        kv(ctx, "Category", &category_label(&tx.category, ctx.unicode)),
        kv(ctx, "Date", &format_datetime(&tx.date)),
    ];
    if !merchant.is_empty() {
        lines.push(kv(ctx, "Merchant", merchant));
    }
    if let Some(note) = note {
        lines.push(kv(ctx, "Note", note));
    }
    if let Some(image) = &tx.image {
        lines.push(kv(ctx, "Receipt", image));
    }
    lines.push(kv(ctx, "Created", &format_datetime(&tx.created_at)));
    lines
}

pub fn budget_rows(
    ctx: &UiContext,
    statuses: &[BudgetStatus],
    display: &DisplaySection,
) -> Vec<Vec<String>> {
    statuses
        .iter()
        .map(|status| {
            let style = if status.over_limit {
                styles::expense()
            } else if status.ratio >= 0.8 {
                styles::warning()
            } else {
                styles::income()
            };
            let bar = format!(
                "{} {:>3.0}% ({}d left)",
                progress_bar(status.ratio, 12, ctx.unicode),
                status.ratio * 100.0,
                status.days_left
            );
            vec![
                status.budget.id.to_string(),
                category_label(&status.budget.category, ctx.unicode),
                status.budget.period.to_string(),
                format_amount(status.spent, display.compact),
                format_amount(status.budget.amount, display.compact),
                styled(&bar, style, ctx.color),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use chrono::{TimeZone, Utc};

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_signed_amount_plain() {
        let ctx = plain_ctx();
        assert_eq!(signed_amount(&ctx, TransactionKind::Income, 1000.0, false), "+1,000.00");
        assert_eq!(signed_amount(&ctx, TransactionKind::Expense, 400.0, false), "-400.00");
    }

    #[test]
    fn test_details_include_merchant_and_note() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let tx = Transaction {
            id: 3,
            kind: TransactionKind::Expense,
            amount: 12.0,
            category: "Transportation".to_string(),
            description: "Grab - ride home".to_string(),
            date,
            image: Some("file:///r.jpg".to_string()),
            created_at: date,
        };

        let lines = transaction_details(&plain_ctx(), &tx, &DisplaySection::default());

        assert!(lines.contains(&"merchant=Grab".to_string()));
        assert!(lines.contains(&"note=ride home".to_string()));
        assert!(lines.contains(&"receipt=file:///r.jpg".to_string()));
        assert!(lines.contains(&"amount=USD 12.00".to_string()));
    }
}
