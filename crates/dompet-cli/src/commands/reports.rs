use chrono::{Local, NaiveDate};

use dompet_core::period;
use dompet_core::stats::{percentage_change, zero_fill};
use dompet_core::storage::{LedgerStore, Summary, TransactionKind};

use crate::app::AppContext;
use crate::cli::{StatsArgs, SummaryArgs};
use crate::helpers::parse_month;
use crate::output::signed_amount;
use crate::ui::format::{category_label, format_amount, format_money};
use crate::ui::theme::{styled, styles};
use crate::ui::{header, kv, print, print_json, table, Column, UiContext};

fn selected_month(month: Option<&str>) -> anyhow::Result<NaiveDate> {
    match month {
        Some(value) => parse_month(value),
        None => Ok(period::first_day_of_month(Local::now().date_naive())),
    }
}

pub fn handle_summary(ctx: &AppContext, args: &SummaryArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let ui = ctx.ui(args.json, None);

    if args.all {
        let summary = store.get_summary(None)?;
        if ui.mode.is_json() {
            return print_json(&serde_json::json!({ "range": "all", "summary": summary }));
        }
        print(&ui, &header(&ui, "summary", Some("all time")));
        print_summary(ctx, &ui, &summary);
        return Ok(());
    }

    let month = selected_month(args.month.as_deref())?;
    let current = store.get_summary(Some(&period::month_range(&Local, month)))?;
    let previous_month = period::previous_month(month);
    let previous = store.get_summary(Some(&period::month_range(&Local, previous_month)))?;

    let income_change = percentage_change(current.income, previous.income);
    let expense_change = percentage_change(current.expense, previous.expense);

    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "month": month.format("%Y-%m").to_string(),
            "summary": current,
            "previous_month": previous_month.format("%Y-%m").to_string(),
            "previous": previous,
            "income_change_pct": income_change,
            "expense_change_pct": expense_change,
        }));
    }

    print(
        &ui,
        &header(&ui, "summary", Some(&month.format("%Y-%m").to_string())),
    );
    print_summary(ctx, &ui, &current);
    print(
        &ui,
        &kv(&ui, "Income vs last month", &format_change(&ui, income_change, false)),
    );
    print(
        &ui,
        &kv(&ui, "Expense vs last month", &format_change(&ui, expense_change, true)),
    );
    Ok(())
}

fn print_summary(ctx: &AppContext, ui: &UiContext, summary: &Summary) {
    let display = &ctx.config().display;
    print(
        ui,
        &kv(ui, "Income", &format_money(summary.income, &display.currency, display.compact)),
    );
    print(
        ui,
        &kv(ui, "Expense", &format_money(summary.expense, &display.currency, display.compact)),
    );
    let balance = format_money(summary.balance, &display.currency, display.compact);
    let style = if summary.balance < 0.0 {
        styles::expense()
    } else {
        styles::income()
    };
    print(ui, &kv(ui, "Balance", &styled(&balance, style, ui.color)));
}

/// `+12.5%`, colored so that growing spending reads as bad.
fn format_change(ui: &UiContext, change: f64, higher_is_worse: bool) -> String {
    let text = format!("{:+.1}%", change);
    let worse = if higher_is_worse {
        change > 0.0
    } else {
        change < 0.0
    };
    let style = if worse {
        styles::expense()
    } else {
        styles::income()
    };
    styled(&text, style, ui.color)
}

pub fn handle_stats(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let month = selected_month(args.month.as_deref())?;
    let range = period::month_range(&Local, month);

    let expense_totals = store.get_category_totals(TransactionKind::Expense, Some(&range))?;
    let income_totals = store.get_category_totals(TransactionKind::Income, Some(&range))?;
    let mut daily = store.get_daily_stats(&range)?;
    if args.fill {
        daily = zero_fill(&daily, month, period::last_day_of_month(month));
    }

    let ui = ctx.ui(args.json, None);
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "month": month.format("%Y-%m").to_string(),
            "expense_by_category": expense_totals,
            "income_by_category": income_totals,
            "daily": daily,
        }));
    }

    let display = &ctx.config().display;
    print(
        &ui,
        &header(&ui, "stats", Some(&month.format("%Y-%m").to_string())),
    );

    let total_expense: f64 = expense_totals.iter().map(|t| t.total).sum();
    let category_columns = [
        Column::new("Category"),
        Column::numeric("Total"),
        Column::numeric("Share"),
    ];
    let category_rows: Vec<Vec<String>> = expense_totals
        .iter()
        .map(|total| {
            let share = if total_expense > 0.0 {
                total.total / total_expense * 100.0
            } else {
                0.0
            };
            vec![
                category_label(&total.category, ui.unicode),
                format_amount(total.total, display.compact),
                format!("{:.1}%", share),
            ]
        })
        .collect();
    if !category_rows.is_empty() {
        print(&ui, &table(&ui, &category_columns, &category_rows));
    }

    let daily_columns = [
        Column::new("Day"),
        Column::numeric("Income"),
        Column::numeric("Expense"),
        Column::numeric("Net"),
    ];
    let daily_rows: Vec<Vec<String>> = daily
        .iter()
        .map(|stat| {
            let net = stat.net();
            let net_kind = if net < 0.0 {
                TransactionKind::Expense
            } else {
                TransactionKind::Income
            };
            vec![
                stat.day.format("%Y-%m-%d").to_string(),
                format_amount(stat.income, display.compact),
                format_amount(stat.expense, display.compact),
                signed_amount(&ui, net_kind, net.abs(), display.compact),
            ]
        })
        .collect();
    if !daily_rows.is_empty() {
        print(&ui, &table(&ui, &daily_columns, &daily_rows));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;

    #[test]
    fn test_format_change_sign() {
        let ui = UiContext {
            color: false,
            unicode: false,
            mode: OutputMode::Plain,
        };
        assert_eq!(format_change(&ui, 12.5, true), "+12.5%");
        assert_eq!(format_change(&ui, -40.0, false), "-40.0%");
        assert_eq!(format_change(&ui, 0.0, true), "+0.0%");
    }

    #[test]
    fn test_selected_month_parses_explicit_value() {
        assert_eq!(
            selected_month(Some("2024-02")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }
}
