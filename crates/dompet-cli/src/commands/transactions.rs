use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::debug;

use dompet_core::period;
use dompet_core::receipt::compose_description;
use dompet_core::storage::{
    DateRange, LedgerStore, NewTransaction, Transaction, TransactionFilter, TransactionPatch,
};

use crate::app::{AppContext, CliError};
use crate::cli::{AddArgs, DeleteArgs, EditArgs, ListArgs, ShowArgs};
use crate::helpers::{confirm_delete, parse_datetime, parse_duration, parse_kind, parse_month};
use crate::output::{
    transaction_details, transaction_json, transaction_rows, transactions_json,
    TRANSACTION_COLUMNS,
};
use crate::ui::{badge, header, hint, print, print_json, table, Badge, UiContext};

const DEFAULT_LIST_LIMIT: usize = 20;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let kind = parse_kind(&args.kind)?;
    let date = match args.date {
        Some(ref value) => parse_datetime(value)?,
        None => Utc::now(),
    };
    let description = compose_description(
        args.merchant.as_deref().unwrap_or(""),
        args.note.as_deref().unwrap_or(""),
    );

    let mut transaction = NewTransaction::new(kind, args.amount, args.category.trim(), date)
        .with_description(description);
    if let Some(ref image) = args.image {
        transaction = transaction.with_image(image.clone());
    }

    let id = store.add_transaction(&transaction)?;

    if ctx.quiet() {
        println!("{}", id);
        return Ok(());
    }

    let ui = ctx.ui(false, None);
    print(
        &ui,
        &badge(&ui, Badge::Ok, &format!("Recorded {} #{}", kind, id)),
    );

    let known = store
        .get_categories(Some(kind))?
        .iter()
        .any(|category| category.name == transaction.category);
    if !known {
        print(
            &ui,
            &hint(
                &ui,
                &format!(
                    "\"{}\" is not a {} category; add it with `dompet category add`",
                    transaction.category, kind
                ),
            ),
        );
    }

    for status in store.budget_statuses(Local::now())? {
        if status.over_limit
            && status.budget.category == transaction.category
            && status.window.contains(&transaction.date)
        {
            print(
                &ui,
                &badge(
                    &ui,
                    Badge::Warn,
                    &format!(
                        "{} budget for {} exceeded",
                        status.budget.period, status.budget.category
                    ),
                ),
            );
        }
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let mut filter = TransactionFilter::new();
    if let Some(ref kind) = args.kind {
        filter = filter.kind(parse_kind(kind)?);
    }
    if let Some(ref category) = args.category {
        filter = filter.category(category.clone());
    }

    let range = list_range(args)?;
    if let Some(range) = range {
        filter = filter.range(range);
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    } else if range.is_none() {
        filter = filter.limit(DEFAULT_LIST_LIMIT);
    }

    debug!(?filter, "listing transactions");
    let transactions = store.list_transactions(&filter)?;

    let ui = ctx.ui(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&transactions_json(&transactions));
    }
    print_list(ctx, &ui, &transactions);
    Ok(())
}

fn list_range(args: &ListArgs) -> anyhow::Result<Option<DateRange>> {
    if let Some(ref last) = args.last {
        let now = Utc::now();
        let start = now.checked_sub_signed(parse_duration(last)?).ok_or_else(|| {
            CliError::invalid_input(format!("--last {} reaches before the earliest date", last))
        })?;
        return Ok(Some(DateRange::new(start, now)));
    }
    if let Some(ref month) = args.month {
        return Ok(Some(period::month_range(&Local, parse_month(month)?)));
    }
    if args.since.is_none() && args.until.is_none() {
        return Ok(None);
    }

    let start = match args.since {
        Some(ref value) => parse_datetime(value)?,
        None => unbounded_start(),
    };
    let end = match args.until {
        Some(ref value) => parse_datetime(value)?,
        None => unbounded_end(),
    };
    if start > end {
        return Err(CliError::invalid_input("--since must not be after --until").into());
    }
    Ok(Some(DateRange::new(start, end)))
}

fn unbounded_start() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).single().unwrap_or_default()
}

fn unbounded_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
        .single()
        .unwrap_or_else(Utc::now)
}

fn print_list(ctx: &AppContext, ui: &UiContext, transactions: &[Transaction]) {
    if transactions.is_empty() {
        if !ctx.quiet() {
            print(ui, &hint(ui, "No transactions found. Record one with `dompet add`"));
        }
        return;
    }

    if !ctx.quiet() && ui.mode.is_pretty() {
        print(ui, &header(ui, "list", Some(&format!("{} shown", transactions.len()))));
    }
    let rows = transaction_rows(ui, transactions, &ctx.config().display);
    print(ui, &table(ui, &TRANSACTION_COLUMNS, &rows));
}

fn require_transaction(store: &dyn LedgerStore, id: i64) -> anyhow::Result<Transaction> {
    store.get_transaction_by_id(id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Transaction {} not found", id),
            "Run `dompet list` to find transaction IDs",
        )
        .into()
    })
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let transaction = require_transaction(&store, args.id)?;

    let ui = ctx.ui(args.json, None);
    if ui.mode.is_json() {
        return print_json(&transaction_json(&transaction));
    }
    for line in transaction_details(&ui, &transaction, &ctx.config().display) {
        print(&ui, &line);
    }
    Ok(())
}

fn edit_patch(args: &EditArgs) -> anyhow::Result<TransactionPatch> {
    let mut patch = TransactionPatch::new();
    if let Some(ref kind) = args.kind {
        patch = patch.kind(parse_kind(kind)?);
    }
    if let Some(amount) = args.amount {
        patch = patch.amount(amount);
    }
    if let Some(ref category) = args.category {
        patch = patch.category(category.trim());
    }
    if let Some(ref description) = args.description {
        patch = patch.description(description.clone());
    }
    if let Some(ref date) = args.date {
        patch = patch.date(parse_datetime(date)?);
    }
    if let Some(ref image) = args.image {
        patch = patch.image(Some(image.clone()));
    } else if args.clear_image {
        patch = patch.image(None);
    }
    Ok(patch)
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let patch = edit_patch(args)?;
    if patch.is_empty() {
        return Err(CliError::invalid_input("Nothing to change; pass at least one field").into());
    }

    let store = ctx.open_store()?;
    require_transaction(&store, args.id)?;
    store.update_transaction(args.id, &patch)?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Updated transaction #{}", args.id)),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let transaction = require_transaction(&store, args.id)?;

    let ui = ctx.ui(false, None);
    let what = format!(
        "{} #{} ({} {})",
        transaction.kind, transaction.id, transaction.amount, transaction.category
    );
    if !confirm_delete(&ui, &what, args.yes)? {
        return Err(anyhow::anyhow!("Delete cancelled"));
    }
    store.delete_transaction(args.id)?;

    if !ctx.quiet() {
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Deleted transaction #{}", args.id)),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args() -> ListArgs {
        ListArgs {
            kind: None,
            category: None,
            last: None,
            month: None,
            since: None,
            until: None,
            limit: None,
            json: false,
            format: None,
        }
    }

    #[test]
    fn test_no_range_flags_means_no_range() {
        assert!(list_range(&list_args()).unwrap().is_none());
    }

    #[test]
    fn test_last_beyond_calendar_is_rejected() {
        let mut args = list_args();
        args.last = Some("1000000000d".to_string());

        let err = list_range(&args).unwrap_err();

        assert_eq!(crate::app::exit_code_for(&err), 4);
    }

    #[test]
    fn test_last_window_ends_now() {
        let mut args = list_args();
        args.last = Some("7d".to_string());

        let range = list_range(&args).unwrap().unwrap();

        assert_eq!(range.end - range.start, chrono::Duration::days(7));
    }

    #[test]
    fn test_since_only_is_open_ended() {
        let mut args = list_args();
        args.since = Some("2024-03-01T00:00:00Z".to_string());

        let range = list_range(&args).unwrap().unwrap();

        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert!(range.end > Utc::now());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut args = list_args();
        args.since = Some("2024-03-02T00:00:00Z".to_string());
        args.until = Some("2024-03-01T00:00:00Z".to_string());

        assert!(list_range(&args).is_err());
    }

    #[test]
    fn test_edit_patch_clear_image() {
        let args = EditArgs {
            id: 1,
            kind: None,
            amount: None,
            category: None,
            description: None,
            date: None,
            image: None,
            clear_image: true,
        };

        let patch = edit_patch(&args).unwrap();

        assert_eq!(patch.image, Some(None));
        assert!(!patch.is_empty());
    }
}
