use chrono::Local;

use dompet_core::storage::{Budget, BudgetPatch, LedgerStore, NewBudget};

use crate::app::{AppContext, CliError};
use crate::cli::{BudgetAddArgs, BudgetArgs, BudgetEditArgs, BudgetListArgs, BudgetSubcommand, DeleteArgs};
use crate::helpers::{confirm_delete, parse_period};
use crate::output::{budget_rows, budget_status_json, BUDGET_COLUMNS};
use crate::ui::{badge, hint, print, print_json, table, Badge};

pub fn handle_budget(ctx: &AppContext, args: &BudgetArgs) -> anyhow::Result<()> {
    match &args.command {
        BudgetSubcommand::List(list_args) => handle_list(ctx, list_args),
        BudgetSubcommand::Add(add_args) => handle_add(ctx, add_args),
        BudgetSubcommand::Edit(edit_args) => handle_edit(ctx, edit_args),
        BudgetSubcommand::Delete(delete_args) => handle_delete(ctx, delete_args),
    }
}

fn handle_list(ctx: &AppContext, args: &BudgetListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let statuses = store.budget_statuses(Local::now())?;

    let ui = ctx.ui(args.json, None);
    if ui.mode.is_json() {
        let values: Vec<_> = statuses.iter().map(budget_status_json).collect();
        return print_json(&values);
    }

    if statuses.is_empty() {
        if !ctx.quiet() {
            print(&ui, &hint(&ui, "No budgets yet. Create one with `dompet budget add`"));
        }
        return Ok(());
    }

    let rows = budget_rows(&ui, &statuses, &ctx.config().display);
    print(&ui, &table(&ui, &BUDGET_COLUMNS, &rows));
    Ok(())
}

fn handle_add(ctx: &AppContext, args: &BudgetAddArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let period = parse_period(&args.period)?;
    let id = store.add_budget(&NewBudget::new(args.category.trim(), args.amount, period))?;

    if ctx.quiet() {
        println!("{}", id);
        return Ok(());
    }
    let ui = ctx.ui(false, None);
    print(
        &ui,
        &badge(
            &ui,
            Badge::Ok,
            &format!("Added {} budget #{} for {}", period, id, args.category.trim()),
        ),
    );
    Ok(())
}

fn find_budget(store: &dyn LedgerStore, id: i64) -> anyhow::Result<Budget> {
    store
        .get_budgets()?
        .into_iter()
        .find(|budget| budget.id == id)
        .ok_or_else(|| {
            CliError::not_found(
                format!("Budget {} not found", id),
                "Run `dompet budget list` to find budget IDs",
            )
            .into()
        })
}

fn handle_edit(ctx: &AppContext, args: &BudgetEditArgs) -> anyhow::Result<()> {
    let mut patch = BudgetPatch::new();
    if let Some(ref category) = args.category {
        patch = patch.category(category.trim());
    }
    if let Some(amount) = args.amount {
        patch = patch.amount(amount);
    }
    if let Some(ref period) = args.period {
        patch = patch.period(parse_period(period)?);
    }
    if patch.is_empty() {
        return Err(CliError::invalid_input("Nothing to change; pass at least one field").into());
    }

    let store = ctx.open_store()?;
    find_budget(&store, args.id)?;
    store.update_budget(args.id, &patch)?;

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        print(&ui, &badge(&ui, Badge::Ok, &format!("Updated budget #{}", args.id)));
    }
    Ok(())
}

fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let budget = find_budget(&store, args.id)?;

    let ui = ctx.ui(false, None);
    let what = format!("{} budget #{} for {}", budget.period, budget.id, budget.category);
    if !confirm_delete(&ui, &what, args.yes)? {
        return Err(anyhow::anyhow!("Delete cancelled"));
    }
    store.delete_budget(args.id)?;

    if !ctx.quiet() {
        print(&ui, &badge(&ui, Badge::Ok, &format!("Deleted budget #{}", args.id)));
    }
    Ok(())
}
