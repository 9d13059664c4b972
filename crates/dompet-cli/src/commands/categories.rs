use dompet_core::storage::{Category, LedgerStore, NewCategory};

use crate::app::{AppContext, CliError};
use crate::cli::{CategoryAddArgs, CategoryArgs, CategoryListArgs, CategorySubcommand, DeleteArgs};
use crate::helpers::{confirm_delete, parse_kind};
use crate::ui::format::category_label;
use crate::ui::{badge, print, print_json, table, Badge, Column};

const CATEGORY_COLUMNS: [Column; 5] = [
    Column::new("ID"),
    Column::new("Name"),
    Column::new("Type"),
    Column::new("Icon"),
    Column::new("Color"),
];

pub fn handle_category(ctx: &AppContext, args: &CategoryArgs) -> anyhow::Result<()> {
    match &args.command {
        CategorySubcommand::List(list_args) => handle_list(ctx, list_args),
        CategorySubcommand::Add(add_args) => handle_add(ctx, add_args),
        CategorySubcommand::Delete(delete_args) => handle_delete(ctx, delete_args),
    }
}

fn handle_list(ctx: &AppContext, args: &CategoryListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let kind = args.kind.as_deref().map(parse_kind).transpose()?;
    let categories = store.get_categories(kind)?;

    let ui = ctx.ui(args.json, None);
    if ui.mode.is_json() {
        return print_json(&categories);
    }

    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|category| {
            vec![
                category.id.to_string(),
                category_label(&category.name, ui.unicode),
                category.kind.to_string(),
                category.icon.clone(),
                category.color.clone(),
            ]
        })
        .collect();
    print(&ui, &table(&ui, &CATEGORY_COLUMNS, &rows));
    Ok(())
}

fn handle_add(ctx: &AppContext, args: &CategoryAddArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let kind = parse_kind(&args.kind)?;
    let category = NewCategory::new(args.name.trim(), kind, args.icon.clone(), args.color.clone());

    let ui = ctx.ui(false, None);
    match store.add_category(&category)? {
        Some(id) => {
            if ctx.quiet() {
                println!("{}", id);
            } else {
                print(
                    &ui,
                    &badge(&ui, Badge::Ok, &format!("Added {} category \"{}\"", kind, category.name)),
                );
            }
        }
        None => {
            if !ctx.quiet() {
                print(
                    &ui,
                    &badge(
                        &ui,
                        Badge::Warn,
                        &format!("Category \"{}\" already exists; nothing added", category.name),
                    ),
                );
            }
        }
    }
    Ok(())
}

fn find_category(store: &dyn LedgerStore, id: i64) -> anyhow::Result<Category> {
    store
        .get_categories(None)?
        .into_iter()
        .find(|category| category.id == id)
        .ok_or_else(|| {
            CliError::not_found(
                format!("Category {} not found", id),
                "Run `dompet category list` to find category IDs",
            )
            .into()
        })
}

fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let category = find_category(&store, args.id)?;

    let ui = ctx.ui(false, None);
    if !confirm_delete(&ui, &format!("category \"{}\"", category.name), args.yes)? {
        return Err(anyhow::anyhow!("Delete cancelled"));
    }
    store.delete_category(args.id)?;

    if !ctx.quiet() {
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Deleted category \"{}\"", category.name)),
        );
    }
    Ok(())
}
