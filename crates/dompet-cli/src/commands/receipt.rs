use chrono::Utc;
use tracing::debug;

use dompet_core::receipt::ReceiptDraft;
use dompet_core::LedgerStore;

use crate::app::{AppContext, CliError};
use crate::cli::ReceiptArgs;
use crate::helpers::read_source;
use crate::ui::format::format_money;
use crate::ui::{badge, print, Badge};

pub fn handle_receipt(ctx: &AppContext, args: &ReceiptArgs) -> anyhow::Result<()> {
    let reply = read_source(&args.file)?;
    let draft = ReceiptDraft::from_model_reply(&reply).map_err(|e| {
        CliError::invalid_input(format!("Could not parse receipt data: {}", e))
    })?;
    debug!(?draft, "parsed receipt draft");

    let mut transaction = draft.into_new_transaction(
        args.note.as_deref().unwrap_or(""),
        &args.fallback_category,
        Utc::now(),
    )?;
    if let Some(ref image) = args.image {
        transaction = transaction.with_image(image.clone());
    }

    let store = ctx.open_store()?;
    let id = store.add_transaction(&transaction)?;

    if ctx.quiet() {
        println!("{}", id);
        return Ok(());
    }
    let display = &ctx.config().display;
    let ui = ctx.ui(false, None);
    print(
        &ui,
        &badge(
            &ui,
            Badge::Ok,
            &format!(
                "Recorded expense #{}: {} in {}",
                id,
                format_money(transaction.amount, &display.currency, display.compact),
                transaction.category
            ),
        ),
    );
    Ok(())
}
