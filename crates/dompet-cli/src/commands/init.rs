use tracing::info;

use dompet_core::{LedgerStore, SqliteLedger};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, DompetConfig};
use crate::ui::{badge, hint, kv, print, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path {
        Some(ref path) => std::path::PathBuf::from(path),
        None => ctx.db_path()?,
    };
    let existed = target.exists();

    let store = SqliteLedger::open(&target)?;
    let categories = store.get_categories(None)?.len();
    info!(path = %target.display(), existed, "ledger ready");

    let config_path = resolve_config_path()?;
    let wrote_config = if !config_path.exists() || args.force {
        let config = DompetConfig::new(target.clone(), args.currency.trim().to_uppercase());
        write_config(&config_path, &config)?;
        true
    } else {
        false
    };

    if ctx.quiet() {
        return Ok(());
    }

    let ui = ctx.ui(false, None);
    let message = if existed {
        format!("Ledger already initialized at {}", target.display())
    } else {
        format!("Initialized new ledger at {}", target.display())
    };
    print(&ui, &badge(&ui, Badge::Ok, &message));
    print(&ui, &kv(&ui, "Categories", &categories.to_string()));
    if wrote_config {
        print(&ui, &kv(&ui, "Config", &config_path.display().to_string()));
    } else {
        print(
            &ui,
            &hint(&ui, "Config left unchanged; pass --force to rewrite it"),
        );
    }
    Ok(())
}
