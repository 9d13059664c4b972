use std::path::Path;

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::ui::{badge, print, Badge};

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let destination = Path::new(&args.destination);

    store.backup_to(destination)?;

    let size = std::fs::metadata(destination)
        .map_err(|e| anyhow::anyhow!("Backup missing at {}: {}", destination.display(), e))?
        .len();
    if size == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }

    if !ctx.quiet() {
        let ui = ctx.ui(false, None);
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Backed up ledger to {}", args.destination)),
        );
    }
    Ok(())
}
