//! Reading command input and confirming destructive actions.

use std::io::{self, Read};

use dialoguer::Confirm;

use crate::ui::UiContext;

/// Read a whole file, or stdin when `source` is "-".
pub fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer);
    }
    std::fs::read_to_string(source).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", source, e))
}

/// Ask before deleting. Non-interactive sessions proceed only with `--yes`.
pub fn confirm_delete(ctx: &UiContext, what: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Err(anyhow::anyhow!(
            "Refusing to delete {} without confirmation; pass --yes",
            what
        ));
    }
    Confirm::new()
        .with_prompt(format!("Delete {}?", what))
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
