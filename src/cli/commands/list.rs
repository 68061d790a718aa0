//! list command - Show the aliases in the user store

use crate::core::config::Context;
use crate::core::types::Alias;
use crate::engine;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    alias: &'a Alias,
}

/// List the user alias store, one entry per line or as a JSON array.
pub fn list(ctx: &Context, json: bool, verbosity: Verbosity) -> Result<()> {
    let entries = engine::list_short_name_aliases(ctx).context("Failed to list aliases")?;

    if json {
        let rows: Vec<ListEntry<'_>> = entries
            .iter()
            .map(|(name, alias)| ListEntry { name, alias })
            .collect();
        let rendered =
            serde_json::to_string_pretty(&rows).context("Failed to serialize aliases")?;
        println!("{}", rendered);
        return Ok(());
    }

    if entries.is_empty() {
        output::print("No user aliases defined", verbosity);
        return Ok(());
    }

    for (name, alias) in &entries {
        println!("{}", output::format_alias(name, alias));
    }
    Ok(())
}
