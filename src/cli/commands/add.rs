//! add command - Add or replace a user alias

use crate::core::config::Context;
use crate::engine;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Add `name -> value` to the user alias store.
pub fn add(ctx: &Context, name: &str, value: &str, verbosity: Verbosity) -> Result<()> {
    engine::add_short_name_alias(ctx, name, value)
        .with_context(|| format!("Failed to add alias '{}'", name))?;

    output::success(format!("Added {} = {}", name, value), verbosity);
    Ok(())
}
