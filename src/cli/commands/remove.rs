//! remove command - Remove a user alias

use crate::core::config::Context;
use crate::engine;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Remove `name` from the user alias store.
pub fn remove(ctx: &Context, name: &str, verbosity: Verbosity) -> Result<()> {
    engine::remove_short_name_alias(ctx, name)
        .with_context(|| format!("Failed to remove alias '{}'", name))?;

    output::success(format!("Removed {}", name), verbosity);
    Ok(())
}
