//! mode command - Show the effective short-name mode

use crate::core::config::Context;
use crate::engine;
use anyhow::{Context as _, Result};

/// Print the short-name mode in effect.
pub fn mode(ctx: &Context) -> Result<()> {
    let mode = engine::effective_short_name_mode(ctx)
        .context("Failed to determine short-name mode")?;
    println!("{}", mode);
    Ok(())
}
