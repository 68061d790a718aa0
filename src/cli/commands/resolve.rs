//! resolve command - Print the repository a short name resolves to

use crate::core::config::Context;
use crate::engine;
use crate::ui::output::{self, Verbosity};
use anyhow::{bail, Context as _, Result};

/// Resolve `name` and print the repository on stdout.
///
/// The origin of the alias is shown in debug mode. A missing alias and a
/// tombstone are both errors so scripts can rely on the exit status.
pub fn resolve(ctx: &Context, name: &str, verbosity: Verbosity) -> Result<()> {
    let alias = engine::resolve_short_name_alias(ctx, name)
        .with_context(|| format!("Failed to resolve short name '{}'", name))?;

    let Some(alias) = alias else {
        bail!("No alias defined for short name '{}'", name);
    };

    match alias.resolved_value() {
        Some(value) => {
            println!("{}", value);
            output::debug(
                format!("from {}", alias.origin().display()),
                verbosity,
            );
            Ok(())
        }
        None => bail!(
            "Alias for short name '{}' is removed in '{}'",
            name,
            alias.origin().display()
        ),
    }
}
