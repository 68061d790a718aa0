//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each command handler:
//! 1. Calls the engine to execute the command
//! 2. Formats and displays output through [`crate::ui::output`]
//!
//! Handlers do NOT read or write the alias store directly.

mod add;
mod list;
mod mode;
mod remove;
mod resolve;

// Re-export command functions for testing and direct invocation
pub use add::add;
pub use list::list;
pub use mode::mode;
pub use remove::remove;
pub use resolve::resolve;

use crate::cli::args::Command;
use crate::core::config::Context;
use crate::ui::output::Verbosity;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Resolve { name } => resolve(ctx, &name, verbosity),
        Command::Add { name, value } => add(ctx, &name, &value, verbosity),
        Command::Remove { name } => remove(ctx, &name, verbosity),
        Command::List { json } => list(ctx, json, verbosity),
        Command::Mode => mode(ctx),
    }
}
