//! cli
//!
//! Command-line interface layer for the `shortnames` binary.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber when `--debug` is given
//! - Delegate to command handlers
//!
//! The CLI layer is thin. Every read and write of the alias store flows
//! through [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::Result;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::core::config::Context;
use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.debug {
        init_tracing();
    }

    let mut ctx = Context::new();
    if let Some(path) = &cli.aliases_conf {
        ctx = ctx.with_alias_conf_path(path);
    }
    if let Some(path) = &cli.registries_conf {
        ctx = ctx.with_registries_conf_path(path);
    }

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    commands::dispatch(cli.command, &ctx, verbosity)
}

/// Debug events go to stderr so stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
