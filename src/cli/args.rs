//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--aliases-conf <path>`: Use this user alias store
//! - `--registries-conf <path>`: Read system aliases from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{ALIASES_CONF_ENV, REGISTRIES_CONF_ENV};

/// shortnames - resolve and edit short-name aliases for container images
#[derive(Parser, Debug)]
#[command(name = "shortnames")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// User alias store [default: <config dir>/containers/short-name-aliases.conf]
    #[arg(long, global = true, env = ALIASES_CONF_ENV, value_name = "PATH")]
    pub aliases_conf: Option<PathBuf>,

    /// registries.conf to read system aliases from [default: /etc/containers/registries.conf]
    #[arg(long, global = true, env = REGISTRIES_CONF_ENV, value_name = "PATH")]
    pub registries_conf: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a short name to its fully-qualified repository
    #[command(
        long_about = "Resolve a short name to its fully-qualified repository.\n\n\
            The user alias store is consulted first, then the system registries.conf. \
            An empty entry in the user store cancels the system alias of the same name.",
        after_help = "\
EXAMPLES:
    shortnames resolve fedora
    shortnames --registries-conf ./registries.conf resolve ubi8"
    )]
    Resolve {
        /// Short name, e.g. `fedora` or `library/alpine`
        name: String,
    },

    /// Add or replace an alias in the user store
    #[command(after_help = "\
EXAMPLES:
    shortnames add fedora registry.fedoraproject.org/fedora
    shortnames add alpine docker.io/library/alpine")]
    Add {
        /// Short name without registry, tag or digest
        name: String,

        /// Repository with registry and without tag or digest
        value: String,
    },

    /// Remove an alias from the user store
    #[command(
        long_about = "Remove an alias from the user store.\n\n\
            Only entries in the user alias store can be removed. To hide a system alias, \
            add an empty value for it to the user store."
    )]
    Remove {
        /// Short name to remove
        name: String,
    },

    /// List the aliases in the user store
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the short-name mode in effect
    Mode,
}
