//! shortname-aliases - short-name alias resolution for container images
//!
//! A short name such as `fedora` is an image name without a registry. An
//! alias maps it to a fully-qualified repository such as
//! `registry.fedoraproject.org/fedora`. Aliases come from two places:
//!
//! - a per-user alias store, read and written by this crate
//! - the system registries.conf view, read only
//!
//! The user store wins. An empty value in the user store is a tombstone that
//! hides the system alias of the same name.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Resolve, add, remove and list operations
//! - [`core`] - Reference grammar, validation, store schema, locking
//! - [`system`] - Read-only system alias sources
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Malformed input never reaches the store
//! 2. A store with malformed entries is rejected as a whole
//! 3. Readers share the store lock; writers hold it exclusively
//! 4. A write replaces the store file atomically

pub mod cli;
pub mod core;
pub mod engine;
pub mod system;
pub mod ui;

pub use engine::{
    add_short_name_alias, effective_short_name_mode, list_short_name_aliases,
    remove_short_name_alias, resolve_short_name_alias, AliasError, ErrorKind,
};
