//! engine
//!
//! Alias operations over the user store and the system view.
//!
//! # Entry Points
//!
//! - [`resolve_short_name_alias`] - user store first, then system view
//! - [`add_short_name_alias`] - add or replace a user alias
//! - [`remove_short_name_alias`] - remove a user alias
//! - [`list_short_name_aliases`] - list the user store
//! - [`effective_short_name_mode`] - context override, then system config
//!
//! Each entry point resolves paths from the [`Context`] and delegates to a
//! [`Resolver`] or [`StoreEditor`]. Callers that supply their own system
//! view use those types directly.
//!
//! # Example
//!
//! ```no_run
//! use shortname_aliases::core::config::Context;
//! use shortname_aliases::engine;
//!
//! let ctx = Context::from_env();
//! engine::add_short_name_alias(&ctx, "fedora", "registry.fedoraproject.org/fedora")?;
//!
//! if let Some(alias) = engine::resolve_short_name_alias(&ctx, "fedora")? {
//!     match alias.resolved_value() {
//!         Some(value) => println!("{} from {}", value, alias.origin.display()),
//!         None => println!("alias removed in {}", alias.origin.display()),
//!     }
//! }
//! # Ok::<(), shortname_aliases::engine::AliasError>(())
//! ```

pub mod edit;
pub mod errors;
pub mod resolve;

pub use edit::StoreEditor;
pub use errors::{AliasError, ErrorKind};
pub use resolve::Resolver;

use crate::core::config::{Context, ShortNameMode};
use crate::core::paths::AliasPaths;
use crate::core::types::Alias;
use crate::system::{RegistriesConf, SystemAliasSource};

/// Resolve a short name to its alias.
///
/// Returns `Ok(None)` if no source defines `name`. A tombstone in the user
/// store is returned as an alias without a value: `Some` alone does not mean
/// the name resolved, use [`Alias::resolved_value`] for that.
pub fn resolve_short_name_alias(ctx: &Context, name: &str) -> Result<Option<Alias>, AliasError> {
    let paths = AliasPaths::from_context(ctx)?;
    let system = RegistriesConf::from_context(ctx);
    Resolver::new(paths, &system).resolve(name)
}

/// Add `name -> value` to the user store, replacing any existing entry.
pub fn add_short_name_alias(ctx: &Context, name: &str, value: &str) -> Result<(), AliasError> {
    StoreEditor::new(AliasPaths::from_context(ctx)?).set_alias(name, value)
}

/// Remove `name` from the user store.
///
/// Fails with [`AliasError::NotFound`] if the user store has no entry.
pub fn remove_short_name_alias(ctx: &Context, name: &str) -> Result<(), AliasError> {
    StoreEditor::new(AliasPaths::from_context(ctx)?).remove_alias(name)
}

/// List the user store, sorted by short name.
pub fn list_short_name_aliases(ctx: &Context) -> Result<Vec<(String, Alias)>, AliasError> {
    let paths = AliasPaths::from_context(ctx)?;
    let system = RegistriesConf::from_context(ctx);
    Resolver::new(paths, &system).list()
}

/// The short-name mode in effect for `ctx`.
pub fn effective_short_name_mode(ctx: &Context) -> Result<ShortNameMode, AliasError> {
    if let Some(mode) = ctx.short_name_mode() {
        return Ok(mode);
    }
    let system = RegistriesConf::from_context(ctx).merged_aliases()?;
    Ok(system.short_name_mode().unwrap_or_default())
}
