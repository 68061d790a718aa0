//! engine::resolve
//!
//! The read path: short-name resolution and listing.
//!
//! # Precedence
//!
//! 1. The user alias store, read under a shared lock
//! 2. The system alias view, loaded fresh for each call
//!
//! A user-store entry wins even when it is a tombstone; the system view is
//! then never consulted. A corrupt user store fails the resolution instead
//! of being skipped.

use tracing::debug;

use super::errors::AliasError;
use crate::core::lock::{AliasLock, LockMode};
use crate::core::naming::validate_short_name;
use crate::core::paths::AliasPaths;
use crate::core::store::AliasStore;
use crate::core::types::Alias;
use crate::system::SystemAliasSource;

/// Resolves short names against the user store and a system view.
#[derive(Debug)]
pub struct Resolver<'a, S: SystemAliasSource + ?Sized> {
    paths: AliasPaths,
    system: &'a S,
}

impl<'a, S: SystemAliasSource + ?Sized> Resolver<'a, S> {
    pub fn new(paths: AliasPaths, system: &'a S) -> Self {
        Self { paths, system }
    }

    pub fn paths(&self) -> &AliasPaths {
        &self.paths
    }

    /// Resolve `name` to an alias.
    ///
    /// Returns `Ok(None)` if neither source has an entry. A tombstone is
    /// returned as an [`Alias`] without a value.
    ///
    /// # Errors
    ///
    /// - [`AliasError::InvalidName`] if `name` is not a short name
    /// - [`AliasError::Store`] if the user store cannot be loaded
    /// - [`AliasError::System`] if the system view cannot be loaded
    /// - [`AliasError::Lock`] / [`AliasError::Path`] on filesystem failures
    pub fn resolve(&self, name: &str) -> Result<Option<Alias>, AliasError> {
        let short_name = validate_short_name(name)?;

        let store = self.load_user_store()?;
        if let Some(alias) = store.get(short_name.as_str()) {
            debug!(
                name = %short_name,
                origin = %alias.origin.display(),
                tombstone = alias.is_tombstone(),
                "resolved from user alias store"
            );
            return Ok(Some(alias.clone()));
        }

        let system = self.system.merged_aliases()?;
        let resolved = system.get(short_name.as_str()).cloned();
        debug!(name = %short_name, found = resolved.is_some(), "consulted system aliases");
        Ok(resolved)
    }

    /// All entries of the user store, sorted by short name.
    pub fn list(&self) -> Result<Vec<(String, Alias)>, AliasError> {
        let store = self.load_user_store()?;
        Ok(store
            .resolved()
            .iter()
            .map(|(name, alias)| (name.to_string(), alias.clone()))
            .collect())
    }

    fn load_user_store(&self) -> Result<AliasStore, AliasError> {
        self.paths.ensure_parent_dir()?;
        let _lock = AliasLock::acquire(&self.paths.lock_path(), LockMode::Shared)?;
        Ok(AliasStore::load(self.paths.conf_path())?)
    }
}
