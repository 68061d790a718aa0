//! core::store
//!
//! Loading, validating and persisting the user alias store.
//!
//! # Storage
//!
//! The store is a TOML file with a single `[aliases]` table. It is written
//! only by this crate, but it is validated in full on every load: another
//! process or the user may have edited it, and a bad entry must never be
//! silently used for a lookup.
//!
//! # Invariants
//!
//! - A missing file is an empty store, not an error
//! - Every malformed entry is reported, not only the first
//! - The raw table is what gets written back; the resolved view is derived
//! - Written files have mode 0600 on Unix
//!
//! Callers are expected to hold the store lock (see [`crate::core::lock`])
//! around load and persist.
//!
//! # Example
//!
//! ```no_run
//! use shortname_aliases::core::store::AliasStore;
//! use std::path::Path;
//!
//! let store = AliasStore::load(Path::new("/tmp/short-name-aliases.conf"))?;
//! if let Some(alias) = store.get("fedora") {
//!     println!("fedora -> {:?} ({})", alias.value, alias.origin.display());
//! }
//! # Ok::<(), shortname_aliases::core::store::StoreError>(())
//! ```

pub mod schema;

pub use schema::{EntryError, RawStore, ResolvedView, ValidationErrors};

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use thiserror::Error;
use tracing::debug;

use crate::core::types::Alias;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("error loading short-name aliases config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error loading short-name aliases config file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("error loading short-name aliases config file '{}': {errors}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        errors: ValidationErrors,
    },

    #[error("failed to write short-name aliases config file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot serialize short-name aliases: {0}")]
    Serialize(String),
}

impl StoreError {
    /// True if the store content, rather than the filesystem, is at fault.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::Invalid { .. })
    }

    /// The per-entry failures, for [`StoreError::Invalid`].
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            StoreError::Invalid { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// A loaded and validated alias store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasStore {
    path: PathBuf,
    raw: RawStore,
    resolved: ResolvedView,
}

impl AliasStore {
    /// Load and validate the store at `path`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Read`] if the file exists but cannot be read
    /// - [`StoreError::Parse`] if the file is not valid TOML
    /// - [`StoreError::Invalid`] if any entry is malformed
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str::<RawStore>(&contents).map_err(|e| StoreError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "alias store does not exist, using empty store");
                RawStore::default()
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let store = Self::from_raw(path.to_path_buf(), raw)?;
        debug!(path = %path.display(), entries = store.resolved.len(), "loaded alias store");
        Ok(store)
    }

    /// Validate a raw table as if it had been loaded from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] if any entry is malformed.
    pub fn from_raw(path: PathBuf, raw: RawStore) -> Result<Self, StoreError> {
        match ResolvedView::build(&raw.aliases, &path) {
            Ok(resolved) => Ok(Self {
                path,
                raw,
                resolved,
            }),
            Err(errors) => Err(StoreError::Invalid { path, errors }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw(&self) -> &RawStore {
        &self.raw
    }

    pub fn resolved(&self) -> &ResolvedView {
        &self.resolved
    }

    /// Look up a short name in this store.
    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.resolved.get(name)
    }

    pub fn into_raw(self) -> RawStore {
        self.raw
    }

    /// Write the raw table back to the store file.
    ///
    /// The content is written to a sibling temp file with mode 0600 and
    /// renamed over the store.
    pub fn persist(&self) -> Result<(), StoreError> {
        let contents =
            toml::to_string_pretty(&self.raw).map_err(|e| StoreError::Serialize(e.to_string()))?;

        let temp_path = temp_path_for(&self.path);
        if let Err(source) = write_synced(&temp_path, contents.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Write {
                path: temp_path,
                source,
            });
        }

        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), entries = self.raw.aliases.len(), "persisted alias store");
        Ok(())
    }
}

/// Write `contents` to a fresh 0600 file at `path` and fsync it.
fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    // Restrict permissions before any content lands on disk
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;

    file.write_all(contents)?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp: OsString = path.as_os_str().to_owned();
    temp.push(".tmp");
    PathBuf::from(temp)
}
