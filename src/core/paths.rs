//! core::paths
//!
//! Centralized path routing for the user alias store.
//!
//! # Storage Layout
//!
//! - `<config_home>/containers/short-name-aliases.conf` - Alias store
//! - `<config_home>/containers/short-name-aliases.conf.lock` - Lock file
//!
//! `<config_home>` is the platform's per-user configuration directory
//! (`$XDG_CONFIG_HOME` or `~/.config` on Linux). A [`Context`] override
//! replaces the whole store path; the lock file always sits next to it.
//!
//! # Example
//!
//! ```
//! use shortname_aliases::core::paths::AliasPaths;
//! use std::path::PathBuf;
//!
//! let paths = AliasPaths::new("/home/user/.config/containers/short-name-aliases.conf");
//! assert_eq!(
//!     paths.lock_path(),
//!     PathBuf::from("/home/user/.config/containers/short-name-aliases.conf.lock")
//! );
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

use thiserror::Error;

use crate::core::config::Context;

/// Location of the store below the user configuration directory.
pub const USER_SHORT_NAMES_FILE: &str = "containers/short-name-aliases.conf";

/// Errors from path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot determine user configuration directory")]
    NoConfigDir,

    #[error("cannot create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Paths of the user alias store and its lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPaths {
    conf_path: PathBuf,
}

impl AliasPaths {
    pub fn new(conf_path: impl Into<PathBuf>) -> Self {
        Self {
            conf_path: conf_path.into(),
        }
    }

    /// Resolve the store path for a context.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoConfigDir`] if there is no override and the
    /// user configuration directory cannot be determined.
    pub fn from_context(ctx: &Context) -> Result<Self, PathError> {
        match ctx.alias_conf_path() {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(default_conf_path()?)),
        }
    }

    /// Path of the alias store file.
    pub fn conf_path(&self) -> &Path {
        &self.conf_path
    }

    /// Path of the lock file guarding the store.
    pub fn lock_path(&self) -> PathBuf {
        let mut lock: OsString = self.conf_path.clone().into_os_string();
        lock.push(".lock");
        PathBuf::from(lock)
    }

    /// Create the store's directory if it does not exist.
    ///
    /// New directories are created with mode 0700 on Unix.
    pub fn ensure_parent_dir(&self) -> Result<(), PathError> {
        let Some(parent) = self.conf_path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || parent.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o700);
        builder.create(parent).map_err(|source| PathError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
    }
}

/// The store path used when no override is configured.
pub fn default_conf_path() -> Result<PathBuf, PathError> {
    let config_home = dirs::config_dir().ok_or(PathError::NoConfigDir)?;
    Ok(config_home.join(USER_SHORT_NAMES_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn override_wins() {
        let ctx = Context::new().with_alias_conf_path("/custom/aliases.conf");
        let paths = AliasPaths::from_context(&ctx).expect("paths");
        assert_eq!(paths.conf_path(), Path::new("/custom/aliases.conf"));
    }

    #[test]
    fn lock_sits_next_to_store() {
        let paths = AliasPaths::new("/x/short-name-aliases.conf");
        assert_eq!(paths.lock_path(), PathBuf::from("/x/short-name-aliases.conf.lock"));
    }

    #[test]
    fn default_path_ends_with_containers_file() {
        if let Ok(path) = default_conf_path() {
            assert!(path.ends_with("containers/short-name-aliases.conf"));
        }
    }

    #[test]
    fn ensure_parent_dir_creates_nested_directories() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AliasPaths::new(temp.path().join("a").join("b").join("aliases.conf"));

        paths.ensure_parent_dir().expect("ensure");
        assert!(temp.path().join("a").join("b").is_dir());

        // Second call is a no-op.
        paths.ensure_parent_dir().expect("ensure again");
    }

    #[cfg(unix)]
    #[test]
    fn ensure_parent_dir_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("create temp dir");
        let dir = temp.path().join("containers");
        let paths = AliasPaths::new(dir.join("aliases.conf"));
        paths.ensure_parent_dir().expect("ensure");

        let mode = fs::metadata(&dir).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode & 0o077, 0, "directory should not be group/world accessible");
    }
}
