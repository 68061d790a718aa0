//! system::traits
//!
//! The system alias source abstraction.
//!
//! # Design
//!
//! The system-wide registries configuration is assembled from several
//! drop-in files by other tooling. This crate only consumes the merged
//! result: a read-only map from short name to [`Alias`], where each alias
//! remembers the file it came from.
//!
//! Implementations must be thread-safe (`Send + Sync`) and must load a fresh
//! snapshot on every call.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::{ConfigError, ShortNameMode};
use crate::core::store::{ResolvedView, ValidationErrors};
use crate::core::types::Alias;

/// Errors from loading the system alias view.
#[derive(Debug, Error)]
pub enum SystemConfigError {
    #[error("error loading registries configuration '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("error parsing registries configuration '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid short-name-mode in '{}': {source}", path.display())]
    Mode { path: PathBuf, source: ConfigError },

    #[error("invalid aliases in registries configuration '{}': {errors}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        errors: ValidationErrors,
    },
}

impl SystemConfigError {
    /// True if the configuration content, rather than the filesystem, is at fault.
    pub fn is_corruption(&self) -> bool {
        !matches!(self, SystemConfigError::Read { .. })
    }
}

/// A merged snapshot of the system-wide short-name settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemAliases {
    aliases: ResolvedView,
    short_name_mode: Option<ShortNameMode>,
}

impl SystemAliases {
    pub fn new(aliases: ResolvedView, short_name_mode: Option<ShortNameMode>) -> Self {
        Self {
            aliases,
            short_name_mode,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    pub fn aliases(&self) -> &ResolvedView {
        &self.aliases
    }

    /// The configured short-name mode, if the configuration sets one.
    pub fn short_name_mode(&self) -> Option<ShortNameMode> {
        self.short_name_mode
    }
}

/// Source of the merged system alias view.
pub trait SystemAliasSource: Send + Sync {
    /// Load the current merged view.
    fn merged_aliases(&self) -> Result<SystemAliases, SystemConfigError>;
}
