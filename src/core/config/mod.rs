//! core::config
//!
//! Caller-supplied configuration for alias operations.
//!
//! # Overview
//!
//! Every entry point takes a [`Context`] instead of consulting process-wide
//! state. Callers build it once and pass it through.
//!
//! # Precedence
//!
//! - Alias store path: `Context::alias_conf_path` if set, otherwise
//!   `$XDG_CONFIG_HOME/containers/short-name-aliases.conf` (see
//!   [`crate::core::paths`]).
//! - Registries config path: `Context::registries_conf_path` if set,
//!   otherwise [`DEFAULT_REGISTRIES_CONF`].
//! - Short-name mode: `Context::short_name_mode` if set, otherwise the
//!   `short-name-mode` of the registries config, otherwise
//!   [`ShortNameMode::Permissive`].
//!
//! # Environment
//!
//! [`Context::from_env`] reads:
//! 1. `$CONTAINERS_SHORT_NAME_ALIASES_CONF` for the alias store path
//! 2. `$CONTAINERS_REGISTRIES_CONF` for the registries config path
//!
//! # Example
//!
//! ```
//! use shortname_aliases::core::config::{Context, ShortNameMode};
//! use std::path::Path;
//!
//! let ctx = Context::new()
//!     .with_alias_conf_path("/tmp/aliases.conf")
//!     .with_short_name_mode(ShortNameMode::Enforcing);
//!
//! assert_eq!(ctx.alias_conf_path(), Some(Path::new("/tmp/aliases.conf")));
//! assert_eq!(ctx.short_name_mode(), Some(ShortNameMode::Enforcing));
//! ```

pub mod schema;

pub use schema::RegistriesConfFile;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the alias store path.
pub const ALIASES_CONF_ENV: &str = "CONTAINERS_SHORT_NAME_ALIASES_CONF";

/// Environment variable overriding the registries config path.
pub const REGISTRIES_CONF_ENV: &str = "CONTAINERS_REGISTRIES_CONF";

/// System-wide registries config, read when no override is set.
pub const DEFAULT_REGISTRIES_CONF: &str = "/etc/containers/registries.conf";

/// Errors from configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid short-name mode {0:?}: must be one of enforcing, permissive, disabled")]
    InvalidShortNameMode(String),
}

/// How strictly short names are handled by image tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortNameMode {
    /// Ambiguous short names are an error.
    Enforcing,
    /// Ambiguous short names fall back to trying every search registry.
    #[default]
    Permissive,
    /// Short names are not aliased or prompted for.
    Disabled,
}

impl ShortNameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortNameMode::Enforcing => "enforcing",
            ShortNameMode::Permissive => "permissive",
            ShortNameMode::Disabled => "disabled",
        }
    }
}

impl FromStr for ShortNameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enforcing" => Ok(ShortNameMode::Enforcing),
            "permissive" => Ok(ShortNameMode::Permissive),
            "disabled" => Ok(ShortNameMode::Disabled),
            other => Err(ConfigError::InvalidShortNameMode(other.to_string())),
        }
    }
}

impl fmt::Display for ShortNameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options threaded through every alias operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    alias_conf_path: Option<PathBuf>,
    registries_conf_path: Option<PathBuf>,
    short_name_mode: Option<ShortNameMode>,
}

impl Context {
    /// A context with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with overrides taken from the environment.
    ///
    /// Unset or empty variables leave the corresponding option unset.
    pub fn from_env() -> Self {
        let path_var = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            alias_conf_path: path_var(ALIASES_CONF_ENV),
            registries_conf_path: path_var(REGISTRIES_CONF_ENV),
            short_name_mode: None,
        }
    }

    pub fn with_alias_conf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.alias_conf_path = Some(path.into());
        self
    }

    pub fn with_registries_conf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registries_conf_path = Some(path.into());
        self
    }

    pub fn with_short_name_mode(mut self, mode: ShortNameMode) -> Self {
        self.short_name_mode = Some(mode);
        self
    }

    /// The alias store override, if any.
    pub fn alias_conf_path(&self) -> Option<&Path> {
        self.alias_conf_path.as_deref()
    }

    /// The registries config to read the system view from.
    pub fn registries_conf_path(&self) -> PathBuf {
        self.registries_conf_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRIES_CONF))
    }

    /// The short-name mode override, if any.
    pub fn short_name_mode(&self) -> Option<ShortNameMode> {
        self.short_name_mode
    }
}
