//! core::config::schema
//!
//! The subset of `registries.conf` this crate reads.
//!
//! Only the fields relevant to short names are decoded. Registry mirrors,
//! search lists and other tables are ignored.
//!
//! # Example
//!
//! ```toml
//! short-name-mode = "enforcing"
//!
//! [aliases]
//! "fedora" = "registry.fedoraproject.org/fedora"
//! "centos" = ""
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{ConfigError, ShortNameMode};

/// Short-name fields of an already merged registries config.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistriesConfFile {
    /// Raw `short-name-mode` value; empty means unset.
    #[serde(rename = "short-name-mode")]
    pub short_name_mode: String,

    /// Raw alias table; an empty value cancels an alias.
    pub aliases: BTreeMap<String, String>,
}

impl RegistriesConfFile {
    /// Parse the configured short-name mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidShortNameMode` for unknown values.
    pub fn short_name_mode(&self) -> Result<Option<ShortNameMode>, ConfigError> {
        if self.short_name_mode.is_empty() {
            return Ok(None);
        }
        self.short_name_mode.parse().map(Some)
    }
}
