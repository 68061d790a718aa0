//! system::registries_conf
//!
//! System alias view read from a merged `registries.conf`.
//!
//! # Behavior
//!
//! - A missing file yields an empty view
//! - Only `short-name-mode` and the `[aliases]` table are read
//! - Aliases are validated with the same rules, and the same aggregation,
//!   as the user store; each alias's origin is this file
//!
//! # Example
//!
//! ```no_run
//! use shortname_aliases::system::{RegistriesConf, SystemAliasSource};
//!
//! let conf = RegistriesConf::new("/etc/containers/registries.conf");
//! let view = conf.merged_aliases()?;
//! if let Some(alias) = view.get("fedora") {
//!     println!("fedora is aliased in {}", alias.origin.display());
//! }
//! # Ok::<(), shortname_aliases::system::SystemConfigError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::traits::{SystemAliasSource, SystemAliases, SystemConfigError};
use crate::core::config::{Context, RegistriesConfFile};
use crate::core::store::ResolvedView;

/// A single, already merged registries configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistriesConf {
    path: PathBuf,
}

impl RegistriesConf {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The registries config selected by a context.
    pub fn from_context(ctx: &Context) -> Self {
        Self::new(ctx.registries_conf_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RegistriesConfFile, SystemConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| SystemConfigError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "registries configuration does not exist");
                Ok(RegistriesConfFile::default())
            }
            Err(source) => Err(SystemConfigError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl SystemAliasSource for RegistriesConf {
    fn merged_aliases(&self) -> Result<SystemAliases, SystemConfigError> {
        let file = self.read()?;

        let mode = file
            .short_name_mode()
            .map_err(|source| SystemConfigError::Mode {
                path: self.path.clone(),
                source,
            })?;
        let aliases = ResolvedView::build(&file.aliases, &self.path).map_err(|errors| {
            SystemConfigError::Invalid {
                path: self.path.clone(),
                errors,
            }
        })?;

        debug!(path = %self.path.display(), entries = aliases.len(), "loaded system aliases");
        Ok(SystemAliases::new(aliases, mode))
    }
}
