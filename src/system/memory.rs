//! system::memory
//!
//! In-memory system alias view.
//!
//! Useful when the merged registries configuration is assembled by the
//! caller, and in tests.
//!
//! # Example
//!
//! ```
//! use shortname_aliases::system::{StaticSystemAliases, SystemAliasSource};
//!
//! let system = StaticSystemAliases::from_entries([
//!     ("fedora", "registry.fedoraproject.org/fedora", "/etc/containers/registries.conf"),
//! ])
//! .unwrap();
//!
//! let view = system.merged_aliases().unwrap();
//! assert!(view.get("fedora").is_some());
//! ```

use std::path::PathBuf;

use super::traits::{SystemAliasSource, SystemAliases, SystemConfigError};
use crate::core::config::ShortNameMode;
use crate::core::store::{ResolvedView, ValidationErrors};

/// A fixed system alias view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSystemAliases {
    aliases: SystemAliases,
}

impl StaticSystemAliases {
    /// An empty view.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a view from `(name, value, origin)` triples, in precedence order.
    ///
    /// # Errors
    ///
    /// Returns every malformed entry.
    pub fn from_entries<'a, I, P>(entries: I) -> Result<Self, ValidationErrors>
    where
        I: IntoIterator<Item = (&'a str, &'a str, P)>,
        P: Into<PathBuf>,
    {
        let view = ResolvedView::from_entries(
            entries
                .into_iter()
                .map(|(name, value, origin)| (name, value, origin.into())),
        )?;
        Ok(Self {
            aliases: SystemAliases::new(view, None),
        })
    }

    pub fn with_short_name_mode(self, mode: ShortNameMode) -> Self {
        Self {
            aliases: SystemAliases::new(self.aliases.aliases().clone(), Some(mode)),
        }
    }
}

impl SystemAliasSource for StaticSystemAliases {
    fn merged_aliases(&self) -> Result<SystemAliases, SystemConfigError> {
        Ok(self.aliases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn empty_view_has_no_entries() {
        let view = StaticSystemAliases::empty().merged_aliases().expect("view");
        assert!(view.aliases().is_empty());
    }

    #[test]
    fn entries_keep_their_origin() {
        let system = StaticSystemAliases::from_entries([
            ("a", "quay.io/a", "/etc/containers/registries.conf"),
            ("b", "", "/etc/containers/registries.conf.d/10-b.conf"),
        ])
        .expect("build");

        let view = system.merged_aliases().expect("view");
        assert_eq!(
            view.get("b").expect("b").origin(),
            Path::new("/etc/containers/registries.conf.d/10-b.conf")
        );
        assert!(view.get("b").expect("b").is_tombstone());
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let err = StaticSystemAliases::from_entries([("quay.io/a", "quay.io/a", "/x")])
            .unwrap_err();
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn mode_is_carried() {
        let system = StaticSystemAliases::empty().with_short_name_mode(ShortNameMode::Disabled);
        let view = system.merged_aliases().expect("view");
        assert_eq!(view.short_name_mode(), Some(ShortNameMode::Disabled));
    }
}
