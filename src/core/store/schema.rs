//! core::store::schema
//!
//! On-disk and derived representations of an alias table.
//!
//! # Types
//!
//! - [`RawStore`] - Serializable `aliases` table, values kept verbatim
//! - [`ResolvedView`] - Parsed, origin-tagged aliases derived from a raw table
//! - [`ValidationErrors`] - Every malformed entry found in one pass
//!
//! The resolved view is never written back. It is rebuilt from the raw table
//! each time a table is loaded.
//!
//! # Example
//!
//! ```toml
//! [aliases]
//! fedora = "registry.fedoraproject.org/fedora"
//! centos = ""
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::naming::{parse_alias_value, validate_short_name, NameError};
use crate::core::types::Alias;

/// The persisted form of the user alias store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStore {
    /// Short name to alias value; an empty value is a tombstone.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// A single malformed alias entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("alias entry {name:?}: {source}")]
pub struct EntryError {
    /// The raw short name of the entry.
    pub name: String,
    pub source: NameError,
}

/// All malformed entries of one alias table, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<EntryError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, source: NameError) {
        self.errors.push(EntryError {
            name: name.into(),
            source,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryError> {
        self.errors.iter()
    }

    /// Names of the offending entries, without duplicates.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !names.contains(&error.name.as_str()) {
                names.push(&error.name);
            }
        }
        names
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("no validation errors"),
            [only] => write!(f, "{}", only),
            all => {
                write!(f, "{} malformed alias entries:", all.len())?;
                for error in all {
                    write!(f, "\n  - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a EntryError;
    type IntoIter = std::slice::Iter<'a, EntryError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Parsed aliases keyed by short name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedView {
    entries: BTreeMap<String, Alias>,
}

impl ResolvedView {
    /// Validate every entry of `aliases`, tagging results with `origin`.
    ///
    /// Validation does not stop at the first bad entry: a malformed name and
    /// a malformed value are both reported, for every entry.
    ///
    /// # Errors
    ///
    /// Returns all failures if any entry is malformed.
    pub fn build(
        aliases: &BTreeMap<String, String>,
        origin: &Path,
    ) -> Result<Self, ValidationErrors> {
        Self::from_entries(
            aliases
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str(), origin.to_path_buf())),
        )
    }

    /// Validate entries that may come from different files.
    ///
    /// Later entries for the same name replace earlier ones.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, ValidationErrors>
    where
        I: IntoIterator<Item = (&'a str, &'a str, PathBuf)>,
    {
        let mut view = ResolvedView::default();
        let mut errors = ValidationErrors::new();

        for (name, value, origin) in entries {
            if let Err(e) = validate_short_name(name) {
                errors.push(name, e);
            }

            if value.is_empty() {
                view.entries
                    .insert(name.to_string(), Alias::new(None, origin));
                continue;
            }

            match parse_alias_value(value) {
                Ok(parsed) => {
                    view.entries
                        .insert(name.to_string(), Alias::new(Some(parsed), origin));
                }
                Err(e) => errors.push(name, e),
            }
        }

        if errors.is_empty() {
            Ok(view)
        } else {
            Err(errors)
        }
    }

    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by short name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Alias)> {
        self.entries.iter().map(|(name, alias)| (name.as_str(), alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naming::NameDefect;

    fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn build_tags_entries_with_origin() {
        let origin = Path::new("/home/u/.config/containers/short-name-aliases.conf");
        let view = ResolvedView::build(
            &table(&[("fedora", "registry.fedoraproject.org/fedora")]),
            origin,
        )
        .expect("build");

        let alias = view.get("fedora").expect("entry");
        assert_eq!(
            alias.value.as_ref().map(|v| v.as_str()),
            Some("registry.fedoraproject.org/fedora")
        );
        assert_eq!(alias.origin(), origin);
    }

    #[test]
    fn empty_value_is_a_tombstone() {
        let view = ResolvedView::build(&table(&[("centos", "")]), Path::new("/a.conf"))
            .expect("build");
        assert!(view.get("centos").expect("entry").is_tombstone());
    }

    #[test]
    fn values_are_normalized() {
        let view = ResolvedView::build(&table(&[("alpine", "docker.io/alpine")]), Path::new("/a"))
            .expect("build");
        let value = view.get("alpine").and_then(|a| a.value.as_ref()).expect("value");
        assert_eq!(value.as_str(), "docker.io/library/alpine");
    }

    #[test]
    fn build_reports_every_malformed_entry() {
        let errors = ResolvedView::build(
            &table(&[
                ("good", "quay.io/good"),
                ("quay.io/bad-name", "quay.io/x"),
                ("bad-value", "no-registry"),
            ]),
            Path::new("/a.conf"),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.names(), vec!["bad-value", "quay.io/bad-name"]);

        let message = errors.to_string();
        assert!(message.contains("\"bad-value\""), "{message}");
        assert!(message.contains("\"quay.io/bad-name\""), "{message}");
    }

    #[test]
    fn display_names_rows_whose_key_is_not_in_the_value() {
        let errors = ResolvedView::build(&table(&[("x", "foo"), ("y", "bar")]), Path::new("/a.conf"))
            .unwrap_err();

        let message = errors.to_string();
        assert!(message.starts_with("2 malformed alias entries:"), "{message}");
        assert!(message.contains("alias entry \"x\": invalid alias \"foo\""), "{message}");
        assert!(message.contains("alias entry \"y\": invalid alias \"bar\""), "{message}");
    }

    #[test]
    fn name_and_value_errors_both_reported_for_one_entry() {
        let errors = ResolvedView::build(
            &table(&[("quay.io/x", "x:latest")]),
            Path::new("/a.conf"),
        )
        .unwrap_err();

        let defects: Vec<_> = errors.iter().map(|e| e.source.defect()).collect();
        assert_eq!(
            defects,
            vec![Some(NameDefect::ContainsRegistry), Some(NameDefect::ContainsTag)]
        );
        assert_eq!(errors.names(), vec!["quay.io/x"]);
    }

    #[test]
    fn single_error_display_names_the_row() {
        let errors =
            ResolvedView::build(&table(&[("a", "b")]), Path::new("/a.conf")).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "alias entry \"a\": invalid alias \"b\": must contain registry and repository"
        );
    }

    #[test]
    fn from_entries_keeps_last_origin() {
        let view = ResolvedView::from_entries([
            ("fedora", "quay.io/fedora", PathBuf::from("/etc/a.conf")),
            ("fedora", "", PathBuf::from("/etc/b.conf")),
        ])
        .expect("build");
        let alias = view.get("fedora").expect("entry");
        assert!(alias.is_tombstone());
        assert_eq!(alias.origin(), Path::new("/etc/b.conf"));
    }

    #[test]
    fn raw_store_toml_shape() {
        let raw = RawStore {
            aliases: table(&[("fedora", "registry.fedoraproject.org/fedora"), ("centos", "")]),
        };
        let text = toml::to_string_pretty(&raw).expect("serialize");
        assert!(text.contains("[aliases]"));

        let back: RawStore = toml::from_str(&text).expect("parse");
        assert_eq!(back, raw);
    }

    #[test]
    fn raw_store_ignores_unknown_keys() {
        let raw: RawStore =
            toml::from_str("version = 2\n[aliases]\nfoo = \"quay.io/foo\"\n").expect("parse");
        assert_eq!(raw.aliases.len(), 1);
    }
}
