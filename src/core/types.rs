//! core::types
//!
//! Strong types for alias entries.
//!
//! # Types
//!
//! - [`ShortName`] - Validated left-hand side of an alias
//! - [`AliasValue`] - Validated, normalized right-hand side of an alias
//! - [`Alias`] - A resolved alias together with the file it came from
//!
//! # Validation
//!
//! Values are validated at construction time. Invalid names cannot be
//! represented, so lookups never see a malformed key.
//!
//! ```
//! use shortname_aliases::core::types::{AliasValue, ShortName};
//!
//! let name = ShortName::new("fedora").unwrap();
//! let value = AliasValue::new("registry.fedoraproject.org/fedora").unwrap();
//! assert_eq!(name.as_str(), "fedora");
//! assert_eq!(value.domain(), "registry.fedoraproject.org");
//!
//! assert!(ShortName::new("quay.io/fedora").is_err());
//! assert!(AliasValue::new("fedora").is_err());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::naming::{self, NameError};
use crate::core::reference::Reference;

/// A repository name without registry, tag or digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortName(String);

impl ShortName {
    /// Validate and wrap a short name.
    ///
    /// # Errors
    ///
    /// See [`naming::validate_short_name`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, NameError> {
        naming::validate_short_name(name.as_ref())
    }

    pub(crate) fn from_validated(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShortName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortName> for String {
    fn from(name: ShortName) -> Self {
        name.0
    }
}

impl fmt::Display for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalized, fully-qualified repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AliasValue {
    canonical: String,
    reference: Reference,
}

impl AliasValue {
    /// Validate and normalize an alias value.
    ///
    /// # Errors
    ///
    /// See [`naming::parse_alias_value`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, NameError> {
        naming::parse_alias_value(value.as_ref())
    }

    pub(crate) fn from_reference(reference: Reference) -> Self {
        Self {
            canonical: reference.to_string(),
            reference,
        }
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    pub fn domain(&self) -> &str {
        self.reference.domain()
    }

    pub fn path(&self) -> &str {
        self.reference.path()
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }
}

impl TryFrom<String> for AliasValue {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AliasValue> for String {
    fn from(value: AliasValue) -> Self {
        value.canonical
    }
}

impl fmt::Display for AliasValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// A resolved alias and the config file it was read from.
///
/// `value` is `None` when the entry was set to an empty string. Such an
/// entry cancels any alias of the same name in lower-precedence sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub value: Option<AliasValue>,
    pub origin: PathBuf,
}

impl Alias {
    pub fn new(value: Option<AliasValue>, origin: impl Into<PathBuf>) -> Self {
        Self {
            value,
            origin: origin.into(),
        }
    }

    /// True if this entry cancels an alias instead of defining one.
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }

    /// The repository this alias resolves to, or `None` for a tombstone.
    pub fn resolved_value(&self) -> Option<&AliasValue> {
        self.value.as_ref()
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }
}
