//! core::naming
//!
//! Validation rules for the two sides of an alias.
//!
//! # Rules
//!
//! - A short name (left-hand side) is a repository without a registry, tag
//!   or digest, e.g. `fedora` or `library/busybox`.
//! - An alias value (right-hand side) is a repository *with* a registry and
//!   without a tag or digest, e.g. `registry.fedoraproject.org/fedora`.
//!
//! Alias values are normalized, so `docker.io/alpine` becomes
//! `docker.io/library/alpine`.
//!
//! # Example
//!
//! ```
//! use shortname_aliases::core::naming::{parse_alias_value, validate_short_name};
//!
//! assert!(validate_short_name("fedora").is_ok());
//! assert!(validate_short_name("quay.io/fedora").is_err());
//!
//! let value = parse_alias_value("docker.io/alpine").unwrap();
//! assert_eq!(value.as_str(), "docker.io/library/alpine");
//! assert!(parse_alias_value("alpine").is_err());
//! ```

use std::fmt;

use thiserror::Error;

use crate::core::reference::{self, ReferenceError};
use crate::core::types::{AliasValue, ShortName};

/// Which side of an alias is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    ShortName,
    Alias,
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameRole::ShortName => f.write_str("short name"),
            NameRole::Alias => f.write_str("alias"),
        }
    }
}

/// A structural defect of an otherwise parseable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameDefect {
    ContainsDigest,
    ContainsTag,
    ContainsRegistry,
    MissingRegistry,
}

impl fmt::Display for NameDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameDefect::ContainsDigest => f.write_str("must not contain digest"),
            NameDefect::ContainsTag => f.write_str("must not contain tag"),
            NameDefect::ContainsRegistry => f.write_str("must not contain registry"),
            NameDefect::MissingRegistry => f.write_str("must contain registry and repository"),
        }
    }
}

/// Errors from validating a short name or alias value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// The input is not a reference at all.
    #[error("cannot parse {role} {input:?}: {source}")]
    Unparseable {
        role: NameRole,
        input: String,
        source: ReferenceError,
    },

    /// The input parses but has the wrong shape for its role.
    #[error("invalid {role} {input:?}: {defect}")]
    Invalid {
        role: NameRole,
        input: String,
        defect: NameDefect,
    },
}

impl NameError {
    /// The offending input string.
    pub fn input(&self) -> &str {
        match self {
            NameError::Unparseable { input, .. } | NameError::Invalid { input, .. } => input,
        }
    }

    pub fn role(&self) -> NameRole {
        match self {
            NameError::Unparseable { role, .. } | NameError::Invalid { role, .. } => *role,
        }
    }

    /// The shape defect, if the input parsed at all.
    pub fn defect(&self) -> Option<NameDefect> {
        match self {
            NameError::Invalid { defect, .. } => Some(*defect),
            NameError::Unparseable { .. } => None,
        }
    }
}

/// Validate the left-hand side of an alias.
///
/// Checks run in order: parse, digest, tag, registry. The first failure is
/// returned.
///
/// # Errors
///
/// Returns [`NameError`] with role [`NameRole::ShortName`].
pub fn validate_short_name(name: &str) -> Result<ShortName, NameError> {
    let role = NameRole::ShortName;
    let parsed = reference::parse(name).map_err(|source| NameError::Unparseable {
        role,
        input: name.to_string(),
        source,
    })?;

    let defect = if parsed.is_digested() {
        Some(NameDefect::ContainsDigest)
    } else if parsed.is_tagged() {
        Some(NameDefect::ContainsTag)
    } else if parsed.has_registry_domain() {
        Some(NameDefect::ContainsRegistry)
    } else {
        None
    };

    match defect {
        Some(defect) => Err(NameError::Invalid {
            role,
            input: name.to_string(),
            defect,
        }),
        None => Ok(ShortName::from_validated(name.to_string())),
    }
}

/// Parse and normalize the right-hand side of an alias.
///
/// The returned value is always in normalized form.
///
/// # Errors
///
/// Returns [`NameError`] with role [`NameRole::Alias`].
pub fn parse_alias_value(value: &str) -> Result<AliasValue, NameError> {
    let role = NameRole::Alias;
    let unparseable = |source| NameError::Unparseable {
        role,
        input: value.to_string(),
        source,
    };
    let parsed = reference::parse(value).map_err(unparseable)?;

    let defect = if parsed.is_digested() {
        Some(NameDefect::ContainsDigest)
    } else if parsed.is_tagged() {
        Some(NameDefect::ContainsTag)
    } else if !parsed.has_registry_domain() {
        Some(NameDefect::MissingRegistry)
    } else {
        None
    };
    if let Some(defect) = defect {
        return Err(NameError::Invalid {
            role,
            input: value.to_string(),
            defect,
        });
    }

    let normalized = reference::parse_normalized_named(value).map_err(unparseable)?;
    Ok(AliasValue::from_reference(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn short_name_accepts_repositories() {
        for name in ["fedora", "library/busybox", "org/team/app", "my-app_1"] {
            let short = validate_short_name(name).expect(name);
            assert_eq!(short.as_str(), name);
        }
    }

    #[test]
    fn short_name_rejects_registry() {
        for name in ["quay.io/fedora", "localhost/app", "host:5000/app"] {
            let err = validate_short_name(name).unwrap_err();
            assert_eq!(err.defect(), Some(NameDefect::ContainsRegistry), "{name}");
            assert_eq!(err.role(), NameRole::ShortName);
        }
    }

    #[test]
    fn short_name_rejects_tag() {
        let err = validate_short_name("fedora:38").unwrap_err();
        assert_eq!(err.defect(), Some(NameDefect::ContainsTag));
        assert_eq!(err.to_string(), "invalid short name \"fedora:38\": must not contain tag");
    }

    #[test]
    fn short_name_digest_reported_before_tag() {
        let err = validate_short_name(&format!("fedora:38@{}", DIGEST)).unwrap_err();
        assert_eq!(err.defect(), Some(NameDefect::ContainsDigest));
    }

    #[test]
    fn short_name_rejects_unparseable() {
        let err = validate_short_name("Fedora").unwrap_err();
        assert!(matches!(
            err,
            NameError::Unparseable {
                source: ReferenceError::NameContainsUppercase,
                ..
            }
        ));
        assert_eq!(err.input(), "Fedora");
        assert!(err.to_string().starts_with("cannot parse short name"));
    }

    #[test]
    fn alias_value_requires_registry() {
        let err = parse_alias_value("library/fedora").unwrap_err();
        assert_eq!(err.defect(), Some(NameDefect::MissingRegistry));
        assert_eq!(err.role(), NameRole::Alias);
    }

    #[test]
    fn alias_value_rejects_tag_and_digest() {
        let err = parse_alias_value("quay.io/fedora:38").unwrap_err();
        assert_eq!(err.defect(), Some(NameDefect::ContainsTag));

        let err = parse_alias_value(&format!("quay.io/fedora@{}", DIGEST)).unwrap_err();
        assert_eq!(err.defect(), Some(NameDefect::ContainsDigest));
    }

    #[test]
    fn alias_value_accepts_localhost_and_ports() {
        let value = parse_alias_value("localhost/app").expect("localhost");
        assert_eq!(value.as_str(), "localhost/app");

        let value = parse_alias_value("host:5000/team/app").expect("port");
        assert_eq!(value.domain(), "host:5000");
        assert_eq!(value.path(), "team/app");
    }

    #[test]
    fn alias_value_is_normalized() {
        let value = parse_alias_value("index.docker.io/alpine").expect("parse");
        assert_eq!(value.as_str(), "docker.io/library/alpine");
    }

    #[test]
    fn alias_value_rejects_uppercase_repository() {
        let err = parse_alias_value("quay.io/Fedora").unwrap_err();
        assert!(matches!(err, NameError::Unparseable { .. }));
    }
}
