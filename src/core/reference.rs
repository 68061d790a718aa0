//! core::reference
//!
//! Container image reference grammar.
//!
//! # Grammar
//!
//! ```text
//! reference      := name [ ":" tag ] [ "@" digest ]
//! name           := [ domain "/" ] path-component [ "/" path-component ]*
//! domain         := domain-component [ "." domain-component ]* [ ":" port ]
//! path-component := alnum [ separator alnum ]*
//! alnum          := /[a-z0-9]+/
//! separator      := /[._]|__|[-]+/
//! tag            := /[\w][\w.-]{0,127}/
//! digest         := algorithm ":" /[a-fA-F0-9]{32,}/
//! ```
//!
//! The first slash-separated component is only treated as a domain when more
//! components follow and it matches the domain grammar. Whether that domain
//! names a *registry* is a separate question answered by
//! [`is_registry_domain`].
//!
//! # Example
//!
//! ```
//! use shortname_aliases::core::reference::{parse, parse_normalized_named};
//!
//! let reference = parse("quay.io/podman/stable:latest").unwrap();
//! assert_eq!(reference.domain(), "quay.io");
//! assert_eq!(reference.path(), "podman/stable");
//! assert!(reference.is_tagged());
//!
//! let normalized = parse_normalized_named("docker.io/alpine").unwrap();
//! assert_eq!(normalized.to_string(), "docker.io/library/alpine");
//! ```

use std::fmt;

use thiserror::Error;

/// The registry implied by names without a domain.
pub const DEFAULT_DOMAIN: &str = "docker.io";

/// Historical spelling of [`DEFAULT_DOMAIN`].
const LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";

/// Namespace of single-segment repositories on the default registry.
const OFFICIAL_REPO_PREFIX: &str = "library/";

/// Maximum length of `domain/path`.
pub const NAME_TOTAL_LENGTH_MAX: usize = 255;

const TAG_LENGTH_MAX: usize = 128;

/// Errors from reference parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("repository name must have at least one component")]
    NameEmpty,

    #[error("invalid reference format")]
    InvalidFormat,

    #[error("invalid reference format: repository name must be lowercase")]
    NameContainsUppercase,

    #[error("repository name must not be more than {} characters", NAME_TOTAL_LENGTH_MAX)]
    NameTooLong,

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("invalid repository name ({0}), cannot specify 64-byte hexadecimal strings")]
    HexIdentifier(String),
}

/// A parsed image reference.
///
/// `domain` is empty when the name has no domain component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    domain: String,
    path: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl Reference {
    /// The domain component, or `""` if there is none.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The repository path below the domain.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The repository name (`domain/path`, or `path` without a domain).
    pub fn name(&self) -> String {
        if self.domain.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{}", self.domain, self.path)
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    pub fn is_digested(&self) -> bool {
        self.digest.is_some()
    }

    /// True if the reference is a bare repository name.
    pub fn is_name_only(&self) -> bool {
        !self.is_tagged() && !self.is_digested()
    }

    /// True if the domain component names a registry.
    pub fn has_registry_domain(&self) -> bool {
        is_registry_domain(&self.domain)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())?;
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

/// Decide whether a domain component names a registry.
///
/// A component is a registry if it contains `.` or `:`, or is exactly
/// `localhost`. No DNS lookup is involved.
///
/// # Example
///
/// ```
/// use shortname_aliases::core::reference::is_registry_domain;
///
/// assert!(is_registry_domain("quay.io"));
/// assert!(is_registry_domain("myhost:5000"));
/// assert!(is_registry_domain("localhost"));
/// assert!(!is_registry_domain("library"));
/// assert!(!is_registry_domain(""));
/// ```
pub fn is_registry_domain(domain: &str) -> bool {
    domain.contains(['.', ':']) || domain == "localhost"
}

/// Parse a reference without applying any normalization.
///
/// # Errors
///
/// - [`ReferenceError::NameEmpty`] for the empty string
/// - [`ReferenceError::NameContainsUppercase`] if the input would parse once
///   lowercased
/// - [`ReferenceError::InvalidFormat`] for anything else the grammar rejects
/// - [`ReferenceError::NameTooLong`] if `domain/path` exceeds 255 characters
/// - [`ReferenceError::InvalidDigest`] for unsupported or malformed digests
pub fn parse(s: &str) -> Result<Reference, ReferenceError> {
    let Some(parts) = split(s) else {
        if s.is_empty() {
            return Err(ReferenceError::NameEmpty);
        }
        if split(&s.to_lowercase()).is_some() {
            return Err(ReferenceError::NameContainsUppercase);
        }
        return Err(ReferenceError::InvalidFormat);
    };

    let name_len = if parts.domain.is_empty() {
        parts.path.len()
    } else {
        parts.domain.len() + 1 + parts.path.len()
    };
    if name_len > NAME_TOTAL_LENGTH_MAX {
        return Err(ReferenceError::NameTooLong);
    }

    if let Some(digest) = parts.digest {
        validate_digest(digest)?;
    }

    Ok(Reference {
        domain: parts.domain.to_string(),
        path: parts.path.to_string(),
        tag: parts.tag.map(str::to_string),
        digest: parts.digest.map(str::to_string),
    })
}

/// Parse a reference and normalize it to its fully-qualified form.
///
/// Names without a registry domain are placed on [`DEFAULT_DOMAIN`],
/// `index.docker.io` is rewritten to `docker.io`, and single-segment
/// repositories on the default registry gain the `library/` namespace.
///
/// # Errors
///
/// In addition to the errors of [`parse`], rejects 64-character hex
/// identifiers and repository paths containing uppercase characters.
pub fn parse_normalized_named(s: &str) -> Result<Reference, ReferenceError> {
    if is_hex_identifier(s) {
        return Err(ReferenceError::HexIdentifier(s.to_string()));
    }

    let (domain, remainder) = split_docker_domain(s);
    let remote_name = match remainder.find(':') {
        Some(i) => &remainder[..i],
        None => remainder.as_str(),
    };
    if remote_name.to_lowercase() != remote_name {
        return Err(ReferenceError::NameContainsUppercase);
    }

    parse(&format!("{}/{}", domain, remainder))
}

/// Borrowed pieces of a syntactically valid reference.
struct Parts<'a> {
    domain: &'a str,
    path: &'a str,
    tag: Option<&'a str>,
    digest: Option<&'a str>,
}

/// Split `s` along the grammar, returning `None` on any syntax error.
fn split(s: &str) -> Option<Parts<'_>> {
    let (rest, digest) = match s.split_once('@') {
        Some((rest, digest)) => {
            if !is_digest_syntax(digest) {
                return None;
            }
            (rest, Some(digest))
        }
        None => (s, None),
    };

    // A ':' after the last '/' starts the tag; before it, it's a port.
    let (name, tag) = match rest.rfind(':') {
        Some(i) if !rest[i..].contains('/') => {
            let tag = &rest[i + 1..];
            if !is_tag(tag) {
                return None;
            }
            (&rest[..i], Some(tag))
        }
        _ => (rest, None),
    };

    let (domain, path) = match name.split_once('/') {
        Some((first, remainder)) if is_domain(first) => (first, remainder),
        _ => ("", name),
    };

    if !path.split('/').all(is_path_component) {
        return None;
    }

    Some(Parts {
        domain,
        path,
        tag,
        digest,
    })
}

fn split_docker_domain(name: &str) -> (String, String) {
    let (mut domain, mut remainder) = match name.split_once('/') {
        Some((first, rest)) if is_registry_domain(first) || first.to_lowercase() != first => {
            (first.to_string(), rest.to_string())
        }
        _ => (DEFAULT_DOMAIN.to_string(), name.to_string()),
    };

    if domain == LEGACY_DEFAULT_DOMAIN {
        domain = DEFAULT_DOMAIN.to_string();
    }
    if domain == DEFAULT_DOMAIN && !remainder.contains('/') {
        remainder = format!("{}{}", OFFICIAL_REPO_PREFIX, remainder);
    }
    (domain, remainder)
}

fn is_domain(s: &str) -> bool {
    let host = match s.rsplit_once(':') {
        Some((host, port)) => {
            if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            host
        }
        None => s,
    };
    host.split('.').all(is_domain_component)
}

fn is_domain_component(c: &str) -> bool {
    let bytes = c.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}

fn is_path_component(c: &str) -> bool {
    let bytes = c.as_bytes();
    let is_alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    let mut i = 0;
    loop {
        let start = i;
        while i < bytes.len() && is_alnum(bytes[i]) {
            i += 1;
        }
        if i == start {
            return false;
        }
        if i == bytes.len() {
            return true;
        }
        match bytes[i] {
            b'.' => i += 1,
            b'_' => {
                i += 1;
                if i < bytes.len() && bytes[i] == b'_' {
                    i += 1;
                }
            }
            b'-' => {
                while i < bytes.len() && bytes[i] == b'-' {
                    i += 1;
                }
            }
            _ => return false,
        }
    }
}

fn is_tag(tag: &str) -> bool {
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';
    let bytes = tag.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) => {
            tag.len() <= TAG_LENGTH_MAX
                && is_word(*first)
                && rest.iter().all(|b| is_word(*b) || *b == b'.' || *b == b'-')
        }
        None => false,
    }
}

fn is_digest_syntax(digest: &str) -> bool {
    let Some((algorithm, encoded)) = digest.split_once(':') else {
        return false;
    };
    let algorithm_ok = algorithm
        .split(['+', '.', '_', '-'])
        .all(|component| {
            let mut chars = component.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric())
        });
    algorithm_ok && encoded.len() >= 32 && encoded.bytes().all(|b| b.is_ascii_hexdigit())
}

fn validate_digest(digest: &str) -> Result<(), ReferenceError> {
    let (algorithm, encoded) = digest
        .split_once(':')
        .ok_or_else(|| ReferenceError::InvalidDigest("invalid checksum digest format".into()))?;

    let expected_len = match algorithm {
        "sha256" => 64,
        "sha384" => 96,
        "sha512" => 128,
        other => {
            return Err(ReferenceError::InvalidDigest(format!(
                "unsupported digest algorithm '{}'",
                other
            )))
        }
    };
    if encoded.len() != expected_len {
        return Err(ReferenceError::InvalidDigest(
            "invalid checksum digest length".into(),
        ));
    }
    if !encoded
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(ReferenceError::InvalidDigest(
            "invalid checksum digest format".into(),
        ));
    }
    Ok(())
}

fn is_hex_identifier(s: &str) -> bool {
    s.len() == 64
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
