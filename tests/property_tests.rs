//! Property-based tests for name validation and normalization.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use shortname_aliases::core::naming::{parse_alias_value, validate_short_name, NameDefect};
use shortname_aliases::core::store::ResolvedView;

/// Strategy for generating one lowercase path component.
fn path_component() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,10}".prop_filter("localhost is a registry", |c| c != "localhost")
}

/// Strategy for generating a repository path without a registry.
fn repository_path() -> impl Strategy<Value = String> {
    prop::collection::vec(path_component(), 1..4).prop_map(|parts| parts.join("/"))
}

/// Strategy for generating a registry host, optionally with a port.
fn registry_domain() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9]{0,7}",
        "[a-z]{2,4}",
        prop::option::of(1u16..65535),
    )
        .prop_map(|(host, tld, port)| match port {
            Some(port) => format!("{host}.{tld}:{port}"),
            None => format!("{host}.{tld}"),
        })
}

proptest! {
    /// A name without a registry is a valid short name and an invalid alias.
    #[test]
    fn registry_free_names_are_short_names(path in repository_path()) {
        prop_assert!(validate_short_name(&path).is_ok());

        let err = parse_alias_value(&path).unwrap_err();
        prop_assert_eq!(err.defect(), Some(NameDefect::MissingRegistry));
    }

    /// A name with a registry is a valid alias and an invalid short name.
    #[test]
    fn registry_names_are_alias_values(domain in registry_domain(), path in repository_path()) {
        let name = format!("{domain}/{path}");
        prop_assert!(parse_alias_value(&name).is_ok());

        let err = validate_short_name(&name).unwrap_err();
        prop_assert_eq!(err.defect(), Some(NameDefect::ContainsRegistry));
    }

    /// Tags are rejected on both sides of an alias.
    #[test]
    fn tags_are_rejected(
        domain in registry_domain(),
        path in repository_path(),
        tag in "[a-z0-9][a-z0-9._-]{0,15}",
    ) {
        let short = validate_short_name(&format!("{path}:{tag}")).unwrap_err();
        prop_assert_eq!(short.defect(), Some(NameDefect::ContainsTag));

        let value = parse_alias_value(&format!("{domain}/{path}:{tag}")).unwrap_err();
        prop_assert_eq!(value.defect(), Some(NameDefect::ContainsTag));
    }

    /// Normalizing a normalized value changes nothing.
    #[test]
    fn normalization_is_idempotent(domain in registry_domain(), path in repository_path()) {
        let once = parse_alias_value(&format!("{domain}/{path}")).unwrap();
        let twice = parse_alias_value(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Docker Hub names gain the official-image prefix exactly once.
    #[test]
    fn docker_hub_names_normalize(component in path_component()) {
        let value = parse_alias_value(&format!("docker.io/{component}")).unwrap();
        prop_assert_eq!(value.as_str(), format!("docker.io/library/{component}"));
    }

    /// Every malformed row is reported, in name order.
    #[test]
    fn every_bad_row_is_reported(
        good in prop::collection::btree_set(path_component(), 0..4),
        bad in prop::collection::btree_set(path_component(), 1..4),
    ) {
        let bad: Vec<String> = bad.difference(&good).cloned().collect();
        prop_assume!(!bad.is_empty());

        let mut rows: Vec<(String, String)> = good
            .iter()
            .map(|name| (name.clone(), format!("reg.io/{name}")))
            .collect();
        rows.extend(bad.iter().map(|name| (name.clone(), name.clone())));

        let errors = ResolvedView::from_entries(
            rows.iter().map(|(n, v)| (n.as_str(), v.as_str(), std::path::PathBuf::from("/a.conf"))),
        )
        .unwrap_err();

        let names: Vec<&str> = errors.names();
        let expected: Vec<&str> = bad.iter().map(String::as_str).collect();
        prop_assert_eq!(names, expected);
    }
}
