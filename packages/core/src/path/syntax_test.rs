//! Property tests for path decomposition
//!
//! Composing a decomposed path reproduces the input modulo trailing-slash
//! normalization, for any absolute path in the grammar.

use super::syntax::{compose, decompose};
use super::normalize;
use crate::config::TreeConfig;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,8}"
}

fn selector() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn extension() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["html", "json", "xml", "txt", "png"]).prop_map(String::from)
}

fn suffix() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9.]{1,8}", 0..3).prop_map(|segments| {
        if segments.is_empty() {
            String::new()
        } else {
            format!("/{}", segments.join("/"))
        }
    })
}

fn query() -> impl Strategy<Value = String> {
    prop::option::of("[a-z0-9=&]{0,10}")
        .prop_map(|q| q.map(|q| format!("?{}", q)).unwrap_or_default())
}

/// Raw path with an extension, optional selectors and optional suffix
fn dotted_path() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(segment(), 1..5),
        prop::collection::vec(selector(), 0..3),
        extension(),
        suffix(),
        query(),
    )
        .prop_map(|(segments, selectors, ext, suffix, query)| {
            let mut raw = format!("/{}", segments.join("/"));
            for selector in selectors {
                raw.push('.');
                raw.push_str(&selector);
            }
            raw.push('.');
            raw.push_str(&ext);
            raw.push_str(&suffix);
            raw.push_str(&query);
            raw
        })
}

/// Raw path without extension, possibly with trailing slashes
fn plain_path() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(segment(), 0..5),
        0usize..3,
        query(),
    )
        .prop_map(|(segments, trailing, query)| {
            let mut raw = format!("/{}", segments.join("/"));
            if !segments.is_empty() {
                raw.push_str(&"/".repeat(trailing));
            }
            raw.push_str(&query);
            raw
        })
}

proptest! {
    #[test]
    fn prop_dotted_path_round_trips(raw in dotted_path()) {
        let config = TreeConfig::default();
        let parts = decompose(&raw, &config).unwrap();

        prop_assert!(!parts.extension.is_empty());
        prop_assert!(parts.suffix.is_empty() || parts.suffix.starts_with('/'));
        prop_assert!(parts.query_string.is_empty() || parts.query_string.starts_with('?'));
        prop_assert_eq!(parts.compose(), normalize(&raw));
    }

    #[test]
    fn prop_plain_path_round_trips(raw in plain_path()) {
        let config = TreeConfig::default();
        let parts = decompose(&raw, &config).unwrap();

        prop_assert!(parts.selectors.is_empty());
        prop_assert_eq!(parts.extension.as_str(), "");
        prop_assert_eq!(
            compose(&parts.path, &parts.selectors, &parts.extension, &parts.suffix, &parts.query_string),
            normalize(&raw)
        );
    }
}
