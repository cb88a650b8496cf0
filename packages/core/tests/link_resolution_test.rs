//! Integration tests for link building from raw paths
//!
//! Tests cover:
//! - Decomposition of raw paths that resolve to nodes
//! - External classification under strict resolution
//! - Path mapping
//! - JSON form of links and configuration files

mod common;

use anyhow::{Context, Result};
use common::site_tree;
use sitetree_core::path::decompose;
use sitetree_core::{Link, LinkBuilder, TreeConfig, TreeError};
use std::io::Write;

#[test]
fn test_raw_path_round_trip() -> Result<()> {
    let tree = site_tree()?;
    let raw = "/content/site/products.teaser.html/extra?x=1";

    let link = tree.link_for_path(raw, true, false)?;
    assert_eq!(link.path(), "/content/site/products");
    assert_eq!(link.selectors(), ["teaser".to_string()]);
    assert_eq!(link.extension(), "html");
    assert_eq!(link.suffix(), "/extra");
    assert_eq!(link.query_string(), "?x=1");
    assert_eq!(link.href(), raw);
    assert!(!link.is_external());
    Ok(())
}

#[test]
fn test_external_classification() -> Result<()> {
    let tree = site_tree()?;

    let external = tree.link_for_path("https://example.com/a.html?b=1", true, false)?;
    assert!(external.is_external());
    assert_eq!(external.href(), "https://example.com/a.html?b=1");

    let missing_internal = tree.link_for_path("/content/site/missing.html", true, false)?;
    assert!(!missing_internal.is_external());
    assert_eq!(missing_internal.href(), "/content/site/missing.html");

    let outside = tree.link_for_path("/etc/designs/site.css", true, false)?;
    assert!(outside.is_external());

    let lenient = tree.link_for_path("/etc/designs/site.css", false, false)?;
    assert!(!lenient.is_external());
    Ok(())
}

#[test]
fn test_mapped_links() -> Result<()> {
    let tree = site_tree()?;

    let link = tree.link_for_path("/content/site/products/widgets.html", false, true)?;
    assert_eq!(link.href(), "/products/widgets.html");

    let literal = tree.link_for_path("/content/site/missing", false, true)?;
    assert_eq!(literal.href(), "/missing");
    Ok(())
}

#[test]
fn test_lenient_page_path_without_extension_stays_bare() -> Result<()> {
    let tree = site_tree()?;

    let lenient = tree.link_for_path("/content/site/products", false, false)?;
    assert_eq!(lenient.path(), "/content/site/products");
    assert_eq!(lenient.extension(), "");
    assert_eq!(lenient.href(), "/content/site/products");

    let mapped = tree.link_for_path("/content/site/products", false, true)?;
    assert_eq!(mapped.href(), "/products");

    let strict = tree.link_for_path("/content/site/products", true, false)?;
    assert_eq!(strict.href(), "/content/site/products.html");

    let explicit = tree.link_for_path("/content/site/products.json", false, false)?;
    assert_eq!(explicit.href(), "/content/site/products.json");
    Ok(())
}

#[test]
fn test_page_mapped_to_site_root() -> Result<()> {
    let tree = site_tree()?;
    let site = tree.page("/content/site").context("site page")?;

    assert_eq!(site.href(true), "/");
    assert_eq!(site.href(false), "/content/site.html");
    Ok(())
}

#[test]
fn test_empty_path_is_malformed() -> Result<()> {
    let tree = site_tree()?;
    let err = tree.link_for_path("  ", true, false).unwrap_err();
    assert!(matches!(err, TreeError::MalformedPath { .. }));
    Ok(())
}

#[test]
fn test_link_builder_for_path_keeps_decomposed_parts() -> Result<()> {
    let tree = site_tree()?;
    let link = tree
        .link_builder_for_path("/content/site/about.html", true, false)?
        .title("About us")
        .target("_self")
        .build();

    assert_eq!(link.href(), "/content/site/about.html");
    assert_eq!(link.title(), Some("About us"));
    assert_eq!(link.target(), Some("_self"));
    Ok(())
}

#[test]
fn test_link_json_form() -> Result<()> {
    let link = LinkBuilder::for_path("/content/site/products")
        .selector("teaser")
        .extension("html")
        .title("Products")
        .property("rel", "nofollow")
        .child(LinkBuilder::for_path("/content/site/products/widgets").build())
        .build();

    let json = serde_json::to_value(&link)?;
    assert_eq!(json["href"], "/content/site/products.teaser.html");
    assert_eq!(json["queryString"], "");
    assert_eq!(json["properties"]["rel"], "nofollow");
    assert!(json.get("target").is_none());
    assert_eq!(json["children"][0]["path"], "/content/site/products/widgets");

    let back: Link = serde_json::from_value(json)?;
    assert_eq!(back, link);
    Ok(())
}

#[test]
fn test_deserialized_href_is_recomputed() -> Result<()> {
    let link: Link = serde_json::from_str(
        r#"{"path": "/content/site", "extension": "html", "href": "/somewhere/else"}"#,
    )?;
    assert_eq!(link.href(), "/content/site.html");
    Ok(())
}

#[test]
fn test_deserialized_parts_are_normalized() -> Result<()> {
    let link: Link = serde_json::from_str(
        r#"{"path": "/a", "selectors": ["x", ""], "extension": ".json", "suffix": "tail", "queryString": "x=1"}"#,
    )?;
    assert_eq!(link.selectors(), ["x".to_string()]);
    assert_eq!(link.extension(), "json");
    assert_eq!(link.suffix(), "/tail");
    assert_eq!(link.query_string(), "?x=1");
    assert_eq!(link.href(), "/a.x.json/tail?x=1");
    Ok(())
}

#[test]
fn test_config_file_changes_decomposition() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{"known_extensions": ["page"], "default_extension": "page"}}"#
    )?;

    let config = TreeConfig::from_json_file(file.path()).context("config file")?;
    assert_eq!(config.content_root_name, "jcr:content");

    let parts = decompose("/content/site.page", &config)?;
    assert_eq!(parts.path, "/content/site");
    assert_eq!(parts.extension, "page");

    let parts = decompose("/content/site.html", &config)?;
    assert_eq!(parts.path, "/content/site.html");

    let tree = common::site_tree_with_config(config)?;
    let site = tree.page("/content/site").context("site page")?;
    assert_eq!(site.href(false), "/content/site.page");
    Ok(())
}
