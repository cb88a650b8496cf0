//! Integration tests for page-hierarchy inheritance
//!
//! Tests cover:
//! - Properties resolved from the nearest ancestor page defining them
//! - Components that must not inherit from their own container
//! - Inherited component lists and inherited images

mod common;

use anyhow::{Context, Result};
use common::site_tree;

#[test]
fn test_banner_inherited_through_two_levels() -> Result<()> {
    let tree = site_tree()?;
    let widgets = tree
        .page("/content/site/products/widgets")
        .context("widgets page")?;

    let banner: Option<String> = widgets.get_inherited_typed("banner");
    assert_eq!(banner.as_deref(), Some("/content/site/jcr:content/banner"));

    let hero = widgets
        .content_root()
        .and_then(|content| content.get_as_node_inherited("heroPath"))
        .context("inherited hero reference")?;
    assert_eq!(hero.get_typed::<String>("text").as_deref(), Some("Welcome"));
    Ok(())
}

#[test]
fn test_component_does_not_inherit_page_property() -> Result<()> {
    let tree = site_tree()?;
    let text = tree
        .node("/content/site/products/widgets/jcr:content/par/text")
        .context("widgets text")?;

    assert!(text.get_inherited_typed::<String>("copyright").is_none());
    assert_eq!(text.get_inherited("copyright", "none".to_string()), "none");
    Ok(())
}

#[test]
fn test_empty_paragraph_inherits_components() -> Result<()> {
    let tree = site_tree()?;
    let products = tree.page("/content/site/products").context("products page")?;
    let par = products.component("par").context("products par")?;

    let texts: Vec<String> = par
        .components_inherited_matching(|node| node.is_resource_type("site/components/text"))
        .iter()
        .filter_map(|node| node.get_typed::<String>("text"))
        .collect();
    assert_eq!(texts, vec!["Hello", "World"]);
    Ok(())
}

#[test]
fn test_inherited_image_reference() -> Result<()> {
    let tree = site_tree()?;
    let about = tree.page("/content/site/about").context("about page")?;
    let content = about.content_root().context("about content")?;

    assert!(content.default_image_reference().is_none());
    assert_eq!(
        content.default_image_reference_inherited().as_deref(),
        Some("/content/dam/site/logo.png")
    );
    Ok(())
}
