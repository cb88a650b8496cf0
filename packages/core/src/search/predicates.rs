//! Common predicates for node and page searches
//!
//! Constructors that take a name or path reject empty input with
//! `InvalidArgument`: an empty name is a caller bug, not missing content.

use crate::error::{Result, TreeError};
use crate::models::PropertyValue;
use crate::node::ContentNode;
use crate::page::Page;

fn require_non_empty(value: &str, what: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(TreeError::invalid_argument(format!("{} cannot be empty", what)));
    }
    Ok(value.to_string())
}

/// Node defines property `name`
pub fn property_exists(name: &str) -> Result<impl Fn(&ContentNode<'_>) -> bool> {
    let name = require_non_empty(name, "property name")?;
    Ok(move |node: &ContentNode<'_>| node.has_property(&name))
}

/// Node's `name` equals `expected` after conversion to the expected type
pub fn property_equals(
    name: &str,
    expected: impl Into<PropertyValue>,
) -> Result<impl Fn(&ContentNode<'_>) -> bool> {
    let name = require_non_empty(name, "property name")?;
    let expected = expected.into();

    Ok(move |node: &ContentNode<'_>| {
        let result = node
            .value(&name)
            .is_some_and(|stored| stored.matches(&expected));
        tracing::debug!(
            node = node.path(),
            property = name.as_str(),
            expected = %expected,
            result,
            "property value predicate"
        );
        result
    })
}

/// Node has at least one child
pub fn has_children() -> impl Fn(&ContentNode<'_>) -> bool {
    |node: &ContentNode<'_>| node.has_children()
}

/// Node's type is exactly `node_type`
pub fn node_type_is(node_type: &str) -> Result<impl Fn(&ContentNode<'_>) -> bool> {
    let node_type = require_non_empty(node_type, "node type")?;
    Ok(move |node: &ContentNode<'_>| node.is_resource_type(&node_type))
}

/// Page's template is `template_path`
pub fn template_is(template_path: &str) -> Result<impl Fn(&Page<'_>) -> bool> {
    let template_path = require_non_empty(template_path, "template path")?;
    Ok(move |page: &Page<'_>| page.template_path().as_deref() == Some(template_path.as_str()))
}

/// Page shares the template of `page`
///
/// A reference page without a template matches nothing.
pub fn same_template_as(page: &Page<'_>) -> impl Fn(&Page<'_>) -> bool {
    let template_path = page.template_path();
    move |candidate: &Page<'_>| {
        template_path.is_some() && candidate.template_path() == template_path
    }
}

/// Page has content and is not hidden from navigation
pub fn displayable() -> impl Fn(&Page<'_>) -> bool {
    |page: &Page<'_>| page.is_displayable()
}
