//! Links
//!
//! `Link` is the immutable, serializable form of a presentable reference:
//! path, selectors, extension, suffix, query string, the derived `href`,
//! presentation metadata and, for navigation, child links. Links are made
//! by [`LinkBuilder`]; once built nothing changes.

mod builder;

pub use builder::LinkBuilder;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable link value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "LinkFields")]
pub struct Link {
    path: String,
    selectors: Vec<String>,
    extension: String,
    suffix: String,
    query_string: String,
    href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    properties: BTreeMap<String, String>,
    external: bool,
    active: bool,
    children: Vec<Link>,
}

impl Link {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Empty or starting with `/`
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Empty or starting with `?`
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// `path` + selectors + extension + suffix + query string
    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn is_external(&self) -> bool {
        self.external
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn children(&self) -> &[Link] {
        &self.children
    }

    /// Number of links in this tree, including this one
    pub fn tree_size(&self) -> usize {
        1 + self.children.iter().map(Link::tree_size).sum::<usize>()
    }
}

/// Deserialized form; `href` is recomputed rather than trusted
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LinkFields {
    path: String,
    selectors: Vec<String>,
    extension: String,
    suffix: String,
    query_string: String,
    target: Option<String>,
    title: Option<String>,
    properties: BTreeMap<String, String>,
    external: bool,
    active: bool,
    children: Vec<Link>,
}

impl From<LinkFields> for Link {
    fn from(fields: LinkFields) -> Self {
        let builder = LinkBuilder::for_path(fields.path)
            .selectors(fields.selectors)
            .extension(fields.extension)
            .suffix(fields.suffix)
            .query_string(fields.query_string)
            .external(fields.external)
            .active(fields.active)
            .children(fields.children);

        let builder = fields
            .properties
            .into_iter()
            .fold(builder, |builder, (name, value)| builder.property(name, value));
        let builder = match fields.target {
            Some(target) => builder.target(target),
            None => builder,
        };
        let builder = match fields.title {
            Some(title) => builder.title(title),
            None => builder,
        };

        builder.build()
    }
}
