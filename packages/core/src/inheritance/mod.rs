//! Page Inheritance
//!
//! Inheritance resolves a property or sub-node at a fixed offset from a
//! page's content root by walking the *page* ancestor chain. A component at
//! `par/text` under `/content/site/en/jcr:content` inherits from
//! `/content/site/jcr:content/par/text`, never from its own container
//! `par`.
//!
//! The nearest ancestor page that defines the offset wins. Ancestor pages
//! without a node at the offset are skipped. Exhausting the chain yields
//! absence, never an error.
//!
//! Nodes outside any page's content subtree (pages themselves, folders)
//! have no offset and inherit nothing beyond their own properties.

use crate::error::Result;
use crate::link::Link;
use crate::models::{names, FromProperty, NodeRecord, PropertyValue};
use crate::node::{image_reference_property, ContentNode};
use crate::page::Page;
use crate::path;
use crate::search::predicates;

/// Resolve `relative_path` under the content root of `start` or its nearest
/// ancestor page defining it
///
/// An empty `relative_path` resolves the content root itself.
pub fn resolve<'t>(
    start: &Page<'t>,
    relative_path: &str,
    exclude_current: bool,
) -> Option<ContentNode<'t>> {
    let mut page = if exclude_current {
        start.parent()
    } else {
        Some(start.clone())
    };

    while let Some(current) = page {
        if let Some(candidate) = current.component(relative_path) {
            tracing::debug!(
                page = current.path(),
                relative_path,
                "inherited node resolved"
            );
            return Some(candidate);
        }
        tracing::debug!(page = current.path(), relative_path, "no node at offset");
        page = current.parent();
    }

    None
}

/// Nearest page (starting at `page` unless excluded) matching `predicate`
pub fn find_ancestor_page<'t, P>(
    page: &Page<'t>,
    predicate: P,
    exclude_current: bool,
) -> Option<Page<'t>>
where
    P: Fn(&Page<'t>) -> bool,
{
    let mut current = if exclude_current {
        page.parent()
    } else {
        Some(page.clone())
    };

    while let Some(candidate) = current {
        if predicate(&candidate) {
            return Some(candidate);
        }
        current = candidate.parent();
    }

    None
}

/// Path of `node` relative to its containing page's content root
///
/// `""` for the content root itself, absent for nodes outside a content
/// subtree.
pub fn offset_of(node: &ContentNode<'_>) -> Option<String> {
    let page = containing_page_record(node)?;
    let content_root = node.tree().content_root_path(&page.path);
    path::relative_to(&content_root, node.path()).map(str::to_string)
}

/// `node` followed by the nodes at the same offset under each ancestor
/// page, nearest first
pub fn inheritance_chain<'t>(node: &ContentNode<'t>) -> Vec<ContentNode<'t>> {
    std::iter::once(node.clone())
        .chain(
            inherited_records(node)
                .iter()
                .map(|record| ContentNode::new(node.tree(), record.clone())),
        )
        .collect()
}

fn containing_page_record<'a>(node: &'a ContentNode<'_>) -> Option<&'a NodeRecord> {
    node.containing_page
        .get_or_init(|| {
            node.tree()
                .containing_page(node.path())
                .map(|page| page.record().clone())
        })
        .as_ref()
}

fn inherited_records<'a>(node: &'a ContentNode<'_>) -> &'a [NodeRecord] {
    node.inherited_chain.get_or_init(|| {
        let Some(offset) = offset_of(node) else {
            return Vec::new();
        };
        let Some(page) = node.containing_page() else {
            return Vec::new();
        };

        let mut chain = Vec::new();
        let mut ancestor = page.parent();
        while let Some(current) = ancestor {
            match current.component(&offset) {
                Some(found) => chain.push(found.record().clone()),
                None => tracing::debug!(
                    page = current.path(),
                    offset = offset.as_str(),
                    "ancestor page has no node at offset"
                ),
            }
            ancestor = current.parent();
        }
        chain
    })
}

impl<'t> ContentNode<'t> {
    /// Page whose content subtree (or the page itself) contains this node
    pub fn containing_page(&self) -> Option<Page<'t>> {
        containing_page_record(self).map(|record| Page::new(self.tree(), record.clone()))
    }

    /// Offset from the containing page's content root (see [`offset_of`])
    pub fn offset(&self) -> Option<String> {
        offset_of(self)
    }

    /// This node and its same-offset counterparts in ancestor pages
    pub fn inheritance_chain(&self) -> Vec<ContentNode<'t>> {
        inheritance_chain(self)
    }

    // Inherited properties

    /// Raw value of `name` on this node or its nearest same-offset
    /// counterpart defining it
    pub fn inherited_value(&self, name: &str) -> Option<PropertyValue> {
        if let Some(value) = self.value(name) {
            return Some(value);
        }

        let found = inherited_records(self).iter().find_map(|record| {
            ContentNode::new(self.tree(), record.clone())
                .value(name)
                .map(|value| (record.path.as_str(), value))
        });

        match found {
            Some((source, value)) => {
                tracing::debug!(node = self.path(), property = name, source, "property inherited");
                Some(value)
            }
            None => {
                tracing::debug!(node = self.path(), property = name, "property not inherited");
                None
            }
        }
    }

    pub fn get_inherited<T: FromProperty>(&self, name: &str, default: T) -> T {
        self.get_inherited_typed(name).unwrap_or(default)
    }

    pub fn get_inherited_typed<T: FromProperty>(&self, name: &str) -> Option<T> {
        self.inherited_value(name).and_then(|value| value.to::<T>())
    }

    pub fn get_list_inherited<T: FromProperty>(&self, name: &str) -> Vec<T> {
        self.inherited_value(name)
            .map(|value| value.to_list::<T>())
            .unwrap_or_default()
    }

    pub fn get_as_node_inherited(&self, name: &str) -> Option<ContentNode<'t>> {
        self.get_inherited_typed::<String>(name)
            .and_then(|target| self.tree().node(&target))
    }

    pub fn get_as_node_list_inherited(&self, name: &str) -> Vec<ContentNode<'t>> {
        self.get_list_inherited::<String>(name)
            .iter()
            .filter_map(|target| self.tree().node(target))
            .collect()
    }

    pub fn get_as_page_inherited(&self, name: &str) -> Option<Page<'t>> {
        self.get_inherited_typed::<String>(name)
            .and_then(|target| self.tree().page(&target))
    }

    pub fn get_as_page_list_inherited(&self, name: &str) -> Vec<Page<'t>> {
        self.get_list_inherited::<String>(name)
            .iter()
            .filter_map(|target| self.tree().page(target))
            .collect()
    }

    pub fn get_as_link_inherited(&self, name: &str, strict: bool, mapped: bool) -> Option<Link> {
        self.get_inherited_typed::<String>(name)
            .and_then(|raw| self.link_for_reference(name, &raw, strict, mapped))
    }

    pub fn get_as_href_inherited(&self, name: &str, strict: bool, mapped: bool) -> Option<String> {
        self.get_as_link_inherited(name, strict, mapped)
            .map(|link| link.href().to_string())
    }

    pub fn image_reference_inherited(&self, name: &str) -> Option<String> {
        self.get_inherited_typed(&image_reference_property(name))
    }

    pub fn default_image_reference_inherited(&self) -> Option<String> {
        self.image_reference_inherited(names::DEFAULT_IMAGE_NAME)
    }

    pub fn own_image_reference_inherited(&self) -> Option<String> {
        self.get_inherited_typed(names::FILE_REFERENCE)
    }

    // Page-aware finders

    /// Nearest same-offset node (this node first unless excluded) matching
    /// `predicate`
    pub fn find_ancestor_inherited<P>(&self, predicate: P, exclude_current: bool) -> Option<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        let Some(offset) = self.offset() else {
            return (!exclude_current && predicate(self)).then(|| self.clone());
        };
        let page = self.containing_page()?;

        let found = find_ancestor_page(
            &page,
            |candidate| {
                candidate
                    .component(&offset)
                    .is_some_and(|node| predicate(&node))
            },
            exclude_current,
        )?;

        found.component(&offset)
    }

    /// Nearest same-offset node defining `name`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty property name.
    pub fn find_ancestor_with_property(
        &self,
        name: &str,
        exclude_current: bool,
    ) -> Result<Option<ContentNode<'t>>> {
        let predicate = predicates::property_exists(name)?;
        Ok(self.find_ancestor_inherited(predicate, exclude_current))
    }

    /// Nearest same-offset node whose `name` equals `value`
    pub fn find_ancestor_with_property_value(
        &self,
        name: &str,
        value: impl Into<PropertyValue>,
        exclude_current: bool,
    ) -> Result<Option<ContentNode<'t>>> {
        let predicate = predicates::property_equals(name, value)?;
        Ok(self.find_ancestor_inherited(predicate, exclude_current))
    }

    // Inherited components

    /// Node at `relative_path` below this node, taken from the nearest page
    /// that defines it at this node's offset
    pub fn component_inherited(&self, relative_path: &str) -> Option<ContentNode<'t>> {
        let relative_path = relative_path.trim_matches('/');
        let Some(offset) = self.offset() else {
            return self.child(relative_path);
        };
        let page = self.containing_page()?;
        resolve(&page, &path::join_relative(&offset, relative_path), false)
    }

    /// Children of the nearest same-offset node that has children
    pub fn components_inherited(&self) -> Vec<ContentNode<'t>> {
        self.find_ancestor_inherited(|node| node.has_children(), false)
            .map(|node| node.children())
            .unwrap_or_default()
    }

    pub fn components_inherited_matching<P>(&self, predicate: P) -> Vec<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        self.components_inherited()
            .into_iter()
            .filter(|node| predicate(node))
            .collect()
    }

    /// Children of the inherited node at `relative_path`
    pub fn components_inherited_at(&self, relative_path: &str) -> Vec<ContentNode<'t>> {
        self.component_inherited(relative_path)
            .map(|node| node.children())
            .unwrap_or_default()
    }

    pub fn components_inherited_at_matching<P>(
        &self,
        relative_path: &str,
        predicate: P,
    ) -> Vec<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        self.components_inherited_at(relative_path)
            .into_iter()
            .filter(|node| predicate(node))
            .collect()
    }
}
