//! Content Nodes
//!
//! `ContentNode` is a read-only view of one stored node, bound to the
//! `ContentTree` it was read from. Every accessor is total: a missing node,
//! a missing property, a value that does not convert or a reference to a
//! path that does not exist all read as `None`, an empty list or the
//! caller's default.
//!
//! Property names may be relative: `image/fileReference` reads
//! `fileReference` on the descendant `image`.
//!
//! Inherited accessors live in [`crate::inheritance`] and raw ancestor and
//! descendant search in [`crate::search`]; both extend this type.

use crate::link::{Link, LinkBuilder};
use crate::models::{names, FromProperty, NodeRecord, PropertyMap, PropertyValue};
use crate::page::Page;
use crate::path;
use crate::tree::{Adapted, AdapterKind, ContentTree};
use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Read-only view of a node in a `ContentTree`
#[derive(Clone)]
pub struct ContentNode<'t> {
    tree: &'t ContentTree,
    record: NodeRecord,
    /// Containing page record, computed on first use
    pub(crate) containing_page: OnceCell<Option<NodeRecord>>,
    /// Same-offset nodes in ancestor pages, nearest first
    pub(crate) inherited_chain: OnceCell<Vec<NodeRecord>>,
}

impl<'t> ContentNode<'t> {
    pub(crate) fn new(tree: &'t ContentTree, record: NodeRecord) -> Self {
        Self {
            tree,
            record,
            containing_page: OnceCell::new(),
            inherited_chain: OnceCell::new(),
        }
    }

    pub fn tree(&self) -> &'t ContentTree {
        self.tree
    }

    pub fn record(&self) -> &NodeRecord {
        &self.record
    }

    pub fn path(&self) -> &str {
        &self.record.path
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    pub fn node_type(&self) -> &str {
        &self.record.node_type
    }

    pub fn is_resource_type(&self, node_type: &str) -> bool {
        self.record.node_type == node_type
    }

    /// The node's own properties
    pub fn properties(&self) -> &PropertyMap {
        &self.record.properties
    }

    /// Whether this node is a page (not a page's content)
    pub fn is_page(&self) -> bool {
        self.tree.is_page_record(&self.record)
    }

    /// Whether this node is the content root of its parent page
    pub fn is_content_root(&self) -> bool {
        self.name() == self.tree.config().content_root_name
            && self
                .parent()
                .is_some_and(|parent| parent.is_page())
    }

    /// Component identifier, unique within the containing page
    ///
    /// The content root uses its page's path, a page uses its own path,
    /// a component uses its path relative to the page's content root, and a
    /// node outside any page uses its full path. The leading `/` is dropped
    /// and remaining `/` become `-`.
    pub fn id(&self) -> String {
        let source = if self.is_content_root() {
            path::parent_of(self.path()).unwrap_or("/").to_string()
        } else if self.is_page() {
            self.path().to_string()
        } else {
            match self.offset() {
                Some(offset) if !offset.is_empty() => format!("/{}", offset),
                _ => self.path().to_string(),
            }
        };

        source.trim_start_matches('/').replace('/', "-")
    }

    // Hierarchy

    pub fn parent(&self) -> Option<ContentNode<'t>> {
        path::parent_of(self.path()).and_then(|parent| self.tree.node(parent))
    }

    /// Descendant at a relative path, absent for an empty path
    pub fn child(&self, relative_path: &str) -> Option<ContentNode<'t>> {
        let relative_path = relative_path.trim_matches('/');
        if relative_path.is_empty() {
            return None;
        }
        self.tree.node(&path::join(self.path(), relative_path))
    }

    /// Children in stored order
    pub fn children(&self) -> Vec<ContentNode<'t>> {
        self.tree
            .store()
            .children_of(self.path())
            .into_iter()
            .map(|record| ContentNode::new(self.tree, record))
            .collect()
    }

    pub fn children_matching<P>(&self, predicate: P) -> Vec<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        self.children()
            .into_iter()
            .filter(|child| predicate(child))
            .collect()
    }

    pub fn has_children(&self) -> bool {
        !self.tree.store().children_of(self.path()).is_empty()
    }

    /// Zero-based position among the parent's children, absent for the root
    pub fn index(&self) -> Option<usize> {
        self.index_matching(|_| true)
    }

    /// Position among the parent's children of type `node_type`
    pub fn index_of_type(&self, node_type: &str) -> Option<usize> {
        self.index_matching(|record| record.node_type == node_type)
    }

    fn index_matching<F>(&self, filter: F) -> Option<usize>
    where
        F: Fn(&NodeRecord) -> bool,
    {
        let parent = path::parent_of(self.path())?;
        self.tree
            .store()
            .children_of(parent)
            .iter()
            .filter(|record| filter(record))
            .position(|record| record.path == self.record.path)
    }

    // Properties

    /// Raw value of a (possibly relative) property name
    pub fn value(&self, name: &str) -> Option<PropertyValue> {
        match name.rsplit_once('/') {
            Some((relative, property)) => self
                .child(relative)
                .and_then(|node| node.record.properties.get(property).cloned()),
            None => self.record.properties.get(name).cloned(),
        }
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Value of `name` as `T`, or `default` if absent or not convertible
    pub fn get<T: FromProperty>(&self, name: &str, default: T) -> T {
        self.get_typed(name).unwrap_or(default)
    }

    /// Value of `name` as `T`
    pub fn get_typed<T: FromProperty>(&self, name: &str) -> Option<T> {
        self.value(name).and_then(|value| value.to::<T>())
    }

    /// Values of `name` as a list of `T`, empty if absent
    pub fn get_list<T: FromProperty>(&self, name: &str) -> Vec<T> {
        self.value(name)
            .map(|value| value.to_list::<T>())
            .unwrap_or_default()
    }

    // Path references

    /// Node referenced by the path stored in `name`
    pub fn get_as_node(&self, name: &str) -> Option<ContentNode<'t>> {
        self.get_typed::<String>(name)
            .and_then(|target| self.tree.node(&target))
    }

    pub fn get_as_node_list(&self, name: &str) -> Vec<ContentNode<'t>> {
        self.get_list::<String>(name)
            .iter()
            .filter_map(|target| self.tree.node(target))
            .collect()
    }

    /// Page referenced by the path stored in `name`
    pub fn get_as_page(&self, name: &str) -> Option<Page<'t>> {
        self.get_typed::<String>(name)
            .and_then(|target| self.tree.page(&target))
    }

    pub fn get_as_page_list(&self, name: &str) -> Vec<Page<'t>> {
        self.get_list::<String>(name)
            .iter()
            .filter_map(|target| self.tree.page(target))
            .collect()
    }

    /// Link for the path stored in `name` (see `ContentTree::link_for_path`)
    pub fn get_as_link(&self, name: &str, strict: bool, mapped: bool) -> Option<Link> {
        self.get_typed::<String>(name)
            .and_then(|raw| self.link_for_reference(name, &raw, strict, mapped))
    }

    pub fn get_as_href(&self, name: &str, strict: bool, mapped: bool) -> Option<String> {
        self.get_as_link(name, strict, mapped)
            .map(|link| link.href().to_string())
    }

    /// Adapt the path stored in `name` to `kind`
    ///
    /// Links are built for any stored path; nodes and pages only for paths
    /// that exist.
    pub fn resolve_path_property(&self, name: &str, kind: AdapterKind) -> Option<Adapted<'t>> {
        let target = self.get_typed::<String>(name)?;
        self.tree.adapt(kind, &target).or_else(|| match kind {
            AdapterKind::Link => self
                .link_for_reference(name, &target, false, false)
                .map(Adapted::Link),
            _ => None,
        })
    }

    pub(crate) fn link_for_reference(
        &self,
        name: &str,
        raw: &str,
        strict: bool,
        mapped: bool,
    ) -> Option<Link> {
        match self.tree.link_for_path(raw, strict, mapped) {
            Ok(link) => Some(link),
            Err(e) => {
                tracing::warn!(
                    node = self.path(),
                    property = name,
                    "Ignoring unusable path reference: {}",
                    e
                );
                None
            }
        }
    }

    // Images

    /// Asset reference of the image child `name` (`<name>/fileReference`)
    pub fn image_reference(&self, name: &str) -> Option<String> {
        self.get_typed(&image_reference_property(name))
    }

    /// Asset reference of the default `image` child
    pub fn default_image_reference(&self) -> Option<String> {
        self.image_reference(names::DEFAULT_IMAGE_NAME)
    }

    /// Asset reference stored on this node itself
    pub fn own_image_reference(&self) -> Option<String> {
        self.get_typed(names::FILE_REFERENCE)
    }

    // Components

    /// Child components
    pub fn components(&self) -> Vec<ContentNode<'t>> {
        self.children()
    }

    pub fn components_matching<P>(&self, predicate: P) -> Vec<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        self.children_matching(predicate)
    }

    /// Children of the descendant at `relative_path`, empty if it is absent
    pub fn components_at(&self, relative_path: &str) -> Vec<ContentNode<'t>> {
        self.child(relative_path)
            .map(|node| node.children())
            .unwrap_or_default()
    }

    pub fn components_at_matching<P>(&self, relative_path: &str, predicate: P) -> Vec<ContentNode<'t>>
    where
        P: Fn(&ContentNode<'t>) -> bool,
    {
        self.components_at(relative_path)
            .into_iter()
            .filter(|node| predicate(node))
            .collect()
    }

    pub fn components_of_type(&self, relative_path: &str, node_type: &str) -> Vec<ContentNode<'t>> {
        self.components_at_matching(relative_path, |node| node.is_resource_type(node_type))
    }

    // Links

    pub fn link_builder(&self, mapped: bool) -> LinkBuilder {
        LinkBuilder::for_node(self, mapped)
    }

    pub fn link(&self, mapped: bool) -> Link {
        self.link_builder(mapped).build()
    }

    pub fn href(&self, mapped: bool) -> String {
        self.link(mapped).href().to_string()
    }

    /// Adapt this node to a page, if it is one
    pub fn as_page(&self) -> Option<Page<'t>> {
        self.is_page()
            .then(|| Page::new(self.tree, self.record.clone()))
    }
}

pub(crate) fn image_reference_property(name: &str) -> String {
    format!("{}/{}", name, names::FILE_REFERENCE)
}

impl PartialEq for ContentNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

impl Eq for ContentNode<'_> {}

impl Hash for ContentNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path().hash(state);
    }
}

impl fmt::Debug for ContentNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNode")
            .field("path", &self.record.path)
            .field("properties", &self.record.properties)
            .finish()
    }
}
