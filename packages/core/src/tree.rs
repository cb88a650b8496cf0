//! Content Tree Handle
//!
//! `ContentTree` is the explicit entry point to the accessor layer: it bundles
//! the store, the tree conventions (`TreeConfig`) and the adapter registry,
//! and every `ContentNode`, `Page` and `LinkBuilder` borrows it. There is no
//! ambient lookup; callers create a tree once and pass `&ContentTree` around.
//!
//! # Examples
//!
//! ```rust
//! use sitetree_core::{ContentTree, MemoryStore, PropertyMap};
//! use std::sync::Arc;
//!
//! let store = MemoryStore::new()
//!     .with_node("/content", "sling:Folder", PropertyMap::new())?
//!     .with_node("/content/site", "cq:Page", PropertyMap::new())?
//!     .with_node(
//!         "/content/site/jcr:content",
//!         "site/components/page",
//!         PropertyMap::new().with("jcr:title", "Site"),
//!     )?;
//!
//! let tree = ContentTree::new(Arc::new(store));
//! let page = tree.page("/content/site").unwrap();
//! assert_eq!(page.title(), "Site");
//! assert_eq!(page.href(false), "/content/site.html");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::TreeConfig;
use crate::db::ContentStore;
use crate::error::{Result, TreeError};
use crate::link::{Link, LinkBuilder};
use crate::models::NodeRecord;
use crate::node::ContentNode;
use crate::page::Page;
use crate::path;
use crate::search::predicates;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Kinds a path can be adapted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    Node,
    Page,
    Link,
}

/// Result of adapting a path through the registry
#[derive(Debug, Clone)]
pub enum Adapted<'t> {
    Node(ContentNode<'t>),
    Page(Page<'t>),
    Link(Link),
}

impl<'t> Adapted<'t> {
    pub fn kind(&self) -> AdapterKind {
        match self {
            Adapted::Node(_) => AdapterKind::Node,
            Adapted::Page(_) => AdapterKind::Page,
            Adapted::Link(_) => AdapterKind::Link,
        }
    }

    pub fn into_node(self) -> Option<ContentNode<'t>> {
        match self {
            Adapted::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_page(self) -> Option<Page<'t>> {
        match self {
            Adapted::Page(page) => Some(page),
            _ => None,
        }
    }

    pub fn into_link(self) -> Option<Link> {
        match self {
            Adapted::Link(link) => Some(link),
            _ => None,
        }
    }
}

/// Constructor turning an existing path into an adapted value
///
/// Constructors are plain functions: they receive the tree and an absolute
/// path and return `None` when the path cannot be adapted to their kind.
pub type AdapterFn = for<'t> fn(&'t ContentTree, &str) -> Option<Adapted<'t>>;

/// Registry of adapter constructors keyed by `AdapterKind`
///
/// The set of adaptable kinds is closed; registering replaces the
/// constructor for a kind.
#[derive(Clone)]
pub struct AdapterRegistry {
    constructors: HashMap<AdapterKind, AdapterFn>,
}

impl AdapterRegistry {
    /// Create an empty registry (every adaptation yields `None`)
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with the node, page and link constructors
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AdapterKind::Node, adapt_node);
        registry.register(AdapterKind::Page, adapt_page);
        registry.register(AdapterKind::Link, adapt_link);
        registry
    }

    /// Register (or replace) the constructor for `kind`
    pub fn register(&mut self, kind: AdapterKind, constructor: AdapterFn) {
        self.constructors.insert(kind, constructor);
    }

    pub fn is_registered(&self, kind: AdapterKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    fn get(&self, kind: AdapterKind) -> Option<AdapterFn> {
        self.constructors.get(&kind).copied()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&AdapterKind> = self.constructors.keys().collect();
        kinds.sort_by_key(|kind| format!("{:?}", kind));
        f.debug_struct("AdapterRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

fn adapt_node<'t>(tree: &'t ContentTree, path: &str) -> Option<Adapted<'t>> {
    tree.node(path).map(Adapted::Node)
}

fn adapt_page<'t>(tree: &'t ContentTree, path: &str) -> Option<Adapted<'t>> {
    tree.page(path).map(Adapted::Page)
}

fn adapt_link<'t>(tree: &'t ContentTree, path: &str) -> Option<Adapted<'t>> {
    tree.node(path).map(|node| Adapted::Link(node.link(false)))
}

/// Handle over a content store, shared by every accessor built from it
pub struct ContentTree {
    store: Arc<dyn ContentStore>,
    config: TreeConfig,
    adapters: AdapterRegistry,
}

impl ContentTree {
    /// Create a tree with the default configuration and adapters
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            config: TreeConfig::default(),
            adapters: AdapterRegistry::with_defaults(),
        }
    }

    /// Create a tree with a validated configuration
    pub fn with_config(store: Arc<dyn ContentStore>, config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            adapters: AdapterRegistry::with_defaults(),
        })
    }

    /// Replace the adapter registry
    pub fn with_adapters(mut self, adapters: AdapterRegistry) -> Self {
        self.adapters = adapters;
        self
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Node at an absolute path
    pub fn node(&self, path: &str) -> Option<ContentNode<'_>> {
        self.store
            .node_at(path)
            .map(|record| ContentNode::new(self, record))
    }

    /// Page at an absolute path, absent if the node is not a page
    pub fn page(&self, path: &str) -> Option<Page<'_>> {
        self.store
            .node_at(path)
            .filter(|record| self.is_page_record(record))
            .map(|record| Page::new(self, record))
    }

    /// Nearest page at or above `path`
    ///
    /// The path itself does not need to exist; the walk starts at the
    /// deepest existing ancestor.
    pub fn containing_page(&self, path: &str) -> Option<Page<'_>> {
        let mut current = Some(path);
        while let Some(candidate) = current {
            if let Some(page) = self.page(candidate) {
                return Some(page);
            }
            current = path::parent_of(candidate);
        }
        None
    }

    /// Pages beneath `root_path` (excluding the root page) matching `predicate`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `root_path` is not absolute. A root that
    /// does not exist or is not a page yields an empty list.
    pub fn find_pages<P>(&self, root_path: &str, predicate: P) -> Result<Vec<Page<'_>>>
    where
        P: Fn(&Page<'_>) -> bool,
    {
        if !root_path.starts_with('/') {
            return Err(TreeError::invalid_argument(format!(
                "root path must be absolute: '{}'",
                root_path
            )));
        }

        let started = Instant::now();
        let pages = self
            .page(root_path)
            .map(|root| root.find_descendants(predicate))
            .unwrap_or_default();

        tracing::debug!(
            root = root_path,
            results = pages.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "find_pages completed"
        );
        Ok(pages)
    }

    /// Pages beneath `root_path` whose template is `template_path`
    pub fn find_pages_by_template(
        &self,
        root_path: &str,
        template_path: &str,
    ) -> Result<Vec<Page<'_>>> {
        let predicate = predicates::template_is(template_path)?;
        self.find_pages(root_path, predicate)
    }

    /// Build a link for a raw path
    ///
    /// If the raw path (minus selectors, extension, suffix and query string)
    /// names an existing node, the result is that node's link carrying the
    /// decomposed parts. Otherwise the raw string is used literally and,
    /// when `strict` is set, classified as external unless it falls under
    /// one of the store's internal root prefixes.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` for an empty path or an internal path that
    /// cannot be decomposed.
    pub fn link_for_path(&self, raw: &str, strict: bool, mapped: bool) -> Result<Link> {
        Ok(self.link_builder_for_path(raw, strict, mapped)?.build())
    }

    /// `link_for_path` without building, so callers can add title, target, etc.
    pub fn link_builder_for_path(
        &self,
        raw: &str,
        strict: bool,
        mapped: bool,
    ) -> Result<LinkBuilder> {
        if raw.trim().is_empty() {
            return Err(TreeError::malformed_path(raw, "path is empty"));
        }

        if !path::is_url(raw) {
            let parts = path::decompose_resolving(raw, &self.config, |candidate| {
                self.store.exists(candidate)
            })?;

            if let Some(node) = self.node(&parts.path) {
                // without an explicit extension only strict links fall back to the default
                let builder = if strict || !parts.extension.is_empty() {
                    LinkBuilder::for_node_checked(&node, strict, mapped)
                } else {
                    LinkBuilder::for_node_path(&node, mapped)
                };
                let builder = builder
                    .selectors(parts.selectors)
                    .suffix(parts.suffix)
                    .query_string(parts.query_string);

                let builder = if parts.extension.is_empty() {
                    builder
                } else {
                    builder.extension(parts.extension)
                };

                tracing::debug!(raw, path = %node.path(), "link resolved to internal node");
                return Ok(builder);
            }
        }

        let literal = if mapped {
            self.store.map_path(raw)
        } else {
            raw.to_string()
        };

        let external = strict && !self.is_internal(&literal);
        tracing::debug!(raw, mapped = %literal, external, "link not resolved to a node");

        Ok(LinkBuilder::for_path(literal).external(external))
    }

    /// Adapt the node at `path` through the registry
    pub fn adapt(&self, kind: AdapterKind, path: &str) -> Option<Adapted<'_>> {
        let constructor = self.adapters.get(kind)?;
        constructor(self, path)
    }

    /// Whether a stored record is a page
    pub fn is_page_record(&self, record: &NodeRecord) -> bool {
        record.node_type == self.config.page_node_type
    }

    /// Path of a page's content root
    pub fn content_root_path(&self, page_path: &str) -> String {
        path::join(page_path, &self.config.content_root_name)
    }

    /// Whether `path` falls under one of the store's internal root prefixes
    pub fn is_internal(&self, path: &str) -> bool {
        self.store
            .internal_root_prefixes()
            .iter()
            .any(|prefix| path::relative_to(prefix.trim_end_matches('/'), path).is_some())
    }
}

impl fmt::Debug for ContentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentTree")
            .field("config", &self.config)
            .field("adapters", &self.adapters)
            .finish_non_exhaustive()
    }
}
