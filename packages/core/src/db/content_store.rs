//! ContentStore Trait - Read Abstraction over the Node Store
//!
//! This module defines the `ContentStore` trait the accessor layer reads
//! from. The store owns persistence, search, tags and assets; the core only
//! asks it for nodes by path, children in order, and the two pieces of link
//! configuration the store knows about (path mapping and internal roots).
//!
//! # Design Decisions
//!
//! 1. **Total reads**: no method fails for a missing path; absence is `None`
//!    or an empty collection.
//! 2. **Owned records**: records are returned by value so accessors never
//!    hold a borrow into store internals.
//! 3. **Synchronous**: every accessor operation runs to completion on the
//!    calling thread; `Send + Sync` lets independent requests share a store.

use crate::models::{NodeRecord, PropertyMap};

/// Read-only access to the content tree
pub trait ContentStore: Send + Sync {
    /// Node at an absolute path
    ///
    /// Returns `None` if no node exists at `path` (not an error).
    fn node_at(&self, path: &str) -> Option<NodeRecord>;

    /// Children of the node at `path`, in insertion order
    ///
    /// Returns an empty vector if the node does not exist.
    fn children_of(&self, path: &str) -> Vec<NodeRecord>;

    /// Properties of the node at `path`, empty if the node does not exist
    fn properties_of(&self, path: &str) -> PropertyMap {
        self.node_at(path)
            .map(|record| record.properties)
            .unwrap_or_default()
    }

    /// Whether a node exists at `path`
    fn exists(&self, path: &str) -> bool {
        self.node_at(path).is_some()
    }

    /// External path remapping (identity if unconfigured)
    fn map_path(&self, path: &str) -> String {
        path.to_string()
    }

    /// Path prefixes considered internal when classifying unresolved links
    fn internal_root_prefixes(&self) -> Vec<String> {
        Vec::new()
    }
}
