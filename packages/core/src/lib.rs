//! Sitetree Core
//!
//! Read-only accessors over a hierarchical content tree: pages that own a
//! content subtree of component nodes, property inheritance along the page
//! hierarchy, and structured links built from node paths or raw path
//! strings.
//!
//! # Architecture
//!
//! - **Store seam**: content is read through the `ContentStore` trait; the
//!   core never writes
//! - **Explicit handle**: a `ContentTree` bundles the store, `TreeConfig`
//!   and the adapter registry and is passed by reference
//! - **Absence, not errors**: missing nodes, properties and references read
//!   as `None`, empty lists or defaults
//!
//! # Modules
//!
//! - [`path`] - Path helpers and raw path decomposition
//! - [`node`] - `ContentNode` read facade
//! - [`inheritance`] - Page-hierarchy inheritance
//! - [`search`] - Ancestor/descendant search and predicates
//! - [`link`] - `Link` values and `LinkBuilder`
//! - [`page`] - `Page` facade and navigation trees
//! - [`db`] - `ContentStore` trait and `MemoryStore`
//! - [`models`] - Property values and node records

pub mod config;
pub mod db;
pub mod error;
pub mod inheritance;
pub mod link;
pub mod models;
pub mod node;
pub mod page;
pub mod path;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use config::TreeConfig;
pub use db::{ContentStore, MemoryStore};
pub use error::{ConfigError, Result, TreeError};
pub use link::{Link, LinkBuilder};
pub use models::{FromProperty, NodeRecord, PropertyMap, PropertyValue, ValidationError};
pub use node::ContentNode;
pub use page::{ChildFilter, NavigationOptions, Page, TitleType};
pub use path::PathParts;
pub use tree::{Adapted, AdapterKind, AdapterRegistry, ContentTree};
