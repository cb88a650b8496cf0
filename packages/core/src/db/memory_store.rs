//! In-memory `ContentStore`
//!
//! Holds a complete tree in memory. Used by tests, benchmarks and
//! applications that assemble a tree up front (for example from a JSON
//! export). The store is populated through `&mut self` builders and is
//! read-only once shared behind an `Arc<dyn ContentStore>`.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "_internalRoots": ["/content"],
//!   "_mappings": { "/content/site": "" },
//!   "content": {
//!     "_type": "sling:Folder",
//!     "site": {
//!       "_type": "cq:Page",
//!       "jcr:content": { "_type": "site/components/page", "jcr:title": "Site" }
//!     }
//!   }
//! }
//! ```
//!
//! Keys starting with `_` are reserved. Nested objects are child nodes,
//! except `{"$date": "..."}`, which is a date property. Child order follows
//! document order.

use crate::db::ContentStore;
use crate::models::{NodeRecord, PropertyMap, PropertyValue, ValidationError};
use crate::path;
use anyhow::{bail, Context};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Node type given to the root and to nodes loaded without `_type`
pub const DEFAULT_NODE_TYPE: &str = "nt:unstructured";

const ROOT_NODE_TYPE: &str = "rep:root";

/// In-memory content tree
#[derive(Debug, Clone)]
pub struct MemoryStore {
    nodes: HashMap<String, NodeRecord>,
    children: HashMap<String, Vec<String>>,
    internal_roots: Vec<String>,
    /// (from prefix, to prefix), longest prefix wins
    path_mappings: Vec<(String, String)>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        let root = NodeRecord {
            path: "/".to_string(),
            node_type: ROOT_NODE_TYPE.to_string(),
            properties: PropertyMap::new(),
        };

        Self {
            nodes: HashMap::from([("/".to_string(), root)]),
            children: HashMap::new(),
            internal_roots: Vec::new(),
            path_mappings: Vec::new(),
        }
    }
}

impl MemoryStore {
    /// Create a store containing only the root node
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under an existing parent
    ///
    /// # Errors
    ///
    /// - `InvalidPath` if `path` is not a normalized absolute path or is `/`
    /// - `MissingParent` if the parent has not been inserted
    /// - `DuplicatePath` if a node already exists at `path`
    pub fn insert(
        &mut self,
        path: &str,
        node_type: &str,
        properties: PropertyMap,
    ) -> Result<(), ValidationError> {
        let record = NodeRecord::new(path, node_type, properties)?;

        let parent = record
            .parent_path()
            .ok_or_else(|| ValidationError::InvalidPath(path.to_string()))?
            .to_string();

        if !self.nodes.contains_key(&parent) {
            return Err(ValidationError::MissingParent(parent));
        }
        if self.nodes.contains_key(path) {
            return Err(ValidationError::DuplicatePath(path.to_string()));
        }

        self.children
            .entry(parent)
            .or_default()
            .push(path.to_string());
        self.nodes.insert(path.to_string(), record);
        Ok(())
    }

    /// Builder-style `insert`
    pub fn with_node(
        mut self,
        path: &str,
        node_type: &str,
        properties: PropertyMap,
    ) -> Result<Self, ValidationError> {
        self.insert(path, node_type, properties)?;
        Ok(self)
    }

    /// Declare a path prefix as internal for link classification
    pub fn with_internal_root(mut self, prefix: impl Into<String>) -> Self {
        self.internal_roots.push(prefix.into());
        self
    }

    /// Rewrite paths under `from` to live under `to` when links are mapped
    pub fn with_path_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.path_mappings.push((from.into(), to.into()));
        self.path_mappings
            .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Load a store from a JSON document (see module docs for the format)
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let document: Value = serde_json::from_str(json).context("content tree is not valid JSON")?;
        let Value::Object(root) = document else {
            bail!("content tree document must be a JSON object");
        };

        let mut store = MemoryStore::new();

        if let Some(roots) = root.get("_internalRoots") {
            let roots = roots
                .as_array()
                .context("_internalRoots must be an array of strings")?;
            for prefix in roots {
                let prefix = prefix
                    .as_str()
                    .context("_internalRoots must be an array of strings")?;
                store = store.with_internal_root(prefix);
            }
        }

        if let Some(mappings) = root.get("_mappings") {
            let mappings = mappings
                .as_object()
                .context("_mappings must be an object of path prefixes")?;
            for (from, to) in mappings {
                let to = to
                    .as_str()
                    .with_context(|| format!("mapping for '{}' must be a string", from))?;
                store = store.with_path_mapping(from.as_str(), to);
            }
        }

        store.load_children("/", &root)?;
        Ok(store)
    }

    /// Load a store from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read content tree {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("failed to load content tree {}", path.display()))
    }

    fn load_children(&mut self, parent: &str, object: &Map<String, Value>) -> anyhow::Result<()> {
        for (name, value) in object {
            if name.starts_with('_') || is_date_literal(value) {
                continue;
            }
            let Value::Object(child) = value else {
                continue;
            };

            let child_path = path::join(parent, name);
            let node_type = child
                .get("_type")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_NODE_TYPE);

            let mut properties = PropertyMap::new();
            for (key, value) in child {
                if key.starts_with('_') || (value.is_object() && !is_date_literal(value)) {
                    continue;
                }
                let value = PropertyValue::from_json(value)
                    .with_context(|| format!("invalid property '{}' on {}", key, child_path))?;
                properties.insert(key.as_str(), value);
            }

            self.insert(&child_path, node_type, properties)
                .with_context(|| format!("failed to insert {}", child_path))?;
            self.load_children(&child_path, child)?;
        }
        Ok(())
    }
}

fn is_date_literal(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.len() == 1 && object.contains_key("$date"))
}

impl ContentStore for MemoryStore {
    fn node_at(&self, path: &str) -> Option<NodeRecord> {
        self.nodes.get(path).cloned()
    }

    fn children_of(&self, path: &str) -> Vec<NodeRecord> {
        self.children
            .get(path)
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(|child| self.nodes.get(child).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    fn map_path(&self, path: &str) -> String {
        for (from, to) in &self.path_mappings {
            if let Some(rest) = path::relative_to(from, path) {
                let mapped = path::join(if to.is_empty() { "/" } else { to }, rest);
                return mapped;
            }
        }
        path.to_string()
    }

    fn internal_root_prefixes(&self) -> Vec<String> {
        self.internal_roots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_node("/content", "sling:Folder", PropertyMap::new())
            .unwrap()
            .with_node("/content/b", "cq:Page", PropertyMap::new())
            .unwrap()
            .with_node("/content/a", "cq:Page", PropertyMap::new().with("k", "v"))
            .unwrap()
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let store = sample_store();
        let names: Vec<String> = store
            .children_of("/content")
            .iter()
            .map(|record| record.name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_missing_paths_are_absent() {
        let store = sample_store();
        assert!(store.node_at("/nope").is_none());
        assert!(store.children_of("/nope").is_empty());
        assert!(store.properties_of("/nope").is_empty());
        assert_eq!(store.properties_of("/content/a").len(), 1);
    }

    #[test]
    fn test_insert_validation() {
        let mut store = sample_store();
        assert_eq!(
            store.insert("/missing/child", "x", PropertyMap::new()),
            Err(ValidationError::MissingParent("/missing".to_string()))
        );
        assert_eq!(
            store.insert("/content/a", "x", PropertyMap::new()),
            Err(ValidationError::DuplicatePath("/content/a".to_string()))
        );
        assert!(store.insert("/", "x", PropertyMap::new()).is_err());
    }

    #[test]
    fn test_path_mapping_longest_prefix_wins() {
        let store = MemoryStore::new()
            .with_path_mapping("/content", "/c")
            .with_path_mapping("/content/site", "");

        assert_eq!(store.map_path("/content/site/en"), "/en");
        assert_eq!(store.map_path("/content/site"), "/");
        assert_eq!(store.map_path("/content/other"), "/c/other");
        assert_eq!(store.map_path("/var/x"), "/var/x");
    }

    #[test]
    fn test_from_json() {
        let store = MemoryStore::from_json_str(
            r#"{
                "_internalRoots": ["/content"],
                "content": {
                    "_type": "sling:Folder",
                    "site": {
                        "_type": "cq:Page",
                        "jcr:content": {
                            "_type": "site/components/page",
                            "jcr:title": "Site",
                            "onTime": { "$date": "2024-01-01T00:00:00Z" },
                            "tags": ["a", "b"]
                        },
                        "zeta": { "_type": "cq:Page" },
                        "alpha": { "_type": "cq:Page" }
                    }
                }
            }"#,
        )
        .unwrap();

        let content = store.node_at("/content/site/jcr:content").unwrap();
        assert_eq!(content.node_type, "site/components/page");
        assert!(matches!(
            content.properties.get("onTime"),
            Some(PropertyValue::Date(_))
        ));
        assert!(store.node_at("/content/site/jcr:content/onTime").is_none());

        let names: Vec<String> = store
            .children_of("/content/site")
            .iter()
            .map(|record| record.name().to_string())
            .collect();
        assert_eq!(names, vec!["jcr:content", "zeta", "alpha"]);
        assert_eq!(store.internal_root_prefixes(), vec!["/content".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_bad_documents() {
        assert!(MemoryStore::from_json_str("[]").is_err());
        assert!(MemoryStore::from_json_str(r#"{"a": {"p": null}}"#).is_err());
        assert!(MemoryStore::from_json_str(r#"{"_internalRoots": "x"}"#).is_err());
    }
}
