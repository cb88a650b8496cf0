//! Node Records
//!
//! `NodeRecord` is the stored form of one content node as handed out by a
//! `ContentStore`: its absolute path, its node type and its ordered
//! properties. Parent and children are not stored on the record; they are
//! derived from paths through the store, which keeps the tree acyclic by
//! construction (a node's path is always `parent.path + "/" + name`).
//!
//! # Examples
//!
//! ```rust
//! use sitetree_core::models::{NodeRecord, PropertyMap};
//!
//! let record = NodeRecord::new(
//!     "/content/site/jcr:content",
//!     "site/components/page",
//!     PropertyMap::new().with("jcr:title", "Site"),
//! )
//! .unwrap();
//!
//! assert_eq!(record.name(), "jcr:content");
//! assert_eq!(record.parent_path(), Some("/content/site"));
//! ```

use crate::models::PropertyMap;
use crate::path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for node records and property values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid node path: {0}")]
    InvalidPath(String),

    #[error("Invalid property value: {0}")]
    InvalidValue(String),

    #[error("Parent node does not exist: {0}")]
    MissingParent(String),

    #[error("Node already exists: {0}")]
    DuplicatePath(String),
}

/// Stored form of a single content node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Absolute path, `/`-separated, no trailing slash (`/` for the root)
    pub path: String,

    /// Node type (page type, component resource type, folder, ...)
    pub node_type: String,

    /// Ordered properties
    pub properties: PropertyMap,
}

impl NodeRecord {
    /// Create a validated record
    pub fn new(
        path: impl Into<String>,
        node_type: impl Into<String>,
        properties: PropertyMap,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            path: path.into(),
            node_type: node_type.into(),
            properties,
        };
        record.validate()?;
        Ok(record)
    }

    /// Validate path shape
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPath` if the path is not absolute,
    /// ends with `/` (other than the root), or contains empty segments.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !path::is_normalized_absolute(&self.path) {
            return Err(ValidationError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }

    /// Local name (last path segment, empty for the root)
    pub fn name(&self) -> &str {
        path::name_of(&self.path)
    }

    /// Path of the parent, absent for the root
    pub fn parent_path(&self) -> Option<&str> {
        path::parent_of(&self.path)
    }

    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}
