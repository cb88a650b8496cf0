//! Shared test tree
//!
//! The same document backs the integration tests under `tests/`.

use crate::db::MemoryStore;
use crate::tree::ContentTree;
use std::sync::Arc;

pub(crate) const SITE_JSON: &str = include_str!("../tests/fixtures/site.json");

/// Site fixture: `/content/site` with `products` (`widgets`, `gadgets`),
/// `about`, `drafts` and `archive.2024` child pages
pub(crate) fn site_tree() -> ContentTree {
    let store = MemoryStore::from_json_str(SITE_JSON).expect("site fixture should load");
    ContentTree::new(Arc::new(store))
}
