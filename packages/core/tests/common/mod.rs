//! Shared helpers for integration tests

#![allow(dead_code)]

use anyhow::Result;
use sitetree_core::{ContentTree, MemoryStore, TreeConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Install a test subscriber once; `RUST_LOG` overrides the default filter
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sitetree_core=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Tree over `tests/fixtures/site.json` with the default configuration
pub fn site_tree() -> Result<ContentTree> {
    init_test_logging();
    let store = MemoryStore::from_json_file(fixture_path("site.json"))?;
    Ok(ContentTree::new(Arc::new(store)))
}

/// Tree over `tests/fixtures/site.json` with a custom configuration
pub fn site_tree_with_config(config: TreeConfig) -> Result<ContentTree> {
    init_test_logging();
    let store = MemoryStore::from_json_file(fixture_path("site.json"))?;
    Ok(ContentTree::with_config(Arc::new(store), config)?)
}
