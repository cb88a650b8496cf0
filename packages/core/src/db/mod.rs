//! Store Layer
//!
//! The accessor layer reads content through the `ContentStore` trait and
//! never writes back. Persistence, search, tags and assets live behind that
//! seam:
//!
//! - `ContentStore` - Read contract (nodes by path, ordered children, path
//!   mapping, internal root prefixes)
//! - `MemoryStore` - In-memory implementation, loadable from JSON
//!
//! Any store can be plugged into a `ContentTree` as `Arc<dyn ContentStore>`.

mod content_store;
mod memory_store;

pub use content_store::ContentStore;
pub use memory_store::{MemoryStore, DEFAULT_NODE_TYPE};
