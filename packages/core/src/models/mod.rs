//! Data Models
//!
//! This module contains the stored data structures:
//!
//! - `NodeRecord` - Stored form of one content node (path, type, properties)
//! - `PropertyValue` / `PropertyMap` - Typed, insertion-ordered properties
//! - `FromProperty` - Conversions used by every typed accessor
//! - `names` - Well-known property names

pub mod names;
mod node;
mod value;

pub use node::{NodeRecord, ValidationError};
pub use value::{FromProperty, PropertyMap, PropertyValue};
