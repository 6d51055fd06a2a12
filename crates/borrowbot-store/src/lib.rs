//! Borrowbot Store - read-only SQLite access for record construction
//!
//! Provides:
//! - Store descriptor (path, busy timeout, read-only flag) and layered config
//! - Single-key lookup implementing the core `KeyLookup` seam
//! - Batched comment hydration across many submissions
//! - Embedded schema migrations for local replicas and test databases

pub mod config;
pub mod db;
pub mod descriptor;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use crate::config::StoreConfig;
pub use descriptor::StoreDescriptor;
pub use errors::Result;
pub use repo::{fetch_children, hydrate_children, lookup};
