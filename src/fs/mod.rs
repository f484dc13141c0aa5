//! File System Module
//!
//! The in-memory virtual file system behind every session:
//! - types: entry kinds, ids and errors
//! - tree: the arena-backed entry tree
//! - resolver: path walking and link dereferencing
//! - mode: permission bits, octal and symbolic changes, rendering
//! - usage: deduplicating disk usage
//! - snapshot: whole-tree persistence

pub mod types;
pub mod tree;
pub mod resolver;
pub mod mode;
pub mod usage;
pub mod snapshot;

pub use types::*;
pub use tree::Tree;
pub use resolver::{lookup_path, parent_and_name, resolve, resolve_path, Resolved};
pub use mode::ModeError;
pub use usage::{subtree_size, UsageReport};
pub use snapshot::PersistError;
