//! File System Module
//!
//! Filesystem abstractions the commands run against:
//! - InMemoryFs: read-only tree built from a record source
//! - OsFs: read-only view of the host filesystem

pub mod types;
pub mod path;
pub mod records;
pub mod in_memory_fs;
pub mod os_fs;
pub mod walk;

#[cfg(test)]
pub(crate) mod testing;

pub use types::*;
pub use path::PathResolver;
pub use records::{LoadError, VfsRecord};
pub use in_memory_fs::{InMemoryFs, NodeKind, VfsNode};
pub use os_fs::OsFs;
pub use walk::{walk_subtree, SubtreeWalk, WalkEntry, WalkError};
