//! File System Types
//!
//! Core types and the capability trait every backend implements.

use std::io;
use std::time::SystemTime;

use async_trait::async_trait;
use thiserror::Error;

/// File system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("ENOENT: no such file or directory, {operation} '{path}'")]
    NotFound { path: String, operation: String },

    #[error("EISDIR: illegal operation on a directory, {operation} '{path}'")]
    IsDirectory { path: String, operation: String },

    #[error("EACCES: permission denied, {operation} '{path}'")]
    PermissionDenied { path: String, operation: String },

    #[error("{operation} '{path}': {message}")]
    Other { path: String, operation: String, message: String },
}

impl FsError {
    pub fn not_found(path: &str, operation: &str) -> Self {
        FsError::NotFound { path: path.to_string(), operation: operation.to_string() }
    }

    pub fn is_directory(path: &str, operation: &str) -> Self {
        FsError::IsDirectory { path: path.to_string(), operation: operation.to_string() }
    }

    /// Translate a host I/O error into the backend-neutral taxonomy.
    pub fn from_io(err: &io::Error, path: &str, operation: &str) -> Self {
        let path = path.to_string();
        let operation = operation.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path, operation },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path, operation },
            _ => FsError::Other { path, operation, message: err.to_string() },
        }
    }
}

/// File status information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStat {
    pub is_directory: bool,
    /// Permission bits; `None` means the backend default applies.
    pub mode: Option<u32>,
    pub size: u64,
    pub mtime: SystemTime,
    pub base_name: String,
}

impl FsStat {
    pub fn is_file(&self) -> bool {
        !self.is_directory
    }
}

/// Directory entry with type information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirentEntry {
    pub name: String,
    pub is_directory: bool,
}

/// Read-only filesystem capabilities shared by the host and in-memory backends.
///
/// Paths handed to these methods are expected to come out of
/// [`FileSystem::resolve_path`]; implementations normalize them again anyway.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Directory that `~` and an empty path resolve to.
    fn home(&self) -> &str;

    /// Resolve a user-typed path against the working directory.
    fn resolve_path(&self, cwd: &str, path: &str) -> String;

    /// Whether `path` names a directory (false when absent)
    async fn is_directory(&self, path: &str) -> bool;

    /// Child names, sorted. Fails with `NotFound` unless `path` is a directory.
    async fn list_directory(&self, path: &str) -> Result<Vec<String>, FsError>;

    /// Like `list_directory`, with the kind of each child.
    async fn list_directory_with_kinds(&self, path: &str) -> Result<Vec<DirentEntry>, FsError>;

    async fn stat(&self, path: &str) -> Result<FsStat, FsError>;

    async fn exists(&self, path: &str) -> bool;

    /// File bytes. Fails with `IsDirectory` for directories.
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError>;
}
