//! Host File System
//!
//! Delegates every call to the operating system through `tokio::fs`. Nothing
//! is cached, so each call observes the disk as it is at that moment.

use std::fs::Metadata;
use std::path::Path;

use async_trait::async_trait;

use super::path::{base_name, normalize, PathResolver};
use super::types::*;

/// Read-only view of the real filesystem.
#[derive(Debug, Clone)]
pub struct OsFs {
    resolver: PathResolver,
}

impl OsFs {
    /// Use `$HOME` (or `%USERPROFILE%`) as the home directory, falling back to `/`.
    pub fn new() -> Self {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| "/".to_string());
        Self::with_home(&home)
    }

    pub fn with_home(home: &str) -> Self {
        Self { resolver: PathResolver::new(home) }
    }
}

impl Default for OsFs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(meta.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn permission_bits(_meta: &Metadata) -> Option<u32> {
    None
}

async fn metadata(path: &str, operation: &str) -> Result<Metadata, FsError> {
    tokio::fs::metadata(Path::new(path))
        .await
        .map_err(|e| FsError::from_io(&e, path, operation))
}

#[async_trait]
impl FileSystem for OsFs {
    fn home(&self) -> &str {
        self.resolver.home()
    }

    fn resolve_path(&self, cwd: &str, path: &str) -> String {
        self.resolver.resolve(cwd, path)
    }

    async fn is_directory(&self, path: &str) -> bool {
        metadata(path, "stat").await.map_or(false, |m| m.is_dir())
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<String>, FsError> {
        let entries = self.list_directory_with_kinds(path).await?;
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    async fn list_directory_with_kinds(&self, path: &str) -> Result<Vec<DirentEntry>, FsError> {
        if !metadata(path, "scandir").await?.is_dir() {
            return Err(FsError::not_found(path, "scandir"));
        }
        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|e| FsError::from_io(&e, path, "scandir"))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| FsError::from_io(&e, path, "scandir"))?
        {
            // Follow symlinks; entries that cannot be resolved count as files.
            let is_directory = tokio::fs::metadata(entry.path())
                .await
                .map_or(false, |m| m.is_dir());
            entries.push(DirentEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn stat(&self, path: &str) -> Result<FsStat, FsError> {
        let meta = metadata(path, "stat").await?;
        let normalized = normalize(path);
        Ok(FsStat {
            is_directory: meta.is_dir(),
            mode: permission_bits(&meta),
            size: meta.len(),
            mtime: meta.modified().unwrap_or(std::time::UNIX_EPOCH),
            base_name: base_name(&normalized).to_string(),
        })
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        if metadata(path, "open").await?.is_dir() {
            return Err(FsError::is_directory(path, "read"));
        }
        tokio::fs::read(path)
            .await
            .map_err(|e| FsError::from_io(&e, path, "open"))
    }
}
