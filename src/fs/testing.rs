//! Test backend that refuses to list or read chosen paths, standing in for
//! host directories the current user may not open.

use async_trait::async_trait;

use super::path::normalize;
use super::records::VfsRecord;
use super::types::*;
use super::InMemoryFs;

pub struct LockedFs {
    inner: InMemoryFs,
    locked: Vec<String>,
}

impl LockedFs {
    pub fn new(records: Vec<VfsRecord>, locked: &[&str]) -> Self {
        Self {
            inner: InMemoryFs::from_records(records).unwrap(),
            locked: locked.iter().map(|p| normalize(p)).collect(),
        }
    }

    fn check(&self, path: &str, operation: &str) -> Result<(), FsError> {
        if self.locked.contains(&normalize(path)) {
            Err(FsError::PermissionDenied {
                path: path.to_string(),
                operation: operation.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FileSystem for LockedFs {
    fn home(&self) -> &str {
        self.inner.home()
    }

    fn resolve_path(&self, cwd: &str, path: &str) -> String {
        self.inner.resolve_path(cwd, path)
    }

    async fn is_directory(&self, path: &str) -> bool {
        self.inner.is_directory(path).await
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<String>, FsError> {
        self.check(path, "scandir")?;
        self.inner.list_directory(path).await
    }

    async fn list_directory_with_kinds(&self, path: &str) -> Result<Vec<DirentEntry>, FsError> {
        self.check(path, "scandir")?;
        self.inner.list_directory_with_kinds(path).await
    }

    async fn stat(&self, path: &str) -> Result<FsStat, FsError> {
        self.inner.stat(path).await
    }

    async fn exists(&self, path: &str) -> bool {
        self.inner.exists(path).await
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        self.check(path, "open")?;
        self.inner.read_file(path).await
    }
}
