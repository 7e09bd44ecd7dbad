//! Subtree Walk
//!
//! Pull-based pre-order traversal over any [`FileSystem`]. Each step yields a
//! directory together with its child directories and child files, both in
//! name order; subdirectories are then walked depth-first in name order.
//! A directory that cannot be listed is reported once and not descended.

use thiserror::Error;

use super::path::join;
use super::types::{FileSystem, FsError};

/// One directory visited by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: String,
    /// Components between this directory and the walk's start (0 at the start).
    pub depth: usize,
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

/// A directory the walk reached but could not list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path}: {source}")]
pub struct WalkError {
    pub path: String,
    pub depth: usize,
    pub source: FsError,
}

/// Lazy pre-order walk; call [`SubtreeWalk::next`] until it returns `None`.
pub struct SubtreeWalk<'a> {
    fs: &'a dyn FileSystem,
    stack: Vec<(String, usize)>,
    max_depth: Option<usize>,
    started: bool,
}

/// Start a walk at `start`. Yields nothing unless `start` is a directory.
pub fn walk_subtree<'a>(fs: &'a dyn FileSystem, start: &str) -> SubtreeWalk<'a> {
    SubtreeWalk {
        fs,
        stack: vec![(start.to_string(), 0)],
        max_depth: None,
        started: false,
    }
}

impl<'a> SubtreeWalk<'a> {
    /// Do not read directories deeper than `depth` below the start.
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub async fn next(&mut self) -> Option<Result<WalkEntry, WalkError>> {
        if !self.started {
            self.started = true;
            let start = self.stack.first().map(|(p, _)| p.clone())?;
            if !self.fs.is_directory(&start).await {
                self.stack.clear();
                return None;
            }
        }

        while let Some((path, depth)) = self.stack.pop() {
            if self.max_depth.map_or(false, |max| depth > max) {
                continue;
            }
            let entries = match self.fs.list_directory_with_kinds(&path).await {
                Ok(entries) => entries,
                Err(source) => {
                    log::debug!("walk cannot list {}: {}", path, source);
                    return Some(Err(WalkError { path, depth, source }));
                }
            };

            let (dirs, files): (Vec<_>, Vec<_>) = entries.into_iter().partition(|e| e.is_directory);
            let dirs: Vec<String> = dirs.into_iter().map(|e| e.name).collect();
            let files: Vec<String> = files.into_iter().map(|e| e.name).collect();

            for name in dirs.iter().rev() {
                self.stack.push((join(&path, name), depth + 1));
            }
            return Some(Ok(WalkEntry { path, depth, dirs, files }));
        }
        None
    }

    /// Drain the walk, stopping at the first unreadable directory.
    pub async fn collect(mut self) -> Result<Vec<WalkEntry>, WalkError> {
        let mut out = Vec::new();
        while let Some(entry) = self.next().await {
            out.push(entry?);
        }
        Ok(out)
    }
}
