//! Session State
//!
//! The working directory and the one backend a session talks to. The
//! interpreter only reads a session; changes come back as [`SessionUpdate`]s
//! that the caller applies.

use std::sync::Arc;

use crate::fs::FileSystem;

/// A state change requested by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Successful `cd`; carries the resolved absolute path.
    ChangeDirectory(String),
    /// Confirmed `exit`.
    Exit,
}

#[derive(Clone)]
pub struct Session {
    cwd: String,
    fs: Arc<dyn FileSystem>,
}

impl Session {
    /// Start in the backend's home directory.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        let cwd = fs.home().to_string();
        Self { cwd, fs }
    }

    /// Start in `cwd`, which the caller has already resolved and checked.
    pub fn with_cwd(fs: Arc<dyn FileSystem>, cwd: &str) -> Self {
        Self { cwd: cwd.to_string(), fs }
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Apply an update. Returns true when the session should end.
    pub fn apply(&mut self, update: &SessionUpdate) -> bool {
        match update {
            SessionUpdate::ChangeDirectory(path) => {
                self.cwd = path.clone();
                false
            }
            SessionUpdate::Exit => true,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cwd", &self.cwd)
            .field("home", &self.fs.home())
            .finish()
    }
}
