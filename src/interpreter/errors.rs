//! Shell Errors
//!
//! Every failure a command can report. Each one renders as a single
//! human-readable line; none of them ends the session.

use thiserror::Error;

use crate::fs::FsError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Malformed quoting; the whole line is rejected before dispatch.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{path}: No such file or directory")]
    NotFound { path: String },

    #[error("{path}: Not a directory")]
    NotADirectory { path: String },

    #[error("{path}: Is a directory")]
    IsADirectory { path: String },

    /// Only the host backend produces this.
    #[error("{path}: Permission denied")]
    PermissionDenied { path: String },

    #[error("too many arguments")]
    TooManyArguments,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl ShellError {
    /// Describe a backend failure in terms of the operand the user typed.
    pub fn from_fs(operand: &str, err: FsError) -> Self {
        let path = operand.to_string();
        match err {
            FsError::NotFound { .. } => ShellError::NotFound { path },
            FsError::IsDirectory { .. } => ShellError::IsADirectory { path },
            FsError::PermissionDenied { .. } => ShellError::PermissionDenied { path },
            FsError::Other { message, .. } => ShellError::Io { path, message },
        }
    }
}
