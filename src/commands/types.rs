// src/commands/types.rs
use async_trait::async_trait;
use std::sync::Arc;
use crate::fs::FileSystem;
use crate::interpreter::SessionUpdate;

/// Callback asking the user a yes/no question (used by exit)
pub type ConfirmFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Command result. Normal output and error lines share one stream so their
/// relative order survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub output: String,
    pub exit_code: i32,
    pub update: Option<SessionUpdate>,
}

impl CommandResult {
    pub fn success(output: String) -> Self {
        Self { output, exit_code: 0, update: None }
    }

    pub fn error(output: String) -> Self {
        Self { output, exit_code: 1, update: None }
    }

    pub fn with_exit_code(output: String, exit_code: i32) -> Self {
        Self { output, exit_code, update: None }
    }

    pub fn with_update(mut self, update: SessionUpdate) -> Self {
        self.update = Some(update);
        self
    }

    /// Output split on `\n` only, so a `\r` before it stays in the line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.output.split('\n').map(String::from).collect();
        if lines.last().map_or(false, |l| l.is_empty()) {
            lines.pop();
        }
        lines
    }
}

/// Command context
pub struct CommandContext {
    pub args: Vec<String>,
    /// Working directory as of the start of this command.
    pub cwd: String,
    pub fs: Arc<dyn FileSystem>,
    pub confirm_fn: Option<ConfirmFn>,
}

/// Command trait
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, ctx: CommandContext) -> CommandResult;
}
