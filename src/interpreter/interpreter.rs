//! Interpreter - Line Dispatch
//!
//! Turns one input line into output lines and an optional session update:
//! tokenize, look the first word up in the command registry, run it against a
//! snapshot of the session's working directory.

use crate::commands::{create_default_registry, CommandContext, CommandRegistry, ConfirmFn};
use crate::interpreter::session::{Session, SessionUpdate};
use crate::interpreter::tokenizer::tokenize;

/// Exit status reported for an unknown command.
pub const COMMAND_NOT_FOUND: i32 = 127;

/// Result of processing one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub output: Vec<String>,
    pub update: Option<SessionUpdate>,
    pub exit_code: i32,
}

impl ProcessOutcome {
    pub fn exit_requested(&self) -> bool {
        matches!(self.update, Some(SessionUpdate::Exit))
    }
}

pub struct Interpreter {
    registry: CommandRegistry,
    confirm_fn: Option<ConfirmFn>,
}

impl Interpreter {
    /// Interpreter over the built-in commands, with no exit confirmation.
    pub fn new() -> Self {
        Self {
            registry: create_default_registry(),
            confirm_fn: None,
        }
    }

    pub fn with_confirm(mut self, confirm_fn: ConfirmFn) -> Self {
        self.confirm_fn = Some(confirm_fn);
        self
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Process one line. The session is only read; apply `update` afterwards.
    pub async fn process(&self, line: &str, session: &Session) -> ProcessOutcome {
        let mut words = match tokenize(line) {
            Ok(words) => words,
            Err(e) => {
                return ProcessOutcome {
                    output: vec![e.to_string()],
                    update: None,
                    exit_code: 2,
                }
            }
        };
        if words.is_empty() {
            return ProcessOutcome::default();
        }

        let name = words.remove(0);
        let Some(command) = self.registry.get(&name) else {
            log::debug!("unknown command {:?}", name);
            return ProcessOutcome {
                output: vec![format!("{}: command not found", name)],
                update: None,
                exit_code: COMMAND_NOT_FOUND,
            };
        };

        log::debug!("dispatch {} {:?} in {}", name, words, session.cwd());
        let ctx = CommandContext {
            args: words,
            cwd: session.cwd().to_string(),
            fs: session.fs().clone(),
            confirm_fn: self.confirm_fn.clone(),
        };
        let result = command.execute(ctx).await;

        ProcessOutcome {
            output: result.lines(),
            update: result.update,
            exit_code: result.exit_code,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
