// src/commands/cd/mod.rs
//! cd - change the working directory
//!
//! `cd` alone and `cd ~` go home. The new directory is only reported back
//! once it is known to exist and be a directory.

use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::interpreter::{SessionUpdate, ShellError};

pub struct CdCommand;

#[async_trait]
impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.len() > 1 {
            return CommandResult::error(format!("cd: {}\n", ShellError::TooManyArguments));
        }
        let target = ctx.args.first().map(String::as_str).unwrap_or("~");
        let path = ctx.fs.resolve_path(&ctx.cwd, target);

        match ctx.fs.stat(&path).await {
            Ok(stat) if stat.is_directory => {
                CommandResult::success(String::new()).with_update(SessionUpdate::ChangeDirectory(path))
            }
            Ok(_) => {
                let err = ShellError::NotADirectory { path: target.to_string() };
                CommandResult::error(format!("cd: {}\n", err))
            }
            Err(e) => CommandResult::error(format!("cd: {}\n", ShellError::from_fs(target, e))),
        }
    }
}
