// src/commands/pwd/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::interpreter::ShellError;

pub struct PwdCommand;

#[async_trait]
impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if !ctx.args.is_empty() {
            return CommandResult::error(format!("pwd: {}\n", ShellError::TooManyArguments));
        }
        CommandResult::success(format!("{}\n", ctx.cwd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFs;
    use std::sync::Arc;

    fn make_ctx(args: Vec<&str>, cwd: &str) -> CommandContext {
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            cwd: cwd.to_string(),
            fs: Arc::new(InMemoryFs::new()),
            confirm_fn: None,
        }
    }

    #[tokio::test]
    async fn test_pwd_default() {
        let result = PwdCommand.execute(make_ctx(vec![], "/home/user")).await;
        assert_eq!(result.output, "/home/user\n");
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.update, None);
    }

    #[tokio::test]
    async fn test_pwd_root() {
        let result = PwdCommand.execute(make_ctx(vec![], "/")).await;
        assert_eq!(result.output, "/\n");
    }

    #[tokio::test]
    async fn test_pwd_rejects_arguments() {
        let result = PwdCommand.execute(make_ctx(vec!["extra"], "/test")).await;
        assert_eq!(result.output, "pwd: too many arguments\n");
        assert_eq!(result.exit_code, 1);
    }
}
