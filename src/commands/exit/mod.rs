// src/commands/exit/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::interpreter::SessionUpdate;

pub const EXIT_QUESTION: &str = "Exit the emulator?";

pub struct ExitCommand;

#[async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        // Without a prompt to ask, exiting is taken as confirmed.
        let confirmed = match &ctx.confirm_fn {
            Some(confirm) => confirm(EXIT_QUESTION),
            None => true,
        };
        if confirmed {
            CommandResult::success(String::new()).with_update(SessionUpdate::Exit)
        } else {
            CommandResult::success(String::new())
        }
    }
}
