// src/commands/ls/mod.rs
use async_trait::async_trait;
use crate::commands::format::{display_name, format_long_line};
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::path::join;
use crate::interpreter::ShellError;

pub struct LsCommand;

#[derive(Debug, Clone, Copy, Default)]
struct LsOptions {
    show_all: bool,
    long_format: bool,
}

/// Split arguments into option letters and operands. Any word starting with
/// `-` other than `-` itself is an option word; unknown letters are ignored.
fn parse_args(args: &[String]) -> (LsOptions, Vec<String>) {
    let mut options = LsOptions::default();
    let mut operands = Vec::new();

    for arg in args {
        if arg.starts_with('-') && arg != "-" {
            for ch in arg.chars().skip(1) {
                match ch {
                    'a' => options.show_all = true,
                    'l' => options.long_format = true,
                    _ => {}
                }
            }
        } else {
            operands.push(arg.clone());
        }
    }

    if operands.is_empty() {
        operands.push(".".to_string());
    }
    (options, operands)
}

/// Render one operand: a directory listing, or a single line for anything else.
async fn list_operand(
    ctx: &CommandContext,
    operand: &str,
    options: LsOptions,
) -> Result<String, ShellError> {
    let path = ctx.fs.resolve_path(&ctx.cwd, operand);
    let stat = ctx.fs.stat(&path).await.map_err(|e| ShellError::from_fs(operand, e))?;

    if !stat.is_directory {
        return Ok(if options.long_format {
            format!("{}\n", format_long_line(&stat, operand))
        } else {
            format!("{}\n", operand)
        });
    }

    let entries = ctx
        .fs
        .list_directory_with_kinds(&path)
        .await
        .map_err(|e| ShellError::from_fs(operand, e))?;
    let visible = entries
        .into_iter()
        .filter(|e| options.show_all || !e.name.starts_with('.'));

    let mut block = String::new();
    if options.long_format {
        for entry in visible {
            match ctx.fs.stat(&join(&path, &entry.name)).await {
                Ok(stat) => {
                    block.push_str(&format_long_line(&stat, &entry.name));
                    block.push('\n');
                }
                Err(e) => {
                    block.push_str(&format!("ls: {}\n", ShellError::from_fs(&entry.name, e)));
                }
            }
        }
    } else {
        let names: Vec<String> = visible
            .map(|e| display_name(&e.name, e.is_directory))
            .collect();
        if !names.is_empty() {
            block.push_str(&names.join("  "));
            block.push('\n');
        }
    }
    Ok(block)
}

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let (options, operands) = parse_args(&ctx.args);
        let show_headers = operands.len() > 1;

        let mut output = String::new();
        let mut exit_code = 0;

        for (idx, operand) in operands.iter().enumerate() {
            if show_headers {
                if idx > 0 {
                    output.push('\n');
                }
                output.push_str(&format!("{}:\n", operand));
            }
            match list_operand(&ctx, operand, options).await {
                Ok(block) => output.push_str(&block),
                Err(e) => {
                    output.push_str(&format!("ls: {}\n", e));
                    exit_code = 2;
                }
            }
        }

        CommandResult::with_exit_code(output, exit_code)
    }
}
