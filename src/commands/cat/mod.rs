// src/commands/cat/mod.rs
use async_trait::async_trait;
use crate::commands::{Command, CommandContext, CommandResult};
use crate::interpreter::ShellError;

pub struct CatCommand;

#[async_trait]
impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.is_empty() {
            return CommandResult::error("cat: missing operand\n".to_string());
        }

        let mut output = String::new();
        let mut exit_code = 0;

        for file in &ctx.args {
            let path = ctx.fs.resolve_path(&ctx.cwd, file);
            match ctx.fs.read_file(&path).await {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    output.push_str(&text);
                    if !text.is_empty() && !text.ends_with('\n') {
                        output.push('\n');
                    }
                }
                Err(e) => {
                    output.push_str(&format!("cat: {}\n", ShellError::from_fs(file, e)));
                    exit_code = 1;
                }
            }
        }

        CommandResult::with_exit_code(output, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{InMemoryFs, VfsRecord};
    use std::sync::Arc;

    fn make_ctx(args: Vec<&str>) -> CommandContext {
        let fs = InMemoryFs::from_records(vec![
            VfsRecord::file("/real.txt", "aGkK"),
            VfsRecord::file("/a.txt", "YWFhCg=="),
            VfsRecord::file("/b.txt", "YmJi"),
            VfsRecord::file("/empty.txt", ""),
            VfsRecord::file("/binary.bin", "/w=="),
            VfsRecord::dir("/dir"),
        ])
        .unwrap();
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            cwd: "/".to_string(),
            fs: Arc::new(fs),
            confirm_fn: None,
        }
    }

    #[tokio::test]
    async fn test_cat_single_file() {
        let result = CatCommand.execute(make_ctx(vec!["real.txt"])).await;
        assert_eq!(result.output, "hi\n");
        assert_eq!(result.exit_code, 0);
    }

    #[tokio::test]
    async fn test_cat_adds_missing_newline() {
        let result = CatCommand.execute(make_ctx(vec!["/a.txt", "/b.txt"])).await;
        assert_eq!(result.output, "aaa\nbbb\n");
    }

    #[tokio::test]
    async fn test_cat_continues_after_missing() {
        let result = CatCommand.execute(make_ctx(vec!["missing.txt", "real.txt"])).await;
        assert_eq!(result.output, "cat: missing.txt: No such file or directory\nhi\n");
        assert_eq!(result.lines(), vec!["cat: missing.txt: No such file or directory", "hi"]);
        assert_eq!(result.exit_code, 1);
    }

    #[tokio::test]
    async fn test_cat_directory() {
        let result = CatCommand.execute(make_ctx(vec!["dir", "b.txt"])).await;
        assert_eq!(result.output, "cat: dir: Is a directory\nbbb\n");
    }

    #[tokio::test]
    async fn test_cat_empty_and_invalid_utf8() {
        let result = CatCommand.execute(make_ctx(vec!["empty.txt"])).await;
        assert_eq!(result.output, "");

        let result = CatCommand.execute(make_ctx(vec!["binary.bin"])).await;
        assert_eq!(result.output, "\u{FFFD}\n");
    }

    #[tokio::test]
    async fn test_cat_missing_operand() {
        let result = CatCommand.execute(make_ctx(vec![])).await;
        assert_eq!(result.output, "cat: missing operand\n");
        assert_eq!(result.exit_code, 1);
    }
}
