pub mod types;
pub mod parser;
pub mod matcher;

use async_trait::async_trait;
use crate::commands::types::{Command, CommandContext, CommandResult};
use crate::fs::path::join;
use crate::fs::{walk_subtree, FileSystem};
use crate::interpreter::ShellError;
use types::*;

pub struct FindCommand;

#[async_trait]
impl Command for FindCommand {
    fn name(&self) -> &'static str {
        "find"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        // Predicates are parsed once; a bad one aborts every start path.
        let invocation = match parser::parse_arguments(&ctx.args) {
            Ok(invocation) => invocation,
            Err(e) => return CommandResult::error(format!("find: {}\n", e)),
        };
        let predicates = &invocation.predicates;

        let mut output = String::new();
        let mut exit_code = 0;

        for start in &invocation.start_paths {
            let display = clean_start_path(start);
            let base_path = ctx.fs.resolve_path(&ctx.cwd, start);

            let stat = match ctx.fs.stat(&base_path).await {
                Ok(stat) => stat,
                Err(e) => {
                    output.push_str(&format!("find: {}\n", ShellError::from_fs(display, e)));
                    exit_code = 1;
                    continue;
                }
            };

            if !stat.is_directory {
                // A lone file is tested regardless of -maxdepth.
                if predicates.matches(start_name(display), false) {
                    output.push_str(display);
                    output.push('\n');
                }
                continue;
            }

            if !find_in_directory(ctx.fs.as_ref(), &base_path, display, predicates, &mut output).await {
                exit_code = 1;
            }
        }

        CommandResult::with_exit_code(output, exit_code)
    }
}

/// Walk a start directory. The start itself is tested at depth 0; every other
/// entry is tested once, as a child of the directory that contains it.
/// Returns false if some directory could not be listed.
async fn find_in_directory(
    fs: &dyn FileSystem,
    base_path: &str,
    display: &str,
    predicates: &Predicates,
    output: &mut String,
) -> bool {
    let mut walk = walk_subtree(fs, base_path).max_depth(predicates.max_depth);
    let mut ok = true;

    while let Some(step) = walk.next().await {
        let entry = match step {
            Ok(entry) => entry,
            Err(e) => {
                let shown = display_path(display, base_path, &e.path);
                if e.depth == 0 && predicates.matches(start_name(display), true) {
                    output.push_str(&shown);
                    output.push('\n');
                }
                output.push_str(&format!("find: {}\n", ShellError::from_fs(&shown, e.source)));
                ok = false;
                continue;
            }
        };
        if !predicates.within_depth(entry.depth) {
            continue;
        }
        let shown = display_path(display, base_path, &entry.path);

        if entry.depth == 0 && predicates.matches(start_name(display), true) {
            output.push_str(&shown);
            output.push('\n');
        }
        if !predicates.within_depth(entry.depth + 1) {
            continue;
        }
        for dir in &entry.dirs {
            if predicates.matches(dir, true) {
                output.push_str(&join(&shown, dir));
                output.push('\n');
            }
        }
        for file in &entry.files {
            if predicates.matches(file, false) {
                output.push_str(&join(&shown, file));
                output.push('\n');
            }
        }
    }
    ok
}

/// Drop trailing slashes from a start path, keeping a lone `/`.
fn clean_start_path(start: &str) -> &str {
    let trimmed = start.trim_end_matches('/');
    if trimmed.is_empty() && start.starts_with('/') {
        "/"
    } else if trimmed.is_empty() {
        start
    } else {
        trimmed
    }
}

/// Base name of a start path as typed.
fn start_name(display: &str) -> &str {
    display.rsplit('/').next().unwrap_or(display)
}

/// Printable path for `current`, expressed relative to the start as typed.
fn display_path(display: &str, base_path: &str, current: &str) -> String {
    let relative = current
        .strip_prefix(base_path)
        .unwrap_or(current)
        .trim_start_matches('/');
    if relative.is_empty() {
        display.to_string()
    } else {
        join(display, relative)
    }
}
