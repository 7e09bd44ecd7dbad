use glob::Pattern;

use crate::interpreter::ShellError;
use super::types::*;

fn missing_argument(flag: &str) -> ShellError {
    ShellError::InvalidArgument(format!("missing argument to `{}'", flag))
}

/// Compile a `-name` glob. A pattern the glob grammar rejects (an unclosed
/// `[`, say) is matched literally, as fnmatch does.
pub fn compile_name(raw: &str) -> NamePattern {
    let matcher = match Pattern::new(raw) {
        Ok(pattern) => NameMatcher::Glob(pattern),
        Err(e) => {
            log::debug!("find: treating -name pattern '{}' literally: {}", raw, e);
            NameMatcher::Literal(raw.to_string())
        }
    };
    NamePattern { raw: raw.to_string(), matcher }
}

/// Parse find arguments. Start paths and predicates may appear in any order;
/// a later repeat of a predicate replaces the earlier one.
pub fn parse_arguments(args: &[String]) -> Result<FindInvocation, ShellError> {
    let mut start_paths = Vec::new();
    let mut predicates = Predicates::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-name" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| missing_argument(arg))?;
                predicates.name = Some(compile_name(value));
            }
            "-type" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| missing_argument(arg))?;
                predicates.file_type = Some(match value.as_str() {
                    "f" => FileType::File,
                    "d" => FileType::Directory,
                    other => {
                        return Err(ShellError::InvalidArgument(format!(
                            "Unknown argument to -type: {}",
                            other
                        )));
                    }
                });
            }
            "-maxdepth" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| missing_argument(arg))?;
                let depth = value.parse::<usize>().map_err(|_| {
                    ShellError::InvalidArgument(format!(
                        "invalid argument `{}' to `-maxdepth'",
                        value
                    ))
                })?;
                predicates.max_depth = Some(depth);
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(ShellError::InvalidArgument(format!("unknown predicate `{}'", arg)));
            }
            _ => start_paths.push(arg.to_string()),
        }
        i += 1;
    }

    if start_paths.is_empty() {
        start_paths.push(".".to_string());
    }
    Ok(FindInvocation { start_paths, predicates })
}
