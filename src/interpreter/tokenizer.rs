//! Tokenizer
//!
//! Splits one command line into words with POSIX shell quoting:
//! - space, tab, CR and LF separate words
//! - single quotes keep everything literal
//! - double quotes group; inside them a backslash escapes only `\` and `"`
//! - outside quotes a backslash escapes the next character

use super::errors::ShellError;

const NO_CLOSING_QUOTE: &str = "No closing quotation";
const NO_ESCAPED_CHAR: &str = "No escaped character";

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

pub fn tokenize(line: &str) -> Result<Vec<String>, ShellError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if is_separator(c) => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(ShellError::Parse(NO_CLOSING_QUOTE.to_string())),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('\\' | '"')) => current.push(ch),
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(ShellError::Parse(NO_ESCAPED_CHAR.to_string())),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(ShellError::Parse(NO_CLOSING_QUOTE.to_string())),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(ch) => current.push(ch),
                    None => return Err(ShellError::Parse(NO_ESCAPED_CHAR.to_string())),
                }
            }
            _ => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}
