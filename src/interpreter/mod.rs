//! Interpreter module
//!
//! Tokenizing, dispatch and the session state commands run against.

pub mod errors;
pub mod interpreter;
pub mod session;
pub mod tokenizer;

pub use errors::ShellError;
pub use interpreter::{Interpreter, ProcessOutcome, COMMAND_NOT_FOUND};
pub use session::{Session, SessionUpdate};
pub use tokenizer::tokenize;
