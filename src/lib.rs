//! vfsh - a small shell emulator
//!
//! Runs `pwd`, `cd`, `ls`, `cat`, `find` and `exit` against either the host
//! filesystem or an in-memory tree loaded from CSV records.

pub mod commands;
pub mod emulator;
pub mod fs;
pub mod interpreter;

pub use emulator::{Emulator, EmulatorOptions};
pub use fs::{FileSystem, InMemoryFs, OsFs};
pub use interpreter::{Interpreter, ProcessOutcome, Session, SessionUpdate, ShellError};
