// src/commands/mod.rs
pub mod cat;
pub mod cd;
pub mod exit;
pub mod find;
pub mod format;
pub mod ls;
pub mod pwd;
pub mod registry;
pub mod types;

pub use registry::{create_default_registry, CommandRegistry};
pub use types::{Command, CommandContext, CommandResult, ConfirmFn};
