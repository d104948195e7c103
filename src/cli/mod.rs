//! CLI module - argument parsing, interactive prompts and subcommands

mod args;
pub mod columns;
mod prompts;

pub use args::{Cli, Commands, OutputFormat};
pub use prompts::*;
