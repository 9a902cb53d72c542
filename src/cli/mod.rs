//! CLI module for the calculator.
//!
//! Provides command-line interface parsing, the interactive loop and
//! command dispatch.

pub mod args;
pub mod commands;
pub mod repl;

pub use args::{Cli, Commands};
pub use repl::{ReplCommand, parse_command};
