//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module.

pub mod calc;
pub mod history;
pub mod init;
