//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Command-line calculator with history
#[derive(Parser)]
#[command(
    name = "reckon",
    version = env!("CARGO_PKG_VERSION"),
    about = "Command-line calculator with undoable history",
    long_about = "Evaluate arithmetic, trigonometric and logarithmic operations, \
                  keep a bounded history with undo/redo, and persist it between sessions.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Quick Start:\n  $ reckon                    # Interactive session\n  $ reckon calc add 2 3       # One-shot calculation\n  $ reckon calc abs -7        # Unary operation\n  $ reckon history --json     # Persisted history as JSON\n  $ reckon init               # Create .reckon/settings.toml"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true, env = "CALCULATOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session
    #[command(about = "Interactive calculator session (default)")]
    Repl,

    /// Run a single calculation
    #[command(
        about = "Evaluate one operation and record it in the history",
        after_help = "Examples:\n  reckon calc add 2 3\n  reckon calc root 27 3\n  reckon calc -- subtract -4 2\n  reckon calc abs -7"
    )]
    Calc {
        /// Operation name (see `reckon repl` then `ops`)
        operation: String,

        /// First operand
        #[arg(allow_hyphen_values = true)]
        a: String,

        /// Second operand (omit for unary operations)
        #[arg(allow_hyphen_values = true)]
        b: Option<String>,
    },

    /// Print the persisted history
    #[command(about = "Show the saved calculation history")]
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear the persisted history
    #[command(about = "Clear the saved calculation history")]
    Clear,

    /// Initialize project
    #[command(about = "Set up .reckon directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .reckon/settings.toml")]
    Config,
}
