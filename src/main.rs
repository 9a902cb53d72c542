use std::sync::Arc;

use clap::Parser;
use reckon::cli::commands::{calc, history, init};
use reckon::cli::{Cli, Commands, repl};
use reckon::{Calculator, Settings};

fn main() {
    let cli = Cli::parse();

    // Init does not need a valid configuration
    if let Some(Commands::Init { force }) = cli.command {
        if let Err(e) = init::run_init(force) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    reckon::logging::init_with_config(&settings.logging, Some(&settings.log_path()));

    if let Some(Commands::Config) = cli.command {
        if let Err(e) = init::run_config(&settings) {
            eprintln!("Error displaying config: {e}");
            std::process::exit(1);
        }
        return;
    }

    let mut calculator = Calculator::open(Arc::new(settings));

    match cli.command {
        None | Some(Commands::Repl) => {
            if let Err(e) = repl::run_stdio(&mut calculator) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Calc { operation, a, b }) => {
            if let Err(e) = calc::run_calc(&mut calculator, &operation, a, b) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::History { json }) => {
            if let Err(e) = history::run_history(&calculator, json) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Clear) => history::run_clear(&mut calculator),
        Some(Commands::Init { .. }) | Some(Commands::Config) => {}
    }
}
