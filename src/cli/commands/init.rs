//! `init` and `config` commands.

use std::error::Error;

use crate::config::Settings;

/// Write the default settings file and show where data will live.
pub fn run_init(force: bool) -> Result<(), Box<dyn Error>> {
    let path = Settings::init_config_file(force)?;
    let defaults = Settings::default();

    println!("Created {}", path.display());
    println!("  history: {}", defaults.history_path().display());
    println!("  journal: {}", defaults.journal_path().display());
    println!("  log:     {}", defaults.log_path().display());
    Ok(())
}

/// Print the effective settings as TOML followed by the resolved file paths.
pub fn run_config(settings: &Settings) -> Result<(), toml::ser::Error> {
    print!("{}", toml::to_string_pretty(settings)?);
    println!();
    println!("# resolved paths");
    println!("# history: {}", settings.history_path().display());
    println!("# journal: {}", settings.journal_path().display());
    println!("# log:     {}", settings.log_path().display());
    Ok(())
}
