//! Environment overrides for settings.
//!
//! Lives in its own test binary: environment variables are process-wide,
//! so every assertion that touches them runs inside a single test.

use std::fs;

use reckon::Settings;
use tempfile::TempDir;

#[test]
fn environment_overrides_file_and_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(
        &config_path,
        "max_history_size = 10\nprecision = 3\n\n[logging]\ndefault = \"info\"\n",
    )
    .unwrap();

    // SAFETY: no other thread in this binary reads the environment.
    unsafe {
        std::env::set_var("CALCULATOR_MAX_HISTORY_SIZE", "50");
        std::env::set_var("CALCULATOR_AUTO_SAVE", "false");
        std::env::set_var("CALCULATOR_LOGGING__DEFAULT", "debug");
    }

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.max_history_size, 50);
    assert!(!settings.auto_save);
    assert_eq!(settings.logging.default, "debug");
    // Untouched by the environment
    assert_eq!(settings.precision, 3);

    // Invalid environment values are rejected like file values
    unsafe {
        std::env::set_var("CALCULATOR_MAX_HISTORY_SIZE", "0");
    }
    assert!(Settings::load_from(&config_path).is_err());

    unsafe {
        std::env::remove_var("CALCULATOR_MAX_HISTORY_SIZE");
        std::env::remove_var("CALCULATOR_AUTO_SAVE");
        std::env::remove_var("CALCULATOR_LOGGING__DEFAULT");
    }

    let settings = Settings::load_from(&config_path).unwrap();
    assert_eq!(settings.max_history_size, 10);
    assert!(settings.auto_save);
    assert_eq!(settings.logging.default, "info");
}
