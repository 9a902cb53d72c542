//! Unified logging for diagnostics and the calculation log file.
//!
//! Provides compact timestamped logging on stderr with per-module level
//! configuration, plus an optional plain-text log file that always records
//! `info` and above (one line per calculation, observer failures,
//! persistence problems).
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"  # quiet terminal by default
//!
//! [logging.modules]
//! "reckon::storage" = "debug"
//! ```
//!
//! # Environment Variable
//!
//! `RUST_LOG` takes precedence over config for the terminal output:
//! ```bash
//! RUST_LOG=debug reckon repl
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, Once};

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Level recorded in the log file regardless of terminal settings.
const FILE_LEVEL: &str = "info";

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Full date-time format for the log file.
struct FileTime;

impl FormatTime for FileTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Build the terminal filter string from config.
fn filter_string(config: &LoggingConfig) -> String {
    let mut filter_str = config.default.clone();
    for (module, level) in &config.modules {
        filter_str.push_str(&format!(",{module}={level}"));
    }
    filter_str
}

/// Open `path` for appending, creating parent directories.
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize logging with configuration.
///
/// Call once at startup. Safe to call multiple times (only first call takes effect).
///
/// Log levels control terminal visibility:
/// - `error` - errors only (quietest)
/// - `warn` - errors + warnings (default, quiet operation)
/// - `info` - one line per calculation
/// - `debug` - persistence and observer details
/// - `trace` - everything
///
/// When `log_file` is given, `info` and above is also appended there. If the
/// file cannot be opened a warning is printed and only stderr is used.
///
/// # Arguments
/// * `config` - Logging configuration with default level and per-module overrides
/// * `log_file` - Optional path of the persistent log file
pub fn init_with_config(config: &LoggingConfig, log_file: Option<&Path>) {
    INIT.call_once(|| {
        // RUST_LOG env var takes precedence over config
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_string(config))
        };

        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        let mut file_error = None;
        let file_layer = log_file.and_then(|path| match open_log_file(path) {
            Ok(file) => Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_timer(FileTime)
                    .with_filter(EnvFilter::new(FILE_LEVEL)),
            ),
            Err(e) => {
                file_error = Some(format!("{}: {e}", path.display()));
                None
            }
        });

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .init();

        if let Some(reason) = file_error {
            tracing::warn!("[logging] cannot open log file {reason}, logging to stderr only");
        }
    });
}

/// Initialize stderr logging with default configuration.
///
/// Uses `LoggingConfig::default()` which sets `default = "warn"` for quiet operation.
/// Use `RUST_LOG=debug` environment variable for verbose output.
pub fn init() {
    init_with_config(&LoggingConfig::default(), None);
}

/// Log an event with handler context.
///
/// # Examples
/// ```ignore
/// log_event!("calc", "add", "{} {} = {}", a, b, result);
/// log_event!("repl", "started");
/// ```
#[macro_export]
macro_rules! log_event {
    ($handler:expr, $event:expr) => {
        tracing::info!("[{}] {}", $handler, $event)
    };
    ($handler:expr, $event:expr, $($arg:tt)*) => {
        tracing::info!("[{}] {}: {}", $handler, $event, format!($($arg)*))
    };
}

/// Debug-only event logging.
///
/// # Examples
/// ```ignore
/// debug_event!("store", "saved", "{} records", count);
/// ```
#[macro_export]
macro_rules! debug_event {
    ($handler:expr, $event:expr) => {
        tracing::debug!("[{}] {}", $handler, $event)
    };
    ($handler:expr, $event:expr, $($arg:tt)*) => {
        tracing::debug!("[{}] {}: {}", $handler, $event, format!($($arg)*))
    };
}
