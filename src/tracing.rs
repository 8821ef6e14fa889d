//! Logging setup
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=keychime::keymap=trace` - per-event dispatch decisions
//! - `RUST_LOG=keychime::sound=debug` - sound loading and router lifecycle
//!
//! # Log Files
//!
//! Logs are written to `~/.config/keychime/logs/keychime.log` with daily rotation.
//! File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing subscriber with console and file logging
///
/// `level` overrides the console filter when given; otherwise RUST_LOG is
/// used, falling back to `warn`.
pub fn init(level: Option<&str>) {
    let console_filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    // Console goes to stderr so stdout stays machine-readable
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "keychime.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
