//! Log setup.
//!
//! Logs go to a daily rolling file rather than the terminal, which the wheel
//! screen owns. `DINEWHEEL_LOG` overrides the configured filter.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// Environment variable holding a filter that replaces `logging.level`.
pub const LOG_ENV: &str = "DINEWHEEL_LOG";

/// File name prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "dinewheel.log";

/// Build the filter from `DINEWHEEL_LOG`, falling back to `level`.
///
/// An unparseable configured level falls back to `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns the guard that flushes the file writer; keep it alive for the
/// life of the program. Returns `None` when the log directory cannot be
/// created or a subscriber is already installed, in which case logging is
/// off.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    if fs::create_dir_all(&config.directory).is_err() {
        return None;
    }

    let appender = rolling::daily(&config.directory, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = Registry::default().with(env_filter(&config.level)).with(
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true),
    );

    tracing::subscriber::set_global_default(subscriber).ok()?;
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_directives() {
        let filter = env_filter("dinewheel=debug,warn");
        assert!(filter.to_string().contains("dinewheel=debug"));
    }

    #[test]
    fn test_env_filter_falls_back_on_garbage() {
        let filter = env_filter("dinewheel=[[[");
        assert!(!filter.to_string().is_empty());
    }
}
