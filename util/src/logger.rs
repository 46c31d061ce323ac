//! Generic logger utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use fern;
use log::{self, info};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Log lines are prefixed by the number of seconds since the session started. Stdout only shows
/// lines at `min_level` or above, while the session's log file records everything down to
/// `Trace`, so the per-tick output of a run is always available afterwards.
///
/// # Notes
///
/// - `min_level` must be at least as verbose as `log::Level::Info`, so that mode changes and the
///   mission summary are never filtered out.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level));
    }

    let log_file = match fern::log_file(&session.log_file_path) {
        Ok(f) => f,
        Err(e) => return Err(LoggerInitError::LogFileInitError(e)),
    };

    let stdout = fern::Dispatch::new()
        .level(min_level)
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .level(LevelFilter::Trace)
        .chain(log_file);

    match fern::Dispatch::new()
        .format(|out, message, record| {
            // If debug or trace include the target, otherwise don't include it
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    message
                ))
            }
        })
        .chain(stdout)
        .chain(file)
        .apply()
    {
        Ok(_) => (),
        Err(e) => return Err(LoggerInitError::FernInitError(e)),
    };

    info!("Logging initialised");
    info!("    Session epoch: {:?}", session::get_epoch());
    info!("    Stdout log level: {:?}", min_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info => "INF".normal(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold(),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reject_quiet_levels() {
        let root = std::env::temp_dir().join("logger_test");
        let session = session::Session {
            log_file_path: root.join("logger_test.log"),
            session_root: root,
        };

        for level in &[LevelFilter::Off, LevelFilter::Error, LevelFilter::Warn] {
            assert!(matches!(
                logger_init(*level, &session),
                Err(LoggerInitError::InvalidMinLogLevel(_))
            ));
        }

        // Nothing is created when the level is rejected
        assert!(!session.log_file_path.exists());
    }

    #[test]
    fn test_level_tags() {
        assert!(level_to_str(log::Level::Warn).to_string().contains("WRN"));
        assert!(level_to_str(log::Level::Trace).to_string().contains("TRC"));
    }
}
