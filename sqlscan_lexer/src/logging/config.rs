//! Environment-driven logging configuration

use super::events::LogLevel;

/// Environment variable selecting the minimum log level
pub const LOG_LEVEL_ENV: &str = "SQLSCAN_LOG_LEVEL";

/// Environment variable toggling JSON output
pub const STRUCTURED_LOGS_ENV: &str = "SQLSCAN_STRUCTURED_LOGS";

/// Environment variable bounding the in-memory event buffer
pub const LOG_BUFFER_SIZE_ENV: &str = "SQLSCAN_LOG_BUFFER_SIZE";

const DEFAULT_ERROR_BUFFER_SIZE: usize = 1000;

/// Minimum log level from the environment, defaulting to Info
pub fn get_min_log_level() -> LogLevel {
    match std::env::var(LOG_LEVEL_ENV).as_deref() {
        Ok("error") | Ok("ERROR") => LogLevel::Error,
        Ok("warn") | Ok("WARN") | Ok("warning") => LogLevel::Warning,
        Ok("debug") | Ok("DEBUG") => LogLevel::Debug,
        _ => LogLevel::Info,
    }
}

/// Whether events should be emitted as JSON lines
pub fn use_structured_logging() -> bool {
    matches!(
        std::env::var(STRUCTURED_LOGS_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Maximum number of events retained by the memory logger
pub fn get_error_buffer_size() -> usize {
    std::env::var(LOG_BUFFER_SIZE_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .filter(|&size| size > 0)
        .unwrap_or(DEFAULT_ERROR_BUFFER_SIZE)
}

/// Validate the logging environment before initialization
pub fn validate_config() -> Result<(), String> {
    if let Ok(raw) = std::env::var(LOG_BUFFER_SIZE_ENV) {
        let parsed: Result<usize, _> = raw.parse();
        match parsed {
            Ok(size) if size > 0 => {}
            _ => {
                return Err(format!(
                    "{} must be a positive integer, got {:?}",
                    LOG_BUFFER_SIZE_ENV, raw
                ));
            }
        }
    }
    Ok(())
}
