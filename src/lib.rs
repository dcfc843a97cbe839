//! NeuroCinema - box office revenue prediction demo
//!
//! A terminal application that walks the user through entering movie
//! details and then shows a mock revenue prediction with a revenue bucket.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod estimator;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum CinemaError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Log subscriber or log file setup error
    LoggingError(String),
    /// Background estimate task error
    TaskError(String),
}

impl fmt::Display for CinemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CinemaError::IoError(err) => write!(f, "I/O error: {}", err),
            CinemaError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            CinemaError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            CinemaError::LoggingError(msg) => write!(f, "Logging error: {}", msg),
            CinemaError::TaskError(msg) => write!(f, "Task error: {}", msg),
        }
    }
}

impl std::error::Error for CinemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CinemaError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CinemaError {
    fn from(err: std::io::Error) -> Self {
        CinemaError::IoError(err)
    }
}

impl From<toml::de::Error> for CinemaError {
    fn from(err: toml::de::Error) -> Self {
        CinemaError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CinemaError {
    fn from(err: toml::ser::Error) -> Self {
        CinemaError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for NeuroCinema operations
pub type Result<T> = std::result::Result<T, CinemaError>;

/// Error handling utilities
pub mod error {
    use super::CinemaError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &CinemaError) -> String {
        match error {
            CinemaError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings file.", msg)
            }
            CinemaError::TuiError(_) => {
                "The terminal could not be driven. Try `--prompt` for line mode.".to_string()
            }
            CinemaError::LoggingError(_) => {
                "Logging could not be set up. Check permissions of the data directory."
                    .to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "neurocinema";
pub const CONFIG_FILE: &str = "neurocinema.toml";
pub const LOG_FILE: &str = "neurocinema.log";
