//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::api::ApiError;
use crate::http_server::ConfigError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or flag error
    ConfigError,
    /// I/O error (files, stdin/stdout)
    IoError,
    /// Server could not start
    BootFailed,
    /// The one-shot request was rejected
    RequestFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EVENTSTORE_CLI_CONFIG_ERROR",
            Self::IoError => "EVENTSTORE_CLI_IO_ERROR",
            Self::BootFailed => "EVENTSTORE_CLI_BOOT_FAILED",
            Self::RequestFailed => "EVENTSTORE_CLI_REQUEST_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Wraps a rejected ingest or query, keeping the API code in the message
    pub fn request_failed(err: &ApiError) -> Self {
        Self::new(
            CliErrorCode::RequestFailed,
            format!("{}: {}", err.code(), err.message()),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::boot_failed("address in use");
        assert_eq!(err.to_string(), "EVENTSTORE_CLI_BOOT_FAILED: address in use");
    }

    #[test]
    fn test_request_failed_keeps_api_code() {
        let err = CliError::request_failed(&ApiError::validation("event 0: missing tag"));
        assert_eq!(err.code(), &CliErrorCode::RequestFailed);
        assert_eq!(
            err.message(),
            "EVENTSTORE_VALIDATION_ERROR: event 0: missing tag"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err = CliError::from(ConfigError::Invalid("port must not be 0".into()));
        assert_eq!(err.code_str(), "EVENTSTORE_CLI_CONFIG_ERROR");
    }
}
