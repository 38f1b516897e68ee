//! Error handling for Roomcalc
//!
//! The numeric core never fails. Errors only arise at the edges:
//! reading configuration or room descriptions from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Roomcalc operations
pub type Result<T> = std::result::Result<T, RoomError>;

/// Main error type for Roomcalc operations
#[derive(Error, Debug)]
pub enum RoomError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration Errors
    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RoomError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            RoomError::FileNotFound { .. } => "FILE_NOT_FOUND",
            RoomError::FileReadError { .. } => "FILE_READ_ERROR",
            RoomError::InvalidConfig { .. } => "INVALID_CONFIG",
            RoomError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable
    ///
    /// Every error here leaves the session untouched, so the caller can
    /// fall back to defaults and keep going. Only read failures are
    /// considered environmental.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RoomError::FileReadError { .. })
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RoomError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Omit --config to run with built-in defaults",
            ],
            RoomError::FileReadError { .. } => vec![
                "Check the file permissions",
                "Verify the file is not locked by another process",
            ],
            RoomError::InvalidConfig { .. } => vec![
                "Run 'roomcalc-cli config' to print a valid configuration",
                "Remove the offending field to use its default",
            ],
            RoomError::Serialization(_) => vec![
                "Check the file is valid JSON",
                "Field names are snake_case",
            ],
        }
    }

    pub(crate) fn invalid_config(field: &str, reason: impl Into<String>) -> Self {
        RoomError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Read a whole file into a string, mapping I/O failures onto [`RoomError`].
pub(crate) fn read_to_string(path: &std::path::Path) -> Result<String> {
    if !path.exists() {
        return Err(RoomError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| RoomError::FileReadError {
        path: path.to_path_buf(),
        source,
    })
}
