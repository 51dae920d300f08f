//! Error types for the AI Learn client application.
//!
//! API and editor failures are normally absorbed by the controller and turned
//! into fallback messages; they only surface here when a caller (such as the
//! CLI) talks to those layers directly.

use std::path::PathBuf;

use ailearn_api::ApiError;
use ailearn_editor::EditorError;

/// A specialized `Result` type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors that can occur in the client application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid JSON syntax in configuration file.
    #[error("Invalid JSON in config file '{path}': {message}\n\nSuggestion: Validate your ailearn.json with a JSON linter")]
    ConfigParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// Configuration validation failed.
    #[error("Invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    ConfigValidationError {
        /// Description of the validation failure.
        message: String,
        /// Actionable suggestion for the user.
        suggestion: String,
    },

    // ========================================================================
    // Collaborator Errors
    // ========================================================================
    /// Backend request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Editor could not be set up.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    // ========================================================================
    // General I/O Errors
    // ========================================================================
    /// General I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a new `ConfigParseError` with the given path and message.
    #[must_use]
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new `ConfigValidationError` with the given message and suggestion.
    #[must_use]
    pub fn config_validation(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::ConfigValidationError {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Returns `true` if this error comes from a misconfiguration the user must fix.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigParseError { .. } | Self::ConfigValidationError { .. }
        )
    }
}
