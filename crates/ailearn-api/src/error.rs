//! Error types for API client operations.

/// A specialized `Result` type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by [`ApiClient`](crate::ApiClient) requests.
///
/// Callers treat every variant the same way: log it and show a fallback
/// message. The variants only exist so the message says what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success HTTP status.
    #[error("API Error: {status} {status_text}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status (may be empty).
        status_text: String,
    },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON document.
    #[error("Invalid JSON in response from '{url}': {message}")]
    Decode {
        /// URL whose body failed to decode.
        url: String,
        /// Description of the decode failure.
        message: String,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// Creates a new `Status` error from a response status code.
    #[must_use]
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code if the backend answered with one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode { .. } | Self::Encode(_) => None,
        }
    }
}
