//! Error types for the CSE client.

use thiserror::Error;

/// Result type for CSE client operations.
pub type CseResult<T> = std::result::Result<T, CseError>;

/// Errors surfaced by the CSE client.
#[derive(Debug, Error)]
pub enum CseError {
    /// Missing credentials at construction, or a 401 from the server.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid client configuration (malformed endpoint, bad parameters).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An error response from the API, or a network-level failure.
    #[error("API error: {message}")]
    Api {
        /// HTTP status code, when the failure came from a response rather
        /// than the network layer.
        status: Option<u16>,
        /// Human-readable error message.
        message: String,
        /// Raw response body, preserved for diagnostics.
        body: Option<String>,
    },

    /// A response body that could not be parsed as the expected structure,
    /// or a missing file/parameter for an upload call.
    #[error("Data error: {0}")]
    Data(String),
}

impl CseError {
    /// Get the HTTP status code if this error came from an API response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is an authentication failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Get the raw response body if one was preserved.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        let err = CseError::Api {
            status: Some(500),
            message: "boom".to_string(),
            body: None,
        };
        assert_eq!(err.status_code(), Some(500));
        assert!(!err.is_authentication());

        let err = CseError::Authentication("denied".to_string());
        assert_eq!(err.status_code(), None);
        assert!(err.is_authentication());
    }

    #[test]
    fn test_display_carries_message() {
        let err = CseError::Api {
            status: Some(404),
            message: "insight not found".to_string(),
            body: Some("{}".to_string()),
        };
        assert!(err.to_string().contains("insight not found"));
    }
}
