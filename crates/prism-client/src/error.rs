//! Error types for the Prism Central client

use thiserror::Error;

/// Errors raised while talking to the listing API
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// API returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server
        message: String,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Check if the request may succeed when sent again
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout => true,
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = ClientError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.is_retryable());

        let err = ClientError::Api {
            status: 429,
            message: String::new(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_client_errors_are_fatal() {
        let err = ClientError::Api {
            status: 401,
            message: "AUTHENTICATION_REQUIRED".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(!ClientError::InvalidResponse("bad".to_string()).is_retryable());
    }
}
