//! Error Handling Module
//!
//! A single error type for everything the client can fail at: transport,
//! non-success responses from the detection service, undecodable bodies and
//! local validation.
//!
//! # Example
//!
//! ```rust,ignore
//! use hatewatch::error::ClientError;
//!
//! let error = ClientError::api_error(503, "Model not loaded");
//! assert!(error.is_server_error());
//! assert_eq!(error.user_message(), "Model not loaded");
//! ```

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced by the detection service client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The service answered with a non-success status.
    ///
    /// `message` is the backend `detail` when it sent one, otherwise the
    /// generic message of the failing operation.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// A success response whose body did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Input rejected before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid client configuration (base URL, headers, logging setup).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ClientError {
    /// Build an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Build an `ApiError` carrying the raw response body.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// HTTP status associated with this error, when there is one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 4xx responses and locally rejected input.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            _ => self
                .status_code()
                .is_some_and(|code| (400..500).contains(&code)),
        }
    }

    /// 5xx responses.
    pub fn is_server_error(&self) -> bool {
        self.status_code()
            .is_some_and(|code| (500..600).contains(&code))
    }

    /// Same variant and status, different message.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::HttpError(_) => Self::HttpError(message),
            Self::ApiError { code, details, .. } => Self::ApiError {
                code,
                message,
                details,
            },
            Self::ParseError(_) => Self::ParseError(message),
            Self::InvalidInput(_) => Self::InvalidInput(message),
            Self::ConfigurationError(_) => Self::ConfigurationError(message),
        }
    }

    /// The message a page shows to the user.
    ///
    /// Unlike `Display`, this drops the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::HttpError(msg)
            | Self::ParseError(msg)
            | Self::InvalidInput(msg)
            | Self::ConfigurationError(msg) => msg.clone(),
            Self::ApiError { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_ranges() {
        let bad_request = ClientError::api_error(400, "Max 100 texts per request");
        assert!(bad_request.is_client_error());
        assert!(!bad_request.is_server_error());

        let unavailable = ClientError::api_error(503, "Model not loaded");
        assert!(unavailable.is_server_error());
        assert_eq!(unavailable.status_code(), Some(503));

        let invalid = ClientError::InvalidInput("empty".into());
        assert!(invalid.is_client_error());
        assert_eq!(invalid.status_code(), None);

        assert!(!ClientError::HttpError("refused".into()).is_client_error());
    }

    #[test]
    fn user_message_drops_prefix() {
        let err = ClientError::api_error(500, "Error processing text: boom");
        assert_eq!(err.to_string(), "API error 500: Error processing text: boom");
        assert_eq!(err.user_message(), "Error processing text: boom");

        let err = ClientError::InvalidInput("Text cannot be empty".into());
        assert_eq!(err.user_message(), "Text cannot be empty");
    }
}
