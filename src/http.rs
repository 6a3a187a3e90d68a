//! HTTP helpers: default headers and error normalization.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::collections::HashMap;

use crate::error::ClientError;

/// Header builder for requests to the detection service
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// JSON in both directions
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, ClientError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| {
                ClientError::ConfigurationError(format!("Invalid user agent: {e}"))
            })?,
        );
        Ok(self)
    }

    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, ClientError> {
        for (key, value) in custom_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ClientError::ConfigurationError(format!("Invalid header name '{key}': {e}"))
            })?;
            self.headers.insert(
                header_name,
                HeaderValue::from_str(value).map_err(|e| {
                    ClientError::ConfigurationError(format!("Invalid header value '{value}': {e}"))
                })?,
            );
        }
        Ok(self)
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the human-readable message out of an error body.
///
/// The service reports failures as `{"detail": "..."}`. Request validation
/// failures carry a list instead: `{"detail": [{"loc": [..], "msg": "..."}]}`,
/// in which case the `msg` entries are joined.
pub fn extract_detail(body: &serde_json::Value) -> Option<String> {
    match body.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Turn a non-success response into a `ClientError`.
///
/// The backend `detail` wins; `fallback_message` is used when the body has none.
pub fn classify_http_error(status: u16, body_text: &str, fallback_message: &str) -> ClientError {
    let parsed = serde_json::from_str::<serde_json::Value>(body_text).ok();
    let message = parsed
        .as_ref()
        .and_then(extract_detail)
        .unwrap_or_else(|| fallback_message.to_string());

    match parsed {
        Some(details) => ClientError::api_error_with_details(status, message, details),
        None => ClientError::api_error(status, message),
    }
}
