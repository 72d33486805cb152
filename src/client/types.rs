//! Client error definitions.

use serde_json::Value;
use thiserror::Error;

use crate::resilience::Retryable;

/// Errors that can occur while talking to Elasticsearch.
#[derive(Debug, Error)]
pub enum EsError {
    /// The configured host is not a usable URL.
    #[error("Invalid Elasticsearch URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or body read failure.
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Elasticsearch returned {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl EsError {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            EsError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl Retryable for EsError {
    fn is_retryable(&self) -> bool {
        match self {
            EsError::Transport { .. } => true,
            EsError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for client operations.
pub type EsResult<T> = Result<T, EsError>;

/// Extract a readable reason from an Elasticsearch error body.
///
/// Elasticsearch reports `{"error": {"type": ..., "reason": ...}}` for most
/// failures, a plain string `error` for a few, and an empty `{}` for missing
/// templates.
pub fn error_reason(status: reqwest::StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    };

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => match json.get("error") {
            Some(Value::Object(err)) => {
                let kind = err.get("type").and_then(Value::as_str);
                let reason = err.get("reason").and_then(Value::as_str);
                match (kind, reason) {
                    (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
                    (None, Some(reason)) => reason.to_string(),
                    (Some(kind), None) => kind.to_string(),
                    (None, None) => trimmed.to_string(),
                }
            }
            Some(Value::String(reason)) => reason.clone(),
            _ if json.as_object().is_some_and(|o| o.is_empty()) => fallback(),
            _ => trimmed.to_string(),
        },
        Err(_) => trimmed.to_string(),
    }
}
