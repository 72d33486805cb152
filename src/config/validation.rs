//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! returned, not just the first.

use thiserror::Error;

use crate::config::schema::ManagerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("connection.host '{host}' is not a valid URL: {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("connection.host '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("connection.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("connection.username and connection.password must be set together")]
    PartialCredentials,

    #[error("retries.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("retries.base_delay_ms ({base}) exceeds retries.max_delay_ms ({max})")]
    DelayRange { base: u64, max: u64 },
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ManagerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let conn = &config.connection;

    match url::Url::parse(&conn.host) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme(conn.host.clone()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidHost {
            host: conn.host.clone(),
            reason: e.to_string(),
        }),
    }

    if conn.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if conn.username.is_empty() != conn.password.is_empty() {
        errors.push(ValidationError::PartialCredentials);
    }

    let retries = &config.retries;
    if retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }
    if retries.base_delay_ms > retries.max_delay_ms {
        errors.push(ValidationError::DelayRange {
            base: retries.base_delay_ms,
            max: retries.max_delay_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
