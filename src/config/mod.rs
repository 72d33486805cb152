//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (--config)
//!     → environment (ES_HOST_PROD, ES_USER_PROD, ES_PASSWORD_PROD, ES_TIMEOUT_SECS)
//!     → --host flag
//!     → validation.rs (semantic checks)
//!     → ManagerConfig (validated, immutable)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{ConnectionConfig, ManagerConfig, ObservabilityConfig, RetryConfig};
pub use validation::ValidationError;
