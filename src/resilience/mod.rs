//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Idempotent request to Elasticsearch:
//!     → request timeout (enforced by the reqwest client)
//!     → On transport error or 429/5xx: retries.rs (retry with backoff.rs delay)
//! ```

pub mod backoff;
pub mod retries;

pub use retries::{retry_idempotent, Retryable};
