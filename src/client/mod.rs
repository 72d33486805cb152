//! Elasticsearch client subsystem.
//!
//! # Data Flow
//! ```text
//! ConnectionConfig (host, credentials, timeout)
//!     → client.rs (reqwest client, basic auth, retries for GETs)
//!     → types.rs (EsError from transport failures and error bodies)
//! ```
//!
//! # Security Constraints
//! - Credentials only come from config or environment
//! - Never log or Debug-print the password

#[allow(clippy::module_inception)]
pub mod client;
pub mod types;

pub use client::EsClient;
pub use types::{EsError, EsResult};
