//! Elasticsearch index template manager.
//!
//! Applies, lists, shows and deletes legacy index templates, and can push a
//! template's mappings onto the indices that already match its patterns.

pub mod cli;
pub mod client;
pub mod config;
pub mod observability;
pub mod resilience;
pub mod templates;

pub use client::EsClient;
pub use config::ManagerConfig;
pub use templates::TemplateManager;
