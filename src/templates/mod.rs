//! Index template handling.
//!
//! # Data Flow
//! ```text
//! template file (JSON)
//!     → file.rs (load, derive name, extract index_patterns / mappings)
//!     → manager.rs (put/get/delete template, propagate mappings)
//!     → EsClient
//! ```

pub mod file;
pub mod manager;

pub use file::{index_patterns, load_template, template_name_from_path, TemplateError};
pub use manager::{IndexFailure, IndexUpdateReport, TemplateManager};
