//! Observability subsystem.
//!
//! Only structured logging through `tracing`; the tool is short-lived so
//! there is nothing to scrape.

pub mod logging;

pub use logging::init_logging;
