#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. BootstrapConfig in config module
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

pub mod app;
pub mod domain;
pub mod sink;
pub mod test_support;

// Re-export main types for easy access
pub use app::{
    BootstrapConfig, LoggerHandle, LoggingSystem, initialize, initialize_from_env,
    initialize_with,
};
pub use domain::{BootstrapError, Format, LogRecord, Mode};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
