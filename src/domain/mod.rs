//! Domain layer for log-bootstrap.
//!
//! Contains the types shared across the crate:
//! - `Mode` / `Format`: runtime mode and the output format it selects
//! - `LogRecord`: a structured production record parsed back from its line
//! - `BootstrapError`: failures raised while building the logger

pub mod error;
pub mod mode;
pub mod record;

pub use error::BootstrapError;
pub use mode::{APPENV_VAR, Format, Mode, PRODUCTION};
pub use record::LogRecord;
