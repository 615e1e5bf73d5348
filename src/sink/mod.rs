//! Output destinations for the logger.
//!
//! `FanOutWriter` is the composite sink the formatter writes through; in
//! development it holds stdout and the append-only file opened by `file`,
//! wrapped in `PlainText` so colour codes stay out of the file.

pub mod fan_out;
pub mod file;
pub mod plain;

pub use fan_out::{FanOutGuard, FanOutWriter};
pub use file::{LOG_FILE_MODE, open_append};
pub use plain::PlainText;
