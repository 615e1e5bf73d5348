use crate::app::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while building a `LoggerHandle`.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to install global subscriber: {0}")]
    GlobalAlreadySet(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

impl BootstrapError {
    /// Process exit status used when the error aborts startup.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::LogFile { .. } | BootstrapError::Config(_) => 1,
            BootstrapError::GlobalAlreadySet(_) => 2,
        }
    }
}
