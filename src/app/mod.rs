pub mod config;
pub mod level;
pub mod logging_system;
pub mod timestamp;

pub use config::{BootstrapConfig, ConfigError, DEFAULT_LOG_FILE};
pub use level::LogLevel;
pub use logging_system::{
    Destination, LoggerHandle, LoggerSettings, LoggingSystem, initialize, initialize_from_env,
    initialize_with,
};
pub use timestamp::{DEFAULT_TIME_FORMAT, HumanTimestamp};

use anyhow::Context;
use tracing::info;

pub struct App {
    config: BootstrapConfig,
    logger: LoggerHandle,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = BootstrapConfig::from_args(args)?;
        Ok(Self::from_config(config))
    }

    /// Initializes the logger; exits the process if that fails.
    pub fn from_config(config: BootstrapConfig) -> Self {
        let logger = initialize_with(&config);
        Self { config, logger }
    }

    pub fn logger(&self) -> &LoggerHandle {
        &self.logger
    }

    pub async fn run(self) -> anyhow::Result<()> {
        self.logger
            .install_global()
            .context("Failed to install logger")?;

        info!(
            version = crate::VERSION,
            format = %self.logger.format(),
            destinations = ?self.logger.destinations(),
            "log-bootstrap started"
        );

        if !self.config.once {
            info!("log-bootstrap is running. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received");
        }

        info!("log-bootstrap stopped.");
        self.logger
            .shutdown()
            .context("Failed to flush log destinations")?;
        Ok(())
    }
}

// Main entry point for the application
pub async fn main() -> anyhow::Result<()> {
    let app = App::from_args(std::env::args_os()).context("Configuration error")?;
    app.run().await
}
