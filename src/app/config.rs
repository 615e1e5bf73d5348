use super::timestamp::{DEFAULT_TIME_FORMAT, HumanTimestamp};
use crate::domain::{APPENV_VAR, Mode};
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Development log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "app.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
}

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Runtime mode; only "production" selects structured, stdout-only output
    #[arg(long, env = "APPENV", default_value = "")]
    pub appenv: String,

    /// Append-only log file written alongside stdout in development mode
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// strftime pattern for the development timestamp prefix
    #[arg(long, env = "LOG_TIME_FORMAT", default_value = DEFAULT_TIME_FORMAT)]
    pub time_format: String,

    /// Disable ANSI colours in development output
    #[arg(long, env = "LOG_NO_COLOR")]
    pub no_color: bool,

    /// Configuration file path (optional)
    #[serde(skip)]
    #[arg(long, env = "LOG_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Exit right after initialization instead of waiting for Ctrl+C
    #[serde(skip)]
    #[arg(long)]
    pub once: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            appenv: String::new(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            no_color: false,
            config_file: None,
            once: false,
        }
    }
}

impl BootstrapConfig {
    /// Defaults with the mode flag set to `appenv`.
    pub fn for_mode(appenv: impl Into<String>) -> Self {
        Self {
            appenv: appenv.into(),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::resolve(&self.appenv)
    }

    /// Parses CLI args (and their env fallbacks). When a config file is
    /// given it forms the base layer; every flag or env variable that was
    /// actually set still overrides the file.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = BootstrapConfig::command().get_matches_from(args);
        let cli = BootstrapConfig::from_arg_matches(&matches)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

        let Some(path) = cli.config_file.clone() else {
            cli.validate()?;
            return Ok(cli);
        };

        let mut config = Self::read_file(&path)?;
        let explicitly_set = |id: &str| {
            matches!(
                matches.value_source(id),
                Some(ValueSource::CommandLine | ValueSource::EnvVariable)
            )
        };

        if explicitly_set("appenv") {
            config.appenv = cli.appenv;
        }
        if explicitly_set("log_file") {
            config.log_file = cli.log_file;
        }
        if explicitly_set("time_format") {
            config.time_format = cli.time_format;
        }
        if explicitly_set("no_color") {
            config.no_color = cli.no_color;
        }
        config.config_file = Some(path);
        config.once = cli.once;

        config.validate()?;
        Ok(config)
    }

    /// Reads `LOG_CONFIG_FILE` (if set) as the base layer, then applies
    /// `APPENV`, `LOG_FILE`, `LOG_TIME_FORMAT` and `LOG_NO_COLOR` on top.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("LOG_CONFIG_FILE") {
            Ok(path) => {
                let mut from_file = Self::read_file(&path)?;
                from_file.config_file = Some(PathBuf::from(path));
                from_file
            }
            Err(_) => BootstrapConfig::default(),
        };

        load_env_string(APPENV_VAR, &mut config.appenv);
        load_env_path("LOG_FILE", &mut config.log_file);
        load_env_string("LOG_TIME_FORMAT", &mut config.time_format);
        load_env_var("LOG_NO_COLOR", &mut config.no_color)?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode().writes_local_file() && self.log_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "Log file path must not be empty in development mode".to_string(),
            ));
        }

        if !HumanTimestamp::is_valid_pattern(&self.time_format) {
            return Err(ConfigError::InvalidConfig(format!(
                "Invalid time format '{}'",
                self.time_format
            )));
        }

        Ok(())
    }
}

/// Helper function to load and parse an environment variable.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

fn load_env_path(name: &str, target: &mut PathBuf) {
    if let Ok(value) = std::env::var(name) {
        *target = PathBuf::from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BootstrapConfig::default();

        assert_eq!(config.mode(), Mode::Development);
        assert_eq!(config.log_file, PathBuf::from("app.log"));
        assert_eq!(config.time_format, "%Y-%m-%d %H:%M:%S");
        assert!(!config.no_color);
        config.validate().unwrap();
    }

    #[test]
    fn test_for_mode() {
        assert_eq!(BootstrapConfig::for_mode("production").mode(), Mode::Production);
        assert_eq!(BootstrapConfig::for_mode("qa").mode(), Mode::Development);
    }

    #[test]
    fn test_validation() {
        let mut config = BootstrapConfig::default();

        config.time_format = "%Y %Q".to_string();
        assert!(config.validate().is_err());

        config.time_format = DEFAULT_TIME_FORMAT.to_string();
        config.log_file = PathBuf::new();
        assert!(config.validate().is_err());

        // The file is never opened in production, so an empty path is fine.
        config.appenv = "production".to_string();
        config.validate().unwrap();
    }

    #[test]
    fn test_toml_fields_default_when_missing() {
        let config: BootstrapConfig = toml::from_str(r#"appenv = "production""#).unwrap();

        assert_eq!(config.mode(), Mode::Production);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
    }
}
