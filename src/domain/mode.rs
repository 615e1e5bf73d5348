use std::fmt;

/// Environment variable that selects the runtime mode.
pub const APPENV_VAR: &str = "APPENV";

/// The only value of `APPENV` that selects production behaviour.
pub const PRODUCTION: &str = "production";

/// Runtime mode the logger is configured for.
///
/// Anything other than the exact string `"production"` resolves to
/// `Development`; there is no error for unrecognised values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Production,
    #[default]
    Development,
}

/// Output encoding selected by the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON object per line.
    Structured,
    /// Coloured single-line text with a timestamp prefix.
    HumanReadable,
}

impl Mode {
    pub fn resolve(raw: &str) -> Self {
        if raw == PRODUCTION {
            Mode::Production
        } else {
            Mode::Development
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Mode::Production => Format::Structured,
            Mode::Development => Format::HumanReadable,
        }
    }

    /// Whether this mode duplicates output into the local log file.
    pub fn writes_local_file(&self) -> bool {
        matches!(self, Mode::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Production => "production",
            Mode::Development => "development",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Structured => "structured",
            Format::HumanReadable => "human-readable",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
