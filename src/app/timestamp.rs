use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use std::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local-time timestamp prefix for human-readable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanTimestamp {
    pattern: String,
}

impl HumanTimestamp {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// True when chrono understands every specifier in `pattern`.
    pub fn is_valid_pattern(pattern: &str) -> bool {
        !pattern.is_empty()
            && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
    }
}

impl Default for HumanTimestamp {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

impl FormatTime for HumanTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format(&self.pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    #[test]
    fn test_default_pattern_rendering() {
        let at = NaiveDate::from_ymd_opt(2025, 7, 3)
            .unwrap()
            .and_hms_opt(8, 5, 9)
            .unwrap();

        assert_eq!(at.format(DEFAULT_TIME_FORMAT).to_string(), "2025-07-03 08:05:09");
    }

    #[test]
    fn test_format_time_writes_parseable_prefix() {
        let mut rendered = String::new();
        HumanTimestamp::default()
            .format_time(&mut Writer::new(&mut rendered))
            .unwrap();

        assert_eq!(rendered.len(), "YYYY-MM-DD HH:MM:SS".len());
        assert!(NaiveDateTime::parse_from_str(&rendered, DEFAULT_TIME_FORMAT).is_ok());
    }

    #[test]
    fn test_pattern_validation() {
        assert!(HumanTimestamp::is_valid_pattern(DEFAULT_TIME_FORMAT));
        assert!(HumanTimestamp::is_valid_pattern("%H:%M:%S%.3f"));
        assert!(!HumanTimestamp::is_valid_pattern(""));
        assert!(!HumanTimestamp::is_valid_pattern("%Y-%Q"));
    }
}
