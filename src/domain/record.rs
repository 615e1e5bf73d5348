use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A production log line decoded back into its fields.
///
/// Production output is line-delimited JSON with the event flattened into
/// the top-level object, so `message` sits next to `level` and `timestamp`.
/// Any other keys (`target`, event fields, span data) land in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim_end())
    }

    /// Parses every non-blank line of a production stream.
    pub fn parse_stream(stream: &str) -> Result<Vec<Self>, serde_json::Error> {
        stream
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::parse_line)
            .collect()
    }

    pub fn severity(&self) -> Option<tracing::Level> {
        self.level.parse().ok()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
