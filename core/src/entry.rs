use serde::Serialize;

use crate::severity::severity_score;

/// One record derived from one well-formed input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Opaque; never parsed as a date.
    pub timestamp: String,
    pub host: String,
    /// Severity token exactly as it appeared in the file.
    pub severity_raw: String,
    pub severity_score: i32,
    pub message: String,
}

impl LogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        host: impl Into<String>,
        severity_raw: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let severity_raw = severity_raw.into();
        Self {
            timestamp: timestamp.into(),
            host: host.into(),
            severity_score: severity_score(&severity_raw),
            severity_raw,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_derives_score_and_keeps_raw_token() {
        let entry = LogEntry::new("2024-01-01T00:00:00Z", "web-1", "High", "disk full");
        assert_eq!(entry.severity_raw, "High");
        assert_eq!(entry.severity_score, 8);
    }
}
