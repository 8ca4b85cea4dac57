//! アクティビティログ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 必須書類がすべて揃った時に一度だけ記録するメッセージ
pub const ALL_REQUIRED_UPLOADED: &str = "All required documents uploaded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Info,
    Upload,
    Removal,
    Milestone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub message: String,
}

/// 追記のみのログ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ActivityKind, message: impl Into<String>, now: DateTime<Utc>) {
        self.entries.push(ActivityEntry {
            timestamp: now,
            kind,
            message: message.into(),
        });
    }

    /// 同じメッセージが未記録の場合のみ追記
    ///
    /// 追記した場合 true
    pub fn push_unique(&mut self, kind: ActivityKind, message: &str, now: DateTime<Utc>) -> bool {
        if self.contains(message) {
            return false;
        }
        self.push(kind, message, now);
        true
    }

    pub fn contains(&self, message: &str) -> bool {
        self.entries.iter().any(|e| e.message == message)
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_push_keeps_order() {
        let mut log = ActivityLog::new();
        log.push(ActivityKind::Upload, "first", at(1));
        log.push(ActivityKind::Removal, "second", at(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message, "first");
        assert_eq!(log.entries()[1].kind, ActivityKind::Removal);
    }

    #[test]
    fn test_push_unique_dedups_by_message() {
        let mut log = ActivityLog::new();
        assert!(log.push_unique(ActivityKind::Milestone, ALL_REQUIRED_UPLOADED, at(1)));
        assert!(!log.push_unique(ActivityKind::Milestone, ALL_REQUIRED_UPLOADED, at(2)));
        assert!(!log.push_unique(ActivityKind::Info, ALL_REQUIRED_UPLOADED, at(3)));
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].timestamp, at(1));
    }

    #[test]
    fn test_serialize_as_array() {
        let mut log = ActivityLog::new();
        log.push(ActivityKind::Info, "hello", at(0));

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"kind\":\"info\""));
    }
}
