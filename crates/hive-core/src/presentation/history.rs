//! Rolling history of formatted detections.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use hive_models::{TemplateMatch, TemplateType};
use serde::{Deserialize, Serialize};

/// Default number of entries kept before the oldest are evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// One formatted detection call.
///
/// Entries are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionHistoryEntry {
    /// When the detection was formatted.
    pub timestamp: DateTime<Utc>,
    /// The original message text.
    pub message: String,
    /// Number of matches found.
    pub match_count: usize,
    /// Template types of the matches, in match order.
    pub template_types: Vec<TemplateType>,
}

impl DetectionHistoryEntry {
    /// Build an entry for `message` and its matches, stamped now.
    pub fn new(message: impl Into<String>, matches: &[TemplateMatch]) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            match_count: matches.len(),
            template_types: matches.iter().map(|m| m.template_type).collect(),
        }
    }
}

/// Append-only, bounded log of detections in arrival order.
///
/// Single writer: callers sharing a history across threads must wrap it in
/// a lock.
#[derive(Debug, Clone)]
pub struct DetectionHistory {
    entries: VecDeque<DetectionHistoryEntry>,
    capacity: usize,
}

impl Default for DetectionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl DetectionHistory {
    /// Create a history keeping at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded (or everything was evicted).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, evicting the oldest when full.
    pub fn push(&mut self, entry: DetectionHistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Record a detection and return the new entry.
    pub fn record(&mut self, message: &str, matches: &[TemplateMatch]) -> &DetectionHistoryEntry {
        self.push(DetectionHistoryEntry::new(message, matches));
        // push always leaves at least one entry behind
        &self.entries[self.entries.len() - 1]
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl DoubleEndedIterator<Item = &DetectionHistoryEntry> + '_ {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// Total matches across retained entries.
    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|e| e.match_count).sum()
    }

    /// Serialize the retained entries, oldest first.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, match_count: usize) -> DetectionHistoryEntry {
        DetectionHistoryEntry {
            timestamp: Utc::now(),
            message: message.to_string(),
            match_count,
            template_types: vec![TemplateType::Task; match_count],
        }
    }

    fn messages<'a>(iter: impl Iterator<Item = &'a DetectionHistoryEntry>) -> Vec<&'a str> {
        iter.map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_recent_window() {
        let mut history = DetectionHistory::default();
        for i in 0..5 {
            history.push(entry(&format!("m{}", i), i));
        }

        assert_eq!(messages(history.recent(2)), vec!["m3", "m4"]);
        assert_eq!(messages(history.recent(5)).len(), 5);
        assert_eq!(messages(history.recent(50)), vec!["m0", "m1", "m2", "m3", "m4"]);
        assert!(messages(history.recent(0)).is_empty());
    }

    #[test]
    fn test_recent_on_empty_history() {
        let history = DetectionHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.recent(3).count(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = DetectionHistory::new(3);
        for i in 0..5 {
            history.push(entry(&format!("m{}", i), 1));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(messages(history.recent(10)), vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = DetectionHistory::new(0);
        history.push(entry("a", 0));
        history.push(entry("b", 0));

        assert_eq!(history.capacity(), 1);
        assert_eq!(messages(history.recent(1)), vec!["b"]);
    }

    #[test]
    fn test_total_matches_and_json() {
        let mut history = DetectionHistory::default();
        history.push(entry("a", 2));
        history.push(entry("b", 0));

        assert_eq!(history.total_matches(), 2);

        let json: serde_json::Value = serde_json::from_str(&history.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["message"], "a");
        assert_eq!(json[0]["template_types"][1], "task");
        assert_eq!(json[1]["match_count"], 0);
    }
}
