//! Closed taxonomies for Hive messages and work.
//!
//! Every enum here is exhaustive on purpose: adding a category forces each
//! `match` over it to be revisited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a taxonomy label cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseTaxonomyError {
    /// Taxonomy being parsed (e.g. "message type").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseTaxonomyError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lowercase a label and fold `-` and spaces into `_`.
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Semantic kind of a message exchanged in the hive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// A request for information or action.
    Request,
    /// A reply to an earlier request.
    Response,
    /// The Queen hands a task to a worker.
    TaskAssignment,
    /// A worker reports a finished task.
    TaskCompletion,
    /// System-level alert (failures, resource problems).
    SystemAlert,
}

impl MessageType {
    /// All message types, in declaration order.
    pub const ALL: [MessageType; 5] = [
        MessageType::Request,
        MessageType::Response,
        MessageType::TaskAssignment,
        MessageType::TaskCompletion,
        MessageType::SystemAlert,
    ];

    /// Snake-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
            Self::TaskAssignment => "task_assignment",
            Self::TaskCompletion => "task_completion",
            Self::SystemAlert => "system_alert",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "request" => Ok(Self::Request),
            "response" => Ok(Self::Response),
            "task_assignment" => Ok(Self::TaskAssignment),
            "task_completion" => Ok(Self::TaskCompletion),
            "system_alert" | "alert" => Ok(Self::SystemAlert),
            _ => Err(ParseTaxonomyError::new("message type", s)),
        }
    }
}

/// Priority levels for hive messages.
///
/// Higher numeric value = higher priority.
/// Critical (5) > Urgent (4) > High (3) > Medium (2) > Low (1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessagePriority {
    /// Low priority (1).
    #[default]
    Low,
    /// Medium priority (2).
    Medium,
    /// High priority (3).
    High,
    /// Urgent priority (4).
    Urgent,
    /// Critical priority (5).
    Critical,
}

impl MessagePriority {
    /// Returns the numeric value of this priority.
    /// Higher value = higher priority.
    pub fn as_value(&self) -> u8 {
        match self {
            MessagePriority::Low => 1,
            MessagePriority::Medium => 2,
            MessagePriority::High => 3,
            MessagePriority::Urgent => 4,
            MessagePriority::Critical => 5,
        }
    }

    /// Inverse of [`as_value`](Self::as_value).
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(MessagePriority::Low),
            2 => Some(MessagePriority::Medium),
            3 => Some(MessagePriority::High),
            4 => Some(MessagePriority::Urgent),
            5 => Some(MessagePriority::Critical),
            _ => None,
        }
    }

    /// Snake-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
            Self::Critical => "critical",
        }
    }
}

impl PartialOrd for MessagePriority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MessagePriority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_value().cmp(&other.as_value())
    }
}

impl fmt::Display for MessagePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessagePriority {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "low" | "1" => Ok(Self::Low),
            "medium" | "2" => Ok(Self::Medium),
            "high" | "3" => Ok(Self::High),
            "urgent" | "4" => Ok(Self::Urgent),
            "critical" | "5" => Ok(Self::Critical),
            _ => Err(ParseTaxonomyError::new("priority", s)),
        }
    }
}

/// Lifecycle state of a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting to be picked up.
    #[default]
    Pending,
    /// A worker is on it.
    InProgress,
    /// Finished successfully.
    Completed,
    /// Finished unsuccessfully.
    Failed,
}

impl TaskStatus {
    /// Snake-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether the task has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" | "inprogress" | "running" => Ok(Self::InProgress),
            "completed" | "complete" | "done" | "success" => Ok(Self::Completed),
            "failed" | "failure" | "error" => Ok(Self::Failed),
            _ => Err(ParseTaxonomyError::new("task status", s)),
        }
    }
}

/// Advisory sizing hint for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskComplexity {
    /// Small, self-contained change.
    Low,
    /// Typical task.
    #[default]
    Medium,
    /// Spans several components.
    High,
    /// Architecture-level work.
    Critical,
}

impl TaskComplexity {
    /// Snake-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for TaskComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskComplexity {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseTaxonomyError::new("task complexity", s)),
        }
    }
}

/// Specialization of a worker agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    /// Writes and changes code.
    Developer,
    /// Writes and runs tests.
    Tester,
    /// Investigates and analyzes.
    Analyzer,
    /// Writes documentation.
    Documenter,
    /// Reviews the work of others.
    Reviewer,
}

impl WorkerRole {
    /// Snake-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Tester => "tester",
            Self::Analyzer => "analyzer",
            Self::Documenter => "documenter",
            Self::Reviewer => "reviewer",
        }
    }
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkerRole {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "developer" | "dev" => Ok(Self::Developer),
            "tester" | "qa" => Ok(Self::Tester),
            "analyzer" | "analyst" => Ok(Self::Analyzer),
            "documenter" | "docs" => Ok(Self::Documenter),
            "reviewer" => Ok(Self::Reviewer),
            _ => Err(ParseTaxonomyError::new("worker role", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(MessagePriority::Critical > MessagePriority::Urgent);
        assert!(MessagePriority::Urgent > MessagePriority::High);
        assert!(MessagePriority::High > MessagePriority::Medium);
        assert!(MessagePriority::Medium > MessagePriority::Low);
    }

    #[test]
    fn test_priority_values() {
        for value in 1..=5 {
            let priority = MessagePriority::from_value(value).expect("valid value");
            assert_eq!(priority.as_value(), value);
        }
        assert_eq!(MessagePriority::from_value(0), None);
        assert_eq!(MessagePriority::from_value(6), None);
    }

    #[test]
    fn test_priority_sorting() {
        let mut priorities = vec![
            MessagePriority::Medium,
            MessagePriority::Critical,
            MessagePriority::Low,
            MessagePriority::Urgent,
        ];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![
                MessagePriority::Low,
                MessagePriority::Medium,
                MessagePriority::Urgent,
                MessagePriority::Critical,
            ]
        );
    }

    #[test]
    fn test_message_type_parse() {
        assert_eq!("task-assignment".parse::<MessageType>(), Ok(MessageType::TaskAssignment));
        assert_eq!("SYSTEM_ALERT".parse::<MessageType>(), Ok(MessageType::SystemAlert));

        let err = "gossip".parse::<MessageType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown message type: gossip");
    }

    #[test]
    fn test_display_matches_serde() {
        for message_type in MessageType::ALL {
            let json = serde_json::to_string(&message_type).unwrap();
            assert_eq!(json, format!("\"{}\"", message_type));
        }
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MessagePriority::default(), MessagePriority::Low);
        assert_eq!(TaskComplexity::default(), TaskComplexity::Medium);
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_terminal() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
    }

    #[test]
    fn test_worker_role_parse() {
        assert_eq!("Developer".parse::<WorkerRole>(), Ok(WorkerRole::Developer));
        assert_eq!("qa".parse::<WorkerRole>(), Ok(WorkerRole::Tester));
        assert!("manager".parse::<WorkerRole>().is_err());
    }
}
