//! Template types and detection results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::taxonomy::{normalize_label, MessageType, ParseTaxonomyError};

/// Kind of structured directive a template pattern recognizes.
///
/// A superset of [`MessageType`]: the hive-specific variants (task,
/// worker result, queen report, approval) each fold onto one message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// `TASK:<id>:<instruction>` handed to a worker.
    Task,
    /// A worker reporting back on a task.
    WorkerResult,
    /// The Queen's progress report.
    QueenReport,
    /// Approval or rejection of a task's outcome.
    Approval,
    /// Generic request.
    Request,
    /// Generic response.
    Response,
    /// Explicit task assignment.
    TaskAssignment,
    /// Explicit task completion.
    TaskCompletion,
    /// System alert.
    SystemAlert,
}

impl TemplateType {
    /// Snake-case key, as used in pattern definition files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::WorkerResult => "worker_result",
            Self::QueenReport => "queen_report",
            Self::Approval => "approval",
            Self::Request => "request",
            Self::Response => "response",
            Self::TaskAssignment => "task_assignment",
            Self::TaskCompletion => "task_completion",
            Self::SystemAlert => "system_alert",
        }
    }

    /// The message type this template carries.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Task | Self::TaskAssignment => MessageType::TaskAssignment,
            Self::WorkerResult | Self::TaskCompletion => MessageType::TaskCompletion,
            Self::QueenReport | Self::Approval | Self::Response => MessageType::Response,
            Self::Request => MessageType::Request,
            Self::SystemAlert => MessageType::SystemAlert,
        }
    }
}

impl From<MessageType> for TemplateType {
    fn from(message_type: MessageType) -> Self {
        match message_type {
            MessageType::Request => Self::Request,
            MessageType::Response => Self::Response,
            MessageType::TaskAssignment => Self::TaskAssignment,
            MessageType::TaskCompletion => Self::TaskCompletion,
            MessageType::SystemAlert => Self::SystemAlert,
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "task" => Ok(Self::Task),
            "worker_result" => Ok(Self::WorkerResult),
            "queen_report" => Ok(Self::QueenReport),
            "approval" => Ok(Self::Approval),
            other => other
                .parse::<MessageType>()
                .map(Self::from)
                .map_err(|_| ParseTaxonomyError::new("template type", s)),
        }
    }
}

/// One successful application of a template pattern to a text.
///
/// `groups` are positional: index `i` holds capture group `i + 1` of the
/// pattern, or an empty string when that group did not participate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMatch {
    /// Kind of template matched.
    pub template_type: TemplateType,
    /// The matched substring.
    pub full_match: String,
    /// Captured fields, in pattern order.
    pub groups: Vec<String>,
    /// How well-formed the match is, in `[0, 1]`.
    pub confidence: f64,
    /// Name of the pattern that produced this match.
    pub pattern: String,
    /// Byte range of `full_match` within the scanned text.
    pub span: (usize, usize),
}

impl TemplateMatch {
    /// Captured field at `index`, if the group exists and is non-empty.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups
            .get(index)
            .map(String::as_str)
            .filter(|g| !g.is_empty())
    }

    /// Message type carried by this match.
    pub fn message_type(&self) -> MessageType {
        self.template_type.message_type()
    }
}
