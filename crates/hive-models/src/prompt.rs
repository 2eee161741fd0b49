//! Prompt classification results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::taxonomy::{normalize_label, MessagePriority, ParseTaxonomyError, TaskComplexity, WorkerRole};

/// Classified purpose of a free-text user prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Repair broken behavior.
    FixBug,
    /// Build something new.
    AddFeature,
    /// Add or extend tests.
    AddTest,
    /// Write or update documentation.
    UpdateDocs,
    /// Look into something without a known fix.
    Investigate,
    /// Nothing more specific matched.
    #[default]
    General,
}

impl Intent {
    /// Intents in precedence order: the first one whose keywords hit wins.
    pub const PRECEDENCE: [Intent; 5] = [
        Intent::FixBug,
        Intent::AddFeature,
        Intent::AddTest,
        Intent::UpdateDocs,
        Intent::Investigate,
    ];

    /// Snake-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixBug => "fix_bug",
            Self::AddFeature => "add_feature",
            Self::AddTest => "add_test",
            Self::UpdateDocs => "update_docs",
            Self::Investigate => "investigate",
            Self::General => "general",
        }
    }

    /// Worker specialization best suited to this intent.
    pub fn worker_role(&self) -> WorkerRole {
        match self {
            Self::FixBug | Self::AddFeature => WorkerRole::Developer,
            Self::AddTest => WorkerRole::Tester,
            Self::UpdateDocs => WorkerRole::Documenter,
            Self::Investigate => WorkerRole::Analyzer,
            Self::General => WorkerRole::Reviewer,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "fix_bug" => Ok(Self::FixBug),
            "add_feature" => Ok(Self::AddFeature),
            "add_test" => Ok(Self::AddTest),
            "update_docs" => Ok(Self::UpdateDocs),
            "investigate" => Ok(Self::Investigate),
            "general" => Ok(Self::General),
            _ => Err(ParseTaxonomyError::new("intent", s)),
        }
    }
}

/// Routing metadata extracted from a user prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptAnalysis {
    /// The prompt as given.
    pub original_text: String,
    /// Issue number referenced by the prompt, if any.
    pub issue_number: Option<String>,
    /// Classified intent.
    pub intent: Intent,
    /// Estimated priority.
    pub priority: MessagePriority,
    /// Estimated complexity.
    pub complexity: TaskComplexity,
    /// When the prompt was classified.
    pub timestamp: DateTime<Utc>,
    /// The prompt asks for investigation.
    pub requires_investigation: bool,
    /// The prompt signals urgency.
    pub mentions_urgency: bool,
    /// The prompt contains a filename-like token.
    pub mentions_files: bool,
    /// The prompt talks about code.
    pub mentions_code: bool,
    /// The prompt talks about tests.
    pub mentions_test: bool,
}

impl PromptAnalysis {
    /// Analysis with every field at its default.
    pub fn new(original_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            issue_number: None,
            intent: Intent::General,
            priority: MessagePriority::Low,
            complexity: TaskComplexity::Medium,
            timestamp: Utc::now(),
            requires_investigation: false,
            mentions_urgency: false,
            mentions_files: false,
            mentions_code: false,
            mentions_test: false,
        }
    }

    /// Worker role a router should assign this prompt to.
    pub fn routing_hint(&self) -> WorkerRole {
        self.intent.worker_role()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_labels_round_trip() {
        for intent in Intent::PRECEDENCE.into_iter().chain([Intent::General]) {
            assert_eq!(intent.as_str().parse::<Intent>(), Ok(intent));
        }
    }

    #[test]
    fn test_intent_precedence_order() {
        assert_eq!(Intent::PRECEDENCE[0], Intent::FixBug);
        assert_eq!(Intent::PRECEDENCE[4], Intent::Investigate);
        assert!(!Intent::PRECEDENCE.contains(&Intent::General));
    }

    #[test]
    fn test_new_analysis_defaults() {
        let analysis = PromptAnalysis::new("");
        assert_eq!(analysis.issue_number, None);
        assert_eq!(analysis.intent, Intent::General);
        assert_eq!(analysis.priority, MessagePriority::Low);
        assert_eq!(analysis.complexity, TaskComplexity::Medium);
        assert!(!analysis.mentions_files);
        assert_eq!(analysis.routing_hint(), WorkerRole::Reviewer);
    }

    #[test]
    fn test_analysis_serializes_labels() {
        let mut analysis = PromptAnalysis::new("add a login page");
        analysis.intent = Intent::AddFeature;

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["intent"], "add_feature");
        assert_eq!(json["priority"], "low");
        assert_eq!(json["complexity"], "medium");
    }
}
