//! Keyword tables for prompt classification.
//!
//! Tables are bilingual (English and Japanese). Tokens are stored
//! lower-case; see [`PromptClassifier`](super::PromptClassifier) for how
//! they are matched.
//! Category precedence is fixed by field order in each struct, never by
//! anything loaded from a file.

use std::fs;
use std::path::Path;

use hive_models::Intent;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const FIX_BUG: &[&str] = &[
    "fix", "bug", "error", "broken", "crash", "修正", "バグ", "エラー", "不具合",
];
const ADD_FEATURE: &[&str] = &[
    "add", "implement", "feature", "create", "new", "追加", "実装", "機能", "作成",
];
const ADD_TEST: &[&str] = &["test", "coverage", "テスト", "検証"];
const UPDATE_DOCS: &[&str] = &[
    "doc", "readme", "comment", "documentation", "ドキュメント", "文書", "説明",
];
const INVESTIGATE: &[&str] = &[
    "investigate", "analyze", "analyse", "research", "why", "調査", "分析", "原因",
];

const PRIORITY_CRITICAL: &[&str] = &[
    "critical", "urgent", "emergency", "asap", "immediately", "緊急", "至急", "重大",
];
const PRIORITY_HIGH: &[&str] = &["important", "high priority", "soon", "重要", "優先"];
const PRIORITY_MEDIUM: &[&str] = &["medium", "normal", "when possible", "通常", "普通"];

const COMPLEXITY_HIGH: &[&str] = &[
    "complex", "architecture", "refactor", "redesign", "migration", "複雑", "大規模", "設計",
];
const COMPLEXITY_MEDIUM: &[&str] = &["moderate", "several", "multiple", "update", "中程度", "複数", "更新"];
const COMPLEXITY_LOW: &[&str] = &["simple", "small", "minor", "typo", "quick", "簡単", "軽微", "小さ"];

const SIGNAL_INVESTIGATION: &[&str] = &[
    "investigate", "analyze", "analyse", "research", "why", "root cause", "調査", "分析", "原因",
];
const SIGNAL_URGENCY: &[&str] = &[
    "urgent", "asap", "immediately", "emergency", "right now", "緊急", "至急", "急いで",
];
const SIGNAL_CODE: &[&str] = &[
    "code", "function", "class", "method", "variable", "api", "module", "コード", "関数", "クラス",
];
const SIGNAL_TEST: &[&str] = &[
    "test", "pytest", "unittest", "coverage", "テスト",
];

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

/// Trigger tokens per intent, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentKeywords {
    /// Bug reports and repair requests.
    pub fix_bug: Vec<String>,
    /// New functionality.
    pub add_feature: Vec<String>,
    /// Test writing.
    pub add_test: Vec<String>,
    /// Documentation changes.
    pub update_docs: Vec<String>,
    /// Open-ended analysis.
    pub investigate: Vec<String>,
}

impl Default for IntentKeywords {
    fn default() -> Self {
        Self {
            fix_bug: owned(FIX_BUG),
            add_feature: owned(ADD_FEATURE),
            add_test: owned(ADD_TEST),
            update_docs: owned(UPDATE_DOCS),
            investigate: owned(INVESTIGATE),
        }
    }
}

impl IntentKeywords {
    /// Tokens for `intent`; [`Intent::General`] is the fallback and has none.
    pub fn tokens(&self, intent: Intent) -> &[String] {
        match intent {
            Intent::FixBug => &self.fix_bug,
            Intent::AddFeature => &self.add_feature,
            Intent::AddTest => &self.add_test,
            Intent::UpdateDocs => &self.update_docs,
            Intent::Investigate => &self.investigate,
            Intent::General => &[],
        }
    }
}

/// Trigger tokens per priority, highest first. Low is the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityKeywords {
    /// Tokens that make a prompt [`MessagePriority::Critical`](hive_models::MessagePriority::Critical).
    pub critical: Vec<String>,
    /// Tokens for high priority.
    pub high: Vec<String>,
    /// Tokens for medium priority.
    pub medium: Vec<String>,
}

impl Default for PriorityKeywords {
    fn default() -> Self {
        Self {
            critical: owned(PRIORITY_CRITICAL),
            high: owned(PRIORITY_HIGH),
            medium: owned(PRIORITY_MEDIUM),
        }
    }
}

/// Trigger tokens per complexity, highest first. Medium is the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityKeywords {
    /// Large or cross-cutting work.
    pub high: Vec<String>,
    /// Work spanning a few places.
    pub medium: Vec<String>,
    /// Small, local changes.
    pub low: Vec<String>,
}

impl Default for ComplexityKeywords {
    fn default() -> Self {
        Self {
            high: owned(COMPLEXITY_HIGH),
            medium: owned(COMPLEXITY_MEDIUM),
            low: owned(COMPLEXITY_LOW),
        }
    }
}

/// Trigger tokens for the independent boolean signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalKeywords {
    /// Sets `requires_investigation`.
    pub investigation: Vec<String>,
    /// Sets `mentions_urgency`.
    pub urgency: Vec<String>,
    /// Sets `mentions_code`.
    pub code: Vec<String>,
    /// Sets `mentions_test`.
    pub test: Vec<String>,
}

impl Default for SignalKeywords {
    fn default() -> Self {
        Self {
            investigation: owned(SIGNAL_INVESTIGATION),
            urgency: owned(SIGNAL_URGENCY),
            code: owned(SIGNAL_CODE),
            test: owned(SIGNAL_TEST),
        }
    }
}

/// Complete keyword configuration for a [`PromptClassifier`](super::PromptClassifier).
///
/// Every section is optional in YAML; missing sections keep the built-in
/// tables.
///
/// ```
/// use hive_core::prompt_classifier::ClassifierConfig;
///
/// let config = ClassifierConfig::from_yaml_str("priority:\n  critical: [sev1]\n").unwrap();
/// assert_eq!(config.priority.critical, vec!["sev1"]);
/// assert!(!config.intent.fix_bug.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Intent tables, checked in [`Intent::PRECEDENCE`] order.
    pub intent: IntentKeywords,
    /// Priority tables, highest first.
    pub priority: PriorityKeywords,
    /// Complexity tables, highest first.
    pub complexity: ComplexityKeywords,
    /// Independent boolean signals.
    pub signals: SignalKeywords,
}

impl ClassifierConfig {
    /// Parse a YAML keyword configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a YAML keyword configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}
