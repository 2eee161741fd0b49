//! Heuristic classification of free-text user prompts.
//!
//! Turns a prompt into routing metadata: referenced issue number, intent,
//! priority, complexity, and a handful of independent content signals.
//! English keywords match whole words (with simple inflections), Japanese
//! keywords match anywhere. Everything is keyword/regex based and total:
//! every input, including the empty string, yields a fully populated
//! [`PromptAnalysis`].
//!
//! # Precedence
//!
//! - Intent: fix_bug > add_feature > add_test > update_docs > investigate,
//!   falling back to general.
//! - Priority: critical > high > medium, falling back to **low**.
//! - Complexity: high > medium > low, falling back to **medium**.
//!
//! ```
//! use hive_core::prompt_classifier::parse_user_prompt;
//! use hive_models::{Intent, MessagePriority};
//!
//! let analysis = parse_user_prompt("Please fix the urgent bug in auth.py");
//! assert_eq!(analysis.intent, Intent::FixBug);
//! assert_eq!(analysis.priority, MessagePriority::Critical);
//! assert!(analysis.mentions_files);
//! ```

mod keywords;

use std::sync::LazyLock;

use chrono::Utc;
use hive_models::{Intent, MessagePriority, PromptAnalysis, TaskComplexity};
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::templates::PATTERN_SIZE_LIMIT;

pub use keywords::{
    ClassifierConfig, ComplexityKeywords, IntentKeywords, PriorityKeywords, SignalKeywords,
};

/// GitHub-style issue URL path, e.g. `/issues/42`.
static ISSUE_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/issues/(\d+)").expect("Invalid issue URL regex"));

/// Loose in-text issue mention, e.g. `issue #7`, `Issue 12`, `issue#3`.
static ISSUE_MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)issue\s*#?\s*(\d+)").expect("Invalid issue mention regex"));

/// Filename-like token: word/path characters, a dot, an alphabetic extension.
static FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w/\-]+\.[A-Za-z]+\b").expect("Invalid filename regex"));

static DEFAULT_CLASSIFIER: LazyLock<PromptClassifier> = LazyLock::new(PromptClassifier::new);

/// Classify a prompt with the built-in keyword tables.
pub fn parse_user_prompt(text: &str) -> PromptAnalysis {
    DEFAULT_CLASSIFIER.analyze(text)
}

/// Extract an issue number, preferring a URL path over a loose mention.
pub fn extract_issue_number(text: &str) -> Option<String> {
    ISSUE_URL_REGEX
        .captures(text)
        .or_else(|| ISSUE_MENTION_REGEX.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether `text` contains a filename-like token.
pub fn mentions_file(text: &str) -> bool {
    FILENAME_REGEX.is_match(text)
}

/// Inflections accepted after an English keyword (`fix` also hits `fixes`, `fixed`).
const WORD_SUFFIXES: &str = "(?:s|es|d|ed|ing)?";

/// Compiled trigger tokens for one category.
///
/// ASCII tokens match as whole words (plus [`WORD_SUFFIXES`]), so `test`
/// does not fire on "latest". Other tokens (Japanese) have no word
/// boundaries and match as substrings.
#[derive(Debug, Clone, Default)]
struct TokenSet {
    words: Option<Regex>,
    fragments: Vec<String>,
}

impl TokenSet {
    fn new(tokens: &[String]) -> Self {
        let mut words = Vec::new();
        let mut fragments = Vec::new();
        for token in tokens.iter().map(|t| t.trim().to_lowercase()) {
            if token.is_empty() {
                continue;
            }
            if token.is_ascii() {
                words.push(regex::escape(&token));
            } else {
                fragments.push(token);
            }
        }

        let words = if words.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)\b(?:{}){}\b", words.join("|"), WORD_SUFFIXES);
            match RegexBuilder::new(&pattern).size_limit(PATTERN_SIZE_LIMIT).build() {
                Ok(regex) => Some(regex),
                Err(error) => {
                    warn!(error = %error, "Keyword list too large, dropping English tokens");
                    None
                }
            }
        };

        Self { words, fragments }
    }

    /// Whether any token occurs in the lower-cased prompt.
    fn hits(&self, lower: &str) -> bool {
        self.words.as_ref().is_some_and(|r| r.is_match(lower))
            || self.fragments.iter().any(|f| lower.contains(f.as_str()))
    }
}

/// Keyword-driven prompt classifier.
///
/// Holds immutable, ordered keyword tables. Category order is encoded in
/// the `Vec`s below and is the tie-break contract when tables overlap.
#[derive(Debug, Clone)]
pub struct PromptClassifier {
    intents: Vec<(Intent, TokenSet)>,
    priorities: Vec<(MessagePriority, TokenSet)>,
    complexities: Vec<(TaskComplexity, TokenSet)>,
    investigation: TokenSet,
    urgency: TokenSet,
    code: TokenSet,
    test: TokenSet,
}

impl Default for PromptClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptClassifier {
    /// Create a classifier with the built-in keyword tables.
    pub fn new() -> Self {
        Self::from_config(ClassifierConfig::default())
    }

    /// Create a classifier from a keyword configuration.
    pub fn from_config(config: ClassifierConfig) -> Self {
        let ClassifierConfig {
            intent,
            priority,
            complexity,
            signals,
        } = config;

        Self {
            intents: Intent::PRECEDENCE
                .iter()
                .map(|&label| (label, TokenSet::new(intent.tokens(label))))
                .collect(),
            priorities: vec![
                (MessagePriority::Critical, TokenSet::new(&priority.critical)),
                (MessagePriority::High, TokenSet::new(&priority.high)),
                (MessagePriority::Medium, TokenSet::new(&priority.medium)),
            ],
            complexities: vec![
                (TaskComplexity::High, TokenSet::new(&complexity.high)),
                (TaskComplexity::Medium, TokenSet::new(&complexity.medium)),
                (TaskComplexity::Low, TokenSet::new(&complexity.low)),
            ],
            investigation: TokenSet::new(&signals.investigation),
            urgency: TokenSet::new(&signals.urgency),
            code: TokenSet::new(&signals.code),
            test: TokenSet::new(&signals.test),
        }
    }

    /// Classify a prompt.
    pub fn analyze(&self, text: &str) -> PromptAnalysis {
        let lower = text.to_lowercase();

        let analysis = PromptAnalysis {
            original_text: text.to_string(),
            issue_number: extract_issue_number(text),
            intent: self.detect_intent(&lower),
            priority: self.estimate_priority(&lower),
            complexity: self.estimate_complexity(&lower),
            timestamp: Utc::now(),
            requires_investigation: self.investigation.hits(&lower),
            mentions_urgency: self.urgency.hits(&lower),
            mentions_files: mentions_file(text),
            mentions_code: self.code.hits(&lower),
            mentions_test: self.test.hits(&lower),
        };

        debug!(
            intent = %analysis.intent,
            priority = %analysis.priority,
            complexity = %analysis.complexity,
            issue = ?analysis.issue_number,
            "Classified prompt"
        );

        analysis
    }

    /// First intent whose keywords appear, or [`Intent::General`].
    fn detect_intent(&self, lower: &str) -> Intent {
        first_hit(&self.intents, lower).unwrap_or(Intent::General)
    }

    /// First priority whose keywords appear, or [`MessagePriority::Low`].
    fn estimate_priority(&self, lower: &str) -> MessagePriority {
        first_hit(&self.priorities, lower).unwrap_or(MessagePriority::Low)
    }

    /// First complexity whose keywords appear, or [`TaskComplexity::Medium`].
    fn estimate_complexity(&self, lower: &str) -> TaskComplexity {
        first_hit(&self.complexities, lower).unwrap_or(TaskComplexity::Medium)
    }
}

fn first_hit<T: Copy>(table: &[(T, TokenSet)], lower: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, tokens)| tokens.hits(lower))
        .map(|(label, _)| *label)
}
