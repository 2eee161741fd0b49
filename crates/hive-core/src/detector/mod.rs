//! Template detection over raw message text.
//!
//! The detector scans text against every pattern of a shared
//! [`TemplateLibrary`] and returns one [`TemplateMatch`] per hit, in
//! library order and then text order. Results are never re-sorted by
//! confidence; callers that want the best match ask for it explicitly.
//!
//! Detection is a pure function of the library and the input text. No
//! match is not an error: it is an empty result.
//!
//! ```
//! use hive_core::detector::TemplateDetector;
//!
//! let detector = TemplateDetector::with_builtin();
//! let matches = detector.detect_all("TASK:TEMPLATE_004:実装を開始してください。");
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].groups, vec!["TEMPLATE_004", "実装を開始してください。"]);
//! ```

mod scoring;

use std::sync::Arc;

use hive_models::{TemplateMatch, TemplateType};
use regex::Captures;
use tracing::debug;

use crate::templates::{TemplateLibrary, TemplatePattern};

pub use self::scoring::{score_match, GENERIC_MATCH_FACTOR, MALFORMED_PENALTY};

/// Pattern-based template detector.
#[derive(Debug, Clone)]
pub struct TemplateDetector {
    library: Arc<TemplateLibrary>,
}

impl TemplateDetector {
    /// Create a detector over a shared library.
    pub fn new(library: Arc<TemplateLibrary>) -> Self {
        Self { library }
    }

    /// Create a detector over the built-in hive patterns.
    pub fn with_builtin() -> Self {
        Self::new(Arc::new(TemplateLibrary::builtin()))
    }

    /// The library this detector matches against.
    pub fn library(&self) -> &Arc<TemplateLibrary> {
        &self.library
    }

    /// Find every template occurrence in `text`.
    pub fn detect_all(&self, text: &str) -> Vec<TemplateMatch> {
        let matches: Vec<TemplateMatch> = self
            .library
            .patterns()
            .iter()
            .flat_map(|pattern| {
                pattern
                    .regex()
                    .captures_iter(text)
                    .map(move |caps| build_match(pattern, &caps))
            })
            .collect();

        debug!(
            patterns = self.library.len(),
            text_len = text.len(),
            matches = matches.len(),
            "Template detection complete"
        );

        matches
    }

    /// First match in library order, if any.
    pub fn detect_first(&self, text: &str) -> Option<TemplateMatch> {
        self.library.patterns().iter().find_map(|pattern| {
            pattern
                .regex()
                .captures(text)
                .map(|caps| build_match(pattern, &caps))
        })
    }

    /// Whether `text` contains any template.
    pub fn has_template(&self, text: &str) -> bool {
        self.library
            .patterns()
            .iter()
            .any(|pattern| pattern.regex().is_match(text))
    }

    /// Matches of a single template type, in library order.
    pub fn detect_type(&self, text: &str, template_type: TemplateType) -> Vec<TemplateMatch> {
        self.library
            .patterns()
            .iter()
            .filter(|pattern| pattern.template_type == template_type)
            .flat_map(|pattern| {
                pattern
                    .regex()
                    .captures_iter(text)
                    .map(move |caps| build_match(pattern, &caps))
            })
            .collect()
    }
}

/// Turn one regex hit into a scored [`TemplateMatch`].
fn build_match(pattern: &TemplatePattern, caps: &Captures<'_>) -> TemplateMatch {
    // Group 0 always participates in a successful match.
    let whole = caps.get(0);
    let full_match = whole.map(|m| m.as_str()).unwrap_or_default();
    let span = whole.map(|m| (m.start(), m.end())).unwrap_or_default();

    let groups: Vec<String> = (1..=pattern.group_count())
        .map(|i| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default())
        .collect();

    let confidence = score_match(pattern, full_match, &groups);

    TemplateMatch {
        template_type: pattern.template_type,
        full_match: full_match.to_string(),
        groups,
        confidence,
        pattern: pattern.name.clone(),
        span,
    }
}
