//! One-stop wiring of detector, classifier and formatter.
//!
//! The detector and formatter share a single [`TemplateLibrary`], so a
//! pattern loaded from disk is both matched and displayed with its own
//! configuration.

use std::sync::Arc;

use hive_models::{PromptAnalysis, TemplateMatch};
use serde::Serialize;
use tracing::info;

use crate::config::CoreConfig;
use crate::detector::TemplateDetector;
use crate::error::ConfigError;
use crate::presentation::TemplateFormatter;
use crate::prompt_classifier::PromptClassifier;
use crate::templates::{LoadReport, TemplateLibrary};

/// Detection result for one inbound message.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedMessage {
    /// Matches in library order.
    pub matches: Vec<TemplateMatch>,
    /// Human-readable panel(s).
    pub rendered: String,
}

impl ProcessedMessage {
    /// Whether any template was found.
    pub fn has_template(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Detection, classification and presentation over one library.
#[derive(Debug, Clone)]
pub struct HiveEngine {
    detector: TemplateDetector,
    classifier: PromptClassifier,
    formatter: TemplateFormatter,
}

impl Default for HiveEngine {
    fn default() -> Self {
        Self::new(
            Arc::new(TemplateLibrary::builtin()),
            PromptClassifier::new(),
        )
    }
}

impl HiveEngine {
    /// Create an engine over `library`.
    pub fn new(library: Arc<TemplateLibrary>, classifier: PromptClassifier) -> Self {
        Self {
            detector: TemplateDetector::new(Arc::clone(&library)),
            classifier,
            formatter: TemplateFormatter::new(library),
        }
    }

    /// Build an engine from configuration.
    ///
    /// Returns the template load report alongside; a bad pattern file
    /// never prevents the engine from starting.
    ///
    /// # Errors
    /// Returns an error if the classifier keyword file is unreadable.
    pub fn from_config(config: &CoreConfig) -> Result<(Self, LoadReport), ConfigError> {
        let (library, report) = config.build_library();
        let classifier = config.build_classifier()?;

        info!(
            patterns = library.len(),
            diagnostics = report.diagnostics.len(),
            history_capacity = config.history_capacity,
            "Hive engine ready"
        );

        let mut engine = Self::new(library, classifier);
        engine.formatter = engine.formatter.with_history_capacity(config.history_capacity);
        Ok((engine, report))
    }

    /// The pattern library.
    pub fn library(&self) -> &Arc<TemplateLibrary> {
        self.detector.library()
    }

    pub fn detector(&self) -> &TemplateDetector {
        &self.detector
    }

    pub fn classifier(&self) -> &PromptClassifier {
        &self.classifier
    }

    pub fn formatter(&self) -> &TemplateFormatter {
        &self.formatter
    }

    /// Detect templates in `text`, render them and record the detection.
    pub fn process_message(&mut self, text: &str) -> ProcessedMessage {
        let matches = self.detector.detect_all(text);
        let rendered = self.formatter.format_detection(text, &matches);
        ProcessedMessage { matches, rendered }
    }

    /// Classify a free-text user prompt.
    pub fn classify(&self, prompt: &str) -> PromptAnalysis {
        self.classifier.analyze(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_models::{Intent, TemplateType};

    #[test]
    fn test_process_message_records_history() {
        let mut engine = HiveEngine::default();

        let processed = engine.process_message("TASK:T1:deploy");
        assert!(processed.has_template());
        assert_eq!(processed.matches[0].template_type, TemplateType::Task);
        assert!(processed.rendered.contains("TASK ASSIGNMENT"));

        let processed = engine.process_message("just chatting");
        assert!(!processed.has_template());
        assert!(processed.rendered.contains("NO TEMPLATE DETECTED"));

        assert_eq!(engine.formatter().history().len(), 2);
    }

    #[test]
    fn test_from_config_applies_capacity() {
        let config = CoreConfig::new().with_history_capacity(1);
        let (mut engine, report) = HiveEngine::from_config(&config).unwrap();
        assert!(report.is_clean());

        engine.process_message("a");
        engine.process_message("b");
        assert_eq!(engine.formatter().history().len(), 1);
    }

    #[test]
    fn test_classify() {
        let engine = HiveEngine::default();
        assert_eq!(engine.classify("add a feature").intent, Intent::AddFeature);
    }
}
