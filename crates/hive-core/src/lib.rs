//! Hive Core - structured-message detection for the Queen/Worker coordinator.
//!
//! This crate provides the message-handling logic shared by every Hive
//! interface:
//!
//! - **templates**: Named, ordered pattern library and its directory loader
//! - **detector**: Find every template occurrence in message text
//! - **prompt_classifier**: Heuristic routing metadata for user prompts
//! - **presentation**: Human-readable panels and detection history
//! - **config**: State directory paths and core configuration
//! - **engine**: Detector, classifier and formatter wired together

pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod presentation;
pub mod prompt_classifier;
pub mod templates;

// Re-export commonly used items for convenience
pub use config::{classifier_file, state_dir, template_dir, CoreConfig};
pub use engine::{HiveEngine, ProcessedMessage};
pub use error::{ConfigError, Result, TemplateError};

pub use detector::{score_match, TemplateDetector};
pub use presentation::{
    truncate_for_display, DetectionHistory, DetectionHistoryEntry, TemplateFormatter,
};
pub use prompt_classifier::{parse_user_prompt, ClassifierConfig, PromptClassifier};
pub use templates::{
    DisplayConfig, LoadDiagnostic, LoadReport, PatternDefinition, TemplateLibrary, TemplatePattern,
};
