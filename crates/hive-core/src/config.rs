//! Shared configuration for Hive.
//!
//! Locates the state directory and the files the detection core reads
//! from it, and bundles them into a [`CoreConfig`].
//!
//! # Storage Structure
//!
//! ```text
//! ~/.hive/
//! ├── templates/        # Pattern definitions (*.yaml, *.yml, *.json)
//! └── classifier.yaml   # Optional prompt classifier keyword tables
//! ```
//!
//! # Environment Variables
//!
//! - `HIVE_STATE_DIR`: Override the base state directory
//! - `HIVE_TEMPLATE_DIR`: Override the template directory
//! - `HIVE_HISTORY_CAPACITY`: Number of detection history entries to keep

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::presentation::DEFAULT_HISTORY_CAPACITY;
use crate::prompt_classifier::{ClassifierConfig, PromptClassifier};
use crate::templates::{LoadReport, TemplateLibrary};

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "HIVE_STATE_DIR";

/// Environment variable for custom template directory.
pub const TEMPLATE_DIR_ENV: &str = "HIVE_TEMPLATE_DIR";

/// Environment variable for the detection history capacity.
pub const HISTORY_CAPACITY_ENV: &str = "HIVE_HISTORY_CAPACITY";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".hive";

const TEMPLATES_SUBDIR: &str = "templates";
const CLASSIFIER_FILE: &str = "classifier.yaml";

/// Get the Hive state directory.
///
/// The state directory is determined by:
/// 1. `HIVE_STATE_DIR` environment variable if set
/// 2. `~/.hive` if home directory is available
/// 3. `.hive` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the template directory.
///
/// Defaults to `<state>/templates/` or `HIVE_TEMPLATE_DIR` env var.
pub fn template_dir() -> PathBuf {
    std::env::var(TEMPLATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(TEMPLATES_SUBDIR))
}

/// Get the classifier keyword file path under `state`.
pub fn classifier_file(state: &Path) -> PathBuf {
    state.join(CLASSIFIER_FILE)
}

/// Parse a history capacity value.
fn parse_capacity(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidEnv {
            var: HISTORY_CAPACITY_ENV,
            value: value.to_string(),
        }),
    }
}

/// Configuration for the detection core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Directory scanned for pattern definitions; `None` disables loading.
    pub template_dir: Option<PathBuf>,
    /// Optional classifier keyword file.
    pub classifier_file: Option<PathBuf>,
    /// Detection history capacity.
    pub history_capacity: usize,
    /// Whether the built-in patterns seed the library.
    pub builtin_patterns: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            classifier_file: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            builtin_patterns: true,
        }
    }
}

impl CoreConfig {
    /// Create a config with built-in patterns and no directory loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the environment.
    ///
    /// The template directory and classifier file are always set; a
    /// missing directory or file is tolerated at load time.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidEnv`] if `HIVE_HISTORY_CAPACITY` is not
    /// a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let history_capacity = match std::env::var(HISTORY_CAPACITY_ENV) {
            Ok(value) => parse_capacity(&value)?,
            Err(_) => DEFAULT_HISTORY_CAPACITY,
        };

        Ok(Self {
            template_dir: Some(template_dir()),
            classifier_file: Some(classifier_file(&state_dir())),
            history_capacity,
            builtin_patterns: true,
        })
    }

    /// Set the template directory.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Set the classifier keyword file.
    pub fn with_classifier_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.classifier_file = Some(path.into());
        self
    }

    /// Set the detection history capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Enable or disable the built-in patterns.
    pub fn with_builtin_patterns(mut self, enabled: bool) -> Self {
        self.builtin_patterns = enabled;
        self
    }

    /// Build the pattern library this config describes.
    ///
    /// Never fails: problems with the template directory end up in the
    /// returned report.
    pub fn build_library(&self) -> (Arc<TemplateLibrary>, LoadReport) {
        let mut library = if self.builtin_patterns {
            TemplateLibrary::builtin()
        } else {
            TemplateLibrary::new()
        };

        let report = match &self.template_dir {
            Some(dir) => library.load_dir(dir),
            None => LoadReport::default(),
        };

        (Arc::new(library), report)
    }

    /// Build the prompt classifier this config describes.
    ///
    /// A missing classifier file means the built-in tables.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn build_classifier(&self) -> Result<PromptClassifier, ConfigError> {
        match &self.classifier_file {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "Loading classifier keywords");
                Ok(PromptClassifier::from_config(ClassifierConfig::from_path(path)?))
            }
            Some(path) => {
                if path.exists() {
                    warn!(path = %path.display(), "Classifier config is not a file, using defaults");
                }
                Ok(PromptClassifier::new())
            }
            None => Ok(PromptClassifier::new()),
        }
    }
}
