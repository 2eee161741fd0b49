//! Template pattern library.
//!
//! A [`TemplateLibrary`] is an ordered list of named [`TemplatePattern`]s.
//! Order is significant: the detector walks patterns in library order and
//! never re-sorts its output, so the library order is the match order.
//!
//! # Loading
//!
//! Definitions live one per file in a directory (YAML or JSON, see
//! [`PatternDefinition`]). Loading is soft-failing: a bad file becomes a
//! [`LoadDiagnostic`] and the rest of the directory still loads. A
//! definition whose template type is not recognized is ignored, so new
//! pattern files can be staged before the code that consumes them exists.
//!
//! ```
//! use hive_core::templates::TemplateLibrary;
//! use hive_models::TemplateType;
//!
//! let library = TemplateLibrary::builtin();
//! let task = library.get("task").unwrap();
//!
//! assert_eq!(task.template_type, TemplateType::Task);
//! assert_eq!(task.fields, vec!["task_id", "instruction"]);
//! ```

mod builtin;
mod definition;


use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use hive_models::TemplateType;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, TemplateError};

pub use builtin::builtin_patterns;
pub use definition::PatternDefinition;

/// Upper bound on a compiled pattern's size, in bytes.
pub const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// How a template is presented to a human.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Glyph shown before the title.
    pub icon: String,
    /// Panel title.
    pub title: String,
    /// Body template; `{field}` placeholders are replaced by captured groups.
    pub format: String,
}

impl DisplayConfig {
    /// Create a display descriptor.
    pub fn new(icon: impl Into<String>, title: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            format: format.into(),
        }
    }
}

/// A named, compiled template pattern.
#[derive(Debug, Clone)]
pub struct TemplatePattern {
    /// Unique key within a library.
    pub name: String,
    /// Kind of directive this pattern recognizes.
    pub template_type: TemplateType,
    /// Distinguishing literal prefix (e.g. `TASK:`), if any.
    pub keyword: Option<String>,
    /// One name per capture group, in group order.
    pub fields: Vec<String>,
    /// Presentation descriptor.
    pub display: DisplayConfig,
    regex: Regex,
}

impl TemplatePattern {
    /// Compile and validate a pattern.
    ///
    /// When `fields` is empty, groups are named `group_1`, `group_2`, ...
    pub fn new(
        name: impl Into<String>,
        template_type: TemplateType,
        pattern: &str,
        fields: Vec<String>,
        display: DisplayConfig,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }

        let regex = RegexBuilder::new(pattern)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|source| TemplateError::InvalidPattern {
                name: name.clone(),
                source,
            })?;

        let groups = regex.captures_len() - 1;
        let fields = if fields.is_empty() {
            (1..=groups).map(|i| format!("group_{}", i)).collect()
        } else if fields.len() != groups {
            return Err(TemplateError::FieldMismatch {
                name,
                fields: fields.len(),
                groups,
            });
        } else {
            fields
        };

        Ok(Self {
            name,
            template_type,
            keyword: None,
            fields,
            display,
            regex,
        })
    }

    /// Set the distinguishing keyword prefix.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// The compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Number of capture groups (excluding the implicit whole-match group).
    pub fn group_count(&self) -> usize {
        self.fields.len()
    }
}

/// A definition file that could not be loaded.
#[derive(Debug)]
pub struct LoadDiagnostic {
    /// File the definition came from.
    pub path: PathBuf,
    /// Why it was skipped.
    pub error: TemplateError,
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Outcome of loading a pattern directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of patterns that were loaded (new or replacing).
    pub loaded: Vec<String>,
    /// Names of definitions ignored because their type key is unknown.
    pub ignored: Vec<String>,
    /// Non-fatal problems, one per bad file.
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    /// Whether every definition file loaded cleanly.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Ordered, read-only-after-construction set of template patterns.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    patterns: Vec<TemplatePattern>,
}

impl TemplateLibrary {
    /// Create an empty library.
    ///
    /// An empty library is valid: detection against it always returns no matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library holding the built-in hive patterns.
    pub fn builtin() -> Self {
        Self {
            patterns: builtin_patterns(),
        }
    }

    /// Load a library from a directory, without built-ins.
    pub fn from_dir(dir: &Path) -> (Self, LoadReport) {
        let mut library = Self::new();
        let report = library.load_dir(dir);
        (library, report)
    }

    /// Add a pattern, replacing one with the same name in place.
    ///
    /// Returns `true` if an existing pattern was replaced.
    pub fn insert(&mut self, pattern: TemplatePattern) -> bool {
        if let Some(existing) = self.patterns.iter_mut().find(|p| p.name == pattern.name) {
            *existing = pattern;
            true
        } else {
            self.patterns.push(pattern);
            false
        }
    }

    /// Get a pattern by name.
    pub fn get(&self, name: &str) -> Option<&TemplatePattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Patterns in library order.
    pub fn patterns(&self) -> &[TemplatePattern] {
        &self.patterns
    }

    /// First pattern of the given type.
    pub fn first_of_type(&self, template_type: TemplateType) -> Option<&TemplatePattern> {
        self.patterns.iter().find(|p| p.template_type == template_type)
    }

    /// Display descriptor for a template type (from its first pattern).
    pub fn display_for(&self, template_type: TemplateType) -> Option<&DisplayConfig> {
        self.first_of_type(template_type).map(|p| &p.display)
    }

    /// Template types covered by this library, in first-occurrence order.
    pub fn template_types(&self) -> Vec<TemplateType> {
        let mut types = Vec::new();
        for pattern in &self.patterns {
            if !types.contains(&pattern.template_type) {
                types.push(pattern.template_type);
            }
        }
        types
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the library has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Load every definition file in `dir` into this library.
    ///
    /// Supports YAML (.yaml, .yml) and JSON (.json) files; other files are
    /// skipped. Files are processed in file-name order. Never fails as a
    /// whole: problems are reported in the returned [`LoadReport`].
    pub fn load_dir(&mut self, dir: &Path) -> LoadReport {
        let mut report = LoadReport::default();

        if !dir.is_dir() {
            warn!(path = %dir.display(), "Template directory not found");
            report.diagnostics.push(LoadDiagnostic {
                path: dir.to_path_buf(),
                error: TemplateError::MissingDirectory(dir.to_path_buf()),
            });
            return report;
        }

        let files = match definition_files(dir) {
            Ok(files) => files,
            Err(error) => {
                warn!(path = %dir.display(), error = %error, "Failed to list template directory");
                report.diagnostics.push(LoadDiagnostic {
                    path: dir.to_path_buf(),
                    error,
                });
                return report;
            }
        };

        for path in files {
            let loaded = PatternDefinition::from_path(&path).and_then(|def| {
                let name = def.name.clone();
                def.compile().map(|pattern| (name, pattern))
            });
            match loaded {
                Ok((_, Some(pattern))) => {
                    let name = pattern.name.clone();
                    let replaced = self.insert(pattern);
                    debug!(pattern = %name, replaced, path = %path.display(), "Loaded template pattern");
                    report.loaded.push(name);
                }
                Ok((name, None)) => {
                    debug!(pattern = %name, path = %path.display(), "Ignoring definition with unknown template type");
                    report.ignored.push(name);
                }
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "Skipping template definition");
                    report.diagnostics.push(LoadDiagnostic { path, error });
                }
            }
        }

        info!(
            path = %dir.display(),
            loaded = report.loaded.len(),
            ignored = report.ignored.len(),
            failed = report.diagnostics.len(),
            total = self.patterns.len(),
            "Loaded template directory"
        );

        report
    }
}

/// Definition files in `dir`, sorted by file name.
fn definition_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| TemplateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && PatternDefinition::is_definition_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
