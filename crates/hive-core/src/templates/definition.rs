//! Declarative pattern definitions as stored on disk.

use std::fs;
use std::path::Path;

use hive_models::TemplateType;
use serde::{Deserialize, Serialize};

use super::{DisplayConfig, TemplatePattern};
use crate::error::{Result, TemplateError};

/// One pattern definition file.
///
/// ```yaml
/// name: task
/// template_type: task
/// pattern: '\bTASK:([A-Za-z0-9_\-]+):(.+)'
/// keyword: 'TASK:'
/// fields: [task_id, instruction]
/// display:
///   icon: "📋"
///   title: TASK ASSIGNMENT
///   format: "Task ID: {task_id}\nInstruction: {instruction}"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Unique pattern name.
    pub name: String,
    /// Template type key; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
    /// Regular expression with ordered capture groups.
    pub pattern: String,
    /// Distinguishing literal prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Capture group names, in order.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Presentation descriptor.
    pub display: DisplayConfig,
}

impl PatternDefinition {
    /// Whether `path` has an extension this loader understands.
    pub fn is_definition_file(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml") | Some("json")
        )
    }

    /// Read a definition from a YAML or JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_err = |message: String| TemplateError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
            _ => serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string())),
        }
    }

    /// The template type key this definition declares.
    pub fn type_key(&self) -> &str {
        self.template_type.as_deref().unwrap_or(&self.name)
    }

    /// Compile into a [`TemplatePattern`].
    ///
    /// Returns `Ok(None)` when the type key is not a known [`TemplateType`].
    pub fn compile(self) -> Result<Option<TemplatePattern>> {
        let Ok(template_type) = self.type_key().parse::<TemplateType>() else {
            return Ok(None);
        };

        let mut pattern =
            TemplatePattern::new(self.name, template_type, &self.pattern, self.fields, self.display)?;
        pattern.keyword = self.keyword.filter(|k| !k.is_empty());
        Ok(Some(pattern))
    }
}
