//! Error types for the core crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating template definitions.
///
/// These never escape [`TemplateLibrary::load_dir`](crate::templates::TemplateLibrary::load_dir);
/// they are collected as [`LoadDiagnostic`](crate::templates::LoadDiagnostic)s instead.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Reading a definition file or directory failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The definition file is not valid YAML/JSON for a pattern definition.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path being parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The regex does not compile (or exceeds the size limit).
    #[error("invalid pattern '{name}': {source}")]
    InvalidPattern {
        /// Pattern name.
        name: String,
        /// Regex compile error.
        #[source]
        source: regex::Error,
    },

    /// Declared field names do not line up with capture groups.
    #[error("pattern '{name}' declares {fields} fields but has {groups} capture groups")]
    FieldMismatch {
        /// Pattern name.
        name: String,
        /// Number of declared fields.
        fields: usize,
        /// Number of capture groups in the regex.
        groups: usize,
    },

    /// A definition without a name.
    #[error("pattern definition has an empty name")]
    EmptyName,

    /// The pattern directory does not exist or is not a directory.
    #[error("template directory not found: {0}")]
    MissingDirectory(PathBuf),
}

/// Errors raised while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },

    /// Reading a config file failed.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid YAML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;
