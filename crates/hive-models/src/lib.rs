//! Core data models for Hive.
//!
//! This crate provides the closed taxonomies shared by the Queen and her
//! workers (message types, priorities, task lifecycle, worker roles) and the
//! ephemeral values produced by template detection and prompt
//! classification.

pub mod prompt;
pub mod taxonomy;
pub mod template;

// Re-export main types
pub use prompt::{Intent, PromptAnalysis};
pub use taxonomy::{
    MessagePriority, MessageType, ParseTaxonomyError, TaskComplexity, TaskStatus, WorkerRole,
};
pub use template::{TemplateMatch, TemplateType};
