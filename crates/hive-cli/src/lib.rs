//! Hive CLI library.
//!
//! Command-line front end over `hive-core`: detect templates in a message,
//! classify a prompt, or list the loaded pattern library.

pub mod cli;
pub mod commands;
