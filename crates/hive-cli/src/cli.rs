//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hive_core::config::{self, CoreConfig, STATE_DIR_ENV, TEMPLATE_DIR_ENV};

/// Hive - detect structured Queen/Worker messages and classify prompts
#[derive(Parser, Debug)]
#[command(name = "hive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = STATE_DIR_ENV, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Directory of pattern definitions (default: <state-dir>/templates)
    #[arg(short, long, env = TEMPLATE_DIR_ENV, global = true)]
    pub templates: Option<PathBuf>,

    /// Use only patterns from the template directory
    #[arg(long, global = true)]
    pub no_builtin: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect templates in a message
    Detect {
        /// Message text (read from stdin when omitted)
        text: Vec<String>,

        /// Also print the per-type summary
        #[arg(long)]
        summary: bool,

        /// Print matches as JSON instead of panels
        #[arg(long)]
        json: bool,
    },

    /// Classify a free-text user prompt
    Classify {
        /// Prompt text
        #[arg(required = true)]
        prompt: Vec<String>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the loaded template patterns
    Patterns,
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(config::state_dir)
    }

    /// Returns the template directory, derived from the state directory if
    /// not specified.
    pub fn template_dir(&self) -> PathBuf {
        self.templates
            .clone()
            .unwrap_or_else(|| self.state_dir().join("templates"))
    }

    /// Core configuration for this invocation.
    ///
    /// `base` carries settings that have no flag (history capacity).
    pub fn core_config(&self, base: CoreConfig) -> CoreConfig {
        base.with_template_dir(self.template_dir())
            .with_classifier_file(config::classifier_file(&self.state_dir()))
            .with_builtin_patterns(!self.no_builtin)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_detect() {
        let cli = Cli::parse_from(["hive", "detect", "TASK:T1:go", "now", "--summary"]);
        match cli.command {
            Commands::Detect { text, summary, json } => {
                assert_eq!(text, vec!["TASK:T1:go", "now"]);
                assert!(summary);
                assert!(!json);
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_cli_parse_detect_without_text() {
        let cli = Cli::parse_from(["hive", "detect", "--json"]);
        match cli.command {
            Commands::Detect { text, json, .. } => {
                assert!(text.is_empty());
                assert!(json);
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_cli_parse_classify() {
        let cli = Cli::parse_from(["hive", "classify", "fix", "the", "bug"]);
        match cli.command {
            Commands::Classify { prompt, json } => {
                assert_eq!(prompt.join(" "), "fix the bug");
                assert!(!json);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_classify_requires_prompt() {
        assert!(Cli::try_parse_from(["hive", "classify"]).is_err());
    }

    #[test]
    fn test_template_dir_flag() {
        let cli = Cli::parse_from(["hive", "-t", "/tmp/patterns", "patterns"]);
        assert_eq!(cli.template_dir(), PathBuf::from("/tmp/patterns"));

        let cli = Cli::parse_from(["hive", "--state-dir", "/tmp/hive", "--templates", "/x", "patterns"]);
        let config = cli.core_config(CoreConfig::new());
        assert_eq!(config.template_dir, Some(PathBuf::from("/x")));
        assert_eq!(
            config.classifier_file,
            Some(PathBuf::from("/tmp/hive/classifier.yaml"))
        );
        assert!(config.builtin_patterns);
    }

    #[test]
    fn test_no_builtin_flag() {
        let cli = Cli::parse_from(["hive", "patterns", "--no-builtin"]);
        assert!(!cli.core_config(CoreConfig::new()).builtin_patterns);
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["hive", "-vvv", "patterns"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_cli_help() {
        // Verify help can be generated without panic
        Cli::command().debug_assert();
    }
}
