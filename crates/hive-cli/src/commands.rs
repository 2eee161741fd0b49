//! Command handlers for CLI subcommands.

use std::io::{self, Read, Write};

use hive_core::{ConfigError, CoreConfig, HiveEngine, LoadReport};
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::Commands;

/// Errors surfaced to the user by a command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no message given (pass text or pipe it on stdin)")]
    EmptyInput,
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Execute a CLI command, writing its output to `out`.
pub fn execute(command: Commands, config: &CoreConfig, out: &mut dyn Write) -> Result<()> {
    let (mut engine, report) = HiveEngine::from_config(config)?;
    log_report(&report);

    match command {
        Commands::Detect { text, summary, json } => {
            let message = message_text(text, &mut io::stdin())?;
            cmd_detect(&mut engine, &message, summary, json, out)
        }
        Commands::Classify { prompt, json } => cmd_classify(&engine, &prompt.join(" "), json, out),
        Commands::Patterns => cmd_patterns(&engine, &report, out),
    }
}

/// Message from positional arguments, or all of `stdin` when none were given.
fn message_text(args: Vec<String>, stdin: &mut dyn Read) -> Result<String> {
    let message = if args.is_empty() {
        let mut buf = String::new();
        stdin.read_to_string(&mut buf)?;
        buf.trim_end_matches(['\n', '\r']).to_string()
    } else {
        args.join(" ")
    };

    if message.trim().is_empty() {
        return Err(CommandError::EmptyInput);
    }
    Ok(message)
}

fn log_report(report: &LoadReport) {
    for diagnostic in &report.diagnostics {
        warn!("{}", diagnostic);
    }
    if !report.ignored.is_empty() {
        info!(ignored = ?report.ignored, "Ignored definitions with unknown template types");
    }
}

fn cmd_detect(
    engine: &mut HiveEngine,
    message: &str,
    summary: bool,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let processed = engine.process_message(message);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&processed.matches)?)?;
        return Ok(());
    }

    writeln!(out, "{}", processed.rendered)?;
    if summary {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            engine.formatter().format_template_summary(&processed.matches)
        )?;
    }
    Ok(())
}

fn cmd_classify(engine: &HiveEngine, prompt: &str, json: bool, out: &mut dyn Write) -> Result<()> {
    let analysis = engine.classify(prompt);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&analysis)?)?;
        return Ok(());
    }

    let flag = |b: bool| if b { "yes" } else { "no" };
    writeln!(out, "Intent:        {}", analysis.intent)?;
    writeln!(out, "Priority:      {}", analysis.priority)?;
    writeln!(out, "Complexity:    {}", analysis.complexity)?;
    writeln!(
        out,
        "Issue:         {}",
        analysis.issue_number.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "Route to:      {}", analysis.routing_hint())?;
    writeln!(out, "Investigation: {}", flag(analysis.requires_investigation))?;
    writeln!(out, "Urgent:        {}", flag(analysis.mentions_urgency))?;
    writeln!(out, "Files:         {}", flag(analysis.mentions_files))?;
    writeln!(out, "Code:          {}", flag(analysis.mentions_code))?;
    writeln!(out, "Tests:         {}", flag(analysis.mentions_test))?;
    Ok(())
}

fn cmd_patterns(engine: &HiveEngine, report: &LoadReport, out: &mut dyn Write) -> Result<()> {
    let library = engine.library();
    if library.is_empty() {
        writeln!(out, "No template patterns loaded.")?;
    } else {
        writeln!(out, "{:<18} {:<16} {:<16} FIELDS", "NAME", "TYPE", "KEYWORD")?;
        writeln!(out, "{}", "-".repeat(70))?;
        for pattern in library.patterns() {
            writeln!(
                out,
                "{:<18} {:<16} {:<16} {}",
                pattern.name,
                pattern.template_type,
                pattern.keyword.as_deref().unwrap_or("-"),
                pattern.fields.join(", ")
            )?;
        }
    }

    if !report.ignored.is_empty() {
        writeln!(out, "\nIgnored (unknown type): {}", report.ignored.join(", "))?;
    }
    if !report.is_clean() {
        writeln!(out, "\nLoad problems:")?;
        for diagnostic in &report.diagnostics {
            writeln!(out, "  {}", diagnostic)?;
        }
    }
    Ok(())
}
