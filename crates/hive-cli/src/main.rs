//! Hive CLI entry point.

use std::io;

use clap::Parser;
use hive_core::CoreConfig;
use tracing_subscriber::{fmt, EnvFilter};

use hive_cli::cli::Cli;
use hive_cli::commands;

fn main() {
    // Load .env.local if it exists (for HIVE_* overrides)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Logs go to stderr so panels on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match CoreConfig::from_env() {
        Ok(base) => cli.core_config(base),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = commands::execute(cli.command, &config, &mut io::stdout().lock());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
