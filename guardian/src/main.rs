// guardian/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug guardian analyze ... to see the details.
    // stderr keeps stdout clean for `--format json`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: COVERAGE ANALYSIS ---
        Commands::Analyze {
            project_path,
            priority,
            limit,
            format,
        } => commands::analyze::execute(project_path, priority, limit, format),

        // --- USE CASE: SCHEMA SUGGESTIONS ---
        Commands::GenerateTests {
            project_path,
            output,
            priority,
            merge,
            existing_schema,
        } => commands::generate::execute(project_path, output, priority, merge, existing_schema),

        // --- USE CASE: PROJECT INFO ---
        Commands::Info { project_path } => commands::info::execute(project_path),
    }
}
