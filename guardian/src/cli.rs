// guardian/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guardian")]
#[command(about = "Test coverage gap analysis for dbt projects", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔍 Analyzes a compiled dbt project for test coverage gaps
    Analyze {
        /// Path to the dbt project root directory
        project_path: PathBuf,

        /// Show gaps with priority <= N (1=critical, 5=low) [default: 3]
        #[arg(long, env = "GUARDIAN_PRIORITY", value_parser = clap::value_parser!(u8).range(1..=5))]
        priority: Option<u8>,

        /// Maximum number of gaps listed [default: 20]
        #[arg(long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// 📝 Generates a schema.yml with test suggestions
    GenerateTests {
        /// Path to the dbt project root directory
        project_path: PathBuf,

        /// Output file path [default: <PROJECT_PATH>/schema_suggestions.yml]
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Include gaps with priority <= N (1=critical, 5=low) [default: 3]
        #[arg(long, env = "GUARDIAN_PRIORITY", value_parser = clap::value_parser!(u8).range(1..=5))]
        priority: Option<u8>,

        /// Merge into an existing schema.yml instead of creating a new file
        #[arg(long)]
        merge: bool,

        /// Existing schema.yml to merge into (required with --merge)
        #[arg(long)]
        existing_schema: Option<PathBuf>,
    },

    /// ℹ️  Shows dbt project information
    Info {
        /// Path to the dbt project root directory
        project_path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
