//! prose-lint CLI tool.
//!
//! Usage:
//! ```bash
//! prose-lint check [OPTIONS] [PATH]
//! prose-lint list-rules
//! prose-lint init
//! ```
//!
//! Exit status: 0 when the run passed or had nothing to check, 1 when a
//! check failed, 2 on an environment error.

use anyhow::Result;
use clap::{Parser, Subcommand};
use prose_lint_core::{AnalyzerError, RunStatus};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// House-style linter for documentation trees
#[derive(Parser)]
#[command(name = "prose-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PROSE_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run checks
    Check {
        /// Documentation project root (default: `[analyzer] root` from config)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Skip documents whose path contains this text (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// One-line-per-diagnostic compact format.
    Compact,
    /// JSON report.
    Json,
    /// Test Anything Protocol.
    Tap,
}

const EXIT_FAILED: u8 = 1;
const EXIT_ENVIRONMENT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(RunStatus::Failed) => ExitCode::from(EXIT_FAILED),
        Ok(RunStatus::Passed | RunStatus::Skipped) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast::<AnalyzerError>() {
                Ok(analyzer_err) => eprintln!("{:?}", miette::Report::new(analyzer_err)),
                Err(other) => eprintln!("Error: {other:?}"),
            }
            ExitCode::from(EXIT_ENVIRONMENT)
        }
    }
}

fn run(cli: Cli) -> Result<RunStatus> {
    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
        } => {
            let start = path.clone().unwrap_or_else(|| PathBuf::from("."));
            let source = config_resolver::resolve(&start, cli.config.as_deref());
            commands::check::run(path.as_deref(), format, rules, exclude, &source, cli.verbose)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(RunStatus::Passed)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(RunStatus::Passed)
        }
    }
}
