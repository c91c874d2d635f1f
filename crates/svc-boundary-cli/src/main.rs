//! svc-boundary CLI tool.
//!
//! Usage:
//! ```bash
//! svc-boundary [OPTIONS] [PATH]
//! svc-boundary init [--force]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use svc_boundary_core::BoundaryError;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Import-boundary linter for Go monorepos with per-service folders
#[derive(Parser)]
#[command(name = "svc-boundary")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    check: CheckArgs,
}

/// Arguments of the default check run.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Repository root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Disable ANSI colors in text output
    #[arg(long)]
    pub no_color: bool,

    /// Exit with status 1 when violations are found
    #[arg(long)]
    pub deny: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for boundary reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Per-service report for humans.
    #[default]
    Text,
    /// One-line-per-violation compact format.
    Compact,
    /// JSON output.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Some(Commands::Init { force }) => {
            commands::init::run(force)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let source = config_resolver::resolve(&cli.check.path, cli.config.as_deref());
            commands::check::run(&cli.check, &source)
        }
    }
}

/// Renders core errors as miette diagnostics, anything else as an anyhow chain.
fn report_error(err: &anyhow::Error) {
    if let Some(boundary) = err.downcast_ref::<BoundaryError>() {
        let handler = miette::GraphicalReportHandler::new().with_wrap_lines(false);
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, boundary).is_ok() {
            eprint!("{rendered}");
            return;
        }
    }
    eprintln!("Error: {err:?}");
}
