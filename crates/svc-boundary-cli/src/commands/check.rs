//! Check command implementation.

use anyhow::{Context, Result};
use std::process::ExitCode;
use svc_boundary_core::{check_repository, GoExtractor, ImportExtractor};

use crate::config_resolver::ConfigSource;
use crate::CheckArgs;

/// Runs the boundary check and prints the report.
///
/// Violations only affect the exit status when `--deny` or `report.deny`
/// is set.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<ExitCode> {
    let config = source.load()?;

    let root = std::fs::canonicalize(&args.path)
        .with_context(|| format!("Failed to resolve repository root {}", args.path.display()))?;

    let extractors: Vec<Box<dyn ImportExtractor>> = vec![Box::new(GoExtractor::new())];
    tracing::info!(
        "Checking {} with {} extractor(s)",
        root.display(),
        extractors.len()
    );

    let report = check_repository(&root, &config.layout, extractors)?;

    tracing::info!(
        "Checked {} file(s) in {} service(s): {} violation(s)",
        report.files_checked(),
        report.services.len(),
        report.violation_count()
    );

    super::output::print(&report, args.format, !args.no_color)?;

    let deny = args.deny || config.report.deny;
    if deny && report.has_violations() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
