//! Report rendering.

use anyhow::Result;
use std::fmt::{self, Write};
use svc_boundary_core::BoundaryReport;

use crate::OutputFormat;

const HIGHLIGHT: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[1;0m";

/// Print the report in the specified format.
pub fn print(report: &BoundaryReport, format: OutputFormat, color: bool) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(report, color)?,
        OutputFormat::Compact => render_compact(report)?,
        OutputFormat::Json => render_json(report)?,
    };
    print!("{rendered}");
    Ok(())
}

/// One header per offending service followed by its highlighted violations.
/// Clean services print nothing.
///
/// # Errors
///
/// Only if formatting into the buffer fails.
pub fn render_text(report: &BoundaryReport, color: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for service in report.offending_services() {
        writeln!(out, "{} has unallowed import(s)", service.name)?;
        for violation in &service.violations {
            if color {
                write!(out, "{HIGHLIGHT}\t{}\n{RESET}", violation.message())?;
            } else {
                writeln!(out, "\t{}", violation.message())?;
            }
        }
    }
    Ok(out)
}

/// One line per violation.
///
/// # Errors
///
/// Only if formatting into the buffer fails.
pub fn render_compact(report: &BoundaryReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for violation in report.violations() {
        writeln!(out, "{violation}")?;
    }
    Ok(out)
}

/// Pretty-printed JSON document with a trailing newline.
pub fn render_json(report: &BoundaryReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use svc_boundary_core::{ImportRecord, ServiceReport, Violation};

    fn make_report() -> BoundaryReport {
        let mut report = BoundaryReport::new("example.com/mono");
        let mut billing = ServiceReport::new("billing");
        billing.files_checked = 2;
        for (line, literal) in [
            (4, "\"example.com/mono/services/orders/client\""),
            (5, "\"example.com/mono/services/users\""),
        ] {
            billing.violations.push(Violation::new(
                "billing",
                ImportRecord {
                    file: PathBuf::from("services/billing/main.go"),
                    line,
                    column: 2,
                    literal: literal.into(),
                },
            ));
        }
        let mut orders = ServiceReport::new("orders");
        orders.files_checked = 1;
        report.services.push(billing);
        report.services.push(orders);
        report
    }

    #[test]
    fn text_lists_only_offending_services() {
        insta::assert_snapshot!(render_text(&make_report(), false).unwrap(), @r#"
        billing has unallowed import(s)
        	uses "example.com/mono/services/orders/client" in file services/billing/main.go
        	uses "example.com/mono/services/users" in file services/billing/main.go
        "#);
    }

    #[test]
    fn text_highlights_each_violation() {
        let text = render_text(&make_report(), true).unwrap();
        assert!(text.starts_with("billing has unallowed import(s)\n\x1b[1;31m\tuses "));
        assert_eq!(text.matches("\x1b[1;31m\t").count(), 2);
        assert!(text.ends_with("main.go\n\x1b[1;0m"));
    }

    #[test]
    fn clean_report_prints_nothing() {
        let report = BoundaryReport::new("example.com/mono");
        assert_eq!(render_text(&report, true).unwrap(), "");
        assert_eq!(render_compact(&report).unwrap(), "");
    }

    #[test]
    fn compact_has_one_line_per_violation() {
        insta::assert_snapshot!(render_compact(&make_report()).unwrap(), @r#"
        services/billing/main.go:4:2: [billing] uses "example.com/mono/services/orders/client"
        services/billing/main.go:5:2: [billing] uses "example.com/mono/services/users"
        "#);
    }

    #[test]
    fn json_serializes_report() {
        let json = render_json(&make_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["module"], "example.com/mono");
        assert_eq!(value["services"][0]["name"], "billing");
        assert_eq!(value["services"][0]["files_checked"], 2);
        assert_eq!(
            value["services"][0]["violations"][1]["import"],
            "\"example.com/mono/services/users\""
        );
        assert_eq!(value["services"][1]["violations"].as_array().map(Vec::len), Some(0));
    }
}
