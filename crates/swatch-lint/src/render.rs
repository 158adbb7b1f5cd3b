//! Report rendering.

use crate::report::Report;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;
use swatch_core::{Error, Result};

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per violation, then a summary.
    #[default]
    Text,
    /// The full report as pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::unknown_variant("output format", other)),
        }
    }
}

/// Renders a report in `format`.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// Renders a report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders a report for a terminal.
///
/// Each violation is `source:line:col  severity  rule  message`; parse
/// warnings follow, then the totals and a per-rule breakdown.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for violation in &report.violations {
        let _ = writeln!(out, "{violation}");
    }
    for warning in &report.parse_warnings {
        let _ = writeln!(out, "{}  parse-warning  {}", warning.location, warning_text(warning));
    }
    if !report.violations.is_empty() || !report.parse_warnings.is_empty() {
        out.push('\n');
    }

    let files = report.sources.len();
    let _ = write!(
        out,
        "Checked {} {} in {} {}: ",
        report.total_checked,
        plural(report.total_checked, "declaration", "declarations"),
        files,
        plural(files, "file", "files"),
    );
    if report.is_clean() {
        out.push_str("no violations");
    } else {
        let _ = write!(
            out,
            "{} {} ({} {}, {} {})",
            report.total_violations,
            plural(report.total_violations, "violation", "violations"),
            report.errors,
            plural(report.errors, "error", "errors"),
            report.warnings,
            plural(report.warnings, "warning", "warnings"),
        );
    }
    if !report.parse_warnings.is_empty() {
        let _ = write!(
            out,
            ", {} {}",
            report.parse_warnings.len(),
            plural(report.parse_warnings.len(), "parse warning", "parse warnings")
        );
    }
    out.push('\n');

    let width = report.by_rule.keys().map(String::len).max().unwrap_or(0);
    for (rule, summary) in &report.by_rule {
        let _ = writeln!(out, "  {rule:<width$}  {}", summary.count);
    }
    out
}

fn warning_text(warning: &swatch_content::ParseWarning) -> String {
    if warning.text.is_empty() {
        warning.message.clone()
    } else {
        format!("{}: {}", warning.message, warning.text)
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use swatch_content::ParseWarning;
    use swatch_core::{Location, Severity, StyleDeclaration, Violation};

    fn sample() -> Report {
        let decl = StyleDeclaration::new("min-height", "40px").at(Location::new("app.css", 3, 5));
        let mut report = Report::build(
            2,
            vec![Violation::new(
                "touch-target-floor",
                decl,
                "min-height 40px is below the 44px touch target",
                Severity::Error,
            )],
        );
        report.sources = vec!["app.css".to_string()];
        report
    }

    #[test]
    fn test_text_lines_and_summary() {
        let text = render_text(&sample());
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "app.css:3:5  error  touch-target-floor  min-height 40px is below the 44px touch target"
        );
        assert!(text.contains("Checked 2 declarations in 1 file: 1 violation (1 error, 0 warnings)"));
        assert!(text.contains("  touch-target-floor  1"));
    }

    #[test]
    fn test_text_clean_report() {
        let mut report = Report::build(4, Vec::new());
        report.sources = vec!["a.css".into(), "b.md".into()];
        assert_eq!(
            render_text(&report),
            "Checked 4 declarations in 2 files: no violations\n"
        );
    }

    #[test]
    fn test_text_includes_parse_warnings() {
        let mut report = Report::build(0, Vec::new());
        report.parse_warnings.push(ParseWarning::new(
            Location::new("a.css", 7, 2),
            "missing ':' in declaration",
            "box-shadow none",
        ));
        let text = render_text(&report);
        assert!(text.starts_with(
            "a.css:7:2  parse-warning  missing ':' in declaration: box-shadow none\n"
        ));
        assert!(text.contains("no violations, 1 parse warning"));
    }

    #[test]
    fn test_json_round_trips_through_value() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_violations"], 1);
        assert_eq!(value["violations"][0]["rule"], "touch-target-floor");
        assert_eq!(value["violations"][0]["declaration"]["location"]["line"], 3);
        assert_eq!(value["by_rule"]["touch-target-floor"]["errors"], 1);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
