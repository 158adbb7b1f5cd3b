//! Run reports.
//!
//! A [`Report`] aggregates the violations of one run: totals, a per-rule
//! summary, the ordered violation list, and the parse warnings of every
//! document checked. Exit status derives from the violation count alone;
//! parse warnings are informational.

use serde::Serialize;
use std::collections::BTreeMap;
use swatch_content::{ParseWarning, ParsedDocument};
use swatch_core::{Severity, Violation};

/// Violation counts for one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    /// Total violations of the rule.
    pub count: usize,
    /// Of which errors.
    pub errors: usize,
    /// Of which warnings.
    pub warnings: usize,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Declarations validated.
    pub total_checked: usize,
    /// Violations found.
    pub total_violations: usize,
    /// Error-severity violations.
    pub errors: usize,
    /// Warning-severity violations.
    pub warnings: usize,
    /// Per-rule counts, keyed by rule id.
    pub by_rule: BTreeMap<String, RuleSummary>,
    /// Violations in document, then declaration, order.
    pub violations: Vec<Violation>,
    /// Input skipped while parsing.
    pub parse_warnings: Vec<ParseWarning>,
    /// Documents checked, in order.
    pub sources: Vec<String>,
}

impl Report {
    /// Builds a report from `total_checked` declarations and their violations.
    pub fn build(total_checked: usize, violations: Vec<Violation>) -> Self {
        let mut by_rule: BTreeMap<String, RuleSummary> = BTreeMap::new();
        for violation in &violations {
            let summary = by_rule.entry(violation.rule.to_string()).or_default();
            summary.count += 1;
            match violation.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
        }
        let errors = violations.iter().filter(|v| v.is_error()).count();
        Self {
            total_checked,
            total_violations: violations.len(),
            errors,
            warnings: violations.len() - errors,
            by_rule,
            violations,
            parse_warnings: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Returns `true` when no violation was found.
    pub fn is_clean(&self) -> bool {
        self.total_violations == 0
    }

    /// Process exit code: 0 when clean, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() { 0 } else { 1 }
    }

    /// Violations of one rule, in report order.
    pub fn violations_of<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}

/// Accumulates per-document results into a [`Report`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    checked: usize,
    violations: Vec<Violation>,
    parse_warnings: Vec<ParseWarning>,
    sources: Vec<String>,
}

impl ReportBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one parsed document and its violations.
    pub fn record(&mut self, parsed: ParsedDocument, violations: Vec<Violation>) -> &mut Self {
        self.checked += parsed.declarations.len();
        self.violations.extend(violations);
        self.parse_warnings.extend(parsed.warnings);
        self.sources.push(parsed.source);
        self
    }

    /// Finishes the report.
    pub fn build(self) -> Report {
        let mut report = Report::build(self.checked, self.violations);
        report.parse_warnings = self.parse_warnings;
        report.sources = self.sources;
        report
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use swatch_core::{Location, StyleDeclaration};

    fn violation(rule: &str, severity: Severity) -> Violation {
        Violation::new(rule, StyleDeclaration::new("color", "#a855f7"), "bad", severity)
    }

    #[test]
    fn test_build_counts_and_groups() {
        let report = Report::build(
            5,
            vec![
                violation("no-banned-hue", Severity::Error),
                violation("off-palette", Severity::Warning),
                violation("no-banned-hue", Severity::Error),
            ],
        );
        assert_eq!(report.total_checked, 5);
        assert_eq!(report.total_violations, 3);
        assert_eq!(report.errors, 2);
        assert_eq!(report.warnings, 1);
        assert_eq!(
            report.by_rule["no-banned-hue"],
            RuleSummary {
                count: 2,
                errors: 2,
                warnings: 0
            }
        );
        assert_eq!(report.violations_of("off-palette").count(), 1);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_empty_report_is_clean() {
        let report = Report::build(3, Vec::new());
        assert!(report.is_clean());
        assert_eq!(report.exit_code(), 0);
        assert!(report.by_rule.is_empty());
    }

    #[test]
    fn test_warnings_only_still_fail() {
        let report = Report::build(1, vec![violation("off-palette", Severity::Warning)]);
        assert!(!report.is_clean());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_builder_merges_documents() {
        let mut a = ParsedDocument::new("a.css");
        a.push(StyleDeclaration::new("color", "#fff"));
        a.warn(ParseWarning::new(Location::new("a.css", 2, 1), "missing ':' in declaration", "x"));
        let mut b = ParsedDocument::new("b.css");
        b.push(StyleDeclaration::new("color", "#a855f7"));
        b.push(StyleDeclaration::new("color", "#000"));

        let mut builder = ReportBuilder::new();
        builder
            .record(a, Vec::new())
            .record(b, vec![violation("no-banned-hue", Severity::Error)]);
        let report = builder.build();

        assert_eq!(report.total_checked, 3);
        assert_eq!(report.sources, vec!["a.css", "b.css"]);
        assert_eq!(report.parse_warnings.len(), 1);
        assert_eq!(report.total_violations, 1);
    }

    #[test]
    fn test_parse_warnings_do_not_affect_exit_code() {
        let mut doc = ParsedDocument::new("a.css");
        doc.warn(ParseWarning::new(Location::new("a.css", 1, 1), "unexpected '}'", "}"));
        let mut builder = ReportBuilder::new();
        builder.record(doc, Vec::new());
        assert_eq!(builder.build().exit_code(), 0);
    }
}
