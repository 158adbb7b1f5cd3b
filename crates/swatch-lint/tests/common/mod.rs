//! Shared helpers for swatch-lint integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use swatch_content::{Document, DocumentFormat};
use swatch_lint::{Linter, Report};

/// Linter over the built-in definitions.
pub fn linter() -> Linter {
    Linter::builtin().unwrap()
}

/// Checks CSS text with the built-in definitions.
pub fn check_css(css: &str) -> Report {
    check(Document::new("test.css", DocumentFormat::Css, css))
}

/// Checks a TOML component description with the built-in definitions.
pub fn check_components(toml: &str) -> Report {
    check(Document::new("test.toml", DocumentFormat::Component, toml))
}

/// Checks one document with the built-in definitions.
pub fn check(doc: Document) -> Report {
    linter().check_documents([&doc])
}

/// Rule ids of every violation, in report order.
pub fn rules_of(report: &Report) -> Vec<String> {
    report.violations.iter().map(|v| v.rule.to_string()).collect()
}

/// A stylesheet that follows every rule.
pub const COMPLIANT_CSS: &str = r#"
:root {
  --page-gutter: 24px;
}

body {
  background: var(--color-bg);
  color: var(--color-text);
  font-family: token(font.family.sans);
}

/* Cards are flat: no shadow at rest, elevation through surface color */
.card {
  background: var(--color-surface);
  border: 1px solid var(--color-border);
  border-radius: token(radius.md);
  box-shadow: none;
  padding: token(space.4);
}

.card:hover {
  background: var(--color-surface-raised);
}

.btn {
  min-height: 44px;
  border-radius: token(radius.sm);
  background: var(--color-accent);
  color: var(--color-text);
}

.badge.tinted {
  background: var(--color-positive-muted);
  color: var(--color-positive);
  border-radius: token(radius.pill);
}

.section-header .section-title {
  font-size: token(font.size.title);
  font-weight: token(font.weight.semibold);
  letter-spacing: 0;
  text-transform: none;
}

.caption {
  font-size: token(font.size.caption);
  letter-spacing: 0.04em;
}

.ticker-tag {
  text-transform: uppercase;
  letter-spacing: 0.06em;
}

@media (max-width: 640px) {
  .card {
    padding: token(space.3);
    margin: 0 var(--page-gutter);
  }
}
"#;
