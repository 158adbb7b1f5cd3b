#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Swatch Lint: validation and reporting.
//!
//! The last two stages of a run: [`validate`] applies a
//! [`RuleSet`](swatch_rules::RuleSet) to parsed declarations, and
//! [`Report`] aggregates the violations. [`Linter`] wires parser, registry
//! and rule set together for whole documents and directories.
//!
//! ```rust
//! use swatch_content::{Document, DocumentFormat};
//! use swatch_lint::Linter;
//!
//! let linter = Linter::builtin().unwrap();
//! let doc = Document::new("app.css", DocumentFormat::Css, ".btn { min-height: 40px; }");
//! let report = linter.check_documents([&doc]);
//!
//! assert_eq!(report.total_violations, 1);
//! assert_eq!(report.violations[0].rule, "touch-target-floor");
//! assert_eq!(report.exit_code(), 1);
//! ```

pub mod linter;
pub mod render;
pub mod report;
pub mod validator;

pub use linter::{Linter, collect_files};
pub use render::{OutputFormat, render, render_json, render_text};
pub use report::{Report, ReportBuilder, RuleSummary};
pub use validator::validate;
