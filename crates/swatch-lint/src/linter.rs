//! The linter: parser, registry and rule set wired together.

use crate::report::{Report, ReportBuilder};
use crate::validator::validate;
use std::path::{Path, PathBuf};
use swatch_content::{Document, DocumentFormat, ParsedDocument, StyleParser};
use swatch_core::{Error, Result, Violation};
use swatch_rules::RuleSet;
use swatch_tokens::{Definitions, Registry};

/// Checks documents against one set of definitions.
///
/// Construction loads and validates everything once; checking never
/// mutates the linter, so one instance serves any number of documents.
#[derive(Debug)]
pub struct Linter {
    registry: Registry,
    rules: RuleSet,
    parser: StyleParser,
}

impl Linter {
    /// Wires prebuilt parts together.
    pub fn new(registry: Registry, rules: RuleSet, parser: StyleParser) -> Self {
        Self {
            registry,
            rules,
            parser,
        }
    }

    /// Loads a registry and rule set from `defs`, with the default parser.
    pub fn from_definitions(defs: &Definitions) -> Result<Self> {
        let registry = Registry::load(defs)?;
        let rules = RuleSet::build(defs, &registry)?;
        Ok(Self::new(registry, rules, StyleParser::default()))
    }

    /// A linter for the built-in definitions.
    pub fn builtin() -> Result<Self> {
        Self::from_definitions(&Definitions::builtin()?)
    }

    /// Replaces the parser.
    pub fn with_parser(mut self, parser: StyleParser) -> Self {
        self.parser = parser;
        self
    }

    /// Token registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Parses and validates one document.
    pub fn check_document(&self, document: &Document) -> (ParsedDocument, Vec<Violation>) {
        let parsed = self.parser.parse(document);
        let violations = validate(&parsed.declarations, &self.rules, &self.registry);
        tracing::debug!(
            source = %document.source,
            declarations = parsed.declarations.len(),
            violations = violations.len(),
            "Checked document"
        );
        (parsed, violations)
    }

    /// Checks documents in order and builds the report.
    pub fn check_documents<'d, I>(&self, documents: I) -> Report
    where
        I: IntoIterator<Item = &'d Document>,
    {
        let mut builder = ReportBuilder::new();
        for document in documents {
            let (parsed, violations) = self.check_document(document);
            builder.record(parsed, violations);
        }
        builder.build()
    }

    /// Reads and checks files; directories are searched recursively.
    ///
    /// Fails on the first unreadable path or unsupported file extension.
    pub fn check_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Report> {
        let files = collect_files(paths)?;
        tracing::info!(files = files.len(), "Checking files");
        let documents = files
            .iter()
            .map(Document::from_path)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.check_documents(&documents))
    }
}

/// Expands directories into the supported files below them.
///
/// Files named explicitly are kept as given. Files found in a directory
/// are sorted; duplicates are dropped.
pub fn collect_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            let mut found = find_documents(path)?;
            found.sort();
            tracing::debug!(dir = %path.display(), files = found.len(), "Expanded directory");
            files.extend(found);
        } else if path.exists() {
            files.push(path.to_path_buf());
        } else {
            return Err(Error::io_with_path(
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
                path,
            ));
        }
    }
    let mut seen = std::collections::HashSet::new();
    files.retain(|f| seen.insert(f.clone()));
    Ok(files)
}

fn find_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = glob::Pattern::escape(&dir.to_string_lossy());
    let mut found = Vec::new();
    for (ext, _) in DocumentFormat::EXTENSIONS {
        let pattern = format!("{root}/**/*.{ext}");
        let entries = glob::glob(&pattern)
            .map_err(|e| Error::config(format!("Invalid search pattern {pattern}: {e}")))?;
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                Error::io_with_path(e.into_error(), path)
            })?;
            if path.is_file() {
                found.push(path);
            }
        }
    }
    Ok(found)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_collect_files_expands_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.css", "");
        write(dir.path(), "nested/a.md", "");
        write(dir.path(), "nested/c.toml", "");
        write(dir.path(), "notes.txt", "");

        let files = collect_files(&[dir.path()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["b.css", "nested/a.md", "nested/c.toml"]);
    }

    #[test]
    fn test_collect_files_drops_duplicates() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "a.css", "");
        let files = collect_files(&[file.clone(), dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_files_missing_path() {
        let err = collect_files(&["/nonexistent/swatch/app.css"]).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_check_paths_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "app.scss", ".card { color: #fff; }");
        let linter = Linter::builtin().unwrap();
        let err = linter.check_paths(&[file]).unwrap_err();
        assert!(err.to_string().contains("document format"));
    }

    #[test]
    fn test_check_paths_reports_per_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "ok.css", ".card { background: var(--color-surface); }");
        write(dir.path(), "bad.css", ".btn { min-height: 40px; }");
        let linter = Linter::builtin().unwrap();
        let report = linter.check_paths(&[dir.path()]).unwrap();
        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.total_checked, 2);
        assert_eq!(report.total_violations, 1);
        assert!(report.sources[0].ends_with("bad.css"));
        assert_eq!(report.violations[0].rule, "touch-target-floor");
    }
}
