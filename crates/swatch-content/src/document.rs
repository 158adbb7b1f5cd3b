//! Input documents and parse results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use swatch_core::{Error, Location, Result, StyleDeclaration};

/// Format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// A stylesheet.
    Css,
    /// Markdown; every fenced `css` block is a stylesheet.
    Markdown,
    /// TOML `[[component]]` descriptions.
    Component,
}

impl DocumentFormat {
    /// File extensions per format.
    pub const EXTENSIONS: &'static [(&'static str, DocumentFormat)] = &[
        ("css", DocumentFormat::Css),
        ("md", DocumentFormat::Markdown),
        ("markdown", DocumentFormat::Markdown),
        ("toml", DocumentFormat::Component),
    ];

    /// Picks the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<DocumentFormat> {
        Self::EXTENSIONS
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(ext))
            .map(|(_, f)| *f)
    }

    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<DocumentFormat> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Css => "css",
            DocumentFormat::Markdown => "markdown",
            DocumentFormat::Component => "component",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document to parse, held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Name used in locations, usually the path.
    pub source: String,
    /// Format.
    pub format: DocumentFormat,
    /// Full text.
    pub text: String,
}

impl Document {
    /// Creates a document from text.
    pub fn new(source: impl Into<String>, format: DocumentFormat, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            format,
            text: text.into(),
        }
    }

    /// Reads a document; the format comes from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            Error::unknown_variant(
                "document format",
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            )
        })?;
        let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Ok(Self::new(path.display().to_string(), format, text))
    }
}

/// A malformed piece of input that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// Where the problem starts.
    pub location: Location,
    /// What is wrong.
    pub message: String,
    /// Offending text, shortened.
    pub text: String,
}

impl ParseWarning {
    /// Longest `text` kept in a warning.
    const MAX_TEXT: usize = 60;

    /// Creates a warning, shortening the offending text.
    pub fn new(location: Location, message: impl Into<String>, text: &str) -> Self {
        let text = text.trim();
        let text = match text.char_indices().nth(Self::MAX_TEXT) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        };
        Self {
            location,
            message: message.into(),
            text,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}  {}", self.location, self.message)
        } else {
            write!(f, "{}  {}: {}", self.location, self.message, self.text)
        }
    }
}

/// Declarations and warnings from one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedDocument {
    /// Source name.
    pub source: String,
    /// Declarations; `index` counts from 0 in this order.
    pub declarations: Vec<StyleDeclaration>,
    /// Skipped input.
    pub warnings: Vec<ParseWarning>,
}

impl ParsedDocument {
    /// Creates an empty result for `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            declarations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Appends a declaration, assigning the next index.
    pub fn push(&mut self, declaration: StyleDeclaration) {
        let index = self.declarations.len();
        self.declarations.push(declaration.with_index(index));
    }

    /// Records a warning.
    pub fn warn(&mut self, warning: ParseWarning) {
        log::debug!("{warning}");
        self.warnings.push(warning);
    }
}

/// Maps byte offsets in text cut out of a larger source back to the source.
///
/// Each span pairs an offset in the cut text with the source offset it was
/// copied from; bytes up to the next span are contiguous in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    spans: Vec<(usize, usize)>,
}

impl SourceMap {
    /// Records that cut text from `local` onwards was copied from `source`.
    pub fn push(&mut self, local: usize, source: usize) {
        self.spans.push((local, source));
    }

    /// Source offset of a cut-text offset.
    pub fn to_source(&self, local: usize) -> usize {
        let after = self.spans.partition_point(|&(start, _)| start <= local);
        match after.checked_sub(1).and_then(|i| self.spans.get(i)) {
            Some(&(start, source)) => source + (local - start),
            None => local,
        }
    }
}

/// Converts byte offsets into 1-based line/column locations.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// 1-based line and column (in characters) of a byte offset.
    pub(crate) fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line - 1];
        let column = self
            .text
            .get(start..offset)
            .map_or(1, |prefix| prefix.chars().count() + 1);
        (line, column)
    }
}
