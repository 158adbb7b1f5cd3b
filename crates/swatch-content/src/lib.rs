#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Swatch Content: style declaration parsing.
//!
//! Turns a [`Document`] into a [`ParsedDocument`]: the ordered list of
//! [`StyleDeclaration`](swatch_core::StyleDeclaration)s it contains plus a
//! [`ParseWarning`] for every piece of input that had to be skipped.
//! Parsing is pure; the same document always yields the same result.
//!
//! # Modules
//!
//! - [`document`]: documents, formats, parse results
//! - [`selector`]: selector classification into component kinds and tags
//! - [`css`]: stylesheets
//! - [`markdown`]: CSS fences in Markdown
//! - [`component`]: TOML component descriptions
//!
//! # Example
//!
//! ```rust
//! use swatch_content::{Document, DocumentFormat};
//! use swatch_core::ComponentKind;
//!
//! let doc = Document::new("app.css", DocumentFormat::Css, ".card:hover { box-shadow: none; }");
//! let parsed = swatch_content::parse(&doc);
//!
//! let decl = &parsed.declarations[0];
//! assert_eq!(decl.property, "box-shadow");
//! assert_eq!(decl.component, Some(ComponentKind::Card));
//! assert_eq!(decl.location.to_string(), "app.css:1:14");
//! ```

pub mod component;
pub mod css;
pub mod document;
pub mod markdown;
pub mod selector;

pub use document::{Document, DocumentFormat, ParseWarning, ParsedDocument};
pub use selector::{SelectorInfo, SelectorMap};

/// Parses documents with a given selector map.
#[derive(Debug, Clone, Default)]
pub struct StyleParser {
    selectors: SelectorMap,
}

impl StyleParser {
    /// Creates a parser using `selectors` to classify CSS selectors.
    pub fn new(selectors: SelectorMap) -> Self {
        Self { selectors }
    }

    /// Selector map in use.
    pub fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }

    /// Parses one document.
    pub fn parse(&self, document: &Document) -> ParsedDocument {
        let mut out = ParsedDocument::new(&document.source);
        match document.format {
            DocumentFormat::Css => css::parse_css(&document.text, &self.selectors, &mut out),
            DocumentFormat::Markdown => {
                markdown::parse_markdown(&document.text, &self.selectors, &mut out)
            }
            DocumentFormat::Component => component::parse_components(&document.text, &mut out),
        }
        log::debug!(
            "Parsed {}: {} declarations, {} warnings",
            document.source,
            out.declarations.len(),
            out.warnings.len()
        );
        out
    }
}

/// Parses one document with the default selector map.
pub fn parse(document: &Document) -> ParsedDocument {
    StyleParser::default().parse(document)
}
