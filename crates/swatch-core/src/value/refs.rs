//! Token references inside CSS values.
//!
//! Two spellings are recognised:
//!
//! - `var(--color-bg)` / `var(--color-bg, #000)`: a CSS custom property
//! - `token(color.bg)`: a direct token identifier

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"var\(\s*(--[A-Za-z0-9_-]+)\s*(?:,\s*([^()]*(?:\([^()]*\)[^()]*)*?))?\s*\)|token\(\s*([A-Za-z0-9_.-]+)\s*\)",
    )
    .unwrap_or_else(|e| unreachable!("token reference pattern is valid: {e}"))
});

/// Spelling of a token reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSyntax {
    /// `var(--name)`
    CssVar,
    /// `token(id)`
    Token,
}

/// A token reference found in a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    /// How the reference was written.
    pub syntax: RefSyntax,
    /// Custom-property name (with `--`) or token identifier.
    pub name: String,
    /// Fallback text of a `var()` reference.
    pub fallback: Option<String>,
    /// Byte range of the whole reference in the value.
    pub span: Range<usize>,
}

impl TokenRef {
    /// Returns the reference as written.
    pub fn display_name(&self) -> String {
        match self.syntax {
            RefSyntax::CssVar => format!("var({})", self.name),
            RefSyntax::Token => format!("token({})", self.name),
        }
    }
}

/// Finds all token references in a value, in order of appearance.
pub fn find_token_refs(value: &str) -> Vec<TokenRef> {
    REF_RE
        .captures_iter(value)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if let Some(var) = caps.get(1) {
                Some(TokenRef {
                    syntax: RefSyntax::CssVar,
                    name: var.as_str().to_string(),
                    fallback: caps.get(2).map(|m| m.as_str().trim().to_string()),
                    span: whole.range(),
                })
            } else {
                caps.get(3).map(|id| TokenRef {
                    syntax: RefSyntax::Token,
                    name: id.as_str().to_string(),
                    fallback: None,
                    span: whole.range(),
                })
            }
        })
        .collect()
}

/// Returns `true` if the value contains any token reference.
pub fn has_token_refs(value: &str) -> bool {
    REF_RE.is_match(value)
}

/// Replaces each token reference with the text returned by `replace`.
pub fn substitute_refs<F>(value: &str, mut replace: F) -> String
where
    F: FnMut(&TokenRef) -> String,
{
    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;
    for r in find_token_refs(value) {
        out.push_str(&value[cursor..r.span.start]);
        out.push_str(&replace(&r));
        cursor = r.span.end;
    }
    out.push_str(&value[cursor..]);
    out
}
