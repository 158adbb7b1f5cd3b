//! Stylesheet parsing.
//!
//! A small, position-tracking CSS reader. It understands rule blocks,
//! selector lists, comments, quoted strings, `!important`, and the
//! grouping at-rules (`@media`, `@supports`, `@layer`, `@container`),
//! whose contents are read like top-level rules. Other block at-rules
//! (`@font-face`, `@keyframes`, ...) are skipped whole. Anything malformed
//! becomes a [`ParseWarning`] and parsing resumes at the next declaration.

use crate::document::{LineIndex, ParseWarning, ParsedDocument, SourceMap};
use crate::selector::SelectorMap;
use swatch_core::{Location, StyleDeclaration};

/// At-rules whose block holds ordinary rules.
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "layer", "container", "document"];

/// Parses `text` as a stylesheet, appending to `out`.
pub fn parse_css(text: &str, selectors: &SelectorMap, out: &mut ParsedDocument) {
    let lines = LineIndex::new(text);
    let source = out.source.clone();
    CssReader::new(text, &SourceMap::default(), &lines, &source, selectors).read(out);
}

/// Reads one stylesheet, possibly cut out of a larger text.
pub(crate) struct CssReader<'a> {
    /// Text with comments blanked out; byte offsets match the original.
    text: String,
    map: &'a SourceMap,
    lines: &'a LineIndex<'a>,
    source: &'a str,
    selectors: &'a SelectorMap,
    comment_warnings: Vec<usize>,
}

impl<'a> CssReader<'a> {
    pub(crate) fn new(
        text: &str,
        map: &'a SourceMap,
        lines: &'a LineIndex<'a>,
        source: &'a str,
        selectors: &'a SelectorMap,
    ) -> Self {
        let (text, comment_warnings) = blank_comments(text);
        Self {
            text,
            map,
            lines,
            source,
            selectors,
            comment_warnings,
        }
    }

    pub(crate) fn read(&self, out: &mut ParsedDocument) {
        for &offset in &self.comment_warnings {
            out.warn(ParseWarning::new(
                self.location(offset),
                "unterminated comment",
                "/*",
            ));
        }
        let mut pos = 0;
        while pos < self.text.len() {
            pos = self.read_statement(pos, true, out);
        }
    }

    fn location(&self, offset: usize) -> Location {
        let (line, column) = self.lines.position(self.map.to_source(offset));
        Location::new(self.source, line, column)
    }

    fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    fn skip_whitespace(&self, mut pos: usize) -> usize {
        while pos < self.text.len() && self.bytes()[pos].is_ascii_whitespace() {
            pos += 1;
        }
        pos
    }

    /// Finds the first of `stops` outside strings and parentheses.
    fn find_stop(&self, mut pos: usize, stops: &[u8]) -> Option<(usize, u8)> {
        let bytes = self.bytes();
        let mut depth = 0usize;
        while pos < bytes.len() {
            let b = bytes[pos];
            match b {
                b'"' | b'\'' => pos = skip_string(bytes, pos),
                b'\\' => pos += 2,
                b'(' => {
                    depth += 1;
                    pos += 1;
                }
                b')' => {
                    depth = depth.saturating_sub(1);
                    pos += 1;
                }
                _ if depth == 0 && stops.contains(&b) => return Some((pos, b)),
                _ => pos += 1,
            }
        }
        None
    }

    /// Offset just past the block whose `{` is at `open`.
    fn skip_block(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut pos = open;
        while let Some((at, b)) = self.find_stop(pos, b"{}") {
            if b == b'{' {
                depth += 1;
            } else {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(at + 1);
                }
            }
            pos = at + 1;
        }
        None
    }

    /// Reads one rule, at-rule, or stray token; returns the next offset.
    fn read_statement(&self, pos: usize, top_level: bool, out: &mut ParsedDocument) -> usize {
        let start = self.skip_whitespace(pos);
        let len = self.text.len();
        if start >= len {
            return len;
        }

        if self.bytes()[start] == b'}' {
            if top_level {
                out.warn(ParseWarning::new(self.location(start), "unexpected '}'", "}"));
            }
            return start + 1;
        }

        let Some((stop, b)) = self.find_stop(start, b"{};") else {
            out.warn(ParseWarning::new(
                self.location(start),
                "unexpected end of input",
                &self.text[start..],
            ));
            return len;
        };
        let prelude = self.text[start..stop].trim();

        if let Some(at_rule) = prelude.strip_prefix('@') {
            return self.read_at_rule(at_rule, start, stop, b, out);
        }

        match b {
            b'{' => self.read_rule(prelude, start, stop, out),
            b';' => {
                out.warn(ParseWarning::new(
                    self.location(start),
                    "declaration outside a rule block",
                    prelude,
                ));
                stop + 1
            }
            // '}' closes the enclosing block; leave it for the caller
            _ => {
                out.warn(ParseWarning::new(
                    self.location(start),
                    "expected '{' after selector",
                    prelude,
                ));
                stop
            }
        }
    }

    fn read_at_rule(
        &self,
        at_rule: &str,
        start: usize,
        stop: usize,
        b: u8,
        out: &mut ParsedDocument,
    ) -> usize {
        let name = at_rule
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match b {
            b';' => stop + 1,
            b'}' => stop,
            _ if GROUPING_AT_RULES.contains(&name.as_str()) => self.read_group(start, stop, out),
            _ => {
                log::trace!("Skipping @{name} block in {}", self.source);
                self.skip_block(stop).unwrap_or_else(|| {
                    out.warn(ParseWarning::new(self.location(start), "unclosed block", at_rule));
                    self.text.len()
                })
            }
        }
    }

    /// Reads the rules inside a grouping at-rule whose `{` is at `open`.
    fn read_group(&self, start: usize, open: usize, out: &mut ParsedDocument) -> usize {
        let mut pos = open + 1;
        loop {
            let next = self.skip_whitespace(pos);
            if next >= self.text.len() {
                out.warn(ParseWarning::new(
                    self.location(start),
                    "unclosed block",
                    &self.text[start..open],
                ));
                return self.text.len();
            }
            if self.bytes()[next] == b'}' {
                return next + 1;
            }
            pos = self.read_statement(next, false, out);
        }
    }

    /// Reads a rule block whose `{` is at `open`.
    fn read_rule(&self, prelude: &str, start: usize, open: usize, out: &mut ParsedDocument) -> usize {
        let selectors: Vec<&str> = split_top_level(prelude, b',')
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if selectors.is_empty() {
            out.warn(ParseWarning::new(self.location(start), "missing selector", "{"));
        }

        let mut pos = open + 1;
        loop {
            let Some((stop, b)) = self.find_stop(pos, b"{};") else {
                out.warn(ParseWarning::new(self.location(start), "unclosed block", prelude));
                return self.text.len();
            };
            match b {
                b'{' => {
                    let at = self.skip_whitespace(pos);
                    out.warn(ParseWarning::new(
                        self.location(at),
                        "nested rule blocks are not supported",
                        &self.text[at..stop],
                    ));
                    match self.skip_block(stop) {
                        Some(next) => pos = next,
                        None => {
                            out.warn(ParseWarning::new(
                                self.location(start),
                                "unclosed block",
                                prelude,
                            ));
                            return self.text.len();
                        }
                    }
                }
                _ => {
                    self.read_declaration(pos, stop, &selectors, out);
                    if b == b'}' {
                        return stop + 1;
                    }
                    pos = stop + 1;
                }
            }
        }
    }

    fn read_declaration(&self, from: usize, to: usize, selectors: &[&str], out: &mut ParsedDocument) {
        let start = self.skip_whitespace(from);
        if start >= to {
            return;
        }
        let raw = self.text[start..to].trim_end();
        let location = self.location(start);

        let Some((property, value)) = raw.split_once(':') else {
            out.warn(ParseWarning::new(location, "missing ':' in declaration", raw));
            return;
        };
        let property = property.trim();
        if property.is_empty() {
            out.warn(ParseWarning::new(location, "empty property name", raw));
            return;
        }
        if !is_property_name(property) {
            out.warn(ParseWarning::new(location, "invalid property name", raw));
            return;
        }
        let (value, important) = strip_important(value.trim());
        if value.is_empty() {
            out.warn(ParseWarning::new(location, "empty value", raw));
            return;
        }

        for selector in selectors {
            let info = self.selectors.classify(selector);
            let mut decl = StyleDeclaration::new(property, value)
                .with_selector(*selector)
                .at(location.clone());
            decl.important = important;
            decl.classes = info.classes;
            decl.component = info.component;
            decl.state = info.state;
            decl.tags = info.tags;
            out.push(decl);
        }
    }
}

/// Replaces comment bytes with spaces (newlines kept).
///
/// Returns the blanked text and the offsets of unterminated comments.
fn blank_comments(text: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(text.len());
    let mut unterminated = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut quote: Option<char> = None;

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q || c == '\n' {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek().is_some_and(|(_, next)| *next == '*') => {
                chars.next();
                out.push_str("  ");
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    if c == '*' && chars.peek().is_some_and(|(_, next)| *next == '/') {
                        chars.next();
                        out.push_str("  ");
                        closed = true;
                        break;
                    }
                    blank(&mut out, c);
                }
                if !closed {
                    unterminated.push(i);
                }
            }
            _ => out.push(c),
        }
    }
    (out, unterminated)
}

fn blank(out: &mut String, c: char) {
    if c == '\n' {
        out.push('\n');
    } else {
        out.extend(std::iter::repeat_n(' ', c.len_utf8()));
    }
}

/// Offset just past the string starting at `pos`.
fn skip_string(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Splits on `sep` outside strings, parentheses and brackets.
fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b if b == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&text[start..]);
    parts
}

fn is_property_name(property: &str) -> bool {
    property
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Splits a trailing `!important` off a value.
fn strip_important(value: &str) -> (&str, bool) {
    match value.rfind('!') {
        Some(bang) if value[bang + 1..].trim().eq_ignore_ascii_case("important") => {
            (value[..bang].trim_end(), true)
        }
        _ => (value, false),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use swatch_core::{ComponentKind, ElementTag, State};

    fn parse(text: &str) -> ParsedDocument {
        let mut out = ParsedDocument::new("test.css");
        parse_css(text, &SelectorMap::default(), &mut out);
        out
    }

    fn pairs(parsed: &ParsedDocument) -> Vec<(String, String)> {
        parsed
            .declarations
            .iter()
            .map(|d| (d.property.clone(), d.value.clone()))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    #[test]
    fn test_simple_rule() {
        let parsed = parse(".card {\n  background: #12161b;\n  box-shadow: none\n}\n");
        assert_eq!(
            pairs(&parsed),
            vec![
                ("background".into(), "#12161b".into()),
                ("box-shadow".into(), "none".into())
            ]
        );
        let first = &parsed.declarations[0];
        assert_eq!(first.component, Some(ComponentKind::Card));
        assert_eq!(first.selector, ".card");
        assert_eq!(first.location, Location::new("test.css", 2, 3));
        assert_eq!(parsed.declarations[1].index, 1);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_selector_list_yields_one_declaration_per_selector() {
        let parsed = parse(".btn:hover, .card { color: #e6e8eb; }");
        assert_eq!(parsed.declarations.len(), 2);
        assert_eq!(parsed.declarations[0].component, Some(ComponentKind::Button));
        assert_eq!(parsed.declarations[0].state, Some(State::Hover));
        assert_eq!(parsed.declarations[1].component, Some(ComponentKind::Card));
        assert_eq!(parsed.declarations[1].state, None);
    }

    #[test]
    fn test_important_and_custom_properties() {
        let parsed = parse(":root { --accent: #3b82f6 ! important; color: var(--accent) }");
        let first = &parsed.declarations[0];
        assert_eq!(first.property, "--accent");
        assert_eq!(first.value, "#3b82f6");
        assert!(first.important);
        assert!(!parsed.declarations[1].important);
    }

    #[test]
    fn test_strings_and_urls_do_not_split() {
        let parsed = parse(
            ".x { content: \"a; b } c\"; background: url(data:image/png;base64,AAA); }",
        );
        assert_eq!(parsed.declarations.len(), 2);
        assert_eq!(parsed.declarations[0].value, "\"a; b } c\"");
        assert!(parsed.declarations[1].value.starts_with("url(data:image/png;base64"));
    }

    #[test]
    fn test_tags_from_selector() {
        let parsed = parse(".badge.tinted { background: rgba(0, 211, 116, 0.12); }");
        assert!(parsed.declarations[0].has_tag(ElementTag::Tinted));
    }

    // ------------------------------------------------------------------------
    // Comments and at-rules
    // ------------------------------------------------------------------------

    #[test]
    fn test_comments_are_ignored_and_positions_kept() {
        let parsed = parse("/* héader */ .card { /* x; y */ border-radius: 10px; }");
        assert_eq!(pairs(&parsed), vec![("border-radius".into(), "10px".into())]);
        assert_eq!(parsed.declarations[0].location.column, 33);
    }

    #[test]
    fn test_media_blocks_are_descended() {
        let parsed = parse(
            "@import url(base.css);\n@media (max-width: 600px) {\n  .btn { min-height: 40px; }\n}\n.card { box-shadow: none; }",
        );
        assert_eq!(
            pairs(&parsed),
            vec![
                ("min-height".into(), "40px".into()),
                ("box-shadow".into(), "none".into())
            ]
        );
        assert_eq!(parsed.declarations[0].location.line, 3);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_font_face_and_keyframes_are_skipped() {
        let parsed = parse(
            "@font-face { font-family: X; src: url(x.woff2); }\n@keyframes pulse { from { opacity: 0; } to { opacity: 1; } }\n.card { color: #e6e8eb; }",
        );
        assert_eq!(pairs(&parsed), vec![("color".into(), "#e6e8eb".into())]);
        assert!(parsed.warnings.is_empty());
    }

    // ------------------------------------------------------------------------
    // Malformed input
    // ------------------------------------------------------------------------

    #[test]
    fn test_missing_colon_is_skipped_with_warning() {
        let parsed = parse(".card {\n  box-shadow none;\n  background: #12161b;\n}");
        assert_eq!(pairs(&parsed), vec![("background".into(), "#12161b".into())]);
        assert_eq!(parsed.warnings.len(), 1);
        let warning = &parsed.warnings[0];
        assert_eq!(warning.location.line, 2);
        assert!(warning.message.contains("missing ':'"));
        assert_eq!(warning.text, "box-shadow none");
    }

    #[test]
    fn test_empty_value_and_property() {
        let parsed = parse(".a { color: ; : red; padding: 4px }");
        assert_eq!(pairs(&parsed), vec![("padding".into(), "4px".into())]);
        let messages: Vec<_> = parsed.warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["empty value", "empty property name"]);
    }

    #[test]
    fn test_nested_block_is_skipped() {
        let parsed = parse(".card { color: #e6e8eb; &:hover { color: #fff; } padding: 8px; }");
        assert_eq!(
            pairs(&parsed),
            vec![
                ("color".into(), "#e6e8eb".into()),
                ("padding".into(), "8px".into())
            ]
        );
        assert!(parsed.warnings[0].message.contains("nested"));
    }

    #[test]
    fn test_unclosed_block_keeps_earlier_declarations() {
        let parsed = parse(".card { color: #e6e8eb;\n.btn { min-height: 44px;");
        assert_eq!(parsed.declarations.len(), 1);
        assert!(parsed.warnings.iter().any(|w| w.message == "nested rule blocks are not supported"));
        assert!(parsed.warnings.iter().any(|w| w.message == "unclosed block"));
    }

    #[test]
    fn test_stray_brace_and_declaration() {
        let parsed = parse("}\ncolor: red;\n.a { color: #fff; }");
        assert_eq!(parsed.declarations.len(), 1);
        let messages: Vec<_> = parsed.warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["unexpected '}'", "declaration outside a rule block"]);
    }

    #[test]
    fn test_unterminated_comment() {
        let parsed = parse(".a { color: #fff; }\n/* never closed");
        assert_eq!(parsed.declarations.len(), 1);
        assert_eq!(parsed.warnings[0].message, "unterminated comment");
        assert_eq!(parsed.warnings[0].location.line, 2);
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse("  \n\n");
        assert!(parsed.declarations.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level(".a:is(.b, .c), .d", b','),
            vec![".a:is(.b, .c)", " .d"]
        );
    }

    #[test]
    fn test_strip_important() {
        assert_eq!(strip_important("red !IMPORTANT"), ("red", true));
        assert_eq!(strip_important("red"), ("red", false));
        assert_eq!(strip_important("red !default"), ("red !default", false));
    }
}
