//! CSS fences in Markdown.
//!
//! Every fenced code block whose info string starts with `css` is read as a
//! stylesheet. Locations point into the Markdown file, not the fence.

use crate::css::CssReader;
use crate::document::{LineIndex, ParsedDocument, SourceMap};
use crate::selector::SelectorMap;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// A fenced CSS block: its text and where each piece of it sits in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssFence {
    /// Fence contents, with any blockquote or list prefixes removed.
    pub text: String,
    /// Maps offsets in `text` to offsets in the Markdown source.
    pub map: SourceMap,
}

/// Returns `true` when a fence info string names CSS.
fn is_css_info(info: &str) -> bool {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .is_some_and(|lang| lang.eq_ignore_ascii_case("css"))
}

/// Extracts the CSS fences of a Markdown document, in order.
pub fn extract_css_fences(markdown: &str) -> Vec<CssFence> {
    let mut fences = Vec::new();
    let mut current: Option<CssFence> = None;

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) if is_css_info(&info) => {
                current = Some(CssFence {
                    text: String::new(),
                    map: SourceMap::default(),
                });
            }
            Event::Text(text) => {
                if let Some(fence) = current.as_mut() {
                    // Lines inside blockquotes and lists are not contiguous in the source.
                    fence.map.push(fence.text.len(), range.start);
                    fence.text.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(fence) = current.take() {
                    fences.push(fence);
                }
            }
            _ => {}
        }
    }
    fences
}

/// Parses every CSS fence of `markdown`, appending to `out`.
pub fn parse_markdown(markdown: &str, selectors: &SelectorMap, out: &mut ParsedDocument) {
    let lines = LineIndex::new(markdown);
    let source = out.source.clone();
    let fences = extract_css_fences(markdown);
    log::debug!("Found {} CSS fences in {source}", fences.len());
    for fence in fences {
        CssReader::new(&fence.text, &fence.map, &lines, &source, selectors).read(out);
    }
}
