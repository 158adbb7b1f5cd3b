//! Component descriptions.
//!
//! A component description is a TOML file listing components and the
//! styles they declare:
//!
//! ```toml
//! [[component]]
//! kind = "button"
//! state = "hover"
//! classes = ["btn-primary"]
//! style = { background = "token(color.accent)", min-height = "44px" }
//! ```
//!
//! `kind` is required, `state`, `tags` and `classes` are optional. Style
//! values must be strings; they are read exactly like CSS values.

use crate::document::{LineIndex, ParseWarning, ParsedDocument};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use swatch_core::{ComponentKind, ElementTag, Location, State, StyleDeclaration};
use toml::Spanned;

#[derive(Debug, Default, Deserialize)]
struct ComponentFile {
    #[serde(default)]
    component: Vec<Spanned<ComponentEntry>>,
}

#[derive(Debug, Deserialize)]
struct ComponentEntry {
    kind: Option<Spanned<String>>,
    state: Option<Spanned<String>>,
    #[serde(default)]
    tags: Vec<Spanned<String>>,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    style: BTreeMap<Spanned<String>, Spanned<toml::Value>>,
}

struct EntryReader<'a> {
    lines: LineIndex<'a>,
    source: String,
}

impl EntryReader<'_> {
    fn location(&self, offset: usize) -> Location {
        let (line, column) = self.lines.position(offset);
        Location::new(self.source.clone(), line, column)
    }

    fn parse_variant<T: FromStr>(
        &self,
        field: &Spanned<String>,
        what: &str,
        out: &mut ParsedDocument,
    ) -> Option<T> {
        match field.get_ref().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                out.warn(ParseWarning::new(
                    self.location(field.span().start),
                    format!("unknown {what}"),
                    field.get_ref(),
                ));
                None
            }
        }
    }

    fn read_entry(&self, entry: &Spanned<ComponentEntry>, out: &mut ParsedDocument) {
        let entry_start = entry.span().start;
        let entry = entry.get_ref();

        let Some(kind_field) = &entry.kind else {
            out.warn(ParseWarning::new(
                self.location(entry_start),
                "component without a kind",
                "[[component]]",
            ));
            return;
        };
        let Some(kind) = self.parse_variant::<ComponentKind>(kind_field, "component kind", out)
        else {
            return;
        };
        let state = match &entry.state {
            Some(field) => match self.parse_variant::<State>(field, "state", out) {
                Some(state) => Some(state),
                None => return,
            },
            None => None,
        };
        let tags: Vec<ElementTag> = entry
            .tags
            .iter()
            .filter_map(|tag| self.parse_variant(tag, "element tag", out))
            .collect();

        let mut style: Vec<_> = entry.style.iter().collect();
        style.sort_by_key(|(property, _)| property.span().start);

        for (property, value) in style {
            let location = self.location(property.span().start);
            let Some(text) = value.get_ref().as_str() else {
                out.warn(ParseWarning::new(
                    location,
                    "style values must be strings",
                    &format!("{} = {}", property.get_ref(), value.get_ref()),
                ));
                continue;
            };
            if text.trim().is_empty() {
                out.warn(ParseWarning::new(location, "empty value", property.get_ref()));
                continue;
            }

            let mut decl = StyleDeclaration::new(property.get_ref(), text)
                .with_component(kind)
                .at(location);
            decl.state = state;
            decl.classes = entry.classes.clone();
            decl.tags.extend(tags.iter().copied());
            out.push(decl);
        }
    }
}

/// Parses a component description file, appending to `out`.
///
/// Malformed TOML yields a single warning and no declarations.
pub fn parse_components(text: &str, out: &mut ParsedDocument) {
    let reader = EntryReader {
        lines: LineIndex::new(text),
        source: out.source.clone(),
    };
    let file: ComponentFile = match toml::from_str(text) {
        Ok(file) => file,
        Err(e) => {
            let offset = e.span().map_or(0, |span| span.start);
            let excerpt = e.span().and_then(|span| text.get(span)).unwrap_or_default();
            out.warn(ParseWarning::new(
                reader.location(offset),
                format!("invalid component description: {}", e.message()),
                excerpt,
            ));
            return;
        }
    };
    for entry in &file.component {
        reader.read_entry(entry, out);
    }
}
