//! Selector classification.
//!
//! A [`SelectorMap`] says which classes and element names denote which
//! component kinds and element tags. Only the subject of a selector (its
//! last compound, `.title` in `.card .title`) is classified, so a rule
//! for a card's child never counts as a card rule.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use swatch_core::{ComponentKind, ElementTag, State};

/// What a selector says about the elements it matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorInfo {
    /// Classes on the subject compound, in order.
    pub classes: Vec<String>,
    /// Component kind of the subject.
    pub component: Option<ComponentKind>,
    /// Interaction state from the subject's pseudo-classes.
    pub state: Option<State>,
    /// Element tags of the subject.
    pub tags: BTreeSet<ElementTag>,
}

/// Class and element names mapped to component kinds and tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorMap {
    /// Class or element name to component kind.
    pub components: BTreeMap<String, ComponentKind>,
    /// Class or element name to element tag.
    pub tags: BTreeMap<String, ElementTag>,
}

impl Default for SelectorMap {
    fn default() -> Self {
        let components = [
            ("card", ComponentKind::Card),
            ("panel", ComponentKind::Card),
            ("quote-card", ComponentKind::Card),
            ("button", ComponentKind::Button),
            ("btn", ComponentKind::Button),
            ("badge", ComponentKind::Badge),
            ("signal-badge", ComponentKind::Badge),
            ("chip", ComponentKind::Badge),
            ("input", ComponentKind::Input),
            ("textarea", ComponentKind::Input),
            ("select", ComponentKind::Input),
            ("search", ComponentKind::Input),
            ("section-header", ComponentKind::SectionHeader),
        ];
        let tags = [
            ("caption", ElementTag::Caption),
            ("figcaption", ElementTag::Caption),
            ("tag", ElementTag::Tag),
            ("ticker-tag", ElementTag::Tag),
            ("section-title", ElementTag::SectionTitle),
            ("tinted", ElementTag::Tinted),
        ];
        Self {
            components: components
                .into_iter()
                .map(|(name, kind)| (name.to_string(), kind))
                .collect(),
            tags: tags
                .into_iter()
                .map(|(name, tag)| (name.to_string(), tag))
                .collect(),
        }
    }
}

impl SelectorMap {
    /// A map with no entries; nothing is classified.
    pub fn empty() -> Self {
        Self {
            components: BTreeMap::new(),
            tags: BTreeMap::new(),
        }
    }

    /// Looks a name up, also trying the block of a BEM modifier
    /// (`btn--primary` is a `btn`).
    fn lookup<'m, T>(map: &'m BTreeMap<String, T>, name: &str) -> Option<&'m T> {
        map.get(name).or_else(|| {
            name.split_once("--")
                .and_then(|(block, _)| map.get(block))
        })
    }

    /// Classifies one selector (no commas).
    pub fn classify(&self, selector: &str) -> SelectorInfo {
        let compound = subject(selector);
        let parts = split_compound(compound);

        let mut info = SelectorInfo::default();
        let names = parts
            .element
            .iter()
            .map(String::as_str)
            .chain(parts.classes.iter().map(String::as_str));
        for name in names {
            if info.component.is_none() {
                info.component = Self::lookup(&self.components, name).copied();
            }
            if let Some(tag) = Self::lookup(&self.tags, name) {
                info.tags.insert(*tag);
            }
        }
        info.state = parts
            .pseudo_classes
            .iter()
            .find_map(|p| State::from_pseudo_class(p));
        info.classes = parts.classes;
        info
    }
}

/// Returns the last compound selector.
fn subject(selector: &str) -> &str {
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in selector.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ' ' | '\t' | '\n' | '\r' | '>' | '+' | '~' if depth == 0 => start = i + c.len_utf8(),
            _ => {}
        }
    }
    selector[start..].trim()
}

#[derive(Debug, Default)]
struct CompoundParts {
    element: Option<String>,
    classes: Vec<String>,
    pseudo_classes: Vec<String>,
}

fn split_compound(compound: &str) -> CompoundParts {
    let mut parts = CompoundParts::default();
    let chars: Vec<char> = compound.chars().collect();
    let mut i = 0;

    let read_name = |i: &mut usize| -> String {
        let start = *i;
        while *i < chars.len()
            && (chars[*i].is_alphanumeric() || chars[*i] == '-' || chars[*i] == '_')
        {
            *i += 1;
        }
        chars[start..*i].iter().collect()
    };

    let element = read_name(&mut i);
    if !element.is_empty() {
        parts.element = Some(element.to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '.' => {
                i += 1;
                let name = read_name(&mut i);
                if !name.is_empty() {
                    parts.classes.push(name);
                }
            }
            ':' => {
                i += 1;
                let pseudo_element = chars.get(i) == Some(&':');
                if pseudo_element {
                    i += 1;
                }
                let name = read_name(&mut i).to_ascii_lowercase();
                if !pseudo_element && !name.is_empty() {
                    parts.pseudo_classes.push(name);
                }
                if chars.get(i) == Some(&'(') {
                    i = skip_group(&chars, i, '(', ')');
                }
            }
            '[' => i = skip_group(&chars, i, '[', ']'),
            _ => i += 1,
        }
    }
    parts
}

/// Index just past the group opened at `open_at`.
fn skip_group(chars: &[char], open_at: usize, open: char, close: char) -> usize {
    let mut depth = 0usize;
    for (offset, c) in chars[open_at..].iter().enumerate() {
        if *c == open {
            depth += 1;
        } else if *c == close {
            depth -= 1;
            if depth == 0 {
                return open_at + offset + 1;
            }
        }
    }
    chars.len()
}
