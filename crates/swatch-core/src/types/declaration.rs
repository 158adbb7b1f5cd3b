//! Style declarations extracted from documents under test.

use crate::types::component::{ComponentKind, ElementTag, State};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Position of a declaration in its source document (1-based).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Source name, usually the file path.
    pub source: String,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
}

impl Location {
    /// Creates a location.
    pub fn new(source: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            source: source.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// A single property/value assertion, optionally tagged with component
/// kind, interaction state, and element tags.
///
/// Produced by the parser and consumed by the validator within one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    /// Position in the parsed sequence (0-based).
    pub index: usize,
    /// Property name, lowercased.
    pub property: String,
    /// Value as written, trimmed, with `!important` removed.
    pub value: String,
    /// Whether the value carried `!important`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub important: bool,
    /// Selector the declaration belongs to (empty for component descriptions).
    #[serde(default)]
    pub selector: String,
    /// Class names found in the selector.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Component kind, when the selector maps to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentKind>,
    /// Interaction state, when the selector names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    /// Element tags.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<ElementTag>,
    /// Where the declaration was found.
    pub location: Location,
}

impl StyleDeclaration {
    /// Creates an untagged declaration.
    ///
    /// The property is lowercased and both sides are trimmed.
    pub fn new(property: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Self {
            index: 0,
            property: property.as_ref().trim().to_ascii_lowercase(),
            value: value.as_ref().trim().to_string(),
            important: false,
            selector: String::new(),
            classes: Vec::new(),
            component: None,
            state: None,
            tags: BTreeSet::new(),
            location: Location::default(),
        }
    }

    /// Sets the position in the parsed sequence.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Sets the component kind.
    pub fn with_component(mut self, kind: ComponentKind) -> Self {
        self.component = Some(kind);
        self
    }

    /// Sets the interaction state.
    pub fn with_state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    /// Adds an element tag.
    pub fn with_tag(mut self, tag: ElementTag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Adds a selector class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the selector text.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Sets the source location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Marks the declaration `!important`.
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    /// State used for rule matching; untagged declarations count as default.
    pub fn effective_state(&self) -> State {
        self.state.unwrap_or_default()
    }

    /// Returns `true` if the declaration carries `tag`.
    pub fn has_tag(&self, tag: ElementTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Returns `true` if the declaration belongs to `kind`.
    pub fn is_component(&self, kind: ComponentKind) -> bool {
        self.component == Some(kind)
    }

    /// Returns `true` for section headers and section-title text.
    pub fn is_section_header(&self) -> bool {
        self.is_component(ComponentKind::SectionHeader) || self.has_tag(ElementTag::SectionTitle)
    }

    /// Returns `true` if the property is one of `properties`.
    pub fn property_in(&self, properties: &[&str]) -> bool {
        properties.contains(&self.property.as_str())
    }

    /// Returns `true` if the selector carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selector.is_empty() {
            write!(f, "{}: {}", self.property, self.value)
        } else {
            write!(f, "{} {{ {}: {} }}", self.selector, self.property, self.value)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_property() {
        let decl = StyleDeclaration::new("  Box-Shadow ", " none ");
        assert_eq!(decl.property, "box-shadow");
        assert_eq!(decl.value, "none");
        assert_eq!(decl.component, None);
        assert_eq!(decl.effective_state(), State::Default);
    }

    #[test]
    fn test_builder_tags() {
        let decl = StyleDeclaration::new("text-transform", "uppercase")
            .with_component(ComponentKind::SectionHeader)
            .with_state(State::Hover)
            .with_tag(ElementTag::SectionTitle)
            .with_class("section-header");

        assert!(decl.is_section_header());
        assert!(decl.has_tag(ElementTag::SectionTitle));
        assert!(decl.has_class("section-header"));
        assert_eq!(decl.effective_state(), State::Hover);
    }

    #[test]
    fn test_section_title_tag_alone_is_section_header() {
        let decl = StyleDeclaration::new("color", "#fff").with_tag(ElementTag::SectionTitle);
        assert!(decl.is_section_header());
        assert!(!decl.is_component(ComponentKind::SectionHeader));
    }

    #[test]
    fn test_property_in() {
        let decl = StyleDeclaration::new("background-color", "#000");
        assert!(decl.property_in(&["background", "background-color"]));
        assert!(!decl.property_in(&["border"]));
    }

    #[test]
    fn test_location_display() {
        let loc = Location::new("styles/app.css", 12, 5);
        assert_eq!(loc.to_string(), "styles/app.css:12:5");
    }

    #[test]
    fn test_display_with_selector() {
        let decl = StyleDeclaration::new("min-height", "40px").with_selector(".btn");
        assert_eq!(decl.to_string(), ".btn { min-height: 40px }");
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let decl = StyleDeclaration::new("color", "#fff");
        let json = serde_json::to_string(&decl).unwrap();
        assert!(!json.contains("classes"));
        assert!(!json.contains("component"));
        assert!(!json.contains("important"));

        let back: StyleDeclaration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decl);
    }
}
