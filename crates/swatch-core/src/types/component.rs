//! Closed sets describing what a declaration applies to.
//!
//! Rules decide applicability by matching on these variants rather than on
//! raw selector text.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Component kinds covered by the design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// Content container (quote panels, analysis cards).
    Card,
    /// Primary, secondary, and ghost buttons.
    Button,
    /// Signal and status badges.
    Badge,
    /// Text and search inputs.
    Input,
    /// Section headers above groups of cards.
    SectionHeader,
}

impl ComponentKind {
    /// Every component kind, in declaration order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Card,
        ComponentKind::Button,
        ComponentKind::Badge,
        ComponentKind::Input,
        ComponentKind::SectionHeader,
    ];

    /// Returns the kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Card => "card",
            ComponentKind::Button => "button",
            ComponentKind::Badge => "badge",
            ComponentKind::Input => "input",
            ComponentKind::SectionHeader => "section-header",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::unknown_variant("component kind", s))
    }
}

/// Interaction state of a component.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum State {
    /// Resting state (no pseudo-class).
    #[default]
    Default,
    /// Pointer over the element.
    Hover,
    /// Element being pressed.
    Active,
    /// Element holding keyboard focus.
    Focus,
}

impl State {
    /// Every state, in declaration order.
    pub const ALL: [State; 4] = [State::Default, State::Hover, State::Active, State::Focus];

    /// Returns the kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Default => "default",
            State::Hover => "hover",
            State::Active => "active",
            State::Focus => "focus",
        }
    }

    /// Maps a CSS pseudo-class (without the leading colon) to a state.
    ///
    /// `focus-visible` and `focus-within` count as focus.
    pub fn from_pseudo_class(pseudo: &str) -> Option<State> {
        match pseudo {
            "hover" => Some(State::Hover),
            "active" => Some(State::Active),
            "focus" | "focus-visible" | "focus-within" => Some(State::Focus),
            _ => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| Error::unknown_variant("state", s))
    }
}

/// Element-level tags that change which rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementTag {
    /// Small print under charts and tables; may use wider tracking.
    Caption,
    /// Ticker tags and chips; may use wider tracking and uppercase.
    Tag,
    /// Section title text; sentence case only.
    SectionTitle,
    /// Translucent background derived from a status or accent color.
    Tinted,
}

impl ElementTag {
    /// Every tag, in declaration order.
    pub const ALL: [ElementTag; 4] = [
        ElementTag::Caption,
        ElementTag::Tag,
        ElementTag::SectionTitle,
        ElementTag::Tinted,
    ];

    /// Returns the kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementTag::Caption => "caption",
            ElementTag::Tag => "tag",
            ElementTag::SectionTitle => "section-title",
            ElementTag::Tinted => "tinted",
        }
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| Error::unknown_variant("element tag", s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_parse() {
        assert_eq!("card".parse::<ComponentKind>().unwrap(), ComponentKind::Card);
        assert_eq!(
            "section-header".parse::<ComponentKind>().unwrap(),
            ComponentKind::SectionHeader
        );
        assert!("Card".parse::<ComponentKind>().is_err());
        assert!("tooltip".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn test_component_kind_display_matches_parse() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.to_string().parse::<ComponentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_component_kind_serialization() {
        let json = serde_json::to_string(&ComponentKind::SectionHeader).unwrap();
        assert_eq!(json, "\"section-header\"");
    }

    #[test]
    fn test_state_from_pseudo_class() {
        assert_eq!(State::from_pseudo_class("hover"), Some(State::Hover));
        assert_eq!(State::from_pseudo_class("focus-visible"), Some(State::Focus));
        assert_eq!(State::from_pseudo_class("first-child"), None);
    }

    #[test]
    fn test_state_default() {
        assert_eq!(State::default(), State::Default);
        assert_eq!("active".parse::<State>().unwrap(), State::Active);
    }

    #[test]
    fn test_element_tag_parse() {
        assert_eq!(
            "section-title".parse::<ElementTag>().unwrap(),
            ElementTag::SectionTitle
        );
        let err = "heading".parse::<ElementTag>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown element tag 'heading'");
    }
}
