//! Token types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use swatch_core::value::{Color, Length};
use swatch_core::{Error, css_var_name};

/// Token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Colors (hex or rgba).
    Color,
    /// Spacing scale and fixed sizes.
    Spacing,
    /// Corner radii.
    Radius,
    /// Font sizes and font stacks.
    Typography,
    /// Font weights.
    Weight,
}

impl TokenCategory {
    /// Every category, in declaration order.
    pub const ALL: [TokenCategory; 5] = [
        TokenCategory::Color,
        TokenCategory::Spacing,
        TokenCategory::Radius,
        TokenCategory::Typography,
        TokenCategory::Weight,
    ];

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Color => "color",
            TokenCategory::Spacing => "spacing",
            TokenCategory::Radius => "radius",
            TokenCategory::Typography => "typography",
            TokenCategory::Weight => "weight",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::unknown_variant("token category", s))
    }
}

/// Role of a color token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    /// Surfaces and borders.
    #[default]
    Core,
    /// Text colors.
    Text,
    /// Interactive accent.
    Accent,
    /// Market signal colors (up, down, caution).
    Status,
    /// Translucent tints for badges and highlighted rows.
    Muted,
}

/// Highest alpha a `muted` color token may carry.
pub const MUTED_ALPHA_LIMIT: f64 = 0.15;

impl ColorRole {
    /// Every role, in declaration order.
    pub const ALL: [ColorRole; 5] = [
        ColorRole::Core,
        ColorRole::Text,
        ColorRole::Accent,
        ColorRole::Status,
        ColorRole::Muted,
    ];

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Core => "core",
            ColorRole::Text => "text",
            ColorRole::Accent => "accent",
            ColorRole::Status => "status",
            ColorRole::Muted => "muted",
        }
    }

    /// Roles whose values must come from the approved palette.
    pub fn requires_approved_palette(&self) -> bool {
        matches!(self, ColorRole::Core | ColorRole::Text | ColorRole::Accent)
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorRole::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::unknown_variant("color role", s))
    }
}

/// Typed token value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TokenValue {
    /// A color.
    Color(Color),
    /// A length.
    Length(Length),
    /// A plain number (font weights).
    Number(f64),
    /// Anything else (font stacks).
    Raw(String),
}

impl TokenValue {
    /// Returns the color, if this is a color value.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            TokenValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the length, if this is a length value.
    pub fn as_length(&self) -> Option<Length> {
        match self {
            TokenValue::Length(l) => Some(*l),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A named design value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Identifier, e.g. `color.bg`.
    pub id: String,
    /// Category.
    pub category: TokenCategory,
    /// Role (color tokens only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ColorRole>,
    /// Typed value.
    pub value: TokenValue,
    /// CSS text substituted for references to this token.
    pub css: String,
    /// Free-text usage note.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usage: String,
}

impl Token {
    /// Custom-property name, e.g. `--color-bg`.
    pub fn css_var(&self) -> String {
        css_var_name(&self.id)
    }

    /// Returns `true` for translucent tint tokens.
    pub fn is_muted(&self) -> bool {
        self.role == Some(ColorRole::Muted)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.id, self.css)
    }
}
