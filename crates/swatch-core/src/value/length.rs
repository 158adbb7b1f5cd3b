//! Length values (`44px`, `0.02em`, `1.5rem`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([+-]?(?:\d+\.?\d*|\.\d+))(px|em|rem|%)?$")
        .unwrap_or_else(|e| unreachable!("length pattern is valid: {e}"))
});

/// Unit of a [`Length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// CSS pixels.
    Px,
    /// Relative to the element font size.
    Em,
    /// Relative to the root font size.
    Rem,
    /// Percentage of a context-dependent reference.
    Percent,
    /// Bare number (only `0` is a valid bare length).
    Unitless,
}

impl LengthUnit {
    /// Returns the CSS suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Em => "em",
            LengthUnit::Rem => "rem",
            LengthUnit::Percent => "%",
            LengthUnit::Unitless => "",
        }
    }
}

/// Font sizes used to convert between units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitContext {
    /// Root font size in px (`rem` reference).
    pub root_font_px: f64,
    /// Element font size in px (`em` reference).
    pub base_font_px: f64,
}

impl Default for UnitContext {
    fn default() -> Self {
        Self {
            root_font_px: 16.0,
            base_font_px: 14.0,
        }
    }
}

/// A numeric CSS length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    /// Magnitude.
    pub value: f64,
    /// Unit.
    pub unit: LengthUnit,
}

impl Length {
    /// Creates a pixel length.
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// Creates an em length.
    pub fn em(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Em,
        }
    }

    /// Parses a single length; returns `None` for keywords and `calc()`.
    pub fn parse(text: &str) -> Option<Length> {
        let caps = LENGTH_RE.captures(text.trim())?;
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        let unit = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
            None => LengthUnit::Unitless,
            Some(u) => match u.as_str() {
                "px" => LengthUnit::Px,
                "em" => LengthUnit::Em,
                "rem" => LengthUnit::Rem,
                _ => LengthUnit::Percent,
            },
        };
        Some(Length { value, unit })
    }

    /// Converts to pixels; `None` when the unit has no fixed reference.
    pub fn to_px(&self, ctx: &UnitContext) -> Option<f64> {
        match self.unit {
            LengthUnit::Px => Some(self.value),
            LengthUnit::Rem => Some(self.value * ctx.root_font_px),
            LengthUnit::Em => Some(self.value * ctx.base_font_px),
            LengthUnit::Unitless if self.value == 0.0 => Some(0.0),
            LengthUnit::Unitless | LengthUnit::Percent => None,
        }
    }

    /// Converts to em relative to the element font size.
    pub fn to_em(&self, ctx: &UnitContext) -> Option<f64> {
        match self.unit {
            LengthUnit::Em => Some(self.value),
            LengthUnit::Rem => Some(self.value * ctx.root_font_px / ctx.base_font_px),
            LengthUnit::Px => Some(self.value / ctx.base_font_px),
            LengthUnit::Unitless if self.value == 0.0 => Some(0.0),
            LengthUnit::Unitless | LengthUnit::Percent => None,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}
