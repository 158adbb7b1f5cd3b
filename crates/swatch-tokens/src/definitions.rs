//! Raw definition source.
//!
//! A definition file is TOML with five sections:
//!
//! ```toml
//! [palette]
//! approved = ["#0b0e11", "#e6e8eb"]
//!
//! [[token]]
//! id = "color.bg"
//! category = "color"
//! role = "core"
//! value = "#0b0e11"
//! usage = "App background"
//!
//! [constraints]
//! max_tinted_alpha = 0.15
//!
//! [typography.body]
//! size = "token(font.size.body)"
//! weight = 400
//!
//! [[component]]
//! kind = "card"
//! state = "default"
//! property = "box-shadow"
//! allowed = ["none"]
//! ```
//!
//! This module only describes the shape of the file. Typing and invariant
//! checks happen in [`Registry::load`](crate::Registry::load) and in the
//! rule-set builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use swatch_core::{Error, Result};

/// Source name used for the embedded definitions.
pub const BUILTIN_SOURCE: &str = "<builtin>";

/// Embedded default definitions.
pub const BUILTIN_DEFINITIONS: &str = include_str!("../definitions/default.toml");

/// Parsed definition file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Definitions {
    /// Where the definitions came from (file path or `<builtin>`).
    #[serde(skip)]
    pub source_name: String,

    /// Approved palette.
    #[serde(default)]
    pub palette: PaletteDef,

    /// Token table.
    #[serde(default, rename = "token")]
    pub tokens: Vec<TokenDef>,

    /// Anti-pattern constraints.
    #[serde(default)]
    pub constraints: ConstraintsDef,

    /// Typography scale, keyed by scale name.
    #[serde(default)]
    pub typography: BTreeMap<String, TypographyDef>,

    /// Component rules.
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentRuleDef>,
}

/// Approved palette section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteDef {
    /// Hex colors core/text/accent tokens may use.
    #[serde(default)]
    pub approved: Vec<String>,
}

/// A number or a text value (length, color, or token reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarDef {
    /// Numeric literal.
    Number(f64),
    /// Text literal.
    Text(String),
}

impl std::fmt::Display for ScalarDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarDef::Number(n) => write!(f, "{n}"),
            ScalarDef::Text(s) => f.write_str(s),
        }
    }
}

/// One `[[token]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDef {
    /// Identifier.
    pub id: String,
    /// Category name.
    pub category: String,
    /// Color role name.
    #[serde(default)]
    pub role: Option<String>,
    /// Value as written.
    pub value: ScalarDef,
    /// Usage note.
    #[serde(default)]
    pub usage: String,
}

/// `[constraints]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintsDef {
    /// Alpha ceiling for tinted backgrounds.
    #[serde(default = "default_max_tinted_alpha")]
    pub max_tinted_alpha: f64,

    /// Letter-spacing ceiling outside captions and tags, in em.
    #[serde(default = "default_max_letter_spacing_em")]
    pub max_letter_spacing_em: f64,

    /// Minimum button height in px.
    #[serde(default = "default_min_touch_target_px")]
    pub min_touch_target_px: f64,

    /// Forbidden exact colors.
    #[serde(default)]
    pub banned_colors: Vec<BannedColorDef>,

    /// Forbidden hue ranges.
    #[serde(default)]
    pub banned_hues: Vec<HueRangeDef>,
}

fn default_max_tinted_alpha() -> f64 {
    0.15
}

fn default_max_letter_spacing_em() -> f64 {
    0.02
}

fn default_min_touch_target_px() -> f64 {
    44.0
}

impl Default for ConstraintsDef {
    fn default() -> Self {
        Self {
            max_tinted_alpha: default_max_tinted_alpha(),
            max_letter_spacing_em: default_max_letter_spacing_em(),
            min_touch_target_px: default_min_touch_target_px(),
            banned_colors: Vec::new(),
            banned_hues: Vec::new(),
        }
    }
}

/// A forbidden color literal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannedColorDef {
    /// Color text (hex, rgb, or named).
    pub value: String,
    /// Label used in messages.
    #[serde(default)]
    pub label: String,
}

/// A forbidden hue range in degrees; `from > to` wraps through 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HueRangeDef {
    /// Start hue (inclusive).
    pub from: f64,
    /// End hue (inclusive).
    pub to: f64,
    /// Colors less saturated than this never match.
    #[serde(default = "default_min_saturation")]
    pub min_saturation: f64,
    /// Label used in messages.
    #[serde(default)]
    pub label: String,
}

fn default_min_saturation() -> f64 {
    0.25
}

/// One `[typography.<name>]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypographyDef {
    /// Font size (length or token reference).
    #[serde(default)]
    pub size: Option<ScalarDef>,
    /// Font weight (number or token reference).
    #[serde(default)]
    pub weight: Option<ScalarDef>,
    /// Allowed letter-spacing range in em, `[min, max]`.
    #[serde(default)]
    pub letter_spacing: Option<[f64; 2]>,
    /// Allowed `text-transform` values.
    #[serde(default = "default_transforms")]
    pub transforms: Vec<String>,
    /// Element tags this scale entry carries.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_transforms() -> Vec<String> {
    vec!["none".to_string()]
}

/// One `[[component]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRuleDef {
    /// Component kind name.
    pub kind: String,
    /// State name; absent means every state.
    #[serde(default)]
    pub state: Option<String>,
    /// Property the rule constrains.
    pub property: String,
    /// Allowed values (literals or token references).
    pub allowed: Vec<String>,
    /// Explanation shown with violations.
    #[serde(default)]
    pub note: String,
}

impl Definitions {
    /// Parses definitions from TOML text.
    pub fn from_toml_str(source_name: impl Into<String>, text: &str) -> Result<Self> {
        let source_name = source_name.into();
        let mut defs: Definitions =
            toml::from_str(text).map_err(|e| Error::load(source_name.clone(), e.to_string()))?;
        defs.source_name = source_name;
        Ok(defs)
    }

    /// Reads and parses a definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(path.display().to_string(), &text)
    }

    /// Returns the embedded default definitions.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_SOURCE, BUILTIN_DEFINITIONS)
    }
}
