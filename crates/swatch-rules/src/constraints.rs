//! Color constraints and numeric ceilings.

use swatch_core::value::Color;
use swatch_core::{Error, Result};
use swatch_tokens::definitions::ConstraintsDef;

/// The alpha ceiling may be tightened but never raised above this.
pub const ALPHA_CEILING_LIMIT: f64 = swatch_tokens::MUTED_ALPHA_LIMIT;

/// A forbidden color or color pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorConstraint {
    /// An exact color, compared on RGB (alpha ignored).
    Exact {
        /// The forbidden color.
        color: Color,
        /// Name shown in messages.
        label: String,
    },
    /// A hue range in degrees, inclusive; `from > to` wraps through 0.
    HueRange {
        /// Start hue.
        from: f64,
        /// End hue.
        to: f64,
        /// Colors less saturated than this never match.
        min_saturation: f64,
        /// Name shown in messages.
        label: String,
    },
}

impl ColorConstraint {
    /// Returns the constraint label if `color` is forbidden.
    pub fn matches(&self, color: &Color) -> Option<&str> {
        match self {
            ColorConstraint::Exact { color: banned, label } => {
                banned.same_rgb(color).then_some(label.as_str())
            }
            ColorConstraint::HueRange {
                from,
                to,
                min_saturation,
                label,
            } => {
                if color.saturation() < *min_saturation {
                    return None;
                }
                let hue = color.hue();
                let inside = if from <= to {
                    (*from..=*to).contains(&hue)
                } else {
                    hue >= *from || hue <= *to
                };
                inside.then_some(label.as_str())
            }
        }
    }
}

/// Validated `[constraints]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    /// Forbidden colors, in definition order.
    pub banned: Vec<ColorConstraint>,
    /// Alpha ceiling for tinted backgrounds (inclusive).
    pub max_tinted_alpha: f64,
    /// Letter-spacing ceiling outside captions and tags, in em (inclusive).
    pub max_letter_spacing_em: f64,
    /// Minimum button `min-height` in px.
    pub min_touch_target_px: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            banned: Vec::new(),
            max_tinted_alpha: ALPHA_CEILING_LIMIT,
            max_letter_spacing_em: 0.02,
            min_touch_target_px: 44.0,
        }
    }
}

impl Constraints {
    /// Validates a `[constraints]` section.
    pub fn from_def(def: &ConstraintsDef, source_name: &str) -> Result<Self> {
        if !(0.0..=ALPHA_CEILING_LIMIT).contains(&def.max_tinted_alpha) {
            return Err(Error::load(
                source_name,
                format!(
                    "max_tinted_alpha {} is outside 0..={ALPHA_CEILING_LIMIT}",
                    def.max_tinted_alpha
                ),
            ));
        }
        if def.max_letter_spacing_em < 0.0 || def.min_touch_target_px < 0.0 {
            return Err(Error::load(source_name, "constraint ceilings must not be negative"));
        }

        let mut banned = Vec::with_capacity(def.banned_colors.len() + def.banned_hues.len());
        for entry in &def.banned_colors {
            let color = Color::parse(&entry.value).ok_or_else(|| {
                Error::load(source_name, format!("banned color '{}' is not a color", entry.value))
            })?;
            let label = if entry.label.is_empty() {
                color.to_hex()
            } else {
                entry.label.clone()
            };
            banned.push(ColorConstraint::Exact { color, label });
        }
        for range in &def.banned_hues {
            let valid = |h: f64| (0.0..=360.0).contains(&h);
            if !valid(range.from) || !valid(range.to) {
                return Err(Error::load(
                    source_name,
                    format!("hue range {}..{} is outside 0..=360", range.from, range.to),
                ));
            }
            banned.push(ColorConstraint::HueRange {
                from: range.from,
                to: range.to,
                min_saturation: range.min_saturation,
                label: if range.label.is_empty() {
                    format!("hue {}-{}", range.from, range.to)
                } else {
                    range.label.clone()
                },
            });
        }

        Ok(Self {
            banned,
            max_tinted_alpha: def.max_tinted_alpha,
            max_letter_spacing_em: def.max_letter_spacing_em,
            min_touch_target_px: def.min_touch_target_px,
        })
    }

    /// Label of the first constraint forbidding `color`.
    pub fn banned_label(&self, color: &Color) -> Option<&str> {
        self.banned.iter().find_map(|c| c.matches(color))
    }
}
