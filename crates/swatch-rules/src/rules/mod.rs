//! Built-in rules.
//!
//! | id | fires when |
//! |---|---|
//! | `no-gradient` | a background, border, or shadow uses a gradient |
//! | `no-banned-hue` | any color is purple/violet or a banned bright green |
//! | `alpha-ceiling` | a tinted background is more opaque than 0.15 |
//! | `letter-spacing-ceiling` | tracking above 0.02em outside captions and tags |
//! | `no-uppercase-section-title` | a section title is uppercased |
//! | `shadow-on-card-default` | a resting card declares a box-shadow |
//! | `touch-target-floor` | a button's min-height is below 44px |
//! | `typography-scale` | text deviates from its type-scale style |
//! | `component-allowed-values` | a component property uses an unsanctioned value |
//! | `off-palette` | a literal color matches no color token (warning) |

mod alpha;
mod banned_hue;
mod card_shadow;
mod component_values;
mod gradient;
mod letter_spacing;
mod off_palette;
mod section_title;
mod touch_target;
mod typography_scale;

pub use alpha::AlphaCeiling;
pub use banned_hue::NoBannedHue;
pub use card_shadow::ShadowOnCardDefault;
pub use component_values::ComponentAllowedValues;
pub use gradient::NoGradient;
pub use letter_spacing::LetterSpacingCeiling;
pub use off_palette::OffPalette;
pub use section_title::NoUppercaseSectionTitle;
pub use touch_target::TouchTargetFloor;
pub use typography_scale::TypographyScale;

use crate::rule::Rule;

/// Pseudo-rule reported when a token reference does not resolve.
pub const UNRESOLVED_TOKEN: &str = "unresolved-token";

/// All built-in rules, in evaluation order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(NoGradient),
        Box::new(NoBannedHue),
        Box::new(AlphaCeiling),
        Box::new(LetterSpacingCeiling),
        Box::new(NoUppercaseSectionTitle),
        Box::new(ShadowOnCardDefault),
        Box::new(TouchTargetFloor),
        Box::new(TypographyScale),
        Box::new(ComponentAllowedValues),
        Box::new(OffPalette),
    ]
}

// ============================================================================
// Tests
// ============================================================================
