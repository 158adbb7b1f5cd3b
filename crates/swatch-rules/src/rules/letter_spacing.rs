//! `letter-spacing-ceiling`: tight tracking outside captions and tags.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use swatch_core::ElementTag;
use swatch_core::value::Length;

/// Tolerance for unit conversion rounding.
const EPSILON: f64 = 1e-9;

/// Fails when letter-spacing exceeds the ceiling on ordinary text.
///
/// `px` and `rem` are converted to em; `normal`, percentages and `calc()`
/// are not checked.
#[derive(Debug, Default)]
pub struct LetterSpacingCeiling;

impl Rule for LetterSpacingCeiling {
    fn id(&self) -> &'static str {
        "letter-spacing-ceiling"
    }

    fn description(&self) -> &'static str {
        "Letter-spacing must be at most 0.02em except on captions and tags"
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        decl.property == "letter-spacing"
            && !decl.has_tag(ElementTag::Caption)
            && !decl.has_tag(ElementTag::Tag)
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String> {
        let ceiling = ctx.constraints.max_letter_spacing_em;
        let em = Length::parse(&decl.value)?.to_em(&ctx.units)?;
        (em > ceiling + EPSILON).then(|| {
            format!(
                "letter-spacing {} exceeds {ceiling}em; wider tracking is for captions and tags",
                decl.value
            )
        })
    }
}
