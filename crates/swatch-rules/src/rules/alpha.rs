//! `alpha-ceiling`: tints stay subtle.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use swatch_core::ElementTag;

const PROPERTIES: &[&str] = &["background", "background-color"];

/// Fails when a tinted background is more opaque than the ceiling.
///
/// A background is tinted when the element carries the `tinted` tag or the
/// value references a muted token. The ceiling itself passes.
#[derive(Debug, Default)]
pub struct AlphaCeiling;

impl Rule for AlphaCeiling {
    fn id(&self) -> &'static str {
        "alpha-ceiling"
    }

    fn description(&self) -> &'static str {
        "Tinted backgrounds must not exceed the alpha ceiling (0.15)"
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        decl.property_in(PROPERTIES)
            && (decl.has_tag(ElementTag::Tinted) || decl.references_muted())
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String> {
        let ceiling = ctx.constraints.max_tinted_alpha;
        let worst = decl
            .colors()
            .into_iter()
            .filter(|m| m.color.alpha > ceiling)
            .max_by(|a, b| a.color.alpha.total_cmp(&b.color.alpha))?;
        Some(format!(
            "tinted background alpha {} exceeds {ceiling} ({})",
            round3(worst.color.alpha),
            worst.text
        ))
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
