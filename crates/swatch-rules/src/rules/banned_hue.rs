//! `no-banned-hue`: no purples, no neon greens.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};

/// Fails when any color in the resolved value is forbidden.
///
/// Runs on every property; token indirection does not hide a banned color.
#[derive(Debug, Default)]
pub struct NoBannedHue;

impl Rule for NoBannedHue {
    fn id(&self) -> &'static str {
        "no-banned-hue"
    }

    fn description(&self) -> &'static str {
        "Colors must not be purple/violet or a banned bright green"
    }

    fn applies_to(&self, _decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        true
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String> {
        let hits: Vec<String> = decl
            .colors()
            .into_iter()
            .filter_map(|m| {
                ctx.constraints
                    .banned_label(&m.color)
                    .map(|label| format!("{} ({label})", m.text))
            })
            .collect();
        if hits.is_empty() {
            return None;
        }
        Some(format!("banned color {}", hits.join(", ")))
    }
}
