//! `off-palette`: literal colors should come from the token set.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use swatch_core::Severity;

/// Warns when a literal color matches no color token.
///
/// Fully transparent colors are ignored. Colors reached through a token
/// are on the palette by construction.
#[derive(Debug, Default)]
pub struct OffPalette;

impl Rule for OffPalette {
    fn id(&self) -> &'static str {
        "off-palette"
    }

    fn description(&self) -> &'static str {
        "Literal colors should match a color token"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        !decl.literal_colors().is_empty()
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String> {
        let stray: Vec<String> = decl
            .literal_colors()
            .into_iter()
            .filter(|m| m.color.alpha > 0.0 && ctx.registry.find_color(&m.color).is_none())
            .map(|m| m.text)
            .collect();
        if stray.is_empty() {
            return None;
        }
        Some(format!("{} matches no color token", stray.join(", ")))
    }
}
