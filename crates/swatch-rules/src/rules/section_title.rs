//! `no-uppercase-section-title`: section titles use sentence case.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use swatch_core::value::normalize_value;

/// Fails on `text-transform: uppercase` for section headers.
#[derive(Debug, Default)]
pub struct NoUppercaseSectionTitle;

impl Rule for NoUppercaseSectionTitle {
    fn id(&self) -> &'static str {
        "no-uppercase-section-title"
    }

    fn description(&self) -> &'static str {
        "Section titles must not be uppercased"
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        decl.property == "text-transform" && decl.is_section_header()
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> Option<String> {
        (normalize_value(&decl.value) == "uppercase")
            .then(|| "section titles use sentence case, not uppercase".to_string())
    }
}
