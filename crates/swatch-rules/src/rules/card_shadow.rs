//! `shadow-on-card-default`: cards are flat at rest.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use swatch_core::value::is_none_like;
use swatch_core::{ComponentKind, State};

/// Fails when a resting card declares a shadow.
#[derive(Debug, Default)]
pub struct ShadowOnCardDefault;

impl Rule for ShadowOnCardDefault {
    fn id(&self) -> &'static str {
        "shadow-on-card-default"
    }

    fn description(&self) -> &'static str {
        "Cards must not declare a box-shadow in their default state"
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        decl.is_component(ComponentKind::Card)
            && decl.effective_state() == State::Default
            && decl.property == "box-shadow"
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> Option<String> {
        (!is_none_like(&decl.value)).then(|| {
            format!(
                "card declares box-shadow '{}' at rest; separate cards with surface color or a border",
                decl.value
            )
        })
    }
}
