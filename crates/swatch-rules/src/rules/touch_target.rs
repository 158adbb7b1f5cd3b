//! `touch-target-floor`: buttons are at least 44px tall.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use swatch_core::ComponentKind;
use swatch_core::value::Length;

/// Fails when a button's `min-height` is below the floor.
#[derive(Debug, Default)]
pub struct TouchTargetFloor;

impl Rule for TouchTargetFloor {
    fn id(&self) -> &'static str {
        "touch-target-floor"
    }

    fn description(&self) -> &'static str {
        "Buttons must declare a min-height of at least 44px"
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        decl.is_component(ComponentKind::Button) && decl.property == "min-height"
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String> {
        let floor = ctx.constraints.min_touch_target_px;
        let px = Length::parse(&decl.value)?.to_px(&ctx.units)?;
        (px < floor).then(|| format!("button min-height {} is below {floor}px", decl.value))
    }
}
