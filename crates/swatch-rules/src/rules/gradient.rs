//! `no-gradient`: flat surfaces only.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use swatch_core::value::gradient_functions;

/// Properties a gradient may not appear on.
const PROPERTIES: &[&str] = &[
    "background",
    "background-image",
    "border",
    "border-image",
    "border-image-source",
    "box-shadow",
];

/// Fails when a background, border, or shadow uses a gradient function.
#[derive(Debug, Default)]
pub struct NoGradient;

impl Rule for NoGradient {
    fn id(&self) -> &'static str {
        "no-gradient"
    }

    fn description(&self) -> &'static str {
        "Backgrounds, borders, and shadows must not use gradients"
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> bool {
        decl.property_in(PROPERTIES)
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, _ctx: &RuleContext<'_>) -> Option<String> {
        let functions = gradient_functions(&decl.value);
        let first = functions.first()?;
        let target = match decl.component {
            Some(kind) => format!("{kind} {}", decl.property),
            None => decl.property.clone(),
        };
        Some(format!("{first} is not allowed on {target}; use a flat surface color"))
    }
}
