//! `component-allowed-values`: components use their sanctioned values.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};

/// Fails when a component property uses a value outside its rule.
#[derive(Debug, Default)]
pub struct ComponentAllowedValues;

impl Rule for ComponentAllowedValues {
    fn id(&self) -> &'static str {
        "component-allowed-values"
    }

    fn description(&self) -> &'static str {
        "Component properties must use the values their component rule allows"
    }

    // A value with unresolved references cannot be compared whole.
    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> bool {
        decl.is_complete() && ctx.components_for(decl.declaration).next().is_some()
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String> {
        let rule = ctx
            .components_for(decl.declaration)
            .find(|rule| !rule.accepts(&decl.value))?;
        let scope = match rule.state {
            Some(state) => format!("{}:{state}", rule.kind),
            None => rule.kind.to_string(),
        };
        let mut message = format!(
            "{scope} {} must be one of [{}], not {}",
            rule.property,
            rule.allowed_list(),
            decl.declaration.value
        );
        if !rule.note.is_empty() {
            message.push_str(&format!(" ({})", rule.note));
        }
        Some(message)
    }
}
