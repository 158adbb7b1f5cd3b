//! Applies a rule set to parsed declarations.

use swatch_core::{StyleDeclaration, Violation};
use swatch_rules::{CustomProperties, RuleSet};
use swatch_tokens::Registry;

/// Validates declarations, returning every violation in declaration order.
///
/// `declarations` are treated as one document: the custom properties they
/// declare resolve `var()` references anywhere in it. Within one
/// declaration, `unresolved-token` violations come first, then the other
/// rules in rule order.
pub fn validate(
    declarations: &[StyleDeclaration],
    rules: &RuleSet,
    registry: &Registry,
) -> Vec<Violation> {
    let locals = CustomProperties::from_declarations(declarations);
    let mut violations = Vec::new();
    for decl in declarations {
        let before = violations.len();
        violations.extend(
            rules
                .evaluate_with(decl, registry, &locals)
                .into_iter()
                .filter_map(|outcome| outcome.into_violation(decl)),
        );
        if violations.len() > before {
            tracing::trace!(
                location = %decl.location,
                property = %decl.property,
                count = violations.len() - before,
                "Declaration failed"
            );
        }
    }
    tracing::debug!(
        checked = declarations.len(),
        violations = violations.len(),
        "Validated declarations"
    );
    violations
}
