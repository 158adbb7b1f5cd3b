//! Per-component allowed values.

use swatch_core::value::{Color, normalize_value, substitute_refs};
use swatch_core::{ComponentKind, Error, Result, State, StyleDeclaration};
use swatch_tokens::Registry;
use swatch_tokens::definitions::ComponentRuleDef;

/// One allowed value: as written and with references resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowedValue {
    /// Text from the definition source.
    pub written: String,
    /// Normalized text with token references replaced.
    pub resolved: String,
}

impl AllowedValue {
    /// Returns `true` if a resolved declaration value equals this one.
    ///
    /// Single colors compare on RGB and alpha, so `#FFF` equals `#ffffff`.
    pub fn accepts(&self, value: &str) -> bool {
        let value = normalize_value(value);
        if value == self.resolved {
            return true;
        }
        match (Color::parse(&value), Color::parse(&self.resolved)) {
            (Some(a), Some(b)) => a.same_rgb(&b) && (a.alpha - b.alpha).abs() < 1e-3,
            _ => false,
        }
    }
}

/// Allowed values for one component/state/property.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRule {
    /// Component kind.
    pub kind: ComponentKind,
    /// State; `None` covers every state.
    pub state: Option<State>,
    /// Property, lowercase.
    pub property: String,
    /// Allowed values, in definition order.
    pub allowed: Vec<AllowedValue>,
    /// Explanation shown with violations.
    pub note: String,
}

impl ComponentRule {
    /// Builds a rule; every token reference in `allowed` must resolve.
    pub fn build(def: &ComponentRuleDef, registry: &Registry) -> Result<Self> {
        let source = registry.source_name();
        let kind: ComponentKind = def
            .kind
            .parse()
            .map_err(|e: Error| Error::load(source, format!("component rule: {e}")))?;
        let state = def
            .state
            .as_deref()
            .map(str::parse::<State>)
            .transpose()
            .map_err(|e| Error::load(source, format!("component rule for {kind}: {e}")))?;
        let property = def.property.trim().to_ascii_lowercase();
        let owner = match state {
            Some(state) => format!("component {kind}:{state} {property}"),
            None => format!("component {kind} {property}"),
        };

        if def.allowed.is_empty() {
            return Err(Error::load(source, format!("{owner}: no allowed values")));
        }

        let allowed = def
            .allowed
            .iter()
            .map(|written| resolve_allowed(written, registry, &owner))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            state,
            property,
            allowed,
            note: def.note.clone(),
        })
    }

    /// Returns `true` if the rule covers the declaration.
    pub fn matches(&self, decl: &StyleDeclaration) -> bool {
        decl.is_component(self.kind)
            && decl.property == self.property
            && self.state.is_none_or(|s| s == decl.effective_state())
    }

    /// Returns `true` if the resolved value is allowed.
    pub fn accepts(&self, value: &str) -> bool {
        self.allowed.iter().any(|a| a.accepts(value))
    }

    /// Allowed values as written, comma-separated.
    pub fn allowed_list(&self) -> String {
        self.allowed
            .iter()
            .map(|a| a.written.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn resolve_allowed(written: &str, registry: &Registry, owner: &str) -> Result<AllowedValue> {
    let mut missing = None;
    let resolved = substitute_refs(written, |reference| match registry.resolve_ref(reference) {
        Ok(token) => token.css.clone(),
        Err(_) => {
            missing.get_or_insert_with(|| reference.name.clone());
            String::new()
        }
    });
    if let Some(id) = missing {
        return Err(Error::unknown_token_in(id, owner));
    }
    Ok(AllowedValue {
        written: written.to_string(),
        resolved: normalize_value(&resolved),
    })
}
