//! Token-reference resolution for declarations.
//!
//! Rules never see `var(--x)` or `token(x)` text: references are replaced by
//! the referenced token's CSS text before any predicate runs, so a banned
//! color is caught whether it is written literally or behind a token.
//!
//! A `var()` that names no token is looked up among the custom properties
//! the same document declares, then its fallback. References that resolve
//! nowhere are dropped from the value and reported; the literal text that
//! remains is still checked.

use std::collections::HashMap;
use std::ops::Deref;
use swatch_core::StyleDeclaration;
use swatch_core::value::{ColorMatch, RefSyntax, TokenRef, find_colors, substitute_refs};
use swatch_tokens::{Registry, Token};

/// Fallbacks and custom properties are followed this many levels deep.
const MAX_FALLBACK_DEPTH: usize = 4;

/// A reference the registry could not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    /// The reference as written, e.g. `var(--color-purple)`.
    pub reference: String,
    /// Nearest known name, if any is close.
    pub suggestion: Option<String>,
}

impl UnresolvedRef {
    /// Human-readable message for reports.
    pub fn message(&self) -> String {
        match &self.suggestion {
            Some(s) => format!("{} does not resolve to a token (did you mean '{s}'?)", self.reference),
            None => format!("{} does not resolve to a token", self.reference),
        }
    }
}

/// Custom properties declared by one document, keyed by `--name`.
///
/// When a property is declared more than once the last declaration wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomProperties {
    values: HashMap<String, String>,
}

impl CustomProperties {
    /// Collects every `--name: value` declaration.
    pub fn from_declarations<'d, I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = &'d StyleDeclaration>,
    {
        let values = declarations
            .into_iter()
            .filter(|d| d.property.starts_with("--") && !d.value.trim().is_empty())
            .map(|d| (d.property.clone(), d.value.clone()))
            .collect();
        Self { values }
    }

    /// Declared value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A declaration with every token reference substituted.
#[derive(Debug, Clone)]
pub struct ResolvedDeclaration<'a> {
    /// The declaration as parsed.
    pub declaration: &'a StyleDeclaration,
    /// Value with references replaced by token CSS text; unresolved
    /// references are removed.
    pub value: String,
    /// Value with references removed; only literal text remains.
    pub literal: String,
    /// Tokens referenced, in order of appearance.
    pub tokens: Vec<&'a Token>,
    /// References that resolved nowhere, in order of appearance.
    pub unresolved: Vec<UnresolvedRef>,
}

impl<'a> ResolvedDeclaration<'a> {
    /// Resolves every reference in `declaration` against `registry`.
    pub fn resolve(declaration: &'a StyleDeclaration, registry: &'a Registry) -> Self {
        Self::resolve_with(declaration, registry, &CustomProperties::default())
    }

    /// Resolves references against `registry`, then `locals`, then the
    /// `var()` fallback.
    pub fn resolve_with(
        declaration: &'a StyleDeclaration,
        registry: &'a Registry,
        locals: &CustomProperties,
    ) -> Self {
        let mut resolver = Resolver {
            registry,
            locals,
            tokens: Vec::new(),
            unresolved: Vec::new(),
        };
        let value = resolver.substitute(&declaration.value, 0);
        let literal = substitute_refs(&declaration.value, |_| String::new());
        Self {
            declaration,
            value,
            literal,
            tokens: resolver.tokens,
            unresolved: resolver.unresolved,
        }
    }

    /// Returns `true` if every reference resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Colors in the resolved value.
    pub fn colors(&self) -> Vec<ColorMatch> {
        find_colors(&self.value)
    }

    /// Colors written literally (not through a token).
    pub fn literal_colors(&self) -> Vec<ColorMatch> {
        find_colors(&self.literal)
    }

    /// Returns `true` if any referenced token is a muted tint.
    pub fn references_muted(&self) -> bool {
        self.tokens.iter().any(|t| t.is_muted())
    }
}

impl Deref for ResolvedDeclaration<'_> {
    type Target = StyleDeclaration;

    fn deref(&self) -> &StyleDeclaration {
        self.declaration
    }
}

struct Resolver<'a, 'l> {
    registry: &'a Registry,
    locals: &'l CustomProperties,
    tokens: Vec<&'a Token>,
    unresolved: Vec<UnresolvedRef>,
}

impl<'a> Resolver<'a, '_> {
    fn substitute(&mut self, text: &str, depth: usize) -> String {
        substitute_refs(text, |reference| self.replace(reference, depth))
    }

    fn replace(&mut self, reference: &TokenRef, depth: usize) -> String {
        if let Ok(token) = self.registry.resolve_ref(reference) {
            self.tokens.push(token);
            return token.css.clone();
        }
        if depth < MAX_FALLBACK_DEPTH {
            let locals = self.locals;
            let local = match reference.syntax {
                RefSyntax::CssVar => locals.get(&reference.name),
                RefSyntax::Token => None,
            };
            if let Some(text) = local.or(reference.fallback.as_deref()) {
                return self.substitute(text, depth + 1);
            }
        }
        self.unresolved.push(unresolved_ref(reference, self.registry));
        String::new()
    }
}

fn unresolved_ref(reference: &TokenRef, registry: &Registry) -> UnresolvedRef {
    let suggestion = registry.suggest(&reference.name).map(|s| match reference.syntax {
        RefSyntax::CssVar => format!("var({s})"),
        RefSyntax::Token => format!("token({s})"),
    });
    UnresolvedRef {
        reference: reference.display_name(),
        suggestion,
    }
}
