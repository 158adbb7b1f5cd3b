//! The typography scale.

use std::collections::BTreeSet;
use swatch_core::value::{Length, find_token_refs};
use swatch_core::{ElementTag, Error, Result, StyleDeclaration};
use swatch_tokens::Registry;
use swatch_tokens::definitions::{ScalarDef, TypographyDef};

/// Scale names that may exceed the letter-spacing ceiling.
const WIDE_TRACKING_NAMES: &[&str] = &["caption", "tag"];

/// One entry of the typography scale.
#[derive(Debug, Clone, PartialEq)]
pub struct TypographyRule {
    /// Scale name, e.g. `section-title`.
    pub name: String,
    /// Font size.
    pub size: Option<Length>,
    /// Font weight.
    pub weight: Option<f64>,
    /// Allowed letter-spacing in em, inclusive.
    pub letter_spacing: Option<(f64, f64)>,
    /// Allowed `text-transform` values, lowercase.
    pub transforms: Vec<String>,
    /// Tags carried by elements set in this style.
    pub tags: BTreeSet<ElementTag>,
}

impl TypographyRule {
    /// Builds a rule, resolving token references in size and weight.
    ///
    /// `max_letter_spacing_em` is the global ceiling; only caption and tag
    /// styles may allow more.
    pub fn build(
        name: &str,
        def: &TypographyDef,
        registry: &Registry,
        max_letter_spacing_em: f64,
    ) -> Result<Self> {
        let owner = format!("typography.{name}");
        let source = registry.source_name();

        let tags = def
            .tags
            .iter()
            .map(|t| t.parse::<ElementTag>())
            .collect::<Result<BTreeSet<_>>>()
            .map_err(|e| Error::load(source, format!("{owner}: {e}")))?;
        let transforms: Vec<String> = def.transforms.iter().map(|t| t.to_ascii_lowercase()).collect();

        if tags.contains(&ElementTag::SectionTitle) && transforms.iter().any(|t| t == "uppercase") {
            return Err(Error::load(
                source,
                format!("{owner}: section titles may not allow uppercase"),
            ));
        }

        if let Some([min, max]) = def.letter_spacing {
            if min > max {
                return Err(Error::load(
                    source,
                    format!("{owner}: letter_spacing minimum {min} exceeds maximum {max}"),
                ));
            }
            let wide_allowed = WIDE_TRACKING_NAMES.contains(&name)
                || tags.contains(&ElementTag::Caption)
                || tags.contains(&ElementTag::Tag);
            if max > max_letter_spacing_em && !wide_allowed {
                return Err(Error::load(
                    source,
                    format!(
                        "{owner}: letter-spacing up to {max}em is only allowed on captions and tags (ceiling {max_letter_spacing_em}em)"
                    ),
                ));
            }
        }

        let size = def
            .size
            .as_ref()
            .map(|s| resolve_size(s, registry, &owner))
            .transpose()?;
        let weight = def
            .weight
            .as_ref()
            .map(|w| resolve_weight(w, registry, &owner))
            .transpose()?;

        Ok(Self {
            name: name.to_string(),
            size,
            weight,
            letter_spacing: def.letter_spacing.map(|[min, max]| (min, max)),
            transforms,
            tags,
        })
    }

    /// Returns `true` if the declaration is set in this style.
    ///
    /// A declaration matches through a class named after the style (`body`
    /// or `text-body`) or through a shared element tag.
    pub fn matches(&self, decl: &StyleDeclaration) -> bool {
        decl.has_class(&self.name)
            || decl.has_class(&format!("text-{}", self.name))
            || self.tags.iter().any(|t| decl.has_tag(*t))
    }

    /// Returns `true` if `transform` is allowed.
    pub fn allows_transform(&self, transform: &str) -> bool {
        let transform = transform.trim().to_ascii_lowercase();
        self.transforms.iter().any(|t| *t == transform)
    }
}

/// Resolves a scalar that is either a literal or a single token reference.
fn token_text(value: &ScalarDef, registry: &Registry, owner: &str) -> Result<String> {
    let text = value.to_string();
    match find_token_refs(&text).first() {
        Some(reference) => registry
            .resolve_ref(reference)
            .map(|token| token.css.clone())
            .map_err(|_| Error::unknown_token_in(reference.name.clone(), owner)),
        None => Ok(text),
    }
}

fn resolve_size(value: &ScalarDef, registry: &Registry, owner: &str) -> Result<Length> {
    if let ScalarDef::Number(px) = value {
        return Ok(Length::px(*px));
    }
    let text = token_text(value, registry, owner)?;
    Length::parse(&text).ok_or_else(|| {
        Error::load(
            registry.source_name(),
            format!("{owner}: size '{text}' is not a length"),
        )
    })
}

fn resolve_weight(value: &ScalarDef, registry: &Registry, owner: &str) -> Result<f64> {
    if let ScalarDef::Number(n) = value {
        return Ok(*n);
    }
    let text = token_text(value, registry, owner)?;
    parse_weight(&text).ok_or_else(|| {
        Error::load(
            registry.source_name(),
            format!("{owner}: weight '{text}' is not a font weight"),
        )
    })
}

/// Parses a `font-weight` value; `normal` is 400 and `bold` is 700.
pub fn parse_weight(text: &str) -> Option<f64> {
    match text.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(400.0),
        "bold" => Some(700.0),
        other => other.parse().ok(),
    }
}
