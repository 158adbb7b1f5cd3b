//! The token registry.
//!
//! A [`Registry`] is built once from [`Definitions`] and is read-only
//! afterwards. Lookup is by exact, case-sensitive identifier or by
//! custom-property name.

use crate::definitions::{Definitions, ScalarDef, TokenDef};
use crate::token::{ColorRole, MUTED_ALPHA_LIMIT, Token, TokenCategory, TokenValue};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use swatch_core::util::ids::is_valid_token_id;
use swatch_core::value::{Color, Length, LengthUnit, RefSyntax, TokenRef};
use swatch_core::{Error, Result, css_var_name};

/// Indexed, immutable token set.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    source_name: String,
    tokens: BTreeMap<String, Token>,
    css_vars: HashMap<String, String>,
    approved: Vec<Color>,
}

impl Registry {
    /// Builds a registry from parsed definitions.
    ///
    /// Fails with a load error on unknown categories or roles, values that
    /// do not fit their category, duplicate identifiers or custom-property
    /// names, and core/text/accent colors outside the approved palette.
    pub fn load(defs: &Definitions) -> Result<Self> {
        let source = defs.source_name.as_str();
        let approved = defs
            .palette
            .approved
            .iter()
            .map(|hex| {
                Color::parse_hex(hex)
                    .filter(Color::is_opaque)
                    .ok_or_else(|| {
                        Error::load(source, format!("approved palette entry '{hex}' is not an opaque hex color"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut registry = Registry {
            source_name: source.to_string(),
            tokens: BTreeMap::new(),
            css_vars: HashMap::new(),
            approved,
        };

        for def in &defs.tokens {
            let token = registry.build_token(def)?;
            registry.insert(token)?;
        }

        log::debug!(
            "Loaded {} tokens from {} ({} approved colors)",
            registry.tokens.len(),
            registry.source_name,
            registry.approved.len()
        );
        Ok(registry)
    }

    /// Parses TOML definitions and builds a registry from them.
    pub fn from_toml_str(source_name: impl Into<String>, text: &str) -> Result<Self> {
        Self::load(&Definitions::from_toml_str(source_name, text)?)
    }

    /// Reads a definition file and builds a registry from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(&Definitions::from_path(path)?)
    }

    /// Registry over the embedded default definitions.
    pub fn builtin() -> Result<Self> {
        Self::load(&Definitions::builtin()?)
    }

    fn build_token(&self, def: &TokenDef) -> Result<Token> {
        let source = self.source_name.as_str();
        if !is_valid_token_id(&def.id) {
            return Err(Error::load(
                source,
                format!("'{}' is not a valid token identifier", def.id),
            ));
        }
        let category: TokenCategory = def
            .category
            .parse()
            .map_err(|e: Error| Error::load(source, format!("token '{}': {e}", def.id)))?;

        let role = match (category, def.role.as_deref()) {
            (TokenCategory::Color, None) => Some(ColorRole::default()),
            (TokenCategory::Color, Some(name)) => Some(
                name.parse::<ColorRole>()
                    .map_err(|e| Error::load(source, format!("token '{}': {e}", def.id)))?,
            ),
            (_, None) => None,
            (other, Some(name)) => {
                return Err(Error::load(
                    source,
                    format!(
                        "token '{}': role '{name}' is only valid on color tokens, not {other}",
                        def.id
                    ),
                ));
            }
        };

        let (value, css) = typed_value(category, &def.value).ok_or_else(|| {
            Error::load(
                source,
                format!(
                    "token '{}': '{}' is not a valid {category} value",
                    def.id, def.value
                ),
            )
        })?;

        if let (Some(role), TokenValue::Color(color)) = (role, &value)
            && role.requires_approved_palette()
            && !self.is_approved(color)
        {
            return Err(Error::load(
                source,
                format!(
                    "token '{}' ({role}) uses {} which is not in the approved palette",
                    def.id, css
                ),
            ));
        }

        if let (Some(ColorRole::Muted), TokenValue::Color(color)) = (role, &value)
            && color.alpha > MUTED_ALPHA_LIMIT
        {
            return Err(Error::load(
                source,
                format!(
                    "token '{}' (muted) has alpha {} above {MUTED_ALPHA_LIMIT}",
                    def.id, color.alpha
                ),
            ));
        }

        Ok(Token {
            id: def.id.clone(),
            category,
            role,
            value,
            css,
            usage: def.usage.clone(),
        })
    }

    fn insert(&mut self, token: Token) -> Result<()> {
        let var = token.css_var();
        if self.tokens.contains_key(&token.id) || self.css_vars.contains_key(&var) {
            return Err(Error::duplicate_token(&token.id, &self.source_name));
        }
        self.css_vars.insert(var, token.id.clone());
        self.tokens.insert(token.id.clone(), token);
        Ok(())
    }

    fn is_approved(&self, color: &Color) -> bool {
        color.is_opaque() && self.approved.iter().any(|a| a.same_rgb(color))
    }

    /// Resolves an identifier (exact, case-sensitive).
    pub fn resolve(&self, id: &str) -> Result<&Token> {
        self.tokens.get(id).ok_or_else(|| Error::unknown_token(id))
    }

    /// Looks up an identifier without producing an error.
    pub fn get(&self, id: &str) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Resolves a custom-property name such as `--color-bg`.
    pub fn resolve_css_var(&self, name: &str) -> Result<&Token> {
        self.css_vars
            .get(name)
            .and_then(|id| self.tokens.get(id))
            .ok_or_else(|| Error::unknown_token(name))
    }

    /// Resolves a reference found in a CSS value.
    pub fn resolve_ref(&self, reference: &TokenRef) -> Result<&Token> {
        match reference.syntax {
            RefSyntax::CssVar => self.resolve_css_var(&reference.name),
            RefSyntax::Token => self.resolve(&reference.name),
        }
    }

    /// Nearest known name to `name`, for "did you mean" hints.
    ///
    /// Names starting with `--` are matched against custom-property names,
    /// everything else against identifiers.
    pub fn suggest(&self, name: &str) -> Option<String> {
        let limit = (name.len() / 3).max(2);
        let candidates: Box<dyn Iterator<Item = String> + '_> = if name.starts_with("--") {
            Box::new(self.tokens.keys().map(|id| css_var_name(id)))
        } else {
            Box::new(self.tokens.keys().cloned())
        };
        candidates
            .map(|candidate| (strsim::levenshtein(name, &candidate), candidate))
            .filter(|(distance, _)| *distance <= limit)
            .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
            .map(|(_, candidate)| candidate)
    }

    /// All tokens in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    /// Tokens of one category in identifier order.
    pub fn by_category(&self, category: TokenCategory) -> impl Iterator<Item = &Token> {
        self.tokens.values().filter(move |t| t.category == category)
    }

    /// Color tokens with their parsed colors.
    pub fn colors(&self) -> impl Iterator<Item = (&Token, Color)> {
        self.tokens
            .values()
            .filter_map(|t| t.value.as_color().map(|c| (t, c)))
    }

    /// Returns the token whose color has the same RGB as `color`, if any.
    pub fn find_color(&self, color: &Color) -> Option<&Token> {
        self.colors()
            .find(|(_, c)| c.same_rgb(color))
            .map(|(t, _)| t)
    }

    /// The approved palette.
    pub fn approved_palette(&self) -> &[Color] {
        &self.approved
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the registry holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Name of the definition source.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

/// Types a raw value for its category; returns the value and its CSS text.
fn typed_value(category: TokenCategory, raw: &ScalarDef) -> Option<(TokenValue, String)> {
    match (category, raw) {
        (TokenCategory::Color, ScalarDef::Text(text)) => {
            let color = Color::parse(text)?;
            Some((TokenValue::Color(color), text.trim().to_string()))
        }
        (TokenCategory::Spacing | TokenCategory::Radius, ScalarDef::Text(text)) => {
            let length = Length::parse(text)?;
            fixed_length(&length).then(|| (TokenValue::Length(length), text.trim().to_string()))
        }
        (TokenCategory::Spacing | TokenCategory::Radius, ScalarDef::Number(n)) if *n == 0.0 => {
            Some((TokenValue::Length(Length::px(0.0)), "0".to_string()))
        }
        (TokenCategory::Typography, ScalarDef::Text(text)) => {
            let value = match Length::parse(text) {
                Some(length) if fixed_length(&length) => TokenValue::Length(length),
                _ => TokenValue::Raw(text.trim().to_string()),
            };
            Some((value, text.trim().to_string()))
        }
        (TokenCategory::Weight, ScalarDef::Number(n)) => weight(*n),
        (TokenCategory::Weight, ScalarDef::Text(text)) => weight(text.trim().parse().ok()?),
        _ => None,
    }
}

fn fixed_length(length: &Length) -> bool {
    match length.unit {
        LengthUnit::Px | LengthUnit::Em | LengthUnit::Rem => true,
        LengthUnit::Unitless => length.value == 0.0,
        LengthUnit::Percent => false,
    }
}

fn weight(n: f64) -> Option<(TokenValue, String)> {
    ((1.0..=1000.0).contains(&n)).then(|| (TokenValue::Number(n), n.to_string()))
}
