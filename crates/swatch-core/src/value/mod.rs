//! CSS value analysis.
//!
//! Values are kept as text throughout the pipeline. These helpers pull out
//! the parts rules care about:
//!
//! - [`color`]: colors and color scanning
//! - [`length`]: numeric lengths and unit conversion
//! - [`refs`]: `var(--x)` and `token(x)` references

pub mod color;
pub mod length;
pub mod refs;

pub use color::{Color, ColorMatch, find_colors};
pub use length::{Length, LengthUnit, UnitContext};
pub use refs::{RefSyntax, TokenRef, find_token_refs, has_token_refs, substitute_refs};

use regex::Regex;
use std::sync::LazyLock;

static GRADIENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b((?:repeating-)?(?:linear|radial|conic)-gradient)\s*\(")
        .unwrap_or_else(|e| unreachable!("gradient pattern is valid: {e}"))
});

/// Returns the gradient functions used in a value (`linear-gradient`, ...).
pub fn gradient_functions(value: &str) -> Vec<String> {
    GRADIENT_RE
        .captures_iter(value)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_ascii_lowercase()))
        .collect()
}

/// Returns `true` if the value contains a gradient function.
pub fn is_gradient(value: &str) -> bool {
    GRADIENT_RE.is_match(value)
}

/// Trims, collapses whitespace, and lowercases a value for comparison.
pub fn normalize_value(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

/// Returns `true` for values that declare nothing (`none`, `unset`, `initial`, empty).
pub fn is_none_like(value: &str) -> bool {
    matches!(
        normalize_value(value).as_str(),
        "" | "none" | "unset" | "initial"
    )
}
