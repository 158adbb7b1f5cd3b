//! Identifier utilities.
//!
//! Token identifiers are dotted (`color.text-muted`); CSS custom properties
//! spell the same token with dashes (`--color-text-muted`). Rule names and
//! configuration keys are normalized to lowercase kebab-case.

/// Normalize an identifier to lowercase kebab-case.
///
/// Performs the following transformations:
/// 1. Trims leading/trailing whitespace
/// 2. Converts to lowercase
/// 3. Replaces underscores with hyphens
/// 4. Collapses multiple whitespace into single hyphens
///
/// # Examples
///
/// ```
/// use swatch_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("No Gradient"), "no-gradient");
/// assert_eq!(normalize_id("touch_target_floor"), "touch-target-floor");
/// assert_eq!(normalize_id("  Alpha   Ceiling  "), "alpha-ceiling");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Custom-property name for a token identifier.
///
/// # Examples
///
/// ```
/// use swatch_core::util::ids::css_var_name;
///
/// assert_eq!(css_var_name("color.text-muted"), "--color-text-muted");
/// assert_eq!(css_var_name("font.size.body"), "--font-size-body");
/// ```
pub fn css_var_name(token_id: &str) -> String {
    format!("--{}", token_id.replace('.', "-"))
}

/// Returns `true` if `id` is a well-formed token identifier.
///
/// Identifiers are non-empty dot-separated segments of ASCII letters,
/// digits, `-` and `_`.
pub fn is_valid_token_id(id: &str) -> bool {
    !id.is_empty()
        && id.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}
