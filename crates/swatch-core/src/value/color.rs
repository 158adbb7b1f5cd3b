//! Color parsing and color scanning.
//!
//! Supports hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()`,
//! `hsl()`/`hsla()` in both comma and space syntax, and a small table of
//! named colors.

use crate::error::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Quoted strings and `url()` arguments are matched so they can be skipped.
static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)"(?:[^"\\]|\\.)*"?|'(?:[^'\\]|\\.)*'?|\burl\([^)]*\)?|#[0-9a-f]{3,8}\b|\b(?:rgba?|hsla?)\([^)]*\)|[a-z][a-z-]*"#,
    )
    .unwrap_or_else(|e| unreachable!("color pattern is valid: {e}"))
});

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `0.0..=1.0`.
    pub alpha: f64,
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("white", Color::rgb(0xff, 0xff, 0xff)),
    ("red", Color::rgb(0xff, 0x00, 0x00)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("lime", Color::rgb(0x00, 0xff, 0x00)),
    ("chartreuse", Color::rgb(0x7f, 0xff, 0x00)),
    ("lawngreen", Color::rgb(0x7c, 0xfc, 0x00)),
    ("springgreen", Color::rgb(0x00, 0xff, 0x7f)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("violet", Color::rgb(0xee, 0x82, 0xee)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("fuchsia", Color::rgb(0xff, 0x00, 0xff)),
    ("indigo", Color::rgb(0x4b, 0x00, 0x82)),
    ("orchid", Color::rgb(0xda, 0x70, 0xd6)),
    ("plum", Color::rgb(0xdd, 0xa0, 0xdd)),
    ("blueviolet", Color::rgb(0x8a, 0x2b, 0xe2)),
    ("rebeccapurple", Color::rgb(0x66, 0x33, 0x99)),
    ("orange", Color::rgb(0xff, 0xa5, 0x00)),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("transparent", Color::rgba(0x00, 0x00, 0x00, 0.0)),
];

impl Color {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Creates a color with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self { r, g, b, alpha }
    }

    /// Parses a single color expression.
    pub fn parse(text: &str) -> Option<Color> {
        let text = text.trim();
        let lower = text.to_ascii_lowercase();
        if lower.starts_with('#') {
            return Self::parse_hex(&lower);
        }
        if let Some(args) = function_args(&lower, &["rgba", "rgb"]) {
            return parse_rgb_args(args);
        }
        if let Some(args) = function_args(&lower, &["hsla", "hsl"]) {
            return parse_hsl_args(args);
        }
        named_color(&lower)
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, or `#rrggbbaa`.
    pub fn parse_hex(text: &str) -> Option<Color> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expand = |c: char| -> Option<u8> {
            let v = c.to_digit(16)? as u8;
            Some(v * 16 + v)
        };
        let pair = |s: &str| u8::from_str_radix(s, 16).ok();

        let chars: Vec<char> = hex.chars().collect();
        match chars.len() {
            3 | 4 => {
                let r = expand(chars[0])?;
                let g = expand(chars[1])?;
                let b = expand(chars[2])?;
                let alpha = match chars.get(3) {
                    Some(a) => f64::from(expand(*a)?) / 255.0,
                    None => 1.0,
                };
                Some(Color::rgba(r, g, b, alpha))
            }
            6 | 8 => {
                let r = pair(&hex[0..2])?;
                let g = pair(&hex[2..4])?;
                let b = pair(&hex[4..6])?;
                let alpha = if hex.len() == 8 {
                    f64::from(pair(&hex[6..8])?) / 255.0
                } else {
                    1.0
                };
                Some(Color::rgba(r, g, b, alpha))
            }
            _ => None,
        }
    }

    /// Returns `#rrggbb` (alpha dropped), lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Returns `true` if both colors have the same RGB channels.
    pub fn same_rgb(&self, other: &Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Returns `true` if alpha is 1.
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Hue in degrees (`0.0..360.0`); greys report 0.
    pub fn hue(&self) -> f64 {
        let (r, g, b) = self.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta == 0.0 {
            return 0.0;
        }
        let hue = if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };
        hue.rem_euclid(360.0)
    }

    /// HSL saturation in `0.0..=1.0`.
    pub fn saturation(&self) -> f64 {
        let (r, g, b) = self.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        if delta == 0.0 {
            return 0.0;
        }
        let lightness = (max + min) / 2.0;
        delta / (1.0 - (2.0 * lightness - 1.0).abs())
    }

    /// HSL lightness in `0.0..=1.0`.
    pub fn lightness(&self) -> f64 {
        let (r, g, b) = self.unit_channels();
        (r.max(g).max(b) + r.min(g).min(b)) / 2.0
    }

    fn unit_channels(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    fn from_hsl(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Color {
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Color::rgba(channel(r1), channel(g1), channel(b1), alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            f.write_str(&self.to_hex())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| Error::unknown_variant("color", s))
    }
}

/// A color found inside a larger value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMatch {
    /// The parsed color.
    pub color: Color,
    /// Text the color was parsed from.
    pub text: String,
}

/// Finds every color expression in a CSS value, in order of appearance.
///
/// Words that are not named colors are ignored, so identifiers such as
/// `linear-gradient` or `solid` never produce matches. Text inside quoted
/// strings and `url()` is not scanned.
pub fn find_colors(value: &str) -> Vec<ColorMatch> {
    COLOR_RE
        .find_iter(value)
        .filter(|m| !is_skipped(m.as_str()))
        .filter_map(|m| {
            Color::parse(m.as_str()).map(|color| ColorMatch {
                color,
                text: m.as_str().to_string(),
            })
        })
        .collect()
}

fn is_skipped(text: &str) -> bool {
    text.starts_with(['"', '\''])
        || text
            .get(..4)
            .is_some_and(|head| head.eq_ignore_ascii_case("url("))
}

fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

fn function_args<'a>(text: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        text.strip_prefix(name)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    })
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_channel(s: &str) -> Option<u8> {
    let v = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? * 2.55,
        None => s.parse::<f64>().ok()?,
    };
    Some(v.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(s: Option<&&str>) -> Option<f64> {
    let Some(s) = s else {
        return Some(1.0);
    };
    let v = match s.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => s.parse::<f64>().ok()?,
    };
    Some(v.clamp(0.0, 1.0))
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    Some(Color::rgba(
        parse_channel(parts[0])?,
        parse_channel(parts[1])?,
        parse_channel(parts[2])?,
        parse_alpha(parts.get(3))?,
    ))
}

fn parse_hsl_args(args: &str) -> Option<Color> {
    let parts = split_args(args);
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let hue = parse_hue(parts[0])?;
    let pct = |s: &str| -> Option<f64> {
        let v: f64 = s.trim_end_matches('%').parse().ok()?;
        Some((v / 100.0).clamp(0.0, 1.0))
    };
    Some(Color::from_hsl(
        hue,
        pct(parts[1])?,
        pct(parts[2])?,
        parse_alpha(parts.get(3))?,
    ))
}

/// Hue in degrees from a bare number or a `deg`, `grad`, `rad` or `turn`
/// angle.
fn parse_hue(s: &str) -> Option<f64> {
    let (number, per_degree) = if let Some(n) = s.strip_suffix("deg") {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix("grad") {
        (n, 400.0 / 360.0)
    } else if let Some(n) = s.strip_suffix("rad") {
        (n, std::f64::consts::TAU / 360.0)
    } else if let Some(n) = s.strip_suffix("turn") {
        (n, 1.0 / 360.0)
    } else {
        (s, 1.0)
    };
    let value: f64 = number.parse().ok()?;
    value.is_finite().then(|| value / per_degree)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_long_hex() {
        let c = Color::parse("#A855F7").unwrap();
        assert_eq!((c.r, c.g, c.b), (0xa8, 0x55, 0xf7));
        assert!(c.is_opaque());
        assert_eq!(c.to_hex(), "#a855f7");
    }

    #[test]
    fn test_parse_short_hex_with_alpha() {
        let c = Color::parse("#0f08").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x00, 0xff, 0x00));
        assert!((c.alpha - 0x88 as f64 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hex_rejects_bad_lengths() {
        assert!(Color::parse("#12345").is_none());
        assert!(Color::parse("#zzzzzz").is_none());
    }

    #[test]
    fn test_parse_rgba_comma_syntax() {
        let c = Color::parse("rgba(0, 211, 116, 0.12)").unwrap();
        assert_eq!((c.r, c.g, c.b), (0, 211, 116));
        assert_eq!(c.alpha, 0.12);
    }

    #[test]
    fn test_parse_rgb_space_syntax_with_percent_alpha() {
        let c = Color::parse("rgb(255 82 82 / 15%)").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 82, 82));
        assert!((c.alpha - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hsl_angle_units() {
        let expected = Color::parse("hsl(270 80% 60%)").unwrap();
        for text in [
            "hsl(0.75turn 80% 60%)",
            "hsl(300grad 80% 60%)",
            "hsl(4.71238898rad 80% 60%)",
            "hsl(270deg, 80%, 60%)",
        ] {
            let c = Color::parse(text).unwrap();
            assert!(c.same_rgb(&expected), "{text}: {c}");
        }
        assert!(Color::parse("hsl(1x 80% 60%)").is_none());
    }

    #[test]
    fn test_parse_hsl() {
        let c = Color::parse("hsl(120, 100%, 50%)").unwrap();
        assert_eq!((c.r, c.g, c.b), (0, 255, 0));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("Purple").unwrap().to_hex(), "#800080");
        assert_eq!(Color::parse("transparent").unwrap().alpha, 0.0);
        assert!(Color::parse("solid").is_none());
    }

    #[test]
    fn test_from_str_error() {
        let err = "nope".parse::<Color>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown color 'nope'");
    }

    // ------------------------------------------------------------------------
    // HSL components
    // ------------------------------------------------------------------------

    #[test]
    fn test_hue_of_violet() {
        let c = Color::parse("#a855f7").unwrap();
        let hue = c.hue();
        assert!(hue > 265.0 && hue < 275.0, "hue was {hue}");
        assert!(c.saturation() > 0.8);
    }

    #[test]
    fn test_hue_of_grey_is_zero() {
        let c = Color::parse("#808080").unwrap();
        assert_eq!(c.hue(), 0.0);
        assert_eq!(c.saturation(), 0.0);
    }

    #[test]
    fn test_hue_of_red_wraps() {
        let c = Color::parse("#ff0040").unwrap();
        assert!(c.hue() > 340.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(0, 211, 116).to_string(), "#00d374");
        assert_eq!(
            Color::rgba(0, 211, 116, 0.12).to_string(),
            "rgba(0, 211, 116, 0.12)"
        );
    }

    // ------------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------------

    #[test]
    fn test_find_colors_in_shadow() {
        let found = find_colors("0 2px 4px #000, inset 0 0 0 1px rgba(255,255,255,0.1)");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "#000");
        assert_eq!(found[1].color.alpha, 0.1);
    }

    #[test]
    fn test_find_colors_in_gradient() {
        let found = find_colors("linear-gradient(90deg, #a855f7 0%, violet 100%)");
        let texts: Vec<_> = found.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["#a855f7", "violet"]);
    }

    #[test]
    fn test_find_colors_skips_strings_and_urls() {
        assert!(find_colors(r#""Purple plan""#).is_empty());
        assert!(find_colors("'red alert' attr(title)").is_empty());
        assert!(find_colors("url(purple-bg.png) no-repeat").is_empty());
        assert!(find_colors(r#""say \"violet\"""#).is_empty());

        let found = find_colors(r#""Purple" #a855f7"#);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "#a855f7");
    }

    #[test]
    fn test_find_colors_ignores_identifiers() {
        assert!(find_colors("1px solid currentColor").is_empty());
        assert!(find_colors("--color-purple-muted").is_empty());
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    proptest::proptest! {
        #[test]
        fn prop_hsl_components_in_range(r: u8, g: u8, b: u8) {
            let color = Color::rgb(r, g, b);
            proptest::prop_assert!((0.0..360.0).contains(&color.hue()));
            proptest::prop_assert!((0.0..=1.0 + 1e-9).contains(&color.saturation()));
            proptest::prop_assert!((0.0..=1.0).contains(&color.lightness()));
        }

        #[test]
        fn prop_rgb_function_is_found_in_values(r: u8, g: u8, b: u8) {
            let value = format!("0 0 0 1px rgb({r}, {g}, {b})");
            let found = find_colors(&value);
            proptest::prop_assert_eq!(found.len(), 1);
            proptest::prop_assert!(found[0].color.same_rgb(&Color::rgb(r, g, b)));
        }
    }
}
