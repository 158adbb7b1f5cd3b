//! `typography-scale`: text follows its style in the type scale.

use crate::resolve::ResolvedDeclaration;
use crate::rule::{Rule, RuleContext};
use crate::typography::{TypographyRule, parse_weight};
use swatch_core::value::{Length, UnitContext};

const PROPERTIES: &[&str] = &["font-size", "font-weight", "letter-spacing", "text-transform"];

/// Sizes within this many px count as equal.
const SIZE_TOLERANCE_PX: f64 = 0.01;
const SPACING_TOLERANCE_EM: f64 = 1e-9;

/// Fails when text set in a scale style deviates from it.
#[derive(Debug, Default)]
pub struct TypographyScale;

impl Rule for TypographyScale {
    fn id(&self) -> &'static str {
        "typography-scale"
    }

    fn description(&self) -> &'static str {
        "Font size, weight, tracking, and case must match the typography scale"
    }

    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> bool {
        decl.is_complete()
            && decl.property_in(PROPERTIES)
            && ctx.typography_for(decl.declaration).next().is_some()
    }

    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String> {
        let problems: Vec<String> = ctx
            .typography_for(decl.declaration)
            .filter_map(|style| deviation(style, &decl.property, &decl.value, &ctx.units))
            .collect();
        (!problems.is_empty()).then(|| problems.join("; "))
    }
}

fn deviation(style: &TypographyRule, property: &str, value: &str, units: &UnitContext) -> Option<String> {
    let name = &style.name;
    match property {
        "font-size" => {
            let expected = style.size?;
            let actual = Length::parse(value)?.to_px(units)?;
            let expected_px = expected.to_px(units)?;
            ((actual - expected_px).abs() > SIZE_TOLERANCE_PX)
                .then(|| format!("{name} font-size is {expected}, not {value}"))
        }
        "font-weight" => {
            let expected = style.weight?;
            let actual = parse_weight(value)?;
            (actual != expected).then(|| format!("{name} font-weight is {expected}, not {value}"))
        }
        "letter-spacing" => {
            let (min, max) = style.letter_spacing?;
            let em = if value.trim().eq_ignore_ascii_case("normal") {
                0.0
            } else {
                Length::parse(value)?.to_em(units)?
            };
            (em < min - SPACING_TOLERANCE_EM || em > max + SPACING_TOLERANCE_EM)
                .then(|| format!("{name} letter-spacing must be within {min}em..{max}em, not {value}"))
        }
        "text-transform" => (!style.allows_transform(value)).then(|| {
            format!(
                "{name} text-transform must be one of [{}], not {value}",
                style.transforms.join(", ")
            )
        }),
        _ => None,
    }
}
