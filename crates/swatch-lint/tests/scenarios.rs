//! End-to-end checks: parse, validate, report.

#![allow(clippy::unwrap_used)]

mod common;

use common::{COMPLIANT_CSS, check, check_components, check_css, linter, rules_of};
use swatch_content::{Document, DocumentFormat};
use swatch_core::{ComponentKind, Severity};
use swatch_lint::{OutputFormat, Report, render};

// ============================================================================
// Anti-patterns
// ============================================================================

#[test]
fn gradient_on_card_background() {
    let report = check_css(".card { background: linear-gradient(180deg, #12161b, #1a1f26); }");
    assert!(rules_of(&report).contains(&"no-gradient".to_string()));
    assert!(report.total_violations >= 1);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn button_below_touch_target() {
    let report = check_css(".btn-primary, .btn { min-height: 40px; }");
    let floor: Vec<_> = report.violations_of("touch-target-floor").collect();
    assert_eq!(floor.len(), 1);
    assert_eq!(floor[0].declaration.component, Some(ComponentKind::Button));
    assert_eq!(floor[0].declaration.selector, ".btn");
}

#[test]
fn shadow_on_resting_card() {
    let report = check_css(".card {\n  box-shadow: 0 2px 4px #000;\n}\n.card:hover { box-shadow: 0 2px 4px #000; }");
    let shadows: Vec<_> = report.violations_of("shadow-on-card-default").collect();
    assert_eq!(shadows.len(), 1);
    assert_eq!(shadows[0].declaration.location.line, 2);
}

#[test]
fn banned_purple_anywhere() {
    for css in [
        ".x { color: #a855f7; }",
        ".card { border: 1px solid #A855F7; }",
        ".badge { background: rgba(168, 85, 247, 0.1); }",
        ".chart { fill: #a855f7; }",
    ] {
        let report = check_css(css);
        assert!(
            rules_of(&report).contains(&"no-banned-hue".to_string()),
            "{css}: {:?}",
            rules_of(&report)
        );
    }
}

#[test]
fn banned_color_behind_custom_property_fallback() {
    let report = check_css(".x { color: var(--brand-purple, #a855f7); }");
    assert!(rules_of(&report).contains(&"no-banned-hue".to_string()));
}

#[test]
fn compliant_stylesheet_is_clean() {
    let report = check_css(COMPLIANT_CSS);
    assert!(report.total_checked > 20);
    assert_eq!(report.total_violations, 0, "{:#?}", report.violations);
    assert!(report.parse_warnings.is_empty());
    assert!(report.is_clean());
    assert_eq!(report.exit_code(), 0);
}

// ============================================================================
// Tinted backgrounds and typography
// ============================================================================

#[test]
fn tinted_alpha_boundary() {
    let at_limit = check_css(".badge.tinted { background: rgba(0, 211, 116, 0.15); }");
    assert!(!rules_of(&at_limit).contains(&"alpha-ceiling".to_string()));

    let above = check_css(".badge.tinted { background: rgba(0, 211, 116, 0.16); }");
    assert!(rules_of(&above).contains(&"alpha-ceiling".to_string()));
}

#[test]
fn uppercase_section_title() {
    let report = check_css(".section-title { text-transform: uppercase; }");
    assert!(rules_of(&report).contains(&"no-uppercase-section-title".to_string()));

    let tag = check_css(".ticker-tag { text-transform: uppercase; }");
    assert!(tag.is_clean(), "{:?}", rules_of(&tag));
}

#[test]
fn wide_tracking_outside_captions() {
    let body = check_css("p { letter-spacing: 0.05em; }");
    assert_eq!(rules_of(&body), vec!["letter-spacing-ceiling"]);

    let caption = check_css(".caption { letter-spacing: 0.05em; }");
    assert!(caption.is_clean());
}

// ============================================================================
// Token references
// ============================================================================

#[test]
fn unresolved_token_is_reported_with_suggestion() {
    let report = check_css(".card { background: var(--color-surfce); }");
    assert_eq!(rules_of(&report), vec!["unresolved-token"]);
    assert!(report.violations[0].message.contains("--color-surface"));
    assert_eq!(report.violations[0].severity, Severity::Error);
}

#[test]
fn unresolved_token_does_not_hide_literal_violations() {
    let report = check_css(".card { background: linear-gradient(var(--brand-glow), #a855f7); }");
    let rules = rules_of(&report);
    assert_eq!(rules[0], "unresolved-token");
    assert!(rules.contains(&"no-gradient".to_string()), "{rules:?}");
    assert!(rules.contains(&"no-banned-hue".to_string()), "{rules:?}");
}

#[test]
fn locally_declared_custom_property_resolves() {
    let report = check_css(":root { --page-gutter: 24px; }\n.card { padding: var(--page-gutter); }");
    assert!(report.is_clean(), "{:?}", rules_of(&report));

    let local_purple = check_css(":root { --brand: #a855f7; }\n.x { color: var(--brand); }");
    let hits: Vec<_> = local_purple
        .violations_of("no-banned-hue")
        .map(|v| v.declaration.location.line)
        .collect();
    assert_eq!(hits, vec![1, 2]);
}

#[test]
fn quoted_text_is_not_a_color() {
    let report = check_css(
        ".plan::after { content: \"Purple plan\"; }\n.hero { background-image: url(violet-waves.png); }",
    );
    assert!(report.is_clean(), "{:?}", rules_of(&report));
}

#[test]
fn hsl_turn_hue_is_banned() {
    let report = check_css(".x { color: hsl(0.75turn 80% 60%); }");
    assert_eq!(report.violations_of("no-banned-hue").count(), 1);
}

#[test]
fn literal_off_palette_color_is_a_warning() {
    let report = check_css(".x { color: #123456; }");
    assert_eq!(rules_of(&report), vec!["off-palette"]);
    assert_eq!(report.warnings, 1);
    assert_eq!(report.errors, 0);
    assert_eq!(report.exit_code(), 1);
}

// ============================================================================
// Other formats
// ============================================================================

#[test]
fn markdown_fences_are_checked() {
    let doc = Document::new(
        "guide.md",
        DocumentFormat::Markdown,
        "# Buttons\n\n```css\n.btn {\n  min-height: 40px;\n}\n```\n\n```css\n.card { box-shadow: none; }\n```\n",
    );
    let report = check(doc);
    assert_eq!(rules_of(&report), vec!["touch-target-floor"]);
    assert_eq!(report.violations[0].declaration.location.to_string(), "guide.md:5:3");
    assert_eq!(report.total_checked, 2);
}

#[test]
fn component_descriptions_are_checked() {
    let report = check_components(
        r#"
[[component]]
kind = "card"
style = { box-shadow = "0 2px 4px #000", background = "token(color.surface)" }

[[component]]
kind = "button"
state = "hover"
style = { background = "linear-gradient(#3b82f6, #1a1f26)" }
"#,
    );
    let rules = rules_of(&report);
    assert!(rules.contains(&"shadow-on-card-default".to_string()));
    assert!(rules.contains(&"no-gradient".to_string()));
    assert_eq!(report.sources, vec!["test.toml"]);
}

#[test]
fn malformed_input_still_reports() {
    let report = check_css(".card { box-shadow none; border-radius: 4px; }");
    assert_eq!(report.parse_warnings.len(), 1);
    assert_eq!(rules_of(&report), vec!["component-allowed-values"]);
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn rechecking_gives_identical_report() {
    let linter = linter();
    let doc = Document::new("a.css", DocumentFormat::Css, COMPLIANT_CSS.replace("44px", "32px"));
    let first = linter.check_documents([&doc]);
    let second = linter.check_documents([&doc]);
    assert_eq!(first, second);
    assert_eq!(first.total_violations, 1);
}

#[test]
fn json_report_shape() {
    let report = check_css(".btn { min-height: 40px; }\n.x { color: #a855f7; }");
    let json = render(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_checked"], 2);
    assert_eq!(value["violations"][0]["rule"], "touch-target-floor");
    assert!(value["by_rule"]["no-banned-hue"]["count"].as_u64().unwrap() >= 1);
}

#[test]
fn text_report_lists_violations_in_order() {
    let report: Report = check_css(".btn { min-height: 40px; }\n.card { box-shadow: 0 1px 2px #000; }");
    let text = render(&report, OutputFormat::Text).unwrap();
    let first = text.find("touch-target-floor").unwrap();
    let second = text.find("shadow-on-card-default").unwrap();
    assert!(first < second);
    assert!(text.contains("test.css:1:8  error  touch-target-floor"));
}
