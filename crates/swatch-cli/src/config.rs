//! Swatch configuration file.
//!
//! ```toml
//! [definitions]
//! path = "design/tokens.toml"
//!
//! [output]
//! format = "json"
//!
//! [units]
//! root_font_px = 16.0
//! base_font_px = 14.0
//!
//! [rules]
//! off-palette = "off"
//! letter-spacing-ceiling = "warning"
//!
//! [selectors.components]
//! quote-panel = "card"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use swatch_content::SelectorMap;
use swatch_core::traits::ConfigManager;
use swatch_core::value::UnitContext;
use swatch_lint::OutputFormat;
use swatch_rules::RuleLevel;

/// Where token and rule definitions come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionsConfig {
    /// Definitions file; the built-in set when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Report output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format for `check`.
    pub format: OutputFormat,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwatchConfig {
    /// Definitions source.
    pub definitions: DefinitionsConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Font sizes for unit conversion.
    pub units: UnitContext,
    /// Per-rule level overrides keyed by rule id.
    pub rules: BTreeMap<String, RuleLevel>,
    /// Selector classification.
    pub selectors: SelectorMap,
}

impl ConfigManager for SwatchConfig {
    fn project_name() -> &'static str {
        "swatch"
    }
}

impl SwatchConfig {
    /// Rule levels as borrowed pairs, for [`RuleSet::with_levels`](swatch_rules::RuleSet::with_levels).
    pub fn rule_levels(&self) -> impl Iterator<Item = (&str, RuleLevel)> {
        self.rules.iter().map(|(id, level)| (id.as_str(), *level))
    }
}
