//! The `Rule` trait and what rules see and return.

use crate::component::ComponentRule;
use crate::constraints::Constraints;
use crate::resolve::ResolvedDeclaration;
use crate::typography::TypographyRule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use swatch_core::value::UnitContext;
use swatch_core::{Error, RuleId, Severity, StyleDeclaration, Violation};
use swatch_tokens::Registry;

/// Read-only data every rule may consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Token registry.
    pub registry: &'a Registry,
    /// Color constraints and ceilings.
    pub constraints: &'a Constraints,
    /// Typography scale.
    pub typography: &'a [TypographyRule],
    /// Component rules.
    pub components: &'a [ComponentRule],
    /// Unit conversion context.
    pub units: UnitContext,
}

impl<'a> RuleContext<'a> {
    /// Typography styles the declaration is set in.
    pub fn typography_for<'d>(
        &self,
        decl: &'d StyleDeclaration,
    ) -> impl Iterator<Item = &'a TypographyRule> + 'd
    where
        'a: 'd,
    {
        let typography = self.typography;
        typography.iter().filter(move |r| r.matches(decl))
    }

    /// Component rules covering the declaration.
    pub fn components_for<'d>(
        &self,
        decl: &'d StyleDeclaration,
    ) -> impl Iterator<Item = &'a ComponentRule> + 'd
    where
        'a: 'd,
    {
        let components = self.components;
        components.iter().filter(move |r| r.matches(decl))
    }
}

/// A single design-system rule.
///
/// Rules are pure predicates over a resolved declaration. They must not
/// depend on evaluation order or on other rules' results.
///
/// # Example
///
/// ```rust,ignore
/// struct NoImportant;
///
/// impl Rule for NoImportant {
///     fn id(&self) -> &'static str { "no-important" }
///     fn description(&self) -> &'static str { "!important is not allowed" }
///     fn applies_to(&self, decl: &ResolvedDeclaration<'_>, _: &RuleContext<'_>) -> bool {
///         decl.important
///     }
///     fn check(&self, _: &ResolvedDeclaration<'_>, _: &RuleContext<'_>) -> Option<String> {
///         Some("remove !important".into())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable kebab-case identifier.
    fn id(&self) -> &'static str;

    /// One-line description for `swatch rules`.
    fn description(&self) -> &'static str;

    /// Severity when configuration does not override it.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether the rule applies to the declaration at all.
    fn applies_to(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> bool;

    /// Checks an applicable declaration; `Some(reason)` on failure.
    fn check(&self, decl: &ResolvedDeclaration<'_>, ctx: &RuleContext<'_>) -> Option<String>;
}

/// Result of one rule on one declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleOutcome {
    /// Rule identifier.
    pub rule: RuleId,
    /// Whether the declaration passed.
    pub passed: bool,
    /// Failure reason, or a short note on pass.
    pub reason: String,
    /// Severity the failure would carry.
    pub severity: Severity,
}

impl RuleOutcome {
    /// A passing outcome.
    pub fn pass(rule: &str, severity: Severity) -> Self {
        Self {
            rule: RuleId::new(rule),
            passed: true,
            reason: "ok".to_string(),
            severity,
        }
    }

    /// A failing outcome.
    pub fn fail(rule: &str, severity: Severity, reason: impl Into<String>) -> Self {
        Self {
            rule: RuleId::new(rule),
            passed: false,
            reason: reason.into(),
            severity,
        }
    }

    /// Converts a failure into a violation of `decl`.
    pub fn into_violation(self, decl: &StyleDeclaration) -> Option<Violation> {
        (!self.passed).then(|| Violation::new(self.rule, decl.clone(), self.reason, self.severity))
    }
}

/// Configured level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    /// Rule is not evaluated.
    Off,
    /// Failures are warnings.
    #[serde(alias = "warn")]
    Warning,
    /// Failures are errors.
    Error,
}

impl RuleLevel {
    /// Severity for an enabled level.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Warning => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }

    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleLevel::Off => "off",
            RuleLevel::Warning => "warning",
            RuleLevel::Error => "error",
        }
    }
}

impl From<Severity> for RuleLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => RuleLevel::Warning,
            Severity::Error => RuleLevel::Error,
        }
    }
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(RuleLevel::Off),
            "warn" | "warning" => Ok(RuleLevel::Warning),
            "error" => Ok(RuleLevel::Error),
            other => Err(Error::unknown_variant("rule level", other)),
        }
    }
}
