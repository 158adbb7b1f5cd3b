//! The rule set: rules plus the data they check against.

use crate::component::ComponentRule;
use crate::constraints::Constraints;
use crate::resolve::{CustomProperties, ResolvedDeclaration};
use crate::rule::{Rule, RuleContext, RuleLevel, RuleOutcome};
use crate::rules::{UNRESOLVED_TOKEN, builtin_rules};
use crate::typography::TypographyRule;
use serde::Serialize;
use std::collections::BTreeMap;
use swatch_core::value::UnitContext;
use swatch_core::{Error, Result, Severity, StyleDeclaration};
use swatch_tokens::{Definitions, Registry};

/// Description of a rule and its effective level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleInfo {
    /// Rule identifier.
    pub id: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Effective level after configuration.
    pub level: RuleLevel,
}

/// Immutable set of rules built from definitions.
///
/// Build once with [`RuleSet::build`], then share by reference.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    levels: BTreeMap<String, RuleLevel>,
    constraints: Constraints,
    typography: Vec<TypographyRule>,
    components: Vec<ComponentRule>,
    units: UnitContext,
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .field("levels", &self.levels)
            .field("typography", &self.typography.len())
            .field("components", &self.components.len())
            .finish()
    }
}

impl RuleSet {
    /// Builds the rule set.
    ///
    /// Fails with a load error on invalid constraints or typography
    /// invariants, and with an unknown-token error if a typography or
    /// component rule references a token missing from `registry`.
    pub fn build(defs: &Definitions, registry: &Registry) -> Result<Self> {
        let constraints = Constraints::from_def(&defs.constraints, &defs.source_name)?;
        let typography = defs
            .typography
            .iter()
            .map(|(name, def)| {
                TypographyRule::build(name, def, registry, constraints.max_letter_spacing_em)
            })
            .collect::<Result<Vec<_>>>()?;
        let components = defs
            .components
            .iter()
            .map(|def| ComponentRule::build(def, registry))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Built rule set: {} banned colors, {} type styles, {} component rules",
            constraints.banned.len(),
            typography.len(),
            components.len()
        );

        Ok(Self {
            rules: builtin_rules(),
            levels: BTreeMap::new(),
            constraints,
            typography,
            components,
            units: UnitContext::default(),
        })
    }

    /// Applies per-rule level overrides keyed by rule id.
    pub fn with_levels<'a, I>(mut self, levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, RuleLevel)>,
    {
        for (id, level) in levels {
            let id = swatch_core::normalize_id(id);
            if !self.is_known(&id) {
                return Err(Error::config(format!("Unknown rule '{id}'")));
            }
            self.levels.insert(id, level);
        }
        Ok(self)
    }

    /// Replaces the unit conversion context.
    pub fn with_units(mut self, units: UnitContext) -> Self {
        self.units = units;
        self
    }

    fn is_known(&self, id: &str) -> bool {
        id == UNRESOLVED_TOKEN || self.rules.iter().any(|r| r.id() == id)
    }

    fn level_of(&self, id: &str, default: Severity) -> RuleLevel {
        self.levels
            .get(id)
            .copied()
            .unwrap_or_else(|| RuleLevel::from(default))
    }

    /// Every rule with its effective level, unresolved-token last.
    pub fn rules(&self) -> Vec<RuleInfo> {
        let mut infos: Vec<RuleInfo> = self
            .rules
            .iter()
            .map(|r| RuleInfo {
                id: r.id(),
                description: r.description(),
                level: self.level_of(r.id(), r.default_severity()),
            })
            .collect();
        infos.push(RuleInfo {
            id: UNRESOLVED_TOKEN,
            description: "Token references must resolve to a known token",
            level: self.level_of(UNRESOLVED_TOKEN, Severity::Error),
        });
        infos
    }

    /// Constraints in effect.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Typography scale.
    pub fn typography(&self) -> &[TypographyRule] {
        &self.typography
    }

    /// Component rules.
    pub fn components(&self) -> &[ComponentRule] {
        &self.components
    }

    /// Evaluates every applicable, enabled rule on one declaration.
    ///
    /// Outcomes follow rule order and include passes. Each token reference
    /// that does not resolve adds an `unresolved-token` failure first; the
    /// other rules still run on the value that remains.
    pub fn evaluate(&self, decl: &StyleDeclaration, registry: &Registry) -> Vec<RuleOutcome> {
        self.evaluate_with(decl, registry, &CustomProperties::default())
    }

    /// Like [`evaluate`](Self::evaluate), also resolving `var()` against
    /// the custom properties the declaration's document declares.
    pub fn evaluate_with(
        &self,
        decl: &StyleDeclaration,
        registry: &Registry,
        locals: &CustomProperties,
    ) -> Vec<RuleOutcome> {
        let resolved = ResolvedDeclaration::resolve_with(decl, registry, locals);
        let mut outcomes: Vec<RuleOutcome> =
            match self.level_of(UNRESOLVED_TOKEN, Severity::Error).severity() {
                Some(severity) => resolved
                    .unresolved
                    .iter()
                    .map(|u| RuleOutcome::fail(UNRESOLVED_TOKEN, severity, u.message()))
                    .collect(),
                None => Vec::new(),
            };

        let ctx = RuleContext {
            registry,
            constraints: &self.constraints,
            typography: &self.typography,
            components: &self.components,
            units: self.units,
        };

        outcomes.extend(self.rules.iter().filter_map(|rule| {
            let severity = self.level_of(rule.id(), rule.default_severity()).severity()?;
            if !rule.applies_to(&resolved, &ctx) {
                return None;
            }
            Some(match rule.check(&resolved, &ctx) {
                Some(reason) => RuleOutcome::fail(rule.id(), severity, reason),
                None => RuleOutcome::pass(rule.id(), severity),
            })
        }));
        outcomes
    }
}
