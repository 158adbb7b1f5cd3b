//! Rule identifiers, severities, and violations.

use crate::error::Error;
use crate::types::declaration::StyleDeclaration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a rule, e.g. `no-gradient`.
///
/// Rule IDs are stable kebab-case strings used in reports and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Creates a rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for RuleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RuleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How serious a violation is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth fixing; still counts as a violation.
    Warning,
    /// Breaks a design-system rule.
    #[default]
    Error,
}

impl Severity {
    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(Error::unknown_variant("severity", other)),
        }
    }
}

/// A declaration that failed one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that failed.
    pub rule: RuleId,
    /// Declaration that failed it.
    pub declaration: StyleDeclaration,
    /// Human-readable explanation.
    pub message: String,
    /// Severity of the failure.
    pub severity: Severity,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        rule: impl Into<RuleId>,
        declaration: StyleDeclaration,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule: rule.into(),
            declaration,
            message: message.into(),
            severity,
        }
    }

    /// Returns `true` for error-severity violations.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  {}  {}",
            self.declaration.location, self.severity, self.rule, self.message
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::declaration::Location;

    #[test]
    fn test_rule_id_comparisons() {
        let id = RuleId::new("no-gradient");
        assert_eq!(id, "no-gradient");
        assert_eq!(id.as_str(), "no-gradient");
        assert_eq!(id.to_string(), "no-gradient");
    }

    #[test]
    fn test_rule_id_serializes_as_string() {
        let json = serde_json::to_string(&RuleId::new("alpha-ceiling")).unwrap();
        assert_eq!(json, "\"alpha-ceiling\"");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert_eq!(Severity::default(), Severity::Error);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("error".parse::<Severity>().unwrap(), Severity::Error);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_violation_display() {
        let decl = StyleDeclaration::new("min-height", "40px").at(Location::new("a.css", 3, 7));
        let v = Violation::new(
            "touch-target-floor",
            decl,
            "min-height 40px is below 44px",
            Severity::Error,
        );
        assert!(v.is_error());
        assert_eq!(
            v.to_string(),
            "a.css:3:7  error  touch-target-floor  min-height 40px is below 44px"
        );
    }
}
