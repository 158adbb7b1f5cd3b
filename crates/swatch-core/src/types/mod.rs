//! Core types shared by the parser, the rule set, and the validator.

mod component;
mod declaration;
mod violation;

pub use component::{ComponentKind, ElementTag, State};
pub use declaration::{Location, StyleDeclaration};
pub use violation::{RuleId, Severity, Violation};
