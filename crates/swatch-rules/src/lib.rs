#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Swatch Rules: design-system rules as pure predicates.
//!
//! A [`RuleSet`] is built once from [`Definitions`](swatch_tokens::Definitions)
//! and a [`Registry`](swatch_tokens::Registry). Evaluating a declaration
//! resolves its token references, then runs every applicable rule and
//! returns one [`RuleOutcome`] per rule. Rules are independent: a
//! declaration can fail several at once.
//!
//! # Modules
//!
//! - [`rule`]: the [`Rule`] trait, [`RuleContext`], [`RuleOutcome`], [`RuleLevel`]
//! - [`rules`]: the built-in rules
//! - [`constraints`]: banned colors and numeric ceilings
//! - [`typography`]: the type scale
//! - [`component`]: per-component allowed values
//! - [`resolve`]: token-reference substitution

pub mod component;
pub mod constraints;
pub mod resolve;
pub mod rule;
pub mod rules;
pub mod ruleset;
pub mod typography;

pub use component::ComponentRule;
pub use constraints::{ColorConstraint, Constraints};
pub use resolve::{CustomProperties, ResolvedDeclaration, UnresolvedRef};
pub use rule::{Rule, RuleContext, RuleLevel, RuleOutcome};
pub use rules::UNRESOLVED_TOKEN;
pub use ruleset::{RuleInfo, RuleSet};
pub use typography::TypographyRule;
