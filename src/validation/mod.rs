//! Validation rule derivation.
//!
//! Every eligible column of a table gets an ordered set of named rules built
//! from its catalog metadata:
//!
//! 1. presence (`required` or `nullable`)
//! 2. type rules, keyed on the raw type name (`integer`, `max:100`, `in:a,b`, ...)
//! 3. uniqueness (`unique:table,column`) for columns with a unique key
//!
//! A rule set renders as one string joined with `|`, e.g.
//! `required|integer|min:0`.
//!
//! # Example
//!
//! ```ignore
//! use schemagen::validation::{RuleDeriver, RuleMode};
//!
//! let deriver = RuleDeriver::new(&source);
//! for (column, rules) in deriver.generate_rules("users", RuleMode::Create)? {
//!     println!("{column}: {rules}");
//! }
//! ```

mod deriver;
mod rule;

pub use deriver::{
    derive_column_rules, derive_table_rules, ColumnRules, RuleDeriver, RuleMode, RuleSets,
};
pub use rule::{Rule, RuleSet, RULE_SEPARATOR};
