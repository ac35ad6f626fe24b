//! Derivation of validation rules from column metadata.

use indexmap::IndexMap;
use serde::Serialize;

use super::rule::{Rule, RuleSet};
use crate::metadata::{Column, IntWidth, KeyKind, MetadataResult, MetadataSource, SqlType};

/// Column name to ordered rules, in column declaration order.
pub type ColumnRules = IndexMap<String, RuleSet>;

/// Which form the rules are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    /// Primary key columns are left out.
    Create,
    /// Primary key columns are included.
    Update,
}

/// Rules for both modes of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSets {
    pub create: ColumnRules,
    pub update: ColumnRules,
}

/// Derives validation rules for tables read from a [`MetadataSource`].
pub struct RuleDeriver<S> {
    source: S,
}

impl<S: MetadataSource> RuleDeriver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Rules for every eligible column of `table`.
    pub fn generate_rules(&self, table: &str, mode: RuleMode) -> MetadataResult<ColumnRules> {
        let columns = self.source.get_columns(table)?;
        let primary_key = self.source.get_primary_key(table)?;
        Ok(derive_table_rules(table, &columns, &primary_key, mode))
    }

    /// Rules for both the create and the update form of `table`.
    pub fn generate_rule_sets(&self, table: &str) -> MetadataResult<RuleSets> {
        let columns = self.source.get_columns(table)?;
        let primary_key = self.source.get_primary_key(table)?;

        Ok(RuleSets {
            create: derive_table_rules(table, &columns, &primary_key, RuleMode::Create),
            update: derive_table_rules(table, &columns, &primary_key, RuleMode::Update),
        })
    }
}

/// Rules for every eligible column.
///
/// Auto-increment columns never get rules; primary key columns only get
/// rules in update mode.
pub fn derive_table_rules(
    table: &str,
    columns: &[Column],
    primary_key: &[String],
    mode: RuleMode,
) -> ColumnRules {
    columns
        .iter()
        .filter(|column| !column.is_auto_increment())
        .filter(|column| mode == RuleMode::Update || !primary_key.contains(&column.name))
        .map(|column| (column.name.clone(), derive_column_rules(table, column)))
        .collect()
}

/// Ordered rules of one column: presence, then type rules, then uniqueness.
pub fn derive_column_rules(table: &str, column: &Column) -> RuleSet {
    let mut rules = RuleSet::new();

    if column.is_nullable() {
        rules.push(Rule::Nullable);
    } else {
        rules.push(Rule::Required);
    }

    push_type_rules(&mut rules, column);

    if column.key == KeyKind::Unique {
        rules.push(Rule::Unique {
            table: table.to_string(),
            column: column.name.clone(),
        });
    }

    rules
}

fn push_type_rules(rules: &mut RuleSet, column: &Column) {
    let unsigned = column.is_unsigned();

    match column.sql_type() {
        SqlType::Int(width) => {
            rules.push(Rule::Integer);
            if unsigned {
                rules.push(Rule::Min(0));
            }
            if width == IntWidth::Tiny {
                if unsigned {
                    rules.push(Rule::Max(255));
                } else {
                    rules.push(Rule::Min(-128));
                    rules.push(Rule::Max(127));
                }
            }
        }
        SqlType::Numeric => {
            rules.push(Rule::Numeric);
            if unsigned {
                rules.push(Rule::Min(0));
            }
        }
        SqlType::Char => {
            rules.push(Rule::String);
            if let Some(max_length) = column.max_length {
                rules.push(Rule::Max(max_length));
            }
        }
        SqlType::Text => rules.push(Rule::String),
        SqlType::Date | SqlType::DateTime => rules.push(Rule::Date),
        SqlType::Time => rules.push(Rule::DateFormat("H:i:s".to_string())),
        SqlType::Year => {
            rules.push(Rule::Integer);
            rules.push(Rule::Min(1901));
            rules.push(Rule::Max(2155));
        }
        SqlType::Bool => rules.push(Rule::Boolean),
        SqlType::Enum => {
            let values = column.enum_values();
            if !values.is_empty() {
                rules.push(Rule::In(values));
            }
        }
        SqlType::Json => rules.push(Rule::Array),
        SqlType::Email => rules.push(Rule::Email),
        SqlType::Url => rules.push(Rule::Url),
        SqlType::Other(_) => {}
    }
}
