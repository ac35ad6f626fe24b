//! Validation rules and ordered rule sets.

use serde::{Serialize, Serializer};

/// Separator between rules in a rule string.
pub const RULE_SEPARATOR: &str = "|";

/// A single named validation rule.
///
/// Renders as `name` or `name:param[,param..]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    Nullable,
    Integer,
    Numeric,
    Min(i64),
    Max(u64),
    String,
    Date,
    DateFormat(String),
    Boolean,
    In(Vec<String>),
    Array,
    Email,
    Url,
    Unique { table: String, column: String },
}

impl Rule {
    /// Rule name without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Nullable => "nullable",
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::String => "string",
            Self::Date => "date",
            Self::DateFormat(_) => "date_format",
            Self::Boolean => "boolean",
            Self::In(_) => "in",
            Self::Array => "array",
            Self::Email => "email",
            Self::Url => "url",
            Self::Unique { .. } => "unique",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::Min(n) => write!(f, ":{}", n),
            Self::Max(n) => write!(f, ":{}", n),
            Self::DateFormat(format) => write!(f, ":{}", format),
            Self::In(values) => write!(f, ":{}", values.join(",")),
            Self::Unique { table, column } => write!(f, ":{},{}", table, column),
            _ => Ok(()),
        }
    }
}

/// Ordered rules of one column.
///
/// Order is significant: consumers may stop at the first failing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    /// Each rule rendered on its own.
    pub fn tokens(&self) -> Vec<String> {
        self.rules.iter().map(Rule::to_string).collect()
    }

    /// All rules joined with `|`.
    pub fn to_rule_string(&self) -> String {
        self.tokens().join(RULE_SEPARATOR)
    }
}

impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rule_string())
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
