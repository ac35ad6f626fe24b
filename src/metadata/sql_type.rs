//! The closed table of raw catalog type names.
//!
//! Both the semantic value type of a column and its validation rules are keyed
//! on this table, so every raw type name is resolved here exactly once.

use serde::{Deserialize, Serialize};

/// Width of an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    Tiny,
    Small,
    Medium,
    Normal,
    Big,
}

/// A raw type name resolved against the known type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    Int(IntWidth),
    /// `float`, `double` and `decimal`.
    Numeric,
    /// `varchar` and `char`.
    Char,
    /// `text`, `mediumtext` and `longtext`.
    Text,
    Date,
    /// `datetime` and `timestamp`.
    DateTime,
    Time,
    Year,
    Bool,
    Enum,
    Json,
    /// Not a catalog type, only produced by hand-written metadata.
    Email,
    /// Not a catalog type, only produced by hand-written metadata.
    Url,
    /// Anything not in the table.
    Other(String),
}

impl SqlType {
    /// Resolve a raw type name, ignoring case.
    pub fn parse(data_type: &str) -> Self {
        match data_type.to_lowercase().as_str() {
            "tinyint" => Self::Int(IntWidth::Tiny),
            "smallint" => Self::Int(IntWidth::Small),
            "mediumint" => Self::Int(IntWidth::Medium),
            "int" => Self::Int(IntWidth::Normal),
            "bigint" => Self::Int(IntWidth::Big),
            "float" | "double" | "decimal" => Self::Numeric,
            "varchar" | "char" => Self::Char,
            "text" | "mediumtext" | "longtext" => Self::Text,
            "date" => Self::Date,
            "datetime" | "timestamp" => Self::DateTime,
            "time" => Self::Time,
            "year" => Self::Year,
            "bool" | "boolean" => Self::Bool,
            "enum" => Self::Enum,
            "json" => Self::Json,
            "email" => Self::Email,
            "url" => Self::Url,
            other => Self::Other(other.to_string()),
        }
    }

    /// The semantic value type used by generated models.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Int(_) | Self::Year => ValueType::Integer,
            Self::Numeric => ValueType::Float,
            Self::Bool => ValueType::Boolean,
            Self::Json => ValueType::Array,
            _ => ValueType::String,
        }
    }
}

/// Semantic type tag of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Integer,
    Float,
    Boolean,
    String,
    Array,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Array => "array",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
