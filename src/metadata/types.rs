//! Metadata entity types.
//!
//! These are plain values produced fresh by every catalog query. Nothing here
//! holds a connection or caches anything.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::sql_type::{SqlType, ValueType};

static ENUM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^enum\((.*)\)$").unwrap());

/// Key classification reported by the catalog's `COLUMN_KEY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyKind {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "PRI")]
    Primary,
    #[serde(rename = "UNI")]
    Unique,
    #[serde(rename = "MUL")]
    Multiple,
}

impl KeyKind {
    /// Parse the catalog marker. Unknown markers are treated as no key.
    pub fn from_catalog(marker: &str) -> Self {
        match marker.trim().to_uppercase().as_str() {
            "PRI" => Self::Primary,
            "UNI" => Self::Unique,
            "MUL" => Self::Multiple,
            _ => Self::None,
        }
    }

    /// The catalog marker for this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Primary => "PRI",
            Self::Unique => "UNI",
            Self::Multiple => "MUL",
        }
    }
}

/// A table column as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Raw type name (`DATA_TYPE`), e.g. `int`.
    pub data_type: String,
    /// Full declared type (`COLUMN_TYPE`), e.g. `int(11) unsigned`.
    pub column_type: String,
    /// Nullability flag as reported by the catalog (`YES` / `NO`).
    pub nullable: String,
    /// Default value expression.
    #[serde(default)]
    pub default: Option<String>,
    /// Maximum character length for string types.
    #[serde(default)]
    pub max_length: Option<u64>,
    /// Numeric precision.
    #[serde(default)]
    pub numeric_precision: Option<u32>,
    /// Numeric scale.
    #[serde(default)]
    pub numeric_scale: Option<u32>,
    /// Key classification.
    #[serde(default)]
    pub key: KeyKind,
    /// Extra modifiers, e.g. `auto_increment`.
    #[serde(default)]
    pub extra: String,
    /// Column comment.
    #[serde(default)]
    pub comment: String,
}

impl Column {
    /// Create a column with the given raw and full type. Everything else
    /// starts out empty and `NOT NULL`.
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        column_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            column_type: column_type.into(),
            nullable: "NO".to_string(),
            default: None,
            max_length: None,
            numeric_precision: None,
            numeric_scale: None,
            key: KeyKind::None,
            extra: String::new(),
            comment: String::new(),
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = if nullable { "YES" } else { "NO" }.to_string();
        self
    }

    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_key(mut self, key: KeyKind) -> Self {
        self.key = key;
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// True if the extra modifiers mention `auto_increment` in any case.
    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_lowercase().contains("auto_increment")
    }

    /// True if the nullability flag is `YES` in any case.
    pub fn is_nullable(&self) -> bool {
        self.nullable.eq_ignore_ascii_case("YES")
    }

    /// True if the full declared type is unsigned.
    pub fn is_unsigned(&self) -> bool {
        is_unsigned(&self.column_type)
    }

    /// Values of an `enum(...)` column, empty for every other type.
    pub fn enum_values(&self) -> Vec<String> {
        enum_values(&self.column_type)
    }

    /// The raw type resolved against the closed type table.
    pub fn sql_type(&self) -> SqlType {
        SqlType::parse(&self.data_type)
    }

    /// Semantic value type of the column.
    pub fn value_type(&self) -> ValueType {
        self.sql_type().value_type()
    }
}

/// Extract the values of an `enum('a','b')` type string.
///
/// Anything not starting with `enum(` and ending with `)` yields an empty list.
pub fn enum_values(column_type: &str) -> Vec<String> {
    let Some(captures) = ENUM_PATTERN.captures(column_type) else {
        return Vec::new();
    };

    let inner = &captures[1];
    if inner.trim().is_empty() {
        return Vec::new();
    }

    inner
        .split(',')
        .map(|token| {
            token
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .to_string()
        })
        .collect()
}

/// True if the lower-cased type string contains `unsigned`.
pub fn is_unsigned(column_type: &str) -> bool {
    column_type.to_lowercase().contains("unsigned")
}

/// A foreign key held by one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Column holding the key.
    pub column: String,
    /// Referenced table.
    pub referenced_table: String,
    /// Referenced column.
    pub referenced_column: String,
    /// ON UPDATE action.
    pub on_update: String,
    /// ON DELETE action.
    pub on_delete: String,
}

impl ForeignKey {
    pub fn new(
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
            on_update: "RESTRICT".to_string(),
            on_delete: "RESTRICT".to_string(),
        }
    }
}

/// A secondary index. The primary key index is never represented here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Member columns in index order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Index method, e.g. `BTREE`.
    pub index_type: String,
}

impl Index {
    pub fn new(name: impl Into<String>, columns: &[&str], unique: bool) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique,
            index_type: "BTREE".to_string(),
        }
    }

    /// True if `column` is a member of this index.
    pub fn covers(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Everything the catalog knows about one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
    /// Primary key columns in key order.
    #[serde(default)]
    pub primary_key: Vec<String>,
    /// Foreign keys in declaration order.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    /// Secondary indexes.
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl TableMetadata {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
