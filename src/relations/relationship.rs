//! Relationship descriptors and their rendered declarations.

use serde::{Deserialize, Serialize};

/// Kind of relationship, seen from the table being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// This table holds the foreign key.
    BelongsTo,
    /// Another table holds a foreign key to this one.
    HasMany,
    /// Like `HasMany`, narrowed to one row by a unique index.
    HasOne,
}

impl RelationshipKind {
    /// Attribute name used in rendered declarations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelongsTo => "belongs_to",
            Self::HasMany => "has_many",
            Self::HasOne => "has_one",
        }
    }

    /// Wrapper type used in rendered declarations.
    pub fn field_type(&self) -> &'static str {
        match self {
            Self::BelongsTo => "BelongsTo",
            Self::HasMany => "HasMany",
            Self::HasOne => "HasOne",
        }
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relationship derived from a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    /// Accessor name, camel case.
    pub accessor: String,
    /// Target entity name, Pascal case.
    pub entity: String,
    /// Table on the far side of the relationship.
    pub related_table: String,
    /// Column holding the foreign key.
    pub foreign_key: String,
    /// Column the foreign key points at.
    pub referenced_key: String,
}

impl Relationship {
    /// Render as an annotated model field.
    ///
    /// ```text
    /// #[belongs_to(key = user_id, references = id)]
    /// user: BelongsTo<User>,
    /// ```
    pub fn declaration(&self) -> String {
        format!(
            "#[{}(key = {}, references = {})]\n{}: {}<{}>,",
            self.kind,
            self.foreign_key,
            self.referenced_key,
            self.accessor,
            self.kind.field_type(),
            self.entity
        )
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} -> {} ({} -> {})",
            self.kind, self.accessor, self.entity, self.foreign_key, self.referenced_key
        )
    }
}

/// All relationships of one table, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRelationships {
    pub table: String,
    pub belongs_to: Vec<Relationship>,
    pub has_many: Vec<Relationship>,
    pub has_one: Vec<Relationship>,
}

impl TableRelationships {
    /// Every relationship in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.belongs_to
            .iter()
            .chain(&self.has_many)
            .chain(&self.has_one)
    }

    pub fn len(&self) -> usize {
        self.belongs_to.len() + self.has_many.len() + self.has_one.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declarations of every relationship, separated by blank lines.
    pub fn declarations(&self) -> String {
        self.iter()
            .map(Relationship::declaration)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
