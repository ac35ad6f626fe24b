//! Relationship resolution from foreign keys and unique indexes.

use std::collections::HashSet;

use tracing::debug;

use super::inflection::{entity_name, method_name, pluralize, singularize};
use super::relationship::{Relationship, RelationshipKind, TableRelationships};
use crate::metadata::{MetadataResult, MetadataSource};

/// Options controlling relationship resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationOptions {
    /// Keep the `has_many` entry of a foreign key that also produced a
    /// `has_one` entry. When false the `has_many` entry is dropped.
    pub keep_duplicate_collections: bool,
}

/// Derives relationships of a table from catalog metadata.
///
/// Nothing is cached: every call re-reads the catalog through the source.
pub struct RelationshipResolver<S> {
    source: S,
    options: RelationOptions,
}

impl<S: MetadataSource> RelationshipResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, RelationOptions::default())
    }

    pub fn with_options(source: S, options: RelationOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve every relationship kind of `table`.
    pub fn resolve(&self, table: &str) -> MetadataResult<TableRelationships> {
        let tables = self.source.tables()?;

        let belongs_to = self.belongs_to_among(table, &tables)?;
        let mut has_many = self.has_many_among(table, &tables)?;
        let has_one = self.has_one_from(&has_many)?;

        if !self.options.keep_duplicate_collections {
            let singular: HashSet<(&str, &str)> = has_one
                .iter()
                .map(|r| (r.related_table.as_str(), r.foreign_key.as_str()))
                .collect();
            has_many.retain(|r| {
                !singular.contains(&(r.related_table.as_str(), r.foreign_key.as_str()))
            });
        }

        Ok(TableRelationships {
            table: table.to_string(),
            belongs_to,
            has_many,
            has_one,
        })
    }

    /// Relationships held by `table` through its own foreign keys.
    ///
    /// Foreign keys to tables that do not exist are skipped.
    pub fn belongs_to(&self, table: &str) -> MetadataResult<Vec<Relationship>> {
        let tables = self.source.tables()?;
        self.belongs_to_among(table, &tables)
    }

    /// Relationships from other tables holding foreign keys to `table`.
    pub fn has_many(&self, table: &str) -> MetadataResult<Vec<Relationship>> {
        let tables = self.source.tables()?;
        self.has_many_among(table, &tables)
    }

    /// Narrow `has_many` relationships whose foreign key column is covered by
    /// a unique index on the far table.
    pub fn has_one_from(&self, has_many: &[Relationship]) -> MetadataResult<Vec<Relationship>> {
        let mut has_one = Vec::new();

        for relation in has_many {
            let indexes = self.source.get_indexes(&relation.related_table)?;
            let unique = indexes
                .iter()
                .any(|index| index.unique && index.covers(&relation.foreign_key));

            if unique {
                has_one.push(Relationship {
                    kind: RelationshipKind::HasOne,
                    accessor: singularize(&relation.accessor),
                    ..relation.clone()
                });
            }
        }

        Ok(has_one)
    }

    fn belongs_to_among(&self, table: &str, tables: &[String]) -> MetadataResult<Vec<Relationship>> {
        let foreign_keys = self.source.get_foreign_keys(table)?;

        let mut relations = Vec::with_capacity(foreign_keys.len());
        for fk in foreign_keys {
            if !tables.contains(&fk.referenced_table) {
                debug!(
                    table,
                    column = %fk.column,
                    referenced_table = %fk.referenced_table,
                    "skipping foreign key to unknown table"
                );
                continue;
            }

            relations.push(Relationship {
                kind: RelationshipKind::BelongsTo,
                accessor: method_name(&fk.referenced_table),
                entity: entity_name(&fk.referenced_table),
                related_table: fk.referenced_table,
                foreign_key: fk.column,
                referenced_key: fk.referenced_column,
            });
        }

        Ok(relations)
    }

    fn has_many_among(&self, table: &str, tables: &[String]) -> MetadataResult<Vec<Relationship>> {
        let mut relations = Vec::new();

        for other in tables.iter().filter(|t| t.as_str() != table) {
            for fk in self.source.get_foreign_keys(other)? {
                if fk.referenced_table != table {
                    continue;
                }

                relations.push(Relationship {
                    kind: RelationshipKind::HasMany,
                    accessor: pluralize(&method_name(other)),
                    entity: entity_name(other),
                    related_table: other.clone(),
                    foreign_key: fk.column,
                    referenced_key: fk.referenced_column,
                });
            }
        }

        Ok(relations)
    }
}
