//! JSON schema snapshots.
//!
//! A snapshot freezes the catalog of one database so relationships and rules
//! can be derived later without a live connection.
//!
//! ```json
//! {
//!   "database": "shop",
//!   "tables": [
//!     { "name": "users", "columns": [...], "primary_key": ["id"], ... }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{MetadataError, MetadataResult};
use super::source::MetadataSource;
use super::types::{Column, ForeignKey, Index, TableMetadata};

/// Catalog metadata of every base table in a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Database name.
    pub database: String,
    /// Tables, sorted by name.
    pub tables: Vec<TableMetadata>,
}

impl SchemaSnapshot {
    /// Create a snapshot from tables. Tables are sorted by name.
    pub fn new(database: impl Into<String>, mut tables: Vec<TableMetadata>) -> Self {
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            database: database.into(),
            tables,
        }
    }

    /// Read the full catalog of `source`'s database.
    pub fn capture(source: &impl MetadataSource) -> MetadataResult<Self> {
        let names = source.tables()?;

        let tables = names
            .iter()
            .map(|name| source.describe_table(name))
            .collect::<MetadataResult<Vec<_>>>()?;

        info!(
            database = source.database(),
            tables = tables.len(),
            "captured schema snapshot"
        );

        Ok(Self::new(source.database(), tables))
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> MetadataResult<Self> {
        let snapshot: SchemaSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot.database, snapshot.tables))
    }

    /// Serialise as pretty-printed JSON.
    pub fn to_json(&self) -> MetadataResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Write the snapshot to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MetadataResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// A [`MetadataSource`] answering from a [`SchemaSnapshot`].
///
/// Unknown tables behave like a catalog query matching no rows.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: SchemaSnapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: SchemaSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    fn with_table<T>(&self, table: &str, f: impl FnOnce(&TableMetadata) -> Vec<T>) -> Vec<T> {
        self.snapshot.table(table).map(f).unwrap_or_default()
    }
}

impl From<SchemaSnapshot> for SnapshotSource {
    fn from(snapshot: SchemaSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl MetadataSource for SnapshotSource {
    fn database(&self) -> &str {
        &self.snapshot.database
    }

    fn list_tables(&self, database: &str) -> MetadataResult<Vec<String>> {
        if database != self.snapshot.database {
            return Ok(Vec::new());
        }
        Ok(self.snapshot.tables.iter().map(|t| t.name.clone()).collect())
    }

    fn get_columns(&self, table: &str) -> MetadataResult<Vec<Column>> {
        Ok(self.with_table(table, |t| t.columns.clone()))
    }

    fn get_primary_key(&self, table: &str) -> MetadataResult<Vec<String>> {
        Ok(self.with_table(table, |t| t.primary_key.clone()))
    }

    fn get_foreign_keys(&self, table: &str) -> MetadataResult<Vec<ForeignKey>> {
        Ok(self.with_table(table, |t| t.foreign_keys.clone()))
    }

    fn get_indexes(&self, table: &str) -> MetadataResult<Vec<Index>> {
        Ok(self.with_table(table, |t| t.indexes.clone()))
    }
}
