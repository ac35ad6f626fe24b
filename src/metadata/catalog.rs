//! Information-schema backed metadata source.
//!
//! `InformationSchema` turns the standard `information_schema` catalog views
//! into metadata entities. The actual query execution is delegated to a
//! [`CatalogConnection`], so the same SQL runs against a live MySQL server or
//! any other engine exposing the same views.
//!
//! Every query takes `?` parameters and casts numeric columns to text, so a
//! connection only ever has to hand back optional strings.

use indexmap::IndexMap;
use tracing::debug;

use super::error::{MetadataError, MetadataResult};
use super::source::MetadataSource;
use super::types::{Column, ForeignKey, Index, KeyKind};

const LIST_TABLES: &str = "\
SELECT TABLE_NAME
FROM information_schema.TABLES
WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
ORDER BY TABLE_NAME";

const COLUMNS: &str = "\
SELECT COLUMN_NAME, DATA_TYPE, COLUMN_TYPE, IS_NULLABLE, COLUMN_DEFAULT,
       CAST(CHARACTER_MAXIMUM_LENGTH AS CHAR), CAST(NUMERIC_PRECISION AS CHAR),
       CAST(NUMERIC_SCALE AS CHAR), COLUMN_KEY, EXTRA, COLUMN_COMMENT
FROM information_schema.COLUMNS
WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
ORDER BY ORDINAL_POSITION";

const PRIMARY_KEY: &str = "\
SELECT COLUMN_NAME
FROM information_schema.KEY_COLUMN_USAGE
WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND CONSTRAINT_NAME = 'PRIMARY'
ORDER BY ORDINAL_POSITION";

const FOREIGN_KEYS: &str = "\
SELECT k.COLUMN_NAME, k.REFERENCED_TABLE_NAME, k.REFERENCED_COLUMN_NAME,
       r.UPDATE_RULE, r.DELETE_RULE
FROM information_schema.KEY_COLUMN_USAGE k
LEFT JOIN information_schema.REFERENTIAL_CONSTRAINTS r
  ON r.CONSTRAINT_SCHEMA = k.CONSTRAINT_SCHEMA
 AND r.TABLE_NAME = k.TABLE_NAME
 AND r.CONSTRAINT_NAME = k.CONSTRAINT_NAME
WHERE k.TABLE_SCHEMA = ? AND k.TABLE_NAME = ? AND k.REFERENCED_TABLE_NAME IS NOT NULL
ORDER BY k.ORDINAL_POSITION, k.CONSTRAINT_NAME";

const INDEXES: &str = "\
SELECT INDEX_NAME, COLUMN_NAME, CAST(NON_UNIQUE AS CHAR), INDEX_TYPE
FROM information_schema.STATISTICS
WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND INDEX_NAME <> 'PRIMARY'
ORDER BY INDEX_NAME, SEQ_IN_INDEX";

/// Referential action assumed when the catalog reports none.
const DEFAULT_REFERENTIAL_ACTION: &str = "RESTRICT";

/// One row of a catalog query, every cell as optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    cells: Vec<Option<String>>,
}

impl CatalogRow {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, `None` for SQL NULL or a missing cell.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<Option<String>>> for CatalogRow {
    fn from(cells: Vec<Option<String>>) -> Self {
        Self::new(cells)
    }
}

/// Blocking, read-only query execution against a catalog.
pub trait CatalogConnection {
    /// Run `sql` with positional `?` parameters and return all rows.
    ///
    /// `name` identifies the query in errors.
    fn fetch_all(
        &self,
        name: &'static str,
        sql: &str,
        params: &[&str],
    ) -> MetadataResult<Vec<CatalogRow>>;
}

impl<C: CatalogConnection + ?Sized> CatalogConnection for &C {
    fn fetch_all(
        &self,
        name: &'static str,
        sql: &str,
        params: &[&str],
    ) -> MetadataResult<Vec<CatalogRow>> {
        (**self).fetch_all(name, sql, params)
    }
}

/// A [`MetadataSource`] reading the `information_schema` views of one database.
pub struct InformationSchema<C> {
    conn: C,
    database: String,
}

impl<C: CatalogConnection> InformationSchema<C> {
    /// Inspect `database` through `conn`.
    pub fn new(conn: C, database: impl Into<String>) -> Self {
        Self {
            conn,
            database: database.into(),
        }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.conn
    }

    fn fetch(
        &self,
        name: &'static str,
        sql: &str,
        params: &[&str],
    ) -> MetadataResult<Vec<CatalogRow>> {
        let rows = self.conn.fetch_all(name, sql, params)?;
        debug!(query = name, params = ?params, rows = rows.len(), "catalog query");
        Ok(rows)
    }
}

fn required(
    row: &CatalogRow,
    index: usize,
    query: &'static str,
    column: &'static str,
) -> MetadataResult<String> {
    row.get(index)
        .map(str::to_string)
        .ok_or(MetadataError::MalformedRow { query, column })
}

fn optional(row: &CatalogRow, index: usize) -> Option<String> {
    row.get(index).map(str::to_string)
}

fn number<T: std::str::FromStr>(row: &CatalogRow, index: usize) -> Option<T> {
    row.get(index).and_then(|s| s.trim().parse().ok())
}

impl<C: CatalogConnection> MetadataSource for InformationSchema<C> {
    fn database(&self) -> &str {
        &self.database
    }

    fn list_tables(&self, database: &str) -> MetadataResult<Vec<String>> {
        self.fetch("tables", LIST_TABLES, &[database])?
            .iter()
            .map(|row| required(row, 0, "tables", "TABLE_NAME"))
            .collect()
    }

    fn get_columns(&self, table: &str) -> MetadataResult<Vec<Column>> {
        self.fetch("columns", COLUMNS, &[self.database.as_str(), table])?
            .iter()
            .map(|row| {
                Ok(Column {
                    name: required(row, 0, "columns", "COLUMN_NAME")?,
                    data_type: required(row, 1, "columns", "DATA_TYPE")?,
                    column_type: required(row, 2, "columns", "COLUMN_TYPE")?,
                    nullable: required(row, 3, "columns", "IS_NULLABLE")?,
                    default: optional(row, 4),
                    max_length: number(row, 5),
                    numeric_precision: number(row, 6),
                    numeric_scale: number(row, 7),
                    key: KeyKind::from_catalog(row.get(8).unwrap_or_default()),
                    extra: optional(row, 9).unwrap_or_default(),
                    comment: optional(row, 10).unwrap_or_default(),
                })
            })
            .collect()
    }

    fn get_primary_key(&self, table: &str) -> MetadataResult<Vec<String>> {
        self.fetch("primary_key", PRIMARY_KEY, &[self.database.as_str(), table])?
            .iter()
            .map(|row| required(row, 0, "primary_key", "COLUMN_NAME"))
            .collect()
    }

    fn get_foreign_keys(&self, table: &str) -> MetadataResult<Vec<ForeignKey>> {
        let rows = self.fetch("foreign_keys", FOREIGN_KEYS, &[self.database.as_str(), table])?;

        let mut foreign_keys = Vec::with_capacity(rows.len());
        for row in &rows {
            // Rows without a referenced table are not foreign keys.
            let Some(referenced_table) = optional(row, 1) else {
                continue;
            };

            foreign_keys.push(ForeignKey {
                column: required(row, 0, "foreign_keys", "COLUMN_NAME")?,
                referenced_table,
                referenced_column: required(row, 2, "foreign_keys", "REFERENCED_COLUMN_NAME")?,
                on_update: optional(row, 3)
                    .unwrap_or_else(|| DEFAULT_REFERENTIAL_ACTION.to_string()),
                on_delete: optional(row, 4)
                    .unwrap_or_else(|| DEFAULT_REFERENTIAL_ACTION.to_string()),
            });
        }

        Ok(foreign_keys)
    }

    fn get_indexes(&self, table: &str) -> MetadataResult<Vec<Index>> {
        let rows = self.fetch("indexes", INDEXES, &[self.database.as_str(), table])?;

        let mut indexes: IndexMap<String, Index> = IndexMap::new();
        for row in &rows {
            let name = required(row, 0, "indexes", "INDEX_NAME")?;
            let unique = row.get(2).map(|s| s.trim() == "0").unwrap_or(false);
            let index_type = optional(row, 3).unwrap_or_default();

            let index = indexes.entry(name.clone()).or_insert_with(|| Index {
                name,
                columns: Vec::new(),
                unique,
                index_type,
            });

            // Functional key parts have no column name.
            match optional(row, 1) {
                Some(column) => index.columns.push(column),
                None => debug!(table, index = %index.name, "skipping functional key part"),
            }
        }

        // An index built only from functional key parts names no column.
        Ok(indexes
            .into_values()
            .filter(|index| {
                if index.columns.is_empty() {
                    debug!(table, index = %index.name, "skipping index without named columns");
                }
                !index.columns.is_empty()
            })
            .collect())
    }
}
