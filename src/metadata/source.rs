//! MetadataSource trait definition.
//!
//! The MetadataSource trait abstracts over where catalog metadata comes from.
//! The relationship resolver and the rule deriver only ever talk to this
//! trait, so a different backend can be substituted without touching them.

use super::error::MetadataResult;
use super::types::{Column, ForeignKey, Index, TableMetadata};

/// Read-only access to a database catalog.
///
/// Every call re-queries its backend: implementations must not cache. All
/// calls are blocking and return only after their query has finished.
///
/// # Example
///
/// ```ignore
/// use schemagen::metadata::{InformationSchema, MetadataSource, MySqlCatalog};
///
/// let catalog = MySqlCatalog::connect("mysql://root@localhost/shop", &Default::default())?;
/// let source = InformationSchema::new(catalog, "shop");
///
/// let tables = source.list_tables("shop")?;
/// let columns = source.get_columns("orders")?;
/// ```
pub trait MetadataSource {
    /// Name of the database the per-table calls inspect.
    fn database(&self) -> &str;

    /// Base tables of `database`, sorted by name. Views are excluded.
    fn list_tables(&self, database: &str) -> MetadataResult<Vec<String>>;

    /// Columns of `table` in declaration order.
    fn get_columns(&self, table: &str) -> MetadataResult<Vec<Column>>;

    /// Primary key columns of `table` in key order.
    fn get_primary_key(&self, table: &str) -> MetadataResult<Vec<String>>;

    /// Foreign keys of `table` in declaration order.
    fn get_foreign_keys(&self, table: &str) -> MetadataResult<Vec<ForeignKey>>;

    /// Secondary indexes of `table`, excluding the primary key.
    fn get_indexes(&self, table: &str) -> MetadataResult<Vec<Index>>;

    /// Base tables of the database this source inspects.
    fn tables(&self) -> MetadataResult<Vec<String>> {
        self.list_tables(self.database())
    }

    /// Fetch everything known about `table` in one value.
    fn describe_table(&self, table: &str) -> MetadataResult<TableMetadata> {
        Ok(TableMetadata {
            name: table.to_string(),
            columns: self.get_columns(table)?,
            primary_key: self.get_primary_key(table)?,
            foreign_keys: self.get_foreign_keys(table)?,
            indexes: self.get_indexes(table)?,
        })
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn database(&self) -> &str {
        (**self).database()
    }

    fn list_tables(&self, database: &str) -> MetadataResult<Vec<String>> {
        (**self).list_tables(database)
    }

    fn get_columns(&self, table: &str) -> MetadataResult<Vec<Column>> {
        (**self).get_columns(table)
    }

    fn get_primary_key(&self, table: &str) -> MetadataResult<Vec<String>> {
        (**self).get_primary_key(table)
    }

    fn get_foreign_keys(&self, table: &str) -> MetadataResult<Vec<ForeignKey>> {
        (**self).get_foreign_keys(table)
    }

    fn get_indexes(&self, table: &str) -> MetadataResult<Vec<Index>> {
        (**self).get_indexes(table)
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for Box<S> {
    fn database(&self) -> &str {
        (**self).database()
    }

    fn list_tables(&self, database: &str) -> MetadataResult<Vec<String>> {
        (**self).list_tables(database)
    }

    fn get_columns(&self, table: &str) -> MetadataResult<Vec<Column>> {
        (**self).get_columns(table)
    }

    fn get_primary_key(&self, table: &str) -> MetadataResult<Vec<String>> {
        (**self).get_primary_key(table)
    }

    fn get_foreign_keys(&self, table: &str) -> MetadataResult<Vec<ForeignKey>> {
        (**self).get_foreign_keys(table)
    }

    fn get_indexes(&self, table: &str) -> MetadataResult<Vec<Index>> {
        (**self).get_indexes(table)
    }
}
