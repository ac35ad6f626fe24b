//! Metadata reader module.
//!
//! This module turns a database catalog into plain metadata values: tables,
//! columns, primary keys, foreign keys and secondary indexes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MetadataSource                             │
//! │  - list_tables()        - get_foreign_keys()                    │
//! │  - get_columns()        - get_indexes()                         │
//! │  - get_primary_key()    - describe_table()                      │
//! └─────────────────────────────────────────────────────────────────┘
//!            │                                     │
//!            ▼                                     ▼
//! ┌───────────────────────────────┐   ┌───────────────────────────────┐
//! │  InformationSchema<C>         │   │  SnapshotSource               │
//! │  (information_schema SQL)     │   │  (JSON SchemaSnapshot)        │
//! └───────────────────────────────┘   └───────────────────────────────┘
//!            │
//!            ▼
//! ┌───────────────────────────────┐
//! │  CatalogConnection            │
//! │  MySqlCatalog (sqlx, blocking)│
//! └───────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use schemagen::metadata::{InformationSchema, MetadataSource, MySqlCatalog};
//!
//! let catalog = MySqlCatalog::connect(&url, &Default::default())?;
//! let source = InformationSchema::new(catalog, "shop");
//!
//! for table in source.tables()? {
//!     let meta = source.describe_table(&table)?;
//!     println!("{} ({} columns)", meta.name, meta.columns.len());
//! }
//! ```

mod catalog;
mod error;
mod mysql;
mod snapshot;
mod source;
mod sql_type;
mod types;

pub use catalog::{CatalogConnection, CatalogRow, InformationSchema};
pub use error::{MetadataError, MetadataResult};
pub use mysql::MySqlCatalog;
pub use snapshot::{SchemaSnapshot, SnapshotSource};
pub use source::MetadataSource;
pub use sql_type::{IntWidth, SqlType, ValueType};
pub use types::*;
