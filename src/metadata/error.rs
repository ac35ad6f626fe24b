//! Metadata-specific error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors that can occur while reading catalog metadata.
///
/// None of these are recovered inside the crate: relationship resolution and
/// rule derivation propagate them unchanged to the caller.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Could not establish a connection to the database.
    #[error("database connection failed: {0}")]
    Connect(String),

    /// A catalog query could not be executed.
    #[error("catalog query failed: {message}")]
    Query {
        /// Short name of the catalog query that failed.
        query: &'static str,
        /// Driver-reported message.
        message: String,
    },

    /// A catalog row is missing a cell that is required to build an entity.
    #[error("catalog query '{query}' returned a row without '{column}'")]
    MalformedRow {
        query: &'static str,
        column: &'static str,
    },

    /// Failed to read or write a schema snapshot file.
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A schema snapshot could not be (de)serialised.
    #[error("invalid schema snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl MetadataError {
    /// Create a query error from any driver error.
    pub fn query(query: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Query {
            query,
            message: err.to_string(),
        }
    }

    /// Check if this error came from the database connection itself.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Query { .. })
    }
}
