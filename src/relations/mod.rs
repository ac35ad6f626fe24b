//! Relationship resolution between tables.
//!
//! Relationships are derived from declared foreign keys only; nothing is
//! guessed from column names.
//!
//! # Kinds
//!
//! - **belongs_to** - the table holds a foreign key to another table
//! - **has_many** - another table holds a foreign key to this table
//! - **has_one** - a `has_many` whose foreign key column is covered by a
//!   unique index on the other table
//!
//! # Example
//!
//! ```ignore
//! use schemagen::relations::RelationshipResolver;
//!
//! let resolver = RelationshipResolver::new(&source);
//! let relations = resolver.resolve("users")?;
//!
//! for relation in relations.iter() {
//!     println!("{}", relation.declaration());
//! }
//! ```

pub mod inflection;
mod relationship;
mod resolver;

pub use relationship::{Relationship, RelationshipKind, TableRelationships};
pub use resolver::{RelationOptions, RelationshipResolver};
