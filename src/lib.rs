//! # schemagen
//!
//! Reads a relational database catalog and derives what scaffolding needs
//! from it: relationships between tables and validation rules per column.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Catalog (information_schema / snapshot)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Column / ForeignKey / Index / primary key            │
//! └─────────────────────────────────────────────────────────┘
//!                │                          │
//!                ▼ [relations]              ▼ [validation]
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │ belongs_to / has_many /  │  │ column -> ordered rules   │
//! │ has_one descriptors      │  │ "required|integer|min:0"  │
//! └──────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! All reads are blocking and uncached; every derivation re-queries the
//! catalog through a [`metadata::MetadataSource`].

pub mod config;
pub mod metadata;
pub mod relations;
pub mod validation;

pub use metadata::{MetadataError, MetadataResult, MetadataSource};
pub use relations::{Relationship, RelationshipKind, RelationshipResolver};
pub use validation::{RuleDeriver, RuleMode, RuleSet};
