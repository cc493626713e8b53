//! Core abstractions for dialect-independent introspection.
//!
//! - [`schema`]: Column, index and type-probe metadata types
//! - [`traits`]: The [`Session`] collaborator and the [`MetadataProvider`] strategy
//!
//! Driver modules (`drivers/mysql`, `drivers/postgres`) implement these traits;
//! the orchestrator only ever sees the traits.

pub mod schema;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use schema::{
    enrich_column_types, group_by_column, parse_nullable, Column, ColumnTypeDescriptor, Index,
};
pub use traits::{MetadataProvider, Session};
