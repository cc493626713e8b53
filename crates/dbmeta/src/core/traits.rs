//! Core traits for dialect-independent introspection.
//!
//! - [`Session`]: the borrowed connection a caller hands in; executes catalog
//!   queries and reports diagnostics
//! - [`MetadataProvider`]: per-dialect strategy that knows which catalog
//!   queries to issue and how to normalize their results
//!
//! Providers own the SQL, sessions own the transport. A new database product
//! needs a provider variant (and usually a session), nothing else.

use async_trait::async_trait;
use tracing::warn;

use crate::error::{MetaError, Result};

use super::schema::{Column, ColumnTypeDescriptor, Index};

/// A live, caller-owned database session.
///
/// Implementations bind `schema` and `table` as the first and second query
/// parameters, in that order.
#[async_trait]
pub trait Session: Send + Sync {
    /// Database product identifier (e.g., "mysql", "postgres").
    fn db_type(&self) -> &str;

    /// Run a column catalog query and scan each row into a [`Column`].
    ///
    /// The query must return, in order: name, comment, data type,
    /// nullability ("YES"/"NO"), key role, full column type, default, extra.
    async fn query_columns(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Column>>;

    /// Run an index catalog query and scan each row into an [`Index`].
    ///
    /// The query must return, in order: table name, column name, index name,
    /// sequence in index, non-unique flag.
    async fn query_indexes(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Index>>;

    /// Describe the result columns of `sql` without reading any rows.
    async fn probe_column_types(&self, sql: &str) -> Result<Vec<ColumnTypeDescriptor>>;

    /// Report a recovered failure.
    fn warn(&self, message: &str, err: &MetaError) {
        warn!("{}: {}", message, err);
    }
}

/// Translates one database product's catalog into [`Column`] and [`Index`].
///
/// # Design Pattern
///
/// This is a **Strategy** - each dialect is a stateless variant selected by
/// [`ProviderImpl`](crate::drivers::ProviderImpl).
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Dialect identifier (e.g., "mysql", "postgres").
    fn name(&self) -> &'static str;

    /// Fetch columns in ordinal order.
    ///
    /// Fails as a whole on any query or scan error.
    async fn fetch_columns(
        &self,
        session: &dyn Session,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Column>>;

    /// Fetch index membership rows for a table.
    ///
    /// Dialects without a supported mechanism return
    /// [`MetaError::Unsupported`].
    async fn fetch_indexes(
        &self,
        session: &dyn Session,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Index>>;
}
