//! PostgreSQL metadata provider.
//!
//! `information_schema.columns` carries no MySQL-style full column type, no
//! comment, key role or extra. Those come back as placeholders and the full
//! type is then filled in from a zero-row probe of the table itself.
//!
//! Index metadata is not read for PostgreSQL; [`PostgresProvider::fetch_indexes`]
//! always reports [`MetaError::Unsupported`].

use async_trait::async_trait;
use tracing::debug;

use crate::core::schema::{enrich_column_types, Column, Index};
use crate::core::traits::{MetadataProvider, Session};
use crate::error::{MetaError, Result};

/// Column type reported until the probe overwrites it.
pub(crate) const PLACEHOLDER_COLUMN_TYPE: &str = "varchar";

/// Column catalog query, shaped like the MySQL one.
pub(crate) const COLUMN_QUERY: &str = r#"
    SELECT
        column_name::text,
        ''::text AS column_comment,
        data_type::text,
        is_nullable::text,
        ''::text AS column_key,
        'varchar'::text AS column_type,
        column_default::text,
        ''::text AS extra
    FROM information_schema.columns
    WHERE table_schema = $1 AND table_name = $2
    ORDER BY ordinal_position
"#;

/// PostgreSQL metadata provider.
#[derive(Debug, Clone, Default)]
pub struct PostgresProvider;

impl PostgresProvider {
    /// Create a new PostgreSQL provider instance.
    pub fn new() -> Self {
        Self
    }

    /// Zero-row query whose result metadata describes the table's columns.
    pub(crate) fn type_probe_query(schema: &str, table: &str) -> String {
        format!(
            "SELECT * FROM {}.{} LIMIT 0",
            quote_ident(schema),
            quote_ident(table)
        )
    }
}

/// Quote a PostgreSQL identifier.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[async_trait]
impl MetadataProvider for PostgresProvider {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_columns(
        &self,
        session: &dyn Session,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Column>> {
        let columns = session.query_columns(COLUMN_QUERY, schema, table).await?;

        let probe = Self::type_probe_query(schema, table);
        let descriptors = session.probe_column_types(&probe).await?;
        debug!(
            "Loaded {} columns for {}.{} ({} probed types)",
            columns.len(),
            schema,
            table,
            descriptors.len()
        );

        Ok(enrich_column_types(columns, &descriptors))
    }

    async fn fetch_indexes(
        &self,
        _session: &dyn Session,
        _schema: &str,
        _table: &str,
    ) -> Result<Vec<Index>> {
        Err(MetaError::unsupported(self.name(), "fetch_indexes"))
    }
}
