//! Introspection orchestrator.
//!
//! Resolves the provider for a session, fetches columns, and, when asked,
//! attaches index membership to each column. Columns are mandatory; indexes
//! are best-effort and their failure only produces a warning.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::schema::{group_by_column, Column, Index};
use crate::core::traits::{MetadataProvider, Session};
use crate::drivers::select_provider;
use crate::error::{MetaError, Result};

/// Fetch a table's columns, optionally enriched with index membership.
///
/// Outcomes are all-or-nothing: a complete enriched list, a complete list
/// without indexes (index fetch failed, one warning emitted through
/// [`Session::warn`]), or an error.
pub async fn get_columns_with_indexes(
    session: Option<&dyn Session>,
    schema: &str,
    table: &str,
    include_indexes: bool,
) -> Result<Vec<Column>> {
    let session = session.ok_or(MetaError::NoSession)?;
    let provider = select_provider(session)?;

    let columns = provider.fetch_columns(session, schema, table).await?;
    if !include_indexes || columns.is_empty() {
        return Ok(columns);
    }

    let indexes = match provider.fetch_indexes(session, schema, table).await {
        Ok(indexes) => indexes,
        Err(e) => {
            session.warn(&format!("fetch indexes for {}", table), &e);
            return Ok(columns);
        }
    };

    debug!(
        "Attaching {} index rows to {} columns of {}.{}",
        indexes.len(),
        columns.len(),
        schema,
        table
    );
    Ok(attach_indexes(columns, indexes))
}

/// Attach index rows to the columns they name.
///
/// Columns with no matching rows keep an empty index list.
pub fn attach_indexes(columns: Vec<Column>, indexes: Vec<Index>) -> Vec<Column> {
    if indexes.is_empty() {
        return columns;
    }

    let mut grouped = group_by_column(indexes);
    columns
        .into_iter()
        .map(|col| {
            let indexes = grouped.remove(&col.name).unwrap_or_default();
            Column { indexes, ..col }
        })
        .collect()
}

/// Table metadata as handed to code generators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    /// Schema name.
    pub schema: String,

    /// Table name.
    pub name: String,

    /// Columns in ordinal order.
    pub columns: Vec<Column>,
}

impl TableInfo {
    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Names of the primary key columns, in column order.
    pub fn primary_key(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key())
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Convenience wrapper binding a borrowed session to an index policy.
pub struct Introspector<'a> {
    session: &'a dyn Session,
    include_indexes: bool,
}

impl<'a> Introspector<'a> {
    /// Create an introspector that includes indexes.
    pub fn new(session: &'a dyn Session) -> Self {
        Self {
            session,
            include_indexes: true,
        }
    }

    /// Set whether index metadata is fetched.
    pub fn with_indexes(mut self, include_indexes: bool) -> Self {
        self.include_indexes = include_indexes;
        self
    }

    /// Fetch the columns of one table.
    pub async fn columns(&self, schema: &str, table: &str) -> Result<Vec<Column>> {
        get_columns_with_indexes(Some(self.session), schema, table, self.include_indexes).await
    }

    /// Fetch one table as a [`TableInfo`].
    pub async fn table(&self, schema: &str, table: &str) -> Result<TableInfo> {
        let columns = self.columns(schema, table).await?;
        Ok(TableInfo {
            schema: schema.to_string(),
            name: table.to_string(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::MockSession;
    use crate::core::schema::fixtures::{column, index};
    use crate::core::schema::ColumnTypeDescriptor;

    fn index_calls(session: &MockSession) -> usize {
        session
            .calls()
            .iter()
            .filter(|c| c.starts_with("indexes"))
            .count()
    }

    #[tokio::test]
    async fn test_missing_session_fails_before_any_query() {
        let err = get_columns_with_indexes(None, "shop", "orders", true)
            .await
            .unwrap_err();
        assert!(matches!(err, MetaError::NoSession));
    }

    #[tokio::test]
    async fn test_unknown_dialect_fails_before_any_query() {
        let session = MockSession::new("oracle").with_columns(vec![column("id", "int")]);

        let err = get_columns_with_indexes(Some(&session), "shop", "orders", true)
            .await
            .unwrap_err();

        assert!(matches!(err, MetaError::UnsupportedDialect(ref t) if t == "oracle"));
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_without_indexes_returns_columns_untouched() {
        let columns = vec![column("id", "int"), column("status", "varchar")];
        let session = MockSession::new("mysql")
            .with_columns(columns.clone())
            .with_indexes(vec![index("orders", "id", "PRIMARY", 1, false)]);

        let result = get_columns_with_indexes(Some(&session), "shop", "orders", false)
            .await
            .unwrap();

        assert_eq!(result, columns);
        assert_eq!(index_calls(&session), 0);
    }

    #[tokio::test]
    async fn test_empty_table_skips_index_fetch() {
        let session = MockSession::new("mysql")
            .with_indexes(vec![index("orders", "id", "PRIMARY", 1, false)]);

        let result = get_columns_with_indexes(Some(&session), "shop", "orders", true)
            .await
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(index_calls(&session), 0);
    }

    #[tokio::test]
    async fn test_column_failure_propagates() {
        let session =
            MockSession::new("mysql").failing_columns("Table 'shop.orders' doesn't exist");

        let err = get_columns_with_indexes(Some(&session), "shop", "orders", true)
            .await
            .unwrap_err();

        assert!(matches!(err, MetaError::Query { .. }));
        assert_eq!(index_calls(&session), 0);
        assert!(session.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_index_failure_warns_once_and_keeps_columns() {
        let columns = vec![column("id", "int"), column("status", "varchar")];
        let session = MockSession::new("mysql")
            .with_columns(columns.clone())
            .failing_indexes("SELECT command denied");

        let result = get_columns_with_indexes(Some(&session), "shop", "orders", true)
            .await
            .unwrap();

        assert_eq!(result, columns);
        let warnings = session.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("orders"));
        assert!(warnings[0].contains("SELECT command denied"));
    }

    #[tokio::test]
    async fn test_postgres_unsupported_indexes_degrade_to_warning() {
        let session = MockSession::new("postgres")
            .with_columns(vec![column("id", "integer")])
            .with_probe(vec![ColumnTypeDescriptor::new("id", "INT4")]);

        let result = get_columns_with_indexes(Some(&session), "public", "orders", true)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].column_type, "INT4");
        assert!(result[0].indexes.is_empty());

        let warnings = session.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not supported"));
    }

    #[tokio::test]
    async fn test_postgres_without_indexes_keeps_probed_types_quietly() {
        let session = MockSession::new("postgres")
            .with_columns(vec![column("id", "integer"), column("title", "character varying")])
            .with_probe(vec![
                ColumnTypeDescriptor::new("id", "INT4"),
                ColumnTypeDescriptor::new("title", "VARCHAR"),
            ]);

        let result = get_columns_with_indexes(Some(&session), "public", "posts", false)
            .await
            .unwrap();

        let types: Vec<&str> = result.iter().map(|c| c.column_type.as_str()).collect();
        assert_eq!(types, vec!["INT4", "VARCHAR"]);
        assert!(result.iter().all(|c| c.indexes.is_empty()));
        assert_eq!(index_calls(&session), 0);
        assert!(session.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_empty_index_result_returns_columns_unchanged() {
        let columns = vec![column("id", "int")];
        let session = MockSession::new("mysql").with_columns(columns.clone());

        let result = get_columns_with_indexes(Some(&session), "shop", "orders", true)
            .await
            .unwrap();

        assert_eq!(result, columns);
        assert_eq!(index_calls(&session), 1);
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn test_attach_indexes_groups_by_column_name() {
        let columns = vec![column("A", "int"), column("B", "int"), column("C", "int")];
        let indexes = vec![
            index("t", "A", "idx_a_c", 1, true),
            index("t", "C", "idx_a_c", 2, true),
            index("t", "A", "PRIMARY", 1, false),
        ];

        let merged = attach_indexes(columns, indexes);

        let a: Vec<&str> = merged[0].indexes.iter().map(|i| i.index_name.as_str()).collect();
        assert_eq!(a, vec!["idx_a_c", "PRIMARY"]);
        assert!(merged[1].indexes.is_empty());
        assert_eq!(merged[2].indexes.len(), 1);
        assert_eq!(merged[2].indexes[0].seq_in_index, 2);
    }

    #[test]
    fn test_attach_indexes_ignores_unknown_columns() {
        let merged = attach_indexes(
            vec![column("id", "int")],
            vec![index("t", "ghost", "idx_ghost", 1, true)],
        );
        assert!(merged[0].indexes.is_empty());
    }

    #[tokio::test]
    async fn test_orders_end_to_end() {
        let mut id = column("id", "int");
        id.column_key = "PRI".to_string();
        let session = MockSession::new("mysql")
            .with_columns(vec![id, column("status", "varchar")])
            .with_indexes(vec![index("orders", "id", "PRIMARY", 1, false)]);

        let table = Introspector::new(&session)
            .table("shop", "orders")
            .await
            .unwrap();

        assert_eq!(table.full_name(), "shop.orders");
        assert_eq!(table.primary_key(), vec!["id"]);

        let id = &table.columns[0];
        assert_eq!(id.indexes.len(), 1);
        assert_eq!(id.indexes[0].index_name, "PRIMARY");
        assert_eq!(id.indexes[0].seq_in_index, 1);
        assert!(id.indexes[0].is_unique());
        assert!(table.columns[1].indexes.is_empty());
    }

    #[tokio::test]
    async fn test_introspector_respects_index_policy() {
        let session = MockSession::new("mysql")
            .with_columns(vec![column("id", "int")])
            .with_indexes(vec![index("orders", "id", "PRIMARY", 1, false)]);

        let columns = Introspector::new(&session)
            .with_indexes(false)
            .columns("shop", "orders")
            .await
            .unwrap();

        assert!(columns[0].indexes.is_empty());
        assert_eq!(index_calls(&session), 0);
    }
}
