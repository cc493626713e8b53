//! MySQL/MariaDB metadata provider.
//!
//! Reads `information_schema.COLUMNS` and `information_schema.STATISTICS`.
//! Both map 1:1 onto the canonical shapes, so no post-processing is needed.

use async_trait::async_trait;
use tracing::debug;

use crate::core::schema::{Column, Index};
use crate::core::traits::{MetadataProvider, Session};
use crate::error::Result;

/// Column catalog query.
///
/// CAST to CHAR since information_schema may hand back VARBINARY/LONGTEXT
/// depending on server collation.
pub(crate) const COLUMN_QUERY: &str = r#"
    SELECT
        CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
        CAST(COLUMN_COMMENT AS CHAR) AS COLUMN_COMMENT,
        CAST(DATA_TYPE AS CHAR(255)) AS DATA_TYPE,
        CAST(IS_NULLABLE AS CHAR(3)) AS IS_NULLABLE,
        CAST(COLUMN_KEY AS CHAR(3)) AS COLUMN_KEY,
        CAST(COLUMN_TYPE AS CHAR) AS COLUMN_TYPE,
        CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT,
        CAST(EXTRA AS CHAR(255)) AS EXTRA
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION
"#;

/// Index catalog query. Ordered so composite index members arrive by position.
pub(crate) const INDEX_QUERY: &str = r#"
    SELECT
        CAST(TABLE_NAME AS CHAR(255)) AS TABLE_NAME,
        CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
        CAST(INDEX_NAME AS CHAR(255)) AS INDEX_NAME,
        CAST(SEQ_IN_INDEX AS SIGNED) AS SEQ_IN_INDEX,
        CAST(NON_UNIQUE AS SIGNED) AS NON_UNIQUE
    FROM information_schema.STATISTICS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY INDEX_NAME, SEQ_IN_INDEX
"#;

/// MySQL metadata provider.
#[derive(Debug, Clone, Default)]
pub struct MysqlProvider;

impl MysqlProvider {
    /// Create a new MySQL provider instance.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetadataProvider for MysqlProvider {
    fn name(&self) -> &'static str {
        "mysql"
    }

    async fn fetch_columns(
        &self,
        session: &dyn Session,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Column>> {
        let columns = session.query_columns(COLUMN_QUERY, schema, table).await?;
        debug!("Loaded {} columns for {}.{}", columns.len(), schema, table);
        Ok(columns)
    }

    async fn fetch_indexes(
        &self,
        session: &dyn Session,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Index>> {
        let indexes = session.query_indexes(INDEX_QUERY, schema, table).await?;
        debug!("Loaded {} index rows for {}.{}", indexes.len(), schema, table);
        Ok(indexes)
    }
}
