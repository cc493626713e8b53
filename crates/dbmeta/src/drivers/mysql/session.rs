//! MySQL/MariaDB session over an SQLx connection pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow, MySqlSslMode};
use sqlx::{Column as _, Executor, Row, Statement as _, TypeInfo};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::core::schema::{parse_nullable, Column, ColumnTypeDescriptor, Index};
use crate::core::traits::Session;
use crate::drivers::common::SslMode;
use crate::error::{MetaError, Result};

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Session backed by a MySQL pool.
#[derive(Clone)]
pub struct MysqlSession {
    pool: MySqlPool,
}

impl MysqlSession {
    /// Open a pool from configuration and verify it with `SELECT 1`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let ssl_mode = mysql_ssl_mode(SslMode::parse(&config.ssl_mode)?);
        let port = config.port()?;

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password)
            .ssl_mode(ssl_mode);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| MetaError::pool(e, "creating MySQL pool"))?;

        let session = Self::from_pool(pool);
        session.test_connection().await?;

        info!(
            "Connected to MySQL: {}:{}/{}",
            config.host, port, config.database
        );
        Ok(session)
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| MetaError::pool(e, "testing MySQL connection"))?;
        Ok(())
    }

    /// Close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_rows(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<MySqlRow>> {
        Ok(sqlx::query(sql)
            .bind(schema)
            .bind(table)
            .fetch_all(&self.pool)
            .await?)
    }
}

/// Map a configured SSL mode onto SQLx's.
///
/// Every TLS mode verifies the server certificate; only `verify-full` also
/// checks the hostname.
fn mysql_ssl_mode(mode: SslMode) -> MySqlSslMode {
    match mode {
        SslMode::Disable => MySqlSslMode::Disabled,
        SslMode::Require => MySqlSslMode::VerifyCa,
        SslMode::VerifyFull => MySqlSslMode::VerifyIdentity,
    }
}

fn scan_column(row: &MySqlRow) -> std::result::Result<Column, sqlx::Error> {
    Ok(Column {
        name: row.try_get(0)?,
        comment: row.try_get::<Option<String>, _>(1)?.unwrap_or_default(),
        data_type: row.try_get(2)?,
        is_nullable: parse_nullable(&row.try_get::<String, _>(3)?),
        column_key: row.try_get::<Option<String>, _>(4)?.unwrap_or_default(),
        column_type: row.try_get(5)?,
        default_value: row.try_get(6)?,
        extra: row.try_get::<Option<String>, _>(7)?.unwrap_or_default(),
        indexes: Vec::new(),
    })
}

fn scan_index(row: &MySqlRow) -> std::result::Result<Index, sqlx::Error> {
    Ok(Index {
        table_name: row.try_get(0)?,
        column_name: row.try_get(1)?,
        index_name: row.try_get(2)?,
        seq_in_index: row.try_get::<i64, _>(3)? as i32,
        non_unique: row.try_get::<i64, _>(4)? != 0,
    })
}

#[async_trait]
impl Session for MysqlSession {
    fn db_type(&self) -> &str {
        "mysql"
    }

    async fn query_columns(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Column>> {
        self.fetch_rows(sql, schema, table)
            .await?
            .iter()
            .map(|row| {
                scan_column(row).map_err(|e| MetaError::query(e, "scanning MySQL column row"))
            })
            .collect()
    }

    async fn query_indexes(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Index>> {
        self.fetch_rows(sql, schema, table)
            .await?
            .iter()
            .map(|row| {
                scan_index(row).map_err(|e| MetaError::query(e, "scanning MySQL index row"))
            })
            .collect()
    }

    async fn probe_column_types(&self, sql: &str) -> Result<Vec<ColumnTypeDescriptor>> {
        let stmt = (&self.pool).prepare(sql).await?;
        Ok(stmt
            .columns()
            .iter()
            .map(|c| ColumnTypeDescriptor::new(c.name(), c.type_info().name()))
            .collect())
    }
}
