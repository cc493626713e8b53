//! PostgreSQL session over a deadpool-postgres pool.

use async_trait::async_trait;
use deadpool_postgres::{Client, Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::types::Type;
use tokio_postgres::{Config as PgConfig, Row};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::core::schema::{parse_nullable, Column, ColumnTypeDescriptor, Index};
use crate::core::traits::Session;
use crate::drivers::common::{postgres_tls, SslMode};
use crate::error::{MetaError, Result};

/// Session backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PostgresSession {
    pool: Pool,
}

impl PostgresSession {
    /// Open a pool from configuration and verify it with `SELECT 1`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let port = config.port()?;
        let mut pg_config = PgConfig::new();
        pg_config.host(&config.host);
        pg_config.port(port);
        pg_config.dbname(&config.database);
        pg_config.user(&config.user);
        pg_config.password(&config.password);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let ssl_mode = SslMode::parse(&config.ssl_mode)?;
        let mgr = match postgres_tls(ssl_mode)? {
            Some(tls) => Manager::from_config(pg_config, tls, mgr_config),
            None => {
                warn!("PostgreSQL TLS is disabled. Credentials will be transmitted in plaintext.");
                Manager::from_config(pg_config, tokio_postgres::NoTls, mgr_config)
            }
        };

        let pool = Pool::builder(mgr)
            .max_size(config.max_connections as usize)
            .build()
            .map_err(|e| MetaError::pool(e, "creating PostgreSQL pool"))?;

        let session = Self::from_pool(pool);
        session.test_connection().await?;

        info!(
            "Connected to PostgreSQL: {}:{}/{}",
            config.host, port, config.database
        );
        Ok(session)
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.client("testing PostgreSQL connection").await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }

    /// Close the pool.
    pub fn close(&self) {
        self.pool.close();
    }

    async fn client(&self, context: &str) -> Result<Client> {
        self.pool
            .get()
            .await
            .map_err(|e| MetaError::pool(e, context))
    }

    async fn fetch_rows(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Row>> {
        let client = self.client("getting connection for catalog query").await?;
        Ok(client.query(sql, &[&schema, &table]).await?)
    }
}

fn scan_column(row: &Row) -> std::result::Result<Column, tokio_postgres::Error> {
    Ok(Column {
        name: row.try_get(0)?,
        comment: row.try_get::<_, Option<String>>(1)?.unwrap_or_default(),
        data_type: row.try_get(2)?,
        is_nullable: parse_nullable(row.try_get::<_, &str>(3)?),
        column_key: row.try_get::<_, Option<String>>(4)?.unwrap_or_default(),
        column_type: row.try_get(5)?,
        default_value: row.try_get(6)?,
        extra: row.try_get::<_, Option<String>>(7)?.unwrap_or_default(),
        indexes: Vec::new(),
    })
}

fn scan_index(row: &Row) -> std::result::Result<Index, tokio_postgres::Error> {
    Ok(Index {
        table_name: row.try_get(0)?,
        column_name: row.try_get(1)?,
        index_name: row.try_get(2)?,
        seq_in_index: row.try_get(3)?,
        non_unique: row.try_get(4)?,
    })
}

/// Descriptor for one prepared result column. Type names are reported in
/// upper case ("INT4", "VARCHAR"), matching what SQLx reports for MySQL.
fn probed_type(name: &str, ty: &Type) -> ColumnTypeDescriptor {
    ColumnTypeDescriptor::new(name, ty.name().to_uppercase())
}

#[async_trait]
impl Session for PostgresSession {
    fn db_type(&self) -> &str {
        "postgres"
    }

    async fn query_columns(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Column>> {
        self.fetch_rows(sql, schema, table)
            .await?
            .iter()
            .map(|row| {
                scan_column(row).map_err(|e| MetaError::query(e, "scanning PostgreSQL column row"))
            })
            .collect()
    }

    async fn query_indexes(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Index>> {
        self.fetch_rows(sql, schema, table)
            .await?
            .iter()
            .map(|row| {
                scan_index(row).map_err(|e| MetaError::query(e, "scanning PostgreSQL index row"))
            })
            .collect()
    }

    async fn probe_column_types(&self, sql: &str) -> Result<Vec<ColumnTypeDescriptor>> {
        let client = self.client("getting connection for type probe").await?;
        // Preparing is enough: the row description carries every column type.
        let stmt = client.prepare(sql).await?;
        Ok(stmt
            .columns()
            .iter()
            .map(|c| probed_type(c.name(), c.type_()))
            .collect())
    }
}
