//! Database driver implementations.
//!
//! - [`mysql`]: MySQL/MariaDB provider and session
//! - [`postgres`]: PostgreSQL provider and session
//! - [`common`]: Shared utilities (TLS)
//!
//! # Static dispatch
//!
//! Providers are stateless strategies collected in the [`ProviderImpl`] enum.
//! The compiler generates a match instead of vtable dispatch, and
//! [`ProviderImpl::from_db_type`] is the single place that maps a product
//! identity onto a provider.
//!
//! # Adding New Databases
//!
//! 1. Create a module under `drivers/` with a provider implementing
//!    [`MetadataProvider`] (and a [`Session`] if a new transport is needed)
//! 2. Add a variant to [`ProviderImpl`] and an arm to `from_db_type`

pub mod common;
pub mod mysql;
pub mod postgres;

use async_trait::async_trait;

pub use common::SslMode;
pub use mysql::{MysqlProvider, MysqlSession};
pub use postgres::{PostgresProvider, PostgresSession};

use crate::config::DatabaseConfig;
use crate::core::schema::{Column, Index};
use crate::core::traits::{MetadataProvider, Session};
use crate::error::{MetaError, Result};

/// Enum-based static dispatch over the supported providers.
#[derive(Debug, Clone)]
pub enum ProviderImpl {
    Mysql(MysqlProvider),
    Postgres(PostgresProvider),
}

impl ProviderImpl {
    /// Resolve a provider from a database type string.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::UnsupportedDialect`] if the type is not recognized.
    pub fn from_db_type(db_type: &str) -> Result<Self> {
        match db_type.to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(ProviderImpl::Mysql(MysqlProvider::new())),
            "postgres" | "postgresql" | "pg" => Ok(ProviderImpl::Postgres(PostgresProvider::new())),
            _ => Err(MetaError::UnsupportedDialect(db_type.to_string())),
        }
    }

    /// Standard server port for this product.
    pub fn default_port(&self) -> u16 {
        match self {
            ProviderImpl::Mysql(_) => 3306,
            ProviderImpl::Postgres(_) => 5432,
        }
    }

    /// Schema to introspect when none is named.
    ///
    /// MySQL schemas are databases; PostgreSQL uses `public`.
    pub fn default_schema(&self, database: &str) -> String {
        match self {
            ProviderImpl::Mysql(_) => database.to_string(),
            ProviderImpl::Postgres(_) => "public".to_string(),
        }
    }
}

/// Pick the provider matching a session's product identity.
pub fn select_provider(session: &dyn Session) -> Result<ProviderImpl> {
    ProviderImpl::from_db_type(session.db_type())
}

/// Open a session for the configured database type.
pub async fn connect(config: &DatabaseConfig) -> Result<Box<dyn Session>> {
    match ProviderImpl::from_db_type(&config.r#type)? {
        ProviderImpl::Mysql(_) => Ok(Box::new(MysqlSession::connect(config).await?)),
        ProviderImpl::Postgres(_) => Ok(Box::new(PostgresSession::connect(config).await?)),
    }
}

#[async_trait]
impl MetadataProvider for ProviderImpl {
    fn name(&self) -> &'static str {
        match self {
            ProviderImpl::Mysql(p) => p.name(),
            ProviderImpl::Postgres(p) => p.name(),
        }
    }

    async fn fetch_columns(
        &self,
        session: &dyn Session,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Column>> {
        match self {
            ProviderImpl::Mysql(p) => p.fetch_columns(session, schema, table).await,
            ProviderImpl::Postgres(p) => p.fetch_columns(session, schema, table).await,
        }
    }

    async fn fetch_indexes(
        &self,
        session: &dyn Session,
        schema: &str,
        table: &str,
    ) -> Result<Vec<Index>> {
        match self {
            ProviderImpl::Mysql(p) => p.fetch_indexes(session, schema, table).await,
            ProviderImpl::Postgres(p) => p.fetch_indexes(session, schema, table).await,
        }
    }
}
