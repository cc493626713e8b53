//! # dbmeta
//!
//! Table metadata introspection for code generation.
//!
//! Given a schema and a table name, this library reads column metadata and
//! index membership from the database's own catalog and normalizes it into a
//! dialect-independent [`Column`]/[`Index`] model:
//!
//! - **MySQL/MariaDB** via `information_schema.COLUMNS` and `STATISTICS`
//! - **PostgreSQL** via `information_schema.columns` plus a zero-row type
//!   probe for the full column type (index metadata is not available)
//!
//! ## Example
//!
//! ```rust,no_run
//! use dbmeta::{get_columns_with_indexes, Config, MysqlSession};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("dbmeta.yaml")?;
//!     let session = MysqlSession::connect(&config.database).await?;
//!     let columns = get_columns_with_indexes(Some(&session), "shop", "orders", true).await?;
//!     for col in &columns {
//!         println!("{} {} ({} indexes)", col.name, col.column_type, col.indexes.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod orchestrator;

// Re-exports for convenient access
pub use config::{Config, DatabaseConfig, IntrospectConfig};
pub use core::{Column, ColumnTypeDescriptor, Index, MetadataProvider, Session};
pub use drivers::{
    connect, select_provider, MysqlProvider, MysqlSession, PostgresProvider, PostgresSession,
    ProviderImpl,
};
pub use error::{MetaError, Result};
pub use orchestrator::{attach_indexes, get_columns_with_indexes, Introspector, TableInfo};
